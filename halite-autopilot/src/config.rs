use std::env;
use std::time::Duration;

use halite_core::collision::{ObstacleFilter, ObstacleMargins};
use halite_core::constants::{
    ANGULAR_STEP_DEG, APPROACH_CLEARANCE, MAX_CORRECTIONS, MAX_SPEED, TURN_ALLOWANCE_MS,
};

pub const DEFAULT_BOT_NAME: &str = "Settler";
// Leave a quarter of the engine allowance for parsing and sending.
pub const DEFAULT_TURN_BUDGET_MS: u64 = TURN_ALLOWANCE_MS * 3 / 4;

/// Tunables for one bot process. Fixed for the whole game.
#[derive(Clone, Debug, PartialEq)]
pub struct BotConfig {
    pub bot_name: String,
    pub turn_budget: Duration,
    pub navigation: NavigationConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationConfig {
    pub max_corrections: u32,
    pub angular_step: f64,
    pub approach_speed: u32,
    pub approach_clearance: f64,
    pub filter: ObstacleFilter,
    pub margins: ObstacleMargins,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_corrections: MAX_CORRECTIONS,
            angular_step: ANGULAR_STEP_DEG,
            approach_speed: MAX_SPEED,
            approach_clearance: APPROACH_CLEARANCE,
            filter: ObstacleFilter::ALL,
            margins: ObstacleMargins::default(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_string(),
            turn_budget: Duration::from_millis(DEFAULT_TURN_BUDGET_MS),
            navigation: NavigationConfig::default(),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Self {
        let turn_budget_ms = checked_turn_budget_ms(read_env_u64(
            "HALITE_TURN_BUDGET_MS",
            DEFAULT_TURN_BUDGET_MS,
        ));
        let approach_speed = checked_approach_speed(read_env_u32("HALITE_APPROACH_SPEED", MAX_SPEED));

        Self {
            bot_name: env::var("HALITE_BOT_NAME")
                .ok()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_BOT_NAME.to_string()),
            turn_budget: Duration::from_millis(turn_budget_ms),
            navigation: NavigationConfig {
                max_corrections: read_env_u32("HALITE_MAX_CORRECTIONS", MAX_CORRECTIONS),
                angular_step: read_env_f64("HALITE_ANGULAR_STEP", ANGULAR_STEP_DEG),
                approach_speed,
                approach_clearance: read_env_f64("HALITE_APPROACH_CLEARANCE", APPROACH_CLEARANCE),
                filter: ObstacleFilter {
                    ships: read_env_bool("HALITE_AVOID_SHIPS", true),
                    planets: read_env_bool("HALITE_AVOID_PLANETS", true),
                },
                margins: ObstacleMargins::default(),
            },
        }
    }
}

/// Budgets that leave no headroom under the engine allowance fall back to the
/// default.
pub(crate) fn checked_turn_budget_ms(budget_ms: u64) -> u64 {
    if budget_ms < TURN_ALLOWANCE_MS {
        return budget_ms;
    }
    tracing::warn!(
        "HALITE_TURN_BUDGET_MS ({}) leaves no headroom under the {}ms allowance. Falling back to {}.",
        budget_ms,
        TURN_ALLOWANCE_MS,
        DEFAULT_TURN_BUDGET_MS
    );
    DEFAULT_TURN_BUDGET_MS
}

pub(crate) fn checked_approach_speed(speed: u32) -> u32 {
    if speed <= MAX_SPEED {
        return speed;
    }
    tracing::warn!(
        "HALITE_APPROACH_SPEED ({}) is above the engine limit {}. Clamping.",
        speed,
        MAX_SPEED
    );
    MAX_SPEED
}

pub(crate) fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}

pub(crate) fn read_env_bool(name: &str, default: bool) -> bool {
    match env::var(name).ok().as_deref().map(str::trim) {
        Some("1" | "true" | "yes") => true,
        Some("0" | "false" | "no") => false,
        _ => default,
    }
}
