use std::time::{Duration, Instant};

use halite_core::world::{Ship, World};
use halite_core::Command;
use serde::Serialize;

use crate::config::BotConfig;
use crate::selector::{TargetSelector, TurnReservations};

/// Time elapsed since the current turn started.
pub trait TurnClock {
    fn elapsed(&self) -> Duration;
}

impl TurnClock for Instant {
    fn elapsed(&self) -> Duration {
        Instant::elapsed(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnPlan {
    pub commands: Vec<Command>,
    /// Ships the selector actually ran for.
    pub processed: usize,
    /// Undocked ships eligible for orders this turn.
    pub eligible: usize,
    pub budget_exhausted: bool,
}

/// Runs the selector over every undocked ship, stopping once the turn budget
/// is used up. Whatever was decided before the cut-off is still returned.
pub struct TurnScheduler {
    config: BotConfig,
}

impl TurnScheduler {
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    pub fn budget(&self) -> Duration {
        self.config.turn_budget
    }

    pub fn plan_turn(&self, world: &World, clock: &impl TurnClock) -> TurnPlan {
        let mut reservations = TurnReservations::new(world);
        let selector = TargetSelector::new(world, &self.config.navigation);
        let ships: Vec<&Ship> = world.my_ships().filter(|ship| ship.is_undocked()).collect();

        let mut commands = Vec::with_capacity(ships.len());
        let mut processed = 0;
        let mut budget_exhausted = false;
        for ship in &ships {
            let elapsed = clock.elapsed();
            if elapsed >= self.config.turn_budget {
                tracing::warn!(
                    "turn budget of {:?} reached after {:?}: {} of {} ships left without orders",
                    self.config.turn_budget,
                    elapsed,
                    ships.len() - processed,
                    ships.len()
                );
                budget_exhausted = true;
                break;
            }

            if let Some(command) = selector.decide(ship, &mut reservations) {
                commands.push(command);
            }
            processed += 1;
        }

        TurnPlan {
            commands,
            processed,
            eligible: ships.len(),
            budget_exhausted,
        }
    }
}
