//! Game constants for the Halite II engine.
//!
//! These are process-lifetime values; the engine never changes them mid-game.

// Ships
pub const SHIP_RADIUS: f64 = 0.5;
pub const MAX_SPEED: u32 = 7;

// Docking
pub const DOCK_RADIUS: f64 = 4.0; // measured from the planet surface

// Engine time allowance per turn, after the initial setup phase.
pub const TURN_ALLOWANCE_MS: u64 = 2_000;

// Navigation defaults
pub const MAX_CORRECTIONS: u32 = 18;
pub const ANGULAR_STEP_DEG: f64 = 5.0;
pub const APPROACH_CLEARANCE: f64 = 3.0;

// Obstacle margins added on top of the mover's own size
pub const PLANET_CLEARANCE: f64 = 0.2;
pub const OVERLAP_CLEARANCE: f64 = 0.1;
