use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::{PlanetId, ShipId};

/// One order for one ship. A turn carries at most one per ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    Thrust { ship: ShipId, speed: u32, bearing: u32 },
    Dock { ship: ShipId, planet: PlanetId },
    Undock { ship: ShipId },
}

impl Command {
    pub fn ship(&self) -> ShipId {
        match *self {
            Self::Thrust { ship, .. } | Self::Dock { ship, .. } | Self::Undock { ship } => ship,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thrust {
                ship,
                speed,
                bearing,
            } => write!(f, "t {ship} {speed} {bearing}"),
            Self::Dock { ship, planet } => write!(f, "d {ship} {planet}"),
            Self::Undock { ship } => write!(f, "u {ship}"),
        }
    }
}
