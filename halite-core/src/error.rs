use std::fmt;

use crate::world::{PlanetId, PlayerId, ShipId};

/// A snapshot that cannot be turned into a consistent world for this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    MissingToken { field: &'static str },
    InvalidNumber { field: &'static str, token: String },
    UnknownDockingStatus { ship: ShipId, code: u8 },
    TrailingTokens { count: usize },
    DuplicatePlayer { player: PlayerId },
    DuplicatePlanet { planet: PlanetId },
    DuplicateShip { ship: ShipId },
    UnknownSelf { player: PlayerId },
    UnknownPlanet { ship: ShipId, planet: PlanetId },
    UnknownOwner { planet: PlanetId, owner: PlayerId },
    UnknownDockedShip { planet: PlanetId, ship: ShipId },
    DockedOnUnownedPlanet { planet: PlanetId },
    DockingSlotsExceeded {
        planet: PlanetId,
        docked: usize,
        capacity: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken { field } => write!(f, "snapshot ended while reading {field}"),
            Self::InvalidNumber { field, token } => {
                write!(f, "invalid {field}: {token:?}")
            }
            Self::UnknownDockingStatus { ship, code } => {
                write!(f, "ship {ship} has unknown docking status {code}")
            }
            Self::TrailingTokens { count } => {
                write!(f, "{count} extra tokens after the last planet")
            }
            Self::DuplicatePlayer { player } => write!(f, "player {player} listed twice"),
            Self::DuplicatePlanet { planet } => write!(f, "planet {planet} listed twice"),
            Self::DuplicateShip { ship } => write!(f, "ship {ship} listed twice"),
            Self::UnknownSelf { player } => {
                write!(f, "own player {player} is missing from the snapshot")
            }
            Self::UnknownPlanet { ship, planet } => {
                write!(f, "ship {ship} references unknown planet {planet}")
            }
            Self::UnknownOwner { planet, owner } => {
                write!(f, "planet {planet} is owned by unknown player {owner}")
            }
            Self::UnknownDockedShip { planet, ship } => write!(
                f,
                "planet {planet} lists docked ship {ship} which its owner does not control"
            ),
            Self::DockedOnUnownedPlanet { planet } => {
                write!(f, "planet {planet} has docked ships but no owner")
            }
            Self::DockingSlotsExceeded {
                planet,
                docked,
                capacity,
            } => write!(
                f,
                "planet {planet} has {docked} docked ships but only {capacity} slots"
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}
