use serde::{Deserialize, Serialize};

use crate::constants::{OVERLAP_CLEARANCE, PLANET_CLEARANCE, SHIP_RADIUS};
use crate::geometry::{distance, Body, Position};
use crate::world::{EntityRef, Ship, World};

/// Which obstacle categories a path check looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleFilter {
    pub ships: bool,
    pub planets: bool,
}

impl ObstacleFilter {
    pub const ALL: Self = Self {
        ships: true,
        planets: true,
    };
    pub const PLANETS_ONLY: Self = Self {
        ships: false,
        planets: true,
    };
}

impl Default for ObstacleFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Clearance added to an obstacle's radius when testing a ship's path.
///
/// Two moving bodies need more room than a ship skimming a planet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleMargins {
    pub ship: f64,
    pub planet: f64,
}

impl ObstacleMargins {
    pub fn for_obstacle(&self, obstacle: &EntityRef<'_>) -> f64 {
        match obstacle {
            EntityRef::Ship(_) => self.ship,
            EntityRef::Planet(_) => self.planet,
            EntityRef::Position(_) => 0.0,
        }
    }
}

impl Default for ObstacleMargins {
    fn default() -> Self {
        Self {
            ship: 2.0 * SHIP_RADIUS,
            planet: SHIP_RADIUS + PLANET_CLEARANCE,
        }
    }
}

/// True when the segment `start -> end` passes within
/// `obstacle.radius() + margin` of the obstacle's center.
///
/// A zero-length segment never intersects anything.
pub fn intersects(start: Position, end: Position, obstacle: &impl Body, margin: f64) -> bool {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return false;
    }

    let center = obstacle.position();
    let t = (((center.x - start.x) * dx + (center.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Position::new(start.x + t * dx, start.y + t * dy);

    distance(&closest, &center) <= obstacle.radius() + margin
}

/// Planets and ships (per `filter`) whose inflated bodies cross the path from
/// `mover` to `destination`. Neither endpoint counts as its own obstacle.
/// Planets are listed before ships.
pub fn obstacles_between<'a>(
    world: &'a World,
    mover: &Ship,
    destination: &EntityRef<'_>,
    filter: ObstacleFilter,
    margins: &ObstacleMargins,
) -> Vec<EntityRef<'a>> {
    let mover_ref = EntityRef::Ship(mover);
    let start = mover.position;
    let end = destination.position();

    let planets = world
        .planets()
        .iter()
        .filter(|_| filter.planets)
        .map(EntityRef::Planet);
    let ships = world
        .ships()
        .iter()
        .filter(|_| filter.ships)
        .map(EntityRef::Ship);

    planets
        .chain(ships)
        .filter(|candidate| !candidate.same_as(&mover_ref) && !candidate.same_as(destination))
        .filter(|candidate| intersects(start, end, candidate, margins.for_obstacle(candidate)))
        .collect()
}

/// First ship or planet whose body overlaps `target`, if any.
pub fn first_overlap<'a>(world: &'a World, target: &EntityRef<'_>) -> Option<EntityRef<'a>> {
    world
        .ships()
        .iter()
        .map(EntityRef::Ship)
        .chain(world.planets().iter().map(EntityRef::Planet))
        .filter(|candidate| !candidate.same_as(target))
        .find(|candidate| {
            distance(candidate, target) <= candidate.radius() + target.radius() + OVERLAP_CLEARANCE
        })
}
