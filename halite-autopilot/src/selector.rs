//! Per-ship target selection with turn-scoped docking reservations.

use halite_core::geometry::closest_approach_point;
use halite_core::world::{EntityRef, Planet, Ship, World};
use halite_core::Command;

use crate::config::NavigationConfig;
use crate::navigator::Navigator;

/// Claims made on one planet earlier in the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanetClaims {
    pub curr_docking: usize,
    pub enroute: usize,
    pub someone_docking: bool,
}

/// Reservation counters for every planet, valid for a single turn.
///
/// The engine only reflects docking a turn later, so without these several
/// ships deciding in sequence would all grab the same open slot.
#[derive(Clone, Debug)]
pub struct TurnReservations {
    planets: Vec<PlanetClaims>,
}

impl TurnReservations {
    pub fn new(world: &World) -> Self {
        Self {
            planets: vec![PlanetClaims::default(); world.planets().len()],
        }
    }

    pub fn claims(&self, planet: &Planet) -> PlanetClaims {
        self.planets[planet.idx().index()]
    }

    /// Docked ships plus everything reserved on the planet this turn.
    pub fn committed(&self, planet: &Planet) -> usize {
        let claims = self.claims(planet);
        planet.docked().len() + claims.enroute + claims.curr_docking
    }

    pub fn open_slots(&self, planet: &Planet) -> usize {
        planet.docking_spots.saturating_sub(self.committed(planet))
    }

    fn claim_dock(&mut self, planet: &Planet) {
        let claims = &mut self.planets[planet.idx().index()];
        claims.curr_docking += 1;
        claims.someone_docking = true;
    }

    fn reserve_enroute(&mut self, planet: &Planet) {
        self.planets[planet.idx().index()].enroute += 1;
    }

    fn release_enroute(&mut self, planet: &Planet) {
        let claims = &mut self.planets[planet.idx().index()];
        claims.enroute = claims.enroute.saturating_sub(1);
    }
}

pub struct TargetSelector<'w> {
    world: &'w World,
    navigator: Navigator,
    approach_clearance: f64,
}

impl<'w> TargetSelector<'w> {
    pub fn new(world: &'w World, config: &NavigationConfig) -> Self {
        Self {
            world,
            navigator: Navigator::new(config),
            approach_clearance: config.approach_clearance,
        }
    }

    /// The single command for `ship` this turn, if any candidate works out.
    ///
    /// Candidates are scanned nearest first. A candidate that cannot be
    /// reached this turn is dropped and the scan moves on.
    pub fn decide(&self, ship: &Ship, reservations: &mut TurnReservations) -> Option<Command> {
        let source = EntityRef::Ship(ship);
        for nearby in self.world.nearby_entities_by_distance(&source) {
            let command = match nearby.entity {
                EntityRef::Planet(planet) => self.consider_planet(ship, planet, reservations),
                EntityRef::Ship(other) if self.world.is_mine(other) => None,
                EntityRef::Ship(other) => {
                    let aim = closest_approach_point(other, ship, self.approach_clearance);
                    self.navigator
                        .navigate(ship, &EntityRef::Position(aim), self.world)
                }
                EntityRef::Position(point) => {
                    self.navigator
                        .navigate(ship, &EntityRef::Position(point), self.world)
                }
            };

            if let Some(command) = command {
                tracing::debug!(
                    ship = ship.id,
                    distance = nearby.distance,
                    command = %command,
                    "decided"
                );
                return Some(command);
            }
        }

        tracing::debug!(ship = ship.id, "no candidate produced a command");
        None
    }

    fn consider_planet(
        &self,
        ship: &Ship,
        planet: &Planet,
        reservations: &mut TurnReservations,
    ) -> Option<Command> {
        let open_slots = reservations.open_slots(planet);

        if ship.can_dock(planet) && !reservations.claims(planet).someone_docking && open_slots > 0 {
            reservations.claim_dock(planet);
            return Some(ship.dock(planet));
        }

        let hostile = planet.owner().is_some_and(|owner| owner != ship.owner());
        if planet.is_full() || hostile || open_slots == 0 {
            return None;
        }

        reservations.reserve_enroute(planet);
        let aim = closest_approach_point(planet, ship, self.approach_clearance);
        let command = self
            .navigator
            .navigate(ship, &EntityRef::Position(aim), self.world);
        if command.is_none() {
            reservations.release_enroute(planet);
        }
        command
    }
}
