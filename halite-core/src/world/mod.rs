//! The per-turn world snapshot.
//!
//! Entities live in arena vectors owned by [`World`]; cross-references are
//! index handles resolved once by [`link`]. A `World` is rebuilt from scratch
//! every turn and must not be kept around afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::constants::{DOCK_RADIUS, SHIP_RADIUS};
use crate::geometry::{distance, Body, Position};

mod link;

pub use link::{link, RawPlanet, RawPlayer, RawShip, RawSnapshot};

pub type PlayerId = u32;
pub type PlanetId = u32;
pub type ShipId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerIdx(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetIdx(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipIdx(usize);

impl PlanetIdx {
    /// Position of the planet in [`World::planets`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// Advanced only by the engine:
/// `Undocked -> Docking -> Docked -> Undocking -> Undocked`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockingStatus {
    Undocked,
    Docking,
    Docked,
    Undocking,
}

impl DockingStatus {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Undocked),
            1 => Some(Self::Docking),
            2 => Some(Self::Docked),
            3 => Some(Self::Undocking),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub id: ShipId,
    pub position: Position,
    pub health: u32,
    pub velocity: Velocity,
    pub docking_status: DockingStatus,
    pub docking_progress: u32,
    pub weapon_cooldown: u32,
    owner: PlayerIdx,
    planet: Option<PlanetIdx>,
}

impl Ship {
    pub fn owner(&self) -> PlayerIdx {
        self.owner
    }

    /// The planet this ship is docking to, docked at or undocking from.
    pub fn planet(&self) -> Option<PlanetIdx> {
        self.planet
    }

    pub fn is_undocked(&self) -> bool {
        self.docking_status == DockingStatus::Undocked
    }

    /// Range and ownership check for docking. Turn-local reservations are the
    /// selector's business and are not considered here.
    pub fn can_dock(&self, planet: &Planet) -> bool {
        if planet.is_full() {
            return false;
        }
        if planet.owner().is_some_and(|owner| owner != self.owner) {
            return false;
        }
        distance(self, planet) <= planet.radius + DOCK_RADIUS + SHIP_RADIUS
    }

    pub fn dock(&self, planet: &Planet) -> Command {
        Command::Dock {
            ship: self.id,
            planet: planet.id,
        }
    }

    pub fn undock(&self) -> Command {
        Command::Undock { ship: self.id }
    }

    /// Speed is truncated so a move never overshoots; bearing is rounded.
    pub fn thrust(&self, speed: f64, bearing_deg: f64) -> Command {
        Command::Thrust {
            ship: self.id,
            speed: speed.max(0.0).trunc() as u32,
            bearing: (bearing_deg.round() as i64).rem_euclid(360) as u32,
        }
    }
}

impl Body for Ship {
    fn position(&self) -> Position {
        self.position
    }

    fn radius(&self) -> f64 {
        SHIP_RADIUS
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub id: PlanetId,
    pub position: Position,
    pub health: u32,
    pub radius: f64,
    pub docking_spots: usize,
    pub current_production: u32,
    pub remaining_resources: u32,
    idx: PlanetIdx,
    owner: Option<PlayerIdx>,
    docked: Vec<ShipIdx>,
}

impl Planet {
    pub fn idx(&self) -> PlanetIdx {
        self.idx
    }

    pub fn owner(&self) -> Option<PlayerIdx> {
        self.owner
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_full(&self) -> bool {
        self.docked.len() >= self.docking_spots
    }

    pub fn docked(&self) -> &[ShipIdx] {
        &self.docked
    }
}

impl Body for Planet {
    fn position(&self) -> Position {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    ships: Vec<ShipIdx>,
}

impl Player {
    pub fn ships(&self) -> &[ShipIdx] {
        &self.ships
    }
}

/// Borrowed view of anything a ship can aim at or bump into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityRef<'a> {
    Planet(&'a Planet),
    Ship(&'a Ship),
    Position(Position),
}

impl EntityRef<'_> {
    /// Identity comparison: planets and ships by id, positions by coordinates.
    pub fn same_as(&self, other: &EntityRef<'_>) -> bool {
        match (self, other) {
            (Self::Planet(a), EntityRef::Planet(b)) => a.id == b.id,
            (Self::Ship(a), EntityRef::Ship(b)) => a.id == b.id,
            (Self::Position(a), EntityRef::Position(b)) => a == b,
            _ => false,
        }
    }
}

impl Body for EntityRef<'_> {
    fn position(&self) -> Position {
        match self {
            Self::Planet(planet) => planet.position,
            Self::Ship(ship) => ship.position,
            Self::Position(position) => *position,
        }
    }

    fn radius(&self) -> f64 {
        match self {
            Self::Planet(planet) => planet.radius,
            Self::Ship(ship) => ship.radius(),
            Self::Position(_) => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Nearby<'a> {
    pub distance: f64,
    pub entity: EntityRef<'a>,
}

#[derive(Clone, Debug)]
pub struct World {
    my_id: PlayerId,
    width: u32,
    height: u32,
    me: PlayerIdx,
    players: Vec<Player>,
    planets: Vec<Planet>,
    ships: Vec<Ship>,
    player_lookup: HashMap<PlayerId, PlayerIdx>,
    planet_lookup: HashMap<PlanetId, PlanetIdx>,
    ship_lookup: HashMap<ShipId, ShipIdx>,
}

impl World {
    pub fn my_id(&self) -> PlayerId {
        self.my_id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn me(&self) -> &Player {
        &self.players[self.me.0]
    }

    pub fn is_mine(&self, ship: &Ship) -> bool {
        ship.owner == self.me
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.player_lookup.get(&id).map(|idx| &self.players[idx.0])
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_at(&self, idx: PlayerIdx) -> &Player {
        &self.players[idx.0]
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planet_lookup.get(&id).map(|idx| &self.planets[idx.0])
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planet_at(&self, idx: PlanetIdx) -> &Planet {
        &self.planets[idx.0]
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ship_lookup.get(&id).map(|idx| &self.ships[idx.0])
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship_at(&self, idx: ShipIdx) -> &Ship {
        &self.ships[idx.0]
    }

    pub fn ships_of<'a>(&'a self, player: &'a Player) -> impl Iterator<Item = &'a Ship> + 'a {
        player.ships.iter().map(move |idx| &self.ships[idx.0])
    }

    pub fn my_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships_of(self.me())
    }

    pub fn docked_ships<'a>(&'a self, planet: &'a Planet) -> impl Iterator<Item = &'a Ship> + 'a {
        planet.docked.iter().map(move |idx| &self.ships[idx.0])
    }

    /// Every ship and planet other than `source`, nearest first.
    ///
    /// Entities at exactly the same distance keep larger bodies ahead of
    /// smaller ones, so a planet wins over a ship at equal range.
    pub fn nearby_entities_by_distance(&self, source: &EntityRef<'_>) -> Vec<Nearby<'_>> {
        let mut nearby: Vec<Nearby<'_>> = self
            .ships
            .iter()
            .map(EntityRef::Ship)
            .chain(self.planets.iter().map(EntityRef::Planet))
            .filter(|entity| !entity.same_as(source))
            .map(|entity| Nearby {
                distance: distance(source, &entity),
                entity,
            })
            .collect();

        nearby.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| b.entity.radius().total_cmp(&a.entity.radius()))
        });
        nearby
    }
}
