use std::collections::HashMap;

use super::{
    DockingStatus, Planet, PlanetId, PlanetIdx, Player, PlayerId, PlayerIdx, Ship, ShipId,
    ShipIdx, Velocity, World,
};
use crate::error::SnapshotError;
use crate::geometry::Position;

/// A ship exactly as the engine reported it, references still raw ids.
#[derive(Clone, Debug, PartialEq)]
pub struct RawShip {
    pub id: ShipId,
    pub x: f64,
    pub y: f64,
    pub health: u32,
    pub vel_x: f64,
    pub vel_y: f64,
    pub docking_status: DockingStatus,
    pub planet: PlanetId,
    pub docking_progress: u32,
    pub weapon_cooldown: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawPlayer {
    pub id: PlayerId,
    pub ships: Vec<RawShip>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawPlanet {
    pub id: PlanetId,
    pub x: f64,
    pub y: f64,
    pub health: u32,
    pub radius: f64,
    pub docking_spots: usize,
    pub current_production: u32,
    pub remaining_resources: u32,
    pub owner: Option<PlayerId>,
    pub docked_ships: Vec<ShipId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawSnapshot {
    pub my_id: PlayerId,
    pub width: u32,
    pub height: u32,
    pub players: Vec<RawPlayer>,
    pub planets: Vec<RawPlanet>,
}

/// Resolves every raw id into an arena handle and checks the snapshot is
/// self-consistent. Any dangling reference rejects the whole snapshot.
pub fn link(raw: RawSnapshot) -> Result<World, SnapshotError> {
    let mut player_lookup = HashMap::with_capacity(raw.players.len());
    for (index, player) in raw.players.iter().enumerate() {
        if player_lookup.insert(player.id, PlayerIdx(index)).is_some() {
            return Err(SnapshotError::DuplicatePlayer { player: player.id });
        }
    }
    let me = *player_lookup
        .get(&raw.my_id)
        .ok_or(SnapshotError::UnknownSelf { player: raw.my_id })?;

    let mut planet_lookup = HashMap::with_capacity(raw.planets.len());
    for (index, planet) in raw.planets.iter().enumerate() {
        if planet_lookup.insert(planet.id, PlanetIdx(index)).is_some() {
            return Err(SnapshotError::DuplicatePlanet { planet: planet.id });
        }
    }

    let mut players = Vec::with_capacity(raw.players.len());
    let mut ships = Vec::new();
    let mut ship_lookup = HashMap::new();
    for (player_index, raw_player) in raw.players.into_iter().enumerate() {
        let owner = PlayerIdx(player_index);
        let mut owned = Vec::with_capacity(raw_player.ships.len());
        for raw_ship in raw_player.ships {
            let planet = match raw_ship.docking_status {
                DockingStatus::Undocked => None,
                _ => Some(*planet_lookup.get(&raw_ship.planet).ok_or(
                    SnapshotError::UnknownPlanet {
                        ship: raw_ship.id,
                        planet: raw_ship.planet,
                    },
                )?),
            };
            let idx = ShipIdx(ships.len());
            if ship_lookup.insert(raw_ship.id, idx).is_some() {
                return Err(SnapshotError::DuplicateShip { ship: raw_ship.id });
            }
            owned.push(idx);
            ships.push(Ship {
                id: raw_ship.id,
                position: Position::new(raw_ship.x, raw_ship.y),
                health: raw_ship.health,
                velocity: Velocity {
                    x: raw_ship.vel_x,
                    y: raw_ship.vel_y,
                },
                docking_status: raw_ship.docking_status,
                docking_progress: raw_ship.docking_progress,
                weapon_cooldown: raw_ship.weapon_cooldown,
                owner,
                planet,
            });
        }
        players.push(Player {
            id: raw_player.id,
            ships: owned,
        });
    }

    let mut planets = Vec::with_capacity(raw.planets.len());
    for (planet_index, raw_planet) in raw.planets.into_iter().enumerate() {
        let owner = match raw_planet.owner {
            Some(owner_id) => Some(*player_lookup.get(&owner_id).ok_or(
                SnapshotError::UnknownOwner {
                    planet: raw_planet.id,
                    owner: owner_id,
                },
            )?),
            None => None,
        };

        if raw_planet.docked_ships.len() > raw_planet.docking_spots {
            return Err(SnapshotError::DockingSlotsExceeded {
                planet: raw_planet.id,
                docked: raw_planet.docked_ships.len(),
                capacity: raw_planet.docking_spots,
            });
        }

        let docked = match owner {
            None if !raw_planet.docked_ships.is_empty() => {
                return Err(SnapshotError::DockedOnUnownedPlanet {
                    planet: raw_planet.id,
                });
            }
            None => Vec::new(),
            Some(owner) => raw_planet
                .docked_ships
                .iter()
                .map(|ship_id| {
                    ship_lookup
                        .get(ship_id)
                        .copied()
                        .filter(|idx| ships[idx.0].owner == owner)
                        .ok_or(SnapshotError::UnknownDockedShip {
                            planet: raw_planet.id,
                            ship: *ship_id,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        planets.push(Planet {
            id: raw_planet.id,
            position: Position::new(raw_planet.x, raw_planet.y),
            health: raw_planet.health,
            radius: raw_planet.radius,
            docking_spots: raw_planet.docking_spots,
            current_production: raw_planet.current_production,
            remaining_resources: raw_planet.remaining_resources,
            idx: PlanetIdx(planet_index),
            owner,
            docked,
        });
    }

    Ok(World {
        my_id: raw.my_id,
        width: raw.width,
        height: raw.height,
        me,
        players,
        planets,
        ships,
        player_lookup,
        planet_lookup,
        ship_lookup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_ship(id: ShipId, status: DockingStatus, planet: PlanetId) -> RawShip {
        RawShip {
            id,
            x: 1.0,
            y: 1.0,
            health: 255,
            vel_x: 0.0,
            vel_y: 0.0,
            docking_status: status,
            planet,
            docking_progress: 0,
            weapon_cooldown: 0,
        }
    }

    fn raw_planet(id: PlanetId, owner: Option<PlayerId>, docked: Vec<ShipId>) -> RawPlanet {
        RawPlanet {
            id,
            x: 20.0,
            y: 20.0,
            health: 1000,
            radius: 3.0,
            docking_spots: 2,
            current_production: 0,
            remaining_resources: 500,
            owner,
            docked_ships: docked,
        }
    }

    fn snapshot(players: Vec<RawPlayer>, planets: Vec<RawPlanet>) -> RawSnapshot {
        RawSnapshot {
            my_id: 0,
            width: 100,
            height: 100,
            players,
            planets,
        }
    }

    fn player(id: PlayerId, ships: Vec<RawShip>) -> RawPlayer {
        RawPlayer { id, ships }
    }

    #[test]
    fn links_consistent_snapshot() {
        let world = link(snapshot(
            vec![player(
                0,
                vec![
                    raw_ship(3, DockingStatus::Docked, 7),
                    raw_ship(4, DockingStatus::Undocked, 7),
                ],
            )],
            vec![raw_planet(7, Some(0), vec![3])],
        ))
        .expect("snapshot should link");

        let planet = world.planet(7).expect("planet 7");
        assert_eq!(planet.docked().len(), 1);
        assert_eq!(world.ship_at(planet.docked()[0]).id, 3);
        assert_eq!(world.me().ships().len(), 2);
    }

    #[test]
    fn rejects_missing_self() {
        let mut raw = snapshot(vec![player(1, vec![])], vec![]);
        raw.my_id = 0;
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::UnknownSelf { player: 0 }
        );
    }

    #[test]
    fn rejects_duplicate_ship_ids_across_players() {
        let raw = snapshot(
            vec![
                player(0, vec![raw_ship(1, DockingStatus::Undocked, 0)]),
                player(1, vec![raw_ship(1, DockingStatus::Undocked, 0)]),
            ],
            vec![],
        );
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::DuplicateShip { ship: 1 }
        );
    }

    #[test]
    fn rejects_docking_ship_with_unknown_planet() {
        let raw = snapshot(
            vec![player(0, vec![raw_ship(1, DockingStatus::Docking, 9)])],
            vec![],
        );
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::UnknownPlanet { ship: 1, planet: 9 }
        );
    }

    #[test]
    fn rejects_unknown_planet_owner() {
        let raw = snapshot(vec![player(0, vec![])], vec![raw_planet(2, Some(5), vec![])]);
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::UnknownOwner { planet: 2, owner: 5 }
        );
    }

    #[test]
    fn rejects_docked_ship_owned_by_someone_else() {
        let raw = snapshot(
            vec![
                player(0, vec![]),
                player(1, vec![raw_ship(6, DockingStatus::Docked, 2)]),
            ],
            vec![raw_planet(2, Some(0), vec![6])],
        );
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::UnknownDockedShip { planet: 2, ship: 6 }
        );
    }

    #[test]
    fn rejects_more_docked_ships_than_slots() {
        let raw = snapshot(
            vec![player(
                0,
                vec![
                    raw_ship(1, DockingStatus::Docked, 2),
                    raw_ship(2, DockingStatus::Docked, 2),
                    raw_ship(3, DockingStatus::Docked, 2),
                ],
            )],
            vec![raw_planet(2, Some(0), vec![1, 2, 3])],
        );
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::DockingSlotsExceeded {
                planet: 2,
                docked: 3,
                capacity: 2
            }
        );
    }

    #[test]
    fn rejects_docked_ships_on_unowned_planet() {
        let raw = snapshot(
            vec![player(0, vec![raw_ship(1, DockingStatus::Docked, 2)])],
            vec![raw_planet(2, None, vec![1])],
        );
        assert_eq!(
            link(raw).unwrap_err(),
            SnapshotError::DockedOnUnownedPlanet { planet: 2 }
        );
    }
}
