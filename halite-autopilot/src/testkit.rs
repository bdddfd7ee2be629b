use halite_core::world::{
    link, DockingStatus, PlanetId, PlayerId, RawPlanet, RawPlayer, RawShip, RawSnapshot, ShipId,
    World,
};

/// Builds linked worlds for unit tests without going through the text codec.
#[derive(Default)]
pub(crate) struct WorldBuilder {
    players: Vec<RawPlayer>,
    planets: Vec<RawPlanet>,
}

impl WorldBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ship(self, owner: PlayerId, id: ShipId, x: f64, y: f64) -> Self {
        self.ship_with_status(owner, id, x, y, DockingStatus::Undocked, 0)
    }

    pub(crate) fn docked_ship(
        self,
        owner: PlayerId,
        id: ShipId,
        x: f64,
        y: f64,
        planet: PlanetId,
    ) -> Self {
        self.ship_with_status(owner, id, x, y, DockingStatus::Docked, planet)
    }

    fn ship_with_status(
        mut self,
        owner: PlayerId,
        id: ShipId,
        x: f64,
        y: f64,
        docking_status: DockingStatus,
        planet: PlanetId,
    ) -> Self {
        let ship = RawShip {
            id,
            x,
            y,
            health: 255,
            vel_x: 0.0,
            vel_y: 0.0,
            docking_status,
            planet,
            docking_progress: 0,
            weapon_cooldown: 0,
        };
        match self.players.iter_mut().find(|player| player.id == owner) {
            Some(player) => player.ships.push(ship),
            None => self.players.push(RawPlayer {
                id: owner,
                ships: vec![ship],
            }),
        }
        self
    }

    pub(crate) fn planet(self, id: PlanetId, x: f64, y: f64, radius: f64, spots: usize) -> Self {
        self.owned_planet(id, x, y, radius, spots, None, &[])
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn owned_planet(
        mut self,
        id: PlanetId,
        x: f64,
        y: f64,
        radius: f64,
        spots: usize,
        owner: Option<PlayerId>,
        docked: &[ShipId],
    ) -> Self {
        self.planets.push(RawPlanet {
            id,
            x,
            y,
            health: 1_000,
            radius,
            docking_spots: spots,
            current_production: 0,
            remaining_resources: 1_000,
            owner,
            docked_ships: docked.to_vec(),
        });
        self
    }

    pub(crate) fn build(mut self, my_id: PlayerId) -> World {
        if !self.players.iter().any(|player| player.id == my_id) {
            self.players.push(RawPlayer {
                id: my_id,
                ships: Vec::new(),
            });
        }
        link(RawSnapshot {
            my_id,
            width: 240,
            height: 160,
            players: self.players,
            planets: self.planets,
        })
        .expect("test world should link")
    }
}
