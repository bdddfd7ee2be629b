//! Greedy local navigation: one bounded move per call.
//!
//! When the straight path is blocked the aim point is swung around the ship in
//! fixed angular steps until a clear heading turns up or the correction budget
//! runs out. Ships re-plan every turn, so a locally clear heading is enough.

use halite_core::collision::{obstacles_between, ObstacleFilter, ObstacleMargins};
use halite_core::geometry::{bearing, distance, normalize_degrees, project};
use halite_core::world::{EntityRef, Ship, World};
use halite_core::Command;

use crate::config::NavigationConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Navigator {
    pub max_speed: u32,
    pub avoid_obstacles: bool,
    pub max_corrections: u32,
    pub angular_step: f64,
    pub filter: ObstacleFilter,
    pub margins: ObstacleMargins,
}

impl Navigator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            max_speed: config.approach_speed,
            avoid_obstacles: true,
            max_corrections: config.max_corrections,
            angular_step: config.angular_step,
            filter: config.filter,
            margins: config.margins,
        }
    }

    /// One thrust toward `destination`, or `None` when every heading tried
    /// within the correction budget is blocked.
    ///
    /// Even ship ids swing toward increasing bearings and odd ids toward
    /// decreasing ones, so ships dodging the same body split up.
    pub fn navigate(&self, mover: &Ship, destination: &EntityRef<'_>, world: &World) -> Option<Command> {
        let range = distance(mover, destination);
        let step = if mover.id % 2 == 0 {
            self.angular_step
        } else {
            -self.angular_step
        };

        let mut heading = bearing(mover, destination);
        if self.avoid_obstacles {
            let mut aim = *destination;
            let mut corrections_left = self.max_corrections;
            while !obstacles_between(world, mover, &aim, self.filter, &self.margins).is_empty() {
                if corrections_left == 0 {
                    tracing::trace!(ship = mover.id, "no clear heading within correction budget");
                    return None;
                }
                corrections_left -= 1;
                heading = normalize_degrees(heading + step);
                aim = EntityRef::Position(project(mover.position, heading, range));
            }
        }

        let speed = f64::from(self.max_speed).min(range);
        Some(mover.thrust(speed, heading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::WorldBuilder;
    use halite_core::constants::MAX_SPEED;
    use halite_core::geometry::Position;

    fn navigator() -> Navigator {
        Navigator::new(&NavigationConfig::default())
    }

    fn speed_and_bearing(command: Command) -> (u32, u32) {
        match command {
            Command::Thrust { speed, bearing, .. } => (speed, bearing),
            other => panic!("expected thrust, got {other:?}"),
        }
    }

    #[test]
    fn open_space_goes_straight_at_full_speed() {
        let world = WorldBuilder::new().ship(0, 2, 10.0, 10.0).build(0);
        let ship = world.ship(2).expect("ship");
        let command = navigator()
            .navigate(ship, &EntityRef::Position(Position::new(10.0, 60.0)), &world)
            .expect("open space must be navigable");
        assert_eq!(speed_and_bearing(command), (MAX_SPEED, 90));
    }

    #[test]
    fn speed_never_exceeds_remaining_distance() {
        let world = WorldBuilder::new().ship(0, 2, 10.0, 10.0).build(0);
        let ship = world.ship(2).expect("ship");
        for (dx, expected) in [(0.4, 0), (3.9, 3), (6.99, 6), (7.0, 7), (50.0, 7)] {
            let command = navigator()
                .navigate(
                    ship,
                    &EntityRef::Position(Position::new(10.0 + dx, 10.0)),
                    &world,
                )
                .expect("open space must be navigable");
            let (speed, _) = speed_and_bearing(command);
            assert_eq!(speed, expected, "dx={dx}");
            assert!(f64::from(speed) <= dx);
            assert!(speed <= MAX_SPEED);
        }
    }

    #[test]
    fn zero_distance_is_a_standstill() {
        let world = WorldBuilder::new().ship(0, 2, 10.0, 10.0).build(0);
        let ship = world.ship(2).expect("ship");
        let command = navigator()
            .navigate(ship, &EntityRef::Position(ship.position), &world)
            .expect("standing still needs no correction");
        assert_eq!(speed_and_bearing(command), (0, 0));
    }

    #[test]
    fn avoidance_off_ignores_blocking_planet() {
        let world = WorldBuilder::new()
            .ship(0, 2, 10.0, 50.0)
            .planet(0, 30.0, 50.0, 5.0, 2)
            .build(0);
        let ship = world.ship(2).expect("ship");
        let nav = Navigator {
            avoid_obstacles: false,
            max_corrections: 0,
            ..navigator()
        };
        let command = nav
            .navigate(ship, &EntityRef::Position(Position::new(60.0, 50.0)), &world)
            .expect("avoidance off always moves");
        assert_eq!(speed_and_bearing(command), (MAX_SPEED, 0));
    }

    #[test]
    fn blocked_path_without_corrections_fails() {
        let world = WorldBuilder::new()
            .ship(0, 2, 10.0, 50.0)
            .planet(0, 30.0, 50.0, 5.0, 2)
            .build(0);
        let ship = world.ship(2).expect("ship");
        let nav = Navigator {
            max_corrections: 0,
            ..navigator()
        };
        assert_eq!(
            nav.navigate(ship, &EntityRef::Position(Position::new(60.0, 50.0)), &world),
            None
        );
    }

    #[test]
    fn zero_corrections_still_moves_on_clear_path() {
        let world = WorldBuilder::new()
            .ship(0, 2, 10.0, 50.0)
            .planet(0, 30.0, 80.0, 5.0, 2)
            .build(0);
        let ship = world.ship(2).expect("ship");
        let nav = Navigator {
            max_corrections: 0,
            ..navigator()
        };
        let command = nav
            .navigate(ship, &EntityRef::Position(Position::new(60.0, 50.0)), &world)
            .expect("nothing on the path, so no correction is needed");
        assert_eq!(speed_and_bearing(command), (MAX_SPEED, 0));
    }

    #[test]
    fn last_correction_heading_is_still_tried() {
        // the first clear heading is 15 degrees off, which takes exactly three
        // corrections
        let world = WorldBuilder::new()
            .ship(0, 2, 10.0, 50.0)
            .planet(0, 40.0, 50.0, 5.0, 2)
            .build(0);
        let ship = world.ship(2).expect("ship");
        let destination = EntityRef::Position(Position::new(94.0, 50.0));
        let three = Navigator {
            max_corrections: 3,
            ..navigator()
        };
        let two = Navigator {
            max_corrections: 2,
            ..navigator()
        };

        let command = three
            .navigate(ship, &destination, &world)
            .expect("three corrections reach the clear heading");
        assert_eq!(speed_and_bearing(command), (MAX_SPEED, 15));
        assert_eq!(two.navigate(ship, &destination, &world), None);
    }

    #[test]
    fn deflection_direction_follows_id_parity() {
        let world = WorldBuilder::new()
            .ship(0, 2, 10.0, 50.0)
            .ship(0, 3, 10.0, 150.0)
            .planet(0, 30.0, 50.0, 5.0, 2)
            .planet(1, 30.0, 150.0, 5.0, 2)
            .build(0);
        let even = world.ship(2).expect("even ship");
        let odd = world.ship(3).expect("odd ship");

        let (_, even_bearing) = speed_and_bearing(
            navigator()
                .navigate(even, &EntityRef::Position(Position::new(60.0, 50.0)), &world)
                .expect("even ship finds a way around"),
        );
        let (_, odd_bearing) = speed_and_bearing(
            navigator()
                .navigate(odd, &EntityRef::Position(Position::new(60.0, 150.0)), &world)
                .expect("odd ship finds a way around"),
        );

        assert!(even_bearing > 0 && even_bearing < 90, "even={even_bearing}");
        assert!(odd_bearing > 270 && odd_bearing < 360, "odd={odd_bearing}");
        assert_eq!(even_bearing % 5, 0);
        assert_eq!(360 - odd_bearing, even_bearing);
    }

    #[test]
    fn exhausting_corrections_fails() {
        // a planet hugging the ship blocks every heading the budget can reach
        let world = WorldBuilder::new()
            .ship(0, 2, 10.0, 50.0)
            .planet(0, 25.0, 50.0, 12.0, 2)
            .build(0);
        let ship = world.ship(2).expect("ship");
        let nav = Navigator {
            max_corrections: 3,
            ..navigator()
        };
        assert_eq!(
            nav.navigate(ship, &EntityRef::Position(Position::new(60.0, 50.0)), &world),
            None
        );
    }
}
