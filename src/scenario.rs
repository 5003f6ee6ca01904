/**********************************************************************************************
*
*   rebound - built-in scenarios
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::{fmt, str::FromStr};

use log::info;

use crate::{
    body::Body,
    canvas::Color,
    error::{Error, Result},
    math::Vector2,
    world::World,
};

/// Starting layouts the world can be reset to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scenario {
    /// Ships flying between two asteroids, plus the player's ship
    #[default]
    Ships,
    /// Two large ships on a collision course
    Collide,
    /// Rectangles dropped onto the floor, meant to run with gravity
    Blocks,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Ships, Scenario::Collide, Scenario::Blocks];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Ships => "ships",
            Scenario::Collide => "collide",
            Scenario::Blocks => "blocks",
        }
    }

    /// Whether the layout only makes sense with gravity switched on
    pub fn wants_gravity(self) -> bool {
        matches!(self, Scenario::Blocks)
    }

    pub fn bodies(self) -> Vec<Body> {
        match self {
            Scenario::Ships => vec![
                Body::ship(200.0, 100.0, 20.0, 100.0, 100.0, Color::RED),
                Body::ship(200.0, 400.0, 20.0, -100.0, -50.0, Color::RED),
                Body::ship(300.0, 350.0, 28.0, -40.0, 45.0, Color::BLUE),
                Body::ship(420.0, 550.0, 28.0, 420.0, 550.0, Color::BLUE),
                Body::ship(500.0, 120.0, 28.0, 530.0, 180.0, Color::BLUE),
                Body::ship(600.0, 280.0, 28.0, 690.0, 300.0, Color::BLUE),
                Body::ship(700.0, 500.0, 14.0, 630.0, 450.0, Color::GREEN),
                Body::asteroid(350.0, 300.0, 150.0, Color::MAGENTA),
                Body::asteroid(700.0, 130.0, 80.0, Color::MAGENTA),
                Body::controlled_ship(600.0, 500.0, 40.0, 600.0, 500.0, Color::MAGENTA),
            ],
            Scenario::Collide => vec![
                Body::ship(300.0, 100.0, 100.0, 1900.0, 420.0, Color::BLUE),
                Body::ship(565.0, 120.0, 100.0, -215.0, 560.0, Color::MAGENTA),
            ],
            Scenario::Blocks => vec![
                Body::rectangle(100.0, 50.0, 60.0, 40.0, Color::BLUE, true),
                Body::rectangle(300.0, 200.0, 40.0, 40.0, Color::RED, true)
                    .with_velocity(Vector2::new(120.0, 0.0)),
                Body::rectangle(600.0, 100.0, 80.0, 30.0, Color::GREEN, true)
                    .with_velocity(Vector2::new(-80.0, -200.0)),
                Body::rectangle(800.0, 400.0, 50.0, 50.0, Color::ORANGE, false),
                Body::circle(450.0, 300.0, 25.0, Color::MAGENTA, true)
                    .with_velocity(Vector2::new(60.0, 0.0)),
            ],
        }
    }

    /// Empties the world and fills it with this layout
    pub fn populate<const N: usize>(self, world: &mut World<N>) -> Result<()> {
        world.replace(self.bodies())?;
        info!("world reset to scenario {self} ({} bodies)", world.len());
        Ok(())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scenario::ALL.into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownScenario { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyKind;

    #[test]
    fn ships_scenario_has_one_controlled_ship() {
        let mut world = World::<16>::default();
        Scenario::Ships.populate(&mut world).unwrap();
        assert_eq!(world.len(), 10);
        assert_eq!(world.iter().filter(|body| body.is_static()).count(), 2);

        let player = world.controlled_ship().unwrap();
        assert!(matches!(player.kind(), BodyKind::ControlledShip { .. }));
        assert_eq!(player.name(), "9");
    }

    #[test]
    fn populate_replaces_what_was_there() {
        let mut world = World::<16>::default();
        Scenario::Ships.populate(&mut world).unwrap();
        Scenario::Collide.populate(&mut world).unwrap();
        assert_eq!(world.len(), 2);
        assert!(world.controlled_ship().is_none());
    }

    #[test]
    fn names_parse_back() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
        assert_eq!("BLOCKS".parse::<Scenario>().unwrap(), Scenario::Blocks);
        assert!(matches!("nope".parse::<Scenario>(), Err(Error::UnknownScenario { .. })));
    }
}
