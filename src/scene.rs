/**********************************************************************************************
*
*   rebound - scene files
*
*   A scene is JSON Lines: one body per line, tagged by `type`, carrying what its
*   constructor needs plus its current velocity. Blank lines are skipped.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::io::{BufRead, Write};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    body::{Body, BodyKind},
    canvas::Color,
    error::{Error, Result},
    math::Vector2,
    shape::Shape,
    world::World,
};

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyRecord {
    Rectangle {
        #[serde(default)]
        name: String,
        /// Top-left corner
        position: Vector2,
        width: f64,
        height: f64,
        #[serde(default)]
        velocity: Vector2,
        color: Color,
        bounces: bool,
    },
    Circle {
        #[serde(default)]
        name: String,
        position: Vector2,
        radius: f64,
        #[serde(default)]
        velocity: Vector2,
        color: Color,
        bounces: bool,
    },
    Ship {
        #[serde(default)]
        name: String,
        position: Vector2,
        radius: f64,
        velocity: Vector2,
        color: Color,
    },
    ControlledShip {
        #[serde(default)]
        name: String,
        position: Vector2,
        radius: f64,
        velocity: Vector2,
        color: Color,
        orientation: f64,
        energy: f64,
    },
    Asteroid {
        #[serde(default)]
        name: String,
        position: Vector2,
        radius: f64,
        color: Color,
    },
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
impl From<&Body> for BodyRecord {
    fn from(body: &Body) -> Self {
        let name = body.name().to_owned();
        let position = body.position();
        let velocity = body.velocity();
        let color = body.color();

        match (*body.shape(), body.kind()) {
            (Shape::Rectangle(rect), _) => BodyRecord::Rectangle {
                name, position, width: rect.width, height: rect.height, velocity, color, bounces: body.is_bouncy(),
            },
            (Shape::Circle(circle), BodyKind::Plain) => BodyRecord::Circle {
                name, position, radius: circle.radius, velocity, color, bounces: body.is_bouncy(),
            },
            (Shape::Circle(circle), BodyKind::Ship) => BodyRecord::Ship {
                name, position, radius: circle.radius, velocity, color,
            },
            (Shape::Circle(circle), BodyKind::ControlledShip { orientation, energy }) => BodyRecord::ControlledShip {
                name, position, radius: circle.radius, velocity, color, orientation, energy,
            },
            (Shape::Circle(circle), BodyKind::Asteroid) => BodyRecord::Asteroid {
                name, position, radius: circle.radius, color,
            },
        }
    }
}

impl BodyRecord {
    /// Builds the body, rejecting non-finite numbers and non-positive sizes
    pub fn into_body(self) -> std::result::Result<Body, String> {
        match self {
            BodyRecord::Rectangle { name, position, width, height, velocity, color, bounces } => {
                check_motion(position, velocity)?;
                check_size("width", width)?;
                check_size("height", height)?;
                Ok(Body::rectangle(position.x, position.y, width, height, color, bounces)
                    .with_velocity(velocity)
                    .with_name(name))
            }
            BodyRecord::Circle { name, position, radius, velocity, color, bounces } => {
                check_motion(position, velocity)?;
                check_size("radius", radius)?;
                Ok(Body::circle(position.x, position.y, radius, color, bounces)
                    .with_velocity(velocity)
                    .with_name(name))
            }
            BodyRecord::Ship { name, position, radius, velocity, color } => {
                check_motion(position, velocity)?;
                check_size("radius", radius)?;
                Ok(Body::ship(position.x, position.y, radius, position.x, position.y, color)
                    .with_velocity(velocity)
                    .with_name(name))
            }
            BodyRecord::ControlledShip { name, position, radius, velocity, color, orientation, energy } => {
                check_motion(position, velocity)?;
                check_size("radius", radius)?;
                if !orientation.is_finite() || !energy.is_finite() {
                    return Err("orientation and energy must be finite".to_owned());
                }
                Ok(Body::controlled_ship(position.x, position.y, radius, position.x, position.y, color)
                    .with_velocity(velocity)
                    .with_kind(BodyKind::ControlledShip { orientation, energy })
                    .with_name(name))
            }
            BodyRecord::Asteroid { name, position, radius, color } => {
                check_motion(position, Vector2::zero())?;
                check_size("radius", radius)?;
                Ok(Body::asteroid(position.x, position.y, radius, color).with_name(name))
            }
        }
    }
}

fn check_motion(position: Vector2, velocity: Vector2) -> std::result::Result<(), String> {
    if !position.is_finite() {
        return Err("position must be finite".to_owned());
    }
    if !velocity.is_finite() {
        return Err("velocity must be finite".to_owned());
    }
    Ok(())
}

fn check_size(what: &str, value: f64) -> std::result::Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{what} must be positive, got {value}"))
    }
}

/// Writes every body of the world, one record per line
pub fn save<const N: usize, W: Write>(world: &World<N>, mut writer: W) -> Result<()> {
    for body in world.iter() {
        let record = BodyRecord::from(body);
        let line = serde_json::to_string(&record)
            .map_err(|e| Error::Io(e.into()))?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    debug!("saved {} bodies", world.len());
    Ok(())
}

/// Reads every record, failing on the first bad line
pub fn load<R: BufRead>(reader: R) -> Result<Vec<Body>> {
    let mut bodies = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: BodyRecord = serde_json::from_str(&line)
            .map_err(|e| Error::MalformedRecord { line: line_number, reason: e.to_string() })?;
        let body = record.into_body()
            .map_err(|reason| Error::InvalidRecord { line: line_number, reason })?;
        bodies.push(body);
    }
    Ok(bodies)
}

impl<const N: usize> World<N> {
    /// Replaces the world's bodies with a scene; on any error the world is left as it was
    pub fn load_from<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let bodies = load(reader).inspect_err(|e| warn!("scene not loaded: {e}"))?;
        self.replace(bodies)?;
        debug!("loaded {} bodies", self.len());
        Ok(())
    }

    pub fn save_to<W: Write>(&self, writer: W) -> Result<()> {
        save(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::Bounds, scenario::Scenario};

    #[test]
    fn saved_scene_loads_back_the_same_bodies() {
        let mut world = World::<16>::default();
        Scenario::Ships.populate(&mut world).unwrap();
        world.spawn(Body::rectangle(5.0, 6.0, 7.0, 8.0, Color::ORANGE, false).with_velocity(Vector2::new(1.5, -2.0))).unwrap();
        world.controlled_ship_mut().unwrap().rotate(0.5);

        let mut buffer = Vec::new();
        world.save_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap().lines().count(), world.len());

        let mut copy = World::<16>::new(Bounds::new(10.0, 10.0));
        copy.load_from(buffer.as_slice()).unwrap();
        assert_eq!(copy.len(), world.len());
        for (a, b) in world.iter().zip(copy.iter()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.shape(), b.shape());
            assert_eq!(a.position(), b.position());
            assert_eq!(a.velocity(), b.velocity());
            assert_eq!(a.color(), b.color());
        }
        assert_eq!(copy.controlled_ship().unwrap().orientation(), Some(0.5));
    }

    #[test]
    fn bad_lines_are_reported_and_leave_the_world_alone() {
        let mut world = World::<16>::default();
        Scenario::Collide.populate(&mut world).unwrap();

        let scene = concat!(
            r#"{"type":"circle","position":{"x":1.0,"y":2.0},"radius":3.0,"color":{"r":0,"g":0,"b":0},"bounces":true}"#, "\n",
            "\n",
            r#"{"type":"hexagon","position":{"x":1.0,"y":2.0}}"#, "\n",
        );
        match world.load_from(scene.as_bytes()) {
            Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a malformed record, got {other:?}"),
        }
        assert_eq!(world.len(), 2);

        let scene = r#"{"type":"rectangle","position":{"x":1.0,"y":2.0},"width":-3.0,"height":4.0,"color":{"r":0,"g":0,"b":0},"bounces":true}"#;
        match world.load_from(scene.as_bytes()) {
            Err(Error::InvalidRecord { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("width"));
            }
            other => panic!("expected an invalid record, got {other:?}"),
        }
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn velocity_defaults_to_rest() {
        let scene = r#"{"type":"circle","name":"ball","position":{"x":1.0,"y":2.0},"radius":3.0,"color":{"r":1,"g":2,"b":3},"bounces":false}"#;
        let bodies = load(scene.as_bytes()).unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].name(), "ball");
        assert_eq!(bodies[0].velocity(), Vector2::zero());
        assert!(!bodies[0].is_bouncy());
    }
}
