/**********************************************************************************************
*
*   rebound - keyboard and mouse interaction
*
*   Input polling belongs to whatever window drives the simulation; this module only turns
*   already-polled events into changes to the configuration and the world.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::f64::consts::PI;

use log::debug;
use rand::Rng;

use crate::{
    body::{Body, BodyId},
    canvas::Color,
    config::SimulationConfig,
    error::Result,
    math::Vector2,
    world::World,
};

//----------------------------------------------------------------------------------
// Defines and Macros
//----------------------------------------------------------------------------------
/// Rotation applied per tick while a steering key is held
pub const STEER_ANGLE: f64 = PI/20.0;

/// Speed added per tick while a thrust key is held
pub const THRUST: f64 = 10.0;

const SPAWN_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
/// Discrete key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleGravity,
    ToggleVelocity,
    TogglePause,
    ToggleInspect,
    SpeedUp,
    SlowDown,
}

/// Keys currently held down, sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// What a finished mouse drag did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Click without a drag, or a drag too short to spawn anything
    Nothing,
    Launched { id: BodyId, velocity: Vector2 },
    Spawned { id: BodyId },
}

/// Press, move, release sequence of the mouse
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragTracker {
    first: Option<Vector2>,
    last: Option<Vector2>,
    selected: Option<BodyId>,
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
/// Applies a key press to the configuration and returns the message to show
pub fn apply_key(config: &mut SimulationConfig, key: KeyCommand) -> String {
    let on_off = |flag: bool| if flag { "ON" } else { "OFF" };

    match key {
        KeyCommand::ToggleGravity => {
            config.gravity_enabled = !config.gravity_enabled;
            format!("Gravity {}", on_off(config.gravity_enabled))
        }
        KeyCommand::ToggleVelocity => {
            config.show_velocity = !config.show_velocity;
            format!("Velocity drawing {}", on_off(config.show_velocity))
        }
        KeyCommand::TogglePause => {
            config.paused = !config.paused;
            format!("Pause {}", on_off(config.paused))
        }
        KeyCommand::ToggleInspect => {
            config.inspect_collisions = !config.inspect_collisions;
            format!("Stop on collisions {}", on_off(config.inspect_collisions))
        }
        KeyCommand::SpeedUp | KeyCommand::SlowDown => {
            if key == KeyCommand::SpeedUp { config.speed_up(); } else { config.slow_down(); }
            time_scale_message(config)
        }
    }
}

fn time_scale_message(config: &SimulationConfig) -> String {
    let scale = config.time_scale();
    if scale >= 1.0 {
        format!("Time scale x{scale}")
    } else {
        format!("Time scale /{}", 1.0/scale)
    }
}

impl HeldKeys {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Steers the ship; only one key acts per tick, turning before thrust
    pub fn apply(&self, ship: &mut Body) {
        if self.left {
            ship.rotate(-STEER_ANGLE);
        } else if self.right {
            ship.rotate(STEER_ANGLE);
        } else if self.up {
            ship.accelerate(THRUST);
        } else if self.down {
            ship.accelerate(-THRUST);
        }
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.first.is_some()
    }

    /// Starts a drag, selecting the first body under the pointer
    pub fn press<const N: usize>(&mut self, world: &World<N>, point: Vector2) {
        self.first = Some(point);
        self.last = None;
        self.selected = world.body_at(point);
    }

    pub fn drag(&mut self, point: Vector2) {
        if self.first.is_some() {
            self.last = Some(point);
        }
    }

    /// Ends the drag: throws the selected body along the drag vector, or spawns a ship
    /// from the press point aimed at the release point
    pub fn release<const N: usize, R: Rng>(
        &mut self,
        world: &mut World<N>,
        config: &SimulationConfig,
        point: Vector2,
        rng: &mut R,
    ) -> Result<DragOutcome> {
        self.drag(point);
        let (Some(first), Some(last)) = (self.first.take(), self.last.take()) else {
            return Ok(DragOutcome::Nothing);
        };
        let selected = self.selected.take();

        if first == last {
            return Ok(DragOutcome::Nothing);
        }

        match selected {
            Some(id) => {
                let velocity = (last - first)*config.drag_velocity_factor;
                world.set_velocity(id, velocity)?;
                debug!("launched body {} with velocity ({:.1}, {:.1})", id.0, velocity.x, velocity.y);
                Ok(DragOutcome::Launched { id, velocity })
            }
            None if first.distance(last) >= config.min_spawn_drag => {
                let color = SPAWN_COLORS[rng.gen_range(0..SPAWN_COLORS.len())];
                let ship = Body::ship(first.x, first.y, config.spawn_radius, last.x, last.y, color);
                let id = world.spawn(ship)?;
                Ok(DragOutcome::Spawned { id })
            }
            None => Ok(DragOutcome::Nothing),
        }
    }
}
