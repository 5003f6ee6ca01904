/*!********************************************************************************************
*
*   rebound - 2D motion and collision engine for arcade games
*
*   DESCRIPTION:
*
*   rebound moves rectangles and circles under optional gravity in fixed time steps. A step
*   contains the following phases: advance every body along its closed-form trajectory,
*   bounce and correct against the world edges, resolve pairwise overlaps, and render.
*   When a fixed step overshoots the floor, the instant of contact is solved back from the
*   trajectory so bounces start from the velocity at impact.
*
*   CONFIGURATION:
*
*   feature "phys_thread" (enabled by default)
*       `Simulation::start` spawns a loop thread that ticks the world every
*       `ms_between_ticks` milliseconds. Without it, call `Simulation::run_tick` yourself.
*
*   feature "raylib"
*       Adds `RaylibCanvas`, which draws bodies through any raylib draw handle.
*
*   Logging goes through the `log` facade; install any logger to see it.
*
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
*   This software is provided "as-is", without any express or implied warranty. In no event
*   will the authors be held liable for any damages arising from the use of this software.
*
*   Permission is granted to anyone to use this software for any purpose, including commercial
*   applications, and to alter it and redistribute it freely, subject to the following restrictions:
*
*     1. The origin of this software must not be misrepresented; you must not claim that you
*     wrote the original software. If you use this software in a product, an acknowledgment
*     in the product documentation would be appreciated but is not required.
*
*     2. Altered source versions must be plainly marked as such, and must not be misrepresented
*     as being the original software.
*
*     3. This notice may not be removed or altered from any source distribution.
*
**********************************************************************************************/

pub mod body;
pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod physics;
pub mod scenario;
pub mod scene;
pub mod shape;
pub mod sim;
pub mod world;

pub use body::{Body, BodyId, BodyKind, Motion, MotionState};
pub use canvas::{Canvas, Color, NullCanvas};
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use math::{Bounds, PolarPoint, Vector2};
pub use scenario::Scenario;
pub use shape::{BoundaryHits, Geometry, Shape, ShapeKind};
pub use sim::{Command, CommandStatus, Mailbox, Simulation};
pub use world::{Edge, TickReport, World, WorldEvent};

#[cfg(feature = "raylib")]
pub use canvas::RaylibCanvas;

pub mod prelude {
    pub use crate::{
        body::{Body, BodyId, BodyKind},
        canvas::{Canvas, Color, NullCanvas},
        config::SimulationConfig,
        input::{apply_key, DragOutcome, DragTracker, HeldKeys, KeyCommand},
        math::{Bounds, Vector2},
        scenario::Scenario,
        shape::{BoundaryHits, Geometry},
        sim::{Command, CommandStatus, Simulation},
        world::{Edge, TickReport, World, WorldEvent},
    };
    #[cfg(feature = "raylib")]
    pub use crate::canvas::RaylibCanvas;
}

//----------------------------------------------------------------------------------
// Defines and Macros
//----------------------------------------------------------------------------------
pub const DEFAULT_MAX_OBJECTS: usize = 64;

pub const DEFAULT_WORLD_WIDTH:  f64 = 1000.0;
pub const DEFAULT_WORLD_HEIGHT: f64 = 800.0;

/// Units/s² pointing down the screen, with one unit being a centimetre
pub const DEFAULT_GRAVITY: f64 = 980.0;

pub const DEFAULT_MS_PER_STEP:           u32   = 16;
pub const DEFAULT_MS_BETWEEN_TICKS:      u64   = 16;
pub const DEFAULT_CORRECTION_ITERATIONS: usize = 3;
/// Speeding up doubles the step only while it is below this
pub const MAX_MS_PER_STEP_DOUBLING:      u32   = 132;

pub const DEFAULT_DRAG_VELOCITY_FACTOR:  f64 = 10.0;
pub const DEFAULT_MIN_SPAWN_DRAG:        f64 = 5.0;
pub const DEFAULT_SPAWN_RADIUS:          f64 = 20.0;

pub const DEFAULT_SHIP_ENERGY:           f64 = 100.0;
pub const DEFAULT_ENERGY_DAMAGE_DIVISOR: f64 = 20.0;

/// Seconds of travel drawn by a velocity line
pub const VELOCITY_DRAW_SCALE: f64 = 0.1;
