/**********************************************************************************************
*
*   rebound - simulation configuration
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use crate::{
    DEFAULT_CORRECTION_ITERATIONS, DEFAULT_DRAG_VELOCITY_FACTOR, DEFAULT_ENERGY_DAMAGE_DIVISOR,
    DEFAULT_GRAVITY, DEFAULT_MIN_SPAWN_DRAG, DEFAULT_MS_BETWEEN_TICKS, DEFAULT_MS_PER_STEP,
    DEFAULT_SPAWN_RADIUS, MAX_MS_PER_STEP_DOUBLING,
};

/// Per-world simulation settings, passed explicitly into every tick
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Apply gravity to the vertical axis of every moving body
    pub gravity_enabled: bool,
    /// Gravity magnitude in units/s² (positive is downward)
    pub gravity: f64,
    /// Skip motion and collision correction while set
    pub paused: bool,
    /// Block after every pairwise collision until acknowledged
    pub inspect_collisions: bool,
    /// Draw velocity vectors along with the bodies
    pub show_velocity: bool,
    /// Simulated milliseconds advanced by each tick
    pub ms_per_step: u32,
    /// Real milliseconds the loop thread sleeps between ticks
    pub ms_between_ticks: u64,
    /// Maximum boundary + pairwise correction passes per tick
    pub correction_iterations: usize,
    /// Multiplier from a mouse drag vector to an injected velocity
    pub drag_velocity_factor: f64,
    /// Drags shorter than this never spawn a body
    pub min_spawn_drag: f64,
    /// Radius of ships spawned by dragging over empty space
    pub spawn_radius: f64,
    /// Energy lost by the controlled ship is the other body's area over this
    pub energy_damage_divisor: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_enabled: false,
            gravity: DEFAULT_GRAVITY,
            paused: false,
            inspect_collisions: false,
            show_velocity: false,
            ms_per_step: DEFAULT_MS_PER_STEP,
            ms_between_ticks: DEFAULT_MS_BETWEEN_TICKS,
            correction_iterations: DEFAULT_CORRECTION_ITERATIONS,
            drag_velocity_factor: DEFAULT_DRAG_VELOCITY_FACTOR,
            min_spawn_drag: DEFAULT_MIN_SPAWN_DRAG,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            energy_damage_divisor: DEFAULT_ENERGY_DAMAGE_DIVISOR,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.gravity_enabled = enabled;
        self
    }

    pub fn with_gravity_force(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn with_ms_per_step(mut self, ms: u32) -> Self {
        self.ms_per_step = ms.max(1);
        self
    }

    pub fn with_correction_iterations(mut self, iterations: usize) -> Self {
        self.correction_iterations = iterations;
        self
    }

    /// Gravity acting on the vertical axis, zero when disabled
    #[inline]
    pub fn effective_gravity(&self) -> f64 {
        if self.gravity_enabled { self.gravity } else { 0.0 }
    }

    /// Doubles the simulated time per tick; returns false once at the bound
    pub fn speed_up(&mut self) -> bool {
        if self.ms_per_step < MAX_MS_PER_STEP_DOUBLING {
            self.ms_per_step *= 2;
            true
        } else {
            false
        }
    }

    /// Halves the simulated time per tick; returns false at one millisecond
    pub fn slow_down(&mut self) -> bool {
        if self.ms_per_step > 1 {
            self.ms_per_step /= 2;
            true
        } else {
            false
        }
    }

    /// Simulated time relative to real time, as shown to the user
    pub fn time_scale(&self) -> f64 {
        self.ms_per_step as f64/self.ms_between_ticks.max(1) as f64
    }
}
