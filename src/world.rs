/**********************************************************************************************
*
*   rebound - world and fixed-step loop
*
*   A tick advances every body, then alternates boundary and pairwise correction passes
*   until a pass changes nothing or the iteration cap is reached, then settles the
*   controlled ship's energy and renders.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::{
    body::{Body, BodyId, BodyKind},
    canvas::Canvas,
    config::SimulationConfig,
    error::{Error, Result},
    math::{Bounds, Vector2},
    physics::{pair_restitution, resolve_collision},
    shape::{BoundaryHits, Geometry},
    DEFAULT_MAX_OBJECTS,
};

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Something that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    BoundaryBounce { id: BodyId, edge: Edge },
    Collision { a: BodyId, b: BodyId },
    EnergyChanged { id: BodyId, energy: f64 },
    Removed { id: BodyId },
    /// The controlled ship ran out of energy
    GameOver,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<WorldEvent>,
    /// Correction passes run this tick
    pub passes: usize,
}

pub struct World<const MAX_OBJECTS: usize = DEFAULT_MAX_OBJECTS> {
    /// Live bodies in spawn order
    bodies: ArrayVec<Body, MAX_OBJECTS>,
    bounds: Bounds,
    /// Next id handed out; ids are never reused
    next_id: u32,
    /// Body steered by the player
    controlled: Option<BodyId>,
    game_over: bool,
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
impl TickReport {
    pub fn collisions(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, WorldEvent::Collision { .. })).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.events.contains(&WorldEvent::GameOver)
    }
}

impl<const MAX_OBJECTS: usize> Default for World<MAX_OBJECTS> {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl<const MAX_OBJECTS: usize> World<MAX_OBJECTS> {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bodies: ArrayVec::new(),
            bounds,
            next_id: 0,
            controlled: None,
            game_over: false,
        }
    }

    #[inline] pub fn bounds(&self) -> Bounds { self.bounds }
    #[inline] pub fn set_bounds(&mut self, bounds: Bounds) { self.bounds = bounds; }
    #[inline] pub fn len(&self) -> usize { self.bodies.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.bodies.is_empty() }
    #[inline] pub fn is_game_over(&self) -> bool { self.game_over }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|body| body.id() == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|body| body.name() == name)
    }

    pub fn controlled_ship(&self) -> Option<&Body> {
        self.controlled.and_then(|id| self.get(id))
    }

    pub fn controlled_ship_mut(&mut self) -> Option<&mut Body> {
        let id = self.controlled?;
        self.get_mut(id)
    }

    /// Adds a body, naming it after the smallest free index when it has no name
    pub fn spawn(&mut self, mut body: Body) -> Result<BodyId> {
        if self.bodies.is_full() {
            return Err(Error::CapacityExceeded { limit: MAX_OBJECTS });
        }

        if body.name().is_empty() {
            let name = self.find_available_name();
            body.set_name(name);
        } else if self.by_name(body.name()).is_some() {
            return Err(Error::DuplicateName { name: body.name().to_owned() });
        }

        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.set_id(id);

        if let BodyKind::ControlledShip { .. } = body.kind() {
            self.controlled = Some(id);
            self.game_over = false;
        }

        debug!("spawned {body}");
        self.bodies.push(body);
        Ok(id)
    }

    pub fn remove(&mut self, id: BodyId) -> Result<Body> {
        let index = self.bodies.iter()
            .position(|body| body.id() == id)
            .ok_or(Error::UnknownBody { id })?;

        if self.controlled == Some(id) {
            self.controlled = None;
        }

        let body = self.bodies.remove(index);
        debug!("removed {body}");
        Ok(body)
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.controlled = None;
        self.game_over = false;
        debug!("world cleared");
    }

    /// Swaps in a whole new set of bodies, or leaves the world untouched on error
    pub fn replace(&mut self, bodies: Vec<Body>) -> Result<()> {
        if bodies.len() > MAX_OBJECTS {
            return Err(Error::CapacityExceeded { limit: MAX_OBJECTS });
        }
        for (i, body) in bodies.iter().enumerate() {
            if !body.name().is_empty() && bodies[..i].iter().any(|other| other.name() == body.name()) {
                return Err(Error::DuplicateName { name: body.name().to_owned() });
            }
        }

        self.clear();
        // Named bodies first so generated names cannot take a name that is still to come
        let (named, unnamed): (Vec<_>, Vec<_>) = bodies.into_iter().partition(|body| !body.name().is_empty());
        for body in named.into_iter().chain(unnamed) {
            self.spawn(body)?;
        }
        Ok(())
    }

    /// First body, in spawn order, containing `point`
    pub fn body_at(&self, point: Vector2) -> Option<BodyId> {
        self.bodies.iter()
            .find(|body| body.contains_point(point))
            .map(Body::id)
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vector2) -> Result<()> {
        let body = self.get_mut(id).ok_or(Error::UnknownBody { id })?;
        body.set_velocity(velocity);
        Ok(())
    }

    /// Runs one fixed step; see [`World::tick_inspected`]
    pub fn tick(&mut self, config: &SimulationConfig, canvas: Option<&mut dyn Canvas>) -> TickReport {
        self.tick_inspected(config, canvas, |_, _| {})
    }

    /// Runs one fixed step, calling `inspect` after every resolved pairwise collision
    /// while `config.inspect_collisions` is set
    ///
    /// With a canvas, the playable area follows the canvas bounds from this tick on.
    pub fn tick_inspected(
        &mut self,
        config: &SimulationConfig,
        canvas: Option<&mut dyn Canvas>,
        mut inspect: impl FnMut(&Body, &Body),
    ) -> TickReport {
        let mut report = TickReport::default();

        if let Some(surface) = canvas.as_deref() {
            let bounds = surface.bounds();
            if bounds != self.bounds {
                debug!("playable area resized to {}x{}", bounds.width, bounds.height);
                self.bounds = bounds;
            }
        }

        if !config.paused {
            let gravity = config.effective_gravity();
            let elapsed_ms = config.ms_per_step as f64;

            for body in &mut self.bodies {
                body.advance(elapsed_ms, gravity, None);
            }

            for _ in 0..config.correction_iterations {
                report.passes += 1;
                let bounced = self.boundary_pass(gravity, &mut report.events);
                let collided = self.pairwise_pass(config, &mut report.events, &mut inspect);
                if !bounced && !collided {
                    break;
                }
            }

            self.settle_energy(config, &mut report.events);
        }

        if let Some(canvas) = canvas {
            self.draw(canvas, config.show_velocity);
        }

        report
    }

    /// Clears the canvas and draws every body
    pub fn draw(&self, canvas: &mut dyn Canvas, show_velocity: bool) {
        canvas.clear();
        for body in &self.bodies {
            body.draw(canvas, show_velocity);
        }
    }

    /// Bounces and corrects every body against the edges it is moving into or crossing
    fn boundary_pass(&mut self, gravity: f64, events: &mut Vec<WorldEvent>) -> bool {
        let bounds = self.bounds;
        let mut changed = false;

        for body in &mut self.bodies {
            let hits = body.collides_with_boundary(bounds);
            if hits.is_empty() {
                continue;
            }

            let restitution = if body.is_bouncy() { 1.0 } else { 0.0 };
            let velocity = body.velocity();
            let extents = body.shape().extents();
            let low = body.position() + extents.min;
            let high = body.position() + extents.max;

            // Left and right
            let mut body_changed = false;
            if hits.contains(BoundaryHits::LEFT) && (velocity.x < 0.0 || low.x < 0.0) {
                body.bounce_left(restitution);
                body.correct_boundary_collision_horizontal(bounds, None);
                events.push(WorldEvent::BoundaryBounce { id: body.id(), edge: Edge::Left });
                body_changed = true;
            } else if hits.contains(BoundaryHits::RIGHT) && (velocity.x > 0.0 || high.x > bounds.width) {
                body.bounce_right(restitution);
                body.correct_boundary_collision_horizontal(bounds, None);
                events.push(WorldEvent::BoundaryBounce { id: body.id(), edge: Edge::Right });
                body_changed = true;
            }

            // Top and bottom; the correction first recovers the velocity at contact
            if hits.contains(BoundaryHits::BOTTOM) && (velocity.y > 0.0 || high.y > bounds.height) {
                body.correct_boundary_collision_vertical(bounds, gravity, None);
                body.bounce_down(restitution);
                events.push(WorldEvent::BoundaryBounce { id: body.id(), edge: Edge::Bottom });
                body_changed = true;
            } else if hits.contains(BoundaryHits::TOP) && (velocity.y < 0.0 || low.y < 0.0) {
                body.correct_boundary_collision_vertical(bounds, gravity, None);
                body.bounce_up(restitution);
                events.push(WorldEvent::BoundaryBounce { id: body.id(), edge: Edge::Top });
                body_changed = true;
            }

            if body_changed {
                body.begin_segment();
                changed = true;
            }
        }

        changed
    }

    /// Tests every unordered pair once and resolves the ones that overlap
    fn pairwise_pass(
        &mut self,
        config: &SimulationConfig,
        events: &mut Vec<WorldEvent>,
        inspect: &mut impl FnMut(&Body, &Body),
    ) -> bool {
        let mut changed = false;

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (head, tail) = self.bodies.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if a.is_static() && b.is_static() {
                    continue;
                }

                let Some(push) = a.collides_with(b) else { continue };
                let restitution = pair_restitution(a, b);
                if resolve_collision(a, b, push, restitution) {
                    // Later passes must not rewind either body along this step's trajectory
                    a.begin_segment();
                    b.begin_segment();
                    debug!("collision between {} and {}", a.name(), b.name());
                    events.push(WorldEvent::Collision { a: a.id(), b: b.id() });
                    changed = true;
                    if config.inspect_collisions {
                        inspect(&*a, &*b);
                    }
                }
            }
        }

        changed
    }

    /// Charges the controlled ship for this tick's collisions and destroys it when drained
    fn settle_energy(&mut self, config: &SimulationConfig, events: &mut Vec<WorldEvent>) {
        let Some(ship_id) = self.controlled else { return };

        let damage: Vec<f64> = events.iter()
            .filter_map(|event| match *event {
                WorldEvent::Collision { a, b } if a == ship_id => Some(b),
                WorldEvent::Collision { a, b } if b == ship_id => Some(a),
                _ => None,
            })
            .filter_map(|other| self.get(other))
            .map(|other| other.area()/config.energy_damage_divisor)
            .collect();

        let Some(ship) = self.get_mut(ship_id) else { return };
        let mut energy = None;
        for amount in damage {
            energy = ship.change_energy(-amount);
            if let Some(energy) = energy {
                events.push(WorldEvent::EnergyChanged { id: ship_id, energy });
            }
        }

        if energy.is_some_and(|energy| energy < 0.0) {
            if self.remove(ship_id).is_ok() {
                events.push(WorldEvent::Removed { id: ship_id });
            }
            self.game_over = true;
            events.push(WorldEvent::GameOver);
            info!("controlled ship destroyed, game over");
        }
    }

    /// Smallest index not already used as a name
    fn find_available_name(&self) -> String {
        let mut index = 0;
        loop {
            let candidate = index.to_string();
            if self.by_name(&candidate).is_none() {
                return candidate;
            }
            index += 1;
        }
    }
}
