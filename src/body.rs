/**********************************************************************************************
*
*   rebound - movable bodies
*
*   A body is a shape plus a motion state. Motion between two corrections follows one
*   closed-form trajectory (a motion segment); the state at the start of the last step is
*   kept so the step can be undone once, or re-evaluated at the exact instant of impact.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::fmt;

use crate::{
    canvas::{Canvas, Color},
    math::{Bounds, Vector2},
    physics::{position_at_time, time_to_reach_position, velocity_at_time},
    shape::{BoundaryHits, Circle, Geometry, Rectangle, Shape},
    DEFAULT_SHIP_ENERGY, VELOCITY_DRAW_SCALE,
};

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
/// Unique identifier of a body within its world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    pub position: Vector2,
    pub velocity: Vector2,
}

/// Current state plus the state at the start of the last step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    current: MotionState,
    prior: Option<MotionState>,
    /// Start of the trajectory the current state still lies on; moved up by every correction
    segment_start: Option<MotionState>,
}

/// Role of a body in the world, on top of its shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Plain rectangle or circle
    Plain,
    /// Circle launched towards a target point
    Ship,
    /// Player-steered circle that loses energy on every collision
    ControlledShip {
        /// Heading in radians
        orientation: f64,
        /// Remaining energy, the ship is destroyed below zero
        energy: f64,
    },
    /// Circle that never moves
    Asteroid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    name: String,
    color: Color,
    bounces: bool,
    kind: BodyKind,
    shape: Shape,
    motion: Motion,
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
impl Motion {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self {
            current: MotionState { position, velocity },
            prior: None,
            segment_start: None,
        }
    }

    #[inline]
    pub fn current(&self) -> &MotionState {
        &self.current
    }

    /// State at the start of the last step, if that step has not been undone
    #[inline]
    pub fn prior(&self) -> Option<&MotionState> {
        self.prior.as_ref()
    }

    /// State the current free-flight segment started from
    #[inline]
    pub fn segment_start(&self) -> Option<&MotionState> {
        self.segment_start.as_ref()
    }

    /// Starts a new segment at the current state, after a correction has moved the body
    /// off the trajectory of the last step
    pub fn begin_segment(&mut self) {
        self.segment_start = Some(self.current);
    }

    /// Integrates `seconds` of motion; gravity only acts on the vertical axis
    pub fn advance(&mut self, seconds: f64, gravity: f64) {
        let start = self.current;
        self.current = MotionState {
            position: Vector2::new(
                position_at_time(start.position.x, start.velocity.x, 0.0, seconds),
                position_at_time(start.position.y, start.velocity.y, gravity, seconds),
            ),
            velocity: Vector2::new(
                start.velocity.x,
                velocity_at_time(start.velocity.y, gravity, seconds),
            ),
        };
        self.prior = Some(start);
        self.segment_start = Some(start);
    }

    /// Restores the state from before the last step; works once per step
    pub fn undo(&mut self) -> bool {
        match self.prior.take() {
            Some(prior) => {
                self.current = prior;
                self.segment_start = None;
                true
            }
            None => false,
        }
    }

    fn current_mut(&mut self) -> &mut MotionState {
        &mut self.current
    }
}

impl Body {
    fn new(shape: Shape, position: Vector2, velocity: Vector2, color: Color, bounces: bool, kind: BodyKind) -> Self {
        Self {
            id: BodyId::default(),
            name: String::new(),
            color,
            bounces,
            kind,
            shape,
            motion: Motion::new(position, velocity),
        }
    }

    /// Rectangle with its top-left corner at `(x, y)`, initially at rest
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64, color: Color, bounces: bool) -> Self {
        Self::new(
            Shape::Rectangle(Rectangle { width, height }),
            Vector2::new(x, y),
            Vector2::zero(),
            color,
            bounces,
            BodyKind::Plain,
        )
    }

    /// Circle centred at `(x, y)`, initially at rest
    pub fn circle(x: f64, y: f64, radius: f64, color: Color, bounces: bool) -> Self {
        Self::new(
            Shape::Circle(Circle { radius }),
            Vector2::new(x, y),
            Vector2::zero(),
            color,
            bounces,
            BodyKind::Plain,
        )
    }

    /// Ship centred at `(x, y)` whose velocity points at `(target_x, target_y)`,
    /// covering that distance in one second
    pub fn ship(x: f64, y: f64, radius: f64, target_x: f64, target_y: f64, color: Color) -> Self {
        Self::new(
            Shape::Circle(Circle { radius }),
            Vector2::new(x, y),
            Vector2::new(target_x - x, target_y - y),
            color,
            true,
            BodyKind::Ship,
        )
    }

    /// Ship steered by the player, heading along its initial velocity
    pub fn controlled_ship(x: f64, y: f64, radius: f64, target_x: f64, target_y: f64, color: Color) -> Self {
        let velocity = Vector2::new(target_x - x, target_y - y);
        let orientation = if velocity.is_zero() { 0.0 } else { velocity.y.atan2(velocity.x) };
        Self::new(
            Shape::Circle(Circle { radius }),
            Vector2::new(x, y),
            velocity,
            color,
            true,
            BodyKind::ControlledShip { orientation, energy: DEFAULT_SHIP_ENERGY },
        )
    }

    /// Static circle: never moves and is not displaced by collisions
    pub fn asteroid(x: f64, y: f64, radius: f64, color: Color) -> Self {
        Self::new(
            Shape::Circle(Circle { radius }),
            Vector2::new(x, y),
            Vector2::zero(),
            color,
            true,
            BodyKind::Asteroid,
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        if !self.is_static() {
            self.motion.current_mut().velocity = velocity;
        }
        self
    }

    pub(crate) fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn set_id(&mut self, id: BodyId) {
        self.id = id;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    #[inline] pub fn id(&self) -> BodyId { self.id }
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn color(&self) -> Color { self.color }
    #[inline] pub fn kind(&self) -> BodyKind { self.kind }
    #[inline] pub fn shape(&self) -> &Shape { &self.shape }
    #[inline] pub fn motion(&self) -> &Motion { &self.motion }
    #[inline] pub fn position(&self) -> Vector2 { self.motion.current().position }
    #[inline] pub fn velocity(&self) -> Vector2 { self.motion.current().velocity }

    /// Whether collisions bounce this body back (otherwise they absorb its motion)
    #[inline]
    pub fn is_bouncy(&self) -> bool {
        self.bounces
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.kind, BodyKind::Asteroid)
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    pub fn volume(&self) -> f64 {
        self.shape.volume()
    }

    /// Inverse of the area, which stands in for mass; zero for static bodies
    pub fn inverse_mass(&self) -> f64 {
        let area = self.area();
        if self.is_static() || area <= 0.0 { 0.0 } else { 1.0/area }
    }

    pub fn centre(&self) -> Vector2 {
        self.shape.centre(self.position())
    }

    pub fn set_position(&mut self, position: Vector2) {
        if !self.is_static() {
            self.motion.current_mut().position = position;
        }
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        if !self.is_static() {
            self.motion.current_mut().velocity = velocity;
        }
    }

    pub fn translate(&mut self, offset: Vector2) {
        if !self.is_static() {
            self.motion.current_mut().position += offset;
        }
    }

    /// Moves the body along its trajectory for `elapsed_ms` milliseconds
    ///
    /// When a canvas is given, the old image is erased and the new one drawn.
    pub fn advance(&mut self, elapsed_ms: f64, gravity: f64, canvas: Option<&mut dyn Canvas>) {
        if self.is_static() {
            return;
        }
        match canvas {
            Some(canvas) => {
                self.erase(canvas);
                self.motion.advance(elapsed_ms/1000.0, gravity);
                self.draw(canvas, false);
            }
            None => self.motion.advance(elapsed_ms/1000.0, gravity),
        }
    }

    /// Goes back to the state before the last [`advance`](Self::advance), once
    pub fn undo_last_advance(&mut self) -> bool {
        self.motion.undo()
    }

    /// Marks the current state as the start of a new trajectory segment
    pub fn begin_segment(&mut self) {
        self.motion.begin_segment();
    }

    /// World edges currently touched or crossed; static bodies report none
    pub fn collides_with_boundary(&self, bounds: Bounds) -> BoundaryHits {
        if self.is_static() {
            BoundaryHits::NONE
        } else {
            self.shape.boundary_hits(self.position(), bounds)
        }
    }

    /// Collision vector against another body: [`None`] when apart, otherwise the
    /// displacement that separates `other`, `(0,0)` when one contains the other
    pub fn collides_with(&self, other: &Body) -> Option<Vector2> {
        self.shape.collides_with(self.position(), &other.shape, other.position())
    }

    pub fn contains_point(&self, point: Vector2) -> bool {
        self.shape.contains_point(self.position(), point)
    }

    /// Puts the body back flush against a side wall it has crossed; velocity is untouched
    pub fn correct_boundary_collision_horizontal(&mut self, bounds: Bounds, canvas: Option<&mut dyn Canvas>) -> bool {
        if self.is_static() {
            return false;
        }
        let extents = self.shape.extents();
        let position = self.position();

        let corrected_x = if position.x + extents.min.x < 0.0 {
            -extents.min.x
        } else if position.x + extents.max.x > bounds.width {
            bounds.width - extents.max.x
        } else {
            return false;
        };

        self.redraw_around(canvas, |body| body.motion.current_mut().position.x = corrected_x);
        true
    }

    /// Puts the body back flush against the floor or ceiling it has crossed
    ///
    /// If the current segment started clear of that edge and was moving towards it the
    /// whole way (starting from rest counts), the instant of contact is solved from the
    /// segment's trajectory, and the horizontal position and vertical velocity are
    /// replaced by their values at that instant. Without a valid instant only the
    /// position is clamped.
    pub fn correct_boundary_collision_vertical(&mut self, bounds: Bounds, gravity: f64, canvas: Option<&mut dyn Canvas>) -> bool {
        if self.is_static() {
            return false;
        }
        let extents = self.shape.extents();
        let current = *self.motion.current();

        // direction is +1 into the floor, -1 into the ceiling
        let (contact_y, direction) = if current.position.y + extents.max.y > bounds.height {
            (bounds.height - extents.max.y, 1.0)
        } else if current.position.y + extents.min.y < 0.0 {
            (-extents.min.y, -1.0)
        } else {
            return false;
        };

        let impact = self.motion.segment_start()
            .filter(|start| (contact_y - start.position.y)*direction >= 0.0)
            .filter(|start| start.velocity.y*direction >= 0.0 && current.velocity.y*direction > 0.0)
            .and_then(|start| {
                time_to_reach_position(start.velocity.y, start.position.y, gravity, contact_y)
                    .map(|t| (
                        position_at_time(start.position.x, start.velocity.x, 0.0, t),
                        velocity_at_time(start.velocity.y, gravity, t),
                    ))
            });

        self.redraw_around(canvas, |body| {
            let state = body.motion.current_mut();
            state.position.y = contact_y;
            if let Some((x, vy)) = impact {
                state.position.x = x;
                state.velocity.y = vy;
            }
        });
        true
    }

    /// Bounce off the left wall: leaves moving right, scaled by `restitution`
    pub fn bounce_left(&mut self, restitution: f64) {
        if !self.is_static() {
            let velocity = &mut self.motion.current_mut().velocity;
            velocity.x = velocity.x.abs()*restitution;
        }
    }

    /// Bounce off the right wall: leaves moving left
    pub fn bounce_right(&mut self, restitution: f64) {
        if !self.is_static() {
            let velocity = &mut self.motion.current_mut().velocity;
            velocity.x = -velocity.x.abs()*restitution;
        }
    }

    /// Bounce off the ceiling: leaves moving down
    pub fn bounce_up(&mut self, restitution: f64) {
        if !self.is_static() {
            let velocity = &mut self.motion.current_mut().velocity;
            velocity.y = velocity.y.abs()*restitution;
        }
    }

    /// Bounce off the floor: leaves moving up
    pub fn bounce_down(&mut self, restitution: f64) {
        if !self.is_static() {
            let velocity = &mut self.motion.current_mut().velocity;
            velocity.y = -velocity.y.abs()*restitution;
        }
    }

    /// Turns a controlled ship by `radians`; other bodies ignore it
    pub fn rotate(&mut self, radians: f64) {
        if let BodyKind::ControlledShip { orientation, .. } = &mut self.kind {
            *orientation += radians;
        }
    }

    /// Pushes a controlled ship along its heading
    pub fn accelerate(&mut self, amount: f64) {
        if let BodyKind::ControlledShip { orientation, .. } = self.kind {
            let (sin, cos) = orientation.sin_cos();
            self.motion.current_mut().velocity += Vector2::new(cos, sin)*amount;
        }
    }

    pub fn energy(&self) -> Option<f64> {
        match self.kind {
            BodyKind::ControlledShip { energy, .. } => Some(energy),
            _ => None,
        }
    }

    pub fn orientation(&self) -> Option<f64> {
        match self.kind {
            BodyKind::ControlledShip { orientation, .. } => Some(orientation),
            _ => None,
        }
    }

    /// Adds `delta` to a controlled ship's energy, returning the new value
    pub fn change_energy(&mut self, delta: f64) -> Option<f64> {
        match &mut self.kind {
            BodyKind::ControlledShip { energy, .. } => {
                *energy += delta;
                Some(*energy)
            }
            _ => None,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, show_velocity: bool) {
        let position = self.position();
        self.shape.draw(canvas, position, self.color);

        let centre = self.centre();
        if let (BodyKind::ControlledShip { orientation, .. }, Shape::Circle(circle)) = (self.kind, self.shape) {
            let (sin, cos) = orientation.sin_cos();
            canvas.draw_line(centre.x, centre.y, centre.x + cos*circle.radius, centre.y + sin*circle.radius, self.color);
        }
        if show_velocity && !self.velocity().is_zero() {
            let tip = centre + self.velocity()*VELOCITY_DRAW_SCALE;
            canvas.draw_line(centre.x, centre.y, tip.x, tip.y, Color::ORANGE);
        }
    }

    pub fn erase(&self, canvas: &mut dyn Canvas) {
        self.shape.erase(canvas, self.position());
    }

    fn redraw_around(&mut self, canvas: Option<&mut dyn Canvas>, change: impl FnOnce(&mut Self)) {
        match canvas {
            Some(canvas) => {
                self.erase(canvas);
                change(self);
                self.draw(canvas, false);
            }
            None => change(self),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        let velocity = self.velocity();
        let label = match (self.kind, self.shape) {
            (BodyKind::Plain, Shape::Rectangle(_)) => "Rectangle",
            (BodyKind::Plain, Shape::Circle(_)) => "Circle",
            (BodyKind::Ship, _) => "Ship",
            (BodyKind::ControlledShip { .. }, _) => "ControlledShip",
            (BodyKind::Asteroid, _) => "Asteroid",
        };
        write!(
            f,
            "{label} {} ({:7.2},{:7.2}) vel=({:6.3},{:6.3})",
            self.name, position.x, position.y, velocity.x, velocity.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCall, RecordingCanvas};

    const EPSILON: f64 = 1e-9;
    const GRAVITY: f64 = 980.0;

    #[test]
    fn undo_restores_exactly_once() {
        let mut block = Body::rectangle(10.0, 20.0, 5.0, 5.0, Color::BLUE, true)
            .with_velocity(Vector2::new(3.0, -4.0));
        let start = *block.motion().current();

        block.advance(500.0, GRAVITY, None);
        assert_ne!(block.position(), start.position);
        assert_eq!(block.motion().prior(), Some(&start));

        assert!(block.undo_last_advance());
        assert_eq!(*block.motion().current(), start);
        assert!(!block.undo_last_advance());
        assert_eq!(*block.motion().current(), start);
    }

    #[test]
    fn advance_follows_the_closed_form() {
        let mut ball = Body::circle(0.0, 0.0, 1.0, Color::RED, true)
            .with_velocity(Vector2::new(2.0, 1.0));
        ball.advance(2000.0, 10.0, None);
        assert!((ball.position().x - 4.0).abs() < EPSILON);
        assert!((ball.position().y - 22.0).abs() < EPSILON);
        assert!((ball.velocity().y - 21.0).abs() < EPSILON);
        assert!((ball.velocity().x - 2.0).abs() < EPSILON);
    }

    #[test]
    fn left_wall_scenario() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut block = Body::rectangle(0.0, 0.0, 10.0, 10.0, Color::BLUE, true)
            .with_velocity(Vector2::new(-5.0, 0.0));

        block.advance(1000.0, 0.0, None);
        assert!((block.position().x + 5.0).abs() < EPSILON);

        let hits = block.collides_with_boundary(bounds);
        assert!(hits.contains(BoundaryHits::LEFT));

        block.bounce_left(1.0);
        assert_eq!(block.velocity(), Vector2::new(5.0, 0.0));

        assert!(block.correct_boundary_collision_horizontal(bounds, None));
        assert_eq!(block.position(), Vector2::new(0.0, 0.0));
        assert_eq!(block.velocity(), Vector2::new(5.0, 0.0));
    }

    #[test]
    fn floor_correction_uses_the_velocity_at_contact() {
        let bounds = Bounds::new(1000.0, 100.0);
        let mut block = Body::rectangle(0.0, 50.0, 10.0, 10.0, Color::BLUE, true)
            .with_velocity(Vector2::new(20.0, 100.0));

        // Overshoots the floor (y = 90) within one step
        block.advance(1000.0, GRAVITY, None);
        assert!(block.position().y > 90.0);
        let overshoot_velocity = block.velocity().y;

        assert!(block.correct_boundary_collision_vertical(bounds, GRAVITY, None));
        assert!((block.position().y - 90.0).abs() < EPSILON);

        // Contact time from 50 + 100t + 490t² = 90
        let t = (-100.0 + (100.0f64*100.0 + 4.0*490.0*40.0).sqrt())/(2.0*490.0);
        assert!((block.position().x - 20.0*t).abs() < 1e-6);
        assert!((block.velocity().y - (100.0 + GRAVITY*t)).abs() < 1e-6);
        assert!(block.velocity().y < overshoot_velocity);
    }

    #[test]
    fn floor_correction_without_a_valid_instant_only_clamps() {
        let bounds = Bounds::new(100.0, 100.0);
        // Placed below the floor without ever stepping
        let mut block = Body::rectangle(3.0, 95.0, 10.0, 10.0, Color::BLUE, true)
            .with_velocity(Vector2::new(7.0, 4.0));
        assert!(block.correct_boundary_collision_vertical(bounds, GRAVITY, None));
        assert_eq!(block.position(), Vector2::new(3.0, 90.0));
        assert_eq!(block.velocity(), Vector2::new(7.0, 4.0));
    }

    #[test]
    fn floor_correction_after_a_new_segment_only_clamps() {
        let bounds = Bounds::new(1000.0, 100.0);
        let mut block = Body::rectangle(0.0, 50.0, 10.0, 10.0, Color::BLUE, true)
            .with_velocity(Vector2::new(20.0, 100.0));
        block.advance(1000.0, GRAVITY, None);
        let overshoot = *block.motion().current();

        // Something else moved it since the step, the step's trajectory no longer applies
        block.begin_segment();
        assert_eq!(block.motion().segment_start(), Some(&overshoot));
        assert_eq!(block.motion().prior().map(|start| start.position), Some(Vector2::new(0.0, 50.0)));

        assert!(block.correct_boundary_collision_vertical(bounds, GRAVITY, None));
        assert_eq!(block.position(), Vector2::new(overshoot.position.x, 90.0));
        assert_eq!(block.velocity(), overshoot.velocity);
    }

    #[test]
    fn ceiling_correction_from_inside_the_ceiling_only_clamps() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut ball = Body::circle(50.0, 2.0, 5.0, Color::RED, true)
            .with_velocity(Vector2::new(0.0, -1.0));
        ball.begin_segment();

        // Gravity would bring it back down to y = 5 later, which is not a contact
        assert!(ball.correct_boundary_collision_vertical(bounds, GRAVITY, None));
        assert_eq!(ball.position(), Vector2::new(50.0, 5.0));
        assert_eq!(ball.velocity(), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn lateral_correction_leaves_velocity_alone() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut ball = Body::circle(98.0, 50.0, 5.0, Color::RED, true)
            .with_velocity(Vector2::new(12.0, 3.0));
        assert!(ball.correct_boundary_collision_horizontal(bounds, None));
        assert_eq!(ball.position(), Vector2::new(95.0, 50.0));
        assert_eq!(ball.velocity(), Vector2::new(12.0, 3.0));
        assert!(!ball.correct_boundary_collision_horizontal(bounds, None));
    }

    #[test]
    fn bounces_force_the_direction_and_scale() {
        let mut ball = Body::circle(50.0, 50.0, 5.0, Color::RED, true)
            .with_velocity(Vector2::new(4.0, -6.0));
        ball.bounce_right(0.5);
        assert_eq!(ball.velocity().x, -2.0);
        ball.bounce_right(1.0);
        assert_eq!(ball.velocity().x, -2.0);
        ball.bounce_up(1.0);
        assert_eq!(ball.velocity().y, 6.0);
        ball.bounce_down(0.0);
        assert_eq!(ball.velocity().y, 0.0);
    }

    #[test]
    fn asteroids_do_not_move() {
        let mut rock = Body::asteroid(50.0, 50.0, 10.0, Color::MAGENTA).with_velocity(Vector2::new(1.0, 1.0));
        rock.advance(1000.0, GRAVITY, None);
        rock.translate(Vector2::new(5.0, 5.0));
        assert_eq!(rock.position(), Vector2::new(50.0, 50.0));
        assert_eq!(rock.velocity(), Vector2::zero());
        assert_eq!(rock.inverse_mass(), 0.0);
        assert!(rock.collides_with_boundary(Bounds::new(55.0, 55.0)).is_empty());
    }

    #[test]
    fn controlled_ship_steers_and_spends_energy() {
        let mut ship = Body::controlled_ship(0.0, 0.0, 10.0, 0.0, 0.0, Color::MAGENTA);
        assert_eq!(ship.orientation(), Some(0.0));
        ship.accelerate(10.0);
        assert!((ship.velocity().x - 10.0).abs() < EPSILON);

        ship.rotate(std::f64::consts::FRAC_PI_2);
        ship.accelerate(5.0);
        assert!((ship.velocity().y - 5.0).abs() < EPSILON);

        assert_eq!(ship.change_energy(-30.0), Some(DEFAULT_SHIP_ENERGY - 30.0));
        assert_eq!(Body::ship(0.0, 0.0, 1.0, 1.0, 1.0, Color::RED).energy(), None);
    }

    #[test]
    fn advancing_with_a_canvas_erases_then_draws() {
        let mut canvas = RecordingCanvas::new(Bounds::new(100.0, 100.0));
        let mut block = Body::rectangle(1.0, 2.0, 3.0, 4.0, Color::GREEN, true)
            .with_velocity(Vector2::new(1.0, 0.0));
        block.advance(1000.0, 0.0, Some(&mut canvas));
        assert_eq!(canvas.calls, vec![
            DrawCall::EraseRect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 },
            DrawCall::Rect { x: 2.0, y: 2.0, width: 3.0, height: 4.0, color: Color::GREEN },
        ]);
    }
}
