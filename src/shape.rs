/**********************************************************************************************
*
*   rebound - shapes and pairwise collision geometry
*
*   Rectangles are positioned by their top-left corner and circles by their centre.
*   Every collision query answers with the displacement that would move the *other*
*   shape out of this one, `(0,0)` when one shape contains the other.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::f64::consts::PI;

use crate::{
    canvas::{Canvas, Color},
    math::{Bounds, PolarPoint, Vector2},
};

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle = 0,
    Circle = 1,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

/// Offsets from a body's position to its outermost edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min: Vector2,
    pub max: Vector2,
}

/// World edges a shape is touching or crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundaryHits(u8);

impl BoundaryHits {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const TOP: Self = Self(4);
    pub const BOTTOM: Self = Self(8);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for BoundaryHits {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for BoundaryHits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Shape-specific answers every body variant needs
pub trait Geometry {
    fn area(&self) -> f64;
    fn volume(&self) -> f64;
    fn extents(&self) -> Extents;
    fn contains_point(&self, position: Vector2, point: Vector2) -> bool;
    fn draw(&self, canvas: &mut dyn Canvas, position: Vector2, color: Color);
    fn erase(&self, canvas: &mut dyn Canvas, position: Vector2);

    /// Geometric centre of the shape placed at `position`
    fn centre(&self, position: Vector2) -> Vector2 {
        let extents = self.extents();
        position + (extents.min + extents.max)*0.5
    }

    /// Edges of `bounds` the shape placed at `position` touches or crosses
    ///
    /// Being exactly flush with an edge counts as touching it.
    fn boundary_hits(&self, position: Vector2, bounds: Bounds) -> BoundaryHits {
        let extents = self.extents();
        let mut hits = BoundaryHits::NONE;
        if position.x + extents.min.x <= 0.0 { hits |= BoundaryHits::LEFT; }
        if position.x + extents.max.x >= bounds.width { hits |= BoundaryHits::RIGHT; }
        if position.y + extents.min.y <= 0.0 { hits |= BoundaryHits::TOP; }
        if position.y + extents.max.y >= bounds.height { hits |= BoundaryHits::BOTTOM; }
        hits
    }
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
impl Geometry for Rectangle {
    fn area(&self) -> f64 {
        self.width*self.height
    }

    /// Depth is taken to be the same as the width
    fn volume(&self) -> f64 {
        self.width*self.height*self.width
    }

    fn extents(&self) -> Extents {
        Extents {
            min: Vector2::zero(),
            max: Vector2::new(self.width, self.height),
        }
    }

    fn contains_point(&self, position: Vector2, point: Vector2) -> bool {
        point.x >= position.x && point.y >= position.y
            && point.x <= position.x + self.width && point.y <= position.y + self.height
    }

    fn draw(&self, canvas: &mut dyn Canvas, position: Vector2, color: Color) {
        canvas.draw_rect(position.x, position.y, self.width, self.height, color);
    }

    fn erase(&self, canvas: &mut dyn Canvas, position: Vector2) {
        canvas.erase_rect(position.x, position.y, self.width, self.height);
    }
}

impl Geometry for Circle {
    fn area(&self) -> f64 {
        PI*self.radius*self.radius
    }

    fn volume(&self) -> f64 {
        4.0/3.0*PI*self.radius*self.radius*self.radius
    }

    fn extents(&self) -> Extents {
        Extents {
            min: Vector2::new(-self.radius, -self.radius),
            max: Vector2::new(self.radius, self.radius),
        }
    }

    fn contains_point(&self, position: Vector2, point: Vector2) -> bool {
        position.distance(point) <= self.radius
    }

    fn draw(&self, canvas: &mut dyn Canvas, position: Vector2, color: Color) {
        canvas.draw_circle(position.x, position.y, self.radius, color);
    }

    fn erase(&self, canvas: &mut dyn Canvas, position: Vector2) {
        canvas.erase_circle(position.x, position.y, self.radius);
    }
}

impl Geometry for Shape {
    fn area(&self) -> f64 {
        match self {
            Shape::Rectangle(rect) => rect.area(),
            Shape::Circle(circle) => circle.area(),
        }
    }

    fn volume(&self) -> f64 {
        match self {
            Shape::Rectangle(rect) => rect.volume(),
            Shape::Circle(circle) => circle.volume(),
        }
    }

    fn extents(&self) -> Extents {
        match self {
            Shape::Rectangle(rect) => rect.extents(),
            Shape::Circle(circle) => circle.extents(),
        }
    }

    fn contains_point(&self, position: Vector2, point: Vector2) -> bool {
        match self {
            Shape::Rectangle(rect) => rect.contains_point(position, point),
            Shape::Circle(circle) => circle.contains_point(position, point),
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, position: Vector2, color: Color) {
        match self {
            Shape::Rectangle(rect) => rect.draw(canvas, position, color),
            Shape::Circle(circle) => circle.draw(canvas, position, color),
        }
    }

    fn erase(&self, canvas: &mut dyn Canvas, position: Vector2) {
        match self {
            Shape::Rectangle(rect) => rect.erase(canvas, position),
            Shape::Circle(circle) => circle.erase(canvas, position),
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    /// Collision vector between this shape at `position` and `other` at `other_position`
    pub fn collides_with(&self, position: Vector2, other: &Shape, other_position: Vector2) -> Option<Vector2> {
        let solve = COLLISION_TABLE[self.kind() as usize][other.kind() as usize];
        solve(self, position, other, other_position)
    }
}

//----------------------------------------------------------------------------------
// Collision dispatch
//----------------------------------------------------------------------------------
type CollisionFn = fn(&Shape, Vector2, &Shape, Vector2) -> Option<Vector2>;

/// Resolver per (this shape, other shape) pair, indexed by [`ShapeKind`]
const COLLISION_TABLE: [[CollisionFn; 2]; 2] = [
    // other:     Rectangle,                 Circle
    [solve_rectangle_to_rectangle, solve_rectangle_to_circle], // this: Rectangle
    [solve_circle_to_rectangle,    solve_circle_to_circle],    // this: Circle
];

fn solve_rectangle_to_rectangle(a: &Shape, pos_a: Vector2, b: &Shape, pos_b: Vector2) -> Option<Vector2> {
    match (a, b) {
        (Shape::Rectangle(a), Shape::Rectangle(b)) => rectangle_to_rectangle(pos_a, a, pos_b, b),
        _ => None,
    }
}

fn solve_rectangle_to_circle(a: &Shape, pos_a: Vector2, b: &Shape, pos_b: Vector2) -> Option<Vector2> {
    match (a, b) {
        (Shape::Rectangle(a), Shape::Circle(b)) => rectangle_to_circle(pos_a, a, pos_b, b),
        _ => None,
    }
}

fn solve_circle_to_rectangle(a: &Shape, pos_a: Vector2, b: &Shape, pos_b: Vector2) -> Option<Vector2> {
    match (a, b) {
        // Same contact seen from the rectangle, pushing the other way
        (Shape::Circle(a), Shape::Rectangle(b)) => rectangle_to_circle(pos_b, b, pos_a, a).map(|push| -push),
        _ => None,
    }
}

fn solve_circle_to_circle(a: &Shape, pos_a: Vector2, b: &Shape, pos_b: Vector2) -> Option<Vector2> {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_to_circle(pos_a, a, pos_b, b),
        _ => None,
    }
}

/// How the second extent lies along one axis relative to the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisOverlap {
    /// Strictly within the first extent
    Inside,
    /// Sticks out before the start of the first extent
    Before,
    /// Sticks out past the end of the first extent
    After,
    /// Covers the whole first extent
    Spanning,
}

fn classify_axis(start: f64, end: f64, other_start: f64, other_end: f64) -> AxisOverlap {
    match (other_start > start, other_end < end) {
        (true, true) => AxisOverlap::Inside,
        (true, false) => AxisOverlap::After,
        (false, true) => AxisOverlap::Before,
        (false, false) => AxisOverlap::Spanning,
    }
}

/// Signed distance that moves the second extent clear of the first along one axis
fn axis_push(overlap: AxisOverlap, start: f64, end: f64, other_start: f64, other_end: f64) -> f64 {
    let forward = end - other_start;
    let backward = start - other_end;
    match overlap {
        AxisOverlap::After => forward,
        AxisOverlap::Before => backward,
        AxisOverlap::Inside | AxisOverlap::Spanning => {
            if forward.abs() <= backward.abs() { forward } else { backward }
        }
    }
}

/// Rectangle-rectangle test by per-axis region classification
pub fn rectangle_to_rectangle(pos_a: Vector2, a: &Rectangle, pos_b: Vector2, b: &Rectangle) -> Option<Vector2> {
    let (a_left, a_right) = (pos_a.x, pos_a.x + a.width);
    let (a_top, a_bottom) = (pos_a.y, pos_a.y + a.height);
    let (b_left, b_right) = (pos_b.x, pos_b.x + b.width);
    let (b_top, b_bottom) = (pos_b.y, pos_b.y + b.height);

    // Cheap rejection, touching edges still collide
    if b_left > a_right || b_top > a_bottom || b_right < a_left || b_bottom < a_top {
        return None;
    }

    let horizontal = classify_axis(a_left, a_right, b_left, b_right);
    let vertical = classify_axis(a_top, a_bottom, b_top, b_bottom);
    let dx = axis_push(horizontal, a_left, a_right, b_left, b_right);
    let dy = axis_push(vertical, a_top, a_bottom, b_top, b_bottom);

    use AxisOverlap::*;
    let push = match (horizontal, vertical) {
        // One rectangle holds the other, no unique way out
        (Inside, Inside) | (Spanning, Spanning) => Vector2::zero(),
        // Corner contact
        (Before | After, Before | After) => Vector2::new(dx, dy),
        // Side contact
        (Before | After, Inside | Spanning) => Vector2::new(dx, 0.0),
        (Inside | Spanning, Before | After) => Vector2::new(0.0, dy),
        // Crossing bars leave along the axis where the second one is narrower
        (Inside, Spanning) => Vector2::new(dx, 0.0),
        (Spanning, Inside) => Vector2::new(0.0, dy),
    };

    Some(push)
}

/// Edge region of a rectangle a point falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    Left,
    Right,
    Top,
    Bottom,
}

/// Finds the edge sector of `point` by the 45° diagonals through the rectangle corners
///
/// Left and right overlap only on the vertical midline band and are split by it, as
/// are top and bottom by the horizontal midline. On an exact diagonal between a
/// horizontal and a vertical sector, the vertical one (top or bottom) is chosen.
pub fn sector(pos: Vector2, rect: &Rectangle, point: Vector2) -> Option<Sector> {
    let (x, y, w, h) = (pos.x, pos.y, rect.width, rect.height);
    let mid_x = x + w/2.0;
    let mid_y = y + h/2.0;

    // Cones opening outwards from each edge, apex half a short side inside the edge
    let left = (point.y - mid_y).abs() <= (x + h/2.0) - point.x;
    let right = (point.y - mid_y).abs() <= point.x - (x + w - h/2.0);
    let top = (point.x - mid_x).abs() <= (y + w/2.0) - point.y;
    let bottom = (point.x - mid_x).abs() <= point.y - (y + h - w/2.0);

    let horizontal = match (left, right) {
        (true, true) => Some(if point.x > mid_x { Sector::Right } else { Sector::Left }),
        (true, false) => Some(Sector::Left),
        (false, true) => Some(Sector::Right),
        (false, false) => None,
    };
    let vertical = match (top, bottom) {
        (true, true) => Some(if point.y > mid_y { Sector::Bottom } else { Sector::Top }),
        (true, false) => Some(Sector::Top),
        (false, true) => Some(Sector::Bottom),
        (false, false) => None,
    };

    vertical.or(horizontal)
}

/// Rectangle-circle test by angular sector
///
/// From the apex of the sector the circle lies in, the distance to the edge along the
/// direction of the circle centre is compared with the distance to the circle's nearest
/// point. The excess, in that direction, is the push for the circle.
pub fn rectangle_to_circle(pos: Vector2, rect: &Rectangle, centre: Vector2, circle: &Circle) -> Option<Vector2> {
    let (x, y, w, h) = (pos.x, pos.y, rect.width, rect.height);

    let sector = sector(pos, rect, centre)?;
    let origin = match sector {
        Sector::Left => Vector2::new(x + h/2.0, y + h/2.0),
        Sector::Right => Vector2::new(x + w - h/2.0, y + h/2.0),
        Sector::Top => Vector2::new(x + w/2.0, y + w/2.0),
        Sector::Bottom => Vector2::new(x + w/2.0, y + h - w/2.0),
    };

    let to_centre = PolarPoint::from_cartesian(centre - origin);
    let to_surface = to_centre.modulus - circle.radius;
    let to_edge = match sector {
        Sector::Left | Sector::Right => to_centre.modulus_for_x(h/2.0),
        Sector::Top | Sector::Bottom => to_centre.modulus_for_y(w/2.0),
    };

    if to_edge < to_surface {
        None
    } else {
        Some(to_centre.with_modulus(to_edge - to_surface).to_cartesian())
    }
}

/// Circle-circle test along the line between centres
pub fn circle_to_circle(centre_a: Vector2, a: &Circle, centre_b: Vector2, b: &Circle) -> Option<Vector2> {
    let between = centre_b - centre_a;
    let distance = between.length();
    let reach = a.radius + b.radius;

    if distance > reach {
        None
    } else if distance == 0.0 {
        Some(Vector2::zero())
    } else {
        Some(between*((reach - distance)/distance))
    }
}
