/**********************************************************************************************
*
*   rebound - vector and polar math
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use serde::{Deserialize, Serialize};

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// Polar form of a vector, angle in radians measured from +x towards +y
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarPoint {
    pub modulus: f64,
    pub angle: f64,
}

/// Size of the simulated area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
impl Vector2 {
    #[inline(always)]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline(always)]
    pub fn dot(self, other: Vector2) -> f64 {
        self.x*other.x + self.y*other.y
    }

    #[inline(always)]
    pub fn length_sqr(self) -> f64 {
        self.dot(self)
    }

    #[inline(always)]
    pub fn length(self) -> f64 {
        self.length_sqr().sqrt()
    }

    /// Returns the distance between two points
    #[inline(always)]
    pub fn distance(self, other: Vector2) -> f64 {
        (self - other).length()
    }

    /// Returns the unit vector with the same direction; the zero vector stays zero
    pub fn normalized(self) -> Vector2 {
        let length = self.length();
        if length == 0.0 {
            return self;
        }
        let ilength = 1.0/length;
        Vector2 { x: self.x*ilength, y: self.y*ilength }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Neg for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self { x: -self.x, y: -self.y }
    }
}

impl std::ops::Add for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vector2 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::SubAssign for Vector2 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::Mul<f64> for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: f64) -> Self::Output {
        Self { x: self.x*rhs, y: self.y*rhs }
    }
}

impl std::ops::Div<f64> for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: f64) -> Self::Output {
        Self { x: self.x/rhs, y: self.y/rhs }
    }
}

impl PolarPoint {
    pub fn from_cartesian(point: Vector2) -> PolarPoint {
        PolarPoint {
            modulus: point.length(),
            angle: point.y.atan2(point.x),
        }
    }

    pub fn to_cartesian(self) -> Vector2 {
        let (sin, cos) = self.angle.sin_cos();
        Vector2 { x: self.modulus*cos, y: self.modulus*sin }
    }

    pub fn with_modulus(self, modulus: f64) -> PolarPoint {
        PolarPoint { modulus, angle: self.angle }
    }

    /// Modulus at which a vector with this angle reaches a horizontal offset of `|dx|`
    ///
    /// Returns infinity for vertical directions, which never reach it.
    pub fn modulus_for_x(self, dx: f64) -> f64 {
        let cos = self.angle.cos().abs();
        if cos < f64::EPSILON {
            f64::INFINITY
        } else {
            dx.abs()/cos
        }
    }

    /// Modulus at which a vector with this angle reaches a vertical offset of `|dy|`
    pub fn modulus_for_y(self, dy: f64) -> f64 {
        let sin = self.angle.sin().abs();
        if sin < f64::EPSILON {
            f64::INFINITY
        } else {
            dy.abs()/sin
        }
    }
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(crate::DEFAULT_WORLD_WIDTH, crate::DEFAULT_WORLD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn vector_ops_use_both_components() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -5.0);
        assert_eq!(a + b, Vector2::new(4.0, -3.0));
        assert_eq!(a - b, Vector2::new(-2.0, 7.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(b*2.0, Vector2::new(6.0, -10.0));
    }

    #[test]
    fn normalizing_zero_is_zero() {
        assert_eq!(Vector2::zero().normalized(), Vector2::zero());
        let n = Vector2::new(3.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn polar_conversion_is_reversible() {
        let p = Vector2::new(-3.0, 4.0);
        let polar = PolarPoint::from_cartesian(p);
        assert!((polar.modulus - 5.0).abs() < EPSILON);
        let back = polar.to_cartesian();
        assert!((back.x - p.x).abs() < EPSILON);
        assert!((back.y - p.y).abs() < EPSILON);
    }

    #[test]
    fn modulus_to_reach_an_offset() {
        // 45 degrees: reaching x = 1 takes sqrt(2)
        let polar = PolarPoint::from_cartesian(Vector2::new(1.0, 1.0));
        assert!((polar.modulus_for_x(1.0) - 2f64.sqrt()).abs() < EPSILON);
        assert!((polar.modulus_for_y(-1.0) - 2f64.sqrt()).abs() < EPSILON);

        let vertical = PolarPoint::from_cartesian(Vector2::new(0.0, 2.0));
        assert!(vertical.modulus_for_x(1.0).is_infinite());
        assert!((vertical.modulus_for_y(1.0) - 1.0).abs() < EPSILON);
    }
}
