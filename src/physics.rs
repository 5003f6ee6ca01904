/**********************************************************************************************
*
*   rebound - closed-form kinematics and collision response
*
*   Motion within a segment follows p(t) = p0 + v0*t + g*t²/2, so positions and velocities
*   at any instant of the last step can be recomputed exactly from the segment start.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use crate::{body::Body, math::Vector2, shape::ShapeKind};

//----------------------------------------------------------------------------------
// Defines and Macros
//----------------------------------------------------------------------------------
/// Separations shorter than this are treated as already resolved
pub const SEPARATION_EPSILON: f64 = 1e-9;

/// Roots this far below zero are rounding noise and count as zero
const ROOT_TOLERANCE: f64 = 1e-9;

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
/// Position after `t` seconds starting at `p0` with velocity `v0` under acceleration `g`
#[inline]
pub fn position_at_time(p0: f64, v0: f64, g: f64, t: f64) -> f64 {
    p0 + v0*t + 0.5*g*t*t
}

/// Velocity after `t` seconds starting at `v0` under acceleration `g`
#[inline]
pub fn velocity_at_time(v0: f64, g: f64, t: f64) -> f64 {
    v0 + g*t
}

/// Earliest non-negative time at which a body starting at `p0` with velocity `v0`
/// under acceleration `g` reaches `target`
///
/// Returns [`None`] when no such instant exists (negative discriminant, no motion,
/// or only negative roots); callers skip their correction in that case.
pub fn time_to_reach_position(v0: f64, p0: f64, g: f64, target: f64) -> Option<f64> {
    let a = 0.5*g;
    let b = v0;
    let c = p0 - target;

    if c == 0.0 {
        return Some(0.0);
    }

    if a.abs() < f64::EPSILON {
        // Uniform motion
        if b == 0.0 {
            return None;
        }
        return non_negative(-c/b);
    }

    let discriminant = b*b - 4.0*a*c;
    if discriminant < 0.0 {
        return None;
    }

    // Numerically stable pair of roots
    let sqrt_d = discriminant.sqrt();
    let q = if b >= 0.0 { -0.5*(b + sqrt_d) } else { -0.5*(b - sqrt_d) };
    let (r1, r2) = if q != 0.0 { (q/a, c/q) } else { (0.0, 0.0) };
    let (first, second) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

    non_negative(first).or_else(|| non_negative(second))
}

fn non_negative(t: f64) -> Option<f64> {
    if !t.is_finite() {
        None
    } else if t >= 0.0 {
        Some(t)
    } else if t > -ROOT_TOLERANCE {
        Some(0.0)
    } else {
        None
    }
}

/// Keeps only the shorter axis of a rectangle-rectangle corner push
pub fn minimum_translation(push: Vector2) -> Vector2 {
    if push.x != 0.0 && push.y != 0.0 {
        if push.x.abs() <= push.y.abs() {
            Vector2::new(push.x, 0.0)
        } else {
            Vector2::new(0.0, push.y)
        }
    } else {
        push
    }
}

/// Restitution used between two bodies: elastic only when both bounce
#[inline]
pub fn pair_restitution(a: &Body, b: &Body) -> f64 {
    if a.is_bouncy() && b.is_bouncy() { 1.0 } else { 0.0 }
}

/// Separates two colliding bodies and exchanges momentum along the collision normal
///
/// `push` is the collision vector reported by `a.collides_with(b)`: the displacement
/// that would separate `b` from `a`. Areas stand in for masses, so the larger body is
/// displaced and deflected less. Static bodies behave as infinitely massive.
///
/// Returns true when a position or velocity was changed.
pub fn resolve_collision(a: &mut Body, b: &mut Body, push: Vector2, restitution: f64) -> bool {
    let inverse_mass_a = a.inverse_mass();
    let inverse_mass_b = b.inverse_mass();
    let inverse_mass_sum = inverse_mass_a + inverse_mass_b;
    if inverse_mass_sum == 0.0 {
        return false;
    }

    let separation = match (a.shape().kind(), b.shape().kind()) {
        (ShapeKind::Rectangle, ShapeKind::Rectangle) => minimum_translation(push),
        _ => push,
    };

    let mut changed = false;

    // Position correction, split by inverse mass
    if separation.length_sqr() > SEPARATION_EPSILON*SEPARATION_EPSILON {
        a.translate(-separation*(inverse_mass_a/inverse_mass_sum));
        b.translate(separation*(inverse_mass_b/inverse_mass_sum));
        changed = true;
    }

    // Contained shapes report no direction, fall back to the line between centres
    let normal = if separation.is_zero() {
        (b.centre() - a.centre()).normalized()
    } else {
        separation.normalized()
    };
    if normal.is_zero() {
        return changed;
    }

    let closing_velocity = (a.velocity() - b.velocity()).dot(normal);
    if closing_velocity <= 0.0 {
        // Already separating from each other
        return changed;
    }

    let impulse = (1.0 + restitution.clamp(0.0, 1.0))*closing_velocity/inverse_mass_sum;
    a.set_velocity(a.velocity() - normal*(impulse*inverse_mass_a));
    b.set_velocity(b.velocity() + normal*(impulse*inverse_mass_b));

    log::trace!("resolved collision between {} and {} (impulse {:.3})", a.name(), b.name(), impulse);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{body::Body, canvas::Color};

    const EPSILON: f64 = 1e-6;

    #[test]
    fn position_and_time_round_trip() {
        // Monotonic segments only: the earliest root is the requested instant
        let cases = [
            (0.0, 0.0, 980.0, 0.25),
            (100.0, 40.0, 980.0, 1.5),
            (10.0, -3.0, 0.0, 2.0),
            (-5.0, 12.0, 9.8, 0.016),
            (3.0, 0.0, 9.8, 4.0),
        ];
        for (p0, v0, g, t) in cases {
            let p = position_at_time(p0, v0, g, t);
            let back = time_to_reach_position(v0, p0, g, p).expect("reachable position");
            assert!((back - t).abs() < EPSILON, "p0={p0} v0={v0} g={g}: {back} != {t}");
        }
    }

    #[test]
    fn unreachable_positions_have_no_time() {
        // Not moving and no gravity
        assert_eq!(time_to_reach_position(0.0, 0.0, 0.0, 10.0), None);
        // Moving away without gravity
        assert_eq!(time_to_reach_position(-1.0, 0.0, 0.0, 10.0), None);
        // Thrown upward, never reaching the height
        assert_eq!(time_to_reach_position(-10.0, 0.0, 10.0, -100.0), None);
        // Already there
        assert_eq!(time_to_reach_position(3.0, 7.0, 9.8, 7.0), Some(0.0));
    }

    #[test]
    fn velocity_grows_linearly_with_gravity() {
        assert!((velocity_at_time(2.0, 10.0, 0.5) - 7.0).abs() < EPSILON);
        assert!((velocity_at_time(2.0, 0.0, 100.0) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn corner_push_keeps_the_shorter_axis() {
        assert_eq!(minimum_translation(Vector2::new(2.0, -5.0)), Vector2::new(2.0, 0.0));
        assert_eq!(minimum_translation(Vector2::new(-7.0, 3.0)), Vector2::new(0.0, 3.0));
        assert_eq!(minimum_translation(Vector2::new(0.0, 3.0)), Vector2::new(0.0, 3.0));
    }

    #[test]
    fn heavier_body_is_deflected_less_and_momentum_is_kept() {
        let mut big = Body::circle(0.0, 0.0, 20.0, Color::BLUE, true);
        let mut small = Body::circle(29.0, 0.0, 10.0, Color::RED, true);
        big.set_velocity(Vector2::new(5.0, 0.0));
        small.set_velocity(Vector2::new(-5.0, 0.0));

        let momentum_before = big.velocity()*big.area() + small.velocity()*small.area();
        let push = big.collides_with(&small).expect("overlapping circles");
        assert!(resolve_collision(&mut big, &mut small, push, 1.0));
        let momentum_after = big.velocity()*big.area() + small.velocity()*small.area();

        let big_change = (big.velocity() - Vector2::new(5.0, 0.0)).length();
        let small_change = (small.velocity() - Vector2::new(-5.0, 0.0)).length();
        assert!(big_change < small_change);
        assert!((momentum_after - momentum_before).length() < EPSILON*big.area());

        // Separated afterwards, the small circle moved further
        assert!(big.centre().distance(small.centre()) >= 30.0 - EPSILON);
        assert!(big.centre().x.abs() < (small.centre().x - 29.0).abs());
    }

    #[test]
    fn static_bodies_absorb_no_momentum() {
        let mut rock = Body::asteroid(0.0, 0.0, 50.0, Color::MAGENTA);
        let mut ship = Body::ship(60.0, 0.0, 20.0, 40.0, 0.0, Color::RED);
        let push = rock.collides_with(&ship).expect("touching");
        assert!(resolve_collision(&mut rock, &mut ship, push, 1.0));
        assert_eq!(rock.velocity(), Vector2::zero());
        assert_eq!(rock.centre(), Vector2::zero());
        assert!(ship.velocity().x > 0.0);
        assert!((ship.velocity().x - 20.0).abs() < EPSILON);
    }

    #[test]
    fn separating_bodies_keep_their_velocity() {
        let mut a = Body::circle(0.0, 0.0, 10.0, Color::BLUE, true);
        let mut b = Body::circle(15.0, 0.0, 10.0, Color::BLUE, true);
        a.set_velocity(Vector2::new(-3.0, 0.0));
        b.set_velocity(Vector2::new(3.0, 0.0));
        let push = a.collides_with(&b).expect("overlapping");
        resolve_collision(&mut a, &mut b, push, 1.0);
        assert_eq!(a.velocity(), Vector2::new(-3.0, 0.0));
        assert_eq!(b.velocity(), Vector2::new(3.0, 0.0));
    }
}
