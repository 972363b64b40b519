use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector in screen space (x to the right, y downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    /// Fallback direction used wherever a direction is undefined.
    pub const DOWN: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    /// Creates a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the dot product of two vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared magnitude; avoids a square root in comparisons.
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector, or a zero vector if the magnitude is zero.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            Self::ZERO
        } else {
            self * (1.0 / mag)
        }
    }

    /// Returns a unit vector, or `fallback` if this vector has no direction.
    pub fn normalize_or(self, fallback: Vec2) -> Self {
        let n = self.normalize();
        if n == Self::ZERO {
            fallback
        } else {
            n
        }
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).magnitude_squared()
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Returns `(-y, x)`: a quarter turn clockwise on screen (y down).
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates the vector by a given angle (in radians).
    pub fn rotate(self, angle: f64) -> Self {
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        Self::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// 2D cross product (z-component of the 3D cross product).
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Replaces NaN components with zero.
    pub fn sanitized(self) -> Self {
        Self::new(
            if self.x.is_nan() { 0.0 } else { self.x },
            if self.y.is_nan() { 0.0 } else { self.y },
        )
    }

    /// Scales the vector down so its magnitude does not exceed `max`.
    pub fn clamp_length(self, max: f64) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq > max * max {
            self * (max / mag_sq.sqrt())
        } else {
            self
        }
    }

    /// Component-wise clamp to `[-limit, limit]`.
    pub fn clamp_components(self, limit: f64) -> Self {
        Self::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, vec: Vec2) -> Vec2 {
        vec * self
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

// Division by zero yields infinities / NaN; callers sanitize.
impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_vec2_arithmetic() {
        let v1 = Vec2::new(1.0, 2.0);
        let v2 = Vec2::new(3.0, 4.0);
        assert_eq!(v1 + v2, Vec2::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vec2::new(2.0, 2.0));
        assert_eq!(v1 * 3.0, Vec2::new(3.0, 6.0));
        assert_eq!(3.0 * v1, Vec2::new(3.0, 6.0));
        assert_eq!(-v1, Vec2::new(-1.0, -2.0));
        assert!((v1.dot(v2) - 11.0).abs() < EPSILON);
    }

    #[test]
    fn test_vec2_normalize() {
        let v = Vec2::new(3.0, 4.0);
        let norm_v = v.normalize();
        assert!((norm_v.magnitude() - 1.0).abs() < EPSILON);
        assert!((norm_v.x - 0.6).abs() < EPSILON);
        assert!((norm_v.y - 0.8).abs() < EPSILON);

        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        assert_eq!(Vec2::ZERO.normalize_or(Vec2::DOWN), Vec2::DOWN);
    }

    #[test]
    fn test_vec2_perpendicular() {
        let v = Vec2::new(3.0, 4.0);
        let perp = v.perpendicular();
        assert_eq!(perp, Vec2::new(-4.0, 3.0));
        assert!(v.dot(perp).abs() < EPSILON);
    }

    #[test]
    fn test_vec2_rotate() {
        let v = Vec2::new(1.0, 0.0);

        let v90 = v.rotate(PI / 2.0);
        assert!((v90.x - 0.0).abs() < EPSILON);
        assert!((v90.y - 1.0).abs() < EPSILON);

        let v180 = v.rotate(PI);
        assert!((v180.x - -1.0).abs() < EPSILON);
        assert!(v180.y.abs() < EPSILON);

        // A quarter turn matches the perpendicular.
        let v2 = Vec2::new(1.0, 1.0);
        let rotated = v2.rotate(PI / 2.0);
        assert!((rotated - v2.perpendicular()).magnitude() < EPSILON);
    }

    #[test]
    fn test_vec2_sanitized_and_clamped() {
        let v = Vec2::new(f64::NAN, 2.0).sanitized();
        assert_eq!(v, Vec2::new(0.0, 2.0));

        let long = Vec2::new(30.0, 40.0).clamp_length(5.0);
        assert!((long.magnitude() - 5.0).abs() < EPSILON);
        assert!((long.x - 3.0).abs() < EPSILON);

        let short = Vec2::new(1.0, 1.0);
        assert_eq!(short.clamp_length(5.0), short);

        assert_eq!(Vec2::new(-50.0, 7.0).clamp_components(10.0), Vec2::new(-10.0, 7.0));
        assert!(!Vec2::new(f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_vec2_distance() {
        let v1 = Vec2::new(1.0, 2.0);
        let v2 = Vec2::new(4.0, 6.0);
        assert!((v1.distance_squared(v2) - 25.0).abs() < EPSILON);
        assert!((v2.distance(v1) - 5.0).abs() < EPSILON);
    }
}
