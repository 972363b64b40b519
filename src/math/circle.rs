//! Circles in implicit form and their intersections with lines and circles.

use super::ray::Ray;
use super::vec2::Vec2;

/// A circle `(x - cx)^2 + (y - cy)^2 = r^2`.
///
/// Stored as `r^2` and the negated centre so the equation can be expanded
/// by direct substitution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius_squared: f64,
    pub neg_center_x: f64,
    pub neg_center_y: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self {
            radius_squared: radius * radius,
            neg_center_x: -center.x,
            neg_center_y: -center.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(-self.neg_center_x, -self.neg_center_y)
    }

    pub fn radius(&self) -> f64 {
        self.radius_squared.sqrt()
    }

    /// Points where `ray` crosses the circle: zero, one (tangent) or two.
    pub fn intersect_ray(circle: &Circle, ray: &Ray) -> Vec<Vec2> {
        if ray.is_vertical() {
            // (x + ncx)^2 is fixed; solve (y + ncy)^2 = r^2 - (x + ncx)^2.
            let dx = ray.origin_x + circle.neg_center_x;
            let rest = circle.radius_squared - dx * dx;
            return if rest < 0.0 {
                Vec::new()
            } else if rest == 0.0 {
                vec![Vec2::new(ray.origin_x, -circle.neg_center_y)]
            } else {
                let root = rest.sqrt();
                vec![
                    Vec2::new(ray.origin_x, -circle.neg_center_y - root),
                    Vec2::new(ray.origin_x, -circle.neg_center_y + root),
                ]
            };
        }

        if ray.is_steep() {
            // x = p y + q  =>  (p y + q + ncx)^2 + (y + ncy)^2 = r^2
            let p = 1.0 / ray.slope;
            let q = -ray.offset / ray.slope;
            let shifted = q + circle.neg_center_x;
            let a = 1.0 + p * p;
            let b = 2.0 * (p * shifted + circle.neg_center_y);
            let c = shifted * shifted + circle.neg_center_y * circle.neg_center_y - circle.radius_squared;
            return solve_quadratic(a, b, c)
                .into_iter()
                .map(|y| Vec2::new(p * y + q, y))
                .collect();
        }

        // (x + ncx)^2 + (m x + k + ncy)^2 = r^2  =>  a x^2 + b x + c = 0
        let m = ray.slope;
        let shifted = ray.offset + circle.neg_center_y;
        let a = 1.0 + m * m;
        let b = 2.0 * (circle.neg_center_x + m * shifted);
        let c = circle.neg_center_x * circle.neg_center_x + shifted * shifted - circle.radius_squared;
        solve_quadratic(a, b, c)
            .into_iter()
            .map(|x| Vec2::new(x, ray.y_at(x)))
            .collect()
    }

    /// Points where two circles cross.
    ///
    /// Subtracting the two equations leaves the radical line, which is then
    /// intersected with the first circle. Concentric circles yield nothing.
    pub fn intersect_circles(c1: &Circle, c2: &Circle) -> Vec<Vec2> {
        // A x + B y + C = 0
        let a = 2.0 * (c1.neg_center_x - c2.neg_center_x);
        let b = 2.0 * (c1.neg_center_y - c2.neg_center_y);
        let c = (c1.neg_center_x * c1.neg_center_x + c1.neg_center_y * c1.neg_center_y
            - c1.radius_squared)
            - (c2.neg_center_x * c2.neg_center_x + c2.neg_center_y * c2.neg_center_y
                - c2.radius_squared);

        match Ray::from_implicit(a, b, c) {
            Some(radical) => Self::intersect_ray(c1, &radical),
            None => Vec::new(),
        }
    }
}

/// Real roots of `a t^2 + b t + c = 0` in ascending order, `a > 0`.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        Vec::new()
    } else if discriminant == 0.0 {
        vec![-b / (2.0 * a)]
    } else {
        // Avoids subtracting nearly equal terms for the smaller root.
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let (t1, t2) = (q / a, c / q);
        if t1 <= t2 {
            vec![t1, t2]
        } else {
            vec![t2, t1]
        }
    }
}
