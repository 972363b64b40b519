//! Exact intersection points between pairs of collision bounds.

use crate::collision::case::BoundRef;
use crate::math::{Circle, Edge, Ray, Transform, Vec2};
use crate::objects::PhysicalEntity;
use crate::shapes::{BallBound, CollisionBound, RectangleBound};

/// Cheap per-bound check: centre distance against the summed bounding radii.
pub fn bounds_may_touch(a: &CollisionBound, a_part: Transform, b: &CollisionBound, b_part: Transform) -> bool {
    let reach = a.bounding_radius() + b.bounding_radius();
    a.final_world_position(a_part)
        .distance_squared(b.final_world_position(b_part))
        <= reach * reach
}

/// Points where the outlines of two bounds cross.
pub fn intersect_bounds(a: &CollisionBound, a_part: Transform, b: &CollisionBound, b_part: Transform) -> Vec<Vec2> {
    match (a, b) {
        (CollisionBound::Rectangle(ra), CollisionBound::Rectangle(rb)) => {
            rectangle_rectangle(ra, a_part, rb, b_part)
        }
        (CollisionBound::Rectangle(rect), CollisionBound::Ball(ball)) => {
            rectangle_ball(rect, a_part, ball, b_part)
        }
        (CollisionBound::Ball(ball), CollisionBound::Rectangle(rect)) => {
            rectangle_ball(rect, b_part, ball, a_part)
        }
        (CollisionBound::Ball(ba), CollisionBound::Ball(bb)) => {
            Circle::intersect_circles(&ba.circle(a_part), &bb.circle(b_part))
        }
    }
}

/// Intersection points of two specific bounds at the entities' current
/// placement. Unknown parts or bound indices intersect nothing.
pub fn intersect_bound_refs(
    a: &PhysicalEntity,
    a_ref: BoundRef,
    b: &PhysicalEntity,
    b_ref: BoundRef,
) -> Vec<Vec2> {
    let (Some(a_part), Some(b_part)) = (a.part(a_ref.part), b.part(b_ref.part)) else {
        return Vec::new();
    };
    match (a_part.bounds().get(a_ref.index), b_part.bounds().get(b_ref.index)) {
        (Some(a_bound), Some(b_bound)) => {
            intersect_bounds(a_bound, a_part.transform(), b_bound, b_part.transform())
        }
        _ => Vec::new(),
    }
}

/// Every edge of `a` against every edge of `b`, as lines, keeping points
/// inside both edges' bounds.
fn rectangle_rectangle(a: &RectangleBound, a_part: Transform, b: &RectangleBound, b_part: Transform) -> Vec<Vec2> {
    let a_edges = a.edges(a_part);
    let b_edges = b.edges(b_part);
    let b_rays: Vec<Ray> = b_edges.iter().map(Edge::ray).collect();

    let mut points = Vec::new();
    for a_edge in &a_edges {
        let a_ray = a_edge.ray();
        for (b_edge, b_ray) in b_edges.iter().zip(&b_rays) {
            let p = Ray::intersect(&a_ray, b_ray);
            if a_edge.is_point_in_segment_bounds(p) && b_edge.is_point_in_segment_bounds(p) {
                points.push(p);
            }
        }
    }
    points
}

fn rectangle_ball(rect: &RectangleBound, rect_part: Transform, ball: &BallBound, ball_part: Transform) -> Vec<Vec2> {
    let circle = ball.circle(ball_part);
    let mut points = Vec::new();
    for edge in rect.edges(rect_part) {
        for p in Circle::intersect_ray(&circle, &edge.ray()) {
            if edge.is_point_in_segment_bounds(p) {
                points.push(p);
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn ball(radius: f64) -> CollisionBound {
        BallBound::new(radius, Vec2::ZERO).unwrap().into()
    }

    fn rect(w: f64, h: f64, rotation: f64) -> CollisionBound {
        RectangleBound::new(Vec2::new(w, h), Vec2::ZERO, rotation).unwrap().into()
    }

    fn at(x: f64, y: f64) -> Transform {
        Transform::new(Vec2::new(x, y), 0.0)
    }

    #[test]
    fn test_ball_ball_overlapping() {
        let points = intersect_bounds(&ball(10.0), at(0.0, 0.0), &ball(10.0), at(15.0, 0.0));
        assert!(!points.is_empty() && points.len() <= 2);
        for p in &points {
            assert!((p.distance(Vec2::new(0.0, 0.0)) - 10.0).abs() < EPSILON);
            assert!((p.distance(Vec2::new(15.0, 0.0)) - 10.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_ball_ball_apart() {
        let points = intersect_bounds(&ball(10.0), at(0.0, 0.0), &ball(10.0), at(25.0, 0.0));
        assert!(points.is_empty());
        assert!(!bounds_may_touch(&ball(10.0), at(0.0, 0.0), &ball(10.0), at(25.0, 0.0)));
    }

    #[test]
    fn test_rectangle_ball_on_right_edge() {
        let points = intersect_bounds(&rect(20.0, 20.0, 0.0), at(0.0, 0.0), &ball(5.0), at(10.0, 0.0));
        assert_eq!(points.len(), 2);
        for p in &points {
            assert!((p.x - 10.0).abs() < EPSILON);
        }
        assert!((points[0].y + points[1].y).abs() < EPSILON);
        assert!((points[0].y.abs() - 5.0).abs() < EPSILON);

        // Argument order does not matter.
        let swapped = intersect_bounds(&ball(5.0), at(10.0, 0.0), &rect(20.0, 20.0, 0.0), at(0.0, 0.0));
        assert_eq!(swapped, points);
    }

    #[test]
    fn test_rectangle_ball_nearly_axis_aligned() {
        for rotation in [1e-11, 1e-9, 1e-8, 1e-7, 1e-6, -1e-6] {
            let points = intersect_bounds(&rect(20.0, 20.0, rotation), at(0.0, 0.0), &ball(5.0), at(10.0, 0.0));
            assert_eq!(points.len(), 2, "rotation {}: {:?}", rotation, points);
            for p in &points {
                assert!((p.distance(Vec2::new(10.0, 0.0)) - 5.0).abs() < EPSILON, "rotation {}", rotation);
                assert!((p.x - 10.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_rectangle_ball_clear_of_edges() {
        let points = intersect_bounds(&rect(20.0, 20.0, 0.0), at(0.0, 0.0), &ball(5.0), at(20.0, 0.0));
        assert!(points.is_empty());
    }

    #[test]
    fn test_rectangle_rectangle_overlap() {
        // Squares of side 10 offset by (5, 5): outlines cross at (5, 0) and (0, 5).
        let points = intersect_bounds(&rect(10.0, 10.0, 0.0), at(0.0, 0.0), &rect(10.0, 10.0, 0.0), at(5.0, 5.0));
        let mut found_a = false;
        let mut found_b = false;
        for p in &points {
            found_a |= (p.x - 5.0).abs() < EPSILON && p.y.abs() < EPSILON;
            found_b |= p.x.abs() < EPSILON && (p.y - 5.0).abs() < EPSILON;
        }
        assert!(found_a && found_b, "{:?}", points);
    }

    #[test]
    fn test_rectangle_rectangle_rotated() {
        // A diamond poking into a square.
        let square = rect(10.0, 10.0, 0.0);
        let diamond = rect(4.0, 4.0, PI / 4.0);
        let points = intersect_bounds(&square, at(0.0, 0.0), &diamond, at(6.0, 0.0));
        assert_eq!(points.len(), 2, "{:?}", points);
        for p in &points {
            assert!((p.x - 5.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_rectangle_rectangle_apart() {
        let points = intersect_bounds(&rect(10.0, 10.0, 0.0), at(0.0, 0.0), &rect(10.0, 10.0, 0.3), at(40.0, 0.0));
        assert!(points.is_empty());
    }
}
