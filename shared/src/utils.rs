use nalgebra::{Point2, Vector2};

use crate::constants::SEGMENT_EPS;

/// Unit vector in the direction of `v`, or zero when `v` is (nearly) zero.
pub fn normalize_or_zero(v: Vector2<f32>) -> Vector2<f32> {
    v.try_normalize(SEGMENT_EPS).unwrap_or_else(Vector2::zeros)
}

/// Unit vector pointing from `from` toward `to`, or `None` when both points coincide.
pub fn direction_to(from: Point2<f32>, to: Point2<f32>) -> Option<Vector2<f32>> {
    (to - from).try_normalize(SEGMENT_EPS)
}

/// Euclidean distance between two points.
pub fn distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (b - a).norm()
}

/// Twice the signed area of a polygon. Positive for counter-clockwise winding
/// in a y-up frame (clockwise on screen, where y grows downward).
pub fn signed_area2(vertices: &[Point2<f32>]) -> f32 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Whether the polygon turns the same way at every vertex.
///
/// Collinear vertices are tolerated; a polygon with fewer than three vertices is not convex.
pub fn is_convex(vertices: &[Point2<f32>]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut sign = 0.0f32;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let cross = (b - a).perp(&(c - b));
        if cross.abs() <= SEGMENT_EPS {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }

    sign != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_or_zero_keeps_zero_vectors() {
        assert_eq!(normalize_or_zero(Vector2::zeros()), Vector2::zeros());
        let n = normalize_or_zero(Vector2::new(3.0, 4.0));
        assert!((n.norm() - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn direction_to_same_point_is_none() {
        let p = Point2::new(1.0, 2.0);
        assert!(direction_to(p, p).is_none());
        let d = direction_to(p, Point2::new(1.0, 12.0)).unwrap();
        assert!((d - Vector2::new(0.0, 1.0)).norm() < 1.0e-6);
    }

    #[test]
    fn winding_sign_flips_when_mirrored() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let mirrored: Vec<_> = square.iter().map(|p| Point2::new(-p.x, p.y)).collect();

        assert!((signed_area2(&square) - 2.0).abs() < 1.0e-6);
        assert!((signed_area2(&mirrored) + 2.0).abs() < 1.0e-6);
    }

    #[test]
    fn convexity_detects_reflex_vertices() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let dart = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.3, 0.3),
            Point2::new(0.0, 1.0),
        ];
        assert!(is_convex(&square));
        assert!(!is_convex(&dart));
        assert!(!is_convex(&square[..2]));
    }
}
