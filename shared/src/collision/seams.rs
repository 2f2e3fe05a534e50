//! Seam smoothing between adjacent solid tiles.
//!
//! Each tile is its own rectangle, so a circle sliding along a row of tiles also meets the
//! corner of the next tile. Rapier reports that contact with a normal tilted toward the
//! corner, which pushes the player up and back at every seam. When the corner lies on a
//! seam, the contact normal is replaced by the normal of the face that continues across it.

use nalgebra::{Point2, Vector2};
use rapier2d::prelude::ContactModificationContext;

use super::{
    settings::SEAM_CORNER_TOLERANCE,
    types::{Seams, Side, seams_from_user_data},
};

/// Outward normal to use for a contact at `point` on a rectangle of `half_extents`.
///
/// `point` is rectangle-local and `current` is the outward normal reported by the narrow
/// phase. Returns `None` when the point is not on a seam corner.
pub fn seam_face_normal(
    point: Point2<f32>,
    half_extents: Vector2<f32>,
    seams: Seams,
    current: Vector2<f32>,
) -> Option<Vector2<f32>> {
    let on_x = (point.x.abs() - half_extents.x).abs() <= SEAM_CORNER_TOLERANCE;
    let on_y = (point.y.abs() - half_extents.y).abs() <= SEAM_CORNER_TOLERANCE;
    if !(on_x && on_y) {
        return None;
    }

    let (x_side, vertical_face) = if point.x < 0.0 {
        (Side::Left, Vector2::new(-1.0, 0.0))
    } else {
        (Side::Right, Vector2::new(1.0, 0.0))
    };
    let (y_side, horizontal_face) = if point.y < 0.0 {
        (Side::Top, Vector2::new(0.0, -1.0))
    } else {
        (Side::Bottom, Vector2::new(0.0, 1.0))
    };

    // A seam on the left or right means the top or bottom face runs on past the corner.
    match (seams.has(x_side), seams.has(y_side)) {
        (true, false) => Some(horizontal_face),
        (false, true) => Some(vertical_face),
        (true, true) if current.dot(&horizontal_face) >= current.dot(&vertical_face) => {
            Some(horizontal_face)
        }
        (true, true) => Some(vertical_face),
        (false, false) => None,
    }
}

/// Snap the manifold normal of a contact on a seam corner.
pub(crate) fn smooth_seam_contact(context: &mut ContactModificationContext) {
    let rectangle = [(context.collider1, true), (context.collider2, false)]
        .into_iter()
        .find_map(|(handle, first)| {
            let collider = context.colliders.get(handle)?;
            let seams = seams_from_user_data(collider.user_data);
            if seams.bits() == 0 {
                return None;
            }
            let cuboid = collider.shape().as_cuboid()?;
            Some((first, seams, cuboid.half_extents))
        });
    let Some((first, seams, half_extents)) = rectangle else {
        return;
    };
    let Some(contact) = context.manifold.points.first() else {
        return;
    };

    // The manifold normal points from collider 1 to collider 2.
    let (point, outward) = if first {
        (contact.local_p1, *context.normal)
    } else {
        (contact.local_p2, -*context.normal)
    };
    if let Some(face) = seam_face_normal(point, half_extents, seams, outward) {
        *context.normal = if first { face } else { -face };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half() -> Vector2<f32> {
        Vector2::new(25.0, 25.0)
    }

    fn seams(sides: &[Side]) -> Seams {
        let mut seams = Seams::default();
        for &side in sides {
            seams.add(side);
        }
        seams
    }

    #[test]
    fn top_left_corner_with_a_left_neighbor_uses_the_top_face() {
        let tilted = Vector2::new(-0.3, -0.95);
        let corner = Point2::new(-25.0, -25.0);
        let normal = seam_face_normal(corner, half(), seams(&[Side::Left]), tilted);
        assert_eq!(normal, Some(Vector2::new(0.0, -1.0)));
    }

    #[test]
    fn bottom_right_corner_with_a_neighbor_below_uses_the_side_face() {
        let tilted = Vector2::new(0.9, 0.4);
        let normal =
            seam_face_normal(Point2::new(25.0, 25.0), half(), seams(&[Side::Bottom]), tilted);
        assert_eq!(normal, Some(Vector2::new(1.0, 0.0)));
    }

    #[test]
    fn inner_corner_keeps_the_closer_face() {
        let both = seams(&[Side::Right, Side::Top]);
        let mostly_up = Vector2::new(0.3, -0.95);
        let mostly_right = Vector2::new(0.95, -0.3);
        let corner = Point2::new(25.0, -25.0);
        assert_eq!(
            seam_face_normal(corner, half(), both, mostly_up),
            Some(Vector2::new(0.0, -1.0))
        );
        assert_eq!(
            seam_face_normal(corner, half(), both, mostly_right),
            Some(Vector2::new(1.0, 0.0))
        );
    }

    #[test]
    fn open_corners_and_face_points_are_left_alone() {
        let up = Vector2::new(0.0, -1.0);
        // Ledge corner: no neighbor on either side.
        assert_eq!(
            seam_face_normal(Point2::new(25.0, -25.0), half(), seams(&[Side::Left]), up),
            None
        );
        // Middle of the top face.
        let both = seams(&[Side::Left, Side::Right]);
        assert_eq!(
            seam_face_normal(Point2::new(3.0, -25.0), half(), both, up),
            None
        );
    }
}
