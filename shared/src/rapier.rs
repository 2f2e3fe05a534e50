use nalgebra::Point2;
use rapier2d::prelude::*;

use crate::{
    collision::{
        CollisionGroup, CollisionMask, Material, Seams, types::collider_user_data,
    },
    error::WorldError,
    utils::{is_convex, signed_area2},
};

/// Stable handle to a body inserted in the [`WorldEngine`](crate::WorldEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

/// Dynamic bodies carry a mass; anything without one is static.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyKind {
    Dynamic { mass: f32 },
    Static,
}

impl BodyKind {
    /// A zero or negative mass means static.
    pub fn from_mass(mass: f32) -> Self {
        if mass > 0.0 {
            BodyKind::Dynamic { mass }
        } else {
            BodyKind::Static
        }
    }

    pub fn mass(self) -> Option<f32> {
        match self {
            BodyKind::Dynamic { mass } => Some(mass),
            BodyKind::Static => None,
        }
    }
}

/// Collision shape, in body-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeDef {
    Circle { radius: f32 },

    /// Axis-aligned rectangle centered on the body origin.
    Rectangle { width: f32, height: f32 },

    /// Simple polygon, convex or star-shaped around its first vertex.
    ///
    /// The vertices are kept exactly as given (order and sign), whatever winding the
    /// solver ends up needing.
    Polygon { vertices: Vec<Point2<f32>> },
}

/// Canonical, schema-agnostic description of a body and its shapes.
///
/// Every shape of the body shares the same collision group, mask and material.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDef {
    /// World-space position of the body origin.
    pub position: Point2<f32>,
    pub kind: BodyKind,
    pub fixed_rotation: bool,
    pub shapes: Vec<ShapeDef>,
    pub group: CollisionGroup,
    pub mask: CollisionMask,
    pub material: Material,
    /// Rectangle sides that continue into a neighboring solid rectangle.
    pub seams: Seams,
}

impl BodyDef {
    /// A static wall body: group WALL, tested against PLAYER, WALL material.
    pub fn wall(position: Point2<f32>, shape: ShapeDef) -> Self {
        Self {
            position,
            kind: BodyKind::Static,
            fixed_rotation: false,
            shapes: vec![shape],
            group: CollisionGroup::Wall,
            mask: CollisionMask::PLAYER,
            material: Material::Wall,
            seams: Seams::default(),
        }
    }

    pub fn with_seams(mut self, seams: Seams) -> Self {
        self.seams = seams;
        self
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, BodyKind::Static)
    }

    fn interaction_groups(&self) -> InteractionGroups {
        InteractionGroups::all()
            .with_memberships(self.group.to_rapier())
            .with_filter(self.mask.to_rapier())
    }
}

/// Build the Rapier rigid-body for a `BodyDef`.
///
/// Dynamic bodies get their whole mass from `additional_mass`; their colliders are
/// massless, so the mass does not depend on shape area.
pub fn rigid_body_from_def(def: &BodyDef) -> RigidBody {
    let builder = match def.kind {
        BodyKind::Dynamic { mass } => RigidBodyBuilder::dynamic().additional_mass(mass),
        BodyKind::Static => RigidBodyBuilder::fixed(),
    };
    let builder = builder.translation(def.position.coords);

    if def.fixed_rotation {
        builder.lock_rotations().build()
    } else {
        builder.build()
    }
}

/// Build one Rapier collider per shape of a `BodyDef`.
pub fn colliders_from_def(def: &BodyDef) -> Result<Vec<Collider>, WorldError> {
    if def.shapes.is_empty() {
        return Err(WorldError::EmptyBody);
    }

    def.shapes
        .iter()
        .map(|shape| {
            let builder = collider_builder_from_shape(shape)?
                .collision_groups(def.interaction_groups())
                .user_data(collider_user_data(def.material, def.seams))
                .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS);
            let builder = if def.is_static() {
                builder
            } else {
                builder.density(0.0)
            };
            Ok(builder.build())
        })
        .collect()
}

fn collider_builder_from_shape(shape: &ShapeDef) -> Result<ColliderBuilder, WorldError> {
    match shape {
        ShapeDef::Circle { radius } => Ok(ColliderBuilder::ball(*radius)),

        ShapeDef::Rectangle { width, height } => {
            Ok(ColliderBuilder::cuboid(width * 0.5, height * 0.5))
        }

        ShapeDef::Polygon { vertices } => polygon_builder(vertices),
    }
}

/// Polygons are solved counter-clockwise. Convex ones become a single convex collider;
/// the others are split into a triangle fan around vertex 0 and attached as a compound.
fn polygon_builder(vertices: &[Point2<f32>]) -> Result<ColliderBuilder, WorldError> {
    let degenerate = || WorldError::DegeneratePolygon {
        vertices: vertices.len(),
    };

    if vertices.len() < 3 {
        return Err(degenerate());
    }

    let mut points = vertices.to_vec();
    let area2 = signed_area2(&points);
    if area2.abs() <= f32::EPSILON {
        return Err(degenerate());
    }
    if area2 < 0.0 {
        // Keep vertex 0 in place: it anchors the fan below.
        points[1..].reverse();
    }

    if is_convex(&points) {
        return ColliderBuilder::convex_polyline(points).ok_or_else(degenerate);
    }

    let parts: Vec<(Isometry<Real>, SharedShape)> = points[1..]
        .windows(2)
        .filter(|w| signed_area2(&[points[0], w[0], w[1]]).abs() > f32::EPSILON)
        .map(|w| {
            (
                Isometry::identity(),
                SharedShape::triangle(points[0], w[0], w[1]),
            )
        })
        .collect();

    if parts.is_empty() {
        return Err(degenerate());
    }

    Ok(ColliderBuilder::compound(parts))
}
