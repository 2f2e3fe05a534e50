//! Static collision geometry built from a tile map.
//!
//! Every non-empty cell becomes one static WALL body. Rounded tiles reuse two unit-space
//! templates, mirrored per corner and scaled by the tile size:
//!
//! - [`bomb_template`]: convex quarter-circle bulge around the template origin.
//! - [`curve_template`]: concave quarter-circle joint, the arc bowing toward the template origin.
//!
//! Both start `(0,0), (1,0)`, run three arc points and end on `(0,1)`; the closing edge
//! back to `(0,0)` is implicit.

use std::f32::consts::{FRAC_PI_2, PI};

use nalgebra::{Point2, Vector2};

use crate::{
    collision::{Seams, Side},
    error::WorldError,
    map::{Corner, Map, Tile},
    rapier::{BodyDef, BodyHandle, ShapeDef},
    rapier_world::WorldEngine,
};

/// Arc samples, as fractions of a quarter turn.
const ARC_FRACTIONS: [f32; 3] = [0.25, 0.5, 0.75];

/// Convex rounded-corner template.
pub fn bomb_template() -> [Point2<f32>; 6] {
    let arc = ARC_FRACTIONS.map(|f| {
        let theta = f * FRAC_PI_2;
        Point2::new(theta.cos(), theta.sin())
    });
    [
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        arc[0],
        arc[1],
        arc[2],
        Point2::new(0.0, 1.0),
    ]
}

/// Concave rounded-corner template.
pub fn curve_template() -> [Point2<f32>; 6] {
    let arc = ARC_FRACTIONS.map(|f| {
        let theta = PI + (1.0 - f) * FRAC_PI_2;
        Point2::new(1.0 + theta.cos(), 1.0 + theta.sin())
    });
    [
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        arc[0],
        arc[1],
        arc[2],
        Point2::new(0.0, 1.0),
    ]
}

impl Corner {
    /// Axis signs applied to template vertices (y grows downward).
    fn mirror(self) -> Vector2<f32> {
        match self {
            Corner::TopRight => Vector2::new(1.0, -1.0),
            Corner::BottomRight => Vector2::new(1.0, 1.0),
            Corner::BottomLeft => Vector2::new(-1.0, 1.0),
            Corner::TopLeft => Vector2::new(-1.0, -1.0),
        }
    }

    /// Offset from the cell center to the template origin, in half tiles.
    ///
    /// The origin lands on the cell corner opposite the rounded edge.
    fn anchor(self) -> Vector2<f32> {
        -self.mirror()
    }
}

/// Template vertices mirrored for `corner` and scaled to `tile_size`, in body-local space.
pub fn corner_vertices(
    template: &[Point2<f32>],
    corner: Corner,
    tile_size: Vector2<f32>,
) -> Vec<Point2<f32>> {
    let scale = corner.mirror().component_mul(&tile_size);
    template
        .iter()
        .map(|v| Point2::from(v.coords.component_mul(&scale)))
        .collect()
}

/// The static body for the tile at row-major `index`, or `None` for empty cells.
pub fn tile_body(tile: Tile, index: usize, map: &Map) -> Option<BodyDef> {
    let (x, y) = map.cell_coords(index);
    let center = map.cell_center(x, y);
    let tile_size = map.tile_size();

    let (template, corner) = match tile {
        Tile::Empty => return None,
        Tile::Block => {
            let def = BodyDef::wall(
                center,
                ShapeDef::Rectangle {
                    width: tile_size.x,
                    height: tile_size.y,
                },
            );
            return Some(def.with_seams(block_seams(map, x, y)));
        }
        Tile::Bomb(corner) => (bomb_template(), corner),
        Tile::Curve(corner) => (curve_template(), corner),
    };

    let position = center + corner.anchor().component_mul(&tile_size) * 0.5;
    Some(BodyDef::wall(
        position,
        ShapeDef::Polygon {
            vertices: corner_vertices(&template, corner, tile_size),
        },
    ))
}

/// Sides of the block at `(x, y)` shared with another block.
fn block_seams(map: &Map, x: u32, y: u32) -> Seams {
    let (x, y) = (i64::from(x), i64::from(y));
    let mut seams = Seams::default();
    for (side, dx, dy) in [
        (Side::Left, -1, 0),
        (Side::Right, 1, 0),
        (Side::Top, 0, -1),
        (Side::Bottom, 0, 1),
    ] {
        seams.set(side, matches!(map.get_tile(x + dx, y + dy), Ok(Tile::Block)));
    }
    seams
}

/// Add one static body per non-empty cell, in row-major order.
///
/// Segment casts see the geometry right away, before the first physics step.
pub fn build_map_geometry(
    map: &Map,
    world: &mut WorldEngine,
) -> Result<Vec<BodyHandle>, WorldError> {
    let mut handles = Vec::new();
    for (index, &code) in map.codes().iter().enumerate() {
        let Some(def) = tile_body(Tile::from_code(code), index, map) else {
            continue;
        };
        handles.push(world.add_body(&def)?);
    }
    world.sync_static_geometry();

    log::debug!(
        "built map geometry: {} bodies from {}x{} tiles",
        handles.len(),
        map.width(),
        map.height()
    );
    Ok(handles)
}
