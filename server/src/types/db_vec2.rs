use nalgebra::{Point2, Vector2};

/// A 2D vector in world space (pixels, y down).
///
/// Data type only; math happens on the `nalgebra` side.
#[derive(spacetimedb::SpacetimeType, Debug, Default, Clone, Copy, PartialEq)]
pub struct DbVec2 {
    pub x: f32,
    pub y: f32,
}

impl DbVec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for DbVec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<DbVec2> for [f32; 2] {
    fn from(v: DbVec2) -> Self {
        [v.x, v.y]
    }
}

impl From<DbVec2> for Point2<f32> {
    fn from(v: DbVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<DbVec2> for Vector2<f32> {
    fn from(v: DbVec2) -> Self {
        Self::new(v.x, v.y)
    }
}
