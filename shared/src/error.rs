use thiserror::Error;

/// Failures raised while loading or querying a tile map.
#[derive(Debug, Error)]
pub enum MapError {
    /// `data.len()` does not match `width * height`.
    #[error("invalid map data: expected {expected} tiles ({width}x{height}), got {actual}")]
    InvalidMapData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A tile coordinate outside `[0, width) x [0, height)`.
    #[error("tile ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// The map resource could not be retrieved or decoded.
    #[error("can't retrieve map data: {0}")]
    Load(#[from] MapLoadError),
}

/// Retrieval or parse failure of a map resource.
#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed map json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised when inserting bodies into the world engine.
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    /// A body definition without any shape.
    #[error("body has no shapes")]
    EmptyBody,

    /// A polygon shape with fewer than three vertices, or zero area.
    #[error("polygon with {vertices} vertices is degenerate")]
    DegeneratePolygon { vertices: usize },
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        MapError::Load(MapLoadError::Io(err))
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Load(MapLoadError::Json(err))
    }
}
