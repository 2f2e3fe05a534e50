//! Tile map resource.
//!
//! A map is a rectangular grid of tile codes stored row-major:
//!
//! | code | tile                                   |
//! |------|----------------------------------------|
//! | 0    | empty                                  |
//! | 1    | full block                             |
//! | 2-5  | rounded outer corner (TR, BR, BL, TL)  |
//! | 6-9  | rounded inner corner (TR, BR, BL, TL)  |

use std::{fs::File, io::Read, path::Path};

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Integer pair used by the map resource (`{ "x": .., "y": .. }`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub x: u32,
    pub y: u32,
}

/// On-disk / over-the-wire map resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub map_size: Size,
    pub tile_size: Size,
    pub data: Vec<u8>,
}

/// Which corner of the cell the rounded edge faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Block,
    /// Convex quarter-circle bulge.
    Bomb(Corner),
    /// Concave quarter-circle joint.
    Curve(Corner),
}

impl Tile {
    /// Decode a tile code. Codes above 9 carry no geometry and decode as `Empty`.
    pub fn from_code(code: u8) -> Self {
        const CORNERS: [Corner; 4] = [
            Corner::TopRight,
            Corner::BottomRight,
            Corner::BottomLeft,
            Corner::TopLeft,
        ];
        match code {
            0 => Tile::Empty,
            1 => Tile::Block,
            2..=5 => Tile::Bomb(CORNERS[usize::from(code - 2)]),
            6..=9 => Tile::Curve(CORNERS[usize::from(code - 6)]),
            other => {
                log::warn!("unknown tile code {other}, treating as empty");
                Tile::Empty
            }
        }
    }
}

/// A validated tile map.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    width: u32,
    height: u32,
    tile_width: f32,
    tile_height: f32,
    data: Vec<u8>,
}

impl Map {
    /// Validate a map resource. The tile array must hold exactly `width * height` codes.
    pub fn new(raw: MapData) -> Result<Self, MapError> {
        let MapData {
            map_size,
            tile_size,
            data,
        } = raw;

        let expected = map_size.x as usize * map_size.y as usize;
        if data.len() != expected {
            return Err(MapError::InvalidMapData {
                width: map_size.x,
                height: map_size.y,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width: map_size.x,
            height: map_size.y,
            tile_width: tile_size.x as f32,
            tile_height: tile_size.y as f32,
            data,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let raw: MapData = serde_json::from_str(json)?;
        Self::new(raw)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, MapError> {
        let raw: MapData = serde_json::from_reader(reader)?;
        Self::new(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let file = File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile size in world units (pixels).
    pub fn tile_size(&self) -> Vector2<f32> {
        Vector2::new(self.tile_width, self.tile_height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw tile codes, row-major.
    pub fn codes(&self) -> &[u8] {
        &self.data
    }

    /// Tile at grid coordinates. Coordinates outside the grid are an error, never clamped.
    pub fn get_tile(&self, x: i64, y: i64) -> Result<Tile, MapError> {
        let in_bounds = (0..i64::from(self.width)).contains(&x)
            && (0..i64::from(self.height)).contains(&y);
        if !in_bounds {
            return Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let index = y as usize * self.width as usize + x as usize;
        Ok(Tile::from_code(self.data[index]))
    }

    /// Grid coordinates of a row-major cell index.
    pub fn cell_coords(&self, index: usize) -> (u32, u32) {
        let width = self.width.max(1) as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// World-space center of a cell.
    pub fn cell_center(&self, x: u32, y: u32) -> Point2<f32> {
        Point2::new(
            self.tile_width * x as f32 + self.tile_width / 2.0,
            self.tile_height * y as f32 + self.tile_height / 2.0,
        )
    }

    /// World-space size of the whole map.
    pub fn pixel_size(&self) -> Vector2<f32> {
        Vector2::new(
            self.tile_width * self.width as f32,
            self.tile_height * self.height as f32,
        )
    }
}
