pub mod bitmask_flags;
pub mod collision;
pub mod constants;
pub mod error;
pub mod game;
pub mod hook;
pub mod input;
pub mod map;
pub mod map_geometry;
pub mod player;
pub mod rapier;
pub mod rapier_world;
pub mod utils;
pub mod view;

pub use bitmask_flags::{BitmaskFlags, FlagBitmask};
pub use collision::{CollisionGroup, CollisionMask, ContactPoint, Material};
pub use error::{MapError, MapLoadError, WorldError};
pub use game::{GameSession, SessionConfig};
pub use hook::{Hook, HookPhase, HookState, SegmentCast};
pub use input::{Button, ButtonState, Controller, InputSnapshot};
pub use map::{Corner, Map, MapData, Tile};
pub use map_geometry::{bomb_template, build_map_geometry, curve_template, tile_body};
pub use player::{Authority, Player, PlayerId, apply_horizontal};
pub use rapier::{BodyDef, BodyHandle, BodyKind, ShapeDef};
pub use rapier_world::WorldEngine;
pub use view::{BodyView, HookView, PlayerState};
