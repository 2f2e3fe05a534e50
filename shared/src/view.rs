//! Read-only data handed to the draw and network collaborators.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{collision::CollisionGroup, hook::HookPhase, rapier::ShapeDef};

/// One body as the draw collaborator sees it: where it is, what it looks like,
/// and which group picks its color.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyView {
    pub position: Point2<f32>,
    pub group: CollisionGroup,
    pub shapes: Vec<ShapeDef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HookView {
    pub state: HookPhase,
    /// Tip position.
    pub position: [f32; 2],
    /// Anchor, set only while attached.
    pub hit: Option<[f32; 2]>,
    pub fired: bool,
    pub recalled: bool,
}

/// Per-tick state of one player, as carried server to clients.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: u32,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub hook: HookView,
}
