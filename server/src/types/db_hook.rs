use shared::{HookPhase, HookView};

use super::DbVec2;

/// Stored form of [`HookPhase`].
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbHookPhase {
    Idle,
    Firing,
    Attached,
    Recalled,
}

impl From<HookPhase> for DbHookPhase {
    fn from(phase: HookPhase) -> Self {
        match phase {
            HookPhase::Idle => DbHookPhase::Idle,
            HookPhase::Firing => DbHookPhase::Firing,
            HookPhase::Attached => DbHookPhase::Attached,
            HookPhase::Recalled => DbHookPhase::Recalled,
        }
    }
}

/// Hook line as clients draw it: tip, anchor and phase.
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq)]
pub struct DbHook {
    pub phase: DbHookPhase,
    pub tip: DbVec2,
    /// Set only while attached.
    pub hit: Option<DbVec2>,
}

impl From<HookView> for DbHook {
    fn from(view: HookView) -> Self {
        Self {
            phase: view.state.into(),
            tip: view.position.into(),
            hit: view.hit.map(DbVec2::from),
        }
    }
}
