use crate::types::{DbHook, DbVec2};
use spacetimedb::*;

/// Authoritative per-tick state of each connected player, replicated to clients.
#[table(name = player_state, public)]
pub struct PlayerState {
    #[primary_key]
    pub identity: Identity,

    #[unique]
    pub player_id: u32,

    pub position: DbVec2,
    pub velocity: DbVec2,
    pub hook: DbHook,

    /// Session tick that produced this row.
    pub tick: u64,
}
