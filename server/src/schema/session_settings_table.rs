use crate::types::DbVec2;
use spacetimedb::*;

/// Simulation settings shared by the server and predicting clients.
///
/// Single row (`id = 1`). Clients read it to build a local session that steps the same
/// way the authoritative one does.
#[table(name = session_settings, public)]
pub struct SessionSettings {
    /// Unique id (primary key). Use a single row with `id = 1`.
    #[primary_key]
    pub id: u32,

    /// Physics sub-step (seconds).
    pub fixed_time_step: f32,

    pub solver_iterations: u32,
    pub max_sub_steps: u32,

    /// Gravity (pixels / s², y down).
    pub gravity: DbVec2,

    /// Authoritative tick frequency (Hz).
    pub tick_rate_hz: u32,

    /// Where new players appear (pixels).
    pub spawn_point: DbVec2,
}
