//! Server-side tunables.
//!
//! Simulation constants live in `shared::constants`; this module only holds what the
//! hosting module decides: tick cadence, spawn point and which map is loaded.

/// Authoritative tick frequency (Hz).
pub const TICK_RATE_HZ: i64 = 60;

/// Largest elapsed time (milliseconds) fed into a single tick.
///
/// A stalled host resumes with one bounded step instead of a burst of catch-up work.
pub const MAX_TICK_DELTA_MS: f32 = 100.0;

/// Where every joining player's body is created (pixels).
pub const SPAWN_POINT: [f32; 2] = [100.0, 100.0];

/// Map resource the session is built from, embedded at compile time.
pub const MAP_JSON: &str = include_str!("../../assets/maps/map1.json");
