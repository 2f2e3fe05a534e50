mod config;
mod reducers {
    mod connection;
    pub mod input;
    pub(crate) mod tick;
}
pub mod schema;
mod session;
pub mod types;
mod utils;

use crate::schema::*;
use spacetimedb::*;

#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    let defaults = shared::SessionConfig::default();
    ctx.db.session_settings().id().delete(1);
    ctx.db.session_settings().insert(SessionSettings {
        id: 1,
        fixed_time_step: defaults.fixed_time_step,
        solver_iterations: defaults.solver_iterations as u32,
        max_sub_steps: defaults.max_sub_steps,
        gravity: types::DbVec2::new(defaults.gravity.x, defaults.gravity.y),
        tick_rate_hz: config::TICK_RATE_HZ as u32,
        spawn_point: config::SPAWN_POINT.into(),
    });

    if let Err(err) = session::with_session(ctx, |_| ()) {
        log::error!("Failed to build the game session: {err}");
    }
    reducers::tick::init(ctx);
}
