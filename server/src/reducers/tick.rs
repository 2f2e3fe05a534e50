//! Tick reducer: authoritative simulation pipeline.
//!
//! Every tick
//! - measures elapsed time since the previous tick from timestamps (clamped),
//! - hands each connected player's latest `player_input` row to its controller,
//! - advances the live `GameSession` by one logic + physics tick,
//! - writes one `player_state` row per connected player for clients to replicate.
//!
//! All simulation state is read, advanced and written within this reducer.

use crate::{
    config::{MAX_TICK_DELTA_MS, TICK_RATE_HZ},
    schema::*,
    session::with_session,
    utils::{get_fixed_delta_ms, get_variable_delta_ms},
};
use shared::{Controller, InputSnapshot};
use spacetimedb::{ReducerContext, ScheduleAt, Table, TimeDuration, Timestamp};

/// Scheduled timer for the simulation tick.
///
/// Scheduled tables must include a `scheduled_id: u64` primary key with `#[auto_inc]`.
#[spacetimedb::table(name = tick_timer, scheduled(tick))]
pub struct TickTimer {
    /// Primary key for the scheduled job (single row used).
    #[primary_key]
    #[auto_inc]
    pub scheduled_id: u64,

    /// When/how often to invoke the scheduled reducer.
    pub scheduled_at: ScheduleAt,

    /// Timestamp of the previous invocation (authoritative delta time source).
    pub last_tick: Timestamp,
}

/// Schedule the simulation tick.
pub fn init(ctx: &ReducerContext) {
    let interval = TimeDuration::from_micros(1_000_000i64 / TICK_RATE_HZ);

    // Single-row scheduled job.
    ctx.db.tick_timer().scheduled_id().delete(1);
    ctx.db.tick_timer().insert(TickTimer {
        scheduled_id: 1,
        scheduled_at: ScheduleAt::Interval(interval),
        last_tick: ctx.timestamp,
    });
}

#[spacetimedb::reducer]
pub fn tick(ctx: &ReducerContext, mut timer: TickTimer) -> Result<(), String> {
    // Only the server (module identity) may invoke scheduled reducers.
    if ctx.sender != ctx.identity() {
        return Err("`tick` may not be invoked by clients.".into());
    }

    // Real elapsed time since the last tick; fall back to the scheduled cadence.
    let fixed_ms = get_fixed_delta_ms(timer.scheduled_at)
        .unwrap_or(1_000.0 / TICK_RATE_HZ as f32);
    let delta_ms = get_variable_delta_ms(ctx.timestamp, timer.last_tick)
        .unwrap_or(fixed_ms)
        .clamp(0.0, MAX_TICK_DELTA_MS);

    let states = with_session(ctx, |session| {
        for input in ctx.db.player_input().iter() {
            let Some(id) = session.player_id(input.identity) else {
                log::warn!("Input from {:?} without a session player", input.identity);
                continue;
            };
            let snapshot = InputSnapshot {
                buttons: input.buttons,
                mouse_direction: input.aim.into(),
            };
            session.game.set_controller(id, Controller::from(snapshot));
        }

        session.game.update(delta_ms);

        let tick = session.game.tick();
        session
            .game
            .authoritative_states()
            .into_iter()
            .filter_map(|state| {
                let identity = session.identity_of(state.id)?;
                Some(PlayerState {
                    identity,
                    player_id: state.id,
                    position: state.position.into(),
                    velocity: state.velocity.into(),
                    hook: state.hook.into(),
                    tick,
                })
            })
            .collect::<Vec<_>>()
    })?;

    for state in states {
        if ctx.db.player_state().identity().find(state.identity).is_some() {
            ctx.db.player_state().identity().update(state);
        } else {
            ctx.db.player_state().insert(state);
        }
    }

    // Persist timer state.
    timer.last_tick = ctx.timestamp;
    ctx.db.tick_timer().scheduled_id().update(timer);

    Ok(())
}
