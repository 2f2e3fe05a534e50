use spacetimedb::{ScheduleAt, Timestamp};

/// Elapsed milliseconds between two timestamps, or `None` if `now` precedes `last`.
pub fn get_variable_delta_ms(now: Timestamp, last: Timestamp) -> Option<f32> {
    now.time_duration_since(last)
        .map(|dur| dur.to_micros() as f32 / 1_000.0)
}

/// Interval of a repeating schedule, in milliseconds.
pub fn get_fixed_delta_ms(scheduled_at: ScheduleAt) -> Option<f32> {
    match scheduled_at {
        ScheduleAt::Interval(dt) => Some(dt.to_micros() as f32 / 1_000.0),
        _ => None,
    }
}
