//! Jump-surface detection.
//!
//! A player may jump when one of its live contact points lies inside a cone around
//! straight down. The cone is expressed on the contact's x-offset from the body origin,
//! `[cos(π + π/4), cos(π + 3π/4)] * radius`, and the point must sit below the origin
//! (positive y, since y grows downward).
//!
//! Support is never cached: callers re-derive it from the current contact set every tick,
//! so leaving a surface drops jump ability immediately.

use super::{settings::CONTACT_SEPARATION_TOLERANCE, types::ContactPoint};
use crate::constants::{JUMP_RANGE_FROM, JUMP_RANGE_TO};

/// Whether a single contact offset qualifies as jump support for a circle of `radius`.
#[inline]
pub fn is_jump_contact(contact: &ContactPoint, radius: f32) -> bool {
    let x = contact.offset.x;
    contact.separation <= CONTACT_SEPARATION_TOLERANCE
        && x >= JUMP_RANGE_FROM * radius
        && x <= JUMP_RANGE_TO * radius
        && contact.offset.y > 0.0
}

/// Whether any of the given contacts qualifies as jump support.
pub fn has_jump_support<'a>(
    contacts: impl IntoIterator<Item = &'a ContactPoint>,
    radius: f32,
) -> bool {
    contacts.into_iter().any(|c| is_jump_contact(c, radius))
}
