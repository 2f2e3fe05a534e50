/*!
Contact tolerances.

Distances are in simulation units (pixels).
*/

/// Largest separation at which a narrow-phase contact point still counts as touching.
///
/// Rapier keeps speculative contacts a little ahead of actual touching; those must not
/// grant a jump. Resting contacts sit at or slightly below zero separation.
pub const CONTACT_SEPARATION_TOLERANCE: f32 = 0.05;

/// How close a contact point must be to a rectangle corner to count as a corner contact.
pub const SEAM_CORNER_TOLERANCE: f32 = 0.01;
