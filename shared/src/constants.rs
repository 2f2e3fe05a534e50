use std::f32::consts::FRAC_1_SQRT_2;

/// Gravity applied to every dynamic body, in simulation units (pixels) per second squared.
///
/// The world uses screen conventions: +X is right, +Y is down. A positive Y component
/// therefore pulls bodies toward the bottom of the map.
pub const GRAVITY: [f32; 2] = [0.0, 9.81];

/// Fixed physics sub-step duration in seconds.
pub const FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Contact solver iterations per physics sub-step.
pub const SOLVER_ITERATIONS: usize = 10;

/// Upper bound on fixed sub-steps consumed by a single `WorldEngine::step` call.
///
/// Elapsed time beyond this budget is dropped, so a long stall never turns into a
/// burst of catch-up steps.
pub const MAX_SUB_STEPS: u32 = 10;

/// Slack (seconds) when comparing accumulated time against the fixed step.
///
/// A tick of `1000.0 / 60.0` ms converted to seconds lands a few ulps under
/// `FIXED_TIME_STEP`; without this the sub-step would slip to the next tick.
pub const STEP_EPSILON: f32 = 1.0e-6;

/// Characteristic object size handed to the solver (pixels).
///
/// Rapier scales its internal tolerances by this value. The player radius is a good
/// order of magnitude for a pixel-space world.
pub const LENGTH_UNIT: f32 = 15.0;

/// Player body mass.
pub const PLAYER_MASS: f32 = 5.0;

/// Player collision circle radius (pixels).
pub const PLAYER_RADIUS: f32 = 15.0;

/// Horizontal acceleration while left or right is held (pixels / s²).
pub const MOVE_SPEED_ACCELERATION: f32 = 250.0;

/// Cap on horizontal speed reachable through movement input (pixels / s).
pub const MAX_SPEED: f32 = 50.0;

/// Vertical velocity assigned on a successful jump. Negative is up.
pub const JUMP_VELOCITY: f32 = -50.0;

/// Lower bound of the jump cone on the contact x-offset, as a fraction of the player radius.
///
/// Equals `cos(π + π/4)`.
pub const JUMP_RANGE_FROM: f32 = -FRAC_1_SQRT_2;

/// Upper bound of the jump cone on the contact x-offset, as a fraction of the player radius.
///
/// Equals `cos(π + 3π/4)`.
pub const JUMP_RANGE_TO: f32 = FRAC_1_SQRT_2;

/// Hook tip travel speed (pixels / s).
pub const HOOK_SPEED: f32 = 1750.0;

/// Distance from the player at which an unattached hook is recalled (pixels).
pub const HOOK_MAX_DISTANCE: f32 = 175.0;

/// Impulse magnitude applied toward the anchor every tick the hook stays attached.
pub const HOOK_FORCE: f32 = 35.0;

/// Friction between the `Player` and `Wall` materials.
pub const PLAYER_WALL_FRICTION: f32 = 0.75;

/// Restitution between the `Player` and `Wall` materials.
pub const PLAYER_WALL_RESTITUTION: f32 = 0.05;

/// Segments shorter than this are treated as degenerate by ray queries (pixels).
pub const SEGMENT_EPS: f32 = 1.0e-6;
