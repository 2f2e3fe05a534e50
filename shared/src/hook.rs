//! Grappling hook.
//!
//! ```text
//!            press              ray hits WALL
//!   Idle ───────────► Firing ───────────────► Attached ──┐ pull every tick
//!    ▲                  │                        ▲       │
//!    │                  │ tip >= max distance    └───────┘
//!    │                  ▼
//!    └──── release ── Recalled        (release resets from any state)
//! ```
//!
//! The hook does not own the player; callers pass the player's current position in.
//! Raycasts go through [`SegmentCast`] so the state machine runs against any world.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::{
    collision::CollisionMask,
    constants::{HOOK_FORCE, HOOK_MAX_DISTANCE, HOOK_SPEED},
    utils::{direction_to, distance, normalize_or_zero},
    view::HookView,
};

/// Closest hit of a segment against shapes whose group is in `mask`.
///
/// Implementations must return `None` for a zero-length segment.
pub trait SegmentCast {
    fn cast_segment(
        &self,
        from: Point2<f32>,
        to: Point2<f32>,
        mask: CollisionMask,
    ) -> Option<Point2<f32>>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HookState {
    Idle,
    /// Tip travelling, raycasting each tick.
    Firing,
    /// Anchored on a wall at `hit`.
    Attached { hit: Point2<f32> },
    /// Travelled `max_distance` without hitting anything.
    Recalled,
}

/// Payload-free form of [`HookState`], for views and the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPhase {
    Idle,
    Firing,
    Attached,
    Recalled,
}

impl HookState {
    pub fn phase(&self) -> HookPhase {
        match self {
            HookState::Idle => HookPhase::Idle,
            HookState::Firing => HookPhase::Firing,
            HookState::Attached { .. } => HookPhase::Attached,
            HookState::Recalled => HookPhase::Recalled,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hook {
    state: HookState,
    /// Tip position; origin while idle.
    position: Point2<f32>,
    /// Unit travel direction; zero while idle.
    direction: Vector2<f32>,
    speed: f32,
    max_distance: f32,
    force: f32,
}

impl Default for Hook {
    fn default() -> Self {
        Self::new(HOOK_SPEED, HOOK_MAX_DISTANCE, HOOK_FORCE)
    }
}

impl Hook {
    pub fn new(speed: f32, max_distance: f32, force: f32) -> Self {
        Self {
            state: HookState::Idle,
            position: Point2::origin(),
            direction: Vector2::zeros(),
            speed,
            max_distance,
            force,
        }
    }

    pub fn state(&self) -> HookState {
        self.state
    }

    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn direction(&self) -> Vector2<f32> {
        self.direction
    }

    pub fn hit(&self) -> Option<Point2<f32>> {
        match self.state {
            HookState::Attached { hit } => Some(hit),
            _ => None,
        }
    }

    pub fn is_fired(&self) -> bool {
        self.state != HookState::Idle
    }

    pub fn is_recalled(&self) -> bool {
        self.state == HookState::Recalled
    }

    /// Advance the hook for one tick while the hook input is held.
    ///
    /// From `Idle` this launches the tip from `player_position` along `aim`, then
    /// extends it on the same tick. `Attached` and `Recalled` are terminal until
    /// [`reset`](Self::reset).
    pub fn fire(
        &mut self,
        world: &impl SegmentCast,
        player_position: Point2<f32>,
        aim: Vector2<f32>,
        delta_ms: f32,
    ) {
        match self.state {
            HookState::Attached { .. } | HookState::Recalled => return,
            HookState::Idle => {
                self.direction = normalize_or_zero(aim);
                self.position = player_position;
                self.state = HookState::Firing;
                log::trace!("hook fired toward {:?}", self.direction);
            }
            HookState::Firing => {}
        }

        let previous = self.position;
        self.position += self.direction * self.speed * (delta_ms / 1000.0);

        if let Some(hit) = world.cast_segment(previous, self.position, CollisionMask::WALL) {
            self.state = HookState::Attached { hit };
            log::trace!("hook attached at {hit:?}");
        } else if distance(player_position, self.position) >= self.max_distance {
            self.state = HookState::Recalled;
            log::trace!("hook recalled at {:?}", self.position);
        }
    }

    /// Impulse pulling the player toward the anchor, while attached.
    pub fn pull(&self, player_position: Point2<f32>) -> Option<Vector2<f32>> {
        let hit = self.hit()?;
        let direction = direction_to(player_position, hit).unwrap_or_else(Vector2::zeros);
        Some(direction * self.force)
    }

    /// Back to `Idle`, clearing every trace of the previous shot.
    pub fn reset(&mut self) {
        if self.state != HookState::Idle {
            log::trace!("hook reset from {:?}", self.state.phase());
        }
        self.state = HookState::Idle;
        self.position = Point2::origin();
        self.direction = Vector2::zeros();
    }

    pub fn view(&self) -> HookView {
        HookView {
            state: self.state.phase(),
            position: [self.position.x, self.position.y],
            hit: self.hit().map(|p| [p.x, p.y]),
            fired: self.is_fired(),
            recalled: self.is_recalled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open space: nothing to hit.
    struct Void;

    impl SegmentCast for Void {
        fn cast_segment(&self, _: Point2<f32>, _: Point2<f32>, _: CollisionMask) -> Option<Point2<f32>> {
            None
        }
    }

    /// A vertical wall at `x`, infinitely tall.
    struct WallAt {
        x: f32,
    }

    impl SegmentCast for WallAt {
        fn cast_segment(
            &self,
            from: Point2<f32>,
            to: Point2<f32>,
            mask: CollisionMask,
        ) -> Option<Point2<f32>> {
            assert_eq!(mask, CollisionMask::WALL);
            if (from - to).norm() == 0.0 || from.x > self.x || to.x < self.x {
                return None;
            }
            let t = (self.x - from.x) / (to.x - from.x);
            Some(from + (to - from) * t)
        }
    }

    fn right() -> Vector2<f32> {
        Vector2::new(1.0, 0.0)
    }

    /// Milliseconds of simulated time until the hook recalls, at a fixed step.
    fn time_to_recall(step_ms: f32) -> f32 {
        let mut hook = Hook::default();
        let mut elapsed = 0.0;
        while !hook.is_recalled() {
            hook.fire(&Void, Point2::origin(), right(), step_ms);
            elapsed += step_ms;
            assert!(elapsed < 1000.0, "hook never recalled");
        }
        elapsed
    }

    #[test]
    fn first_fire_launches_from_the_player() {
        let mut hook = Hook::default();
        hook.fire(&Void, Point2::new(10.0, 20.0), Vector2::new(0.0, -3.0), 10.0);

        assert_eq!(hook.state(), HookState::Firing);
        assert_eq!(hook.direction(), Vector2::new(0.0, -1.0));
        assert!((hook.position() - Point2::new(10.0, 2.5)).norm() < 1.0e-4);
        assert!(hook.is_fired());
    }

    #[test]
    fn recalls_after_max_distance_regardless_of_step() {
        for step_ms in [10.0, 1.0, 1000.0 / 60.0] {
            let t = time_to_recall(step_ms);
            assert!((95.0..=105.0 + step_ms).contains(&t), "step {step_ms}: {t} ms");
        }
    }

    #[test]
    fn attaches_where_the_ray_crosses_a_wall() {
        let mut hook = Hook::default();
        let wall = WallAt { x: 30.0 };
        hook.fire(&wall, Point2::new(0.0, 5.0), right(), 10.0);
        assert_eq!(hook.state(), HookState::Firing);

        hook.fire(&wall, Point2::new(0.0, 5.0), right(), 10.0);
        let hit = hook.hit().unwrap();
        assert!((hit - Point2::new(30.0, 5.0)).norm() < 1.0e-4);
        assert!(!hook.is_recalled());
    }

    #[test]
    fn attached_and_recalled_are_terminal_until_reset() {
        let mut hook = Hook::default();
        let wall = WallAt { x: 10.0 };
        hook.fire(&wall, Point2::origin(), right(), 10.0);
        let attached = hook.clone();
        hook.fire(&wall, Point2::origin(), right(), 10.0);
        assert_eq!(hook, attached);

        let mut hook = Hook::default();
        hook.fire(&Void, Point2::origin(), right(), 200.0);
        assert!(hook.is_recalled());
        let position = hook.position();
        hook.fire(&Void, Point2::origin(), right(), 200.0);
        assert_eq!(hook.position(), position);
    }

    #[test]
    fn pull_points_at_the_anchor_with_fixed_force() {
        let mut hook = Hook::default();
        assert_eq!(hook.pull(Point2::origin()), None);

        hook.fire(&WallAt { x: 10.0 }, Point2::origin(), right(), 10.0);
        let impulse = hook.pull(Point2::new(10.0, 10.0)).unwrap();
        assert!((impulse - Vector2::new(0.0, -HOOK_FORCE)).norm() < 1.0e-4);
    }

    #[test]
    fn reset_clears_everything() {
        let mut hook = Hook::default();
        hook.fire(&WallAt { x: 10.0 }, Point2::origin(), right(), 10.0);
        assert!(hook.hit().is_some());

        hook.reset();
        assert_eq!(hook.state(), HookState::Idle);
        assert_eq!(hook.hit(), None);
        assert_eq!(hook.position(), Point2::origin());
        assert_eq!(hook.direction(), Vector2::zeros());
        assert!(!hook.is_fired());
        assert!(!hook.is_recalled());
    }

    #[test]
    fn reset_during_firing_leaves_no_trace() {
        let mut hook = Hook::default();
        hook.fire(&Void, Point2::origin(), right(), 10.0);
        assert_eq!(hook.state(), HookState::Firing);

        hook.reset();
        assert_eq!(hook, Hook::default());

        // The next shot starts over from the player instead of the old tip.
        let wall = WallAt { x: 30.0 };
        hook.fire(&wall, Point2::origin(), right(), 10.0);
        assert!((hook.position() - Point2::new(17.5, 0.0)).norm() < 1.0e-4);
        assert_eq!(hook.state(), HookState::Firing);
        hook.fire(&wall, Point2::origin(), right(), 10.0);
        assert!((hook.hit().unwrap() - Point2::new(30.0, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn refire_after_reset_starts_fresh() {
        let mut hook = Hook::default();
        hook.fire(&Void, Point2::origin(), right(), 200.0);
        hook.reset();

        hook.fire(&Void, Point2::new(50.0, 50.0), Vector2::new(0.0, 1.0), 10.0);
        assert_eq!(hook.state(), HookState::Firing);
        assert!((hook.position() - Point2::new(50.0, 67.5)).norm() < 1.0e-4);
    }

    #[test]
    fn zero_aim_never_hits() {
        let mut hook = Hook::default();
        let wall = WallAt { x: 0.0 };
        hook.fire(&wall, Point2::origin(), Vector2::zeros(), 10.0);
        assert_eq!(hook.state(), HookState::Firing);
        assert_eq!(hook.position(), Point2::origin());
    }

    #[test]
    fn view_reports_flags() {
        let mut hook = Hook::default();
        hook.fire(&Void, Point2::origin(), right(), 200.0);
        let view = hook.view();
        assert_eq!(view.state, HookPhase::Recalled);
        assert!(view.fired && view.recalled);
        assert_eq!(view.hit, None);
    }
}
