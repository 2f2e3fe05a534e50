use nalgebra::{Point2, Vector2};

use crate::{
    collision::{CollisionGroup, CollisionMask, Material, Seams, has_jump_support},
    constants::{JUMP_VELOCITY, MAX_SPEED, MOVE_SPEED_ACCELERATION, PLAYER_MASS, PLAYER_RADIUS},
    hook::Hook,
    input::{ButtonState, Controller},
    rapier::{BodyDef, BodyHandle, BodyKind, ShapeDef},
    rapier_world::WorldEngine,
    view::PlayerState,
};

/// Session-local player identifier, assigned in registration order.
pub type PlayerId = u32;

/// Which copy of the simulation a player belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    /// Canonical copy advanced by the server on its fixed tick.
    Authoritative,
    /// Local copy advanced by a client every frame, never reconciled.
    Predicted,
}

#[derive(Clone, Debug)]
pub struct Player {
    authority: Authority,
    spawn: Point2<f32>,
    /// Set while the player's body lives in a world.
    body: Option<BodyHandle>,
    controller: Controller,
    hook: Hook,
    /// Hook button as seen on the previous update, for release detection.
    hook_was_active: bool,
}

impl Player {
    pub fn new(position: Point2<f32>, authority: Authority) -> Self {
        Self {
            authority,
            spawn: position,
            body: None,
            controller: Controller::default(),
            hook: Hook::default(),
            hook_was_active: false,
        }
    }

    /// Dynamic circle with fixed rotation, colliding with walls only.
    pub fn body_def(&self) -> BodyDef {
        BodyDef {
            position: self.spawn,
            kind: BodyKind::Dynamic { mass: PLAYER_MASS },
            fixed_rotation: true,
            shapes: vec![ShapeDef::Circle {
                radius: PLAYER_RADIUS,
            }],
            group: CollisionGroup::Player,
            mask: CollisionMask::WALL,
            material: Material::Player,
            seams: Seams::default(),
        }
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn is_authoritative(&self) -> bool {
        self.authority == Authority::Authoritative
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub(crate) fn attach(&mut self, handle: BodyHandle) {
        self.body = Some(handle);
    }

    pub(crate) fn detach(&mut self) -> Option<BodyHandle> {
        self.body.take()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Replace the latest known input. It is consumed by the next `update`.
    pub fn set_controller(&mut self, controller: Controller) {
        self.controller = controller;
    }

    pub fn hook(&self) -> &Hook {
        &self.hook
    }

    /// One logic tick: horizontal movement, jump, then hook.
    pub fn update(&mut self, world: &mut WorldEngine, delta_ms: f32) {
        let Some(handle) = self.body else {
            log::warn!("update on a player without a body");
            return;
        };
        let (Some(position), Some(mut velocity)) = (world.position(handle), world.velocity(handle))
        else {
            log::warn!("player body {handle:?} is not in the world");
            return;
        };
        let buttons = self.controller.state();

        velocity.x = apply_horizontal(velocity.x, buttons, delta_ms);
        if buttons.jump && has_jump_support(&world.contact_points(handle), PLAYER_RADIUS) {
            velocity.y = JUMP_VELOCITY;
        }
        world.set_velocity(handle, velocity);

        if buttons.hook_active {
            self.hook
                .fire(&*world, position, self.controller.aim(), delta_ms);
            if let Some(impulse) = self.hook.pull(position) {
                world.apply_impulse(handle, impulse);
            }
        } else if self.hook_was_active {
            self.hook.reset();
        }
        self.hook_was_active = buttons.hook_active;
    }

    pub fn state(&self, id: PlayerId, world: &WorldEngine) -> Option<PlayerState> {
        let handle = self.body?;
        let position = world.position(handle)?;
        let velocity = world.velocity(handle).unwrap_or_else(Vector2::zeros);
        Some(PlayerState {
            id,
            position: [position.x, position.y],
            velocity: [velocity.x, velocity.y],
            hook: self.hook.view(),
        })
    }
}

/// Horizontal velocity after one tick of left/right input.
///
/// Accelerates toward the held side, capped at `MAX_SPEED`. Both or neither held keeps
/// the current velocity: there is no deceleration.
pub fn apply_horizontal(velocity_x: f32, buttons: ButtonState, delta_ms: f32) -> f32 {
    let dv = MOVE_SPEED_ACCELERATION * (delta_ms.max(0.0) / 1000.0);
    match (buttons.left, buttons.right) {
        (true, false) if velocity_x > -MAX_SPEED => (velocity_x - dv).max(-MAX_SPEED),
        (false, true) if velocity_x < MAX_SPEED => (velocity_x + dv).min(MAX_SPEED),
        _ => velocity_x,
    }
}
