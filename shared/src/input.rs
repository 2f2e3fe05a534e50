use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{bitmask_flags::BitmaskFlags, define_bitmask_flags, utils::normalize_or_zero};

// Wire bit table for the `buttons` field. Bit order is part of the transport contract.
define_bitmask_flags!(Button, u8, {
    Left,  // bit 0
    Right, // bit 1
    Jump,  // bit 2
    Hook,  // bit 3
});

/// Per-tick input as it travels from an input collaborator to a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub buttons: u8,
    /// Unit aim vector in world space, from the player toward the target.
    pub mouse_direction: [f32; 2],
}

/// Buttons decoded for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub hook_active: bool,
}

/// Latest known input of one player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controller {
    buttons: BitmaskFlags<u8>,
    aim: Vector2<f32>,
}

impl Controller {
    pub fn new(buttons: u8, aim: Vector2<f32>) -> Self {
        Self {
            buttons: BitmaskFlags::new(buttons),
            aim: normalize_or_zero(aim),
        }
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.add(button);
        self
    }

    pub fn with_aim(mut self, aim: Vector2<f32>) -> Self {
        self.aim = normalize_or_zero(aim);
        self
    }

    pub fn set(&mut self, button: Button, held: bool) {
        self.buttons.set(button, held);
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.buttons.has(button)
    }

    pub fn aim(&self) -> Vector2<f32> {
        self.aim
    }

    pub fn buttons(&self) -> u8 {
        self.buttons.bits()
    }

    pub fn state(&self) -> ButtonState {
        ButtonState {
            left: self.is_held(Button::Left),
            right: self.is_held(Button::Right),
            jump: self.is_held(Button::Jump),
            hook_active: self.is_held(Button::Hook),
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            buttons: self.buttons(),
            mouse_direction: [self.aim.x, self.aim.y],
        }
    }
}

impl From<InputSnapshot> for Controller {
    fn from(snapshot: InputSnapshot) -> Self {
        let [x, y] = snapshot.mouse_direction;
        Controller::new(snapshot.buttons, Vector2::new(x, y))
    }
}
