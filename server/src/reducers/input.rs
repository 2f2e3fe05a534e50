use crate::{schema::*, types::DbVec2};
use shared::{Button, FlagBitmask};
use spacetimedb::ReducerContext;

/// All bits a client may set in `buttons`.
fn button_mask() -> u8 {
    [Button::Left, Button::Right, Button::Jump, Button::Hook]
        .iter()
        .fold(0, |acc, button| acc | button.mask())
}

/// Store the caller's latest input snapshot. The next tick consumes it.
///
/// Errors:
/// - The caller has no connected player.
/// - `buttons` carries bits outside the input bit table.
/// - The aim direction is not finite.
#[spacetimedb::reducer]
pub fn set_input(ctx: &ReducerContext, buttons: u8, aim_x: f32, aim_y: f32) -> Result<(), String> {
    let Some(mut input) = ctx.db.player_input().identity().find(ctx.sender) else {
        return Err("Player not connected".to_string());
    };

    if buttons & !button_mask() != 0 {
        return Err(format!("Unknown input bits: {buttons:#010b}"));
    }
    if !aim_x.is_finite() || !aim_y.is_finite() {
        return Err("Aim direction must be finite".to_string());
    }

    input.buttons = buttons;
    input.aim = DbVec2::new(aim_x, aim_y);
    ctx.db.player_input().identity().update(input);
    Ok(())
}
