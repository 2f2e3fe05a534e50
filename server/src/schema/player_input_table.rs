use crate::types::DbVec2;
use spacetimedb::*;

/// Latest input snapshot of each connected player.
///
/// Written only by `set_input`, consumed by the tick. Bits of `buttons`:
/// 0 left, 1 right, 2 jump, 3 hook.
#[table(name = player_input)]
pub struct PlayerInput {
    #[primary_key]
    pub identity: Identity,

    pub buttons: u8,

    /// Unit aim direction in world space.
    pub aim: DbVec2,
}
