use spacetimedb::*;

/// One row per identity that ever connected.
///
/// `player_id` links the row to its body in the live session while the client is connected.
#[table(name = player, public)]
pub struct Player {
    #[primary_key]
    pub identity: Identity,

    #[index(btree)]
    pub online: bool,

    /// Session player id. None while offline.
    pub player_id: Option<u32>,
}
