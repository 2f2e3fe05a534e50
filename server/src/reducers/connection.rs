//! Connection lifecycle reducers.
//!
//! - On connect: mark the `Player` row online, spawn an authoritative body in the live
//!   session at the spawn point and reset the stored input.
//! - On disconnect: remove the body from the session and drop the input and replicated
//!   state rows. The `Player` row stays, offline.

use crate::{
    schema::*,
    session::{spawn_point, with_session},
    types::DbVec2,
};
use spacetimedb::{ReducerContext, Table};

/// Fired when a client connects to the module.
#[spacetimedb::reducer(client_connected)]
pub fn identity_connected(ctx: &ReducerContext) -> Result<(), String> {
    log::info!("Client connected: {:?}", ctx.sender);

    let identity = ctx.sender;
    let player_id = with_session(ctx, |session| session.join(identity, spawn_point()))??;

    let row = Player {
        identity,
        online: true,
        player_id: Some(player_id),
    };
    if ctx.db.player().identity().find(identity).is_some() {
        ctx.db.player().identity().update(row);
    } else {
        ctx.db.player().insert(row);
    }

    // Start from a neutral controller; stale input from a previous connection is dropped.
    ctx.db.player_input().identity().delete(identity);
    ctx.db.player_input().insert(PlayerInput {
        identity,
        buttons: 0,
        aim: DbVec2::ZERO,
    });

    log::debug!("Player {player_id} spawned for {identity:?}");
    Ok(())
}

/// Fired when a client disconnects from the module.
#[spacetimedb::reducer(client_disconnected)]
pub fn identity_disconnected(ctx: &ReducerContext) -> Result<(), String> {
    log::info!("Client disconnected: {:?}", ctx.sender);

    let identity = ctx.sender;
    if let Some(player_id) = with_session(ctx, |session| session.leave(identity))? {
        log::debug!("Player {player_id} removed for {identity:?}");
    }

    ctx.db.player_input().identity().delete(identity);
    ctx.db.player_state().identity().delete(identity);

    if let Some(player) = ctx.db.player().identity().find(identity) {
        ctx.db.player().identity().update(Player {
            online: false,
            player_id: None,
            ..player
        });
    }
    Ok(())
}
