//! Live game session cache.
//!
//! The authoritative `GameSession` (rapier world, map geometry, players) lives in module
//! memory, next to the mapping from connected identities to session player ids.
//!
//! - Built lazily on first use from the embedded map.
//! - A rebuilt session (fresh module instance) re-adds every online player at its last
//!   replicated position, so ids are reassigned and written back to the `player` rows.
//! - Only reducers touch it, one at a time; the `RefCell` is never borrowed re-entrantly.

use std::cell::RefCell;

use crate::{
    config::{MAP_JSON, SPAWN_POINT},
    schema::{player, player_state, Player},
};
use nalgebra::Point2;
use shared::{Authority, GameSession, Map, PlayerId, SessionConfig};
use spacetimedb::{Identity, ReducerContext, Table};

pub struct LiveSession {
    pub game: GameSession,
    /// Connected identities, in join order.
    identities: Vec<(Identity, PlayerId)>,
}

thread_local! {
    static SESSION: RefCell<Option<LiveSession>> = const { RefCell::new(None) };
}

/// Run `f` against the live session, building it first if needed.
pub fn with_session<R>(
    ctx: &ReducerContext,
    f: impl FnOnce(&mut LiveSession) -> R,
) -> Result<R, String> {
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(build_session(ctx)?);
        }
        let Some(session) = slot.as_mut() else {
            return Err("session cache is empty".to_string());
        };
        Ok(f(session))
    })
}

pub fn spawn_point() -> Point2<f32> {
    Point2::new(SPAWN_POINT[0], SPAWN_POINT[1])
}

fn build_session(ctx: &ReducerContext) -> Result<LiveSession, String> {
    let map = Map::from_json(MAP_JSON).map_err(|e| e.to_string())?;
    let game = GameSession::new(map, SessionConfig::default()).map_err(|e| e.to_string())?;
    let mut session = LiveSession {
        game,
        identities: Vec::new(),
    };

    let online: Vec<Player> = ctx.db.player().online().filter(true).collect();
    for row in online {
        let position = ctx
            .db
            .player_state()
            .identity()
            .find(row.identity)
            .map(|state| Point2::from(state.position))
            .unwrap_or_else(spawn_point);
        // Stale rows carry ids from the previous session; the next tick rewrites them.
        ctx.db.player_state().identity().delete(row.identity);

        let id = session.join(row.identity, position)?;
        ctx.db.player().identity().update(Player {
            player_id: Some(id),
            ..row
        });
    }

    log::info!(
        "Session built: {} static bodies, {} players restored",
        session.game.map_bodies().len(),
        session.identities.len()
    );
    Ok(session)
}

impl LiveSession {
    /// Add an authoritative player for `identity`. Joining twice returns the existing id.
    pub fn join(&mut self, identity: Identity, position: Point2<f32>) -> Result<PlayerId, String> {
        if let Some(id) = self.player_id(identity) {
            return Ok(id);
        }
        let id = self
            .game
            .add_player(shared::Player::new(position, Authority::Authoritative))
            .map_err(|e| e.to_string())?;
        self.identities.push((identity, id));
        Ok(id)
    }

    /// Remove the player of `identity` from the session.
    pub fn leave(&mut self, identity: Identity) -> Option<PlayerId> {
        let index = self.identities.iter().position(|(i, _)| *i == identity)?;
        let (_, id) = self.identities.remove(index);
        self.game.remove_player(id);
        Some(id)
    }

    pub fn player_id(&self, identity: Identity) -> Option<PlayerId> {
        self.identities
            .iter()
            .find(|(i, _)| *i == identity)
            .map(|(_, id)| *id)
    }

    pub fn identity_of(&self, id: PlayerId) -> Option<Identity> {
        self.identities
            .iter()
            .find(|(_, pid)| *pid == id)
            .map(|(i, _)| *i)
    }
}
