use nalgebra::Vector2;

use crate::{
    collision::materials::default_contact_materials,
    constants::{FIXED_TIME_STEP, GRAVITY, MAX_SUB_STEPS, SOLVER_ITERATIONS},
    error::WorldError,
    input::Controller,
    map::Map,
    map_geometry::build_map_geometry,
    player::{Player, PlayerId},
    rapier::BodyHandle,
    rapier_world::WorldEngine,
    view::PlayerState,
};

/// Per-session simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Physics sub-step, in seconds.
    pub fixed_time_step: f32,
    pub solver_iterations: usize,
    pub max_sub_steps: u32,
    pub gravity: Vector2<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_time_step: FIXED_TIME_STEP,
            solver_iterations: SOLVER_ITERATIONS,
            max_sub_steps: MAX_SUB_STEPS,
            gravity: Vector2::new(GRAVITY[0], GRAVITY[1]),
        }
    }
}

/// One running simulation: a world, its map geometry and a roster of players.
///
/// A session is advanced by exactly one caller, either the server's fixed tick or a
/// client's frame loop.
pub struct GameSession {
    config: SessionConfig,
    world: WorldEngine,
    map: Map,
    map_bodies: Vec<BodyHandle>,
    /// Registration order.
    players: Vec<(PlayerId, Player)>,
    next_player_id: PlayerId,
    tick: u64,
}

impl GameSession {
    pub fn new(map: Map, config: SessionConfig) -> Result<Self, WorldError> {
        let mut world = WorldEngine::new(config.gravity, default_contact_materials())
            .with_max_sub_steps(config.max_sub_steps);
        let map_bodies = build_map_geometry(&map, &mut world)?;

        log::debug!(
            "session created: {}x{} map, {} static bodies",
            map.width(),
            map.height(),
            map_bodies.len()
        );

        Ok(Self {
            config,
            world,
            map,
            map_bodies,
            players: Vec::new(),
            next_player_id: 0,
            tick: 0,
        })
    }

    /// Register a player and put its body into the world.
    pub fn add_player(&mut self, mut player: Player) -> Result<PlayerId, WorldError> {
        let handle = self.world.add_body(&player.body_def())?;
        player.attach(handle);

        let id = self.next_player_id;
        self.next_player_id += 1;
        log::debug!("player {id} joined ({:?})", player.authority());
        self.players.push((id, player));
        Ok(id)
    }

    /// Unregister a player and take its body out of the world.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|(pid, _)| *pid == id)?;
        let (_, mut player) = self.players.remove(index);
        if let Some(handle) = player.detach() {
            self.world.remove_body(handle);
        }
        log::debug!("player {id} left");
        Some(player)
    }

    /// Store the latest input of a player. Returns false for unknown players.
    pub fn set_controller(&mut self, id: PlayerId, controller: Controller) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.set_controller(controller);
                true
            }
            None => false,
        }
    }

    /// One tick: every player's logic in registration order, then one physics step.
    pub fn update(&mut self, delta_ms: f32) {
        for (_, player) in &mut self.players {
            player.update(&mut self.world, delta_ms);
        }
        self.world.step(
            self.config.fixed_time_step,
            delta_ms,
            self.config.solver_iterations,
        );
        self.tick += 1;
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p)
    }

    /// Players in registration order.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().map(|(id, p)| (*id, p))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// State of every player, for a local view.
    pub fn player_states(&self) -> Vec<PlayerState> {
        self.players
            .iter()
            .filter_map(|(id, p)| p.state(*id, &self.world))
            .collect()
    }

    /// State of authoritative players only, as sent to clients.
    pub fn authoritative_states(&self) -> Vec<PlayerState> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_authoritative())
            .filter_map(|(id, p)| p.state(*id, &self.world))
            .collect()
    }

    pub fn world(&self) -> &WorldEngine {
        &self.world
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_bodies(&self) -> &[BodyHandle] {
        &self.map_bodies
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of completed `update` calls.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
