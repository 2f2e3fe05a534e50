//! Rapier-based world engine shared by the authoritative server and predicting clients.
//!
//! Wraps a rapier2d physics world: gravity, contact materials, bitmask collision filtering
//! and a fixed-step solver. Bodies go in and out only through [`WorldEngine::add_body`]
//! and [`WorldEngine::remove_body`].
//!
//! Design goals
//! - Deterministic: fixed sub-steps, insertion-ordered body registry, no hash iteration.
//! - Single owner: one caller advances one world; nothing here is shared across threads.

// Re-export Rapier so downstream crates can reach its types without depending on
// `rapier2d` directly.
pub use rapier2d;

use nalgebra::{Point2, Vector2};
use rapier2d::prelude::*;

use crate::{
    collision::{
        CollisionMask, ContactMaterials, ContactPoint, materials::default_contact_materials,
        settings::CONTACT_SEPARATION_TOLERANCE,
    },
    constants::{
        FIXED_TIME_STEP, GRAVITY, LENGTH_UNIT, MAX_SUB_STEPS, SEGMENT_EPS, SOLVER_ITERATIONS,
        STEP_EPSILON,
    },
    error::WorldError,
    hook::SegmentCast,
    rapier::{BodyDef, BodyHandle, colliders_from_def, rigid_body_from_def},
    view::BodyView,
};

/// One registered body and the definition it was built from.
struct BodyRecord {
    handle: BodyHandle,
    def: BodyDef,
}

pub struct WorldEngine {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    /// Collision detection only; syncs query structures with freshly inserted statics.
    collision_pipeline: CollisionPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    materials: ContactMaterials,
    /// Insertion-ordered registry; drives `body_views` and mass lookups.
    registry: Vec<BodyRecord>,
    /// Elapsed time (seconds) not yet consumed by fixed sub-steps.
    accumulator: f32,
    max_sub_steps: u32,
}

impl Default for WorldEngine {
    fn default() -> Self {
        Self::new(Vector2::new(GRAVITY[0], GRAVITY[1]), default_contact_materials())
    }
}

impl WorldEngine {
    pub fn new(gravity: Vector2<f32>, materials: ContactMaterials) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: FIXED_TIME_STEP,
            length_unit: LENGTH_UNIT,
            num_solver_iterations: SOLVER_ITERATIONS.max(1),
            ..IntegrationParameters::default()
        };

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            collision_pipeline: CollisionPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            materials,
            registry: Vec::new(),
            accumulator: 0.0,
            max_sub_steps: MAX_SUB_STEPS,
        }
    }

    pub fn with_max_sub_steps(mut self, max_sub_steps: u32) -> Self {
        self.max_sub_steps = max_sub_steps.max(1);
        self
    }

    /// Insert a body and its shapes.
    ///
    /// Fails without touching the world if any shape cannot be built.
    pub fn add_body(&mut self, def: &BodyDef) -> Result<BodyHandle, WorldError> {
        let colliders = colliders_from_def(def)?;

        let rb_handle = self.bodies.insert(rigid_body_from_def(def));
        for collider in colliders {
            self.colliders
                .insert_with_parent(collider, rb_handle, &mut self.bodies);
        }

        let handle = BodyHandle(rb_handle);
        self.registry.push(BodyRecord {
            handle,
            def: def.clone(),
        });
        log::debug!(
            "add_body {:?}: {:?} at ({}, {})",
            handle,
            def.group,
            def.position.x,
            def.position.y
        );
        Ok(handle)
    }

    /// Remove a body and its attached shapes. Returns false if it was not registered.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(index) = self.registry.iter().position(|r| r.handle == handle) else {
            return false;
        };
        self.registry.remove(index);
        self.bodies.remove(
            handle.0,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        log::debug!("remove_body {:?}", handle);
        true
    }

    /// Run collision detection once so queries see static bodies added since the last step.
    ///
    /// Only runs while the world holds static bodies alone: a dynamic body must reach the
    /// physics pipeline first or it never joins the active set. Returns whether it ran.
    pub fn sync_static_geometry(&mut self) -> bool {
        if self.registry.iter().any(|r| !r.def.is_static()) {
            log::debug!("sync_static_geometry skipped: dynamic bodies present");
            return false;
        }

        // Rapier 0.31: step(prediction_distance, broad_phase, narrow_phase, bodies, colliders, hooks, events)
        self.collision_pipeline.step(
            0.0,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &self.materials,
            &(),
        );
        true
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    pub fn body_count(&self) -> usize {
        self.registry.len()
    }

    /// Advance the simulation.
    ///
    /// `elapsed_ms` is accumulated and consumed in sub-steps of `fixed_time_step` seconds,
    /// at most `max_sub_steps` per call; anything beyond that budget is dropped. Each
    /// sub-step resolves contacts with `solver_iterations` iterations.
    ///
    /// Returns the number of sub-steps taken.
    pub fn step(&mut self, fixed_time_step: f32, elapsed_ms: f32, solver_iterations: usize) -> u32 {
        if fixed_time_step <= 0.0 {
            return 0;
        }

        self.integration_parameters.dt = fixed_time_step;
        self.integration_parameters.num_solver_iterations = solver_iterations.max(1);
        self.accumulator += elapsed_ms.max(0.0) / 1000.0;

        let mut sub_steps = 0;
        while self.accumulator + STEP_EPSILON >= fixed_time_step {
            if sub_steps == self.max_sub_steps {
                self.accumulator %= fixed_time_step;
                break;
            }
            self.physics_pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.island_manager,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                &self.materials,
                &(),
            );
            self.accumulator = (self.accumulator - fixed_time_step).max(0.0);
            sub_steps += 1;
        }

        sub_steps
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Point2<f32>> {
        self.bodies
            .get(handle.0)
            .map(|rb| Point2::from(*rb.translation()))
    }

    pub fn velocity(&self, handle: BodyHandle) -> Option<Vector2<f32>> {
        self.bodies.get(handle.0).map(|rb| *rb.linvel())
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vector2<f32>) {
        if let Some(rb) = self.bodies.get_mut(handle.0) {
            rb.set_linvel(velocity, true);
        }
    }

    /// Apply an instantaneous impulse: the velocity changes by `impulse / mass`.
    ///
    /// Static bodies ignore impulses. The mass is the one declared in the body definition,
    /// so the result does not wait for the solver to refresh mass properties.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vector2<f32>) {
        let Some(mass) = self
            .registry
            .iter()
            .find(|r| r.handle == handle)
            .and_then(|r| r.def.kind.mass())
        else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(handle.0) {
            let velocity = *rb.linvel() + impulse / mass;
            rb.set_linvel(velocity, true);
        }
    }

    /// Live contact points involving `handle`, as computed by the last physics sub-step.
    ///
    /// Offsets are relative to the body origin in world orientation. Only touching
    /// points are reported, not speculative ones ahead of contact.
    pub fn contact_points(&self, handle: BodyHandle) -> Vec<ContactPoint> {
        let Some(rb) = self.bodies.get(handle.0) else {
            return Vec::new();
        };
        let origin = Point2::from(*rb.translation());

        let mut points = Vec::new();
        for &collider in rb.colliders() {
            for pair in self.narrow_phase.contact_pairs_with(collider) {
                let (own, other) = if pair.collider1 == collider {
                    (pair.collider1, pair.collider2)
                } else {
                    (pair.collider2, pair.collider1)
                };
                let Some(own_pose) = self.colliders.get(own).map(|c| *c.position()) else {
                    continue;
                };
                let other_body = self
                    .colliders
                    .get(other)
                    .and_then(|c| c.parent())
                    .map(BodyHandle);

                for manifold in &pair.manifolds {
                    for contact in &manifold.points {
                        let local = if own == pair.collider1 {
                            contact.local_p1
                        } else {
                            contact.local_p2
                        };
                        points.push(ContactPoint {
                            offset: own_pose * local - origin,
                            separation: contact.dist,
                            other: other_body,
                        });
                    }
                }
            }
        }

        points.retain(|p| p.separation <= CONTACT_SEPARATION_TOLERANCE);
        points
    }

    /// Closest intersection of the segment `from -> to` with shapes whose group is in `mask`.
    ///
    /// A zero-length segment never hits. The cast goes through the broad phase, so bodies
    /// added since the last step are visible only after [`Self::sync_static_geometry`].
    pub fn cast_segment(
        &self,
        from: Point2<f32>,
        to: Point2<f32>,
        mask: CollisionMask,
    ) -> Option<Point2<f32>> {
        let delta = to - from;
        if delta.norm() <= SEGMENT_EPS {
            return None;
        }

        let ray = Ray::new(from, delta);
        let filter =
            QueryFilter::new().groups(InteractionGroups::all().with_filter(mask.to_rapier()));
        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );
        query_pipeline
            .cast_ray(&ray, 1.0, true)
            .map(|(_, toi)| ray.point_at(toi))
    }

    /// Drawable description of every body, in insertion order.
    pub fn body_views(&self) -> Vec<BodyView> {
        self.registry
            .iter()
            .filter_map(|record| {
                let position = self.position(record.handle)?;
                Some(BodyView {
                    position,
                    group: record.def.group,
                    shapes: record.def.shapes.clone(),
                })
            })
            .collect()
    }
}

impl SegmentCast for WorldEngine {
    fn cast_segment(
        &self,
        from: Point2<f32>,
        to: Point2<f32>,
        mask: CollisionMask,
    ) -> Option<Point2<f32>> {
        WorldEngine::cast_segment(self, from, to, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collision::{CollisionGroup, Material, Seams},
        constants::{PLAYER_MASS, PLAYER_RADIUS},
        rapier::{BodyKind, ShapeDef},
    };

    fn player_def(x: f32, y: f32) -> BodyDef {
        BodyDef {
            position: Point2::new(x, y),
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

    fn block(x: f32, y: f32) -> BodyDef {
        BodyDef::wall(
            Point2::new(x, y),
            ShapeDef::Rectangle {
                width: 50.0,
                height: 50.0,
            },
        )
    }

    const TICK_MS: f32 = 1000.0 / 60.0;

    #[test]
    fn add_and_remove_body() {
        let mut world = WorldEngine::default();
        let handle = world.add_body(&block(25.0, 25.0)).unwrap();
        assert!(world.contains(handle));
        assert_eq!(world.body_count(), 1);

        assert!(world.remove_body(handle));
        assert!(!world.contains(handle));
        assert!(!world.remove_body(handle));
        assert!(world.body_views().is_empty());
    }

    #[test]
    fn step_consumes_whole_fixed_steps_and_carries_remainder() {
        let mut world = WorldEngine::default();
        assert_eq!(world.step(FIXED_TIME_STEP, TICK_MS, 10), 1);
        assert_eq!(world.step(FIXED_TIME_STEP, TICK_MS * 0.5, 10), 0);
        assert_eq!(world.step(FIXED_TIME_STEP, TICK_MS * 0.5, 10), 1);
        assert_eq!(world.step(FIXED_TIME_STEP, TICK_MS * 3.0, 10), 3);
    }

    #[test]
    fn step_caps_sub_steps_and_drops_backlog() {
        let mut world = WorldEngine::default().with_max_sub_steps(4);
        assert_eq!(world.step(FIXED_TIME_STEP, 1000.0, 10), 4);
        assert_eq!(world.step(FIXED_TIME_STEP, 0.0, 10), 0);
    }

    #[test]
    fn gravity_pulls_dynamic_bodies_down_and_leaves_static_ones() {
        let mut world = WorldEngine::default();
        let player = world.add_body(&player_def(100.0, 100.0)).unwrap();
        let wall = world.add_body(&block(500.0, 500.0)).unwrap();

        for _ in 0..60 {
            world.step(FIXED_TIME_STEP, TICK_MS, 10);
        }

        assert!(world.velocity(player).unwrap().y > 9.0);
        assert!(world.position(player).unwrap().y > 100.0);
        assert_eq!(world.position(wall), Some(Point2::new(500.0, 500.0)));
    }

    #[test]
    fn impulse_changes_velocity_by_impulse_over_mass() {
        let mut world = WorldEngine::default();
        let player = world.add_body(&player_def(0.0, 0.0)).unwrap();
        world.apply_impulse(player, Vector2::new(35.0, 0.0));
        let v = world.velocity(player).unwrap();
        assert!((v.x - 35.0 / PLAYER_MASS).abs() < 1.0e-5);

        let wall = world.add_body(&block(500.0, 500.0)).unwrap();
        world.apply_impulse(wall, Vector2::new(35.0, 0.0));
        assert_eq!(world.velocity(wall), Some(Vector2::zeros()));
    }

    #[test]
    fn segment_cast_hits_walls_once_statics_are_synced() {
        let mut world = WorldEngine::default();
        world.add_body(&block(125.0, 25.0)).unwrap();
        assert!(world.sync_static_geometry());

        let hit = world
            .cast_segment(Point2::new(0.0, 25.0), Point2::new(200.0, 25.0), CollisionMask::WALL)
            .unwrap();
        assert!((hit.x - 100.0).abs() < 1.0e-3);
        assert!((hit.y - 25.0).abs() < 1.0e-3);
    }

    #[test]
    fn segment_cast_ignores_players_and_short_segments() {
        let mut world = WorldEngine::default();
        world.add_body(&block(300.0, 25.0)).unwrap();
        world.sync_static_geometry();
        world.add_body(&player_def(100.0, 25.0)).unwrap();
        world.step(FIXED_TIME_STEP, TICK_MS, 10);

        let from = Point2::new(0.0, 25.0);
        assert!(world
            .cast_segment(from, Point2::new(200.0, 25.0), CollisionMask::WALL)
            .is_none());
        assert!(world
            .cast_segment(from, Point2::new(400.0, 25.0), CollisionMask::WALL)
            .is_some());
        assert!(world.cast_segment(from, from, CollisionMask::WALL).is_none());
    }

    #[test]
    fn sync_is_refused_once_a_dynamic_body_exists() {
        let mut world = WorldEngine::default();
        let player = world.add_body(&player_def(100.0, 100.0)).unwrap();
        assert!(!world.sync_static_geometry());

        // The player still falls: it reached the physics pipeline untouched.
        world.step(FIXED_TIME_STEP, TICK_MS, 10);
        assert!(world.velocity(player).unwrap().y > 0.0);
    }

    #[test]
    fn resting_player_reports_contact_below() {
        let mut world = WorldEngine::default();
        // Block spans y in [50, 100]; the circle bottom touches y = 50.
        world.add_body(&block(25.0, 75.0)).unwrap();
        let player = world.add_body(&player_def(25.0, 35.0)).unwrap();

        world.step(FIXED_TIME_STEP, TICK_MS, 10);

        let contacts = world.contact_points(player);
        assert!(!contacts.is_empty());
        assert!(contacts.iter().all(|c| c.offset.y > 14.0));
        assert!(contacts.iter().all(|c| c.offset.x.abs() < 1.0));
    }

    #[test]
    fn body_views_follow_insertion_order() {
        let mut world = WorldEngine::default();
        world.add_body(&block(25.0, 25.0)).unwrap();
        world.add_body(&player_def(100.0, 100.0)).unwrap();

        let views = world.body_views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].group, CollisionGroup::Wall);
        assert_eq!(views[1].group, CollisionGroup::Player);
    }
}
