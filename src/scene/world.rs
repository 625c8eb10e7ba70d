//! rapier2d glue: the physics world behind one maze scene.
//!
//! Everything here is thin translation between our specs/labels and the
//! engine's primitives: fixed cuboids for borders, walls and the goal, one
//! dynamic ball with CCD, collision-started events surfaced as label pairs.

use std::collections::HashMap;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::prelude::*;

use super::layout::MazeLayout;
use super::BodyLabel;
use crate::consts::{BALL_DAMPING, GRAVITY_Y, STEER_DELTA};
use crate::maze::Direction;

/// Collects collision events raised during a pipeline step
#[derive(Default)]
struct CollisionChannel {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionChannel {
    /// Drain buffered events into label pairs, keeping only contact starts
    fn drain(&self, labels: &HashMap<ColliderHandle, BodyLabel>) -> Vec<(BodyLabel, BodyLabel)> {
        let mut pairs = Vec::new();
        if let Ok(mut events) = self.events.lock() {
            for event in events.drain(..) {
                if let CollisionEvent::Started(a, b, _) = event {
                    if let (Some(&label_a), Some(&label_b)) = (labels.get(&a), labels.get(&b)) {
                        pairs.push((label_a, label_b));
                    }
                }
            }
        }
        pairs
    }
}

impl EventHandler for CollisionChannel {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// The physics world for one maze run
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    events: CollisionChannel,
    labels: HashMap<ColliderHandle, BodyLabel>,
    ball: RigidBodyHandle,
    walls: Vec<RigidBodyHandle>,
}

impl PhysicsWorld {
    /// Build the world from a layout. Gravity starts neutral; it only points
    /// down once the goal is reached.
    pub fn new(layout: &MazeLayout) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut labels = HashMap::new();
        let mut walls = Vec::new();

        for wall in &layout.walls {
            let body = RigidBodyBuilder::fixed()
                .translation(vector![wall.center.x, wall.center.y])
                .build();
            let handle = bodies.insert(body);
            let collider = ColliderBuilder::cuboid(wall.half_extents.x, wall.half_extents.y)
                .friction(0.4)
                .build();
            let collider_handle = colliders.insert_with_parent(collider, handle, &mut bodies);
            labels.insert(collider_handle, wall.label);
            if wall.label == BodyLabel::Wall {
                walls.push(handle);
            }
        }

        let goal_body = RigidBodyBuilder::fixed()
            .translation(vector![layout.goal.center.x, layout.goal.center.y])
            .build();
        let goal_handle = bodies.insert(goal_body);
        let goal_collider =
            ColliderBuilder::cuboid(layout.goal.half_extents.x, layout.goal.half_extents.y)
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .build();
        labels.insert(
            colliders.insert_with_parent(goal_collider, goal_handle, &mut bodies),
            BodyLabel::Goal,
        );

        let ball_body = RigidBodyBuilder::dynamic()
            .translation(vector![layout.ball.center.x, layout.ball.center.y])
            .linear_damping(BALL_DAMPING)
            .ccd_enabled(true)
            .build();
        let ball = bodies.insert(ball_body);
        let ball_collider = ColliderBuilder::ball(layout.ball.radius)
            .restitution(0.4)
            .friction(0.2)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        labels.insert(
            colliders.insert_with_parent(ball_collider, ball, &mut bodies),
            BodyLabel::Ball,
        );

        Self {
            gravity: vector![0.0, 0.0],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            events: CollisionChannel::default(),
            labels,
            ball,
            walls,
        }
    }

    /// Advance the simulation one step and return the collision pairs that
    /// started during it, as body labels.
    pub fn step(&mut self) -> Vec<(BodyLabel, BodyLabel)> {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &self.events,
        );
        self.events.drain(&self.labels)
    }

    /// Add the fixed steering increment to the ball's velocity along the
    /// pressed axis, leaving the orthogonal component unchanged.
    pub fn steer(&mut self, direction: Direction) {
        if let Some(ball) = self.bodies.get_mut(self.ball) {
            let velocity = *ball.linvel();
            let (row_delta, col_delta) = direction.offset();
            ball.set_linvel(
                vector![
                    velocity.x + col_delta as f32 * STEER_DELTA,
                    velocity.y + row_delta as f32 * STEER_DELTA
                ],
                true,
            );
        }
    }

    /// Flip gravity from neutral to downward (win flourish)
    pub fn set_gravity_down(&mut self) {
        self.gravity = vector![0.0, GRAVITY_Y];
    }

    /// Convert every inner wall from static to dynamic so the maze collapses.
    /// Borders and the goal stay fixed.
    pub fn release_walls(&mut self) {
        for &handle in &self.walls {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.set_body_type(RigidBodyType::Dynamic, true);
            }
        }
    }

    /// Label of a collider, for rendering and win checks
    pub fn label_of(&self, handle: ColliderHandle) -> Option<BodyLabel> {
        self.labels.get(&handle).copied()
    }

    pub fn ball_position(&self) -> Vec2 {
        let translation = self.bodies[self.ball].translation();
        Vec2::new(translation.x, translation.y)
    }

    pub fn ball_velocity(&self) -> Vec2 {
        let velocity = self.bodies[self.ball].linvel();
        Vec2::new(velocity.x, velocity.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    fn world_for(rows: usize, cols: usize, seed: u64, viewport: Vec2) -> PhysicsWorld {
        let maze = Maze::from_seed(rows, cols, seed).unwrap();
        let layout = MazeLayout::new(&maze, viewport);
        PhysicsWorld::new(&layout)
    }

    #[test]
    fn test_construction_body_counts() {
        // 1x1 maze: four borders + goal + ball, no inner walls.
        let world = world_for(1, 1, 3, Vec2::new(100.0, 100.0));
        assert_eq!(world.bodies.len(), 6);
        assert_eq!(world.colliders.len(), 6);
        assert!(world.walls.is_empty());
    }

    #[test]
    fn test_steer_changes_one_axis_only() {
        let mut world = world_for(2, 2, 3, Vec2::new(200.0, 200.0));
        assert_eq!(world.ball_velocity(), Vec2::ZERO);

        world.steer(Direction::Right);
        assert_eq!(world.ball_velocity(), Vec2::new(STEER_DELTA, 0.0));

        // Up is negative y in screen coordinates; x stays untouched.
        world.steer(Direction::Up);
        assert_eq!(world.ball_velocity(), Vec2::new(STEER_DELTA, -STEER_DELTA));

        world.steer(Direction::Left);
        world.steer(Direction::Down);
        assert_eq!(world.ball_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_release_walls_frees_only_walls() {
        let mut world = world_for(4, 4, 8, Vec2::new(400.0, 400.0));
        assert!(!world.walls.is_empty());
        world.release_walls();

        for &handle in &world.walls {
            assert!(world.bodies[handle].is_dynamic());
        }
        let dynamic = world
            .bodies
            .iter()
            .filter(|(_, body)| body.is_dynamic())
            .count();
        // Every wall plus the ball; borders and goal stay fixed.
        assert_eq!(dynamic, world.walls.len() + 1);
    }

    #[test]
    fn test_gravity_pulls_ball_after_win() {
        let mut world = world_for(1, 2, 5, Vec2::new(400.0, 200.0));
        world.set_gravity_down();
        for _ in 0..10 {
            world.step();
        }
        assert!(world.ball_velocity().y > 0.0);
    }

    #[test]
    fn test_ball_reaches_goal_in_corridor() {
        // A 1x2 maze is a single open corridor: steer right, hit the goal.
        let mut world = world_for(1, 2, 1, Vec2::new(200.0, 100.0));
        for _ in 0..3 {
            world.steer(Direction::Right);
        }

        let mut won = false;
        for _ in 0..240 {
            for (a, b) in world.step() {
                if matches!(
                    (a, b),
                    (BodyLabel::Ball, BodyLabel::Goal) | (BodyLabel::Goal, BodyLabel::Ball)
                ) {
                    won = true;
                }
            }
            if won {
                break;
            }
        }
        assert!(won, "ball never reached the goal");
    }
}
