//! # Creatures
//!
//! Hostile actors. A creature is a [`PhysicsBody`] with bouncing wall
//! collisions and a small behavior machine: leap at the player when close,
//! otherwise patrol in a random direction with the odd idle hop.

use std::fmt;

use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::body::{Behavior, BodyShape, PhysicsBody, StepOutcome};
use crate::{application_state::config::CreatureConfig, engine_state::voxels::world::World};

/// Height of a creature's collision column above its position.
pub const CREATURE_HEIGHT: f32 = 0.5;

/// Stable identity of a spawned creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub u64);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureKind {
    Slime,
    /// Shares the slime's physics and behavior; only its stats differ.
    Zombie,
}

impl CreatureKind {
    pub fn base_health(self) -> i32 {
        match self {
            CreatureKind::Slime => 20,
            CreatureKind::Zombie => 50,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CreatureKind::Slime => "slime",
            CreatureKind::Zombie => "zombie",
        }
    }
}

/// A live creature.
#[derive(Clone, Debug)]
pub struct Creature {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub body: PhysicsBody,
    /// Seconds until the next leap is allowed.
    leap_timer: f32,
    /// Seconds until a new patrol direction is picked.
    wander_timer: f32,
    wander_direction: Vector3<f32>,
}

impl Creature {
    pub fn new(
        id: CreatureId,
        kind: CreatureKind,
        position: Point3<f32>,
        config: &CreatureConfig,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let body = PhysicsBody::new(
            position,
            BodyShape::column(CREATURE_HEIGHT),
            kind.base_health(),
            Behavior::CreatureAi {
                bounce_factor: config.bounce_factor,
            },
        );
        Self {
            id,
            kind,
            body,
            leap_timer: rng.f32() * 2.0,
            wander_timer: 0.0,
            wander_direction: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.body.position
    }

    /// Remaining health as a fraction of the kind's base health.
    pub fn health_fraction(&self) -> f32 {
        self.body.health.fraction()
    }

    /// Runs behavior and physics for one frame.
    pub fn update(
        &mut self,
        world: &World,
        target: Point3<f32>,
        config: &CreatureConfig,
        rng: &mut fastrand::Rng,
        dt: f32,
    ) -> StepOutcome {
        self.think(target, config, rng, dt);

        self.body.update_vertical(config.gravity, dt, None);
        let outcome = self.body.resolve_moves(world, self.body.velocity * dt);
        if outcome.landed.is_some() {
            // no sliding after a landing
            self.body.velocity.x = 0.0;
            self.body.velocity.z = 0.0;
        }
        outcome
    }

    fn think(&mut self, target: Point3<f32>, config: &CreatureConfig, rng: &mut fastrand::Rng, dt: f32) {
        self.leap_timer -= dt;
        if !self.body.is_grounded() {
            return;
        }

        let distance = self.body.position.distance(target);
        if distance < config.aggro_radius {
            if self.leap_timer <= 0.0 {
                let to_target = target - self.body.position;
                let direction = if to_target.magnitude2() > 0.0 {
                    to_target.normalize()
                } else {
                    Vector3::new(0.0, 0.0, 0.0)
                };
                self.body.launch(Vector3::new(
                    direction.x * config.move_speed,
                    config.jump_force,
                    direction.z * config.move_speed,
                ));
                self.leap_timer = random_in(rng, config.leap_interval);
            }
            return;
        }

        self.wander_timer -= dt;
        if self.wander_timer <= 0.0 {
            let angle = rng.f32() * std::f32::consts::TAU;
            self.wander_direction = Vector3::new(angle.cos(), 0.0, angle.sin());
            self.wander_timer = random_in(rng, config.wander_interval);
        }
        self.body.velocity.x = self.wander_direction.x * config.patrol_speed;
        self.body.velocity.z = self.wander_direction.z * config.patrol_speed;

        if rng.f64() < config.idle_hop_chance {
            let horizontal = self.body.velocity;
            self.body.launch(Vector3::new(
                horizontal.x,
                config.jump_force * 0.5,
                horizontal.z,
            ));
        }
    }
}

fn random_in(rng: &mut fastrand::Rng, bounds: [f32; 2]) -> f32 {
    bounds[0] + rng.f32() * (bounds[1] - bounds[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{actors::body::MotionState, voxels::block::block_type::BlockKind};

    fn flat_world() -> World {
        let mut world = World::new();
        for x in -8..8 {
            for z in -8..8 {
                world.add_block(Point3::new(x, 0, z), BlockKind::Grass);
            }
        }
        world
    }

    fn grounded_slime(config: &CreatureConfig, rng: &mut fastrand::Rng) -> Creature {
        let mut slime = Creature::new(
            CreatureId(0),
            CreatureKind::Slime,
            Point3::new(0.5, 1.001, 0.5),
            config,
            rng,
        );
        slime.body.state = MotionState::Grounded;
        slime
    }

    #[test]
    fn kinds_have_base_health() {
        assert_eq!(CreatureKind::Slime.base_health(), 20);
        assert_eq!(CreatureKind::Zombie.base_health(), 50);
    }

    #[test]
    fn dropped_creature_lands_and_stops_sliding() {
        let world = flat_world();
        let config = CreatureConfig::default();
        let mut rng = fastrand::Rng::with_seed(1);
        let mut slime = Creature::new(
            CreatureId(1),
            CreatureKind::Slime,
            Point3::new(0.5, 4.0, 0.5),
            &config,
            &mut rng,
        );
        slime.body.velocity.x = 1.0;

        let far_away = Point3::new(1000.0, 0.0, 1000.0);
        let patrol_off = CreatureConfig {
            patrol_speed: 0.0,
            idle_hop_chance: 0.0,
            ..config
        };
        for _ in 0..60 {
            slime.update(&world, far_away, &patrol_off, &mut rng, 0.05);
        }
        assert!(slime.body.is_grounded());
        assert!((slime.body.position.y - 1.001).abs() < 1e-3);
        assert_eq!(slime.body.velocity.x, 0.0);
    }

    #[test]
    fn leaps_toward_a_nearby_player() {
        let world = flat_world();
        let config = CreatureConfig::default();
        let mut rng = fastrand::Rng::with_seed(2);
        let mut slime = grounded_slime(&config, &mut rng);
        slime.leap_timer = 0.0;

        slime.update(&world, Point3::new(5.5, 2.8, 0.5), &config, &mut rng, 0.01);
        assert_eq!(slime.body.state, MotionState::Airborne);
        assert!(slime.body.velocity.x > 0.0);
        assert!(slime.body.velocity.y > 0.0);
        assert!(slime.leap_timer >= config.leap_interval[0]);
    }

    #[test]
    fn waits_for_the_leap_timer() {
        let world = flat_world();
        let config = CreatureConfig::default();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut slime = grounded_slime(&config, &mut rng);
        slime.leap_timer = 1.0;

        slime.update(&world, Point3::new(3.0, 2.8, 0.5), &config, &mut rng, 0.01);
        assert!(slime.body.is_grounded());
    }

    #[test]
    fn patrols_when_the_player_is_far() {
        let world = flat_world();
        let config = CreatureConfig {
            idle_hop_chance: 0.0,
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(4);
        let mut slime = grounded_slime(&config, &mut rng);

        slime.update(&world, Point3::new(500.0, 0.0, 0.0), &config, &mut rng, 0.01);
        let horizontal = Vector3::new(slime.body.velocity.x, 0.0, slime.body.velocity.z);
        assert!((horizontal.magnitude() - config.patrol_speed).abs() < 1e-4);
        assert!(slime.body.is_grounded());
    }

    #[test]
    fn idle_hops_happen_when_patrolling() {
        let world = flat_world();
        let config = CreatureConfig {
            idle_hop_chance: 1.0,
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(5);
        let mut slime = grounded_slime(&config, &mut rng);

        slime.update(&world, Point3::new(500.0, 0.0, 0.0), &config, &mut rng, 0.01);
        assert_eq!(slime.body.state, MotionState::Airborne);
    }
}
