//! # Creature Manager
//!
//! Owns the set of live creatures, their random source and the periodic
//! spawner. Creatures are kept in spawn order; removal is by id.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use super::creature::{Creature, CreatureId, CreatureKind};
use crate::{application_state::config::CreatureConfig, engine_state::voxels::world::World};

/// Where the first two slimes are dropped.
pub const INITIAL_SPAWNS: [[f32; 3]; 2] = [[5.0, 10.0, 5.0], [-5.0, 10.0, -5.0]];

/// Result of applying damage to a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The creature survived with the given health.
    Survived { remaining: i32 },
    /// The creature's health reached zero and it was removed.
    Killed,
}

pub struct CreatureManager {
    creatures: Vec<Creature>,
    next_id: u64,
    rng: fastrand::Rng,
    spawn_timer: f32,
    config: CreatureConfig,
}

impl CreatureManager {
    /// Creates an empty manager. A seed makes every random choice (spawn
    /// positions, timers, patrol directions) reproducible.
    pub fn new(config: &CreatureConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            creatures: Vec::new(),
            next_id: 0,
            rng,
            spawn_timer: 0.0,
            config: config.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    /// Adds a creature and returns its id.
    pub fn spawn(&mut self, kind: CreatureKind, position: Point3<f32>) -> CreatureId {
        let id = CreatureId(self.next_id);
        self.next_id += 1;
        self.creatures
            .push(Creature::new(id, kind, position, &self.config, &mut self.rng));
        info!("Spawned {} {} at {:?}", kind.name(), id, position);
        id
    }

    /// Drops the two starting slimes.
    pub fn spawn_initial(&mut self) {
        for [x, y, z] in INITIAL_SPAWNS {
            self.spawn(CreatureKind::Slime, Point3::new(x, y, z));
        }
    }

    pub fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        let index = self.creatures.iter().position(|c| c.id == id)?;
        Some(self.creatures.remove(index))
    }

    /// Applies `amount` damage to a creature, removing it when its health
    /// reaches zero. A survivor's velocity is overwritten by `knockback`.
    ///
    /// # Returns
    /// `None` if no creature has this id or `amount` is not positive.
    pub fn damage(
        &mut self,
        id: CreatureId,
        amount: i32,
        knockback: Option<Vector3<f32>>,
    ) -> Option<DamageOutcome> {
        if amount <= 0 {
            return None;
        }
        let creature = self.get_mut(id)?;
        if creature.body.health.damage(amount) {
            let kind = creature.kind;
            self.remove(id);
            info!("{} {} died", kind.name(), id);
            return Some(DamageOutcome::Killed);
        }

        if let Some(velocity) = knockback {
            creature.body.launch(velocity);
        }
        Some(DamageOutcome::Survived {
            remaining: creature.body.health.current(),
        })
    }

    /// Steps every creature, despawns fallen ones and runs the spawner.
    pub fn update(&mut self, world: &World, target: Point3<f32>, dt: f32) {
        for creature in self.creatures.iter_mut() {
            creature.update(world, target, &self.config, &mut self.rng, dt);
        }

        let depth = self.config.despawn_depth;
        self.creatures.retain(|c| {
            let keep = c.body.position.y >= depth;
            if !keep {
                debug!("{} {} fell out of the world", c.kind.name(), c.id);
            }
            keep
        });

        self.spawn_timer += dt;
        if self.spawn_timer >= self.config.spawn_interval {
            self.spawn_timer -= self.config.spawn_interval;
            if self.creatures.len() < self.config.max_alive {
                let r = self.config.spawn_radius;
                let x = (self.rng.f32() * 2.0 - 1.0) * r;
                let z = (self.rng.f32() * 2.0 - 1.0) * r;
                self.spawn(
                    CreatureKind::Slime,
                    Point3::new(x, self.config.spawn_height, z),
                );
            }
        }
    }

    /// `(id, health fraction)` of every creature, for floating health bars.
    pub fn health_fractions(&self) -> Vec<(CreatureId, f32)> {
        self.creatures
            .iter()
            .map(|c| (c.id, c.health_fraction()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CreatureManager {
        CreatureManager::new(&CreatureConfig::default(), Some(7))
    }

    #[test]
    fn initial_spawn_drops_two_slimes() {
        let mut creatures = manager();
        creatures.spawn_initial();
        assert_eq!(creatures.len(), 2);
        assert!(creatures.iter().all(|c| c.kind == CreatureKind::Slime));
        let ids: Vec<_> = creatures.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CreatureId(0), CreatureId(1)]);
    }

    #[test]
    fn lethal_damage_removes_the_creature() {
        let mut creatures = manager();
        let id = creatures.spawn(CreatureKind::Slime, Point3::new(0.0, 5.0, 0.0));
        assert_eq!(creatures.damage(id, 20, None), Some(DamageOutcome::Killed));
        assert!(creatures.get(id).is_none());
        assert_eq!(creatures.damage(id, 5, None), None);
    }

    #[test]
    fn survivable_damage_applies_knockback() {
        let mut creatures = manager();
        let id = creatures.spawn(CreatureKind::Slime, Point3::new(0.0, 5.0, 0.0));
        let knockback = Vector3::new(10.0, 5.0, 0.0);
        assert_eq!(
            creatures.damage(id, 5, Some(knockback)),
            Some(DamageOutcome::Survived { remaining: 15 })
        );
        let slime = creatures.get(id).unwrap();
        assert_eq!(slime.body.velocity, knockback);
        assert!((slime.health_fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn non_positive_damage_is_ignored() {
        let mut creatures = manager();
        let id = creatures.spawn(CreatureKind::Zombie, Point3::new(0.0, 5.0, 0.0));
        assert_eq!(creatures.damage(id, 0, None), None);
        assert_eq!(creatures.get(id).unwrap().body.health.current(), 50);
    }

    #[test]
    fn spawner_respects_interval_and_cap() {
        let world = World::new();
        let config = CreatureConfig {
            despawn_depth: f32::NEG_INFINITY,
            ..Default::default()
        };
        let mut creatures = CreatureManager::new(&config, Some(1));

        // 9.9 seconds: nothing yet
        for _ in 0..99 {
            creatures.update(&world, Point3::new(0.0, 0.0, 0.0), 0.1);
        }
        assert_eq!(creatures.len(), 0);

        for _ in 0..2 {
            creatures.update(&world, Point3::new(0.0, 0.0, 0.0), 0.1);
        }
        assert_eq!(creatures.len(), 1);
        let spawned = creatures.iter().next().unwrap().position();
        assert!(spawned.x >= -10.0 && spawned.x < 10.0);

        for _ in 0..1000 {
            creatures.update(&world, Point3::new(0.0, 0.0, 0.0), 0.1);
        }
        assert_eq!(creatures.len(), config.max_alive);
    }

    #[test]
    fn fallen_creatures_are_despawned() {
        let world = World::new();
        let mut creatures = manager();
        creatures.spawn(CreatureKind::Slime, Point3::new(0.0, -63.0, 0.0));
        for _ in 0..20 {
            creatures.update(&world, Point3::new(0.0, 0.0, 0.0), 0.1);
        }
        assert!(creatures.is_empty());
    }
}
