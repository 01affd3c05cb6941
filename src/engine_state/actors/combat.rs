//! # Melee Combat
//!
//! A swing is a short animation driven by `progress`, advancing from zero to
//! pi. While progress is inside the hit window, every creature in range and
//! inside the facing cone is struck, at most once per swing.

use std::collections::HashSet;
use std::f32::consts::PI;

use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};
use log::debug;

use super::{
    creature::CreatureId,
    creature_manager::{CreatureManager, DamageOutcome},
};
use crate::application_state::config::CombatConfig;

/// State of the current weapon swing.
#[derive(Clone, Debug, Default)]
pub struct Swing {
    active: bool,
    progress: f32,
    hit: HashSet<CreatureId>,
}

impl Swing {
    /// Starts a swing unless one is already running.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.progress = 0.0;
        self.hit.clear();
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Advances the animation; the swing ends once progress reaches pi.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        if !self.active {
            return;
        }
        self.progress += dt * speed;
        if self.progress >= PI {
            self.active = false;
            self.progress = 0.0;
        }
    }

    /// Returns `true` while hits can land.
    pub fn in_hit_window(&self, window: [f32; 2]) -> bool {
        self.active && self.progress > window[0] && self.progress < window[1]
    }

    pub fn has_hit(&self, id: CreatureId) -> bool {
        self.hit.contains(&id)
    }
}

/// One creature struck by a swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    pub target: CreatureId,
    pub outcome: DamageOutcome,
}

/// Returns `true` if `target` is within `range` of `origin` and within the
/// cone of half-angle `cone` (radians) around `facing`.
pub fn in_strike_zone(
    origin: Point3<f32>,
    facing: Vector3<f32>,
    target: Point3<f32>,
    range: f32,
    cone: f32,
) -> bool {
    let distance = origin.distance(target);
    if !(distance < range) || distance == 0.0 || facing.magnitude2() == 0.0 {
        return false;
    }
    let to_target = (target - origin) / distance;
    let cos = to_target.dot(facing.normalize()).clamp(-1.0, 1.0);
    cos.acos() < cone
}

/// Resolves hits for this frame of `swing`.
///
/// Every creature inside the strike zone that this swing has not hit yet
/// takes the configured damage. Survivors are knocked away from `origin`
/// and upward; creatures brought to zero health are removed.
pub fn resolve_strikes(
    origin: Point3<f32>,
    facing: Vector3<f32>,
    swing: &mut Swing,
    creatures: &mut CreatureManager,
    config: &CombatConfig,
) -> Vec<Strike> {
    if !swing.in_hit_window(config.hit_window) {
        return Vec::new();
    }
    let cone = config.attack_cone_degrees.to_radians();

    let targets: Vec<(CreatureId, Point3<f32>)> = creatures
        .iter()
        .filter(|c| !swing.has_hit(c.id))
        .filter(|c| in_strike_zone(origin, facing, c.position(), config.attack_range, cone))
        .map(|c| (c.id, c.position()))
        .collect();

    let mut strikes = Vec::with_capacity(targets.len());
    for (id, position) in targets {
        swing.hit.insert(id);
        let away = (position - origin).normalize() * config.knockback_speed;
        let knockback = Vector3::new(away.x, config.knockback_lift, away.z);
        if let Some(outcome) = creatures.damage(id, config.damage, Some(knockback)) {
            debug!("Struck creature {} ({:?})", id, outcome);
            strikes.push(Strike {
                target: id,
                outcome,
            });
        }
    }
    strikes
}
