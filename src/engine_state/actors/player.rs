//! # Player
//!
//! The player-controlled actor: a physics body hanging below the camera eye,
//! the selected block kind, the mining timer and the weapon swing.
//!
//! One [`Player::tick`] runs, in order: look, hotbar selection, movement and
//! collision, fall damage, mining, placing, and the melee swing. Edits are
//! committed to the world immediately, so anything stepped later in the
//! same frame sees them.

use cgmath::{InnerSpace, Point3, Rad, Vector3};
use log::{debug, info};

use super::{
    body::{fall_damage, speed_multiplier, Behavior, BodyShape, PhysicsBody},
    combat::{resolve_strikes, Strike, Swing},
    creature_manager::CreatureManager,
};
use crate::{
    application_state::{
        config::{CombatConfig, MiningConfig, PlayerConfig},
        input_state::ProcessedInput,
    },
    engine_state::{
        camera_state::Camera,
        voxels::{
            block::{block_type::BlockKind, palette_slot, Block},
            spatial::{raycast, Aabb, RayHit},
            world::World,
        },
    },
};

/// Gap between the top of the collision box and the eye.
const HEAD_GAP: f32 = 0.1;

/// Progress of breaking the targeted block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MiningProgress {
    pub target: Option<Point3<i32>>,
    pub elapsed: f32,
}

impl MiningProgress {
    fn reset(&mut self) {
        *self = MiningProgress::default();
    }
}

/// What a player tick changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerFrame {
    /// Fall damage taken on landing this frame.
    pub fall_damage: i32,
    pub mined: Option<Block>,
    pub placed: Option<Point3<i32>>,
    pub strikes: Vec<Strike>,
}

pub struct Player {
    pub body: PhysicsBody,
    pub camera: Camera,
    selected: BlockKind,
    mining: MiningProgress,
    swing: Swing,
    config: PlayerConfig,
    mining_config: MiningConfig,
    combat_config: CombatConfig,
}

impl Player {
    pub fn new(config: &PlayerConfig, mining: &MiningConfig, combat: &CombatConfig) -> Self {
        let spawn = Point3::from(config.spawn);
        Self {
            body: PhysicsBody::new(
                spawn,
                BodyShape::eye_box(config.radius, config.height, HEAD_GAP),
                config.max_health,
                Behavior::PlayerControl,
            ),
            camera: Camera::new(spawn, Rad(0.0), Rad(0.0)),
            selected: BlockKind::Dirt,
            mining: MiningProgress::default(),
            swing: Swing::default(),
            config: config.clone(),
            mining_config: mining.clone(),
            combat_config: combat.clone(),
        }
    }

    /// Eye position; the camera sits here.
    pub fn eye(&self) -> Point3<f32> {
        self.body.position
    }

    pub fn selected(&self) -> BlockKind {
        self.selected
    }

    pub fn select(&mut self, kind: BlockKind) {
        self.selected = kind;
    }

    pub fn mining(&self) -> MiningProgress {
        self.mining
    }

    pub fn swing(&self) -> &Swing {
        &self.swing
    }

    /// Health reached zero. Nothing else happens to a dead player.
    pub fn is_dead(&self) -> bool {
        self.body.health.is_depleted()
    }

    /// The cell the crosshair points at, within reach.
    pub fn target(&self, world: &World) -> Option<RayHit> {
        raycast(
            world,
            self.eye(),
            self.camera.view_direction(),
            self.mining_config.reach,
        )
    }

    /// Advances the player by one frame.
    pub fn tick(
        &mut self,
        world: &mut World,
        creatures: &mut CreatureManager,
        input: &ProcessedInput,
        dt: f32,
    ) -> PlayerFrame {
        let mut frame = PlayerFrame::default();

        let (look_x, look_y) = input.look_delta;
        self.camera.rotate(look_x, look_y, self.config.look_sensitivity);

        if let Some(kind) = input.slot.and_then(palette_slot) {
            self.selected = kind;
        }

        frame.fall_damage = self.step_physics(world, input, dt);

        if input.mine.is_active() {
            frame.mined = self.continue_mining(world, dt);
        } else {
            self.mining.reset();
        }

        if input.place.is_just_pressed() {
            frame.placed = self.place_block(world);
        }

        if input.mine.is_just_pressed() {
            self.swing.start();
        }
        self.swing.advance(dt, self.combat_config.swing_speed);
        frame.strikes = resolve_strikes(
            self.eye(),
            self.camera.view_direction(),
            &mut self.swing,
            creatures,
            &self.combat_config,
        );

        frame
    }

    fn step_physics(&mut self, world: &World, input: &ProcessedInput, dt: f32) -> i32 {
        let (forward, right) = input.movement_axes();
        let mut intent = self.camera.forward() * forward + self.camera.right() * right;
        if intent.magnitude2() > 0.0 {
            intent = intent.normalize();
        }
        let speed = self.config.speed
            * speed_multiplier(
                input.run.is_active(),
                input.crouch.is_active(),
                self.config.run_multiplier,
                self.config.crouch_multiplier,
            );
        self.body.velocity.x = intent.x * speed;
        self.body.velocity.z = intent.z * speed;

        let launch = input.jump.is_active().then_some(self.config.jump_force);
        self.body.update_vertical(self.config.gravity, dt, launch);

        let outcome = self.body.resolve_moves(world, self.body.velocity * dt);
        self.camera.position = self.body.position;

        let mut damage = 0;
        if let Some(impact) = outcome.landed {
            if self.body.behavior.takes_fall_damage() {
                damage = fall_damage(
                    impact,
                    self.config.fall_damage_threshold,
                    self.config.fall_damage_multiplier,
                );
                if damage > 0 {
                    self.body.health.damage(damage);
                    info!(
                        "Fall damage {} at impact {:.1}, health {}/{}",
                        damage,
                        impact,
                        self.body.health.current(),
                        self.body.health.max()
                    );
                }
            }
        }
        damage
    }

    fn continue_mining(&mut self, world: &mut World, dt: f32) -> Option<Block> {
        let Some(hit) = self.target(world) else {
            self.mining.reset();
            return None;
        };
        if self.mining.target != Some(hit.cell) {
            self.mining = MiningProgress {
                target: Some(hit.cell),
                elapsed: 0.0,
            };
        }
        self.mining.elapsed += dt;

        let mut duration = self.mining_config.duration;
        if self.mining_config.scale_by_hardness {
            if let Some(block) = world.get_block(hit.cell) {
                duration *= block.kind.hardness();
            }
        }
        if self.mining.elapsed < duration {
            return None;
        }

        self.mining.reset();
        let removed = world.remove_block(hit.cell);
        if let Some(block) = &removed {
            debug!("Mined {} at {:?}", block.kind, block.position);
        }
        removed
    }

    fn place_block(&mut self, world: &mut World) -> Option<Point3<i32>> {
        let hit = self.target(world)?;
        let cell = hit.adjacent;

        // never entomb the player
        let min = Point3::new(cell.x as f32, cell.y as f32, cell.z as f32);
        let cell_box = Aabb::new(min, min + Vector3::new(1.0, 1.0, 1.0));
        if overlaps(&cell_box, &self.body.aabb()) {
            return None;
        }
        if world.is_occupied(cell) {
            return None;
        }

        world.add_block(cell, self.selected);
        Some(cell)
    }
}

fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.max.x
        && a.max.x > b.min.x
        && a.min.y < b.max.y
        && a.max.y > b.min.y
        && a.min.z < b.max.z
        && a.max.z > b.min.z
}
