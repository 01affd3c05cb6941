//! # Engine State Module
//!
//! The game core: world, actors, clock and the derived render data, stepped
//! together by one explicit [`GameState::tick`] per frame.
//!
//! ## Key Components
//!
//! * `voxels` - Block kinds, chunk store, generation and spatial queries
//! * `actors` - Player and creatures sharing one physics body model
//! * `events` - Block placed/removed notifications
//! * `camera_state` - First-person camera
//! * `clock` - Day/night time keeping
//! * `rendering` - Chunk meshes and block textures
//!
//! ## Frame Order
//!
//! 1. World generation, on the first tick only, completes before anything reads the world
//! 2. The player moves, mines, places and swings; edits commit immediately
//! 3. Creatures think and move, seeing this frame's edits
//! 4. The clock advances
//! 5. Meshes of chunks touched by edits are rebuilt
//!
//! Everything runs on the caller's thread; no step blocks or defers work.

use cgmath::Point3;
use log::{info, warn};

use crate::application_state::{
    config::GameConfig,
    input_state::{InputTracker, PlayerInput},
};

pub mod actors;
pub mod camera_state;
pub mod clock;
pub mod events;
pub mod rendering;
pub mod voxels;

use actors::{
    body::LANDING_CLEARANCE, creature::CreatureId, player::PlayerFrame, CreatureManager, Player,
};
use clock::WorldClock;
use rendering::MeshManager;
use voxels::{block::block_type::BlockKind, generation::WorldGenerator, world::World};

/// Health bar data of one creature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreatureBar {
    pub id: CreatureId,
    pub position: Point3<f32>,
    pub health_fraction: f32,
}

/// Everything the excluded UI layer displays.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub dead: bool,
    pub selected: BlockKind,
    pub world_time: u32,
    pub daylight: f32,
    pub creatures: Vec<CreatureBar>,
}

/// The complete state of one game session.
pub struct GameState {
    config: GameConfig,
    pub world: World,
    generator: WorldGenerator,
    generated: bool,
    pub player: Player,
    pub creatures: CreatureManager,
    pub clock: WorldClock,
    pub meshes: MeshManager,
    input: InputTracker,
    frames: u64,
}

impl GameState {
    /// Creates a session. The world stays empty until the first tick.
    pub fn new(config: GameConfig) -> Self {
        let world = World::new();
        let generator = WorldGenerator::new(&config.world);
        let meshes = MeshManager::new(&world, &config.mesh);
        let player = Player::new(&config.player, &config.mining, &config.combat);
        // creatures follow the world seed so a seeded session is reproducible
        let creatures = CreatureManager::new(
            &config.creatures,
            config.world.seed.map(|seed| seed as u64),
        );
        let clock = WorldClock::new(&config.clock);

        GameState {
            config,
            world,
            generator,
            generated: false,
            player,
            creatures,
            clock,
            meshes,
            input: InputTracker::new(),
            frames: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Clamps a frame time to `[0, max_frame_step]`; NaN counts as zero.
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.config.max_frame_step)
        }
    }

    /// Advances the session by one frame.
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) -> PlayerFrame {
        let step = self.clamp_dt(dt);
        if step < dt {
            warn!("Frame time {:.3}s clamped to {:.3}s", dt, step);
        }

        if !self.generated {
            self.populate();
        }

        let processed = self.input.process(input);
        let frame = self
            .player
            .tick(&mut self.world, &mut self.creatures, &processed, step);
        self.creatures.update(&self.world, self.player.eye(), step);
        self.clock.tick();
        self.meshes.rebuild_dirty(&self.world);

        self.frames += 1;
        frame
    }

    /// Generates terrain, lifts the player clear of it and drops the first
    /// creatures.
    fn populate(&mut self) {
        if self.generator.generate(&mut self.world) {
            info!("World ready: {} chunks", self.world.chunk_count());
        }
        self.meshes.mark_all(&self.world);

        let spawn = self.player.body.position;
        let surface = self
            .generator
            .surface_height(spawn.x.floor() as i32, spawn.z.floor() as i32);
        let clear = surface as f32 + 1.0 + LANDING_CLEARANCE + self.config.player.height;
        if spawn.y < clear {
            self.player.body.position.y = clear;
            self.player.camera.position = self.player.body.position;
        }

        self.creatures.spawn_initial();
        self.generated = true;
    }

    /// Snapshot for the UI layer.
    pub fn hud(&self) -> HudSnapshot {
        let health = self.player.body.health;
        HudSnapshot {
            health: health.current(),
            max_health: health.max(),
            dead: self.player.is_dead(),
            selected: self.player.selected(),
            world_time: self.clock.time(),
            daylight: self.clock.daylight(),
            creatures: self
                .creatures
                .iter()
                .map(|c| CreatureBar {
                    id: c.id,
                    position: c.position(),
                    health_fraction: c.health_fraction(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::config::{PlayerConfig, WorldGenConfig};

    fn small_session() -> GameState {
        GameState::new(GameConfig {
            world: WorldGenConfig {
                seed: Some(11),
                half_extent: 12,
                ..Default::default()
            },
            // spawn below ground so the first tick lifts the player onto it
            player: PlayerConfig {
                spawn: [0.5, -20.0, 0.5],
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn first_tick_generates_before_physics() {
        let mut game = small_session();
        assert!(game.world.is_empty());
        game.tick(0.016, &PlayerInput::default());
        assert!(!game.world.is_empty());
        assert_eq!(game.creatures.len(), 2);
        assert_eq!(game.meshes.dirty_count(), 0);
        assert!(game.meshes.cached_len() > 0);
    }

    #[test]
    fn frame_time_is_clamped() {
        let game = small_session();
        assert_eq!(game.clamp_dt(5.0), 0.1);
        assert_eq!(game.clamp_dt(-1.0), 0.0);
        assert_eq!(game.clamp_dt(f32::NAN), 0.0);
        assert_eq!(game.clamp_dt(0.05), 0.05);
    }

    #[test]
    fn hud_reports_player_and_clock() {
        let mut game = small_session();
        game.tick(0.016, &PlayerInput::default());
        let hud = game.hud();
        assert_eq!(hud.max_health, 100);
        assert_eq!(hud.selected, BlockKind::Dirt);
        assert_eq!(hud.world_time, 6002);
        assert_eq!(hud.creatures.len(), 2);
        assert!(hud.creatures.iter().all(|c| c.health_fraction == 1.0));
    }

    #[test]
    fn spawn_is_lifted_above_the_surface() {
        let mut game = small_session();
        game.tick(0.0, &PlayerInput::default());
        let feet = game.player.body.feet();
        assert!(feet > game.generator.surface_height(0, 0) as f32 + 1.0);
        assert!(!game.world.is_occupied(Point3::new(0, feet.floor() as i32, 0)));
    }

    #[test]
    fn player_settles_on_the_terrain() {
        let mut game = small_session();
        for _ in 0..200 {
            game.tick(0.05, &PlayerInput::default());
        }
        assert!(game.player.body.is_grounded());
        assert_eq!(game.hud().health, 100);
    }
}
