//! # Application State Management
//!
//! The host-facing side of the crate:
//! - Configuration loading and validation
//! - Per-frame input snapshots and edge detection
//! - A [`Session`] that owns the game and measures frame time
//!
//! Windowing and drawing belong to the embedding host, which feeds a
//! [`PlayerInput`](input_state::PlayerInput) each frame and reads back the
//! HUD snapshot and chunk meshes.

pub mod config;
pub mod input_state;

use log::{debug, info};

use config::GameConfig;
use input_state::PlayerInput;

use crate::engine_state::{actors::player::PlayerFrame, GameState};

/// A running game plus the wall clock driving it.
pub struct Session {
    pub game: GameState,

    /// Timestamp of the last frame for delta time calculations
    last_frame: web_time::Instant,
}

/// Totals collected over a fixed-step run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub blocks_mined: u32,
    pub blocks_placed: u32,
    pub creatures_hit: u32,
    pub fall_damage: i32,
}

impl RunSummary {
    fn record(&mut self, frame: &PlayerFrame) {
        self.frames += 1;
        self.blocks_mined += frame.mined.is_some() as u32;
        self.blocks_placed += frame.placed.is_some() as u32;
        self.creatures_hit += frame.strikes.len() as u32;
        self.fall_damage += frame.fall_damage;
    }
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let game = GameState::new(config);
        info!("Session started with world seed {}", game.seed());
        Self {
            game,
            last_frame: web_time::Instant::now(),
        }
    }

    /// Steps the game by the wall time elapsed since the previous frame.
    pub fn frame(&mut self, input: &PlayerInput) -> PlayerFrame {
        let now = web_time::Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.game.tick(dt, input)
    }

    /// Steps the game `frames` times with a fixed `dt` and no input, ignoring
    /// the wall clock.
    pub fn run_headless(&mut self, frames: u32, dt: f32) -> RunSummary {
        let idle = PlayerInput::default();
        let mut summary = RunSummary::default();
        for _ in 0..frames {
            let frame = self.game.tick(dt, &idle);
            summary.record(&frame);
        }
        debug!("Headless run finished: {:?}", summary);
        self.last_frame = web_time::Instant::now();
        summary
    }
}
