#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The simulation core of a first-person voxel sandbox: a sparse chunked
//! block world with procedural terrain, a player who walks, mines, builds and
//! fights, hopping slime creatures, and the per-chunk meshes and block
//! textures a renderer needs to draw it all.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input snapshots and the frame-timed session
//! * `core` - Small shared utilities
//! * `engine_state` - World, actors, clock, events and render data
//!
//! ## Architecture
//!
//! The crate owns no window and no GPU device. A host builds a
//! [`Session`](application_state::Session), passes one
//! [`PlayerInput`](application_state::input_state::PlayerInput) per frame and
//! draws the meshes kept by
//! [`MeshManager`](engine_state::rendering::MeshManager). All state lives in
//! one [`GameState`](engine_state::GameState) stepped on the caller's thread.
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_sandbox::application_state::{config::GameConfig, Session};
//!
//! let mut session = Session::new(GameConfig::seeded(42));
//! let summary = session.run_headless(600, 1.0 / 60.0);
//! println!("{} frames", summary.frames);
//! ```

use cfg_if::cfg_if;
#[cfg(target_family = "wasm")]
use wasm_bindgen::prelude::wasm_bindgen;

pub mod application_state;
pub mod core;
pub mod engine_state;

pub use application_state::{config::GameConfig, input_state::PlayerInput, Session};
pub use engine_state::{GameState, HudSnapshot};

/// Frames simulated by the native entry point.
pub const HEADLESS_FRAMES: u32 = 600;

/// Fixed step of the native entry point, in seconds.
pub const HEADLESS_STEP: f32 = 1.0 / 60.0;

cfg_if! {
    if #[cfg(not(target_family = "wasm"))] {
        use log::{info, warn};

        /// Native entry point: loads the configuration named by the first
        /// argument, if any, and runs a fixed-step headless session.
        pub fn run() {
            let mut log_builder = env_logger::Builder::new();
            log_builder
                .target(env_logger::Target::Stdout)
                .parse_env("RUST_LOG")
                .init();

            info!("Logger initialized");

            let config = match std::env::args().nth(1) {
                Some(path) => GameConfig::load(&path).unwrap_or_else(|err| {
                    warn!("Falling back to default configuration: {}", err);
                    GameConfig::default()
                }),
                None => GameConfig::default(),
            };

            let started = web_time::Instant::now();
            let mut session = Session::new(config);
            let summary = session.run_headless(HEADLESS_FRAMES, HEADLESS_STEP);
            let hud = session.game.hud();

            info!(
                "Simulated {} frames in {:.2?}: {} chunks, {} creatures, health {}/{}",
                summary.frames,
                started.elapsed(),
                session.game.world.chunk_count(),
                hud.creatures.len(),
                hud.health,
                hud.max_health,
            );
        }
    }
}

/// Web entry point: installs the panic hook and console logger and runs the
/// same headless session in the browser.
#[cfg(target_family = "wasm")]
#[wasm_bindgen]
pub fn run_web() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }

    let mut session = Session::new(GameConfig::default());
    let summary = session.run_headless(HEADLESS_FRAMES, HEADLESS_STEP);
    log::info!("Simulated {} frames", summary.frames);
}
