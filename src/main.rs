//! # Voxel Sandbox Entry Point
//!
//! Runs a headless session natively. Pass a JSON configuration file as the
//! first argument to override the defaults.
//!
//! For web builds, see the `run_web()` function in the library.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

fn main() {
    #[cfg(not(target_family = "wasm"))]
    voxel_sandbox::run();
}
