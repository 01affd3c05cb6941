//! # Camera State
//!
//! The first-person view attached to the player. The camera supplies the
//! facing used for movement, block targeting and melee.

pub mod camera;

pub use camera::Camera;
