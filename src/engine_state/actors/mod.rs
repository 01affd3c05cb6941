//! # Actors
//!
//! Everything that moves: the player and the creatures. Both share
//! [`body::PhysicsBody`] and differ only through its behavior tag.

pub mod body;
pub mod combat;
pub mod creature;
pub mod creature_manager;
pub mod player;

pub use body::{Behavior, Health, MotionState, PhysicsBody};
pub use creature::{Creature, CreatureId, CreatureKind};
pub use creature_manager::CreatureManager;
pub use player::Player;
