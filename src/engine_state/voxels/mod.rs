//! # Voxel World
//!
//! Representation, generation and querying of the block world.
//!
//! ## Architecture
//!
//! * **Block**: block kinds, their properties and their faces
//! * **Chunk**: fixed-size partitions of the lattice holding the blocks that map to them
//! * **World**: the chunk store, the only place blocks are added or removed
//! * **Generation**: one-shot terrain and biome synthesis
//! * **Spatial**: point, box and ray queries used by every moving actor
//!
//! ## Data Flow
//!
//! 1. The generator fills an empty world once with a single bulk commit
//! 2. Actors read the world through the spatial queries
//! 3. Mining and placing edit the world, which publishes block events
//! 4. Listeners (mesh cache, achievements, audio) react to those events

pub mod block;
pub mod chunk;
pub mod generation;
pub mod spatial;
pub mod world;
