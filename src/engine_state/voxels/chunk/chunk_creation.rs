//! # Chunk Creation Module
//!
//! A builder that buckets freshly generated blocks into chunks, so the world
//! generator can hand the whole result to the store in one bulk replace.

use std::collections::HashMap;

use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockKind, Block, BlockId};

use super::{chunk_coord_of, Chunk};

/// Collects generated blocks into a chunk map.
///
/// Block identities are assigned sequentially starting at zero; the store
/// continues numbering after the largest identity it receives.
pub struct ChunkMapBuilder {
    chunks: HashMap<Point3<i32>, Chunk>,
    next_id: u64,
}

impl ChunkMapBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        ChunkMapBuilder {
            chunks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Places a block of `kind` at `position`, creating its chunk on demand.
    ///
    /// Pushing twice to the same position keeps the later block.
    pub fn push_block(&mut self, position: Point3<i32>, kind: BlockKind) {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        let coord = chunk_coord_of(position);
        self.chunks
            .entry(coord)
            .or_insert_with(|| Chunk::empty(coord))
            .insert(Block::new(id, position, kind));
    }

    /// Number of blocks pushed so far (including replaced ones).
    pub fn pushed(&self) -> u64 {
        self.next_id
    }

    /// Finalizes the builder and returns the chunk map.
    pub fn finish(self) -> HashMap<Point3<i32>, Chunk> {
        self.chunks
    }
}

impl Default for ChunkMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
