//! # Chunk Module
//!
//! A chunk groups the blocks of one `CHUNK_SIZE`³ cube of the lattice.
//!
//! ## Storage
//!
//! The chunk owns an unordered list of the blocks inside it. That list is the
//! source of truth. Next to it sits `solid_array`, one bit per local cell,
//! which answers "is anything here?" in O(1) and lets `get_block_at` skip the
//! linear scan for empty cells:
//! - `blocks`: `[block_a, block_b, ...]` in insertion order (removal swaps)
//! - `solid_array`: `CHUNK_VOLUME` bits, indexed by [`local_offset`]
//!
//! The two are kept consistent by `insert` and `remove_at`, the only mutators.

use bitvec::prelude::*;
use cgmath::Point3;

use super::block::Block;

pub mod chunk_creation;

/// Edge length of a chunk, in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// Number of cells in one horizontal plane of a chunk.
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// Number of cells in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_SIZE as usize;

/// Maps a lattice position to the coordinate of the chunk that contains it.
///
/// Uses floor division so that `-1` lands in chunk `-1`, not chunk `0`.
pub fn chunk_coord_of(position: Point3<i32>) -> Point3<i32> {
    Point3::new(
        position.x.div_euclid(CHUNK_SIZE),
        position.y.div_euclid(CHUNK_SIZE),
        position.z.div_euclid(CHUNK_SIZE),
    )
}

/// Position of a lattice cell relative to its chunk origin, each axis in `0..CHUNK_SIZE`.
pub fn local_position(position: Point3<i32>) -> Point3<i32> {
    Point3::new(
        position.x.rem_euclid(CHUNK_SIZE),
        position.y.rem_euclid(CHUNK_SIZE),
        position.z.rem_euclid(CHUNK_SIZE),
    )
}

/// Index of a lattice cell inside its chunk's occupancy bits (x, then z, then y).
pub fn local_offset(position: Point3<i32>) -> usize {
    let local = local_position(position);
    local.x as usize + CHUNK_SIZE as usize * local.z as usize + CHUNK_PLANE_SIZE * local.y as usize
}

/// Lattice position of a chunk's minimum corner.
pub fn chunk_origin(coord: Point3<i32>) -> Point3<i32> {
    Point3::new(coord.x * CHUNK_SIZE, coord.y * CHUNK_SIZE, coord.z * CHUNK_SIZE)
}

/// The blocks of one chunk-sized region of the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,
    blocks: Vec<Block>,
    solid_array: BitVec,
}

impl Chunk {
    /// Creates a chunk with no blocks in it.
    pub fn empty(position: Point3<i32>) -> Self {
        Chunk {
            position,
            blocks: Vec::new(),
            solid_array: bitvec![0; CHUNK_VOLUME],
        }
    }

    /// Creates a chunk from a list of blocks.
    ///
    /// Blocks are inserted in order, so a later block at an already occupied
    /// position replaces the earlier one.
    pub fn from_blocks(position: Point3<i32>, blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut chunk = Chunk::empty(position);
        for block in blocks {
            chunk.insert(block);
        }
        chunk
    }

    /// The blocks of this chunk, in no particular order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks in the chunk.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the chunk holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns `true` if `position` falls inside this chunk.
    pub fn contains_position(&self, position: Point3<i32>) -> bool {
        chunk_coord_of(position) == self.position
    }

    /// Checks the occupancy bit of a lattice position inside this chunk.
    ///
    /// Positions belonging to another chunk are reported as empty.
    pub fn is_block_solid(&self, position: Point3<i32>) -> bool {
        self.contains_position(position) && self.solid_array[local_offset(position)]
    }

    /// Finds the block at a lattice position inside this chunk.
    pub fn get_block_at(&self, position: Point3<i32>) -> Option<&Block> {
        if !self.is_block_solid(position) {
            return None;
        }
        self.blocks.iter().find(|block| block.position == position)
    }

    /// Inserts a block, replacing whatever occupied its position.
    ///
    /// Returns the replaced block, if any.
    ///
    /// # Panics
    /// Panics in debug builds if the block does not belong to this chunk.
    pub fn insert(&mut self, block: Block) -> Option<Block> {
        debug_assert!(
            self.contains_position(block.position),
            "block at {:?} does not belong to chunk {:?}",
            block.position,
            self.position
        );
        let offset = local_offset(block.position);
        if self.solid_array[offset] {
            if let Some(existing) = self
                .blocks
                .iter_mut()
                .find(|existing| existing.position == block.position)
            {
                return Some(std::mem::replace(existing, block));
            }
        }
        self.solid_array.set(offset, true);
        self.blocks.push(block);
        None
    }

    /// Removes and returns the block at `position`, if there is one.
    pub fn remove_at(&mut self, position: Point3<i32>) -> Option<Block> {
        if !self.is_block_solid(position) {
            return None;
        }
        let index = self
            .blocks
            .iter()
            .position(|block| block.position == position)?;
        self.solid_array.set(local_offset(position), false);
        Some(self.blocks.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockKind, BlockId};

    fn block(id: u64, x: i32, y: i32, z: i32, kind: BlockKind) -> Block {
        Block::new(BlockId(id), Point3::new(x, y, z), kind)
    }

    #[test]
    fn negative_positions_floor_into_negative_chunks() {
        assert_eq!(chunk_coord_of(Point3::new(-1, 0, 15)), Point3::new(-1, 0, 0));
        assert_eq!(chunk_coord_of(Point3::new(16, -16, -17)), Point3::new(1, -1, -2));
        assert_eq!(local_position(Point3::new(-1, -16, 17)), Point3::new(15, 0, 1));
    }

    #[test]
    fn insert_replaces_instead_of_duplicating() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        assert!(chunk.insert(block(1, 1, 2, 3, BlockKind::Dirt)).is_none());
        let replaced = chunk.insert(block(2, 1, 2, 3, BlockKind::Stone));
        assert_eq!(replaced.map(|b| b.id), Some(BlockId(1)));
        assert_eq!(chunk.len(), 1);
        assert_eq!(
            chunk.get_block_at(Point3::new(1, 2, 3)).map(|b| b.kind),
            Some(BlockKind::Stone)
        );
    }

    #[test]
    fn remove_clears_the_occupancy_bit() {
        let mut chunk = Chunk::from_blocks(
            Point3::new(-1, 0, 0),
            [block(1, -1, 0, 0, BlockKind::Sand), block(2, -2, 0, 0, BlockKind::Sand)],
        );
        assert!(chunk.is_block_solid(Point3::new(-1, 0, 0)));
        assert!(chunk.remove_at(Point3::new(-1, 0, 0)).is_some());
        assert!(!chunk.is_block_solid(Point3::new(-1, 0, 0)));
        assert!(chunk.remove_at(Point3::new(-1, 0, 0)).is_none());
        assert_eq!(chunk.len(), 1);
    }

    #[test]
    fn foreign_positions_are_never_solid() {
        let chunk = Chunk::from_blocks(Point3::new(0, 0, 0), [block(1, 0, 0, 0, BlockKind::Dirt)]);
        // Same local offset, different chunk.
        assert!(!chunk.is_block_solid(Point3::new(16, 0, 0)));
        assert!(chunk.get_block_at(Point3::new(16, 0, 0)).is_none());
    }
}
