//! # World Module
//!
//! The chunk store: the single source of truth for the shape of the world.
//!
//! ## Architecture
//!
//! The world is a sparse map from chunk coordinate to [`Chunk`]. Chunks are
//! created on first insertion and deleted as soon as their last block is
//! removed, so mining never leaves empty entries behind.
//!
//! Every mutation goes through `add_block`, `remove_block` or `set_chunks`.
//! The first two publish on the world's [`EventBus`] after the edit has been
//! committed, so a listener that reads the world sees the new state.
//!
//! ## Ownership
//!
//! A `World` is a plain value. Systems that need it receive `&World` (reads)
//! or `&mut World` (edits) from the frame loop, which makes several
//! independent worlds in one process (for example in tests) trivial.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info};

use super::block::{block_type::BlockKind, Block, BlockId};
use super::chunk::{chunk_coord_of, Chunk};
use crate::engine_state::events::{BlockEvent, EventBus};

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::{block::block_type::BlockKind, world::World};
///
/// let mut world = World::new();
/// world.add_block(Point3::new(0, 0, 0), BlockKind::Stone);
/// assert_eq!(world.get_block(Point3::new(0, 0, 0)).map(|b| b.kind), Some(BlockKind::Stone));
///
/// world.remove_block(Point3::new(0, 0, 0));
/// assert_eq!(world.chunk_count(), 0);
/// ```
pub struct World {
    chunks: HashMap<Point3<i32>, Chunk>,
    next_block_id: u64,
    events: EventBus,
}

impl World {
    /// Creates a new, empty world with its own event bus.
    pub fn new() -> Self {
        Self::with_events(EventBus::new())
    }

    /// Creates a new, empty world publishing on an existing bus.
    pub fn with_events(events: EventBus) -> Self {
        World {
            chunks: HashMap::new(),
            next_block_id: 0,
            events,
        }
    }

    /// The bus block edits are published on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns `true` if the world holds no chunks at all.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of chunk entries. Never counts empty chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total number of blocks across all chunks.
    pub fn block_count(&self) -> usize {
        self.chunks.values().map(Chunk::len).sum()
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    pub fn chunk(&self, coord: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Iterates over every chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Looks up the block at a lattice position.
    ///
    /// Positions outside every populated chunk are simply empty.
    pub fn get_block(&self, position: Point3<i32>) -> Option<&Block> {
        self.chunks
            .get(&chunk_coord_of(position))
            .and_then(|chunk| chunk.get_block_at(position))
    }

    /// Returns `true` if a block occupies `position`.
    pub fn is_occupied(&self, position: Point3<i32>) -> bool {
        self.chunks
            .get(&chunk_coord_of(position))
            .is_some_and(|chunk| chunk.is_block_solid(position))
    }

    /// Places a block of `kind` at `position`.
    ///
    /// An existing block at the same position is replaced by a new block with
    /// a new identity. Publishes [`BlockEvent::Placed`] after the edit.
    pub fn add_block(&mut self, position: Point3<i32>, kind: BlockKind) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;

        let coord = chunk_coord_of(position);
        let replaced = self
            .chunks
            .entry(coord)
            .or_insert_with(|| Chunk::empty(coord))
            .insert(Block::new(id, position, kind));

        match replaced {
            Some(old) => debug!("Replaced {} with {} at {:?}", old.kind, kind, position),
            None => debug!("Placed {} at {:?}", kind, position),
        }

        self.events.publish(&BlockEvent::Placed { position, kind });
        id
    }

    /// Removes the block at `position`.
    ///
    /// Removing empty space is a no-op and publishes nothing. When the last
    /// block of a chunk goes, the chunk entry goes with it.
    pub fn remove_block(&mut self, position: Point3<i32>) -> Option<Block> {
        let coord = chunk_coord_of(position);
        let chunk = self.chunks.get_mut(&coord)?;
        let removed = chunk.remove_at(position)?;
        if chunk.is_empty() {
            self.chunks.remove(&coord);
            debug!("Chunk {:?} emptied and dropped", coord);
        }
        debug!("Removed {} at {:?}", removed.kind, position);

        self.events.publish(&BlockEvent::Removed { position });
        Some(removed)
    }

    /// Replaces the whole store with `chunks`.
    ///
    /// Used once by world generation. Publishes nothing; listeners that cache
    /// derived data must treat a bulk replace as "everything changed".
    pub fn set_chunks(&mut self, chunks: HashMap<Point3<i32>, Chunk>) {
        let mut chunks = chunks;
        chunks.retain(|_, chunk| !chunk.is_empty());

        let max_id = chunks
            .values()
            .flat_map(|chunk| chunk.blocks().iter().map(|block| block.id.0))
            .max();
        self.next_block_id = self.next_block_id.max(max_id.map_or(0, |id| id + 1));
        self.chunks = chunks;

        info!(
            "World replaced: {} chunks, {} blocks",
            self.chunk_count(),
            self.block_count()
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StResource;
    use crate::engine_state::events::Topic;
    use crate::engine_state::voxels::chunk::chunk_creation::ChunkMapBuilder;

    #[test]
    fn add_then_get_returns_the_kind() {
        let mut world = World::new();
        world.add_block(Point3::new(3, -4, 5), BlockKind::Wood);
        let block = world.get_block(Point3::new(3, -4, 5)).copied();
        assert_eq!(block.map(|b| b.kind), Some(BlockKind::Wood));
        assert_eq!(block.map(|b| b.position), Some(Point3::new(3, -4, 5)));
    }

    #[test]
    fn replacing_issues_a_new_identity() {
        let mut world = World::new();
        let first = world.add_block(Point3::new(0, 0, 0), BlockKind::Dirt);
        let second = world.add_block(Point3::new(0, 0, 0), BlockKind::Stone);
        assert_ne!(first, second);
        assert_eq!(world.block_count(), 1);
        assert_eq!(world.get_block(Point3::new(0, 0, 0)).map(|b| b.id), Some(second));
    }

    #[test]
    fn removing_the_last_block_drops_the_chunk() {
        let mut world = World::new();
        world.add_block(Point3::new(0, 0, 0), BlockKind::Dirt);
        world.add_block(Point3::new(40, 0, 0), BlockKind::Dirt);
        assert_eq!(world.chunk_count(), 2);

        world.remove_block(Point3::new(0, 0, 0));
        assert!(world.get_block(Point3::new(0, 0, 0)).is_none());
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn removing_nothing_publishes_nothing() {
        let mut world = World::new();
        let removed = StResource::new(0);
        let counter = removed.clone();
        world
            .events()
            .subscribe(Topic::BlockRemoved, move |_| *counter.get_mut() += 1);

        assert!(world.remove_block(Point3::new(9, 9, 9)).is_none());
        world.add_block(Point3::new(9, 9, 9), BlockKind::Leaf);
        assert!(world.remove_block(Point3::new(9, 9, 9)).is_some());

        assert_eq!(*removed.get(), 1);
    }

    #[test]
    fn listeners_observe_committed_state() {
        let mut world = World::new();
        let seen = StResource::new(Vec::new());
        let log = seen.clone();
        world.events().subscribe(Topic::BlockPlaced, move |event| {
            log.get_mut().push(*event);
        });

        world.add_block(Point3::new(1, 1, 1), BlockKind::Snow);

        assert_eq!(
            *seen.get(),
            vec![BlockEvent::Placed {
                position: Point3::new(1, 1, 1),
                kind: BlockKind::Snow
            }]
        );
    }

    #[test]
    fn set_chunks_overwrites_and_continues_numbering() {
        let mut world = World::new();
        world.add_block(Point3::new(100, 0, 0), BlockKind::Dirt);

        let mut builder = ChunkMapBuilder::new();
        builder.push_block(Point3::new(0, 0, 0), BlockKind::Grass);
        builder.push_block(Point3::new(0, -1, 0), BlockKind::Dirt);
        world.set_chunks(builder.finish());

        assert!(world.get_block(Point3::new(100, 0, 0)).is_none());
        assert_eq!(world.block_count(), 2);

        let id = world.add_block(Point3::new(5, 5, 5), BlockKind::Stone);
        assert!(id.0 >= 2);
    }
}
