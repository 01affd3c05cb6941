//! Mesh generation and management for voxel rendering.
//!
//! Meshes are derived data: the world is the source of truth and a mesh is
//! rebuilt whenever a block edit could have changed it. The [`MeshManager`]
//! listens to the world's block events, records which chunks became stale,
//! and rebuilds only those on request.
//!
//! # Architecture
//! - `MeshManager`: dirty tracking, rebuilds and the bounded mesh cache
//! - `mesh/`: face generation and per-kind batching
//!
//! An edit on a chunk face also dirties the neighbouring chunk, since the
//! neighbour's culled face towards the edited cell may have to appear or
//! disappear.

use std::{collections::HashSet, num::NonZeroUsize};

use cgmath::Point3;
use log::{debug, trace};
use lru::LruCache;

mod mesh;

pub use mesh::*;

use crate::{
    application_state::config::MeshConfig,
    core::StResource,
    engine_state::{
        events::{EventBus, SubscriptionHandle, Topic},
        voxels::{
            chunk::{chunk_coord_of, local_position, CHUNK_SIZE},
            world::World,
        },
    },
};

/// Chunks whose mesh may change when the block at `position` changes.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::rendering::meshing::affected_chunks;
///
/// assert_eq!(affected_chunks(Point3::new(5, 5, 5)), vec![Point3::new(0, 0, 0)]);
/// assert_eq!(affected_chunks(Point3::new(0, 5, 5)).len(), 2);
/// ```
pub fn affected_chunks(position: Point3<i32>) -> Vec<Point3<i32>> {
    let coord = chunk_coord_of(position);
    let local = local_position(position);
    let mut chunks = vec![coord];

    for axis in 0..3 {
        let offset = if local[axis] == 0 {
            -1
        } else if local[axis] == CHUNK_SIZE - 1 {
            1
        } else {
            continue;
        };
        let mut neighbour = coord;
        neighbour[axis] += offset;
        chunks.push(neighbour);
    }
    chunks
}

/// Central manager for chunk meshes.
///
/// Holds at most `cache_capacity` meshes; the least recently used one is
/// evicted first and rebuilt transparently when requested again.
pub struct MeshManager {
    /// Built meshes, most recently used first
    meshes: LruCache<Point3<i32>, ChunkMesh>,
    /// Chunks whose cached mesh is stale, shared with the event callbacks
    dirty: StResource<HashSet<Point3<i32>>>,
    events: EventBus,
    subscriptions: Vec<SubscriptionHandle>,
}

impl MeshManager {
    /// Creates a manager listening to `world`'s block events.
    pub fn new(world: &World, config: &MeshConfig) -> Self {
        let dirty: StResource<HashSet<Point3<i32>>> = StResource::default();
        let events = world.events().clone();

        let subscriptions = [Topic::BlockPlaced, Topic::BlockRemoved]
            .into_iter()
            .map(|topic| {
                let dirty = dirty.clone();
                events.subscribe(topic, move |event| {
                    dirty.get_mut().extend(affected_chunks(event.position()));
                })
            })
            .collect();

        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        MeshManager {
            meshes: LruCache::new(capacity),
            dirty,
            events,
            subscriptions,
        }
    }

    /// Marks a single chunk stale.
    pub fn mark_dirty(&mut self, chunk: Point3<i32>) {
        self.dirty.get_mut().insert(chunk);
    }

    /// Marks every chunk of the world stale and forgets meshes of chunks that
    /// no longer exist. Used after a bulk replacement of the world.
    pub fn mark_all(&mut self, world: &World) {
        let mut dirty = self.dirty.get_mut();
        dirty.extend(world.chunks().map(|chunk| chunk.position));
        dirty.extend(self.meshes.iter().map(|(position, _)| *position));
        debug!("Marked {} chunks for remeshing", dirty.len());
    }

    pub fn is_dirty(&self, chunk: Point3<i32>) -> bool {
        self.dirty.get().contains(&chunk)
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.get().len()
    }

    /// Number of meshes currently cached.
    pub fn cached_len(&self) -> usize {
        self.meshes.len()
    }

    /// Rebuilds every stale chunk. Chunks that no longer exist lose their
    /// mesh.
    ///
    /// # Returns
    /// The number of chunks rebuilt or dropped.
    pub fn rebuild_dirty(&mut self, world: &World) -> usize {
        let dirty: Vec<Point3<i32>> = self.dirty.get_mut().drain().collect();
        for &position in &dirty {
            if world.chunk(position).is_some() {
                self.meshes.put(position, ChunkMesh::build(world, position));
            } else {
                self.meshes.pop(&position);
            }
        }
        if !dirty.is_empty() {
            trace!("Rebuilt {} chunk meshes", dirty.len());
        }
        dirty.len()
    }

    /// The up-to-date mesh of a chunk, building it if it is stale or was
    /// evicted. `None` if the chunk does not exist.
    pub fn mesh(&mut self, world: &World, position: Point3<i32>) -> Option<&ChunkMesh> {
        if world.chunk(position).is_none() {
            self.meshes.pop(&position);
            self.dirty.get_mut().remove(&position);
            return None;
        }

        let stale = self.dirty.get_mut().remove(&position);
        if stale || !self.meshes.contains(&position) {
            self.meshes.put(position, ChunkMesh::build(world, position));
        }
        self.meshes.get(&position)
    }
}

impl Drop for MeshManager {
    fn drop(&mut self) {
        for handle in self.subscriptions.drain(..) {
            self.events.unsubscribe(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockKind;

    fn manager_for(world: &World) -> MeshManager {
        MeshManager::new(world, &MeshConfig::default())
    }

    #[test]
    fn interior_edit_dirties_one_chunk() {
        let mut world = World::new();
        let mut meshes = manager_for(&world);
        world.add_block(Point3::new(5, 5, 5), BlockKind::Dirt);
        assert_eq!(meshes.dirty_count(), 1);
        assert!(meshes.is_dirty(Point3::new(0, 0, 0)));

        assert_eq!(meshes.rebuild_dirty(&world), 1);
        assert_eq!(meshes.dirty_count(), 0);
        assert_eq!(meshes.cached_len(), 1);
    }

    #[test]
    fn border_edit_dirties_the_neighbour() {
        let mut world = World::new();
        let meshes = manager_for(&world);
        world.add_block(Point3::new(15, 3, 0), BlockKind::Dirt);
        assert!(meshes.is_dirty(Point3::new(0, 0, 0)));
        assert!(meshes.is_dirty(Point3::new(1, 0, 0)));
        assert!(meshes.is_dirty(Point3::new(0, 0, -1)));
        assert_eq!(meshes.dirty_count(), 3);
    }

    #[test]
    fn removing_the_last_block_drops_the_mesh() {
        let mut world = World::new();
        let mut meshes = manager_for(&world);
        world.add_block(Point3::new(5, 5, 5), BlockKind::Dirt);
        meshes.rebuild_dirty(&world);
        world.remove_block(Point3::new(5, 5, 5));
        meshes.rebuild_dirty(&world);
        assert_eq!(meshes.cached_len(), 0);
        assert!(meshes.mesh(&world, Point3::new(0, 0, 0)).is_none());
    }

    #[test]
    fn mesh_reflects_latest_edit() {
        let mut world = World::new();
        let mut meshes = manager_for(&world);
        world.add_block(Point3::new(1, 1, 1), BlockKind::Stone);
        assert_eq!(meshes.mesh(&world, Point3::new(0, 0, 0)).unwrap().face_count(), 6);

        world.add_block(Point3::new(2, 1, 1), BlockKind::Stone);
        assert_eq!(meshes.mesh(&world, Point3::new(0, 0, 0)).unwrap().face_count(), 10);
    }

    #[test]
    fn evicted_meshes_are_rebuilt_on_demand() {
        let mut world = World::new();
        let mut meshes = MeshManager::new(&world, &MeshConfig { cache_capacity: 1 });
        world.add_block(Point3::new(0, 0, 0), BlockKind::Stone);
        world.add_block(Point3::new(40, 0, 0), BlockKind::Stone);
        meshes.rebuild_dirty(&world);
        assert_eq!(meshes.cached_len(), 1);

        assert!(meshes.mesh(&world, Point3::new(0, 0, 0)).is_some());
        assert!(meshes.mesh(&world, Point3::new(2, 0, 0)).is_some());
        assert_eq!(meshes.cached_len(), 1);
    }

    #[test]
    fn dropping_the_manager_unsubscribes() {
        let world = World::new();
        let meshes = manager_for(&world);
        assert_eq!(world.events().subscriber_count(Topic::BlockPlaced), 1);
        drop(meshes);
        assert_eq!(world.events().subscriber_count(Topic::BlockPlaced), 0);
        assert_eq!(world.events().subscriber_count(Topic::BlockRemoved), 0);
    }

    #[test]
    fn mark_all_covers_bulk_loaded_chunks() {
        let mut world = World::new();
        let mut meshes = manager_for(&world);
        let mut builder = crate::engine_state::voxels::chunk::chunk_creation::ChunkMapBuilder::new();
        builder.push_block(Point3::new(0, 0, 0), BlockKind::Dirt);
        builder.push_block(Point3::new(-1, 0, 0), BlockKind::Dirt);
        world.set_chunks(builder.finish());
        assert_eq!(meshes.dirty_count(), 0);

        meshes.mark_all(&world);
        assert_eq!(meshes.dirty_count(), 2);
    }
}
