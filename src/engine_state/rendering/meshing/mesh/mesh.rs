//! Per-chunk mesh construction.
//!
//! A chunk's geometry is split into one batch per block kind so each batch can
//! be drawn with its kind's atlas. Faces touching another block, in this chunk
//! or a neighbouring one, are culled.

use std::collections::BTreeMap;

use cgmath::Point3;

use super::face::{Face, FACE_INDICES};
use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, block_type::BlockKind},
        world::World,
    },
};

/// Geometry of every visible face of one block kind within a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBatch {
    pub kind: BlockKind,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBatch {
    pub fn new(kind: BlockKind) -> Self {
        MeshBatch {
            kind,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends a face, offsetting its indices past the existing vertices.
    pub fn push_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices.extend(FACE_INDICES.iter().map(|i| i + base));
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Vertex data as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// All batches of one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    pub position: Point3<i32>,
    batches: BTreeMap<BlockKind, MeshBatch>,
}

impl ChunkMesh {
    /// Builds the mesh of the chunk at `position` from the current world.
    ///
    /// A missing chunk yields an empty mesh.
    pub fn build(world: &World, position: Point3<i32>) -> Self {
        let mut batches: BTreeMap<BlockKind, MeshBatch> = BTreeMap::new();

        if let Some(chunk) = world.chunk(position) {
            for block in chunk.blocks() {
                for side in BlockSide::all() {
                    if world.is_occupied(block.position + side.normal()) {
                        continue;
                    }
                    batches
                        .entry(block.kind)
                        .or_insert_with(|| MeshBatch::new(block.kind))
                        .push_face(&Face::new(block.position, block.kind, side));
                }
            }
        }

        ChunkMesh { position, batches }
    }

    pub fn batches(&self) -> impl Iterator<Item = &MeshBatch> {
        self.batches.values()
    }

    pub fn batch(&self, kind: BlockKind) -> Option<&MeshBatch> {
        self.batches.get(&kind)
    }

    pub fn face_count(&self) -> usize {
        self.batches.values().map(MeshBatch::face_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
