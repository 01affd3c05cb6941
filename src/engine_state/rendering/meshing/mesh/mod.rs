//! Mesh generation for voxel rendering.
//!
//! # Architecture
//! - [`ChunkMesh`]: the geometry of one chunk, one [`MeshBatch`] per block kind
//! - [`Face`]: a single visible block face and its four vertices

mod face;
mod mesh;

pub use face::{Face, FACE_INDICES};
pub use mesh::{ChunkMesh, MeshBatch};
