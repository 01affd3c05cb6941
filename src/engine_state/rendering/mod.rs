//! Render-side projections of the world.
//!
//! Nothing here mutates game state. The module turns the chunk store into
//! per-chunk, per-kind vertex batches and produces the block atlas textures
//! those batches sample, leaving the graphics API itself to the host.

use image::RgbaImage;

use super::voxels::block::block_type::BlockKind;

pub mod meshing;
pub mod texture;
mod vertex;

// Re-export commonly used types
pub use meshing::MeshManager;
pub use vertex::Vertex;

/// Generates the atlas texture of every block kind, in kind order.
pub fn block_atlases() -> Vec<(BlockKind, RgbaImage)> {
    BlockKind::ALL
        .into_iter()
        .map(|kind| (kind, texture::generate_block_atlas(kind)))
        .collect()
}
