//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format the mesh builder emits. The layout is
//! `#[repr(C)]` and `Pod`, so a mesh's vertex list can be handed to any
//! graphics API as raw bytes.

use cgmath::{Point3, Vector3};

/// A vertex of a block face.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Kind Index: u32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 3],
    /// Atlas UV; V already mapped into the face's band
    pub tex_coords: [f32; 2],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Block kind, selecting which atlas texture to sample
    pub kind_index: u32,
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - Lattice corner of the face
    /// * `u`, `v` - Atlas texture coordinates
    /// * `normal` - Outward face normal
    /// * `kind_index` - Numeric block kind
    pub fn new(pos: Point3<i32>, u: f32, v: f32, normal: Vector3<i32>, kind_index: u32) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            tex_coords: [u, v],
            normal: [normal.x as f32, normal.y as f32, normal.z as f32],
            kind_index,
        }
    }
}
