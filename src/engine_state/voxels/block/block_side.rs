//! # Block Side Module
//!
//! The six faces of a voxel block, their outward normals, and which band of a
//! block's texture atlas each face samples from.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants give a stable ordering used when iterating faces during
/// meshing: [Front, Back, Bottom, Top, Left, Right]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face looking towards negative X
    Front = 0,
    /// The face looking towards positive X
    Back = 1,
    /// The face looking towards negative Y
    Bottom = 2,
    /// The face looking towards positive Y
    Top = 3,
    /// The face looking towards negative Z
    Left = 4,
    /// The face looking towards positive Z
    Right = 5,
}

/// Vertical band of a block atlas texture.
///
/// Every kind's texture is a strip of three square tiles stacked top to
/// bottom: top face, side faces, bottom face.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum AtlasBand {
    Top,
    Side,
    Bottom,
}

impl AtlasBand {
    /// The `[v0, v1]` texture-coordinate range covered by this band.
    pub fn v_range(self) -> (f32, f32) {
        match self {
            AtlasBand::Top => (0.0, 1.0 / 3.0),
            AtlasBand::Side => (1.0 / 3.0, 2.0 / 3.0),
            AtlasBand::Bottom => (2.0 / 3.0, 1.0),
        }
    }

    /// Maps a tile-local `v` in `[0, 1]` into this band.
    pub fn map_v(self, v: f32) -> f32 {
        let (v0, v1) = self.v_range();
        v0 + v * (v1 - v0)
    }

    /// Index of the tile inside the atlas strip.
    pub fn tile_index(self) -> u32 {
        match self {
            AtlasBand::Top => 0,
            AtlasBand::Side => 1,
            AtlasBand::Bottom => 2,
        }
    }
}

impl BlockSide {
    /// Returns all six faces in discriminant order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::Front,
            BlockSide::Back,
            BlockSide::Bottom,
            BlockSide::Top,
            BlockSide::Left,
            BlockSide::Right,
        ]
    }

    /// The outward unit normal of the face on the lattice.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::Front => Vector3::new(-1, 0, 0),
            BlockSide::Back => Vector3::new(1, 0, 0),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Left => Vector3::new(0, 0, -1),
            BlockSide::Right => Vector3::new(0, 0, 1),
        }
    }

    /// Picks the face whose outward normal matches `normal`, if any.
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all()
            .into_iter()
            .find(|side| side.normal() == normal)
    }

    /// Which atlas band this face samples.
    pub fn atlas_band(self) -> AtlasBand {
        match self {
            BlockSide::Top => AtlasBand::Top,
            BlockSide::Bottom => AtlasBand::Bottom,
            _ => AtlasBand::Side,
        }
    }
}
