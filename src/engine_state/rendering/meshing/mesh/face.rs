use cgmath::Point3;

use crate::engine_state::{
    rendering::Vertex,
    voxels::block::{block_side::BlockSide, block_type::BlockKind},
};

/// Index pattern of the two triangles of a face, relative to its first vertex.
pub const FACE_INDICES: [u32; 6] = [0, 1, 3, 0, 3, 2];

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right, upper-right, upper-left)
/// in world lattice coordinates. Corners are laid out so that `ll, lr, ur` winds
/// counter-clockwise when seen from outside the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-right corner of the face
    pub lr: Point3<i32>,
    /// Lower-left corner of the face
    pub ll: Point3<i32>,
    /// Upper-right corner of the face
    pub ur: Point3<i32>,
    /// Upper-left corner of the face
    pub ul: Point3<i32>,
    /// The block kind, used for texture selection
    pub kind: BlockKind,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face of the block at `position` on the given side.
    pub fn new(position: Point3<i32>, kind: BlockKind, block_side: BlockSide) -> Self {
        let (i, j, k) = (position.x, position.y, position.z);
        let (ll, lr, ul, ur) = match block_side {
            BlockSide::Front => (
                Point3::new(i, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
            ),
            BlockSide::Back => (
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
            ),
            BlockSide::Bottom => (
                Point3::new(i, j, k + 1),
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
            ),
            BlockSide::Top => (
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i + 1, j + 1, k + 1),
            ),
            BlockSide::Left => (
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i, j + 1, k),
            ),
            BlockSide::Right => (
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
            ),
        };
        Face {
            ll,
            lr,
            ul,
            ur,
            kind,
            block_side,
        }
    }

    /// The four vertices in `ll, lr, ul, ur` order.
    ///
    /// The upper edge of the face samples the top row of its atlas tile.
    pub fn vertices(&self) -> [Vertex; 4] {
        let band = self.block_side.atlas_band();
        let normal = self.block_side.normal();
        let kind = self.kind as u32;
        let lower = band.map_v(1.0);
        let upper = band.map_v(0.0);
        [
            Vertex::new(self.ll, 0.0, lower, normal, kind),
            Vertex::new(self.lr, 1.0, lower, normal, kind),
            Vertex::new(self.ul, 0.0, upper, normal, kind),
            Vertex::new(self.ur, 1.0, upper, normal, kind),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace, Vector3};

    #[test]
    fn winding_matches_outward_normal() {
        for side in BlockSide::all() {
            let face = Face::new(Point3::new(3, -2, 7), BlockKind::Stone, side);
            let a = (face.lr - face.ll).cast::<f32>().unwrap();
            let b = (face.ur - face.ll).cast::<f32>().unwrap();
            let n = side.normal().cast::<f32>().unwrap();
            assert!(a.cross(b).dot(n) > 0.0, "{:?}", side);
        }
    }

    #[test]
    fn side_faces_sample_the_middle_band() {
        let face = Face::new(Point3::new(0, 0, 0), BlockKind::Grass, BlockSide::Right);
        for vertex in face.vertices() {
            let v = vertex.tex_coords[1];
            assert!((1.0 / 3.0 - 1e-6..=2.0 / 3.0 + 1e-6).contains(&v));
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn top_face_sits_one_unit_above_the_block() {
        let face = Face::new(Point3::new(1, 4, 1), BlockKind::Dirt, BlockSide::Top);
        let centroid = [face.ll, face.lr, face.ul, face.ur]
            .iter()
            .fold(Vector3::new(0, 0, 0), |acc, p| acc + p.to_vec());
        assert_eq!(centroid.y, 4 * 5);
    }
}
