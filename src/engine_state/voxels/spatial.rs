//! # Spatial Queries
//!
//! Point, box and ray queries against the voxel lattice. These are the only
//! way actors look at the world; all of them are read-only.
//!
//! Collision is discrete: a box is tested against every lattice cell its
//! floored corners span, so features thinner than one cell can be missed.

use cgmath::{InnerSpace, Point3, Vector3};

use super::world::World;

/// Maximum number of cells a ray walks before giving up.
const MAX_RAY_STEPS: usize = 512;

/// Widest span, in cells per axis, a box query will enumerate. Wider boxes
/// span no cells at all.
pub const MAX_BOX_SPAN: i64 = 64;

/// Floors a continuous position to the lattice cell containing it.
pub fn lattice_of(point: Point3<f32>) -> Point3<i32> {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// Returns `true` if the cell containing `point` holds a block.
///
/// Absent chunks count as empty space.
pub fn is_solid(world: &World, point: Point3<f32>) -> bool {
    world.is_occupied(lattice_of(point))
}

/// An axis-aligned box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Iterates every lattice cell spanned by the floored corners.
    ///
    /// Yields nothing when any axis spans more than [`MAX_BOX_SPAN`] cells.
    pub fn cells(&self) -> impl Iterator<Item = Point3<i32>> {
        let mut lo = lattice_of(self.min);
        let mut hi = lattice_of(self.max);
        let span = |a: i32, b: i32| b as i64 - a as i64 + 1;
        if span(lo.x, hi.x) > MAX_BOX_SPAN
            || span(lo.y, hi.y) > MAX_BOX_SPAN
            || span(lo.z, hi.z) > MAX_BOX_SPAN
        {
            lo = Point3::new(0, 0, 0);
            hi = Point3::new(-1, -1, -1);
        }
        (lo.x..=hi.x).flat_map(move |x| {
            (lo.y..=hi.y).flat_map(move |y| (lo.z..=hi.z).map(move |z| Point3::new(x, y, z)))
        })
    }
}

/// Returns `true` if any lattice cell spanned by the box is occupied.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::{block::block_type::BlockKind, spatial, world::World};
///
/// let mut world = World::new();
/// world.add_block(Point3::new(0, 0, 0), BlockKind::Dirt);
///
/// assert!(spatial::collides(&world, Point3::new(-0.2, 0.5, -0.2), Point3::new(0.2, 1.5, 0.2)));
/// assert!(!spatial::collides(&world, Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0)));
/// ```
pub fn collides(world: &World, min: Point3<f32>, max: Point3<f32>) -> bool {
    collides_box(world, &Aabb::new(min, max))
}

/// Box form of [`collides`].
pub fn collides_box(world: &World, aabb: &Aabb) -> bool {
    if !is_finite_point(aabb.min) || !is_finite_point(aabb.max) {
        return false;
    }
    aabb.cells().any(|cell| world.is_occupied(cell))
}

/// The first occupied cell struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The occupied cell.
    pub cell: Point3<i32>,
    /// The cell the ray passed through just before `cell`, outside the
    /// struck face. New blocks are placed here.
    pub adjacent: Point3<i32>,
    /// Outward normal of the struck face.
    pub normal: Vector3<i32>,
    /// Distance along the ray to the struck face.
    pub distance: f32,
}

/// Walks the lattice along a ray (Amanatides-Woo traversal) and returns the
/// first occupied cell within `max_distance`.
///
/// The cell containing `origin` is never reported. Zero-length or
/// non-finite directions produce no hit.
pub fn raycast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RayHit> {
    let length = direction.magnitude();
    if !length.is_finite() || length < 1e-6 || !is_finite_point(origin) {
        return None;
    }
    let dir = direction / length;

    let mut cell = lattice_of(origin);
    let step = Vector3::new(signum(dir.x), signum(dir.y), signum(dir.z));

    let delta = Vector3::new(inv_abs(dir.x), inv_abs(dir.y), inv_abs(dir.z));
    let mut next = Vector3::new(
        first_boundary(origin.x, dir.x, delta.x),
        first_boundary(origin.y, dir.y, delta.y),
        first_boundary(origin.z, dir.z, delta.z),
    );

    for _ in 0..MAX_RAY_STEPS {
        let previous = cell;
        let (distance, normal) = if next.x < next.y && next.x < next.z {
            cell.x += step.x;
            let t = next.x;
            next.x += delta.x;
            (t, Vector3::new(-step.x, 0, 0))
        } else if next.y < next.z {
            cell.y += step.y;
            let t = next.y;
            next.y += delta.y;
            (t, Vector3::new(0, -step.y, 0))
        } else {
            cell.z += step.z;
            let t = next.z;
            next.z += delta.z;
            (t, Vector3::new(0, 0, -step.z))
        };

        if distance > max_distance {
            return None;
        }
        if world.is_occupied(cell) {
            return Some(RayHit {
                cell,
                adjacent: previous,
                normal,
                distance,
            });
        }
    }
    None
}

fn is_finite_point(p: Point3<f32>) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

fn signum(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn inv_abs(v: f32) -> f32 {
    if v.abs() < 1e-8 {
        f32::INFINITY
    } else {
        1.0 / v.abs()
    }
}

/// Ray parameter at which the first cell boundary along one axis is crossed.
fn first_boundary(origin: f32, dir: f32, delta: f32) -> f32 {
    let frac = origin - origin.floor();
    if dir > 0.0 {
        (1.0 - frac) * delta
    } else if dir < 0.0 {
        frac * delta
    } else {
        f32::INFINITY
    }
}
