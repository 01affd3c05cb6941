//! # Block Textures
//!
//! Procedural generation of per-kind atlas textures and the sampling
//! contract they must be used with.
//!
//! Each kind's texture is a `128 x 384` strip of three square tiles: the top
//! face tile in the first rows, the side tile in the middle, the bottom tile
//! last. Faces map their V coordinate into the matching third (see
//! [`AtlasBand`]), so the atlas must be sampled with nearest filtering and
//! clamped edges, and without mipmaps, or neighbouring tiles bleed into each
//! other.

use image::{Rgba, RgbaImage};

use crate::engine_state::voxels::block::{block_side::AtlasBand, block_type::BlockKind};

/// Edge length of one tile, in pixels.
pub const TILE_SIZE: u32 = 128;
/// Width of a kind's atlas texture.
pub const ATLAS_WIDTH: u32 = TILE_SIZE;
/// Height of a kind's atlas texture: three stacked tiles.
pub const ATLAS_HEIGHT: u32 = TILE_SIZE * 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// How a renderer must sample block atlases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasSampling {
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
    pub mipmaps: bool,
}

impl AtlasSampling {
    pub const BLOCK_ATLAS: AtlasSampling = AtlasSampling {
        mag_filter: FilterMode::Nearest,
        min_filter: FilterMode::Nearest,
        wrap_u: WrapMode::ClampToEdge,
        wrap_v: WrapMode::ClampToEdge,
        mipmaps: false,
    };
}

/// Drawing recipe for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileRecipe {
    /// Base colour with translucent speckles; `scale` sets density and size.
    Speckled {
        base: [u8; 3],
        speck: [u8; 3],
        scale: f32,
    },
    GrassTop,
    /// Dirt with a green band and hanging grass strands along the top edge.
    GrassSide,
    /// Dark planks with horizontal seams.
    Wood,
    /// Rock with round ore nuggets.
    Ore { rock: [u8; 3], ore: [u8; 3] },
}

const DIRT: TileRecipe = TileRecipe::Speckled {
    base: [0x79, 0x55, 0x48],
    speck: [0x5d, 0x40, 0x37],
    scale: 1.0,
};

const GRASS_GREEN: [u8; 3] = [0x5c, 0xa9, 0x04];
const GRASS_DARK: [u8; 3] = [0x3e, 0x75, 0x02];
const WOOD_BASE: [u8; 3] = [0x3e, 0x27, 0x23];
const WOOD_LINE: [u8; 3] = [0x28, 0x1a, 0x17];

/// The `[top, side, bottom]` tile recipes of a kind.
pub fn atlas_recipes(kind: BlockKind) -> [TileRecipe; 3] {
    let speckled = |base: [u8; 3], speck: [u8; 3], scale: f32| TileRecipe::Speckled { base, speck, scale };
    let uniform = |recipe: TileRecipe| [recipe; 3];
    match kind {
        BlockKind::Dirt => uniform(DIRT),
        BlockKind::Grass => [TileRecipe::GrassTop, TileRecipe::GrassSide, DIRT],
        BlockKind::Stone => uniform(speckled([0x9e, 0x9e, 0x9e], [0x75, 0x75, 0x75], 2.0)),
        BlockKind::Wood => uniform(TileRecipe::Wood),
        BlockKind::Leaf => uniform(speckled([0x2e, 0x7d, 0x32], [0x1b, 0x5e, 0x20], 3.0)),
        BlockKind::Sand => uniform(speckled([0xe1, 0xc1, 0x6e], [0xc9, 0xa2, 0x4f], 1.0)),
        BlockKind::Snow => uniform(speckled([0xf5, 0xf7, 0xfa], [0xdf, 0xe4, 0xea], 0.6)),
        BlockKind::Ebonstone => uniform(speckled([0x61, 0x52, 0x86], [0x45, 0x38, 0x62], 2.0)),
        BlockKind::Crimstone => uniform(speckled([0xbd, 0x33, 0x33], [0x9d, 0x1b, 0x1b], 2.0)),
        BlockKind::Crimtane => uniform(TileRecipe::Ore {
            rock: [0xbd, 0x33, 0x33],
            ore: [0xff, 0x00, 0x00],
        }),
        BlockKind::Demonite => uniform(TileRecipe::Ore {
            rock: [0x45, 0x38, 0x62],
            ore: [0x80, 0x00, 0xff],
        }),
    }
}

/// Draws the atlas texture of `kind`.
///
/// Output is deterministic per kind.
pub fn generate_block_atlas(kind: BlockKind) -> RgbaImage {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0000 + kind as u64);
    let mut atlas = RgbaImage::new(ATLAS_WIDTH, ATLAS_HEIGHT);
    let bands = [AtlasBand::Top, AtlasBand::Side, AtlasBand::Bottom];

    for (band, recipe) in bands.into_iter().zip(atlas_recipes(kind)) {
        let mut tile = Canvas::new(&mut atlas, band.tile_index() * TILE_SIZE);
        tile.draw(recipe, &mut rng);
    }
    atlas
}

/// One tile-sized window into an atlas, with alpha-blended primitives.
struct Canvas<'a> {
    image: &'a mut RgbaImage,
    y_offset: u32,
}

impl<'a> Canvas<'a> {
    fn new(image: &'a mut RgbaImage, y_offset: u32) -> Self {
        Self { image, y_offset }
    }

    fn draw(&mut self, recipe: TileRecipe, rng: &mut fastrand::Rng) {
        let size = TILE_SIZE as f32;
        match recipe {
            TileRecipe::Speckled { base, speck, scale } => {
                self.fill(base);
                for _ in 0..(400.0 * scale) as u32 {
                    let s = rng.f32() * 4.0 * scale;
                    self.rect(rng.f32() * size, rng.f32() * size, s, s, speck, 0.3);
                }
                self.border([0, 0, 0], 0.1);
            }
            TileRecipe::GrassTop => {
                self.fill(GRASS_GREEN);
                for _ in 0..200 {
                    self.rect(rng.f32() * size, rng.f32() * size, 4.0, 4.0, GRASS_DARK, 0.2);
                }
            }
            TileRecipe::GrassSide => {
                self.fill([0x79, 0x55, 0x48]);
                self.rect(0.0, 0.0, size, 32.0, GRASS_GREEN, 1.0);
                for _ in 0..20 {
                    let h = rng.f32() * 20.0 + 10.0;
                    self.rect(rng.f32() * size, 32.0, 8.0, h, GRASS_GREEN, 1.0);
                }
                for _ in 0..50 {
                    self.rect(rng.f32() * size, rng.f32() * 32.0, 4.0, 4.0, GRASS_DARK, 0.3);
                }
            }
            TileRecipe::Wood => {
                self.fill(WOOD_BASE);
                for seam in [32.0, 64.0, 96.0] {
                    self.rect(0.0, seam - 2.0, size, 4.0, WOOD_LINE, 1.0);
                }
                for _ in 0..200 {
                    self.rect(rng.f32() * size, rng.f32() * size, 2.0, 8.0, WOOD_LINE, 0.1);
                }
            }
            TileRecipe::Ore { rock, ore } => {
                self.fill(rock);
                for _ in 0..400 {
                    self.rect(rng.f32() * size, rng.f32() * size, 4.0, 4.0, [0, 0, 0], 0.1);
                }
                for _ in 0..15 {
                    let x = rng.f32() * (size - 20.0) + 10.0;
                    let y = rng.f32() * (size - 20.0) + 10.0;
                    self.circle(x, y, 12.0, ore, 1.0);
                    self.circle(x - 4.0, y - 4.0, 3.0, [255, 255, 255], 0.5);
                }
            }
        }
    }

    fn fill(&mut self, color: [u8; 3]) {
        self.rect(0.0, 0.0, TILE_SIZE as f32, TILE_SIZE as f32, color, 1.0);
    }

    fn border(&mut self, color: [u8; 3], alpha: f32) {
        let size = TILE_SIZE as f32;
        self.rect(0.0, 0.0, size, 1.0, color, alpha);
        self.rect(0.0, size - 1.0, size, 1.0, color, alpha);
        self.rect(0.0, 1.0, 1.0, size - 2.0, color, alpha);
        self.rect(size - 1.0, 1.0, 1.0, size - 2.0, color, alpha);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3], alpha: f32) {
        let x0 = x.max(0.0) as u32;
        let y0 = y.max(0.0) as u32;
        let x1 = ((x + w).ceil().max(0.0) as u32).min(TILE_SIZE);
        let y1 = ((y + h).ceil().max(0.0) as u32).min(TILE_SIZE);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, alpha);
            }
        }
    }

    fn circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 3], alpha: f32) {
        let x0 = (cx - r).floor().max(0.0) as u32;
        let y0 = (cy - r).floor().max(0.0) as u32;
        let x1 = ((cx + r).ceil().max(0.0) as u32).min(TILE_SIZE);
        let y1 = ((cy + r).ceil().max(0.0) as u32).min(TILE_SIZE);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: [u8; 3], alpha: f32) {
        let pixel = self.image.get_pixel_mut(x, y + self.y_offset);
        let Rgba([r, g, b, _]) = *pixel;
        let mix = |dst: u8, src: u8| (dst as f32 + (src as f32 - dst as f32) * alpha).round() as u8;
        *pixel = Rgba([mix(r, color[0]), mix(g, color[1]), mix(b, color[2]), 255]);
    }
}
