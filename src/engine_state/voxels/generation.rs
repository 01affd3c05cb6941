//! # World Generation
//!
//! One-shot terrain synthesis for a finite square of columns.
//!
//! Each column `(x, z)` samples 2D simplex noise for its surface height, picks
//! a biome by region, and stacks a surface block, a few subsurface blocks and
//! a deeper band that occasionally turns into ore. The result is committed to
//! the [`World`] in a single [`World::set_chunks`] call so no per-block events
//! are published.

use cgmath::Point3;
use log::{debug, info};
use noise::{NoiseFn, Simplex};

use super::{block::block_type::BlockKind, chunk::chunk_creation::ChunkMapBuilder, world::World};
use crate::application_state::config::WorldGenConfig;

/// Block kinds used for one column, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BiomeLayers {
    pub surface: BlockKind,
    pub subsurface: BlockKind,
    pub deep: BlockKind,
}

impl BiomeLayers {
    const fn new(surface: BlockKind, subsurface: BlockKind, deep: BlockKind) -> Self {
        Self {
            surface,
            subsurface,
            deep,
        }
    }
}

/// Picks the biome of a column. Rules are checked in order and the first
/// match wins, so the snow and desert bands override the corruption and
/// crimson bands where they overlap.
///
/// ```
/// use voxel_sandbox::engine_state::voxels::{block::block_type::BlockKind, generation::choose_biome_blocks};
///
/// assert_eq!(choose_biome_blocks(0, -30).surface, BlockKind::Snow);
/// assert_eq!(choose_biome_blocks(0, 0).subsurface, BlockKind::Dirt);
/// ```
pub fn choose_biome_blocks(x: i32, z: i32) -> BiomeLayers {
    use BlockKind::*;

    if z < -20 {
        BiomeLayers::new(Snow, Snow, Stone)
    } else if z > 20 {
        BiomeLayers::new(Sand, Sand, Stone)
    } else if x < -15 {
        BiomeLayers::new(Ebonstone, Ebonstone, Ebonstone)
    } else if x > 15 {
        BiomeLayers::new(Crimstone, Crimstone, Crimstone)
    } else {
        BiomeLayers::new(Grass, Dirt, Stone)
    }
}

/// Terrain generator bound to one seed.
pub struct WorldGenerator {
    config: WorldGenConfig,
    seed: u32,
    noise: Simplex,
}

impl WorldGenerator {
    /// Creates a generator from its configuration.
    ///
    /// Without an explicit seed a random one is drawn, so two unseeded
    /// generators produce different worlds.
    pub fn new(config: &WorldGenConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u32(..));
        WorldGenerator {
            config: config.clone(),
            seed,
            noise: Simplex::new(seed),
        }
    }

    /// The seed terrain noise was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Surface elevation of column `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let f = self.config.noise_frequency;
        let sample = self.noise.get([x as f64 * f, z as f64 * f]);
        (sample * self.config.noise_amplitude).floor() as i32
    }

    /// Populates `world` if it is empty.
    ///
    /// # Returns
    /// `true` if terrain was generated, `false` if the world already held
    /// blocks and was left untouched.
    pub fn generate(&self, world: &mut World) -> bool {
        if !world.is_empty() {
            debug!("World already populated, skipping generation");
            return false;
        }

        let half = self.config.half_extent;
        info!(
            "Generating {0}x{0} columns with seed {1}",
            half * 2,
            self.seed
        );

        // An explicit seed makes ore placement reproducible as well.
        let mut rng = match self.config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed as u64),
            None => fastrand::Rng::new(),
        };
        let mut builder = ChunkMapBuilder::new();
        let mut ores = 0usize;

        for x in -half..half {
            for z in -half..half {
                let surface_y = self.surface_height(x, z);
                let layers = choose_biome_blocks(x, z);

                builder.push_block(Point3::new(x, surface_y, z), layers.surface);

                for depth in 1..=self.config.subsurface_depth {
                    builder.push_block(Point3::new(x, surface_y - depth, z), layers.subsurface);
                }

                for depth in (self.config.subsurface_depth + 1)..=self.config.deep_depth {
                    let kind = match layers.deep.ore() {
                        Some(ore) if rng.f64() < self.config.ore_chance => {
                            ores += 1;
                            ore
                        }
                        _ => layers.deep,
                    };
                    builder.push_block(Point3::new(x, surface_y - depth, z), kind);
                }
            }
        }

        let blocks = builder.pushed();
        world.set_chunks(builder.finish());
        info!(
            "Generated {} blocks ({} ore) in {} chunks",
            blocks,
            ores,
            world.chunk_count()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::engine_state::events::Topic;

    fn small_config(seed: u32) -> WorldGenConfig {
        WorldGenConfig {
            seed: Some(seed),
            half_extent: 8,
            ..Default::default()
        }
    }

    #[test]
    fn biome_rules_follow_precedence() {
        use BlockKind::*;
        assert_eq!(choose_biome_blocks(0, -30), BiomeLayers::new(Snow, Snow, Stone));
        assert_eq!(choose_biome_blocks(0, 30), BiomeLayers::new(Sand, Sand, Stone));
        assert_eq!(
            choose_biome_blocks(-20, 0),
            BiomeLayers::new(Ebonstone, Ebonstone, Ebonstone)
        );
        assert_eq!(
            choose_biome_blocks(20, 0),
            BiomeLayers::new(Crimstone, Crimstone, Crimstone)
        );
        assert_eq!(choose_biome_blocks(0, 0), BiomeLayers::new(Grass, Dirt, Stone));
        // z bands win over x bands
        assert_eq!(choose_biome_blocks(-30, -30).surface, Snow);
        assert_eq!(choose_biome_blocks(30, 30).surface, Sand);
    }

    #[test]
    fn every_column_has_full_stack() {
        let generator = WorldGenerator::new(&small_config(3));
        let mut world = World::new();
        assert!(generator.generate(&mut world));

        // 16x16 columns, 1 surface + 3 subsurface + 7 deep
        assert_eq!(world.block_count(), 16 * 16 * 11);

        let y = generator.surface_height(0, 0);
        assert_eq!(
            world.get_block(Point3::new(0, y, 0)).map(|b| b.kind),
            Some(BlockKind::Grass)
        );
        assert_eq!(
            world.get_block(Point3::new(0, y - 3, 0)).map(|b| b.kind),
            Some(BlockKind::Dirt)
        );
        assert_eq!(
            world.get_block(Point3::new(0, y - 10, 0)).map(|b| b.kind),
            Some(BlockKind::Stone)
        );
        assert!(world.get_block(Point3::new(0, y + 1, 0)).is_none());
        assert!(world.get_block(Point3::new(0, y - 11, 0)).is_none());
    }

    #[test]
    fn second_generation_is_a_no_op() {
        let generator = WorldGenerator::new(&small_config(5));
        let mut world = World::new();
        generator.generate(&mut world);

        let snapshot: HashMap<_, _> = world
            .chunks()
            .map(|c| (c.position, c.blocks().to_vec()))
            .collect();

        let other = WorldGenerator::new(&small_config(99));
        assert!(!other.generate(&mut world));

        for chunk in world.chunks() {
            assert_eq!(snapshot.get(&chunk.position), Some(&chunk.blocks().to_vec()));
        }
        assert_eq!(snapshot.len(), world.chunk_count());
    }

    #[test]
    fn generation_publishes_no_events() {
        let mut world = World::new();
        let count = crate::core::StResource::new(0);
        let counter = count.clone();
        world
            .events()
            .subscribe(Topic::BlockPlaced, move |_| *counter.get_mut() += 1);

        WorldGenerator::new(&small_config(1)).generate(&mut world);
        assert_eq!(*count.get(), 0);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let config = WorldGenConfig {
            seed: Some(42),
            half_extent: 20,
            ore_chance: 0.5,
            ..Default::default()
        };
        let mut a = World::new();
        let mut b = World::new();
        WorldGenerator::new(&config).generate(&mut a);
        WorldGenerator::new(&config).generate(&mut b);

        for chunk in a.chunks() {
            for block in chunk.blocks() {
                assert_eq!(b.get_block(block.position).map(|o| o.kind), Some(block.kind));
            }
        }
    }

    #[test]
    fn ore_only_appears_in_the_deep_band() {
        let config = WorldGenConfig {
            seed: Some(8),
            half_extent: 20,
            ore_chance: 1.0,
            ..Default::default()
        };
        let generator = WorldGenerator::new(&config);
        let mut world = World::new();
        generator.generate(&mut world);

        // x = -20 lies in the corruption band
        let y = generator.surface_height(-20, 0);
        let at = |dy: i32| world.get_block(Point3::new(-20, y - dy, 0)).map(|b| b.kind);
        assert_eq!(at(0), Some(BlockKind::Ebonstone));
        assert_eq!(at(3), Some(BlockKind::Ebonstone));
        assert_eq!(at(4), Some(BlockKind::Demonite));
        assert_eq!(at(10), Some(BlockKind::Demonite));

        // stone has no ore
        let y = generator.surface_height(0, 0);
        assert_eq!(
            world.get_block(Point3::new(0, y - 5, 0)).map(|b| b.kind),
            Some(BlockKind::Stone)
        );
    }
}
