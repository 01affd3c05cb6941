//! # Block Kind Module
//!
//! The static block registry: every kind of block that can exist in the world
//! together with its physical properties. The table is fixed at compile time
//! and there is no way to mutate it.

use std::fmt;

use num_derive::FromPrimitive;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::BlockKindSize;

/// Enumerates all block kinds in the world.
///
/// The discriminant doubles as the index into [`BLOCK_PROPERTIES`] and as the
/// compact `BlockKindSize` stored in vertex data.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Plain soil found under grass.
    Dirt,
    /// Surface soil of the temperate biome.
    Grass,
    /// Deep rock of the temperate, snow and desert biomes.
    Stone,
    /// Placeable building material.
    Wood,
    /// Placeable foliage.
    Leaf,
    /// Desert surface and subsurface.
    Sand,
    /// Tundra surface and subsurface.
    Snow,
    /// Corruption rock.
    Ebonstone,
    /// Crimson rock.
    Crimstone,
    /// Ore embedded in crimstone.
    Crimtane,
    /// Ore embedded in ebonstone.
    Demonite,
}

/// Number of distinct block kinds.
pub const BLOCK_KIND_COUNT: usize = 11;

/// Physical properties shared by every block of a kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockProperties {
    /// Resistance to mining. Always strictly positive.
    pub hardness: f32,
}

/// Property table indexed by `BlockKind as usize`.
pub static BLOCK_PROPERTIES: [BlockProperties; BLOCK_KIND_COUNT] = [
    BlockProperties { hardness: 0.5 }, // DIRT
    BlockProperties { hardness: 0.6 }, // GRASS
    BlockProperties { hardness: 1.5 }, // STONE
    BlockProperties { hardness: 1.0 }, // WOOD
    BlockProperties { hardness: 0.2 }, // LEAF
    BlockProperties { hardness: 0.5 }, // SAND
    BlockProperties { hardness: 0.3 }, // SNOW
    BlockProperties { hardness: 2.0 }, // EBONSTONE
    BlockProperties { hardness: 2.0 }, // CRIMSTONE
    BlockProperties { hardness: 3.0 }, // CRIMTANE
    BlockProperties { hardness: 3.0 }, // DEMONITE
];

static BLOCK_KIND_NAMES: phf::Map<&'static str, BlockKind> = phf_map! {
    "dirt" => BlockKind::Dirt,
    "grass" => BlockKind::Grass,
    "stone" => BlockKind::Stone,
    "wood" => BlockKind::Wood,
    "leaf" => BlockKind::Leaf,
    "sand" => BlockKind::Sand,
    "snow" => BlockKind::Snow,
    "ebonstone" => BlockKind::Ebonstone,
    "crimstone" => BlockKind::Crimstone,
    "crimtane" => BlockKind::Crimtane,
    "demonite" => BlockKind::Demonite,
};

impl BlockKind {
    /// Every kind, in discriminant order.
    pub const ALL: [BlockKind; BLOCK_KIND_COUNT] = [
        BlockKind::Dirt,
        BlockKind::Grass,
        BlockKind::Stone,
        BlockKind::Wood,
        BlockKind::Leaf,
        BlockKind::Sand,
        BlockKind::Snow,
        BlockKind::Ebonstone,
        BlockKind::Crimstone,
        BlockKind::Crimtane,
        BlockKind::Demonite,
    ];

    /// Looks up the registry entry for this kind.
    pub fn properties(self) -> &'static BlockProperties {
        &BLOCK_PROPERTIES[self as usize]
    }

    /// Shorthand for `properties().hardness`.
    pub fn hardness(self) -> f32 {
        self.properties().hardness
    }

    /// Converts a compact kind index back into a `BlockKind`.
    ///
    /// Returns `None` for indices that do not name a kind.
    pub fn from_int(kind: BlockKindSize) -> Option<Self> {
        num::FromPrimitive::from_u8(kind)
    }

    /// Parses a lowercase kind name such as `"ebonstone"`.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_KIND_NAMES.get(name).copied()
    }

    /// The lowercase registry name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Dirt => "dirt",
            BlockKind::Grass => "grass",
            BlockKind::Stone => "stone",
            BlockKind::Wood => "wood",
            BlockKind::Leaf => "leaf",
            BlockKind::Sand => "sand",
            BlockKind::Snow => "snow",
            BlockKind::Ebonstone => "ebonstone",
            BlockKind::Crimstone => "crimstone",
            BlockKind::Crimtane => "crimtane",
            BlockKind::Demonite => "demonite",
        }
    }

    /// The ore that may replace this kind during deep-layer generation.
    pub fn ore(self) -> Option<BlockKind> {
        match self {
            BlockKind::Ebonstone => Some(BlockKind::Demonite),
            BlockKind::Crimstone => Some(BlockKind::Crimtane),
            _ => None,
        }
    }

    /// Representative RGB color, used for hotbar swatches and map previews.
    pub fn color(self) -> [u8; 3] {
        match self {
            BlockKind::Dirt => [0x79, 0x55, 0x48],
            BlockKind::Grass => [0x5c, 0xa9, 0x04],
            BlockKind::Stone => [0x9e, 0x9e, 0x9e],
            BlockKind::Wood => [0x3e, 0x27, 0x23],
            BlockKind::Leaf => [0x2e, 0x7d, 0x32],
            BlockKind::Sand => [0xe1, 0xc1, 0x6e],
            BlockKind::Snow => [0xf5, 0xf7, 0xfa],
            BlockKind::Ebonstone => [0x61, 0x52, 0x86],
            BlockKind::Crimstone => [0xbd, 0x33, 0x33],
            BlockKind::Crimtane => [0xff, 0x00, 0x00],
            BlockKind::Demonite => [0x80, 0x00, 0xff],
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_positive_hardness() {
        for kind in BlockKind::ALL {
            assert!(kind.hardness() > 0.0, "{kind} has non-positive hardness");
        }
    }

    #[test]
    fn stone_is_harder_than_dirt() {
        assert!(BlockKind::Stone.hardness() > BlockKind::Dirt.hardness());
    }

    #[test]
    fn names_round_trip_through_the_lookup_map() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BlockKind::from_name("bedrock"), None);
    }

    #[test]
    fn int_conversion_matches_discriminants() {
        for (index, kind) in BlockKind::ALL.iter().enumerate() {
            assert_eq!(BlockKind::from_int(index as BlockKindSize), Some(*kind));
        }
        assert_eq!(BlockKind::from_int(BLOCK_KIND_COUNT as BlockKindSize), None);
    }

    #[test]
    fn only_evil_stones_carry_ore() {
        assert_eq!(BlockKind::Ebonstone.ore(), Some(BlockKind::Demonite));
        assert_eq!(BlockKind::Crimstone.ore(), Some(BlockKind::Crimtane));
        assert_eq!(BlockKind::Stone.ore(), None);
    }
}
