//! # Block Module
//!
//! Block identity, block kinds and block faces.
//!
//! A [`Block`] is an immutable record: identity, lattice position and kind.
//! Edits never mutate a block in place; the store swaps in a new record with a
//! fresh [`BlockId`].

use cgmath::Point3;

use block_type::BlockKind;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block kinds in compact form
/// (vertex attributes, wasm bindings).
pub type BlockKindSize = u8;

/// Block kinds reachable from the hotbar, indexed by `slot - 1`.
pub const HOTBAR_PALETTE: [BlockKind; 5] = [
    BlockKind::Dirt,
    BlockKind::Grass,
    BlockKind::Stone,
    BlockKind::Wood,
    BlockKind::Ebonstone,
];

/// Resolves a 1-based hotbar slot number to its block kind.
///
/// Slots outside `1..=HOTBAR_PALETTE.len()` resolve to `None`.
pub fn palette_slot(slot: u8) -> Option<BlockKind> {
    let index = (slot as usize).checked_sub(1)?;
    HOTBAR_PALETTE.get(index).copied()
}

/// Unique identity of a block within one world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

/// A single solid cell of the voxel lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Identity, replaced whenever the cell is overwritten.
    pub id: BlockId,
    /// Integer lattice position of the cell.
    pub position: Point3<i32>,
    /// What the block is made of.
    pub kind: BlockKind,
}

impl Block {
    /// Creates a new block record.
    pub fn new(id: BlockId, position: Point3<i32>, kind: BlockKind) -> Self {
        Block { id, position, kind }
    }

    /// The compact kind index of this block.
    pub fn kind_index(&self) -> BlockKindSize {
        self.kind as BlockKindSize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_slots_are_one_based() {
        assert_eq!(palette_slot(1), Some(BlockKind::Dirt));
        assert_eq!(palette_slot(5), Some(BlockKind::Ebonstone));
        assert_eq!(palette_slot(0), None);
        assert_eq!(palette_slot(6), None);
    }
}
