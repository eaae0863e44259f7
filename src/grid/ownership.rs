//! Per-axis ownership of cells

/// Share of the cells along one axis owned by one block of processes
///
/// The cells are split as evenly as possible. When the split is uneven the
/// blocks with the lowest coordinates own one extra cell each.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnershipWindow {
    global_num_cell: usize,
    num_block: usize,
    block_id: usize,
}

impl OwnershipWindow {
    /// Create new
    pub fn new(global_num_cell: usize, num_block: usize, block_id: usize) -> Self {
        assert!(num_block > 0);
        assert!(block_id < num_block);
        Self {
            global_num_cell,
            num_block,
            block_id,
        }
    }

    /// Number of cells along the axis in the whole grid
    pub fn global_num_cell(&self) -> usize {
        self.global_num_cell
    }

    /// Number of blocks along the axis
    pub fn num_block(&self) -> usize {
        self.num_block
    }

    /// Coordinate of this block along the axis
    pub fn block_id(&self) -> usize {
        self.block_id
    }

    /// Number of cells owned by this block
    pub fn owned_num_cell(&self) -> usize {
        self.block_num_cell(self.block_id)
    }

    /// Global index of the first cell owned by this block
    pub fn global_offset(&self) -> usize {
        self.block_offset(self.block_id)
    }

    /// Number of cells owned by the block at the given coordinate
    pub fn block_num_cell(&self, block: usize) -> usize {
        assert!(block < self.num_block);
        let base = self.global_num_cell / self.num_block;
        if block < self.global_num_cell % self.num_block {
            base + 1
        } else {
            base
        }
    }

    /// Global index of the first cell owned by the block at the given coordinate
    pub fn block_offset(&self, block: usize) -> usize {
        assert!(block < self.num_block);
        let base = self.global_num_cell / self.num_block;
        block * base + block.min(self.global_num_cell % self.num_block)
    }

    /// Is this the block at the high end of the axis?
    pub fn is_last(&self) -> bool {
        self.block_id + 1 == self.num_block
    }
}
