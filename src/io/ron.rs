//! RON I/O
use crate::{
    domain::GlobalDomain,
    grid::GlobalGrid,
    traits::{CartesianTopology, ConvertToSerializable, RONExport, RONImport},
    types::RealScalar,
};

/// Decomposition of a global grid as seen by one process
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecompositionSummary<T: RealScalar> {
    /// The global domain
    pub domain: GlobalDomain<T>,
    /// Cell size along each axis
    pub cell_size: Vec<T>,
    /// Rank of the process
    pub block_id: usize,
    /// Number of processes along each axis
    pub ranks_per_dim: Vec<usize>,
    /// Coordinates of the process in the process grid
    pub dim_block_id: Vec<usize>,
    /// Number of cells along each axis in the whole grid
    pub global_num_cell: Vec<usize>,
    /// Number of cells along each axis owned by the process
    pub owned_num_cell: Vec<usize>,
    /// Global index of the first owned cell along each axis
    pub global_offset: Vec<usize>,
}

impl<T: RealScalar + serde::Serialize, Topo: CartesianTopology> ConvertToSerializable
    for GlobalGrid<T, Topo>
{
    type SerializableType = DecompositionSummary<T>;

    fn to_serializable(&self) -> DecompositionSummary<T> {
        let dims = 0..self.num_dims();
        DecompositionSummary {
            domain: self.domain().clone(),
            cell_size: dims.clone().map(|d| self.cell_size(d)).collect(),
            block_id: self.block_id(),
            ranks_per_dim: self.ranks_per_dim().to_vec(),
            dim_block_id: dims.clone().map(|d| self.dim_block_id(d)).collect(),
            global_num_cell: dims.clone().map(|d| self.global_num_cell(d)).collect(),
            owned_num_cell: dims.clone().map(|d| self.owned_num_cell(d)).collect(),
            global_offset: dims.map(|d| self.global_offset(d)).collect(),
        }
    }
}

impl<T: RealScalar + serde::Serialize, Topo: CartesianTopology> RONExport for GlobalGrid<T, Topo> {
    fn export_rank(&self) -> usize {
        self.block_id()
    }
    fn export_size(&self) -> usize {
        self.total_num_block()
    }
}

impl<T: RealScalar + for<'de> serde::Deserialize<'de>> RONImport for DecompositionSummary<T> {}
