//! Global grid builder
use super::GlobalGrid;
use crate::{
    error::GridError,
    traits::Collective,
    types::{DimPartitioner, RealScalar},
};

/// How the number of cells along each axis is determined
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T: RealScalar> {
    /// Uniform cell size; the number of cells is derived from the extent of each axis
    CellSize(T),
    /// Number of cells along each axis; the cell size is derived per axis
    NumCells(Vec<usize>),
}

/// Description of a global grid, used to create it on a collective
///
/// The builder holds no process state, so the same description can be
/// stored, loaded from a file and used to build grids on several collectives.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalGridBuilder<T: RealScalar> {
    low_corner: Vec<T>,
    high_corner: Vec<T>,
    periodic: Vec<bool>,
    resolution: Resolution<T>,
    partitioner: DimPartitioner,
}

impl<T: RealScalar> GlobalGridBuilder<T> {
    /// Create a builder for a uniformly spaced grid
    pub fn new(low_corner: &[T], high_corner: &[T], periodic: &[bool], cell_size: T) -> Self {
        Self {
            low_corner: low_corner.to_vec(),
            high_corner: high_corner.to_vec(),
            periodic: periodic.to_vec(),
            resolution: Resolution::CellSize(cell_size),
            partitioner: DimPartitioner::Uniform,
        }
    }

    /// Create a builder for a grid with the given number of cells along each axis
    pub fn new_with_num_cells(
        low_corner: &[T],
        high_corner: &[T],
        periodic: &[bool],
        global_num_cell: &[usize],
    ) -> Self {
        Self {
            low_corner: low_corner.to_vec(),
            high_corner: high_corner.to_vec(),
            periodic: periodic.to_vec(),
            resolution: Resolution::NumCells(global_num_cell.to_vec()),
            partitioner: DimPartitioner::Uniform,
        }
    }

    /// Set the partitioning strategy
    pub fn partitioner(mut self, partitioner: DimPartitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Low corner of the domain
    pub fn low_corner(&self) -> &[T] {
        &self.low_corner
    }

    /// High corner of the domain
    pub fn high_corner(&self) -> &[T] {
        &self.high_corner
    }

    /// Periodicity of each axis
    pub fn periodic(&self) -> &[bool] {
        &self.periodic
    }

    /// Resolution of the grid
    pub fn resolution(&self) -> &Resolution<T> {
        &self.resolution
    }

    /// Partitioning strategy
    pub fn get_partitioner(&self) -> &DimPartitioner {
        &self.partitioner
    }

    /// Create the grid on every process of a collective
    ///
    /// This must be called collectively. Either every process gets a grid or
    /// every process gets an error.
    pub fn create_global_grid<C: Collective>(
        &self,
        comm: &C,
    ) -> Result<GlobalGrid<T, C::Topology>, GridError> {
        GlobalGrid::new(
            comm,
            &self.partitioner,
            &self.low_corner,
            &self.high_corner,
            &self.periodic,
            &self.resolution,
        )
    }
}
