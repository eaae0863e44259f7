//! Process collectives
use super::CartesianTopology;
use crate::error::GridError;

pub trait Collective {
    //! A fixed set of cooperating processes addressed by rank
    //!
    //! Every method that communicates is collective: all processes must call it
    //! in the same order with buffers of the same length.

    /// Cartesian topology created by this collective
    type Topology: CartesianTopology;

    /// Number of processes
    fn size(&self) -> usize;

    /// Rank of the current process
    fn rank(&self) -> usize;

    /// Element-wise minimum of `values` over all processes
    fn all_reduce_min(&self, values: &[i64]) -> Vec<i64>;

    /// Element-wise maximum of `values` over all processes
    fn all_reduce_max(&self, values: &[i64]) -> Vec<i64>;

    /// Arrange the processes in a Cartesian grid with `dims` processes along each axis
    ///
    /// The product of `dims` must equal [`Collective::size`].
    fn create_cartesian(
        &self,
        dims: &[usize],
        periodic: &[bool],
    ) -> Result<Self::Topology, GridError>;
}
