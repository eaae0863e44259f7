//! MPI collectives
use crate::{
    error::GridError,
    traits::{CartesianTopology, Collective},
};
use mpi::{
    collective::SystemOperation,
    topology::CartesianCommunicator,
    traits::{Communicator, CommunicatorCollectives},
    Count,
};

impl<C: Communicator> Collective for C {
    type Topology = CartesianCommunicator;

    fn size(&self) -> usize {
        Communicator::size(self) as usize
    }
    fn rank(&self) -> usize {
        Communicator::rank(self) as usize
    }
    fn all_reduce_min(&self, values: &[i64]) -> Vec<i64> {
        let mut out = vec![0; values.len()];
        self.all_reduce_into(values, &mut out[..], SystemOperation::min());
        out
    }
    fn all_reduce_max(&self, values: &[i64]) -> Vec<i64> {
        let mut out = vec![0; values.len()];
        self.all_reduce_into(values, &mut out[..], SystemOperation::max());
        out
    }
    fn create_cartesian(
        &self,
        dims: &[usize],
        periodic: &[bool],
    ) -> Result<CartesianCommunicator, GridError> {
        let dims = dims.iter().map(|d| *d as Count).collect::<Vec<_>>();
        // Reordering is disabled so that rank ids in the Cartesian communicator
        // match those of the parent communicator.
        self.create_cartesian_communicator(&dims, periodic, false)
            .ok_or_else(|| {
                GridError::Topology(format!(
                    "rank {} is not part of the process grid {dims:?}",
                    Communicator::rank(self)
                ))
            })
    }
}

impl CartesianTopology for CartesianCommunicator {
    fn rank(&self) -> usize {
        Communicator::rank(self) as usize
    }
    fn size(&self) -> usize {
        Communicator::size(self) as usize
    }
    fn dims(&self) -> Vec<usize> {
        self.get_layout().dims.iter().map(|d| *d as usize).collect()
    }
    fn periods(&self) -> Vec<bool> {
        self.get_layout().periods
    }
    fn coordinates(&self) -> Vec<usize> {
        self.get_layout().coords.iter().map(|c| *c as usize).collect()
    }
    fn rank_to_coordinates(&self, rank: usize) -> Vec<usize> {
        CartesianCommunicator::rank_to_coordinates(self, rank as Count)
            .iter()
            .map(|c| *c as usize)
            .collect()
    }
    fn coordinates_to_rank(&self, coords: &[usize]) -> usize {
        let coords = coords.iter().map(|c| *c as Count).collect::<Vec<_>>();
        CartesianCommunicator::coordinates_to_rank(self, &coords) as usize
    }
}
