//! In-process collectives
use crate::{
    error::GridError,
    traits::{CartesianTopology, Collective},
};
use itertools::izip;

/// Cartesian topology numbering processes in row-major order
///
/// The last axis varies fastest, matching the rank order used by MPI
/// Cartesian communicators created without reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMajorTopology {
    dims: Vec<usize>,
    periods: Vec<bool>,
    rank: usize,
}

impl RowMajorTopology {
    /// Create new
    pub fn new(dims: &[usize], periods: &[bool], rank: usize) -> Self {
        assert_eq!(dims.len(), periods.len());
        assert!(rank < dims.iter().product::<usize>());
        Self {
            dims: dims.to_vec(),
            periods: periods.to_vec(),
            rank,
        }
    }
}

impl CartesianTopology for RowMajorTopology {
    fn rank(&self) -> usize {
        self.rank
    }
    fn dims(&self) -> Vec<usize> {
        self.dims.clone()
    }
    fn periods(&self) -> Vec<bool> {
        self.periods.clone()
    }
    fn rank_to_coordinates(&self, rank: usize) -> Vec<usize> {
        let mut coords = vec![0; self.dims.len()];
        let mut remainder = rank;
        for (c, n) in izip!(coords.iter_mut(), &self.dims).rev() {
            *c = remainder % n;
            remainder /= n;
        }
        coords
    }
    fn coordinates_to_rank(&self, coords: &[usize]) -> usize {
        assert_eq!(coords.len(), self.dims.len());
        izip!(coords, &self.dims).fold(0, |rank, (c, n)| {
            assert!(c < n, "Coordinate {c} outside process grid of size {n}");
            rank * n + c
        })
    }
}

/// Stand-in for one member of a collective, living in the current process
///
/// Reductions return the local values unchanged, so every simulated process is
/// assumed to have been given the same inputs. This lets a single process build
/// the grid seen by each rank of a larger collective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualCollective {
    size: usize,
    rank: usize,
}

impl VirtualCollective {
    /// Create new
    pub fn new(size: usize, rank: usize) -> Self {
        assert!(rank < size, "Rank {rank} outside collective of size {size}");
        Self { size, rank }
    }

    /// Every member of a collective of the given size
    pub fn members(size: usize) -> impl Iterator<Item = Self> {
        (0..size).map(move |rank| Self::new(size, rank))
    }
}

impl Collective for VirtualCollective {
    type Topology = RowMajorTopology;

    fn size(&self) -> usize {
        self.size
    }
    fn rank(&self) -> usize {
        self.rank
    }
    fn all_reduce_min(&self, values: &[i64]) -> Vec<i64> {
        values.to_vec()
    }
    fn all_reduce_max(&self, values: &[i64]) -> Vec<i64> {
        values.to_vec()
    }
    fn create_cartesian(
        &self,
        dims: &[usize],
        periodic: &[bool],
    ) -> Result<RowMajorTopology, GridError> {
        if dims.len() != periodic.len() || dims.iter().product::<usize>() != self.size {
            return Err(GridError::Topology(format!(
                "process grid {dims:?} does not match collective of size {}",
                self.size
            )));
        }
        Ok(RowMajorTopology::new(dims, periodic, self.rank))
    }
}

/// Collective consisting of the current process only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialCollective;

impl Collective for SerialCollective {
    type Topology = RowMajorTopology;

    fn size(&self) -> usize {
        1
    }
    fn rank(&self) -> usize {
        0
    }
    fn all_reduce_min(&self, values: &[i64]) -> Vec<i64> {
        values.to_vec()
    }
    fn all_reduce_max(&self, values: &[i64]) -> Vec<i64> {
        values.to_vec()
    }
    fn create_cartesian(
        &self,
        dims: &[usize],
        periodic: &[bool],
    ) -> Result<RowMajorTopology, GridError> {
        VirtualCollective::new(1, 0).create_cartesian(dims, periodic)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let t = RowMajorTopology::new(&[2, 3, 4], &[false, true, false], 0);
        assert_eq!(t.size(), 24);
        assert_eq!(t.rank_to_coordinates(0), vec![0, 0, 0]);
        assert_eq!(t.rank_to_coordinates(1), vec![0, 0, 1]);
        assert_eq!(t.rank_to_coordinates(4), vec![0, 1, 0]);
        assert_eq!(t.rank_to_coordinates(12), vec![1, 0, 0]);
        assert_eq!(t.rank_to_coordinates(23), vec![1, 2, 3]);
        for rank in 0..24 {
            assert_eq!(t.coordinates_to_rank(&t.rank_to_coordinates(rank)), rank);
        }
    }

    #[test]
    #[should_panic]
    fn test_coordinate_out_of_range() {
        let t = RowMajorTopology::new(&[2, 3], &[true, true], 0);
        t.coordinates_to_rank(&[2, 0]);
    }

    #[test]
    fn test_virtual_collective() {
        let members = VirtualCollective::members(6).collect::<Vec<_>>();
        assert_eq!(members.len(), 6);
        for (rank, m) in members.iter().enumerate() {
            let t = m.create_cartesian(&[3, 2], &[false, false]).unwrap();
            assert_eq!(t.rank(), rank);
            assert_eq!(t.coordinates(), vec![rank / 2, rank % 2]);
        }
        assert!(members[0].create_cartesian(&[4, 2], &[false, false]).is_err());
    }

    #[test]
    fn test_serial_collective() {
        let t = SerialCollective
            .create_cartesian(&[1, 1, 1], &[true, false, true])
            .unwrap();
        assert_eq!(t.rank(), 0);
        assert_eq!(t.periods(), vec![true, false, true]);
        assert_eq!(SerialCollective.all_reduce_max(&[3, -1]), vec![3, -1]);
    }
}
