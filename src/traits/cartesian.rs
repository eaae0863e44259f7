//! Cartesian process topologies

pub trait CartesianTopology {
    //! Processes arranged in a Cartesian grid
    //!
    //! Coordinates are always in range: callers wrap or discard coordinates
    //! that fall outside the process grid before asking for a rank.

    /// Rank of the current process in the topology
    fn rank(&self) -> usize;

    /// Number of processes
    fn size(&self) -> usize {
        self.dims().iter().product()
    }

    /// Number of processes along each axis
    fn dims(&self) -> Vec<usize>;

    /// Periodicity of each axis
    fn periods(&self) -> Vec<bool>;

    /// Coordinates of the current process
    fn coordinates(&self) -> Vec<usize> {
        self.rank_to_coordinates(self.rank())
    }

    /// Coordinates of a process
    fn rank_to_coordinates(&self, rank: usize) -> Vec<usize>;

    /// Rank of the process at the given coordinates
    fn coordinates_to_rank(&self, coords: &[usize]) -> usize;
}
