//! Global grid
use super::{OwnershipWindow, Resolution};
use crate::{
    domain::GlobalDomain,
    error::{DomainError, GridError},
    index_space::IndexSpace,
    traits::{CartesianTopology, Collective},
    types::{Decomposition, DimPartitioner, EntityType, IndexType, RealScalar, MAX_RANK},
};
use itertools::{izip, Itertools};

fn as_f64<T: RealScalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Largest number of cells along an axis
///
/// Entity counts along an axis, including the extra boundary entity, must fit
/// in the `i64` indices of [`IndexSpace`].
pub const MAX_NUM_CELL: usize = i64::MAX as usize - 1;

/// Number of cells along each axis for a given cell size
///
/// The relative tolerance is the square root of the machine epsilon of `T`.
fn num_cells_from_cell_size<T: RealScalar>(
    domain: &GlobalDomain<T>,
    cell_size: T,
) -> Result<Vec<usize>, DomainError> {
    let h = as_f64(cell_size);
    if !(h > 0.0) || !h.is_finite() {
        return Err(DomainError::InvalidCellSize(h));
    }
    let tolerance = as_f64(T::epsilon()).sqrt();
    (0..domain.num_dims())
        .map(|axis| {
            let extent = as_f64(domain.extent(axis));
            let n = (extent / h).round();
            if !(n < MAX_NUM_CELL as f64) {
                Err(DomainError::TooManyCells {
                    axis,
                    max: MAX_NUM_CELL,
                })
            } else if n < 1.0 || (n * h - extent).abs() > tolerance * extent {
                Err(DomainError::CellSizeMismatch {
                    axis,
                    extent,
                    cell_size: h,
                })
            } else {
                Ok(n as usize)
            }
        })
        .collect()
}

/// Length of the buffer compared between processes during construction
const FINGERPRINT_LEN: usize = 2 + 6 * MAX_RANK;

/// The part of construction that each process does on its own
struct LocalSetup<T: RealScalar> {
    domain: GlobalDomain<T>,
    global_num_cell: Vec<usize>,
    cell_size: Vec<T>,
    ranks_per_dim: Vec<usize>,
}

impl<T: RealScalar> LocalSetup<T> {
    fn new(
        comm_size: usize,
        partitioner: &DimPartitioner,
        low_corner: &[T],
        high_corner: &[T],
        periodic: &[bool],
        resolution: &Resolution<T>,
    ) -> Result<Self, GridError> {
        let domain = GlobalDomain::new(low_corner, high_corner, periodic)?;
        let (global_num_cell, cell_size) = match resolution {
            Resolution::CellSize(h) => (
                num_cells_from_cell_size(&domain, *h)?,
                vec![*h; domain.num_dims()],
            ),
            Resolution::NumCells(n) => {
                if n.len() != domain.num_dims() {
                    return Err(DomainError::LengthMismatch {
                        what: "number of cells",
                        expected: domain.num_dims(),
                        found: n.len(),
                    }
                    .into());
                }
                if let Some(axis) = n.iter().position(|c| *c == 0) {
                    return Err(DomainError::ZeroCells(axis).into());
                }
                if let Some(axis) = n.iter().position(|c| *c > MAX_NUM_CELL) {
                    return Err(DomainError::TooManyCells {
                        axis,
                        max: MAX_NUM_CELL,
                    }
                    .into());
                }
                let h = izip!(0..domain.num_dims(), n)
                    .map(|(d, c)| {
                        T::from(*c)
                            .map(|c| domain.extent(d) / c)
                            .ok_or(DomainError::ZeroCells(d))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (n.clone(), h)
            }
        };
        log::debug!("global cells per axis: {global_num_cell:?}");

        let ranks_per_dim = partitioner.ranks_per_dimension(comm_size, &global_num_cell)?;
        log::debug!("processes per axis: {ranks_per_dim:?}");

        Ok(Self {
            domain,
            global_num_cell,
            cell_size,
            ranks_per_dim,
        })
    }

    /// Values every process must agree on, packed into a fixed-length buffer
    fn fingerprint(&self) -> Vec<i64> {
        let mut values = vec![-1; FINGERPRINT_LEN];
        values[0] = 0;
        values[1] = self.domain.num_dims() as i64;
        for d in 0..self.domain.num_dims() {
            values[2 + d] = self.global_num_cell[d] as i64;
            values[2 + MAX_RANK + d] = self.ranks_per_dim[d] as i64;
            values[2 + 2 * MAX_RANK + d] = self.domain.is_periodic(d) as i64;
            values[2 + 3 * MAX_RANK + d] = as_f64(self.domain.low_corner(d)).to_bits() as i64;
            values[2 + 4 * MAX_RANK + d] = as_f64(self.domain.high_corner(d)).to_bits() as i64;
            values[2 + 5 * MAX_RANK + d] = as_f64(self.cell_size[d]).to_bits() as i64;
        }
        values
    }
}

/// Check that every process reached the same outcome with the same inputs
///
/// The first entry of `fingerprint` is a status code, zero on success. The
/// remaining entries are only compared when every process succeeded.
fn agree<C: Collective>(comm: &C, fingerprint: &[i64]) -> Result<(), GridError> {
    let min = comm.all_reduce_min(fingerprint);
    let max = comm.all_reduce_max(fingerprint);
    if max[0] != 0 {
        return Err(GridError::RemoteFailure);
    }
    if min != max {
        return Err(GridError::InconsistentInput);
    }
    Ok(())
}

/// A structured grid decomposed over a Cartesian arrangement of processes
///
/// A `GlobalGrid` only exists once construction has succeeded on every
/// process of the collective. All queries describe the current process.
#[derive(Debug)]
pub struct GlobalGrid<T: RealScalar, Topo: CartesianTopology> {
    domain: GlobalDomain<T>,
    cell_size: Vec<T>,
    topology: Topo,
    block_id: usize,
    ranks_per_dim: Vec<usize>,
    windows: Vec<OwnershipWindow>,
}

impl<T: RealScalar, Topo: CartesianTopology> GlobalGrid<T, Topo> {
    /// Create a grid on every process of a collective
    ///
    /// This is a collective call. If any process fails to validate its inputs,
    /// or processes are given different grids, every process returns an error.
    pub fn new<C: Collective<Topology = Topo>>(
        comm: &C,
        partitioner: &DimPartitioner,
        low_corner: &[T],
        high_corner: &[T],
        periodic: &[bool],
        resolution: &Resolution<T>,
    ) -> Result<Self, GridError> {
        let setup = LocalSetup::new(
            comm.size(),
            partitioner,
            low_corner,
            high_corner,
            periodic,
            resolution,
        );

        let fingerprint = match &setup {
            Ok(s) => s.fingerprint(),
            Err(e) => {
                log::warn!("grid construction failed on rank {}: {e}", comm.rank());
                let mut values = vec![-1; FINGERPRINT_LEN];
                values[0] = e.status_code();
                values
            }
        };
        let agreement = agree(comm, &fingerprint);
        let setup = setup?;
        agreement?;

        let topology = comm.create_cartesian(&setup.ranks_per_dim, setup.domain.periodicity())?;
        let dim_block_id = topology.coordinates();
        let windows = izip!(&setup.global_num_cell, &setup.ranks_per_dim, &dim_block_id)
            .map(|(n, p, b)| OwnershipWindow::new(*n, *p, *b))
            .collect_vec();
        log::debug!(
            "rank {} at {dim_block_id:?} owns {} cells from {:?}",
            topology.rank(),
            windows.iter().map(|w| w.owned_num_cell()).join("x"),
            windows.iter().map(|w| w.global_offset()).collect_vec()
        );

        Ok(Self {
            block_id: topology.rank(),
            domain: setup.domain,
            cell_size: setup.cell_size,
            topology,
            ranks_per_dim: setup.ranks_per_dim,
            windows,
        })
    }

    /// The global domain
    pub fn domain(&self) -> &GlobalDomain<T> {
        &self.domain
    }

    /// The Cartesian process topology
    pub fn topology(&self) -> &Topo {
        &self.topology
    }

    /// Number of axes
    pub fn num_dims(&self) -> usize {
        self.windows.len()
    }

    /// Cell size along an axis
    pub fn cell_size(&self, dim: usize) -> T {
        self.cell_size[dim]
    }

    /// Is an axis periodic?
    pub fn is_periodic(&self, dim: usize) -> bool {
        self.domain.is_periodic(dim)
    }

    /// Ownership of the cells along an axis
    pub fn ownership_window(&self, dim: usize) -> &OwnershipWindow {
        &self.windows[dim]
    }

    /// Number of cells along an axis in the whole grid
    pub fn global_num_cell(&self, dim: usize) -> usize {
        self.windows[dim].global_num_cell()
    }

    /// Number of entities of a kind along an axis in the whole grid
    pub fn global_num_entity(&self, entity: EntityType, dim: usize) -> usize {
        let cells = self.global_num_cell(dim);
        if entity.has_boundary_entity(dim) && !self.is_periodic(dim) {
            cells + 1
        } else {
            cells
        }
    }

    /// Number of cells along an axis owned by this process
    pub fn owned_num_cell(&self, dim: usize) -> usize {
        self.windows[dim].owned_num_cell()
    }

    /// Number of entities of a kind along an axis owned by this process
    ///
    /// The extra entity on the high boundary of a non-periodic axis belongs to
    /// the last process along that axis.
    pub fn owned_num_entity(&self, entity: EntityType, dim: usize) -> usize {
        let cells = self.owned_num_cell(dim);
        if entity.has_boundary_entity(dim)
            && !self.is_periodic(dim)
            && self.windows[dim].is_last()
        {
            cells + 1
        } else {
            cells
        }
    }

    /// Global index of the first cell along an axis owned by this process
    pub fn global_offset(&self, dim: usize) -> usize {
        self.windows[dim].global_offset()
    }

    /// Physical coordinate of the low boundary of the owned cells along an axis
    pub fn owned_low_corner(&self, dim: usize) -> T {
        self.corner_at(dim, self.global_offset(dim))
    }

    /// Physical coordinate of the high boundary of the owned cells along an axis
    pub fn owned_high_corner(&self, dim: usize) -> T {
        if self.windows[dim].is_last() {
            self.domain.high_corner(dim)
        } else {
            self.corner_at(dim, self.global_offset(dim) + self.owned_num_cell(dim))
        }
    }

    fn corner_at(&self, dim: usize, cell: usize) -> T {
        let cell = T::from(cell).unwrap_or_else(T::nan);
        self.domain.low_corner(dim) + cell * self.cell_size[dim]
    }

    /// Rank of this process
    pub fn block_id(&self) -> usize {
        self.block_id
    }

    /// Number of processes
    pub fn total_num_block(&self) -> usize {
        self.ranks_per_dim.iter().product()
    }

    /// Coordinate of this process along an axis of the process grid
    pub fn dim_block_id(&self, dim: usize) -> usize {
        self.windows[dim].block_id()
    }

    /// Number of processes along an axis of the process grid
    pub fn dim_num_block(&self, dim: usize) -> usize {
        self.ranks_per_dim[dim]
    }

    /// Number of processes along each axis of the process grid
    pub fn ranks_per_dim(&self) -> &[usize] {
        &self.ranks_per_dim
    }

    /// Rank of the process at a coordinate of the process grid
    ///
    /// Coordinates outside the process grid are wrapped on periodic axes. On a
    /// non-periodic axis they have no process and `None` is returned.
    pub fn block_rank(&self, coords: &[i64]) -> Option<usize> {
        assert_eq!(coords.len(), self.num_dims());
        let wrapped = izip!(coords, &self.ranks_per_dim, self.domain.periodicity())
            .map(|(c, n, periodic)| {
                let n = *n as i64;
                if *periodic {
                    Some(c.rem_euclid(n) as usize)
                } else if (0..n).contains(c) {
                    Some(*c as usize)
                } else {
                    None
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(self.topology.coordinates_to_rank(&wrapped))
    }

    /// Rank of the process offset from this one by the given number of blocks along each axis
    pub fn neighbor_rank(&self, offsets: &[i64]) -> Option<usize> {
        assert_eq!(offsets.len(), self.num_dims());
        let coords = izip!(&self.windows, offsets)
            .map(|(w, o)| w.block_id() as i64 + o)
            .collect_vec();
        self.block_rank(&coords)
    }

    /// Does this process own the low boundary of a non-periodic axis?
    pub fn is_on_low_boundary(&self, dim: usize) -> bool {
        !self.is_periodic(dim) && self.dim_block_id(dim) == 0
    }

    /// Does this process own the high boundary of a non-periodic axis?
    pub fn is_on_high_boundary(&self, dim: usize) -> bool {
        !self.is_periodic(dim) && self.windows[dim].is_last()
    }

    /// Halo padding on the low and high side of an axis
    fn halo_padding(&self, dim: usize, halo_width: usize) -> (i64, i64) {
        let width = halo_width as i64;
        let low = if self.is_on_low_boundary(dim) { 0 } else { width };
        let high = if self.is_on_high_boundary(dim) { 0 } else { width };
        (low, high)
    }

    /// Index space of the entities of a kind on this process
    pub fn index_space(
        &self,
        entity: EntityType,
        decomposition: Decomposition,
        index_type: IndexType,
    ) -> IndexSpace {
        let (min, max): (Vec<_>, Vec<_>) = (0..self.num_dims())
            .map(|d| {
                let owned = self.owned_num_entity(entity, d) as i64;
                let offset = self.global_offset(d) as i64;
                let (low, high) = match decomposition {
                    Decomposition::Own => (0, 0),
                    Decomposition::Ghost(width) => self.halo_padding(d, width),
                };
                match index_type {
                    IndexType::Local => (0, low + owned + high),
                    IndexType::Global => (offset - low, offset + owned + high),
                }
            })
            .unzip();
        IndexSpace::new(&min, &max)
    }

    /// Index space of the owned entities of a kind, in global indices
    pub fn owned_index_space(&self, entity: EntityType) -> IndexSpace {
        self.index_space(entity, Decomposition::Own, IndexType::Global)
    }

    /// Local index space of the owned entities inside a local array padded by a halo
    pub fn owned_index_space_in_ghosted(
        &self,
        entity: EntityType,
        halo_width: usize,
    ) -> IndexSpace {
        let (min, max): (Vec<_>, Vec<_>) = (0..self.num_dims())
            .map(|d| {
                let (low, _) = self.halo_padding(d, halo_width);
                (low, low + self.owned_num_entity(entity, d) as i64)
            })
            .unzip();
        IndexSpace::new(&min, &max)
    }
}

/// Create a uniformly spaced grid on every process of a collective
pub fn create_global_grid<T: RealScalar, C: Collective>(
    comm: &C,
    partitioner: &DimPartitioner,
    periodic: &[bool],
    low_corner: &[T],
    high_corner: &[T],
    cell_size: T,
) -> Result<GlobalGrid<T, C::Topology>, GridError> {
    GlobalGrid::new(
        comm,
        partitioner,
        low_corner,
        high_corner,
        periodic,
        &Resolution::CellSize(cell_size),
    )
}
