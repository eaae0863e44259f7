//! Errors
use thiserror::Error;

/// Errors raised while choosing the number of processes per axis
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// The collective has no processes
    #[error("cannot partition over an empty collective")]
    EmptyCollective,
    /// An axis has no cells
    #[error("axis {0} has no cells to partition")]
    EmptyAxis(usize),
    /// No factorization of the collective fits the grid
    #[error("{size} processes cannot be arranged over a grid with {cells:?} cells")]
    Unsatisfiable {
        /// Collective size
        size: usize,
        /// Global cells per axis
        cells: Vec<usize>,
    },
    /// A manual partition has the wrong number of axes
    #[error("manual partition has {found} axes but the grid has {expected}")]
    DimensionMismatch {
        /// Number of grid axes
        expected: usize,
        /// Number of axes in the partition
        found: usize,
    },
    /// A manual partition places no process on an axis
    #[error("manual partition places zero processes on axis {0}")]
    ZeroRanks(usize),
    /// A manual partition does not cover the collective
    #[error(
        "manual partition {ranks:?} has product {product} but the collective has {size} processes"
    )]
    ProductMismatch {
        /// The requested ranks per axis
        ranks: Vec<usize>,
        /// Product of the requested ranks
        product: usize,
        /// Collective size
        size: usize,
    },
}

/// Errors raised while validating the global domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Unsupported number of axes
    #[error("grids must have between 1 and {max} axes, got {found}")]
    UnsupportedRank {
        /// Largest supported number of axes
        max: usize,
        /// Requested number of axes
        found: usize,
    },
    /// Inputs describe different numbers of axes
    #[error("{what} has {found} entries but the grid has {expected} axes")]
    LengthMismatch {
        /// Name of the offending input
        what: &'static str,
        /// Number of grid axes
        expected: usize,
        /// Number of entries given
        found: usize,
    },
    /// The high corner does not lie above the low corner
    #[error("axis {axis} has non-positive extent ({low} to {high})")]
    NonPositiveExtent {
        /// Axis
        axis: usize,
        /// Low corner coordinate
        low: f64,
        /// High corner coordinate
        high: f64,
    },
    /// The cell size is zero, negative or not finite
    #[error("invalid cell size {0}")]
    InvalidCellSize(f64),
    /// The cell size does not tile an axis
    #[error("cell size {cell_size} does not tile axis {axis} of extent {extent}")]
    CellSizeMismatch {
        /// Axis
        axis: usize,
        /// Extent of the axis
        extent: f64,
        /// Requested cell size
        cell_size: f64,
    },
    /// An axis was given zero cells
    #[error("axis {0} has zero cells")]
    ZeroCells(usize),
    /// An axis has more cells than can be indexed
    #[error("axis {axis} needs more than the {max} cells an index space can address")]
    TooManyCells {
        /// Axis
        axis: usize,
        /// Largest supported number of cells along an axis
        max: usize,
    },
}

/// Errors raised while constructing a global grid
#[derive(Debug, Error)]
pub enum GridError {
    /// Invalid domain on this process
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Partitioning failed
    #[error(transparent)]
    Partition(#[from] PartitionError),
    /// Processes in the collective were given different grids
    #[error("processes in the collective disagree on the global grid")]
    InconsistentInput,
    /// Construction failed on another process
    #[error("grid construction failed on another process")]
    RemoteFailure,
    /// The collective could not form a Cartesian topology
    #[error("cannot create Cartesian topology: {0}")]
    Topology(String),
    /// File access failed
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// RON serialisation failed
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Ron(#[from] ron::Error),
    /// RON parsing failed
    #[cfg(feature = "serde")]
    #[error(transparent)]
    RonParse(#[from] ron::error::SpannedError),
    /// A stored decomposition was written by a different collective
    #[cfg(feature = "serde")]
    #[error("decomposition was written by {found} processes, collective has {expected}")]
    RankCountMismatch {
        /// Size of the current collective
        expected: usize,
        /// Size recorded in the file
        found: usize,
    },
}

impl GridError {
    /// Status code shared with the other processes during construction
    pub(crate) fn status_code(&self) -> i64 {
        match self {
            GridError::Domain(_) => 1,
            GridError::Partition(_) => 2,
            GridError::InconsistentInput => 3,
            _ => 4,
        }
    }
}
