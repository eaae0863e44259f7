//! Types

mod decomposition;
mod entity;
mod partitioner;
pub use decomposition::{Decomposition, IndexType};
pub use entity::EntityType;
pub use partitioner::DimPartitioner;

use num::Float;
use std::fmt::Debug;

/// Largest number of axes supported by index spaces and grids
pub const MAX_RANK: usize = 4;

/// Logical axis labels
pub struct Dim;

impl Dim {
    /// First axis
    pub const I: usize = 0;
    /// Second axis
    pub const J: usize = 1;
    /// Third axis
    pub const K: usize = 2;
}

/// Scalar type used for physical coordinates
pub trait RealScalar: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> RealScalar for T {}
