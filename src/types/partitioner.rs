//! Partitioning strategies

/// Strategy used to arrange the processes of a collective over the axes of a grid
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum DimPartitioner {
    /// Choose the arrangement that keeps the cells per process balanced across axes
    #[default]
    Uniform,
    /// Use the given number of processes along each axis
    Manual(Vec<usize>),
}
