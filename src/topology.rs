//! Process collectives and Cartesian topologies
mod local;
#[cfg(feature = "mpi")]
mod parallel;

pub use local::{RowMajorTopology, SerialCollective, VirtualCollective};
