//! Cartesian domain decomposition of structured grids
//!
//! A [`GlobalGrid`] splits a rectilinear grid of cells over the processes of a
//! collective arranged in a Cartesian process grid. Each process can then ask
//! which cells, nodes, faces and edges it owns, where they lie in space, and
//! which processes neighbour it.
#![cfg_attr(feature = "strict", deny(warnings), deny(unused_crate_dependencies))]
#![warn(missing_docs)]

pub mod domain;
pub mod error;
pub mod grid;
pub mod index_space;
pub mod io;
mod partitioner;
pub mod topology;
pub mod traits;
pub mod types;

pub use grid::{create_global_grid, GlobalGrid, GlobalGridBuilder};
pub use index_space::IndexSpace;
