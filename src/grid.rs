//! Grids
mod builder;
mod global_grid;
mod ownership;

pub use builder::{GlobalGridBuilder, Resolution};
pub use global_grid::{create_global_grid, GlobalGrid, MAX_NUM_CELL};
pub use ownership::OwnershipWindow;
