//! Traits

mod cartesian;
mod collective;
#[cfg(feature = "serde")]
mod io;

pub use cartesian::CartesianTopology;
pub use collective::Collective;
#[cfg(feature = "serde")]
pub use io::{ConvertToSerializable, RONExport, RONImport};
