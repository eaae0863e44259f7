//! Input and output
#[cfg(feature = "serde")]
mod ron;

#[cfg(feature = "serde")]
pub use ron::DecompositionSummary;
