//! Decomposition and index frame tags

/// Which part of the local domain an index space covers
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Decomposition {
    /// Entities owned by the current process
    Own,
    /// Owned entities padded by a halo of the given width wherever a neighbouring process exists
    Ghost(usize),
}

/// Frame in which indices are expressed
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum IndexType {
    /// Indices start at zero on every process
    Local,
    /// Indices into the global grid
    Global,
}
