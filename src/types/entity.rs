//! Mesh entity kinds

/// Kind of mesh entity addressed by an index space
///
/// Cells are counted as stored. Every other kind may carry one extra boundary
/// entity along an axis, which only exists when that axis is not periodic.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EntityType {
    /// Mesh cell
    Cell,
    /// Mesh node
    Node,
    /// Face normal to the given axis
    Face(usize),
    /// Edge parallel to the given axis
    Edge(usize),
}

impl EntityType {
    /// Does this entity have one more instance than cells along `axis` on a non-periodic grid?
    pub fn has_boundary_entity(&self, axis: usize) -> bool {
        match self {
            EntityType::Cell => false,
            EntityType::Node => true,
            EntityType::Face(d) => *d == axis,
            EntityType::Edge(d) => *d != axis,
        }
    }
}
