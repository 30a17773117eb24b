//! Error types for tree edits

use solast_ast::{NodeId, NodeKind};
use thiserror::Error;

/// Why an edit was refused. A failed edit never leaves the tree modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// E-EDIT-001: No node carries the requested id
    #[error("no node with id {0}")]
    NotFound(NodeId),

    /// E-EDIT-002: The operation would replace or detach the root
    #[error("node {0} is the root of the tree")]
    TargetIsRoot(NodeId),

    /// E-EDIT-003: The new node cannot fill the field the target sits in
    #[error("a {found} node cannot take the place of node {id} in a {slot} field")]
    KindMismatch {
        id: NodeId,
        /// The family or node type the field accepts
        slot: &'static str,
        found: NodeKind,
    },

    /// E-EDIT-004: The target sits in a single-node field, not a list
    #[error("node {0} is not an element of a list")]
    NotInList(NodeId),

    /// E-EDIT-005: The target has no body list to insert into
    #[error("{kind} node {id} has no child list")]
    NoChildList { id: NodeId, kind: NodeKind },

    /// E-EDIT-006: The target fills a field that must not be empty
    #[error("node {0} fills a required field and cannot be removed")]
    Required(NodeId),

    /// E-EDIT-007: The id names a node that cannot hold declarations
    #[error("node {0} is not a contract or source unit")]
    NotAContainer(NodeId),

    /// E-EDIT-008: No container was named and the unit has no contract
    #[error("the source unit has no contract")]
    NoContainer,

    /// E-EDIT-009: The comparator gave up; the original order was restored
    #[error("comparator failed: {0}")]
    ComparatorFailed(String),
}

impl EditError {
    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            EditError::NotFound(_) => "E-EDIT-001",
            EditError::TargetIsRoot(_) => "E-EDIT-002",
            EditError::KindMismatch { .. } => "E-EDIT-003",
            EditError::NotInList(_) => "E-EDIT-004",
            EditError::NoChildList { .. } => "E-EDIT-005",
            EditError::Required(_) => "E-EDIT-006",
            EditError::NotAContainer(_) => "E-EDIT-007",
            EditError::NoContainer => "E-EDIT-008",
            EditError::ComparatorFailed(_) => "E-EDIT-009",
        }
    }
}
