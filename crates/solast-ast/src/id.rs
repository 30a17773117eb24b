//! Node identity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{max_id, AstNode};

/// Unique identifier of a node within one compilation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

/// Mints ids that do not collide with any id already present in a tree.
#[derive(Debug, Clone)]
pub struct IdGen {
    next: i64,
}

impl IdGen {
    pub fn starting_at(next: i64) -> Self {
        Self { next }
    }

    /// A generator whose first id is one past the largest id under `root`.
    pub fn after(root: &dyn AstNode) -> Self {
        let next = max_id(root.node_ref()).map_or(1, |id| id.0 + 1);
        Self { next }
    }

    pub fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    pub fn peek(&self) -> NodeId {
        NodeId(self.next)
    }
}
