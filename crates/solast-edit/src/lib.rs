//! solast Edit - Structural edits over compiler AST trees
//!
//! This crate changes trees decoded by `solast-ast` in place. Every edit
//! names its target by node id and re-locates it on each call, so edits can
//! be chained freely.
//!
//! # Operations
//!
//! - **Mutation**: replace, splice, remove and insert around a node
//! - **Reorder**: stable sort of a contract's members by priority list or
//!   comparator, rolled back if the comparator fails
//! - **Shuffle**: seeded permutation of the members of chosen kinds
//! - **Offsets**: shifting source ranges and minting fresh ids for moved subtrees
//! - **Comments**: attaching comments scanned from source text
//! - **Rename** and **transplant**: renaming variables, merging contracts
//!
//! # Usage
//!
//! ```ignore
//! use solast_edit::{insert, Position};
//! use solast_ast::{builders, decode, IdGen};
//!
//! let mut unit = decode(&json)?;
//! let mut ids = IdGen::after(&unit);
//! let version = builders::pragma(&mut ids, &["solidity", "^0.8.0"]);
//! insert(&mut unit, first_id, version, Position::Before)?;
//! ```

mod comments;
mod error;
mod offsets;
mod ops;
mod rename;
mod reorder;
mod transplant;

#[cfg(test)]
mod testing;

pub use comments::*;
pub use error::*;
pub use offsets::*;
pub use ops::*;
pub use rename::*;
pub use reorder::*;
pub use transplant::*;
