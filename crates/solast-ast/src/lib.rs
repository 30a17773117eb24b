//! solast AST - Typed model of the Solidity compiler's JSON AST
//!
//! This crate defines every node kind the compiler emits, decoding and
//! encoding of the compiler JSON, tree traversal, and a printer back to
//! Solidity source text.

#[macro_use]
mod node;

mod span;
mod id;
mod attrs;
mod comment;
mod decl;
mod stmt;
mod expr;
mod types;
mod yul;
mod decode;
mod visit;
mod printer;

pub mod builders;

#[cfg(test)]
mod testing;

pub use node::*;
pub use span::*;
pub use id::*;
pub use attrs::*;
pub use comment::*;
pub use decl::*;
pub use stmt::*;
pub use expr::*;
pub use types::*;
pub use yul::*;
pub use decode::*;
pub use visit::*;
pub use printer::*;
