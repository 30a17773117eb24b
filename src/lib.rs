//! solast - Typed Solidity compiler ASTs
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates:
//!
//! - `ast`: the node model, JSON decoding and the Solidity printer
//! - `lexer`: comment scanning over source text
//! - `edit`: id-addressed mutation, reordering and comment attachment
//! - `enrich`: declaring the names a fragment uses but never declares

// Re-export main crates for convenience
pub use solast_ast as ast;
pub use solast_edit as edit;
pub use solast_enrich as enrich;
pub use solast_lexer as lexer;
