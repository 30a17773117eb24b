//! solast Enrich - Declaring what a fragment uses but never declares
//!
//! A contract fragment cut out of a larger codebase usually refers to
//! storage, events and functions declared elsewhere. The restore pass
//! guesses a declaration for each such name from how it is used, so the
//! fragment can be printed and compiled on its own.
//!
//! # Classification
//!
//! - **Address**: subject of `transfer`, `send`, `call` or `sender`
//! - **Array**: indexed, or subject of `length`, `push` or `pop`, and nothing else
//! - **Struct**: subject of other member reads, one field per member name;
//!   an array of that struct when also indexed
//! - **Scalar**: any other use as a value
//! - **Event**: only ever emitted
//! - **Function**: only ever called
//!
//! # Usage
//!
//! ```ignore
//! use solast_enrich::restore;
//!
//! let mut unit = solast_ast::decode(&json)?;
//! let report = restore(&mut unit);
//! for restored in &report.restored {
//!     println!("{} ({})", restored.name, restored.classification);
//! }
//! ```

mod classify;
mod restore;
mod settings;
mod usage;

#[cfg(test)]
mod testing;

pub use classify::{classify_storage, Classification};
pub use restore::{restore, restore_with, RestoreReport, Restored};
pub use settings::{is_elementary_type_name, EnrichSettings, BUILTINS};
pub use usage::{declared_names, Usage, UsageTable, ARRAY_MEMBERS, VALUE_TRANSFER};
