//! Guessing what an undeclared name is from how it is used

use std::fmt;

use crate::usage::Usage;

/// What a synthesized declaration was guessed to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `address name;`
    Address,
    /// `uint256[] name;`
    Array,
    /// `struct Name { uint256 field; ... } Name name;`, or `Name[] name;`
    /// when the name is also indexed
    Struct { fields: Vec<String>, array: bool },
    /// `uint256 name;`
    Scalar,
    /// `event Name(uint256 param0, ...);`
    Event,
    /// `function name(uint256 arg0, ...) internal {}`
    Function,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Address => write!(f, "address"),
            Classification::Array => write!(f, "array"),
            Classification::Struct { array: false, .. } => write!(f, "struct"),
            Classification::Struct { array: true, .. } => write!(f, "struct array"),
            Classification::Scalar => write!(f, "scalar"),
            Classification::Event => write!(f, "event"),
            Classification::Function => write!(f, "function"),
        }
    }
}

/// Classify a name used as a stored value. Value transfer wins over
/// member reads, and member reads win over indexing. Indexing wins over
/// bare use: a name both indexed and used bare, as `items` in
/// `items[0] = 1; copy = items;`, becomes an array. A plain scalar is the
/// fallback. Returns `None` for names only emitted or called.
pub fn classify_storage(usage: &Usage) -> Option<Classification> {
    if !usage.is_storage() {
        return None;
    }
    let class = if usage.value_transfer {
        Classification::Address
    } else if !usage.fields.is_empty() {
        Classification::Struct {
            fields: usage.fields.clone(),
            array: usage.indexed,
        }
    } else if usage.indexed {
        Classification::Array
    } else {
        Classification::Scalar
    };
    Some(class)
}
