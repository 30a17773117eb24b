//! Enrichment settings

use serde::{Deserialize, Serialize};

/// Names that are always in scope without a declaration
pub const BUILTINS: &[&str] = &[
    "msg", "block", "tx", "now", "gasleft", "this", "super", "abi", "type", "require", "revert", "assert",
    "keccak256", "sha256", "sha3", "ripemd160", "ecrecover", "addmod", "mulmod", "selfdestruct", "suicide",
    "blockhash", "blobhash", "payable",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichSettings {
    /// Extra names to treat as declared, such as library globals
    pub builtins: Vec<String>,
    /// Type given to values nothing else is known about
    pub default_type: String,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        Self {
            builtins: Vec::new(),
            default_type: "uint256".to_string(),
        }
    }
}

impl EnrichSettings {
    pub fn is_builtin(&self, name: &str) -> bool {
        BUILTINS.contains(&name) || is_elementary_type_name(name) || self.builtins.iter().any(|b| b == name)
    }
}

/// `uint8`, `bytes32`, `address` and the other elementary type keywords.
pub fn is_elementary_type_name(name: &str) -> bool {
    match name {
        "address" | "bool" | "string" | "bytes" | "byte" | "int" | "uint" | "fixed" | "ufixed" => true,
        _ => ["uint", "int", "bytes"].iter().any(|prefix| {
            name.strip_prefix(prefix)
                .is_some_and(|bits| !bits.is_empty() && bits.bytes().all(|b| b.is_ascii_digit()))
        }),
    }
}
