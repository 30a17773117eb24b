//! Keyword-valued attributes that appear on declarations and expressions

use serde::{Deserialize, Serialize};

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)*
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    ContractKind {
        Contract => "contract",
        Interface => "interface",
        Library => "library",
    }
}

keyword_enum! {
    Visibility {
        External => "external",
        Public => "public",
        Internal => "internal",
        Private => "private",
    }
}

keyword_enum! {
    StateMutability {
        Pure => "pure",
        View => "view",
        NonPayable => "nonpayable",
        Payable => "payable",
    }
}

keyword_enum! {
    /// Whether a variable can be written after construction
    Mutability {
        Mutable => "mutable",
        Immutable => "immutable",
        Constant => "constant",
    }
}

keyword_enum! {
    StorageLocation {
        Default => "default",
        Storage => "storage",
        Memory => "memory",
        Calldata => "calldata",
        Transient => "transient",
    }
}

keyword_enum! {
    FunctionKind {
        Function => "function",
        Receive => "receive",
        Constructor => "constructor",
        Fallback => "fallback",
        FreeFunction => "freeFunction",
    }
}

keyword_enum! {
    LiteralKind {
        Bool => "bool",
        Number => "number",
        String => "string",
        HexString => "hexString",
        UnicodeString => "unicodeString",
    }
}

keyword_enum! {
    FunctionCallKind {
        FunctionCall => "functionCall",
        TypeConversion => "typeConversion",
        StructConstructorCall => "structConstructorCall",
    }
}

keyword_enum! {
    ModifierInvocationKind {
        ModifierInvocation => "modifierInvocation",
        BaseConstructorSpecifier => "baseConstructorSpecifier",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Internal
    }
}

impl Default for StateMutability {
    fn default() -> Self {
        StateMutability::NonPayable
    }
}

impl Default for Mutability {
    fn default() -> Self {
        Mutability::Mutable
    }
}

impl Default for StorageLocation {
    fn default() -> Self {
        StorageLocation::Default
    }
}

/// Type information the compiler attaches to typed nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptions {
    #[serde(default)]
    pub type_identifier: Option<String>,
    #[serde(default)]
    pub type_string: Option<String>,
}

/// Annotations shared by every expression kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExprAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_types: Option<Vec<TypeDescriptions>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_constant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_l_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_value_requested: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
}
