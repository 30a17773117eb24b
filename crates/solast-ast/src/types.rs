//! Type name nodes

use serde::{Deserialize, Serialize};

use crate::*;

family! {
    TypeName {
        ElementaryTypeName,
        UserDefinedTypeName,
        FunctionTypeName,
        Mapping,
        ArrayTypeName,
    }
}

impl TypeName {
    /// Types that need a data location when used as a function parameter.
    pub fn is_reference(&self) -> bool {
        match self {
            TypeName::ElementaryTypeName(t) => matches!(t.name.as_str(), "string" | "bytes"),
            TypeName::ArrayTypeName(_) | TypeName::Mapping(_) => true,
            TypeName::UserDefinedTypeName(_) | TypeName::FunctionTypeName(_) => false,
        }
    }

    pub fn is_address(&self) -> bool {
        matches!(self, TypeName::ElementaryTypeName(t) if t.name == "address")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ElementaryTypeName {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    /// `payable` marks `address payable`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<StateMutability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
}

ast_node!(ElementaryTypeName {});

impl ElementaryTypeName {
    pub fn is_payable_address(&self) -> bool {
        self.name == "address" && self.state_mutability == Some(StateMutability::Payable)
    }
}

/// A reference to a struct, enum, contract or user-defined value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct UserDefinedTypeName {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_node: Option<IdentifierPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_declaration: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
}

ast_node!(UserDefinedTypeName { opt path_node });

impl UserDefinedTypeName {
    /// The written name, taken from the path node when present.
    pub fn display_name(&self) -> &str {
        match (&self.path_node, &self.name) {
            (Some(path), _) => &path.name,
            (None, Some(name)) => name,
            (None, None) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct FunctionTypeName {
    pub id: NodeId,
    pub src: SourceRange,
    pub visibility: Visibility,
    pub state_mutability: StateMutability,
    pub parameter_types: ParameterList,
    pub return_parameter_types: ParameterList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
}

ast_node!(FunctionTypeName { one parameter_types, one return_parameter_types });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Mapping {
    pub id: NodeId,
    pub src: SourceRange,
    pub key_type: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name_location: Option<String>,
    pub value_type: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
}

ast_node!(Mapping { one key_type, one value_type });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ArrayTypeName {
    pub id: NodeId,
    pub src: SourceRange,
    pub base_type: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
}

ast_node!(ArrayTypeName { one base_type, opt length });
