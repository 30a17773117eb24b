//! Declaration nodes: source units, contracts and their members

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::*;

/// Root of one compiled file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct SourceUnit {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_symbols: Option<BTreeMap<String, Vec<NodeId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental_solidity: Option<bool>,
    pub nodes: Vec<Declaration>,
}

ast_node!(SourceUnit { many nodes }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.nodes).into())
    }
);

family! {
    /// Anything that can appear at file level or inside a contract body
    Declaration {
        PragmaDirective,
        ImportDirective,
        ContractDefinition,
        FunctionDefinition,
        VariableDeclaration,
        StructDefinition,
        EnumDefinition,
        EventDefinition,
        ErrorDefinition,
        ModifierDefinition,
        UserDefinedValueTypeDefinition,
        UsingForDirective,
    }
}

impl Declaration {
    /// Declared name, or `None` for pragmas, imports and using-for directives.
    pub fn name(&self) -> Option<&str> {
        self.node_ref().name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct PragmaDirective {
    pub id: NodeId,
    pub src: SourceRange,
    pub literals: Vec<String>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(PragmaDirective {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ImportDirective {
    pub id: NodeId,
    pub src: SourceRange,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_path: Option<String>,
    #[serde(default)]
    pub unit_alias: String,
    #[serde(default)]
    pub symbol_aliases: Vec<SymbolAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_unit: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

/// One `{A as B}` entry of an import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAlias {
    pub foreign: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
}

impl AstNode for ImportDirective {
    fn id(&self) -> Option<NodeId> {
        Some(self.id)
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn src(&self) -> SourceRange {
        self.src
    }

    fn src_mut(&mut self) -> &mut SourceRange {
        &mut self.src
    }

    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::ImportDirective(self)
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.symbol_aliases
            .iter()
            .map(|alias| NodeRef::Identifier(&alias.foreign))
            .collect()
    }

    fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        self.symbol_aliases
            .iter_mut()
            .map(|alias| Field::one(&mut alias.foreign).into())
            .collect()
    }

    fn comments(&self) -> Option<&Comments> {
        Some(&self.comments)
    }

    fn comments_mut(&mut self) -> Option<&mut Comments> {
        Some(&mut self.comments)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ContractDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    pub contract_kind: ContractKind,
    #[serde(default)]
    pub r#abstract: bool,
    #[serde(default)]
    pub base_contracts: Vec<InheritanceSpecifier>,
    #[serde(default)]
    pub contract_dependencies: Vec<NodeId>,
    #[serde(default)]
    pub used_errors: Vec<NodeId>,
    #[serde(default)]
    pub used_events: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_implemented: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linearized_base_contracts: Option<Vec<NodeId>>,
    #[serde(
        default,
        rename = "internalFunctionIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_function_ids: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<NodeId>,
    pub nodes: Vec<Declaration>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(ContractDefinition { opt documentation, many base_contracts, many nodes }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.nodes).into())
    }
);

impl ContractDefinition {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.nodes.iter().filter_map(|node| match node {
            Declaration::FunctionDefinition(f) => Some(f.as_ref()),
            _ => None,
        })
    }

    pub fn state_variables(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.nodes.iter().filter_map(|node| match node {
            Declaration::VariableDeclaration(v) => Some(v.as_ref()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct InheritanceSpecifier {
    pub id: NodeId,
    pub src: SourceRange,
    pub base_name: IdentifierPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Expression>>,
}

ast_node!(InheritanceSpecifier { one base_name, opt_many arguments });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct UsingForDirective {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_name: Option<IdentifierPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_list: Option<Vec<UsingForFunction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<TypeName>,
    #[serde(default)]
    pub global: bool,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

/// One entry of `using {f, g as +} for T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingForFunction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<IdentifierPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<IdentifierPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl AstNode for UsingForDirective {
    fn id(&self) -> Option<NodeId> {
        Some(self.id)
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn src(&self) -> SourceRange {
        self.src
    }

    fn src_mut(&mut self) -> &mut SourceRange {
        &mut self.src
    }

    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::UsingForDirective(self)
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        let mut out = crate::node::Children::default();
        out.opt(&self.library_name);
        for entry in self.function_list.iter().flatten() {
            out.opt(&entry.function);
            out.opt(&entry.definition);
        }
        out.opt(&self.type_name);
        out.into_vec()
    }

    fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        let mut slots: Vec<SlotMut<'_>> = vec![Field::opt(&mut self.library_name).into()];
        for entry in self.function_list.iter_mut().flatten() {
            slots.push(Field::opt(&mut entry.function).into());
            slots.push(Field::opt(&mut entry.definition).into());
        }
        slots.push(Field::opt(&mut self.type_name).into());
        slots
    }

    fn comments(&self) -> Option<&Comments> {
        Some(&self.comments)
    }

    fn comments_mut(&mut self) -> Option<&mut Comments> {
        Some(&mut self.comments)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct StructDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    #[serde(default)]
    pub visibility: Visibility,
    pub members: Vec<VariableDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(StructDefinition { opt documentation, many members }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.members).into())
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct EnumDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    pub members: Vec<EnumValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(EnumDefinition { opt documentation, many members }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.members).into())
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct EnumValue {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
}

ast_node!(EnumValue {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct UserDefinedValueTypeDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    pub underlying_type: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(UserDefinedValueTypeDefinition { one underlying_type });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ParameterList {
    pub id: NodeId,
    pub src: SourceRange,
    pub parameters: Vec<VariableDeclaration>,
}

ast_node!(ParameterList { many parameters }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.parameters).into())
    }
);

impl ParameterList {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct OverrideSpecifier {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default)]
    pub overrides: Vec<IdentifierPath>,
}

ast_node!(OverrideSpecifier { many overrides });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    pub kind: FunctionKind,
    pub state_mutability: StateMutability,
    pub visibility: Visibility,
    #[serde(default)]
    pub r#virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<OverrideSpecifier>,
    pub parameters: ParameterList,
    pub return_parameters: ParameterList,
    #[serde(default)]
    pub modifiers: Vec<ModifierInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Block>,
    #[serde(default)]
    pub implemented: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_functions: Option<Vec<NodeId>>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(FunctionDefinition {
    opt documentation,
    one parameters,
    opt overrides,
    many modifiers,
    one return_parameters,
    opt body,
}
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        self.body.as_mut().map(|body| Field::many(&mut body.statements).into())
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<TypeName>,
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub state_variable: bool,
    #[serde(default)]
    pub storage_location: StorageLocation,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<OverrideSpecifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_functions: Option<Vec<NodeId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptions: Option<TypeDescriptions>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(VariableDeclaration {
    opt documentation,
    opt type_name,
    opt overrides,
    opt value,
}
    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ModifierDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    #[serde(default)]
    pub visibility: Visibility,
    pub parameters: ParameterList,
    #[serde(default)]
    pub r#virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<OverrideSpecifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_modifiers: Option<Vec<NodeId>>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(ModifierDefinition { opt documentation, one parameters, opt overrides, opt body }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        self.body.as_mut().map(|body| Field::many(&mut body.statements).into())
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ModifierInvocation {
    pub id: NodeId,
    pub src: SourceRange,
    pub modifier_name: IdentifierPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Expression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModifierInvocationKind>,
}

ast_node!(ModifierInvocation { one modifier_name, opt_many arguments });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct EventDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    pub parameters: ParameterList,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(EventDefinition { opt documentation, one parameters });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ErrorDefinition {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<StructuredDocumentation>,
    pub parameters: ParameterList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(ErrorDefinition { opt documentation, one parameters });

/// A dotted name referring to a declaration, such as `Lib.Thing`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct IdentifierPath {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default)]
    pub name_locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_declaration: Option<NodeId>,
}

ast_node!(IdentifierPath {}
    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
);

/// NatSpec text attached to a declaration, with the comment markers removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct StructuredDocumentation {
    pub id: NodeId,
    pub src: SourceRange,
    pub text: String,
}

ast_node!(StructuredDocumentation {});
