//! Collecting how names are used across a source unit

use std::collections::{HashMap, HashSet};
use std::ptr;

use solast_ast::{walk_with_ancestors, AstNode, Expression, NodeId, NodeRef, SourceUnit};

/// Members whose use marks their subject as an address
pub const VALUE_TRANSFER: &[&str] = &["transfer", "send", "call", "sender"];

/// Members whose use marks their subject as an array
pub const ARRAY_MEMBERS: &[&str] = &["length", "push", "pop"];

/// Everything observed about one name
#[derive(Debug, Clone, Default)]
pub struct Usage {
    /// Contract enclosing the first use, if any
    pub container: Option<NodeId>,
    /// Subject of a value-transfer member
    pub value_transfer: bool,
    /// Indexed, or subject of an array member
    pub indexed: bool,
    /// Distinct member names read from it, in first-use order
    pub fields: Vec<String>,
    /// Read or written as a plain value
    pub bare: bool,
    /// Arguments of the first `emit` naming it
    pub emitted: Option<Vec<Expression>>,
    /// Arguments of the first call naming it
    pub called: Option<Vec<Expression>>,
}

impl Usage {
    /// Whether the name is used like a stored value rather than only as
    /// an event or a function.
    pub fn is_storage(&self) -> bool {
        self.value_transfer || self.indexed || self.bare || !self.fields.is_empty()
    }

    fn add_field(&mut self, member: &str) {
        if VALUE_TRANSFER.contains(&member) {
            self.value_transfer = true;
        } else if ARRAY_MEMBERS.contains(&member) {
            self.indexed = true;
        } else if !self.fields.iter().any(|field| field == member) {
            self.fields.push(member.to_string());
        }
    }
}

/// Uses of every identifier in a unit, keyed by name in first-use order
#[derive(Debug, Default)]
pub struct UsageTable {
    order: Vec<String>,
    usages: HashMap<String, Usage>,
}

impl UsageTable {
    pub fn collect(unit: &SourceUnit) -> Self {
        let mut table = Self::default();
        walk_with_ancestors(unit.node_ref(), |node, ancestors| {
            if let NodeRef::Identifier(ident) = node {
                table.record(&ident.name, ancestors);
            }
        });
        table
    }

    pub fn get(&self, name: &str) -> Option<&Usage> {
        self.usages.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Usage)> {
        self.order
            .iter()
            .filter_map(|name| self.usages.get(name).map(|usage| (name.as_str(), usage)))
    }

    fn entry(&mut self, name: &str, container: Option<NodeId>) -> &mut Usage {
        if !self.usages.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.usages.entry(name.to_string()).or_insert_with(|| Usage {
            container,
            ..Usage::default()
        })
    }

    fn record(&mut self, name: &str, ancestors: &[NodeRef<'_>]) {
        let container = ancestors.iter().rev().find_map(|node| match node {
            NodeRef::ContractDefinition(contract) => Some(contract.id),
            _ => None,
        });
        let usage = self.entry(name, container);

        let mut up = ancestors.iter().rev().copied();
        let parent = up.next();
        let grandparent = up.next();

        match parent {
            Some(NodeRef::FunctionCall(call)) if is_identifier(&call.expression, name) => {
                let arguments = Some(call.arguments.clone());
                if let Some(NodeRef::EmitStatement(_)) = grandparent {
                    usage.emitted = usage.emitted.take().or(arguments);
                } else {
                    usage.called = usage.called.take().or(arguments);
                }
            }
            Some(NodeRef::MemberAccess(access)) if is_identifier(&access.expression, name) => {
                usage.add_field(&access.member_name);
            }
            Some(NodeRef::IndexAccess(index)) if is_identifier(&index.base_expression, name) => {
                usage.indexed = true;
                // `name[i].field` makes it an array of structs
                if let Some(NodeRef::MemberAccess(access)) = grandparent {
                    if let Expression::IndexAccess(inner) = &access.expression {
                        if ptr::eq(inner.as_ref(), index) {
                            usage.add_field(&access.member_name);
                        }
                    }
                }
            }
            _ => usage.bare = true,
        }
    }
}

fn is_identifier(expr: &Expression, name: &str) -> bool {
    matches!(expr, Expression::Identifier(ident) if ident.name == name)
}

/// Names introduced by any declaration or import alias in `unit`.
pub fn declared_names(unit: &SourceUnit) -> HashSet<String> {
    let mut names = HashSet::new();
    walk_with_ancestors(unit.node_ref(), |node, _| match node {
        NodeRef::ContractDefinition(_)
        | NodeRef::StructDefinition(_)
        | NodeRef::EnumDefinition(_)
        | NodeRef::UserDefinedValueTypeDefinition(_)
        | NodeRef::FunctionDefinition(_)
        | NodeRef::VariableDeclaration(_)
        | NodeRef::ModifierDefinition(_)
        | NodeRef::EventDefinition(_)
        | NodeRef::ErrorDefinition(_) => {
            names.extend(node.name().map(str::to_string));
        }
        NodeRef::ImportDirective(import) => {
            if !import.unit_alias.is_empty() {
                names.insert(import.unit_alias.clone());
            }
            for alias in &import.symbol_aliases {
                names.insert(alias.local.clone().unwrap_or_else(|| alias.foreign.name.clone()));
            }
        }
        _ => {}
    });
    names
}
