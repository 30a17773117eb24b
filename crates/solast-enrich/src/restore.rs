//! The restore pass: declaring what a fragment uses but never declares

use std::collections::{HashMap, HashSet};

use solast_ast::builders::{array_type, block, elementary_type, event, function, state_variable, struct_definition, user_type, variable};
use solast_ast::{
    find_named, walk, walk_mut, AstNode, Declaration, Expression, IdGen, LiteralKind, NodeId, NodeKind, NodeRef, Slot,
    SourceUnit, StorageLocation, TypeName, VariableDeclaration,
};
use tracing::debug;

use crate::classify::{classify_storage, Classification};
use crate::settings::EnrichSettings;
use crate::usage::{declared_names, Usage, UsageTable, VALUE_TRANSFER};

/// One synthesized declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub name: String,
    pub id: NodeId,
    pub classification: Classification,
    /// Contract, or source unit, the declaration was added to
    pub container: NodeId,
}

/// Everything a restore pass added, in the order it was added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: Vec<Restored>,
}

impl RestoreReport {
    pub fn is_empty(&self) -> bool {
        self.restored.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Restored> {
        self.restored.iter().find(|r| r.name == name)
    }
}

/// Declare every name `unit` uses without declaring, with default settings.
pub fn restore(unit: &mut SourceUnit) -> RestoreReport {
    restore_with(unit, &EnrichSettings::default())
}

/// Declare every name `unit` uses without declaring.
///
/// Events are declared first, then stored values, then functions, so that
/// function parameters can take their types from the stored values. Running
/// the pass again on its own output adds nothing.
pub fn restore_with(unit: &mut SourceUnit, settings: &EnrichSettings) -> RestoreReport {
    let declared = declared_names(unit);
    let table = UsageTable::collect(unit);
    let unresolved: Vec<(String, Usage)> = table
        .iter()
        .filter(|(name, _)| !declared.contains(*name) && !settings.is_builtin(name))
        .map(|(name, usage)| (name.to_string(), usage.clone()))
        .collect();
    let mut taken = taken_names(unit, &declared, &table);

    let mut pass = Pass {
        ids: IdGen::after(unit),
        settings,
        fronts: HashMap::new(),
        report: RestoreReport::default(),
    };

    for (name, usage) in &unresolved {
        if let (false, Some(arguments)) = (usage.is_storage(), &usage.emitted) {
            pass.declare_event(unit, &table, name, usage.container, arguments);
        }
    }

    for (name, usage) in &unresolved {
        if let Some(class) = classify_storage(usage) {
            pass.declare_storage(unit, &mut taken, name, usage.container, class);
        }
    }

    for (name, usage) in &unresolved {
        if usage.is_storage() || usage.emitted.is_some() {
            continue;
        }
        if let Some(arguments) = &usage.called {
            pass.declare_function(unit, name, usage.container, arguments);
        }
    }

    pass.report
}

/// Where declarations for one name go
#[derive(Debug, Clone, Copy)]
enum Target {
    /// Index of a contract in the unit's top-level nodes
    Contract(usize),
    Unit,
}

struct Pass<'s> {
    ids: IdGen,
    settings: &'s EnrichSettings,
    /// Declarations already put at the front of each container
    fronts: HashMap<NodeId, usize>,
    report: RestoreReport,
}

impl Pass<'_> {
    fn declare_event(
        &mut self,
        unit: &mut SourceUnit,
        table: &UsageTable,
        name: &str,
        container: Option<NodeId>,
        arguments: &[Expression],
    ) {
        let mut parameters = Vec::with_capacity(arguments.len());
        for (i, argument) in arguments.iter().enumerate() {
            let type_name = if is_address_like(unit, table, argument) {
                "address"
            } else {
                self.settings.default_type.as_str()
            };
            let ty = elementary_type(&mut self.ids, type_name);
            parameters.push(variable(&mut self.ids, &format!("param{i}"), ty));
        }
        let decl = event(&mut self.ids, name, parameters);
        let id = decl.id;
        self.place(unit, container, decl.into(), true, name, id, Classification::Event);
    }

    fn declare_storage(
        &mut self,
        unit: &mut SourceUnit,
        taken: &mut HashSet<String>,
        name: &str,
        container: Option<NodeId>,
        class: Classification,
    ) {
        let (target, scope) = resolve(unit, container);
        let type_name = match &class {
            Classification::Address => elementary_type(&mut self.ids, "address"),
            Classification::Array => {
                let element = elementary_type(&mut self.ids, &self.settings.default_type);
                array_type(&mut self.ids, element)
            }
            Classification::Struct { fields, array } => {
                let struct_name = struct_name_for(name, taken);
                let mut members = Vec::with_capacity(fields.len());
                for field in fields {
                    let ty = elementary_type(&mut self.ids, &self.settings.default_type);
                    members.push(variable(&mut self.ids, field, ty));
                }
                let definition = struct_definition(&mut self.ids, &struct_name, members, Some(scope));
                let struct_id = definition.id;
                let entry = restored(&struct_name, struct_id, class.clone(), scope);
                self.insert(unit, target, definition.into(), true, entry);

                let element = user_type(&mut self.ids, &struct_name, Some(struct_id));
                if *array {
                    array_type(&mut self.ids, element)
                } else {
                    element
                }
            }
            Classification::Scalar | Classification::Event | Classification::Function => {
                elementary_type(&mut self.ids, &self.settings.default_type)
            }
        };

        let decl = state_variable(&mut self.ids, name, type_name, Some(scope));
        let id = decl.id;
        self.insert(unit, target, decl.into(), false, restored(name, id, class, scope));
    }

    fn declare_function(&mut self, unit: &mut SourceUnit, name: &str, container: Option<NodeId>, arguments: &[Expression]) {
        let mut parameters: Vec<VariableDeclaration> = Vec::with_capacity(arguments.len());
        for (i, argument) in arguments.iter().enumerate() {
            let param_name = match argument.unparenthesized().as_identifier() {
                Some(ident) if !parameters.iter().any(|p| p.name == ident.name) => ident.name.clone(),
                _ => format!("arg{i}"),
            };
            let ty = self.infer_type(unit, argument);
            let memory = needs_memory(unit, &ty);
            let mut param = variable(&mut self.ids, &param_name, ty);
            if memory {
                param.storage_location = StorageLocation::Memory;
            }
            parameters.push(param);
        }

        let (_, scope) = resolve(unit, container);
        let body = block(&mut self.ids, Vec::new());
        let decl = function(&mut self.ids, name, parameters, Some(body), Some(scope));
        let id = decl.id;
        self.place(unit, container, decl.into(), false, name, id, Classification::Function);
    }

    /// A fresh type for the value of `expr`, copied from whatever declares it.
    fn infer_type(&mut self, unit: &SourceUnit, expr: &Expression) -> TypeName {
        match type_of(unit, expr) {
            Some(TypeSource::Declared(declared)) => {
                let mut copy = declared.clone();
                let ids = &mut self.ids;
                walk_mut(copy.node_mut(), |node| {
                    if node.id().is_some() {
                        node.set_id(ids.fresh());
                    }
                });
                copy
            }
            Some(TypeSource::Named(name)) => elementary_type(&mut self.ids, &name),
            None => elementary_type(&mut self.ids, &self.settings.default_type),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place(
        &mut self,
        unit: &mut SourceUnit,
        container: Option<NodeId>,
        decl: Declaration,
        front: bool,
        name: &str,
        id: NodeId,
        class: Classification,
    ) {
        let (target, scope) = resolve(unit, container);
        self.insert(unit, target, decl, front, restored(name, id, class, scope));
    }

    /// Add `decl` to the front of its container, after earlier front
    /// additions, or to the end.
    fn insert(&mut self, unit: &mut SourceUnit, target: Target, decl: Declaration, front: bool, restored: Restored) {
        let Some(members) = members_at(unit, target) else {
            return;
        };
        if front {
            let count = self.fronts.entry(restored.container).or_insert(0);
            members.insert(*count, decl);
            *count += 1;
        } else {
            members.push(decl);
        }
        debug!(
            name = %restored.name,
            id = %restored.id,
            classification = %restored.classification,
            container = %restored.container,
            "declaration restored"
        );
        self.report.restored.push(restored);
    }
}

fn restored(name: &str, id: NodeId, classification: Classification, container: NodeId) -> Restored {
    Restored {
        name: name.to_string(),
        id,
        classification,
        container,
    }
}

/// The contract enclosing the first use, else the first contract, else the
/// unit itself. Returns where to insert and the container's id.
fn resolve(unit: &SourceUnit, container: Option<NodeId>) -> (Target, NodeId) {
    let contract_at = |index: usize| match &unit.nodes[index] {
        Declaration::ContractDefinition(contract) => Some((Target::Contract(index), contract.id)),
        _ => None,
    };
    let named = container.and_then(|id| {
        unit.nodes
            .iter()
            .position(|decl| matches!(decl, Declaration::ContractDefinition(c) if c.id == id))
    });
    let first = || {
        unit.nodes
            .iter()
            .position(|decl| matches!(decl, Declaration::ContractDefinition(_)))
    };
    named
        .or_else(first)
        .and_then(contract_at)
        .unwrap_or((Target::Unit, unit.id))
}

fn members_at(unit: &mut SourceUnit, target: Target) -> Option<&mut Vec<Declaration>> {
    match target {
        Target::Unit => Some(&mut unit.nodes),
        Target::Contract(index) => match unit.nodes.get_mut(index) {
            Some(Declaration::ContractDefinition(contract)) => Some(&mut contract.nodes),
            _ => None,
        },
    }
}

/// Every name a synthesized struct must not reuse: declarations, every
/// identifier the unit reads, and every type it names.
fn taken_names(unit: &SourceUnit, declared: &HashSet<String>, table: &UsageTable) -> HashSet<String> {
    let mut taken = declared.clone();
    taken.extend(table.iter().map(|(name, _)| name.to_string()));
    walk(unit.node_ref(), |node, _| match node {
        NodeRef::IdentifierPath(path) => {
            taken.insert(path.name.clone());
        }
        NodeRef::UserDefinedTypeName(ty) => {
            taken.insert(ty.display_name().to_string());
        }
        _ => {}
    });
    taken
}

/// `balance` becomes `Balance`. A name that is already capitalized, or
/// whose capitalized form is taken, gets a `Data` suffix, then a counter
/// until the name is free. The chosen name is added to `taken`.
fn struct_name_for(name: &str, taken: &mut HashSet<String>) -> String {
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    let mut candidate = capitalized.clone();
    let mut n = 1;
    while candidate == name || taken.contains(&candidate) {
        candidate = if n == 1 {
            format!("{capitalized}Data")
        } else {
            format!("{capitalized}Data{n}")
        };
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

enum TypeSource<'a> {
    Declared(&'a TypeName),
    Named(String),
}

fn declared_type<'a>(unit: &'a SourceUnit, name: &str) -> Option<&'a TypeName> {
    find_named(unit.node_ref(), NodeKind::VariableDeclaration, name)
        .into_iter()
        .find_map(|node| match node {
            NodeRef::VariableDeclaration(var) => var.type_name.as_ref(),
            _ => None,
        })
}

fn type_of<'a>(unit: &'a SourceUnit, expr: &Expression) -> Option<TypeSource<'a>> {
    let named = |name: &str| Some(TypeSource::Named(name.to_string()));
    match expr {
        Expression::Identifier(ident) => declared_type(unit, &ident.name).map(TypeSource::Declared),
        Expression::Literal(literal) => match literal.kind {
            LiteralKind::Bool => named("bool"),
            LiteralKind::Number => None,
            LiteralKind::String | LiteralKind::UnicodeString => named("string"),
            LiteralKind::HexString => named("bytes"),
        },
        Expression::MemberAccess(access) if matches!(access.member_name.as_str(), "sender" | "origin" | "coinbase") => {
            named("address")
        }
        Expression::IndexAccess(index) => {
            let ident = index.base_expression.as_identifier()?;
            match declared_type(unit, &ident.name)? {
                TypeName::ArrayTypeName(array) => Some(TypeSource::Declared(&array.base_type)),
                TypeName::Mapping(mapping) => Some(TypeSource::Declared(&mapping.value_type)),
                _ => None,
            }
        }
        Expression::FunctionCall(call) => match &call.expression {
            Expression::ElementaryTypeNameExpression(conversion) => named(&conversion.type_name.name),
            Expression::Identifier(callee) => find_named(unit.node_ref(), NodeKind::FunctionDefinition, &callee.name)
                .into_iter()
                .find_map(|node| match node {
                    NodeRef::FunctionDefinition(f) => match f.return_parameters.parameters.as_slice() {
                        [single] => single.type_name.as_ref().map(TypeSource::Declared),
                        _ => None,
                    },
                    _ => None,
                }),
            _ => None,
        },
        Expression::BinaryOperation(op) => match op.operator.as_str() {
            "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||" => named("bool"),
            _ => type_of(unit, &op.left_expression),
        },
        Expression::UnaryOperation(op) if op.operator == "!" => named("bool"),
        Expression::UnaryOperation(op) => type_of(unit, &op.sub_expression),
        Expression::Conditional(cond) => type_of(unit, &cond.true_expression),
        Expression::TupleExpression(_) => {
            let inner = expr.unparenthesized();
            if std::ptr::eq(inner, expr) {
                None
            } else {
                type_of(unit, inner)
            }
        }
        _ => None,
    }
}

/// Reference types, including structs declared in the unit, need a data
/// location as parameters.
fn needs_memory(unit: &SourceUnit, ty: &TypeName) -> bool {
    match ty {
        TypeName::UserDefinedTypeName(user) => {
            !find_named(unit.node_ref(), NodeKind::StructDefinition, user.display_name()).is_empty()
        }
        other => other.is_reference(),
    }
}

/// Whether an emitted argument looks like an address: `msg.sender`, an
/// address conversion, or a name that is an address or is used as one.
fn is_address_like(unit: &SourceUnit, table: &UsageTable, expr: &Expression) -> bool {
    match expr.unparenthesized() {
        Expression::MemberAccess(access) => VALUE_TRANSFER.contains(&access.member_name.as_str()),
        Expression::FunctionCall(call) => matches!(
            &call.expression,
            Expression::ElementaryTypeNameExpression(conversion) if conversion.type_name.name == "address"
        ),
        Expression::Identifier(ident) => {
            table.get(&ident.name).is_some_and(|usage| usage.value_transfer)
                || declared_type(unit, &ident.name).is_some_and(TypeName::is_address)
        }
        _ => false,
    }
}
