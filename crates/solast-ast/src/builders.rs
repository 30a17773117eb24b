//! Constructors for synthesized nodes
//!
//! Every node built here takes a fresh id from the supplied generator and
//! carries the synthetic source range, since it has no text of its own.

use crate::*;

fn synthetic() -> SourceRange {
    SourceRange::synthetic()
}

pub fn elementary_type(ids: &mut IdGen, name: &str) -> TypeName {
    let state_mutability = (name == "address").then_some(StateMutability::NonPayable);
    TypeName::from(ElementaryTypeName {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        state_mutability,
        type_descriptions: None,
    })
}

pub fn array_type(ids: &mut IdGen, base_type: TypeName) -> TypeName {
    TypeName::from(ArrayTypeName {
        id: ids.fresh(),
        src: synthetic(),
        base_type,
        length: None,
        type_descriptions: None,
    })
}

pub fn mapping_type(ids: &mut IdGen, key_type: TypeName, value_type: TypeName) -> TypeName {
    TypeName::from(Mapping {
        id: ids.fresh(),
        src: synthetic(),
        key_type,
        key_name: None,
        key_name_location: None,
        value_type,
        value_name: None,
        value_name_location: None,
        type_descriptions: None,
    })
}

/// A reference to a struct, enum or contract by name
pub fn user_type(ids: &mut IdGen, name: &str, referenced: Option<NodeId>) -> TypeName {
    let path_node = IdentifierPath {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        name_locations: Vec::new(),
        referenced_declaration: referenced,
    };
    TypeName::from(UserDefinedTypeName {
        id: ids.fresh(),
        src: synthetic(),
        name: None,
        path_node: Some(path_node),
        referenced_declaration: referenced,
        type_descriptions: None,
    })
}

/// A parameter, struct member or local variable
pub fn variable(ids: &mut IdGen, name: &str, type_name: TypeName) -> VariableDeclaration {
    VariableDeclaration {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        name_location: None,
        documentation: None,
        type_name: Some(type_name),
        constant: false,
        mutability: Mutability::Mutable,
        state_variable: false,
        storage_location: StorageLocation::Default,
        visibility: Visibility::Internal,
        overrides: None,
        value: None,
        indexed: None,
        scope: None,
        function_selector: None,
        base_functions: None,
        type_descriptions: None,
        comments: Comments::default(),
    }
}

pub fn state_variable(ids: &mut IdGen, name: &str, type_name: TypeName, scope: Option<NodeId>) -> VariableDeclaration {
    VariableDeclaration {
        state_variable: true,
        scope,
        ..variable(ids, name, type_name)
    }
}

pub fn parameter_list(ids: &mut IdGen, parameters: Vec<VariableDeclaration>) -> ParameterList {
    ParameterList { id: ids.fresh(), src: synthetic(), parameters }
}

pub fn block(ids: &mut IdGen, statements: Vec<Statement>) -> Block {
    Block { id: ids.fresh(), src: synthetic(), statements, comments: Comments::default() }
}

/// An internal, non-payable function
pub fn function(
    ids: &mut IdGen,
    name: &str,
    parameters: Vec<VariableDeclaration>,
    body: Option<Block>,
    scope: Option<NodeId>,
) -> FunctionDefinition {
    let implemented = body.is_some();
    FunctionDefinition {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        name_location: None,
        documentation: None,
        kind: FunctionKind::Function,
        state_mutability: StateMutability::NonPayable,
        visibility: Visibility::Internal,
        r#virtual: false,
        overrides: None,
        parameters: parameter_list(ids, parameters),
        return_parameters: parameter_list(ids, Vec::new()),
        modifiers: Vec::new(),
        body,
        implemented,
        scope,
        function_selector: None,
        base_functions: None,
        comments: Comments::default(),
    }
}

pub fn event(ids: &mut IdGen, name: &str, parameters: Vec<VariableDeclaration>) -> EventDefinition {
    EventDefinition {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        name_location: None,
        documentation: None,
        parameters: parameter_list(ids, parameters),
        anonymous: false,
        event_selector: None,
        comments: Comments::default(),
    }
}

pub fn struct_definition(
    ids: &mut IdGen,
    name: &str,
    members: Vec<VariableDeclaration>,
    scope: Option<NodeId>,
) -> StructDefinition {
    StructDefinition {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        name_location: None,
        documentation: None,
        visibility: Visibility::Public,
        members,
        canonical_name: None,
        scope,
        comments: Comments::default(),
    }
}

pub fn contract(ids: &mut IdGen, name: &str, nodes: Vec<Declaration>) -> ContractDefinition {
    ContractDefinition {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        name_location: None,
        documentation: None,
        contract_kind: ContractKind::Contract,
        r#abstract: false,
        base_contracts: Vec::new(),
        contract_dependencies: Vec::new(),
        used_errors: Vec::new(),
        used_events: Vec::new(),
        fully_implemented: None,
        linearized_base_contracts: None,
        internal_function_ids: None,
        canonical_name: None,
        scope: None,
        nodes,
        comments: Comments::default(),
    }
}

pub fn pragma(ids: &mut IdGen, literals: &[&str]) -> PragmaDirective {
    PragmaDirective {
        id: ids.fresh(),
        src: synthetic(),
        literals: literals.iter().map(|l| l.to_string()).collect(),
        comments: Comments::default(),
    }
}

pub fn source_unit(ids: &mut IdGen, nodes: Vec<Declaration>) -> SourceUnit {
    SourceUnit {
        id: ids.fresh(),
        src: synthetic(),
        absolute_path: None,
        exported_symbols: None,
        license: None,
        experimental_solidity: None,
        nodes,
    }
}

pub fn identifier(ids: &mut IdGen, name: &str) -> Expression {
    Expression::from(Identifier {
        id: ids.fresh(),
        src: synthetic(),
        name: name.to_string(),
        referenced_declaration: None,
        overloaded_declarations: Vec::new(),
        annotations: ExprAnnotations::default(),
    })
}

pub fn literal(ids: &mut IdGen, kind: LiteralKind, value: &str) -> Expression {
    Expression::from(Literal {
        id: ids.fresh(),
        src: synthetic(),
        kind,
        value: Some(value.to_string()),
        hex_value: None,
        subdenomination: None,
        annotations: ExprAnnotations::default(),
    })
}

pub fn number(ids: &mut IdGen, value: &str) -> Expression {
    literal(ids, LiteralKind::Number, value)
}

pub fn call(ids: &mut IdGen, callee: Expression, arguments: Vec<Expression>) -> FunctionCall {
    FunctionCall {
        id: ids.fresh(),
        src: synthetic(),
        expression: callee,
        arguments,
        names: Vec::new(),
        name_locations: Vec::new(),
        kind: Some(FunctionCallKind::FunctionCall),
        try_call: false,
        annotations: ExprAnnotations::default(),
    }
}

pub fn member(ids: &mut IdGen, expression: Expression, member_name: &str) -> Expression {
    Expression::from(MemberAccess {
        id: ids.fresh(),
        src: synthetic(),
        expression,
        member_name: member_name.to_string(),
        member_location: None,
        referenced_declaration: None,
        annotations: ExprAnnotations::default(),
    })
}

pub fn index(ids: &mut IdGen, base: Expression, index: Expression) -> Expression {
    Expression::from(IndexAccess {
        id: ids.fresh(),
        src: synthetic(),
        base_expression: base,
        index_expression: Some(index),
        annotations: ExprAnnotations::default(),
    })
}

pub fn assign(ids: &mut IdGen, operator: &str, lhs: Expression, rhs: Expression) -> Expression {
    Expression::from(Assignment {
        id: ids.fresh(),
        src: synthetic(),
        operator: operator.to_string(),
        left_hand_side: lhs,
        right_hand_side: rhs,
        annotations: ExprAnnotations::default(),
    })
}

pub fn binary(ids: &mut IdGen, lhs: Expression, operator: &str, rhs: Expression) -> Expression {
    Expression::from(BinaryOperation {
        id: ids.fresh(),
        src: synthetic(),
        operator: operator.to_string(),
        left_expression: lhs,
        right_expression: rhs,
        common_type: None,
        function: None,
        annotations: ExprAnnotations::default(),
    })
}

pub fn expression_statement(ids: &mut IdGen, expression: Expression) -> Statement {
    Statement::from(ExpressionStatement {
        id: ids.fresh(),
        src: synthetic(),
        expression,
        comments: Comments::default(),
    })
}

pub fn emit(ids: &mut IdGen, event_call: FunctionCall) -> Statement {
    Statement::from(EmitStatement {
        id: ids.fresh(),
        src: synthetic(),
        event_call,
        comments: Comments::default(),
    })
}

pub fn return_statement(ids: &mut IdGen, expression: Option<Expression>) -> Statement {
    Statement::from(Return {
        id: ids.fresh(),
        src: synthetic(),
        expression,
        function_return_parameters: None,
        comments: Comments::default(),
    })
}
