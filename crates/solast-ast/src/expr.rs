//! Expression nodes

use serde::{Deserialize, Serialize};

use crate::*;

family! {
    Expression {
        Assignment,
        Conditional,
        TupleExpression,
        UnaryOperation,
        BinaryOperation,
        FunctionCall,
        FunctionCallOptions,
        NewExpression,
        MemberAccess,
        IndexAccess,
        IndexRangeAccess,
        Identifier,
        Literal,
        ElementaryTypeNameExpression,
    }
}

impl Expression {
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    /// Strip redundant single-element parentheses.
    pub fn unparenthesized(&self) -> &Expression {
        match self {
            Expression::TupleExpression(tuple) if !tuple.is_inline_array => {
                match tuple.components.as_slice() {
                    [Some(inner)] => inner.unparenthesized(),
                    _ => self,
                }
            }
            _ => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Assignment {
    pub id: NodeId,
    pub src: SourceRange,
    pub operator: String,
    pub left_hand_side: Expression,
    pub right_hand_side: Expression,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(Assignment { one left_hand_side, one right_hand_side });

/// `c ? a : b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Conditional {
    pub id: NodeId,
    pub src: SourceRange,
    pub condition: Expression,
    pub true_expression: Expression,
    pub false_expression: Expression,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(Conditional { one condition, one true_expression, one false_expression });

/// A parenthesized tuple, or an inline array when `is_inline_array` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct TupleExpression {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default)]
    pub is_inline_array: bool,
    pub components: Vec<Option<Expression>>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(TupleExpression { many_opt components });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct UnaryOperation {
    pub id: NodeId,
    pub src: SourceRange,
    pub prefix: bool,
    pub operator: String,
    pub sub_expression: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<NodeId>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(UnaryOperation { one sub_expression });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct BinaryOperation {
    pub id: NodeId,
    pub src: SourceRange,
    pub operator: String,
    pub left_expression: Expression,
    pub right_expression: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_type: Option<TypeDescriptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<NodeId>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(BinaryOperation { one left_expression, one right_expression });

impl BinaryOperation {
    /// Operators whose result is a `bool`
    pub fn is_boolean(&self) -> bool {
        matches!(
            self.operator.as_str(),
            "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||"
        )
    }
}

/// A call, type conversion or struct constructor. `names` is non-empty for
/// calls with named arguments: `f({a: 1, b: 2})`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct FunctionCall {
    pub id: NodeId,
    pub src: SourceRange,
    pub expression: Expression,
    pub arguments: Vec<Expression>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub name_locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FunctionCallKind>,
    #[serde(default)]
    pub try_call: bool,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(FunctionCall { one expression, many arguments });

impl FunctionCall {
    /// Name of the callee when it is a plain identifier.
    pub fn callee_name(&self) -> Option<&str> {
        self.expression.as_identifier().map(|ident| ident.name.as_str())
    }
}

/// `expr{value: v, gas: g}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct FunctionCallOptions {
    pub id: NodeId,
    pub src: SourceRange,
    pub expression: Expression,
    #[serde(default)]
    pub names: Vec<String>,
    pub options: Vec<Expression>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(FunctionCallOptions { one expression, many options });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct NewExpression {
    pub id: NodeId,
    pub src: SourceRange,
    pub type_name: TypeName,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(NewExpression { one type_name });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct MemberAccess {
    pub id: NodeId,
    pub src: SourceRange,
    pub expression: Expression,
    pub member_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_declaration: Option<NodeId>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(MemberAccess { one expression });

/// `base[index]`; the index is absent in type expressions like `uint[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct IndexAccess {
    pub id: NodeId,
    pub src: SourceRange,
    pub base_expression: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_expression: Option<Expression>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(IndexAccess { one base_expression, opt index_expression });

/// `base[start:end]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct IndexRangeAccess {
    pub id: NodeId,
    pub src: SourceRange,
    pub base_expression: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_expression: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_expression: Option<Expression>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(IndexRangeAccess { one base_expression, opt start_expression, opt end_expression });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Identifier {
    pub id: NodeId,
    pub src: SourceRange,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_declaration: Option<NodeId>,
    #[serde(default)]
    pub overloaded_declarations: Vec<NodeId>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(Identifier {}
    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
);

/// A literal. `value` is absent for hex strings that are not valid UTF-8;
/// `hex_value` always carries the raw bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Literal {
    pub id: NodeId,
    pub src: SourceRange,
    pub kind: LiteralKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdenomination: Option<String>,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(Literal {});

/// An elementary type used as an expression, e.g. the callee of `address(x)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ElementaryTypeNameExpression {
    pub id: NodeId,
    pub src: SourceRange,
    pub type_name: ElementaryTypeName,
    #[serde(flatten)]
    pub annotations: ExprAnnotations,
}

ast_node!(ElementaryTypeNameExpression { one type_name });
