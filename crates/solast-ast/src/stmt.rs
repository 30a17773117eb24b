//! Statement nodes

use serde::{Deserialize, Serialize};

use crate::*;

family! {
    /// Anything that can appear in a block
    Statement {
        Block,
        UncheckedBlock,
        PlaceholderStatement,
        IfStatement,
        TryStatement,
        ForStatement,
        WhileStatement,
        DoWhileStatement,
        Continue,
        Break,
        Return,
        Throw,
        EmitStatement,
        RevertStatement,
        VariableDeclarationStatement,
        ExpressionStatement,
        InlineAssembly,
    }
}

impl Statement {
    /// Statements that close with a brace and take no `;` terminator.
    pub fn is_brace_delimited(&self) -> bool {
        matches!(
            self,
            Statement::Block(_)
                | Statement::UncheckedBlock(_)
                | Statement::IfStatement(_)
                | Statement::TryStatement(_)
                | Statement::ForStatement(_)
                | Statement::WhileStatement(_)
                | Statement::DoWhileStatement(_)
                | Statement::InlineAssembly(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Block {
    pub id: NodeId,
    pub src: SourceRange,
    pub statements: Vec<Statement>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(Block { many statements }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.statements).into())
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct UncheckedBlock {
    pub id: NodeId,
    pub src: SourceRange,
    pub statements: Vec<Statement>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(UncheckedBlock { many statements }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.statements).into())
    }
);

/// The `_` inside a modifier body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct PlaceholderStatement {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(PlaceholderStatement {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct IfStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub condition: Expression,
    pub true_body: Statement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_body: Option<Statement>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(IfStatement { one condition, one true_body, opt false_body });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct TryStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub external_call: Expression,
    pub clauses: Vec<TryCatchClause>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(TryStatement { one external_call, many clauses });

/// The success clause (first) or a `catch` clause of a try statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct TryCatchClause {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default)]
    pub error_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParameterList>,
    pub block: Block,
}

ast_node!(TryCatchClause { opt parameters, one block });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ForStatement {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization_expression: Option<Statement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_expression: Option<ExpressionStatement>,
    pub body: Statement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_simple_counter_loop: Option<bool>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(ForStatement {
    opt initialization_expression,
    opt condition,
    opt loop_expression,
    one body,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct WhileStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub condition: Expression,
    pub body: Statement,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(WhileStatement { one condition, one body });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct DoWhileStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub condition: Expression,
    pub body: Statement,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(DoWhileStatement { one body, one condition });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Continue {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(Continue {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Break {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(Break {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Return {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_return_parameters: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(Return { opt expression });

/// Pre-0.5 `throw`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct Throw {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(Throw {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct EmitStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub event_call: FunctionCall,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(EmitStatement { one event_call });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct RevertStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub error_call: FunctionCall,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(RevertStatement { one error_call });

/// `T a = v;` or `(T a, , U b) = f();`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct VariableDeclarationStatement {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(default)]
    pub assignments: Vec<Option<NodeId>>,
    pub declarations: Vec<Option<VariableDeclaration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Expression>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(VariableDeclarationStatement { many_opt declarations, opt initial_value });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct ExpressionStatement {
    pub id: NodeId,
    pub src: SourceRange,
    pub expression: Expression,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(ExpressionStatement { one expression });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct InlineAssembly {
    pub id: NodeId,
    pub src: SourceRange,
    #[serde(rename = "AST")]
    pub ast: YulBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_references: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eof_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

line_node!(InlineAssembly { one ast });
