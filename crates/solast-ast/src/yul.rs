//! Inline assembly (Yul) nodes
//!
//! Yul nodes carry an optional id: older compilers emit none, and nodes
//! without one cannot be addressed by the edit operations.

use serde::{Deserialize, Serialize};

use crate::*;

family! {
    YulStatement {
        YulBlock,
        YulAssignment,
        YulExpressionStatement,
        YulVariableDeclaration,
        YulFunctionDefinition,
        YulIf,
        YulSwitch,
        YulForLoop,
        YulBreak,
        YulContinue,
        YulLeave,
    }
}

family! {
    YulExpression {
        YulFunctionCall,
        YulIdentifier,
        YulBuiltinName,
        YulLiteral,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub statements: Vec<YulStatement>,
}

ast_node!(YulBlock { many statements }
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        Some(Field::many(&mut self.statements).into())
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulTypedName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub name: String,
    #[serde(default)]
    pub r#type: String,
}

ast_node!(YulTypedName {}
    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulLiteral {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    /// `number`, `string` or `bool`
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_value: Option<String>,
    #[serde(default)]
    pub r#type: String,
}

ast_node!(YulLiteral {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub name: String,
}

ast_node!(YulIdentifier {}
    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulBuiltinName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub name: String,
}

ast_node!(YulBuiltinName {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub variable_names: Vec<YulIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<YulExpression>,
}

ast_node!(YulAssignment { many variable_names, opt value });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulFunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub function_name: YulExpression,
    #[serde(default)]
    pub arguments: Vec<YulExpression>,
}

ast_node!(YulFunctionCall { one function_name, many arguments });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulExpressionStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub expression: YulExpression,
}

ast_node!(YulExpressionStatement { one expression });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulVariableDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub variables: Vec<YulTypedName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<YulExpression>,
}

ast_node!(YulVariableDeclaration { many variables, opt value });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulFunctionDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<YulTypedName>,
    #[serde(default)]
    pub return_variables: Vec<YulTypedName>,
    pub body: YulBlock,
}

ast_node!(YulFunctionDefinition { many parameters, many return_variables, one body });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulIf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub condition: YulExpression,
    pub body: YulBlock,
}

ast_node!(YulIf { one condition, one body });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulSwitch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub expression: YulExpression,
    pub cases: Vec<YulCase>,
}

ast_node!(YulSwitch { one expression, many cases });

/// The value of a switch case: a literal, or the string `"default"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YulCaseValue {
    Literal(YulLiteral),
    Default(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub value: YulCaseValue,
    pub body: YulBlock,
}

impl AstNode for YulCase {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = Some(id);
    }

    fn src(&self) -> SourceRange {
        self.src
    }

    fn src_mut(&mut self) -> &mut SourceRange {
        &mut self.src
    }

    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::YulCase(self)
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        match &self.value {
            YulCaseValue::Literal(literal) => vec![NodeRef::YulLiteral(literal), NodeRef::YulBlock(&self.body)],
            YulCaseValue::Default(_) => vec![NodeRef::YulBlock(&self.body)],
        }
    }

    fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        match &mut self.value {
            YulCaseValue::Literal(literal) => {
                vec![Field::one(literal).into(), Field::one(&mut self.body).into()]
            }
            YulCaseValue::Default(_) => vec![Field::one(&mut self.body).into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulForLoop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
    pub pre: YulBlock,
    pub condition: YulExpression,
    pub post: YulBlock,
    pub body: YulBlock,
}

ast_node!(YulForLoop { one pre, one condition, one post, one body });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulBreak {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
}

ast_node!(YulBreak {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulContinue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
}

ast_node!(YulContinue {});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "camelCase")]
pub struct YulLeave {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub src: SourceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_src: Option<String>,
}

ast_node!(YulLeave {});
