//! Node kinds and the slot protocol shared by traversal and mutation.
//!
//! Every concrete node struct implements [`AstNode`]. The fields that own
//! child nodes are exposed twice: as borrowed [`NodeRef`]s for read-only
//! walks, and as typed [`SlotMut`] handles for in-place edits. Both views are
//! generated from a single field list per struct, so they cannot disagree
//! about which children a node has or in which order they appear.

use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::*;

/// Behaviour shared by every node struct
pub trait AstNode: fmt::Debug {
    fn id(&self) -> Option<NodeId>;
    fn set_id(&mut self, id: NodeId);
    fn src(&self) -> SourceRange;
    fn src_mut(&mut self) -> &mut SourceRange;
    fn node_ref(&self) -> NodeRef<'_>;

    /// Owned child nodes, in field order.
    fn children(&self) -> Vec<NodeRef<'_>>;

    /// Mutable handles on every field that owns nodes, in the same order as
    /// [`AstNode::children`].
    fn slots_mut(&mut self) -> Vec<SlotMut<'_>>;

    /// The ordered body list of a container node (contract members, block
    /// statements, struct fields...). `None` for nodes without one.
    fn members_mut(&mut self) -> Option<SlotMut<'_>> {
        None
    }

    /// Comments attached to this node, for node kinds that occupy whole lines.
    fn comments(&self) -> Option<&Comments> {
        None
    }

    fn comments_mut(&mut self) -> Option<&mut Comments> {
        None
    }

    /// The name a rename should rewrite, for declarations and references.
    fn name_mut(&mut self) -> Option<&mut String> {
        None
    }

    fn kind(&self) -> NodeKind {
        self.node_ref().kind()
    }
}

/// A type that can sit in a node-owning field: either a concrete node struct
/// or one of the family enums.
pub trait Slot: Sized {
    /// Name used in diagnostics when a node of the wrong kind is offered.
    const NAME: &'static str;

    fn node(&self) -> &dyn AstNode;
    fn node_mut(&mut self) -> &mut dyn AstNode;

    /// Convert an arbitrary node into this slot type, handing the node back
    /// if its kind is not accepted.
    fn from_node(node: Node) -> Result<Self, Node>;
    fn into_node(self) -> Node;
}

/// A mutable view of one node-owning field
#[derive(Debug)]
pub enum Field<'a, T> {
    One(&'a mut T),
    Opt(&'a mut Option<T>),
    Many(&'a mut Vec<T>),
    /// A positional list with holes, such as tuple components
    ManyOpt(&'a mut Vec<Option<T>>),
    /// A list that may be absent altogether, such as call arguments of a
    /// modifier written without parentheses
    OptMany(&'a mut Option<Vec<T>>),
}

/// Where a node sits inside a [`Field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPos {
    Single,
    Index(usize),
}

impl<'a, T> Field<'a, T> {
    pub fn one(field: &'a mut T) -> Self {
        Field::One(field)
    }

    pub fn opt(field: &'a mut Option<T>) -> Self {
        Field::Opt(field)
    }

    pub fn many(field: &'a mut Vec<T>) -> Self {
        Field::Many(field)
    }

    pub fn many_opt(field: &'a mut Vec<Option<T>>) -> Self {
        Field::ManyOpt(field)
    }

    pub fn opt_many(field: &'a mut Option<Vec<T>>) -> Self {
        Field::OptMany(field)
    }

    pub fn is_list(&self) -> bool {
        !matches!(self, Field::One(_) | Field::Opt(_))
    }

    /// The present nodes of the field, in order.
    pub fn items_mut(self) -> Vec<&'a mut T> {
        match self {
            Field::One(node) => vec![node],
            Field::Opt(node) => node.as_mut().into_iter().collect(),
            Field::Many(nodes) => nodes.iter_mut().collect(),
            Field::ManyOpt(nodes) => nodes.iter_mut().flatten().collect(),
            Field::OptMany(nodes) => nodes.iter_mut().flatten().collect(),
        }
    }
}

impl<T: Slot> Field<'_, T> {
    /// Position of the direct child carrying `id`, if this field owns it.
    pub fn locate(&self, id: NodeId) -> Option<FieldPos> {
        let is = |node: &T| node.node().id() == Some(id);
        match self {
            Field::One(node) => is(node).then_some(FieldPos::Single),
            Field::Opt(node) => node.as_ref().filter(|n| is(*n)).map(|_| FieldPos::Single),
            Field::Many(nodes) => nodes.iter().position(is).map(FieldPos::Index),
            Field::ManyOpt(nodes) => nodes
                .iter()
                .position(|n| n.as_ref().is_some_and(is))
                .map(FieldPos::Index),
            Field::OptMany(nodes) => nodes
                .as_ref()
                .and_then(|nodes| nodes.iter().position(is))
                .map(FieldPos::Index),
        }
    }
}

/// Receives each field of a node with its concrete slot type.
pub trait SlotVisitor {
    type Break;

    fn visit<T: Slot>(&mut self, field: Field<'_, T>) -> ControlFlow<Self::Break>;
}

#[doc(hidden)]
pub trait IdField {
    fn get(&self) -> Option<NodeId>;
    fn set(&mut self, id: NodeId);
}

impl IdField for NodeId {
    fn get(&self) -> Option<NodeId> {
        Some(*self)
    }

    fn set(&mut self, id: NodeId) {
        *self = id;
    }
}

impl IdField for Option<NodeId> {
    fn get(&self) -> Option<NodeId> {
        *self
    }

    fn set(&mut self, id: NodeId) {
        *self = Some(id);
    }
}

#[doc(hidden)]
#[derive(Default)]
pub struct Children<'a>(Vec<NodeRef<'a>>);

impl<'a> Children<'a> {
    pub fn one<T: Slot>(&mut self, node: &'a T) {
        self.0.push(node.node().node_ref());
    }

    pub fn opt<T: Slot>(&mut self, node: &'a Option<T>) {
        if let Some(node) = node {
            self.one(node);
        }
    }

    pub fn many<T: Slot>(&mut self, nodes: &'a [T]) {
        for node in nodes {
            self.one(node);
        }
    }

    pub fn many_opt<T: Slot>(&mut self, nodes: &'a [Option<T>]) {
        for node in nodes.iter().flatten() {
            self.one(node);
        }
    }

    pub fn opt_many<T: Slot>(&mut self, nodes: &'a Option<Vec<T>>) {
        if let Some(nodes) = nodes {
            self.many(nodes);
        }
    }

    pub fn into_vec(self) -> Vec<NodeRef<'a>> {
        self.0
    }
}

/// The `nodeType` discriminator of a JSON node object.
pub fn node_type_of(value: &Value) -> Option<&str> {
    value.get("nodeType").and_then(Value::as_str)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind `{0}`")]
pub struct UnknownNodeKind(pub String);

/// Implements [`AstNode`] from the list of node-owning fields.
///
/// Each field is prefixed with its shape: `one`, `opt`, `many`, `many_opt` or
/// `opt_many`. Extra trait items can follow the field list.
macro_rules! ast_node {
    ($ty:ident { $($card:ident $field:ident),* $(,)? } $($extra:tt)*) => {
        impl $crate::AstNode for $ty {
            fn id(&self) -> Option<$crate::NodeId> {
                $crate::node::IdField::get(&self.id)
            }

            fn set_id(&mut self, id: $crate::NodeId) {
                $crate::node::IdField::set(&mut self.id, id)
            }

            fn src(&self) -> $crate::SourceRange {
                self.src
            }

            fn src_mut(&mut self) -> &mut $crate::SourceRange {
                &mut self.src
            }

            fn node_ref(&self) -> $crate::NodeRef<'_> {
                $crate::NodeRef::$ty(self)
            }

            fn children(&self) -> Vec<$crate::NodeRef<'_>> {
                #[allow(unused_mut)]
                let mut out = $crate::node::Children::default();
                $( out.$card(&self.$field); )*
                out.into_vec()
            }

            fn slots_mut(&mut self) -> Vec<$crate::SlotMut<'_>> {
                vec![$( $crate::Field::$card(&mut self.$field).into() ),*]
            }

            $($extra)*
        }
    };
}

/// [`ast_node!`] for node kinds that occupy whole lines and carry comments.
macro_rules! line_node {
    ($ty:ident { $($fields:tt)* } $($extra:tt)*) => {
        ast_node!($ty { $($fields)* }
            fn comments(&self) -> Option<&$crate::Comments> {
                Some(&self.comments)
            }

            fn comments_mut(&mut self) -> Option<&mut $crate::Comments> {
                Some(&mut self.comments)
            }

            $($extra)*
        );
    };
}

/// Serde impls for an enum of boxed node structs, dispatching on `nodeType`.
macro_rules! tagged_serde {
    ($name:ident { $($kind:ident),* $(,)? }) => {
        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $($name::$kind(node) => ::serde::Serialize::serialize(node, serializer),)*
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use ::serde::de::Error as _;
                const VARIANTS: &[&str] = &[$(stringify!($kind)),*];

                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                let tag = $crate::node::node_type_of(&value).map(str::to_owned);
                match tag.as_deref() {
                    $(Some(stringify!($kind)) => ::serde_json::from_value::<$kind>(value)
                        .map(|node| $name::$kind(Box::new(node)))
                        .map_err(D::Error::custom),)*
                    Some(other) => Err(D::Error::unknown_variant(other, VARIANTS)),
                    None => Err(D::Error::missing_field("nodeType")),
                }
            }
        }
    };
}

/// A family of node kinds that can fill the same field, such as every
/// statement kind.
macro_rules! family {
    ($(#[$meta:meta])* $name:ident { $($kind:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($kind(Box<$kind>),)*
        }

        impl $name {
            pub const KINDS: &'static [$crate::NodeKind] = &[$($crate::NodeKind::$kind),*];

            pub fn kind(&self) -> $crate::NodeKind {
                match self {
                    $($name::$kind(_) => $crate::NodeKind::$kind,)*
                }
            }

            pub fn id(&self) -> Option<$crate::NodeId> {
                $crate::Slot::node(self).id()
            }

            pub fn src(&self) -> $crate::SourceRange {
                $crate::Slot::node(self).src()
            }

            pub fn node_ref(&self) -> $crate::NodeRef<'_> {
                $crate::Slot::node(self).node_ref()
            }
        }

        impl $crate::Slot for $name {
            const NAME: &'static str = stringify!($name);

            fn node(&self) -> &dyn $crate::AstNode {
                match self {
                    $($name::$kind(node) => node.as_ref(),)*
                }
            }

            fn node_mut(&mut self) -> &mut dyn $crate::AstNode {
                match self {
                    $($name::$kind(node) => node.as_mut(),)*
                }
            }

            fn from_node(node: $crate::Node) -> Result<Self, $crate::Node> {
                match node {
                    $($crate::Node::$kind(node) => Ok($name::$kind(node)),)*
                    other => Err(other),
                }
            }

            fn into_node(self) -> $crate::Node {
                match self {
                    $($name::$kind(node) => $crate::Node::$kind(node),)*
                }
            }
        }

        impl From<$name> for $crate::Node {
            fn from(node: $name) -> Self {
                $crate::Slot::into_node(node)
            }
        }

        $(
            impl From<$kind> for $name {
                fn from(node: $kind) -> Self {
                    $name::$kind(Box::new(node))
                }
            }
        )*

        tagged_serde!($name { $($kind),* });
    };
}

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Discriminator of every node kind in the tree
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($kind,)*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind),*];

            /// The compiler's `nodeType` string for this kind
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = UnknownNodeKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($kind) => Ok(NodeKind::$kind),)*
                    other => Err(UnknownNodeKind(other.to_string())),
                }
            }
        }

        /// An owned node of any kind
        #[derive(Debug, Clone, PartialEq)]
        pub enum Node {
            $($kind(Box<$kind>),)*
        }

        impl Node {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Node::$kind(_) => NodeKind::$kind,)*
                }
            }

            pub fn as_dyn(&self) -> &dyn AstNode {
                match self {
                    $(Node::$kind(node) => node.as_ref(),)*
                }
            }

            pub fn as_dyn_mut(&mut self) -> &mut dyn AstNode {
                match self {
                    $(Node::$kind(node) => node.as_mut(),)*
                }
            }
        }

        $(
            impl From<$kind> for Node {
                fn from(node: $kind) -> Self {
                    Node::$kind(Box::new(node))
                }
            }
        )*

        tagged_serde!(Node { $($kind),* });

        /// A borrowed node of any kind
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($kind(&'a $kind),)*
        }

        impl<'a> NodeRef<'a> {
            pub fn kind(self) -> NodeKind {
                match self {
                    $(NodeRef::$kind(_) => NodeKind::$kind,)*
                }
            }

            pub fn node(self) -> &'a dyn AstNode {
                match self {
                    $(NodeRef::$kind(node) => node,)*
                }
            }

            pub fn to_node(self) -> Node {
                match self {
                    $(NodeRef::$kind(node) => Node::$kind(Box::new(node.clone())),)*
                }
            }
        }
    };
}

macro_rules! slot_types {
    (families: [$($family:ident),* $(,)?], nodes: [$($ty:ident),* $(,)?]) => {
        /// A mutable handle on one node-owning field, tagged with its slot
        /// type so that visitors can work with the concrete element type.
        #[derive(Debug)]
        pub enum SlotMut<'a> {
            $($family(Field<'a, $family>),)*
            $($ty(Field<'a, $ty>),)*
        }

        impl<'a> SlotMut<'a> {
            pub fn accept<V: SlotVisitor>(self, visitor: &mut V) -> ControlFlow<V::Break> {
                match self {
                    $(SlotMut::$family(field) => visitor.visit(field),)*
                    $(SlotMut::$ty(field) => visitor.visit(field),)*
                }
            }
        }

        $(
            impl<'a> From<Field<'a, $family>> for SlotMut<'a> {
                fn from(field: Field<'a, $family>) -> Self {
                    SlotMut::$family(field)
                }
            }
        )*

        $(
            impl<'a> From<Field<'a, $ty>> for SlotMut<'a> {
                fn from(field: Field<'a, $ty>) -> Self {
                    SlotMut::$ty(field)
                }
            }

            impl Slot for $ty {
                const NAME: &'static str = stringify!($ty);

                fn node(&self) -> &dyn AstNode {
                    self
                }

                fn node_mut(&mut self) -> &mut dyn AstNode {
                    self
                }

                fn from_node(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$ty(node) => Ok(*node),
                        other => Err(other),
                    }
                }

                fn into_node(self) -> Node {
                    Node::$ty(Box::new(self))
                }
            }
        )*
    };
}

node_kinds! {
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    ContractDefinition,
    InheritanceSpecifier,
    UsingForDirective,
    StructDefinition,
    EnumDefinition,
    EnumValue,
    UserDefinedValueTypeDefinition,
    ParameterList,
    OverrideSpecifier,
    FunctionDefinition,
    VariableDeclaration,
    ModifierDefinition,
    ModifierInvocation,
    EventDefinition,
    ErrorDefinition,
    IdentifierPath,
    StructuredDocumentation,
    ElementaryTypeName,
    UserDefinedTypeName,
    FunctionTypeName,
    Mapping,
    ArrayTypeName,
    Block,
    UncheckedBlock,
    PlaceholderStatement,
    IfStatement,
    TryCatchClause,
    TryStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    Continue,
    Break,
    Return,
    Throw,
    EmitStatement,
    RevertStatement,
    VariableDeclarationStatement,
    ExpressionStatement,
    InlineAssembly,
    Conditional,
    Assignment,
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
    ElementaryTypeNameExpression,
    Literal,
    YulBlock,
    YulTypedName,
    YulLiteral,
    YulIdentifier,
    YulBuiltinName,
    YulAssignment,
    YulFunctionCall,
    YulExpressionStatement,
    YulVariableDeclaration,
    YulFunctionDefinition,
    YulIf,
    YulCase,
    YulSwitch,
    YulForLoop,
    YulBreak,
    YulContinue,
    YulLeave,
}

slot_types! {
    families: [Declaration, Statement, Expression, TypeName, YulStatement, YulExpression],
    nodes: [
        VariableDeclaration,
        ParameterList,
        OverrideSpecifier,
        ModifierInvocation,
        InheritanceSpecifier,
        IdentifierPath,
        Identifier,
        StructuredDocumentation,
        EnumValue,
        TryCatchClause,
        Block,
        ExpressionStatement,
        FunctionCall,
        ElementaryTypeName,
        YulBlock,
        YulTypedName,
        YulLiteral,
        YulIdentifier,
        YulCase,
    ]
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> Option<NodeId> {
        self.node().id()
    }

    pub fn src(self) -> SourceRange {
        self.node().src()
    }

    pub fn children(self) -> Vec<NodeRef<'a>> {
        self.node().children()
    }

    pub fn comments(self) -> Option<&'a Comments> {
        self.node().comments()
    }

    /// The declared or referenced name of the node, for kinds that have one.
    pub fn name(self) -> Option<&'a str> {
        let name = match self {
            NodeRef::ContractDefinition(n) => &n.name,
            NodeRef::StructDefinition(n) => &n.name,
            NodeRef::EnumDefinition(n) => &n.name,
            NodeRef::EnumValue(n) => &n.name,
            NodeRef::UserDefinedValueTypeDefinition(n) => &n.name,
            NodeRef::FunctionDefinition(n) => &n.name,
            NodeRef::VariableDeclaration(n) => &n.name,
            NodeRef::ModifierDefinition(n) => &n.name,
            NodeRef::EventDefinition(n) => &n.name,
            NodeRef::ErrorDefinition(n) => &n.name,
            NodeRef::IdentifierPath(n) => &n.name,
            NodeRef::Identifier(n) => &n.name,
            NodeRef::YulTypedName(n) => &n.name,
            NodeRef::YulIdentifier(n) => &n.name,
            NodeRef::YulBuiltinName(n) => &n.name,
            NodeRef::YulFunctionDefinition(n) => &n.name,
            _ => return None,
        };
        Some(name.as_str())
    }
}

impl Node {
    pub fn id(&self) -> Option<NodeId> {
        self.as_dyn().id()
    }

    pub fn node_ref(&self) -> NodeRef<'_> {
        self.as_dyn().node_ref()
    }
}
