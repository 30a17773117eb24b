//! Id-addressed structural edits
//!
//! Every operation re-locates its target by walking the tree through the
//! slot protocol, so no positions are cached between edits. The new nodes
//! are converted to the target field's type before anything is touched,
//! which keeps a refused edit from leaving the tree half-modified.

use std::ops::ControlFlow;

use solast_ast::{with_node_mut, AstNode, Field, FieldPos, Node, NodeId, Slot, SlotVisitor};
use tracing::debug;

use crate::EditError;

/// Where [`insert`] puts the new node relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Just before the target, in the list that holds it
    Before,
    /// Just after the target, in the list that holds it
    After,
    /// At the start of the target's own body list
    FirstChild,
    /// At the end of the target's own body list
    LastChild,
}

/// Replace the node carrying `target` with `node`, returning the old node.
pub fn replace(root: &mut dyn AstNode, target: NodeId, node: impl Into<Node>) -> Result<Node, EditError> {
    let removed = edit(root, target, Splice::Replace(node.into()), "replace")?;
    removed.ok_or(EditError::NotFound(target))
}

/// Splice `nodes` into the list position of `target`, which is dropped.
pub fn replace_with_many(root: &mut dyn AstNode, target: NodeId, nodes: Vec<Node>) -> Result<(), EditError> {
    edit(
        root,
        target,
        Splice::List { offset: 0, remove: 1, nodes },
        "replace_with_many",
    )
    .map(drop)
}

/// Detach the node carrying `target` from its parent.
///
/// An element of a positional list with holes, such as a tuple component,
/// leaves a hole behind so that the positions of its siblings are kept.
/// Returns the removed node, or `None` if the field was already empty.
pub fn remove(root: &mut dyn AstNode, target: NodeId) -> Result<Option<Node>, EditError> {
    edit(root, target, Splice::Remove, "remove")
}

/// Insert `node` relative to the node carrying `target`.
pub fn insert(root: &mut dyn AstNode, target: NodeId, node: impl Into<Node>, position: Position) -> Result<(), EditError> {
    let node = node.into();
    match position {
        Position::Before => {
            let splice = Splice::List { offset: 0, remove: 0, nodes: vec![node] };
            edit(root, target, splice, "insert_before").map(drop)
        }
        Position::After => {
            let splice = Splice::List { offset: 1, remove: 0, nodes: vec![node] };
            edit(root, target, splice, "insert_after").map(drop)
        }
        Position::FirstChild => push_child(root, target, node, true),
        Position::LastChild => push_child(root, target, node, false),
    }
}

enum Splice {
    Replace(Node),
    Remove,
    /// Remove `remove` elements at the target's index plus `offset`, and
    /// put `nodes` in their place.
    List { offset: usize, remove: usize, nodes: Vec<Node> },
}

fn edit(root: &mut dyn AstNode, target: NodeId, splice: Splice, op: &'static str) -> Result<Option<Node>, EditError> {
    let result = if root.id() == Some(target) {
        Err(EditError::TargetIsRoot(target))
    } else {
        let mut editor = Editor { target, splice: Some(splice) };
        match editor.search(root) {
            ControlFlow::Break(result) => result,
            ControlFlow::Continue(()) => Err(EditError::NotFound(target)),
        }
    };
    log_outcome(op, target, &result);
    result
}

fn log_outcome<T>(op: &'static str, target: NodeId, result: &Result<T, EditError>) {
    match result {
        Ok(_) => debug!(op, id = %target, "edit applied"),
        Err(err) => debug!(op, id = %target, code = err.code(), error = %err, "edit refused"),
    }
}

struct Editor {
    target: NodeId,
    splice: Option<Splice>,
}

type EditResult = Result<Option<Node>, EditError>;

impl Editor {
    fn search(&mut self, node: &mut dyn AstNode) -> ControlFlow<EditResult> {
        for slot in node.slots_mut() {
            slot.accept(self)?;
        }
        ControlFlow::Continue(())
    }
}

impl SlotVisitor for Editor {
    type Break = EditResult;

    fn visit<T: Slot>(&mut self, field: Field<'_, T>) -> ControlFlow<EditResult> {
        if let Some(pos) = field.locate(self.target) {
            let result = match self.splice.take() {
                Some(splice) => apply(field, pos, splice, self.target),
                None => Err(EditError::NotFound(self.target)),
            };
            return ControlFlow::Break(result);
        }
        for item in field.items_mut() {
            self.search(item.node_mut())?;
        }
        ControlFlow::Continue(())
    }
}

fn convert<T: Slot>(node: Node, target: NodeId) -> Result<T, EditError> {
    T::from_node(node).map_err(|node| EditError::KindMismatch {
        id: target,
        slot: T::NAME,
        found: node.kind(),
    })
}

fn element_mut<'f, T>(field: Field<'f, T>, pos: FieldPos) -> Option<&'f mut T> {
    match (field, pos) {
        (Field::One(node), FieldPos::Single) => Some(node),
        (Field::Opt(node), FieldPos::Single) => node.as_mut(),
        (Field::Many(nodes), FieldPos::Index(i)) => nodes.get_mut(i),
        (Field::ManyOpt(nodes), FieldPos::Index(i)) => nodes.get_mut(i).and_then(Option::as_mut),
        (Field::OptMany(nodes), FieldPos::Index(i)) => nodes.as_mut().and_then(|nodes| nodes.get_mut(i)),
        _ => None,
    }
}

fn apply<T: Slot>(field: Field<'_, T>, pos: FieldPos, splice: Splice, target: NodeId) -> EditResult {
    match splice {
        Splice::Replace(node) => {
            let new = convert::<T>(node, target)?;
            let slot = element_mut(field, pos).ok_or(EditError::NotFound(target))?;
            Ok(Some(std::mem::replace(slot, new).into_node()))
        }
        Splice::Remove => match (field, pos) {
            (Field::One(_), _) => Err(EditError::Required(target)),
            (Field::Opt(node), _) => Ok(node.take().map(Slot::into_node)),
            (Field::Many(nodes), FieldPos::Index(i)) => Ok(Some(nodes.remove(i).into_node())),
            (Field::ManyOpt(nodes), FieldPos::Index(i)) => Ok(nodes[i].take().map(Slot::into_node)),
            (Field::OptMany(nodes), FieldPos::Index(i)) => Ok(nodes.as_mut().map(|nodes| nodes.remove(i).into_node())),
            (_, FieldPos::Single) => Err(EditError::NotInList(target)),
        },
        Splice::List { offset, remove, nodes } => {
            let FieldPos::Index(index) = pos else {
                return Err(EditError::NotInList(target));
            };
            let new = nodes
                .into_iter()
                .map(|node| convert::<T>(node, target))
                .collect::<Result<Vec<T>, _>>()?;
            let at = index + offset;
            let removed: Vec<Node> = match field {
                Field::Many(nodes) => nodes.splice(at..at + remove, new).map(Slot::into_node).collect(),
                Field::ManyOpt(nodes) => nodes
                    .splice(at..at + remove, new.into_iter().map(Some))
                    .flatten()
                    .map(Slot::into_node)
                    .collect(),
                Field::OptMany(Some(nodes)) => nodes.splice(at..at + remove, new).map(Slot::into_node).collect(),
                Field::OptMany(None) | Field::One(_) | Field::Opt(_) => return Err(EditError::NotInList(target)),
            };
            Ok(removed.into_iter().next())
        }
    }
}

fn push_child(root: &mut dyn AstNode, target: NodeId, node: Node, front: bool) -> Result<(), EditError> {
    let op = if front { "insert_first_child" } else { "insert_last_child" };
    let result = with_node_mut(root, target, |owner| {
        let kind = owner.kind();
        let Some(members) = owner.members_mut() else {
            return Err(EditError::NoChildList { id: target, kind });
        };
        let mut pusher = Pusher { target, kind, node: Some(node), front };
        match members.accept(&mut pusher) {
            ControlFlow::Break(result) => result,
            ControlFlow::Continue(()) => Ok(()),
        }
    })
    .unwrap_or(Err(EditError::NotFound(target)));
    log_outcome(op, target, &result);
    result
}

struct Pusher {
    target: NodeId,
    kind: solast_ast::NodeKind,
    node: Option<Node>,
    front: bool,
}

impl SlotVisitor for Pusher {
    type Break = Result<(), EditError>;

    fn visit<T: Slot>(&mut self, field: Field<'_, T>) -> ControlFlow<Self::Break> {
        let Some(node) = self.node.take() else {
            return ControlFlow::Continue(());
        };
        let new = match convert::<T>(node, self.target) {
            Ok(new) => new,
            Err(err) => return ControlFlow::Break(Err(err)),
        };
        let index = |len: usize| if self.front { 0 } else { len };
        match field {
            Field::Many(nodes) => nodes.insert(index(nodes.len()), new),
            Field::ManyOpt(nodes) => nodes.insert(index(nodes.len()), Some(new)),
            Field::OptMany(nodes) => {
                let nodes = nodes.get_or_insert_with(Vec::new);
                nodes.insert(index(nodes.len()), new);
            }
            Field::One(_) | Field::Opt(_) => {
                return ControlFlow::Break(Err(EditError::NoChildList { id: self.target, kind: self.kind }));
            }
        }
        ControlFlow::Continue(())
    }
}
