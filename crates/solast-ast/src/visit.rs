//! Tree traversal and lookup
//!
//! Read-only walks go through [`NodeRef::children`]; mutable walks go through
//! the slot protocol so that callers can reach every owned node in place.

use std::convert::Infallible;
use std::ops::ControlFlow;

use crate::node::{Field, Slot, SlotVisitor};
use crate::{AstNode, NodeId, NodeKind, NodeRef};

/// Visit every node under `root` in pre-order, together with its parent.
pub fn walk<'a, F>(root: NodeRef<'a>, mut visit: F)
where
    F: FnMut(NodeRef<'a>, Option<NodeRef<'a>>),
{
    fn go<'a>(node: NodeRef<'a>, parent: Option<NodeRef<'a>>, visit: &mut dyn FnMut(NodeRef<'a>, Option<NodeRef<'a>>)) {
        visit(node, parent);
        for child in node.children() {
            go(child, Some(node), visit);
        }
    }

    go(root, None, &mut visit);
}

/// Visit every node under `root` in pre-order with the full ancestor chain,
/// nearest ancestor last.
pub fn walk_with_ancestors<'a, F>(root: NodeRef<'a>, mut visit: F)
where
    F: FnMut(NodeRef<'a>, &[NodeRef<'a>]),
{
    fn go<'a>(node: NodeRef<'a>, stack: &mut Vec<NodeRef<'a>>, visit: &mut dyn FnMut(NodeRef<'a>, &[NodeRef<'a>])) {
        visit(node, stack);
        stack.push(node);
        for child in node.children() {
            go(child, stack, visit);
        }
        stack.pop();
    }

    go(root, &mut Vec::new(), &mut visit);
}

/// All nodes matching `predicate`, in pre-order.
pub fn find<'a, F>(root: NodeRef<'a>, mut predicate: F) -> Vec<NodeRef<'a>>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    let mut found = Vec::new();
    walk(root, |node, _| {
        if predicate(node) {
            found.push(node);
        }
    });
    found
}

/// Matching nodes paired with their parents, in pre-order.
pub fn find_with_parent<'a, F>(root: NodeRef<'a>, mut predicate: F) -> Vec<(NodeRef<'a>, Option<NodeRef<'a>>)>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    let mut found = Vec::new();
    walk(root, |node, parent| {
        if predicate(node) {
            found.push((node, parent));
        }
    });
    found
}

pub fn find_by_kind(root: NodeRef<'_>, kind: NodeKind) -> Vec<NodeRef<'_>> {
    find(root, |node| node.kind() == kind)
}

pub fn find_named<'a>(root: NodeRef<'a>, kind: NodeKind, name: &str) -> Vec<NodeRef<'a>> {
    find(root, |node| node.kind() == kind && node.name() == Some(name))
}

pub fn find_by_id(root: NodeRef<'_>, id: NodeId) -> Option<NodeRef<'_>> {
    find(root, |node| node.id() == Some(id)).into_iter().next()
}

/// Largest id present under `root`.
pub fn max_id(root: NodeRef<'_>) -> Option<NodeId> {
    let mut max = None;
    walk(root, |node, _| {
        if let Some(id) = node.id() {
            max = max.max(Some(id));
        }
    });
    max
}

/// Visit every node under `root` mutably, in pre-order.
pub fn walk_mut(root: &mut dyn AstNode, mut visit: impl FnMut(&mut dyn AstNode)) {
    let mut walker = MutWalker { visit: &mut visit };
    walker.descend(root);
}

struct MutWalker<'f> {
    visit: &'f mut dyn FnMut(&mut dyn AstNode),
}

impl MutWalker<'_> {
    fn descend(&mut self, node: &mut dyn AstNode) {
        (self.visit)(node);
        for slot in node.slots_mut() {
            let _ = slot.accept(self);
        }
    }
}

impl SlotVisitor for MutWalker<'_> {
    type Break = Infallible;

    fn visit<T: Slot>(&mut self, field: Field<'_, T>) -> ControlFlow<Infallible> {
        for item in field.items_mut() {
            self.descend(item.node_mut());
        }
        ControlFlow::Continue(())
    }
}

/// Run `f` on the node carrying `id`, returning `None` if no node has it.
pub fn with_node_mut<R>(root: &mut dyn AstNode, id: NodeId, f: impl FnOnce(&mut dyn AstNode) -> R) -> Option<R> {
    if root.id() == Some(id) {
        return Some(f(root));
    }
    let mut finder = Finder { id, f: Some(f) };
    for slot in root.slots_mut() {
        if let ControlFlow::Break(result) = slot.accept(&mut finder) {
            return Some(result);
        }
    }
    None
}

struct Finder<F> {
    id: NodeId,
    f: Option<F>,
}

impl<F, R> Finder<F>
where
    F: FnOnce(&mut dyn AstNode) -> R,
{
    fn search(&mut self, node: &mut dyn AstNode) -> ControlFlow<R> {
        if node.id() == Some(self.id) {
            if let Some(f) = self.f.take() {
                return ControlFlow::Break(f(node));
            }
        }
        for slot in node.slots_mut() {
            slot.accept(self)?;
        }
        ControlFlow::Continue(())
    }
}

impl<F, R> SlotVisitor for Finder<F>
where
    F: FnOnce(&mut dyn AstNode) -> R,
{
    type Break = R;

    fn visit<T: Slot>(&mut self, field: Field<'_, T>) -> ControlFlow<R> {
        for item in field.items_mut() {
            self.search(item.node_mut())?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::*;

    #[test]
    fn test_walk_visits_every_node_with_parent() {
        let unit = sample_unit();
        let mut seen = Vec::new();
        walk(unit.node_ref(), |node, parent| {
            seen.push((node.kind(), parent.map(|p| p.kind())));
        });
        assert_eq!(seen[0], (NodeKind::SourceUnit, None));
        assert!(seen.contains(&(NodeKind::ContractDefinition, Some(NodeKind::SourceUnit))));
        assert!(seen.contains(&(NodeKind::Identifier, Some(NodeKind::Assignment))));
    }

    #[test]
    fn test_find_by_kind_and_name() {
        let unit = sample_unit();
        let vars = find_by_kind(unit.node_ref(), NodeKind::VariableDeclaration);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name(), Some("total"));

        let found = find_named(unit.node_ref(), NodeKind::FunctionDefinition, "bump");
        assert_eq!(found.len(), 1);
        assert!(find_named(unit.node_ref(), NodeKind::FunctionDefinition, "missing").is_empty());
    }

    #[test]
    fn test_find_with_parent_reports_owner() {
        let unit = sample_unit();
        let hits = find_with_parent(unit.node_ref(), |node| node.kind() == NodeKind::Block);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1.map(|p| p.kind()), Some(NodeKind::FunctionDefinition));
    }

    #[test]
    fn test_max_id_and_id_gen() {
        let unit = sample_unit();
        let max = max_id(unit.node_ref()).unwrap();
        let mut ids = IdGen::after(&unit);
        assert_eq!(ids.fresh(), NodeId(max.0 + 1));
        assert_eq!(ids.fresh(), NodeId(max.0 + 2));
    }

    #[test]
    fn test_walk_mut_reaches_nested_nodes() {
        let mut unit = sample_unit();
        let mut count = 0;
        walk_mut(&mut unit, |node| {
            if node.kind() == NodeKind::Identifier {
                *node.src_mut() = SourceRange::new(1, 1, 0);
                count += 1;
            }
        });
        assert_eq!(count, 1);
        let ident = find_by_kind(unit.node_ref(), NodeKind::Identifier)[0];
        assert_eq!(ident.src(), SourceRange::new(1, 1, 0));
    }

    #[test]
    fn test_with_node_mut_finds_by_id() {
        let mut unit = sample_unit();
        let id = find_by_kind(unit.node_ref(), NodeKind::Literal)[0].id().unwrap();
        let kind = with_node_mut(&mut unit, id, |node| node.kind());
        assert_eq!(kind, Some(NodeKind::Literal));
        assert_eq!(with_node_mut(&mut unit, NodeId(9999), |node| node.kind()), None);
    }
}
