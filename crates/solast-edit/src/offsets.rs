//! Source range bookkeeping for relocated subtrees
//!
//! Ranges are advisory. Moving a subtree into another document shifts every
//! range inside it by one delta; nothing here checks that the result still
//! matches any text.

use std::collections::BTreeMap;

use solast_ast::{walk_mut, AstNode, IdGen, NodeId, SourceRange};
use tracing::trace;

/// Move `range` by `delta` bytes. Length and source index are kept.
pub fn shift_range(range: SourceRange, delta: i64) -> SourceRange {
    range.shifted(delta)
}

/// The delta that moves a range recorded at `from` to `to`.
pub fn delta_between(from: SourceRange, to: SourceRange) -> i64 {
    to.offset as i64 - from.offset as i64
}

/// Shift the range of every node and attached comment under `root`.
/// Synthetic ranges stay synthetic.
pub fn shift_subtree(root: &mut dyn AstNode, delta: i64) {
    if delta == 0 {
        return;
    }
    let mut shifted = 0usize;
    walk_mut(root, |node| {
        let src = node.src_mut();
        if !src.is_synthetic() {
            *src = shift_range(*src, delta);
            shifted += 1;
        }
        if let Some(comments) = node.comments_mut() {
            for comment in comments.iter_mut() {
                comment.src = shift_range(comment.src, delta);
            }
        }
    });
    trace!(delta, shifted, "subtree ranges shifted");
}

/// Give every node under `root` that carries an id a fresh one from `ids`.
/// Returns the mapping from old to new ids. References by id into the
/// subtree are left as they were.
pub fn reassign_ids(root: &mut dyn AstNode, ids: &mut IdGen) -> BTreeMap<NodeId, NodeId> {
    let mut mapping = BTreeMap::new();
    walk_mut(root, |node| {
        if let Some(old) = node.id() {
            let new = ids.fresh();
            node.set_id(new);
            mapping.insert(old, new);
        }
    });
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use solast_ast::builders::*;
    use solast_ast::*;

    #[test]
    fn test_shift_range_keeps_length_and_index() {
        let range = SourceRange::new(10, 5, 0);
        assert_eq!(shift_range(range, 100), SourceRange::new(110, 5, 0));
        assert_eq!(shift_range(range, -4), SourceRange::new(6, 5, 0));
        assert_eq!(shift_range(range, -40), SourceRange::new(0, 5, 0));
    }

    #[test]
    fn test_shift_subtree() {
        let mut ids = IdGen::starting_at(1);
        let lhs = identifier(&mut ids, "a");
        let rhs = identifier(&mut ids, "b");
        let mut expr = assign(&mut ids, "=", lhs, rhs);
        walk_mut(expr.node_mut(), |node| {
            *node.src_mut() = match node.kind() {
                NodeKind::Assignment => SourceRange::new(10, 5, 0),
                NodeKind::Identifier if node.node_ref().name() == Some("a") => SourceRange::new(10, 1, 0),
                _ => SourceRange::new(15, 3, 0),
            };
        });

        shift_subtree(expr.node_mut(), 100);
        let mut ranges = Vec::new();
        walk(expr.node_ref(), |node, _| ranges.push(node.src()));
        assert_eq!(
            ranges,
            vec![SourceRange::new(110, 5, 0), SourceRange::new(110, 1, 0), SourceRange::new(115, 3, 0)]
        );
    }

    #[test]
    fn test_shift_skips_synthetic_ranges() {
        let mut unit = make_unit();
        shift_subtree(&mut unit, 50);
        assert!(find(unit.node_ref(), |_| true).iter().all(|node| node.src().is_synthetic()));
    }

    #[test]
    fn test_delta_between() {
        assert_eq!(delta_between(SourceRange::new(30, 2, 0), SourceRange::new(10, 9, 1)), -20);
    }

    #[test]
    fn test_reassign_ids_gives_fresh_unique_ids() {
        let mut unit = make_unit();
        let before = all_ids(&unit);
        let mut ids = IdGen::after(&unit);
        let first_fresh = ids.peek();

        let mapping = reassign_ids(&mut unit, &mut ids);
        assert_eq!(mapping.len(), before.len());
        let after = all_ids(&unit);
        assert!(after.iter().all(|id| *id >= first_fresh));
        let mut sorted = after.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), after.len());
    }
}
