//! Attaching scanned comments to tree nodes
//!
//! Comments are hosted by line-level nodes: members of a source unit,
//! contract or struct, and statements of a block. A standalone comment
//! goes before the node that starts nearest after it. A trailing comment
//! goes after the node that ends nearest before it. Either way the comment
//! lands on the line-level node enclosing that nearest node.

use solast_ast::{
    walk_with_ancestors, with_node_mut, AstNode, Comment, NodeId, NodeKind, NodeRef, SourceRange, SourceUnit,
};
use tracing::debug;

/// A node position that a comment can be measured against.
struct Anchor {
    src: SourceRange,
    host: NodeId,
}

fn is_line_container(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::SourceUnit
            | NodeKind::ContractDefinition
            | NodeKind::Block
            | NodeKind::UncheckedBlock
            | NodeKind::StructDefinition
    )
}

/// The nearest node in `chain` (outermost first, `node` last) that can carry
/// comments and sits directly in a line container.
fn host_of(chain: &[NodeRef<'_>]) -> Option<NodeId> {
    (1..chain.len())
        .rev()
        .find(|&i| chain[i].comments().is_some() && is_line_container(chain[i - 1].kind()))
        .and_then(|i| chain[i].id())
}

fn anchors(unit: &SourceUnit) -> (Vec<Anchor>, Vec<SourceRange>) {
    let mut anchors = Vec::new();
    let mut docs = Vec::new();
    walk_with_ancestors(unit.node_ref(), |node, ancestors| {
        let src = node.src();
        if src.is_synthetic() {
            return;
        }
        if node.kind() == NodeKind::StructuredDocumentation {
            docs.push(src);
        }
        let mut chain = ancestors.to_vec();
        chain.push(node);
        if let Some(host) = host_of(&chain) {
            anchors.push(Anchor { src, host });
        }
    });
    (anchors, docs)
}

/// The host for one comment, in pre-order tie-breaking.
fn pick_host(anchors: &[Anchor], comment: &Comment) -> Option<NodeId> {
    let at = comment.src.offset;
    let same_file = |anchor: &&Anchor| anchor.src.source_index == comment.src.source_index;

    let following = || {
        let mut best: Option<&Anchor> = None;
        for anchor in anchors.iter().filter(same_file).filter(|a| a.src.offset >= at) {
            if best.map_or(true, |b| anchor.src.offset < b.src.offset) {
                best = Some(anchor);
            }
        }
        best.map(|a| a.host)
    };

    let preceding = || {
        let mut best: Option<&Anchor> = None;
        for anchor in anchors.iter().filter(same_file).filter(|a| a.src.end() <= at) {
            if best.map_or(true, |b| anchor.src.end() >= b.src.end()) {
                best = Some(anchor);
            }
        }
        best.map(|a| a.host)
    };

    if comment.is_standalone() {
        following()
    } else {
        preceding()
    }
}

/// Attach `comments` to the nodes of `unit`, returning the comments that
/// found no host. Comments inside NatSpec documentation are skipped, since
/// the documentation node already reproduces them.
pub fn attach_comments(unit: &mut SourceUnit, comments: Vec<Comment>) -> Vec<Comment> {
    let (anchors, docs) = anchors(unit);
    let mut dropped = Vec::new();

    for comment in comments {
        if docs.iter().any(|doc| doc.contains(&comment.src)) {
            continue;
        }
        let Some(host) = pick_host(&anchors, &comment) else {
            debug!(src = %comment.src, text = %comment.text, "no node to attach comment to");
            dropped.push(comment);
            continue;
        };

        let standalone = comment.is_standalone();
        let rejected = with_node_mut(unit, host, move |node| match node.comments_mut() {
            Some(slot) if standalone => {
                slot.leading.push(comment);
                None
            }
            Some(slot) => {
                slot.trailing.push(comment);
                None
            }
            None => Some(comment),
        });
        match rejected {
            Some(None) => debug!(host = %host, standalone, "comment attached"),
            Some(Some(comment)) => dropped.push(comment),
            None => {}
        }
    }

    dropped
}

/// Scan `source` for comments and attach them to `unit`, which must have
/// been compiled from that text.
pub fn attach_source(unit: &mut SourceUnit, source: &str) -> Vec<Comment> {
    let index = unit.src.source_index.max(0);
    let comments = solast_lexer::find_comments_in(source, index);
    attach_comments(unit, comments)
}
