//! Reordering and shuffling the members of a contract
//!
//! Both operations work on the direct members of one container: a contract
//! named by id, the source unit itself when its own id is given, or the
//! first contract of the unit when no id is given.

use std::cmp::Ordering;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use solast_ast::{find_by_id, AstNode, Declaration, NodeId, NodeKind, SourceUnit};
use tracing::{debug, warn};

use crate::EditError;

type ShuffleRng = Xoshiro256StarStar;

/// The member list of the container addressed by `container`.
pub fn container_members(unit: &mut SourceUnit, container: Option<NodeId>) -> Result<&mut Vec<Declaration>, EditError> {
    let Some(id) = container else {
        return unit
            .nodes
            .iter_mut()
            .find_map(|decl| match decl {
                Declaration::ContractDefinition(contract) => Some(&mut contract.nodes),
                _ => None,
            })
            .ok_or(EditError::NoContainer);
    };

    if unit.id == id {
        return Ok(&mut unit.nodes);
    }
    if find_by_id(unit.node_ref(), id).is_none() {
        return Err(EditError::NotFound(id));
    }
    unit.nodes
        .iter_mut()
        .find_map(|decl| match decl {
            Declaration::ContractDefinition(contract) if contract.id == id => Some(&mut contract.nodes),
            _ => None,
        })
        .ok_or(EditError::NotAContainer(id))
}

/// Short lowercase names accepted in priority lists besides the node type.
fn short_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::PragmaDirective => "pragma",
        NodeKind::ImportDirective => "import",
        NodeKind::ContractDefinition => "contract",
        NodeKind::UsingForDirective => "using",
        NodeKind::StructDefinition => "struct",
        NodeKind::EnumDefinition => "enum",
        NodeKind::UserDefinedValueTypeDefinition => "type",
        NodeKind::FunctionDefinition => "function",
        NodeKind::VariableDeclaration => "variable",
        NodeKind::ModifierDefinition => "modifier",
        NodeKind::EventDefinition => "event",
        NodeKind::ErrorDefinition => "error",
        other => other.as_str(),
    }
}

/// Position of the first priority token matching `decl`. A token matches
/// the node type (`EventDefinition`), its short name (`event`, any case) or
/// the declared name.
fn rank(decl: &Declaration, priority: &[&str]) -> usize {
    let kind = decl.kind();
    priority
        .iter()
        .position(|token| {
            *token == kind.as_str() || token.eq_ignore_ascii_case(short_name(kind)) || decl.name() == Some(*token)
        })
        .unwrap_or(priority.len())
}

/// Stably sort a container's members by a priority list. Members matching
/// no token keep their relative order after all matched ones.
pub fn reorder_by_priority(unit: &mut SourceUnit, container: Option<NodeId>, priority: &[&str]) -> Result<(), EditError> {
    let members = container_members(unit, container)?;
    members.sort_by_key(|decl| rank(decl, priority));
    debug!(?container, ?priority, "members reordered");
    Ok(())
}

/// Stably sort a container's members with a fallible comparator.
///
/// If the comparator returns an error or panics, the members are put back
/// in their original order and [`EditError::ComparatorFailed`] is returned.
pub fn reorder_with<F, E>(unit: &mut SourceUnit, container: Option<NodeId>, mut compare: F) -> Result<(), EditError>
where
    F: FnMut(&Declaration, &Declaration) -> Result<Ordering, E>,
    E: fmt::Display,
{
    let members = container_members(unit, container)?;
    let original = members.clone();
    let mut failure: Option<String> = None;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        members.sort_by(|a, b| {
            if failure.is_some() {
                return Ordering::Equal;
            }
            compare(a, b).unwrap_or_else(|err| {
                failure = Some(err.to_string());
                Ordering::Equal
            })
        })
    }));

    let failure = match outcome {
        Ok(()) => failure,
        Err(payload) => Some(panic_message(payload.as_ref())),
    };
    match failure {
        Some(message) => {
            *members = original;
            warn!(?container, error = %message, "reorder failed, original order restored");
            Err(EditError::ComparatorFailed(message))
        }
        None => {
            debug!(?container, "members reordered");
            Ok(())
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "comparator panicked".to_string()
    }
}

/// Randomly permute the members whose kind is in `kinds`; all other members
/// keep their positions. The same seed always gives the same permutation.
/// Without a seed the generator is seeded from the operating system.
pub fn shuffle_by_kind(
    unit: &mut SourceUnit,
    container: Option<NodeId>,
    kinds: &[NodeKind],
    seed: Option<u64>,
) -> Result<(), EditError> {
    let members = container_members(unit, container)?;
    let mut rng = match seed {
        Some(seed) => ShuffleRng::seed_from_u64(seed),
        None => ShuffleRng::from_entropy(),
    };

    let positions: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, decl)| kinds.contains(&decl.kind()))
        .map(|(i, _)| i)
        .collect();
    let mut picked: Vec<Declaration> = positions.iter().map(|&i| members[i].clone()).collect();
    picked.shuffle(&mut rng);
    for (i, decl) in positions.iter().zip(picked) {
        members[*i] = decl;
    }

    debug!(?container, ?seed, shuffled = positions.len(), "members shuffled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use solast_ast::builders::*;
    use solast_ast::IdGen;

    #[test]
    fn test_priority_order() {
        let mut unit = make_unit();
        // Point (struct), Moved (event), total (variable), bump (function)
        reorder_by_priority(&mut unit, None, &["Variable", "Event", "Struct", "Function"]).unwrap();
        assert_eq!(member_names(&unit), vec!["total", "Moved", "Point", "bump"]);
    }

    #[test]
    fn test_priority_by_node_type_and_name() {
        let mut unit = make_unit();
        reorder_by_priority(&mut unit, None, &["bump", "EventDefinition"]).unwrap();
        assert_eq!(member_names(&unit), vec!["bump", "Moved", "Point", "total"]);
    }

    #[test]
    fn test_reorder_is_stable_for_unmatched() {
        let mut unit = make_unit();
        reorder_by_priority(&mut unit, None, &["function"]).unwrap();
        assert_eq!(member_names(&unit), vec!["bump", "Point", "Moved", "total"]);
    }

    #[test]
    fn test_reorder_with_comparator() {
        let mut unit = make_unit();
        reorder_with(&mut unit, None, |a, b| Ok::<_, String>(a.name().cmp(&b.name()))).unwrap();
        assert_eq!(member_names(&unit), vec!["Moved", "Point", "bump", "total"]);
    }

    #[test]
    fn test_failing_comparator_restores_order() {
        let mut unit = make_unit();
        let before = unit.clone();
        let mut calls = 0;
        let err = reorder_with(&mut unit, None, |a, b| {
            calls += 1;
            if calls > 1 {
                Err("cannot compare")
            } else {
                Ok(b.name().cmp(&a.name()))
            }
        })
        .unwrap_err();
        assert_eq!(err, EditError::ComparatorFailed("cannot compare".to_string()));
        assert_eq!(unit, before);
    }

    #[test]
    fn test_panicking_comparator_restores_order() {
        let mut unit = make_unit();
        let before = unit.clone();
        let err = reorder_with(&mut unit, None, |_, _| -> Result<Ordering, String> { panic!("boom") }).unwrap_err();
        assert_eq!(err, EditError::ComparatorFailed("boom".to_string()));
        assert_eq!(unit, before);
    }

    #[test]
    fn test_container_resolution() {
        let mut unit = make_unit();
        let unit_id = unit.id;
        assert_eq!(container_members(&mut unit, Some(unit_id)).unwrap().len(), 1);

        let func = id_of(&unit, NodeKind::FunctionDefinition, 0);
        assert_eq!(container_members(&mut unit, Some(func)).unwrap_err(), EditError::NotAContainer(func));
        assert_eq!(
            container_members(&mut unit, Some(NodeId(4242))).unwrap_err(),
            EditError::NotFound(NodeId(4242))
        );

        let mut ids = IdGen::starting_at(1);
        let mut empty = source_unit(&mut ids, Vec::new());
        assert_eq!(container_members(&mut empty, None).unwrap_err(), EditError::NoContainer);
    }

    #[test]
    fn test_shuffle_only_moves_selected_kinds() {
        let mut unit = make_unit();
        let mut ids = IdGen::after(&unit);
        let extra = event(&mut ids, "Extra", Vec::new());
        let again = event(&mut ids, "Again", Vec::new());
        if let Declaration::ContractDefinition(contract) = &mut unit.nodes[0] {
            contract.nodes.push(extra.into());
            contract.nodes.push(again.into());
        }

        let kinds = [NodeKind::EventDefinition];
        shuffle_by_kind(&mut unit, None, &kinds, Some(7)).unwrap();
        let names = member_names(&unit);
        assert_eq!(names[0], "Point");
        assert_eq!(names[2], "total");
        assert_eq!(names[3], "bump");

        let mut events = vec![names[1].clone(), names[4].clone(), names[5].clone()];
        events.sort();
        assert_eq!(events, vec!["Again", "Extra", "Moved"]);
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let mut first = make_unit();
        let mut second = make_unit();
        let kinds = [NodeKind::EventDefinition, NodeKind::StructDefinition, NodeKind::FunctionDefinition];
        shuffle_by_kind(&mut first, None, &kinds, Some(42)).unwrap();
        shuffle_by_kind(&mut second, None, &kinds, Some(42)).unwrap();
        assert_eq!(member_names(&first), member_names(&second));
        assert_eq!(member_names(&first)[2], "total");
    }
}
