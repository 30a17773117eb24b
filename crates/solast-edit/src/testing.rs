//! Shared fixtures for unit tests

use solast_ast::builders::*;
use solast_ast::*;

/// ```text
/// contract Counter {
///     struct Point { uint256 x; }
///     event Moved();
///     uint256 total;
///     function bump() public { total = 1; }
/// }
/// ```
pub fn make_unit() -> SourceUnit {
    let mut ids = IdGen::starting_at(1);
    let x_type = elementary_type(&mut ids, "uint256");
    let x = variable(&mut ids, "x", x_type);
    let point = struct_definition(&mut ids, "Point", vec![x], None);
    let moved = event(&mut ids, "Moved", Vec::new());

    let uint = elementary_type(&mut ids, "uint256");
    let total = state_variable(&mut ids, "total", uint, None);

    let lhs = identifier(&mut ids, "total");
    let rhs = number(&mut ids, "1");
    let assignment = assign(&mut ids, "=", lhs, rhs);
    let stmt = expression_statement(&mut ids, assignment);
    let body = block(&mut ids, vec![stmt]);
    let mut bump = function(&mut ids, "bump", Vec::new(), Some(body), None);
    bump.visibility = Visibility::Public;

    let counter = contract(
        &mut ids,
        "Counter",
        vec![point.into(), moved.into(), total.into(), bump.into()],
    );
    source_unit(&mut ids, vec![counter.into()])
}

/// Id of the `n`th node of `kind` in pre-order.
pub fn id_of(unit: &SourceUnit, kind: NodeKind, n: usize) -> NodeId {
    find_by_kind(unit.node_ref(), kind)[n].id().unwrap()
}

/// Names of the first contract's members, in order.
pub fn member_names(unit: &SourceUnit) -> Vec<String> {
    match &unit.nodes[0] {
        Declaration::ContractDefinition(contract) => contract
            .nodes
            .iter()
            .map(|decl| decl.name().unwrap_or_default().to_string())
            .collect(),
        _ => panic!("expected a contract"),
    }
}

pub fn all_ids(unit: &SourceUnit) -> Vec<NodeId> {
    let mut ids = Vec::new();
    walk(unit.node_ref(), |node, _| ids.extend(node.id()));
    ids
}
