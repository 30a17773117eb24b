//! Structural edits on a decoded contract

mod common;

use common::load_unit;
use solast::ast::builders::*;
use solast::ast::*;
use solast::edit::*;
use solast::enrich::restore;

const VAULT: NodeId = NodeId(99);
const DEPOSIT: NodeId = NodeId(97);
const TOTAL: NodeId = NodeId(7);
const TOTAL_UPDATE: NodeId = NodeId(25);
const EMIT: NodeId = NodeId(31);

fn member_names(unit: &SourceUnit) -> Vec<String> {
    let contract = find_by_id(unit.node_ref(), VAULT).expect("vault contract");
    contract
        .children()
        .iter()
        .filter_map(|child| child.name().map(str::to_string))
        .collect()
}

fn vault_contract(unit: &mut SourceUnit) -> &mut ContractDefinition {
    unit.nodes
        .iter_mut()
        .find_map(|decl| match decl {
            Declaration::ContractDefinition(contract) => Some(&mut **contract),
            _ => None,
        })
        .expect("a contract")
}

#[test]
fn test_insert_state_variable_after_total() {
    let (mut unit, _) = load_unit("vault");
    let mut ids = IdGen::after(&unit);
    assert_eq!(ids.peek(), NodeId(101));

    let uint = elementary_type(&mut ids, "uint256");
    let fee = state_variable(&mut ids, "fee", uint, Some(VAULT));
    insert(&mut unit, TOTAL, fee, Position::After).unwrap();

    assert_eq!(member_names(&unit), vec!["balances", "total", "fee", "Deposited", "deposit"]);
    let text = to_solidity(&unit, &Style::default());
    assert!(text.contains("    uint256 total;\n    uint256 fee;\n"));
}

#[test]
fn test_replace_and_remove_statements() {
    let (mut unit, _) = load_unit("vault");
    let mut ids = IdGen::after(&unit);

    let lhs = identifier(&mut ids, "total");
    let rhs = identifier(&mut ids, "amount");
    let reset = assign(&mut ids, "=", lhs, rhs);
    let reset = expression_statement(&mut ids, reset);
    let old = replace(&mut unit, TOTAL_UPDATE, reset).unwrap();
    assert_eq!(old.kind(), NodeKind::ExpressionStatement);

    let removed = remove(&mut unit, EMIT).unwrap();
    assert!(removed.is_some());
    assert!(find_by_id(unit.node_ref(), EMIT).is_none());

    let text = to_solidity(&unit, &Style::default());
    assert!(text.contains("        total = amount;\n    }\n"));
    assert!(!text.contains("emit"));
}

#[test]
fn test_refused_edits_leave_the_tree_alone() {
    let (mut unit, _) = load_unit("vault");
    let before = unit.clone();
    let mut ids = IdGen::after(&unit);

    let version = pragma(&mut ids, &["solidity", "^", "0.8", ".0"]);
    let err = replace(&mut unit, TOTAL_UPDATE, version).unwrap_err();
    assert_eq!(err.code(), "E-EDIT-003");

    let err = remove(&mut unit, NodeId(100)).unwrap_err();
    assert_eq!(err, EditError::TargetIsRoot(NodeId(100)));

    let err = remove(&mut unit, NodeId(4242)).unwrap_err();
    assert_eq!(err, EditError::NotFound(NodeId(4242)));

    assert_eq!(unit, before);
}

#[test]
fn test_reorder_members_by_priority() {
    let (mut unit, _) = load_unit("vault");
    reorder_by_priority(&mut unit, Some(VAULT), &["function", "event"]).unwrap();
    assert_eq!(member_names(&unit), vec!["deposit", "Deposited", "balances", "total"]);

    // without a container the first contract is used
    reorder_by_priority(&mut unit, None, &["VariableDeclaration"]).unwrap();
    assert_eq!(member_names(&unit), vec!["balances", "total", "deposit", "Deposited"]);
}

#[test]
fn test_failed_reorder_is_rolled_back() {
    let (mut unit, _) = load_unit("vault");
    let before = member_names(&unit);

    let result = reorder_with(&mut unit, Some(VAULT), |a, b| {
        if a.kind() == NodeKind::EventDefinition || b.kind() == NodeKind::EventDefinition {
            Err("events cannot be compared")
        } else {
            Ok(a.name().cmp(&b.name()))
        }
    });
    assert_eq!(result, Err(EditError::ComparatorFailed("events cannot be compared".to_string())));
    assert_eq!(member_names(&unit), before);
}

#[test]
fn test_seeded_shuffle_only_moves_chosen_kinds() {
    let (unit, _) = load_unit("vault");

    let mut first = unit.clone();
    let mut second = unit.clone();
    shuffle_by_kind(&mut first, Some(VAULT), &[NodeKind::VariableDeclaration], Some(7)).unwrap();
    shuffle_by_kind(&mut second, Some(VAULT), &[NodeKind::VariableDeclaration], Some(7)).unwrap();
    assert_eq!(first, second);

    let names = member_names(&first);
    assert_eq!(&names[2..], &["Deposited", "deposit"]);
    let mut variables = names[..2].to_vec();
    variables.sort();
    assert_eq!(variables, vec!["balances", "total"]);
}

#[test]
fn test_rename_inside_one_function() {
    let (mut unit, _) = load_unit("vault");
    let renamed = with_node_mut(&mut unit, DEPOSIT, |function| rename_symbol(function, "amount", "value"));
    assert_eq!(renamed, Some(4));

    let text = to_solidity(&unit, &Style::default());
    assert!(text.contains("event Deposited(address who, uint256 amount);"));
    assert!(text.contains("function deposit(uint256 value) public {"));
    assert!(text.contains("emit Deposited(msg.sender, value);"));

    assert_eq!(rename_symbol(&mut unit, "total", "sum"), 2);
}

#[test]
fn test_transplant_restored_fragment() {
    let (mut vault, _) = load_unit("vault");
    let (mut shop, _) = load_unit("shop");
    restore(&mut shop);

    let mut ids = IdGen::after(&vault);
    let donor = match &shop.nodes[0] {
        Declaration::ContractDefinition(contract) => (**contract).clone(),
        _ => panic!("expected a contract"),
    };
    let report = transplant(vault_contract(&mut vault), &donor, &mut ids);

    // `balances` already exists in the vault
    assert!(report.added_variables.is_empty());
    assert_eq!(report.added_functions, vec!["buy", "settle"]);
    assert!(!report.merged_constructor);
    assert_eq!(member_names(&vault), vec!["balances", "total", "Deposited", "deposit", "buy", "settle"]);

    let mut seen = Vec::new();
    walk(vault.node_ref(), |node, _| seen.extend(node.id()));
    let count = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), count);

    let buy = find_named(vault.node_ref(), NodeKind::FunctionDefinition, "buy");
    let NodeRef::FunctionDefinition(buy) = buy[0] else {
        panic!("expected a function");
    };
    assert_eq!(buy.scope, Some(VAULT));
    assert!(buy.id.0 > 100);
}
