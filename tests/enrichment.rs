//! Declaring the names a compiled fragment uses without declaring them

mod common;

use common::load_unit;
use indoc::indoc;
use solast::ast::*;
use solast::enrich::*;

#[test]
fn test_restore_shop_fragment() {
    let (mut unit, _) = load_unit("shop");
    let report = restore(&mut unit);

    assert_eq!(report.get("Bought").unwrap().classification, Classification::Event);
    assert_eq!(report.get("balances").unwrap().classification, Classification::Array);
    assert_eq!(report.get("settle").unwrap().classification, Classification::Function);
    assert!(report.get("msg").is_none());
    assert!(report.get("cost").is_none());
    assert!(report.restored.iter().all(|entry| entry.container == NodeId(51)));

    let text = to_solidity(&unit, &Style::default());
    assert_eq!(
        text,
        indoc! {"
            contract Shop {
                event Bought(address param0, uint256 param1);

                function buy(uint256 cost) public {
                    balances[msg.sender] -= cost;
                    emit Bought(msg.sender, cost);
                    settle(cost);
                }

                uint256[] balances;
                function settle(uint256 cost) internal {}
            }
        "}
    );
}

#[test]
fn test_restored_unit_reencodes() {
    let (mut unit, _) = load_unit("shop");
    restore(&mut unit);

    let json = encode_string(&unit).unwrap();
    let again = decode(&json).unwrap();
    assert_eq!(again, unit);
    assert!(restore(&mut unit).is_empty());
}

#[test]
fn test_complete_unit_needs_nothing() {
    let (mut unit, _) = load_unit("vault");
    let before = unit.clone();
    assert!(restore(&mut unit).is_empty());
    assert_eq!(unit, before);
}

#[test]
fn test_settings_from_json() {
    let (mut unit, _) = load_unit("shop");
    let settings: EnrichSettings = serde_json::from_str(r#"{"builtins": ["settle"], "default_type": "uint128"}"#).unwrap();
    let report = restore_with(&mut unit, &settings);

    assert!(report.get("settle").is_none());
    let text = to_solidity(&unit, &Style::default());
    assert!(text.contains("uint128[] balances;"));
    assert!(!text.contains("function settle"));
}

#[test]
fn test_usage_table_of_fragment() {
    let (unit, _) = load_unit("shop");
    let table = UsageTable::collect(&unit);

    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["balances", "msg", "cost", "Bought", "settle"]);
    assert!(table.get("balances").unwrap().indexed);
    assert_eq!(table.get("settle").unwrap().called.as_ref().map(Vec::len), Some(1));
    assert!(declared_names(&unit).contains("cost"));
}
