//! Scanning comments out of source text and attaching them to a decoded tree

mod common;

use common::load_unit;
use indoc::indoc;
use solast::ast::*;
use solast::edit::attach_source;
use solast::lexer::find_comments;

#[test]
fn test_scan_vault_comments() {
    let (_, source) = load_unit("vault");
    let comments = find_comments(&source);
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["// SPDX-License-Identifier: MIT", "// running sum", "// credit the sender"]
    );
    assert!(comments[0].is_standalone());
    assert!(!comments[1].is_standalone());
    assert!(comments[2].is_standalone());
}

#[test]
fn test_attached_comments_are_printed() {
    let (mut unit, source) = load_unit("vault");
    let dropped = attach_source(&mut unit, &source);
    assert!(dropped.is_empty(), "{:?}", dropped);

    let text = to_solidity(&unit, &Style::default());
    assert_eq!(
        text,
        indoc! {"
            // SPDX-License-Identifier: MIT
            pragma solidity ^0.8.0;

            contract Vault {
                mapping(address => uint256) balances;
                uint256 total; // running sum
                event Deposited(address who, uint256 amount);

                function deposit(uint256 amount) public {
                    // credit the sender
                    balances[msg.sender] += amount;
                    total += amount;
                    emit Deposited(msg.sender, amount);
                }
            }
        "}
    );
}

#[test]
fn test_comments_survive_reencoding() {
    let (mut unit, source) = load_unit("vault");
    attach_source(&mut unit, &source);

    let json = encode_string(&unit).unwrap();
    let again = decode(&json).unwrap();
    assert_eq!(again, unit);

    let total = find_named(again.node_ref(), NodeKind::VariableDeclaration, "total");
    let comments = total[0].comments().unwrap();
    assert_eq!(comments.trailing[0].text, "// running sum");
    assert!(comments.leading.is_empty());
}

#[test]
fn test_uncommented_source_attaches_nothing() {
    let (mut unit, source) = load_unit("shop");
    let before = unit.clone();
    assert!(attach_source(&mut unit, &source).is_empty());
    assert_eq!(unit, before);
}

#[test]
fn test_block_and_doc_comments_are_attached() {
    let (mut unit, source) = load_unit("ledger");
    let comments = find_comments(&source);
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["/* running total */", "/* entries */", "/** @notice bump both */"]);
    assert!(comments.iter().all(|c| c.style == CommentStyle::Block));

    let dropped = attach_source(&mut unit, &source);
    assert!(dropped.is_empty(), "{:?}", dropped);

    let total = find_named(unit.node_ref(), NodeKind::VariableDeclaration, "total");
    assert_eq!(total[0].comments().unwrap().leading[0].text, "/* running total */");
    let count = find_named(unit.node_ref(), NodeKind::VariableDeclaration, "count");
    assert_eq!(count[0].comments().unwrap().trailing[0].text, "/* entries */");
    let bump = find_by_id(unit.node_ref(), NodeId(10)).unwrap();
    assert_eq!(bump.kind(), NodeKind::ExpressionStatement);
    assert_eq!(bump.comments().unwrap().leading[0].text, "/** @notice bump both */");

    let text = to_solidity(&unit, &Style::default());
    assert_eq!(
        text,
        indoc! {"
            contract Ledger {
                /* running total */
                uint256 total;

                uint256 count; /* entries */

                function add(uint256 amount) public {
                    /** @notice bump both */
                    total += amount;
                    count += 1;
                }
            }
        "}
    );
}
