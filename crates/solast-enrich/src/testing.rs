//! Fragments with undeclared names, for unit tests

use solast_ast::builders::*;
use solast_ast::*;

/// `contract <name> { function run() public { <statements> } }`
fn wrap(ids: &mut IdGen, name: &str, statements: Vec<Statement>) -> SourceUnit {
    let body = block(ids, statements);
    let mut run = function(ids, "run", Vec::new(), Some(body), None);
    run.visibility = Visibility::Public;
    let c = contract(ids, name, vec![run.into()]);
    source_unit(ids, vec![c.into()])
}

/// `contract Bank { function deposit() public { balances[msg.sender] += amount; } }`
pub fn make_fragment() -> SourceUnit {
    let mut ids = IdGen::starting_at(1);
    let balances = identifier(&mut ids, "balances");
    let msg = identifier(&mut ids, "msg");
    let sender = member(&mut ids, msg, "sender");
    let slot = index(&mut ids, balances, sender);
    let amount = identifier(&mut ids, "amount");
    let update = assign(&mut ids, "+=", slot, amount);
    let stmt = expression_statement(&mut ids, update);
    let body = block(&mut ids, vec![stmt]);
    let mut deposit = function(&mut ids, "deposit", Vec::new(), Some(body), None);
    deposit.visibility = Visibility::Public;
    let bank = contract(&mut ids, "Bank", vec![deposit.into()]);
    source_unit(&mut ids, vec![bank.into()])
}

/// ```text
/// total = order.price + order.size;
/// queue[0].price = 1;
/// list.push(2);
/// owner.transfer(3);
/// ```
pub fn make_member_fragment() -> SourceUnit {
    let mut ids = IdGen::starting_at(1);

    let total = identifier(&mut ids, "total");
    let order = identifier(&mut ids, "order");
    let price = member(&mut ids, order, "price");
    let order = identifier(&mut ids, "order");
    let size = member(&mut ids, order, "size");
    let sum = binary(&mut ids, price, "+", size);
    let first = assign(&mut ids, "=", total, sum);
    let first = expression_statement(&mut ids, first);

    let queue = identifier(&mut ids, "queue");
    let zero = number(&mut ids, "0");
    let head = index(&mut ids, queue, zero);
    let head_price = member(&mut ids, head, "price");
    let one = number(&mut ids, "1");
    let second = assign(&mut ids, "=", head_price, one);
    let second = expression_statement(&mut ids, second);

    let list = identifier(&mut ids, "list");
    let push = member(&mut ids, list, "push");
    let two = number(&mut ids, "2");
    let third = call(&mut ids, push, vec![two]);
    let third = expression_statement(&mut ids, third.into());

    let owner = identifier(&mut ids, "owner");
    let transfer = member(&mut ids, owner, "transfer");
    let three = number(&mut ids, "3");
    let fourth = call(&mut ids, transfer, vec![three]);
    let fourth = expression_statement(&mut ids, fourth.into());

    wrap(&mut ids, "Book", vec![first, second, third, fourth])
}

/// ```text
/// emit Paid(msg.sender, cost);
/// settle(cost);
/// ```
pub fn make_call_fragment() -> SourceUnit {
    let mut ids = IdGen::starting_at(1);

    let paid = identifier(&mut ids, "Paid");
    let msg = identifier(&mut ids, "msg");
    let sender = member(&mut ids, msg, "sender");
    let cost = identifier(&mut ids, "cost");
    let event_call = call(&mut ids, paid, vec![sender, cost]);
    let first = emit(&mut ids, event_call);

    let settle = identifier(&mut ids, "settle");
    let cost = identifier(&mut ids, "cost");
    let second = call(&mut ids, settle, vec![cost]);
    let second = expression_statement(&mut ids, second.into());

    wrap(&mut ids, "Shop", vec![first, second])
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
