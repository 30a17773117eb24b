//! Shared fixtures for unit tests

use crate::builders::*;
use crate::*;

/// `contract Counter { uint256 total; function bump() public { total = 1; } }`
pub fn sample_unit() -> SourceUnit {
    let mut ids = IdGen::starting_at(1);
    let uint = elementary_type(&mut ids, "uint256");
    let total = state_variable(&mut ids, "total", uint, None);

    let lhs = identifier(&mut ids, "total");
    let rhs = number(&mut ids, "1");
    let assignment = assign(&mut ids, "=", lhs, rhs);
    let stmt = expression_statement(&mut ids, assignment);
    let body = block(&mut ids, vec![stmt]);
    let mut bump = function(&mut ids, "bump", Vec::new(), Some(body), None);
    bump.visibility = Visibility::Public;

    let counter = contract(&mut ids, "Counter", vec![total.into(), bump.into()]);
    source_unit(&mut ids, vec![counter.into()])
}
