//! Merging the members of one contract into another
//!
//! Every copied subtree gets fresh ids from the caller's generator, so the
//! generator must be positioned past every id of the tree that owns the
//! target. Ranges are shifted from the donor's position to the target's
//! when both contracts carry real ranges.

use solast_ast::{
    AstNode, ContractDefinition, Declaration, FunctionDefinition, FunctionKind, IdGen, NodeId, Slot,
    VariableDeclaration,
};
use tracing::debug;

use crate::offsets::{delta_between, reassign_ids, shift_subtree};

/// What [`transplant`] changed in the target contract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransplantReport {
    pub added_variables: Vec<String>,
    pub replaced_functions: Vec<String>,
    pub added_functions: Vec<String>,
    /// The donor's constructor body was appended to the target's constructor
    pub merged_constructor: bool,
}

impl TransplantReport {
    pub fn is_empty(&self) -> bool {
        self.added_variables.is_empty()
            && self.replaced_functions.is_empty()
            && self.added_functions.is_empty()
            && !self.merged_constructor
    }
}

struct Relocation<'a> {
    ids: &'a mut IdGen,
    delta: Option<i64>,
    scope: NodeId,
}

impl Relocation<'_> {
    fn apply(&mut self, node: &mut dyn AstNode) {
        reassign_ids(node, self.ids);
        if let Some(delta) = self.delta {
            shift_subtree(node, delta);
        }
    }

    fn variable(&mut self, donor: &VariableDeclaration) -> VariableDeclaration {
        let mut copy = donor.clone();
        self.apply(&mut copy);
        copy.scope = Some(self.scope);
        copy
    }

    fn function(&mut self, donor: &FunctionDefinition) -> FunctionDefinition {
        let mut copy = donor.clone();
        self.apply(&mut copy);
        copy.scope = Some(self.scope);
        copy
    }
}

/// Copy into `target` the state variables of `donor` it lacks, replace its
/// functions that `donor` also defines (same name and kind), and append the
/// rest of `donor`'s functions. A donor constructor's statements are
/// appended to the target's constructor when it has one.
pub fn transplant(target: &mut ContractDefinition, donor: &ContractDefinition, ids: &mut IdGen) -> TransplantReport {
    let delta = (!target.src.is_synthetic() && !donor.src.is_synthetic()).then(|| delta_between(donor.src, target.src));
    let mut relocation = Relocation { ids, delta, scope: target.id };
    let mut report = TransplantReport::default();

    for variable in donor.state_variables() {
        if target.state_variables().any(|existing| existing.name == variable.name) {
            continue;
        }
        let copy = relocation.variable(variable);
        let at = variable_insertion_point(&target.nodes);
        target.nodes.insert(at, copy.into());
        report.added_variables.push(variable.name.clone());
    }

    for function in donor.functions() {
        if function.kind == FunctionKind::Constructor {
            if let Some(statements) = constructor_statements(&mut target.nodes) {
                let mut added = function.body.as_ref().map(|body| body.statements.clone()).unwrap_or_default();
                for statement in &mut added {
                    relocation.apply(statement.node_mut());
                }
                statements.extend(added);
                report.merged_constructor = true;
                continue;
            }
        }

        let copy = relocation.function(function);
        let existing = target.nodes.iter().position(|decl| match decl {
            Declaration::FunctionDefinition(f) => f.kind == function.kind && f.name == function.name,
            _ => false,
        });
        match existing {
            Some(at) => {
                target.nodes[at] = copy.into();
                report.replaced_functions.push(function.name.clone());
            }
            None => {
                target.nodes.push(copy.into());
                report.added_functions.push(function.name.clone());
            }
        }
    }

    debug!(
        target = %target.name,
        donor = %donor.name,
        added_variables = report.added_variables.len(),
        replaced = report.replaced_functions.len(),
        added_functions = report.added_functions.len(),
        merged_constructor = report.merged_constructor,
        "contract transplanted"
    );
    report
}

/// After the last state variable, else before the first function, else
/// at the end.
fn variable_insertion_point(nodes: &[Declaration]) -> usize {
    if let Some(last) = nodes
        .iter()
        .rposition(|decl| matches!(decl, Declaration::VariableDeclaration(_)))
    {
        return last + 1;
    }
    nodes
        .iter()
        .position(|decl| matches!(decl, Declaration::FunctionDefinition(_)))
        .unwrap_or(nodes.len())
}

/// The statement list of the first implemented constructor in `nodes`.
fn constructor_statements(nodes: &mut [Declaration]) -> Option<&mut Vec<solast_ast::Statement>> {
    nodes.iter_mut().find_map(|decl| match decl {
        Declaration::FunctionDefinition(f) if f.kind == FunctionKind::Constructor => {
            f.body.as_mut().map(|body| &mut body.statements)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use solast_ast::builders::*;
    use solast_ast::*;

    /// `contract Extra { uint256 total; address owner; function bump() {} function pay() {} }`
    fn make_donor(ids: &mut IdGen) -> ContractDefinition {
        let uint = elementary_type(ids, "uint256");
        let total = state_variable(ids, "total", uint, None);
        let address = elementary_type(ids, "address");
        let owner = state_variable(ids, "owner", address, None);
        let bump_body = block(ids, Vec::new());
        let bump = function(ids, "bump", Vec::new(), Some(bump_body), None);
        let pay_body = block(ids, Vec::new());
        let pay = function(ids, "pay", Vec::new(), Some(pay_body), None);
        contract(ids, "Extra", vec![total.into(), owner.into(), bump.into(), pay.into()])
    }

    fn first_contract(unit: &mut SourceUnit) -> &mut ContractDefinition {
        match &mut unit.nodes[0] {
            Declaration::ContractDefinition(c) => c,
            _ => panic!("expected contract"),
        }
    }

    #[test]
    fn test_transplant_merges_members() {
        let mut unit = make_unit();
        let mut donor_ids = IdGen::starting_at(500);
        let donor = make_donor(&mut donor_ids);
        let mut ids = IdGen::after(&unit);

        let report = transplant(first_contract(&mut unit), &donor, &mut ids);
        assert_eq!(report.added_variables, vec!["owner"]);
        assert_eq!(report.replaced_functions, vec!["bump"]);
        assert_eq!(report.added_functions, vec!["pay"]);
        assert!(!report.merged_constructor);

        assert_eq!(member_names(&unit), vec!["Point", "Moved", "total", "owner", "bump", "pay"]);
    }

    #[test]
    fn test_transplanted_nodes_get_fresh_ids_and_scope() {
        let mut unit = make_unit();
        let before_max = max_id(unit.node_ref()).unwrap();
        let mut donor_ids = IdGen::starting_at(1);
        let donor = make_donor(&mut donor_ids);
        let mut ids = IdGen::after(&unit);

        let target_id = unit.nodes[0].id().unwrap();
        transplant(first_contract(&mut unit), &donor, &mut ids);

        let mut seen = all_ids(&unit);
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);

        let found = find_named(unit.node_ref(), NodeKind::VariableDeclaration, "owner");
        assert!(found[0].id().unwrap() > before_max);
        let NodeRef::VariableDeclaration(owner) = found[0] else {
            panic!("expected variable");
        };
        assert_eq!(owner.scope, Some(target_id));
    }

    #[test]
    fn test_constructor_bodies_are_merged() {
        let mut ids = IdGen::starting_at(1);
        let lhs = identifier(&mut ids, "a");
        let rhs = number(&mut ids, "1");
        let first = assign(&mut ids, "=", lhs, rhs);
        let first = expression_statement(&mut ids, first);
        let body = block(&mut ids, vec![first]);
        let mut ctor = function(&mut ids, "", Vec::new(), Some(body), None);
        ctor.kind = FunctionKind::Constructor;
        let target = contract(&mut ids, "Target", vec![ctor.into()]);
        let mut unit = source_unit(&mut ids, vec![target.into()]);

        let lhs = identifier(&mut ids, "b");
        let rhs = number(&mut ids, "2");
        let second = assign(&mut ids, "=", lhs, rhs);
        let second = expression_statement(&mut ids, second);
        let body = block(&mut ids, vec![second]);
        let mut donor_ctor = function(&mut ids, "", Vec::new(), Some(body), None);
        donor_ctor.kind = FunctionKind::Constructor;
        let donor = contract(&mut ids, "Donor", vec![donor_ctor.into()]);

        let mut fresh = IdGen::after(&unit);
        let report = transplant(first_contract(&mut unit), &donor, &mut fresh);
        assert!(report.merged_constructor);
        assert!(report.added_functions.is_empty());

        let text = to_solidity(&unit, &Style::default());
        assert!(text.contains("a = 1;\n        b = 2;"));
    }

    #[test]
    fn test_ranges_shift_to_target_position() {
        let mut ids = IdGen::starting_at(1);
        let mut target = contract(&mut ids, "Target", Vec::new());
        target.src = SourceRange::new(100, 50, 0);

        let uint = elementary_type(&mut ids, "uint256");
        let mut owner = state_variable(&mut ids, "owner", uint, None);
        owner.src = SourceRange::new(20, 10, 1);
        let mut donor = contract(&mut ids, "Donor", vec![owner.into()]);
        donor.src = SourceRange::new(5, 40, 1);

        transplant(&mut target, &donor, &mut ids);
        let Declaration::VariableDeclaration(copy) = &target.nodes[0] else {
            panic!("expected variable");
        };
        assert_eq!(copy.src, SourceRange::new(115, 10, 1));
    }
}
