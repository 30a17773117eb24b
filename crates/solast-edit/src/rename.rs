//! Renaming variables together with their uses

use solast_ast::{walk_mut, AstNode};
use tracing::debug;

/// Rename every variable declaration and name use under `root` from `old`
/// to `new`. Matching is by name only, so shadowed variables of the same
/// name are renamed too. Returns the number of names changed.
///
/// Name uses include `IdentifierPath` nodes: inheritance specifiers,
/// user-defined type references and modifier invocations naming `old` are
/// rewritten as well, while the contract, struct or modifier they point at
/// keeps its declared name. Yul typed names and identifiers are included.
pub fn rename_symbol(root: &mut dyn AstNode, old: &str, new: &str) -> usize {
    if old == new {
        return 0;
    }
    let mut renamed = 0;
    walk_mut(root, |node| {
        if let Some(name) = node.name_mut() {
            if name == old {
                *name = new.to_string();
                renamed += 1;
            }
        }
    });
    debug!(old, new, renamed, "symbol renamed");
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use solast_ast::builders::*;
    use solast_ast::*;

    #[test]
    fn test_rename_declaration_and_uses() {
        let mut unit = make_unit();
        assert_eq!(rename_symbol(&mut unit, "total", "sum"), 2);

        let text = to_solidity(&unit, &Style::default());
        assert!(text.contains("uint256 sum;"));
        assert!(text.contains("sum = 1;"));
        assert!(!text.contains("total"));
    }

    #[test]
    fn test_rename_leaves_other_names() {
        let mut unit = make_unit();
        let before = unit.clone();
        assert_eq!(rename_symbol(&mut unit, "missing", "other"), 0);
        assert_eq!(unit, before);

        // Function and contract names are not variables
        assert_eq!(rename_symbol(&mut unit, "bump", "other"), 0);
        assert_eq!(rename_symbol(&mut unit, "Counter", "other"), 0);
    }

    #[test]
    fn test_rename_inside_one_function() {
        let mut unit = make_unit();
        let func = id_of(&unit, NodeKind::FunctionDefinition, 0);
        let renamed = with_node_mut(&mut unit, func, |node| rename_symbol(node, "total", "sum"));
        assert_eq!(renamed, Some(1));

        let text = to_solidity(&unit, &Style::default());
        assert!(text.contains("uint256 total;"));
        assert!(text.contains("sum = 1;"));
    }

    #[test]
    fn test_rename_rewrites_type_references() {
        let mut ids = IdGen::starting_at(1);
        let ty = user_type(&mut ids, "Counter", None);
        let next = state_variable(&mut ids, "next", ty, None);
        let registry = contract(&mut ids, "Registry", vec![next.into()]);
        let mut unit = source_unit(&mut ids, vec![registry.into()]);

        assert_eq!(rename_symbol(&mut unit, "Counter", "Tally"), 1);
        let text = to_solidity(&unit, &Style::default());
        assert!(text.contains("Tally next;"), "{}", text);
        assert!(text.contains("contract Registry"));
    }
}
