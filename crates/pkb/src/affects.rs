use std::collections::HashSet;

use ir::{StmtNum, StmtType};

use crate::entities::{AssignmentStore, StatementStore};
use crate::store::{RelationStore, RelationView};

/// Affects pairs: `a1` assigns `v`, `a2` reads `v`, and some Next path
/// from `a1` to `a2` passes no assignment, read or call that modifies `v`.
pub(crate) fn compute_affects(
    next: RelationView<'_, StmtNum, StmtNum>,
    statements: &StatementStore,
    assignments: &AssignmentStore,
    modifies: &RelationStore<StmtNum, String>,
    uses: &RelationStore<StmtNum, String>,
) -> Vec<(StmtNum, StmtNum)> {
    let mut pairs = Vec::new();
    let lhs = assignments.lhs.view();
    for (&origin, var) in lhs.pairs() {
        let mut visited: HashSet<StmtNum> = HashSet::new();
        let mut stack: Vec<StmtNum> = next.get_forward(&origin).iter().copied().collect();
        while let Some(stmt) = stack.pop() {
            if !visited.insert(stmt) {
                continue;
            }
            let stmt_type = statements.types.get(&stmt).copied();
            if stmt_type == Some(StmtType::Assign) && uses.has(&stmt, var.as_str()) {
                pairs.push((origin, stmt));
            }
            let blocks = matches!(
                stmt_type,
                Some(StmtType::Assign | StmtType::Read | StmtType::Call)
            ) && modifies.has(&stmt, var.as_str());
            if !blocks {
                stack.extend(next.get_forward(&stmt).iter().copied());
            }
        }
    }
    pairs
}
