//! Entity sets, the statement type index and the assignment pattern table.

use std::collections::{BTreeSet, HashMap};

use ir::{StmtNum, StmtType};

use crate::store::RelationStore;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub(crate) procedures: BTreeSet<String>,
    pub(crate) variables: BTreeSet<String>,
    pub(crate) constants: BTreeSet<String>,
}

/// Statement numbers by type and the per-statement name attributes.
#[derive(Debug, Clone, Default)]
pub struct StatementStore {
    pub(crate) all: BTreeSet<StmtNum>,
    pub(crate) types: HashMap<StmtNum, StmtType>,
    pub(crate) by_type: HashMap<StmtType, BTreeSet<StmtNum>>,
    pub(crate) read_vars: RelationStore<StmtNum, String>,
    pub(crate) print_vars: RelationStore<StmtNum, String>,
    pub(crate) call_procs: RelationStore<StmtNum, String>,
}

impl StatementStore {
    pub(crate) fn add(&mut self, stmt: StmtNum, stmt_type: StmtType) {
        self.all.insert(stmt);
        self.types.insert(stmt, stmt_type);
        self.by_type.entry(stmt_type).or_default().insert(stmt);
    }
}

/// Assignment statements with their target and right hand side in postfix.
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    pub(crate) lhs: RelationStore<StmtNum, String>,
    pub(crate) postfix: HashMap<StmtNum, Vec<String>>,
}

impl AssignmentStore {
    pub(crate) fn add(&mut self, stmt: StmtNum, lhs: String, postfix: Vec<String>) {
        self.lhs.add(stmt, lhs);
        self.postfix.insert(stmt, postfix);
    }

    /// Whether the right hand side of `stmt` matches `pattern`.
    ///
    /// Exact matching compares whole postfix sequences. Partial matching
    /// looks for `pattern` as a contiguous window; a window that is itself a
    /// well formed postfix expression is always a complete subtree.
    pub fn matches(&self, stmt: StmtNum, pattern: &[String], partial: bool) -> bool {
        let Some(rhs) = self.postfix.get(&stmt) else {
            return false;
        };
        if partial {
            !pattern.is_empty() && rhs.windows(pattern.len()).any(|w| w == pattern)
        } else {
            rhs.as_slice() == pattern
        }
    }
}
