use ir::{StmtNum, StmtType};
use tracing::debug;

use crate::affects::compute_affects;
use crate::closure::{dag_closure, numbered_closure, scc_closure};
use crate::Pkb;

/// The only mutation surface of the knowledge base. Every `add_*` is an
/// idempotent insert.
pub struct WriteFacade<'a> {
    pkb: &'a mut Pkb,
}

impl<'a> WriteFacade<'a> {
    pub(crate) fn new(pkb: &'a mut Pkb) -> Self {
        Self { pkb }
    }

    pub fn add_procedure(&mut self, name: &str) {
        self.pkb.entities.procedures.insert(name.to_string());
    }

    pub fn add_variable(&mut self, name: &str) {
        self.pkb.entities.variables.insert(name.to_string());
    }

    pub fn add_constant(&mut self, value: &str) {
        self.pkb.entities.constants.insert(value.to_string());
    }

    /// Registers a statement and its type. Must be called once per number.
    pub fn add_statement(&mut self, stmt: StmtNum, stmt_type: StmtType) {
        self.pkb.statements.add(stmt, stmt_type);
    }

    pub fn add_read_var(&mut self, stmt: StmtNum, var: &str) {
        self.pkb.statements.read_vars.add(stmt, var.to_string());
    }

    pub fn add_print_var(&mut self, stmt: StmtNum, var: &str) {
        self.pkb.statements.print_vars.add(stmt, var.to_string());
    }

    pub fn add_call_statement(&mut self, stmt: StmtNum, callee: &str) {
        self.pkb.statements.call_procs.add(stmt, callee.to_string());
    }

    pub fn add_statement_modifies_var(&mut self, stmt: StmtNum, var: &str) {
        self.pkb.modifies_stmt.add(stmt, var.to_string());
    }

    pub fn add_procedure_modifies_var(&mut self, procedure: &str, var: &str) {
        self.pkb
            .modifies_proc
            .add(procedure.to_string(), var.to_string());
    }

    pub fn add_statement_uses_var(&mut self, stmt: StmtNum, var: &str) {
        self.pkb.uses_stmt.add(stmt, var.to_string());
    }

    pub fn add_procedure_uses_var(&mut self, procedure: &str, var: &str) {
        self.pkb.uses_proc.add(procedure.to_string(), var.to_string());
    }

    pub fn add_follows(&mut self, before: StmtNum, after: StmtNum) {
        self.pkb.follows.add(before, after);
    }

    pub fn add_parent(&mut self, parent: StmtNum, child: StmtNum) {
        self.pkb.parent.add(parent, child);
    }

    pub fn add_calls(&mut self, caller: &str, callee: &str) {
        self.pkb.calls.add(caller.to_string(), callee.to_string());
    }

    /// Next facts only reach the closure store through [`Self::finalize`].
    pub fn add_next(&mut self, from: StmtNum, to: StmtNum) {
        self.pkb.next.add_direct(from, to);
    }

    pub fn add_assignment(&mut self, stmt: StmtNum, lhs: &str, postfix: Vec<String>) {
        self.pkb.assignments.add(stmt, lhs.to_string(), postfix);
    }

    pub fn add_if_control_var(&mut self, stmt: StmtNum, var: &str) {
        self.pkb.if_control.add(stmt, var.to_string());
    }

    pub fn add_while_control_var(&mut self, stmt: StmtNum, var: &str) {
        self.pkb.while_control.add(stmt, var.to_string());
    }

    /// Computes every closure store and the Affects relation. Running it
    /// again after more facts were added recomputes from the direct stores.
    pub fn finalize(&mut self) {
        let pkb = &mut *self.pkb;

        let follows = numbered_closure(pkb.follows.direct());
        pkb.follows.extend_star(follows);
        let parent = numbered_closure(pkb.parent.direct());
        pkb.parent.extend_star(parent);
        let calls = dag_closure(pkb.calls.direct());
        pkb.calls.extend_star(calls);
        let next = scc_closure(pkb.next.direct());
        pkb.next.extend_star(next);

        let affects = compute_affects(
            pkb.next.direct(),
            &pkb.statements,
            &pkb.assignments,
            &pkb.modifies_stmt,
            &pkb.uses_stmt,
        );
        for (from, to) in affects {
            pkb.affects.add(from, to);
        }

        pkb.finalized = true;
        debug!(
            follows_star = pkb.follows.star.len(),
            parent_star = pkb.parent.star.len(),
            calls_star = pkb.calls.star.len(),
            next_star = pkb.next.star.len(),
            affects = pkb.affects.len(),
            "Knowledge base finalized"
        );
    }
}
