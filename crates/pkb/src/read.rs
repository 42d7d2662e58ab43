use ir::{StmtNum, StmtType};

use crate::store::RelationView;
use crate::Pkb;

/// Immutable query surface of a finalized [`Pkb`].
///
/// Relations are handed out as [`RelationView`]s; entity and statement
/// accessors return borrowed iterators. Lookups of unknown keys yield empty
/// results.
#[derive(Debug, Clone, Copy)]
pub struct ReadFacade<'a> {
    pkb: &'a Pkb,
}

type StmtRel<'a> = RelationView<'a, StmtNum, StmtNum>;
type StmtVarRel<'a> = RelationView<'a, StmtNum, String>;
type NameRel<'a> = RelationView<'a, String, String>;

impl<'a> ReadFacade<'a> {
    pub(crate) fn new(pkb: &'a Pkb) -> Self {
        Self { pkb }
    }

    pub fn follows(&self) -> StmtRel<'a> {
        self.pkb.follows.direct()
    }

    pub fn follows_star(&self) -> StmtRel<'a> {
        self.pkb.follows.star()
    }

    pub fn parent(&self) -> StmtRel<'a> {
        self.pkb.parent.direct()
    }

    pub fn parent_star(&self) -> StmtRel<'a> {
        self.pkb.parent.star()
    }

    pub fn calls(&self) -> NameRel<'a> {
        self.pkb.calls.direct()
    }

    pub fn calls_star(&self) -> NameRel<'a> {
        self.pkb.calls.star()
    }

    pub fn next(&self) -> StmtRel<'a> {
        self.pkb.next.direct()
    }

    pub fn next_star(&self) -> StmtRel<'a> {
        self.pkb.next.star()
    }

    pub fn affects(&self) -> StmtRel<'a> {
        self.pkb.affects.view()
    }

    pub fn modifies_stmt(&self) -> StmtVarRel<'a> {
        self.pkb.modifies_stmt.view()
    }

    pub fn modifies_proc(&self) -> NameRel<'a> {
        self.pkb.modifies_proc.view()
    }

    pub fn uses_stmt(&self) -> StmtVarRel<'a> {
        self.pkb.uses_stmt.view()
    }

    pub fn uses_proc(&self) -> NameRel<'a> {
        self.pkb.uses_proc.view()
    }

    /// `read` statement to the variable it reads into.
    pub fn read_vars(&self) -> StmtVarRel<'a> {
        self.pkb.statements.read_vars.view()
    }

    pub fn print_vars(&self) -> StmtVarRel<'a> {
        self.pkb.statements.print_vars.view()
    }

    /// `call` statement to the procedure it invokes.
    pub fn call_procs(&self) -> StmtVarRel<'a> {
        self.pkb.statements.call_procs.view()
    }

    pub fn assignment_lhs(&self) -> StmtVarRel<'a> {
        self.pkb.assignments.lhs.view()
    }

    pub fn if_control_vars(&self) -> StmtVarRel<'a> {
        self.pkb.if_control.view()
    }

    pub fn while_control_vars(&self) -> StmtVarRel<'a> {
        self.pkb.while_control.view()
    }

    pub fn procedures(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.pkb.entities.procedures.iter().map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.pkb.entities.variables.iter().map(String::as_str)
    }

    pub fn constants(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.pkb.entities.constants.iter().map(String::as_str)
    }

    pub fn has_procedure(&self, name: &str) -> bool {
        self.pkb.entities.procedures.contains(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.pkb.entities.variables.contains(name)
    }

    pub fn has_constant(&self, value: &str) -> bool {
        self.pkb.entities.constants.contains(value)
    }

    /// All statement numbers, ascending.
    pub fn statements(&self) -> impl Iterator<Item = StmtNum> + 'a {
        self.pkb.statements.all.iter().copied()
    }

    /// Statement numbers of one type, ascending.
    pub fn statements_of_type(&self, stmt_type: StmtType) -> impl Iterator<Item = StmtNum> + 'a {
        self.pkb
            .statements
            .by_type
            .get(&stmt_type)
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn statement_type(&self, stmt: StmtNum) -> Option<StmtType> {
        self.pkb.statements.types.get(&stmt).copied()
    }

    pub fn is_statement(&self, stmt: StmtNum) -> bool {
        self.pkb.statements.all.contains(&stmt)
    }

    pub fn statement_count(&self) -> usize {
        self.pkb.statements.all.len()
    }

    pub fn read_var(&self, stmt: StmtNum) -> Option<&'a str> {
        single(self.read_vars(), stmt)
    }

    pub fn print_var(&self, stmt: StmtNum) -> Option<&'a str> {
        single(self.print_vars(), stmt)
    }

    pub fn called_procedure(&self, stmt: StmtNum) -> Option<&'a str> {
        single(self.call_procs(), stmt)
    }

    /// Whether assignment `stmt` has a right hand side matching the postfix
    /// `pattern`, exactly or as a sub-expression.
    pub fn assignment_matches(&self, stmt: StmtNum, pattern: &[String], partial: bool) -> bool {
        self.pkb.assignments.matches(stmt, pattern, partial)
    }

    /// Assignments whose right hand side matches `pattern`, ascending.
    pub fn assignments_matching(&self, pattern: &[String], partial: bool) -> Vec<StmtNum> {
        self.statements_of_type(StmtType::Assign)
            .filter(|&s| self.assignment_matches(s, pattern, partial))
            .collect()
    }
}

fn single(view: StmtVarRel<'_>, stmt: StmtNum) -> Option<&str> {
    view.get_forward(&stmt).iter().next().map(String::as_str)
}
