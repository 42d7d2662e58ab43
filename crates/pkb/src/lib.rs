//! Program knowledge base.
//!
//! A [`Pkb`] is filled exactly once through its [`WriteFacade`], sealed with
//! [`WriteFacade::finalize`] (closures and Affects), and from then on only
//! read through the immutable [`ReadFacade`].

mod affects;
pub mod closure;
mod entities;
pub mod populate;
mod read;
pub mod store;
mod write;

use ir::{ParsedProgram, StmtNum};
use serde::Serialize;

pub use entities::{AssignmentStore, EntityStore, StatementStore};
pub use read::ReadFacade;
pub use store::{Related, RelationStore, RelationView, TransitiveStore};
pub use write::WriteFacade;

#[derive(Debug, Clone, Default)]
pub struct Pkb {
    pub(crate) entities: EntityStore,
    pub(crate) statements: StatementStore,
    pub(crate) follows: TransitiveStore<StmtNum>,
    pub(crate) parent: TransitiveStore<StmtNum>,
    pub(crate) calls: TransitiveStore<String>,
    pub(crate) next: TransitiveStore<StmtNum>,
    pub(crate) modifies_stmt: RelationStore<StmtNum, String>,
    pub(crate) modifies_proc: RelationStore<String, String>,
    pub(crate) uses_stmt: RelationStore<StmtNum, String>,
    pub(crate) uses_proc: RelationStore<String, String>,
    pub(crate) assignments: AssignmentStore,
    pub(crate) if_control: RelationStore<StmtNum, String>,
    pub(crate) while_control: RelationStore<StmtNum, String>,
    pub(crate) affects: RelationStore<StmtNum, StmtNum>,
    pub(crate) finalized: bool,
}

impl Pkb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and finalizes the knowledge base for a parsed program.
    ///
    /// # Example
    /// ```
    /// let parsed = parsers::parse_program("procedure p { x = 1; y = x + 1; }").unwrap();
    /// let pkb = pkb::Pkb::from_program(&parsed);
    /// let read = pkb.reader();
    /// assert!(read.follows().has(&1, &2));
    /// assert!(read.affects().has(&1, &2));
    /// ```
    pub fn from_program(parsed: &ParsedProgram) -> Self {
        let mut pkb = Pkb::new();
        populate::populate(&mut pkb.writer(), parsed);
        pkb
    }

    pub fn writer(&mut self) -> WriteFacade<'_> {
        WriteFacade::new(self)
    }

    pub fn reader(&self) -> ReadFacade<'_> {
        ReadFacade::new(self)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Fact counts per store.
    pub fn stats(&self) -> PkbStats {
        PkbStats {
            procedures: self.entities.procedures.len(),
            variables: self.entities.variables.len(),
            constants: self.entities.constants.len(),
            statements: self.statements.all.len(),
            follows: self.follows.direct.len(),
            follows_star: self.follows.star.len(),
            parent: self.parent.direct.len(),
            parent_star: self.parent.star.len(),
            calls: self.calls.direct.len(),
            calls_star: self.calls.star.len(),
            next: self.next.direct.len(),
            next_star: self.next.star.len(),
            affects: self.affects.len(),
            modifies_stmt: self.modifies_stmt.len(),
            modifies_proc: self.modifies_proc.len(),
            uses_stmt: self.uses_stmt.len(),
            uses_proc: self.uses_proc.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PkbStats {
    pub procedures: usize,
    pub variables: usize,
    pub constants: usize,
    pub statements: usize,
    pub follows: usize,
    pub follows_star: usize,
    pub parent: usize,
    pub parent_star: usize,
    pub calls: usize,
    pub calls_star: usize,
    pub next: usize,
    pub next_star: usize,
    pub affects: usize,
    pub modifies_stmt: usize,
    pub modifies_proc: usize,
    pub uses_stmt: usize,
    pub uses_proc: usize,
}

impl PkbStats {
    /// Counts labelled with the relation name used in queries.
    pub fn entries(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("procedures", self.procedures),
            ("variables", self.variables),
            ("constants", self.constants),
            ("statements", self.statements),
            ("Follows", self.follows),
            ("Follows*", self.follows_star),
            ("Parent", self.parent),
            ("Parent*", self.parent_star),
            ("Calls", self.calls),
            ("Calls*", self.calls_star),
            ("Next", self.next),
            ("Next*", self.next_star),
            ("Affects", self.affects),
            ("Modifies (stmt)", self.modifies_stmt),
            ("Modifies (proc)", self.modifies_proc),
            ("Uses (stmt)", self.uses_stmt),
            ("Uses (proc)", self.uses_proc),
        ]
    }
}

#[cfg(test)]
mod tests;
