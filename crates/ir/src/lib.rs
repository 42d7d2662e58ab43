//! Intermediate representation of SIMPLE programs.
//!
//! The AST (module [`ast`]) is an arena of statements referenced by
//! [`StmtId`]. Statement numbers are not stored on the nodes; the
//! [`annotate`] pass writes them into a [`StmtNumbers`] side table using a
//! single pre-order walk over the procedures in declaration order.
//! Expressions and conditions live in [`expr`], control flow graphs in
//! [`cfg`].

pub mod ast;
pub mod cfg;
pub mod expr;

use serde::{Deserialize, Serialize};

pub use ast::{Meta, Procedure, Program, Statement, StmtId, StmtKind, StmtType};
pub use cfg::{Cfg, CfgNode};
pub use expr::{BinOp, CondExpr, Expr, RelOp};

/// Statement number as seen by queries: 1-based, unique per program.
pub type StmtNum = u32;

/// Side table mapping arena ids to statement numbers and back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StmtNumbers {
    by_id: Vec<StmtNum>,
    by_num: Vec<StmtId>,
}

impl StmtNumbers {
    /// Statement number assigned to `id`.
    pub fn number(&self, id: StmtId) -> StmtNum {
        self.by_id[id.0]
    }

    /// Arena id of statement `num`, if such a statement exists.
    pub fn id(&self, num: StmtNum) -> Option<StmtId> {
        let idx = usize::try_from(num).ok()?.checked_sub(1)?;
        self.by_num.get(idx).copied()
    }

    /// Number of annotated statements.
    pub fn len(&self) -> usize {
        self.by_num.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_num.is_empty()
    }

    /// Iterates `(number, id)` in ascending statement number order.
    pub fn iter(&self) -> impl Iterator<Item = (StmtNum, StmtId)> + '_ {
        self.by_num
            .iter()
            .enumerate()
            .map(|(i, id)| (i as StmtNum + 1, *id))
    }
}

/// Assigns statement numbers with a pre-order walk over every procedure.
///
/// # Example
/// ```
/// use ir::{annotate, Meta, Procedure, Program, StmtKind};
/// let mut program = Program::default();
/// let read = program.push_statement(StmtKind::Read { var: "x".into() }, Meta::new(2, 5));
/// let print = program.push_statement(StmtKind::Print { var: "x".into() }, Meta::new(3, 5));
/// program.procedures.push(Procedure {
///     name: "main".into(),
///     body: vec![read, print],
///     meta: Meta::new(1, 1),
/// });
/// let numbers = annotate(&program);
/// assert_eq!(numbers.number(read), 1);
/// assert_eq!(numbers.id(2), Some(print));
/// ```
pub fn annotate(program: &Program) -> StmtNumbers {
    let mut numbers = StmtNumbers {
        by_id: vec![0; program.statements.len()],
        by_num: Vec::with_capacity(program.statements.len()),
    };
    for procedure in &program.procedures {
        number_list(program, &procedure.body, &mut numbers);
    }
    numbers
}

fn number_list(program: &Program, list: &[StmtId], numbers: &mut StmtNumbers) {
    for &id in list {
        numbers.by_num.push(id);
        numbers.by_id[id.0] = numbers.by_num.len() as StmtNum;
        for block in program.statement(id).kind.blocks() {
            number_list(program, block, numbers);
        }
    }
}

/// Output of the front end: the AST, its numbering and one CFG per
/// procedure, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedProgram {
    pub program: Program,
    pub numbers: StmtNumbers,
    pub cfgs: Vec<Cfg>,
}

impl ParsedProgram {
    /// Statement carrying number `num`.
    pub fn statement(&self, num: StmtNum) -> Option<&Statement> {
        self.numbers.id(num).map(|id| self.program.statement(id))
    }

    pub fn number(&self, id: StmtId) -> StmtNum {
        self.numbers.number(id)
    }
}

#[cfg(test)]
mod tests;
