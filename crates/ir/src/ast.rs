//! Arena based AST for SIMPLE.
//!
//! Statements are stored flat in [`Program::statements`] and refer to their
//! children through [`StmtId`] indices. Containers are pushed after their
//! bodies, so a parent always has a larger arena index than its children;
//! the query-facing order is given by [`crate::annotate`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expr::{CondExpr, Expr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub line: usize,
    pub column: usize,
}

impl Meta {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Index of a statement inside [`Program::statements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StmtId(pub usize);

/// Syntactic statement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StmtType {
    Read,
    Print,
    Call,
    While,
    If,
    Assign,
}

impl StmtType {
    pub const ALL: [StmtType; 6] = [
        StmtType::Read,
        StmtType::Print,
        StmtType::Call,
        StmtType::While,
        StmtType::If,
        StmtType::Assign,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StmtType::Read => "read",
            StmtType::Print => "print",
            StmtType::Call => "call",
            StmtType::While => "while",
            StmtType::If => "if",
            StmtType::Assign => "assign",
        }
    }
}

impl fmt::Display for StmtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement payload. Each variant only carries what that kind of
/// statement can contribute to Modifies, Uses and pattern facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StmtKind {
    Read {
        var: String,
    },
    Print {
        var: String,
    },
    Call {
        procedure: String,
    },
    While {
        cond: CondExpr,
        body: Vec<StmtId>,
    },
    If {
        cond: CondExpr,
        then_branch: Vec<StmtId>,
        else_branch: Vec<StmtId>,
    },
    Assign {
        var: String,
        expr: Expr,
    },
}

impl StmtKind {
    pub fn stmt_type(&self) -> StmtType {
        match self {
            StmtKind::Read { .. } => StmtType::Read,
            StmtKind::Print { .. } => StmtType::Print,
            StmtKind::Call { .. } => StmtType::Call,
            StmtKind::While { .. } => StmtType::While,
            StmtKind::If { .. } => StmtType::If,
            StmtKind::Assign { .. } => StmtType::Assign,
        }
    }

    /// Nested statement lists, in source order.
    pub fn blocks(&self) -> Vec<&[StmtId]> {
        match self {
            StmtKind::While { body, .. } => vec![body.as_slice()],
            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => vec![then_branch.as_slice(), else_branch.as_slice()],
            _ => Vec::new(),
        }
    }

    /// Direct children across all nested lists.
    pub fn children(&self) -> impl Iterator<Item = StmtId> + '_ {
        self.blocks().into_iter().flatten().copied()
    }

    /// Condition of a container statement.
    pub fn condition(&self) -> Option<&CondExpr> {
        match self {
            StmtKind::While { cond, .. } | StmtKind::If { cond, .. } => Some(cond),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(flatten)]
    pub kind: StmtKind,
    /// Enclosing container statement, if any.
    pub parent: Option<StmtId>,
    pub meta: Meta,
}

impl Statement {
    /// One line rendering used for CFG labels and debugging output.
    pub fn label(&self) -> String {
        match &self.kind {
            StmtKind::Read { var } => format!("read {var}"),
            StmtKind::Print { var } => format!("print {var}"),
            StmtKind::Call { procedure } => format!("call {procedure}"),
            StmtKind::While { cond, .. } => format!("while ({cond})"),
            StmtKind::If { cond, .. } => format!("if ({cond})"),
            StmtKind::Assign { var, expr } => format!("{var} = {expr}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    pub body: Vec<StmtId>,
    pub meta: Meta,
}

/// Whole program: procedures in declaration order plus the statement arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub procedures: Vec<Procedure>,
    pub statements: Vec<Statement>,
}

impl Program {
    /// Appends a statement to the arena and links its children back to it.
    pub fn push_statement(&mut self, kind: StmtKind, meta: Meta) -> StmtId {
        let id = StmtId(self.statements.len());
        let children: Vec<StmtId> = kind.children().collect();
        for child in children {
            if let Some(stmt) = self.statements.get_mut(child.0) {
                stmt.parent = Some(id);
            }
        }
        self.statements.push(Statement {
            kind,
            parent: None,
            meta,
        });
        id
    }

    pub fn statement(&self, id: StmtId) -> &Statement {
        &self.statements[id.0]
    }

    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    /// Every statement reachable from `list`, pre-order.
    pub fn descendants(&self, list: &[StmtId]) -> Vec<StmtId> {
        let mut out = Vec::new();
        let mut stack: Vec<StmtId> = list.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let kind = &self.statement(id).kind;
            let children: Vec<StmtId> = kind.children().collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }
}
