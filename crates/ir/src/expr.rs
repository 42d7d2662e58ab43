//! Arithmetic expressions and conditions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expr {
    Var(String),
    /// Integer literal, already normalised (no leading zeros).
    Const(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Reverse Polish token sequence, the form used by assignment patterns.
    ///
    /// # Example
    /// ```
    /// use ir::{BinOp, Expr};
    /// let e = Expr::binary(
    ///     BinOp::Mul,
    ///     Expr::binary(BinOp::Add, Expr::Var("a".into()), Expr::Var("b".into())),
    ///     Expr::Const("2".into()),
    /// );
    /// assert_eq!(e.postfix(), ["a", "b", "+", "2", "*"]);
    /// ```
    pub fn postfix(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.push_postfix(&mut out);
        out
    }

    fn push_postfix(&self, out: &mut Vec<String>) {
        match self {
            Expr::Var(name) | Expr::Const(name) => out.push(name.clone()),
            Expr::Binary { op, lhs, rhs } => {
                lhs.push_postfix(out);
                rhs.push_postfix(out);
                out.push(op.as_str().to_string());
            }
        }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect(&mut out, &mut BTreeSet::new());
        out
    }

    pub fn constants(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect(&mut BTreeSet::new(), &mut out);
        out
    }

    fn collect(&self, vars: &mut BTreeSet<String>, consts: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                vars.insert(name.clone());
            }
            Expr::Const(value) => {
                consts.insert(value.clone());
            }
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect(vars, consts);
                rhs.collect(vars, consts);
            }
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, parent: u8, right: bool) -> fmt::Result {
        match self {
            Expr::Var(name) | Expr::Const(name) => f.write_str(name),
            Expr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                let wrap = prec < parent || (right && prec == parent);
                if wrap {
                    f.write_str("(")?;
                }
                lhs.fmt_prec(f, prec, false)?;
                write!(f, " {} ", op.as_str())?;
                rhs.fmt_prec(f, prec, true)?;
                if wrap {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl RelOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
        }
    }
}

/// Condition of an `if` or `while` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CondExpr {
    Not(Box<CondExpr>),
    And(Box<CondExpr>, Box<CondExpr>),
    Or(Box<CondExpr>, Box<CondExpr>),
    Rel { op: RelOp, lhs: Expr, rhs: Expr },
}

impl CondExpr {
    /// Variables read by the condition; these are the control variables.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.walk(&mut |e| out.extend(e.variables()));
        out
    }

    pub fn constants(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.walk(&mut |e| out.extend(e.constants()));
        out
    }

    fn walk(&self, visit: &mut dyn FnMut(&Expr)) {
        match self {
            CondExpr::Not(inner) => inner.walk(visit),
            CondExpr::And(a, b) | CondExpr::Or(a, b) => {
                a.walk(visit);
                b.walk(visit);
            }
            CondExpr::Rel { lhs, rhs, .. } => {
                visit(lhs);
                visit(rhs);
            }
        }
    }
}

impl fmt::Display for CondExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CondExpr::Not(inner) => write!(f, "!({inner})"),
            CondExpr::And(a, b) => write!(f, "({a}) && ({b})"),
            CondExpr::Or(a, b) => write!(f, "({a}) || ({b})"),
            CondExpr::Rel { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.as_str()),
        }
    }
}
