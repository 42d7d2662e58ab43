//! Typed query representation produced by semantic validation.

use ir::{StmtNum, StmtType};
use serde::Serialize;
use std::fmt;

/// Kind of a declared synonym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignEntity {
    Stmt,
    Read,
    Print,
    Call,
    While,
    If,
    Assign,
    Variable,
    Constant,
    Procedure,
}

impl DesignEntity {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "stmt" => DesignEntity::Stmt,
            "read" => DesignEntity::Read,
            "print" => DesignEntity::Print,
            "call" => DesignEntity::Call,
            "while" => DesignEntity::While,
            "if" => DesignEntity::If,
            "assign" => DesignEntity::Assign,
            "variable" => DesignEntity::Variable,
            "constant" => DesignEntity::Constant,
            "procedure" => DesignEntity::Procedure,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            DesignEntity::Stmt => "stmt",
            DesignEntity::Read => "read",
            DesignEntity::Print => "print",
            DesignEntity::Call => "call",
            DesignEntity::While => "while",
            DesignEntity::If => "if",
            DesignEntity::Assign => "assign",
            DesignEntity::Variable => "variable",
            DesignEntity::Constant => "constant",
            DesignEntity::Procedure => "procedure",
        }
    }

    /// Whether the synonym ranges over statement numbers.
    pub fn is_statement(self) -> bool {
        !matches!(
            self,
            DesignEntity::Variable | DesignEntity::Constant | DesignEntity::Procedure
        )
    }

    /// Statement type the domain is restricted to; `None` for `stmt` and
    /// for non-statement entities.
    pub fn stmt_type(self) -> Option<StmtType> {
        match self {
            DesignEntity::Read => Some(StmtType::Read),
            DesignEntity::Print => Some(StmtType::Print),
            DesignEntity::Call => Some(StmtType::Call),
            DesignEntity::While => Some(StmtType::While),
            DesignEntity::If => Some(StmtType::If),
            DesignEntity::Assign => Some(StmtType::Assign),
            _ => None,
        }
    }

    /// Attributes that may be projected from this kind of synonym.
    pub fn supports(self, attr: AttrName) -> bool {
        match attr {
            AttrName::StmtNo => self.is_statement(),
            AttrName::ProcName => matches!(self, DesignEntity::Procedure | DesignEntity::Call),
            AttrName::VarName => matches!(
                self,
                DesignEntity::Variable | DesignEntity::Read | DesignEntity::Print
            ),
            AttrName::Value => self == DesignEntity::Constant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Synonym {
    pub name: String,
    pub entity: DesignEntity,
}

impl Synonym {
    pub fn new(name: impl Into<String>, entity: DesignEntity) -> Self {
        Self {
            name: name.into(),
            entity,
        }
    }
}

impl fmt::Display for Synonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Argument of a relationship or the variable slot of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ref {
    Synonym(Synonym),
    /// Quoted identifier naming a procedure or variable.
    Ident(String),
    /// Statement number literal.
    Integer(StmtNum),
    Wildcard,
}

impl Ref {
    pub fn synonym(&self) -> Option<&Synonym> {
        match self {
            Ref::Synonym(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relation {
    Follows,
    FollowsT,
    Parent,
    ParentT,
    Calls,
    CallsT,
    Next,
    NextT,
    Affects,
    UsesS,
    UsesP,
    ModifiesS,
    ModifiesP,
}

impl Relation {
    pub fn name(self) -> &'static str {
        match self {
            Relation::Follows => "Follows",
            Relation::FollowsT => "Follows*",
            Relation::Parent => "Parent",
            Relation::ParentT => "Parent*",
            Relation::Calls => "Calls",
            Relation::CallsT => "Calls*",
            Relation::Next => "Next",
            Relation::NextT => "Next*",
            Relation::Affects => "Affects",
            Relation::UsesS | Relation::UsesP => "Uses",
            Relation::ModifiesS | Relation::ModifiesP => "Modifies",
        }
    }

    /// Relations that can relate an element to itself.
    pub fn may_be_reflexive(self) -> bool {
        matches!(self, Relation::NextT | Relation::Affects)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SuchThat {
    pub relation: Relation,
    pub lhs: Ref,
    pub rhs: Ref,
}

/// Right hand side constraint of an assignment pattern, in postfix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExprSpec {
    Wildcard,
    Exact(Vec<String>),
    Partial(Vec<String>),
}

/// `pattern a(v, spec)`, `pattern w(v, _)` or `pattern ifs(v, _, _)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern {
    pub synonym: Synonym,
    pub var: Ref,
    pub expr: ExprSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttrName {
    ProcName,
    VarName,
    Value,
    StmtNo,
}

impl AttrName {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "procName" => AttrName::ProcName,
            "varName" => AttrName::VarName,
            "value" => AttrName::Value,
            "stmt#" => AttrName::StmtNo,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            AttrName::ProcName => "procName",
            AttrName::VarName => "varName",
            AttrName::Value => "value",
            AttrName::StmtNo => "stmt#",
        }
    }

    pub fn attr_type(self) -> AttrType {
        match self {
            AttrName::ProcName | AttrName::VarName => AttrType::Name,
            AttrName::Value | AttrName::StmtNo => AttrType::Integer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttrType {
    Name,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttrRef {
    pub synonym: Synonym,
    pub attr: AttrName,
}

impl AttrRef {
    /// Whether the projection differs from the synonym's own value, as
    /// for `call.procName` or `read.varName`.
    pub fn is_indirect(&self) -> bool {
        matches!(
            (self.synonym.entity, self.attr),
            (DesignEntity::Call, AttrName::ProcName)
                | (DesignEntity::Read, AttrName::VarName)
                | (DesignEntity::Print, AttrName::VarName)
        )
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.synonym.name, self.attr.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WithRef {
    Attr(AttrRef),
    Ident(String),
    /// Normalised integer literal.
    Integer(String),
}

impl WithRef {
    pub fn attr_type(&self) -> AttrType {
        match self {
            WithRef::Attr(a) => a.attr.attr_type(),
            WithRef::Ident(_) => AttrType::Name,
            WithRef::Integer(_) => AttrType::Integer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct With {
    pub lhs: WithRef,
    pub rhs: WithRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    SuchThat(SuchThat),
    Pattern(Pattern),
    With(With),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Clause {
    pub kind: ClauseKind,
    pub negated: bool,
}

impl Clause {
    /// Distinct synonyms the clause constrains, in argument order.
    pub fn synonyms(&self) -> Vec<&Synonym> {
        let candidates: Vec<Option<&Synonym>> = match &self.kind {
            ClauseKind::SuchThat(st) => vec![st.lhs.synonym(), st.rhs.synonym()],
            ClauseKind::Pattern(p) => vec![Some(&p.synonym), p.var.synonym()],
            ClauseKind::With(w) => [&w.lhs, &w.rhs]
                .into_iter()
                .map(|side| match side {
                    WithRef::Attr(a) => Some(&a.synonym),
                    _ => None,
                })
                .collect(),
        };
        let mut out: Vec<&Synonym> = Vec::new();
        for s in candidates.into_iter().flatten() {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        out
    }
}

/// One entry of the result tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Synonym(Synonym),
    Attr(AttrRef),
}

impl Element {
    pub fn synonym(&self) -> &Synonym {
        match self {
            Element::Synonym(s) => s,
            Element::Attr(a) => &a.synonym,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Boolean,
    Tuple(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub declarations: Vec<Synonym>,
    pub selection: Selection,
    pub clauses: Vec<Clause>,
}

impl Query {
    pub fn is_boolean(&self) -> bool {
        matches!(self.selection, Selection::Boolean)
    }

    /// Distinct synonyms referenced by the result clause.
    pub fn selected_synonyms(&self) -> Vec<&Synonym> {
        let mut out: Vec<&Synonym> = Vec::new();
        if let Selection::Tuple(elements) = &self.selection {
            for e in elements {
                if !out.contains(&e.synonym()) {
                    out.push(e.synonym());
                }
            }
        }
        out
    }
}
