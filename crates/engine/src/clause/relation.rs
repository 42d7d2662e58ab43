//! `such that` clauses.
//!
//! Every relationship is a [`RelationView`] over either statement numbers or
//! names, so one generic routine handles the nine combinations of synonym,
//! literal and wildcard arguments.

use std::hash::Hash;

use ir::StmtNum;
use pkb::{ReadFacade, RelationView};
use pql::{Ref, Relation, SuchThat, Synonym};

use crate::domain::in_domain;
use crate::table::{Entity, OutputTable};
use crate::EngineError;

/// Key type of a relation side.
pub(crate) trait Cell: Eq + Hash + Clone {
    fn entity(&self) -> Entity;
    fn literal(r: &Ref) -> Option<Self>;
}

impl Cell for StmtNum {
    fn entity(&self) -> Entity {
        Entity::Stmt(*self)
    }

    fn literal(r: &Ref) -> Option<Self> {
        match r {
            Ref::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl Cell for String {
    fn entity(&self) -> Entity {
        Entity::Name(self.clone())
    }

    fn literal(r: &Ref) -> Option<Self> {
        match r {
            Ref::Ident(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Argument after checking it against the side's key type.
enum Arg<'q, T> {
    Synonym(&'q Synonym),
    Literal(T),
    Wildcard,
}

fn arg<'q, T: Cell>(relation: Relation, r: &'q Ref) -> Result<Arg<'q, T>, EngineError> {
    match r {
        Ref::Synonym(s) => Ok(Arg::Synonym(s)),
        Ref::Wildcard => Ok(Arg::Wildcard),
        literal => T::literal(literal).map(Arg::Literal).ok_or_else(|| {
            EngineError::UnsupportedArgument {
                relation: relation.name().to_string(),
                argument: format!("{literal:?}"),
            }
        }),
    }
}

pub(crate) fn evaluate(read: &ReadFacade<'_>, clause: &SuchThat) -> Result<OutputTable, EngineError> {
    let rel = clause.relation;
    let (lhs, rhs) = (&clause.lhs, &clause.rhs);
    match rel {
        Relation::Follows => relate(read, rel, read.follows(), lhs, rhs),
        Relation::FollowsT => relate(read, rel, read.follows_star(), lhs, rhs),
        Relation::Parent => relate(read, rel, read.parent(), lhs, rhs),
        Relation::ParentT => relate(read, rel, read.parent_star(), lhs, rhs),
        Relation::Next => relate(read, rel, read.next(), lhs, rhs),
        Relation::NextT => relate(read, rel, read.next_star(), lhs, rhs),
        Relation::Affects => relate(read, rel, read.affects(), lhs, rhs),
        Relation::Calls => relate(read, rel, read.calls(), lhs, rhs),
        Relation::CallsT => relate(read, rel, read.calls_star(), lhs, rhs),
        Relation::UsesS => relate(read, rel, read.uses_stmt(), lhs, rhs),
        Relation::UsesP => relate(read, rel, read.uses_proc(), lhs, rhs),
        Relation::ModifiesS => relate(read, rel, read.modifies_stmt(), lhs, rhs),
        Relation::ModifiesP => relate(read, rel, read.modifies_proc(), lhs, rhs),
    }
}

fn relate<K: Cell, V: Cell>(
    read: &ReadFacade<'_>,
    relation: Relation,
    view: RelationView<'_, K, V>,
    lhs: &Ref,
    rhs: &Ref,
) -> Result<OutputTable, EngineError> {
    let lhs = arg::<K>(relation, lhs)?;
    let rhs = arg::<V>(relation, rhs)?;
    let keep = |s: &Synonym, e: &Entity| in_domain(read, s, e);

    Ok(match (lhs, rhs) {
        (Arg::Synonym(a), Arg::Synonym(b)) if a == b => {
            if !relation.may_be_reflexive() {
                return Ok(OutputTable::empty(vec![a.clone()]));
            }
            let values = view
                .pairs()
                .map(|(k, v)| (k.entity(), v.entity()))
                .filter(|(k, v)| k == v && keep(a, k))
                .map(|(k, _)| k);
            OutputTable::column(a.clone(), values)
        }
        (Arg::Synonym(a), Arg::Synonym(b)) => {
            let rows = view
                .pairs()
                .map(|(k, v)| vec![k.entity(), v.entity()])
                .filter(|row| keep(a, &row[0]) && keep(b, &row[1]));
            OutputTable::new(vec![a.clone(), b.clone()], rows)
        }
        (Arg::Synonym(a), Arg::Literal(v)) => {
            let values = view.get_reverse(&v).iter().map(Cell::entity);
            OutputTable::column(a.clone(), values.filter(|e| keep(a, e)))
        }
        (Arg::Synonym(a), Arg::Wildcard) => {
            let values = view.keys().map(Cell::entity);
            OutputTable::column(a.clone(), values.filter(|e| keep(a, e)))
        }
        (Arg::Literal(k), Arg::Synonym(b)) => {
            let values = view.get_forward(&k).iter().map(Cell::entity);
            OutputTable::column(b.clone(), values.filter(|e| keep(b, e)))
        }
        (Arg::Wildcard, Arg::Synonym(b)) => {
            let values = view.values().map(Cell::entity);
            OutputTable::column(b.clone(), values.filter(|e| keep(b, e)))
        }
        (Arg::Literal(k), Arg::Literal(v)) => OutputTable::truth(view.has(&k, &v)),
        (Arg::Literal(k), Arg::Wildcard) => OutputTable::truth(view.contains_key(&k)),
        (Arg::Wildcard, Arg::Literal(v)) => OutputTable::truth(view.contains_value(&v)),
        (Arg::Wildcard, Arg::Wildcard) => OutputTable::truth(!view.is_empty()),
    })
}
