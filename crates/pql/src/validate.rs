//! Semantic checks that turn the untyped parse into a [`Query`].

use std::collections::HashMap;

use crate::model::{
    AttrName, AttrRef, Clause, ClauseKind, DesignEntity, Element, ExprSpec, Pattern, Query, Ref,
    Relation, Selection, SuchThat, Synonym, With, WithRef,
};
use crate::parser::{UClause, UElem, UQuery, URef, USelection, UWithRef};
use crate::QueryError;

struct Scope {
    synonyms: HashMap<String, DesignEntity>,
}

impl Scope {
    fn lookup(&self, name: &str) -> Result<Synonym, QueryError> {
        self.synonyms
            .get(name)
            .map(|&entity| Synonym::new(name, entity))
            .ok_or_else(|| QueryError::semantic(format!("synonym '{name}' is not declared")))
    }
}

pub(crate) fn validate(parsed: UQuery) -> Result<Query, QueryError> {
    let mut scope = Scope {
        synonyms: HashMap::new(),
    };
    let mut declarations = Vec::with_capacity(parsed.declarations.len());
    for (entity, name) in parsed.declarations {
        if scope.synonyms.insert(name.clone(), entity).is_some() {
            return Err(QueryError::semantic(format!(
                "synonym '{name}' is declared more than once"
            )));
        }
        declarations.push(Synonym::new(name, entity));
    }

    let selection = match parsed.selection {
        USelection::Boolean if scope.synonyms.contains_key("BOOLEAN") => {
            Selection::Tuple(vec![Element::Synonym(scope.lookup("BOOLEAN")?)])
        }
        USelection::Boolean => Selection::Boolean,
        USelection::Tuple(elements) => Selection::Tuple(
            elements
                .into_iter()
                .map(|e| element(&scope, e))
                .collect::<Result<_, _>>()?,
        ),
    };

    let clauses = parsed
        .clauses
        .into_iter()
        .map(|(clause, negated)| {
            let kind = match clause {
                UClause::SuchThat { relation, lhs, rhs } => {
                    ClauseKind::SuchThat(such_that(&scope, &relation, lhs, rhs)?)
                }
                UClause::Pattern {
                    synonym,
                    var,
                    expr,
                    arity,
                } => ClauseKind::Pattern(pattern(&scope, &synonym, var, expr, arity)?),
                UClause::With { lhs, rhs } => ClauseKind::With(with(&scope, lhs, rhs)?),
            };
            Ok(Clause { kind, negated })
        })
        .collect::<Result<_, QueryError>>()?;

    Ok(Query {
        declarations,
        selection,
        clauses,
    })
}

fn element(scope: &Scope, e: UElem) -> Result<Element, QueryError> {
    let synonym = scope.lookup(&e.name)?;
    match e.attr {
        None => Ok(Element::Synonym(synonym)),
        Some(attr) => Ok(Element::Attr(attr_ref(synonym, attr)?)),
    }
}

fn attr_ref(synonym: Synonym, attr: AttrName) -> Result<AttrRef, QueryError> {
    if synonym.entity.supports(attr) {
        Ok(AttrRef { synonym, attr })
    } else {
        Err(QueryError::semantic(format!(
            "{} synonym '{}' has no attribute {}",
            synonym.entity.keyword(),
            synonym.name,
            attr.name()
        )))
    }
}

fn resolve(scope: &Scope, r: URef) -> Result<Ref, QueryError> {
    Ok(match r {
        URef::Name(name) => Ref::Synonym(scope.lookup(&name)?),
        URef::Quoted(ident) => Ref::Ident(ident),
        URef::Integer(n) => Ref::Integer(n),
        URef::Wildcard => Ref::Wildcard,
    })
}

fn require(r: &Ref, ok: impl Fn(DesignEntity) -> bool, what: &str) -> Result<(), QueryError> {
    match r {
        Ref::Synonym(s) if !ok(s.entity) => Err(QueryError::semantic(format!(
            "'{}' must be a {what} synonym",
            s.name
        ))),
        _ => Ok(()),
    }
}

fn such_that(scope: &Scope, relation: &str, lhs: URef, rhs: URef) -> Result<SuchThat, QueryError> {
    let lhs = resolve(scope, lhs)?;
    let rhs = resolve(scope, rhs)?;
    let relation = match relation {
        "Follows" => Relation::Follows,
        "Follows*" => Relation::FollowsT,
        "Parent" => Relation::Parent,
        "Parent*" => Relation::ParentT,
        "Next" => Relation::Next,
        "Next*" => Relation::NextT,
        "Affects" => Relation::Affects,
        "Calls" => Relation::Calls,
        "Calls*" => Relation::CallsT,
        "Uses" | "Modifies" => {
            let procedure_side = match &lhs {
                Ref::Wildcard => {
                    return Err(QueryError::semantic(format!(
                        "first argument of {relation} cannot be a wildcard"
                    )))
                }
                Ref::Integer(_) => false,
                Ref::Ident(_) => true,
                Ref::Synonym(s) if s.entity == DesignEntity::Procedure => true,
                Ref::Synonym(s) if s.entity.is_statement() => false,
                Ref::Synonym(s) => {
                    return Err(QueryError::semantic(format!(
                        "'{}' cannot appear first in {relation}",
                        s.name
                    )))
                }
            };
            require(&rhs, |e| e == DesignEntity::Variable, "variable")?;
            let uses = relation == "Uses";
            let relation = match (uses, procedure_side) {
                (true, false) => Relation::UsesS,
                (true, true) => Relation::UsesP,
                (false, false) => Relation::ModifiesS,
                (false, true) => Relation::ModifiesP,
            };
            return Ok(SuchThat { relation, lhs, rhs });
        }
        other => return Err(QueryError::syntax(format!("unknown relationship '{other}'"))),
    };
    if matches!(relation, Relation::Calls | Relation::CallsT) {
        require(&lhs, |e| e == DesignEntity::Procedure, "procedure")?;
        require(&rhs, |e| e == DesignEntity::Procedure, "procedure")?;
    } else {
        require(&lhs, DesignEntity::is_statement, "statement")?;
        require(&rhs, DesignEntity::is_statement, "statement")?;
    }
    Ok(SuchThat { relation, lhs, rhs })
}

fn pattern(
    scope: &Scope,
    name: &str,
    var: URef,
    expr: ExprSpec,
    arity: usize,
) -> Result<Pattern, QueryError> {
    let synonym = scope.lookup(name)?;
    match (synonym.entity, arity) {
        (DesignEntity::Assign, 2) => {}
        (DesignEntity::While, 2) | (DesignEntity::If, 3) if expr == ExprSpec::Wildcard => {}
        (entity, _) => {
            return Err(QueryError::semantic(format!(
                "pattern cannot be applied to {} synonym '{name}' in this form",
                entity.keyword()
            )))
        }
    }
    let var = resolve(scope, var)?;
    require(&var, |e| e == DesignEntity::Variable, "variable")?;
    Ok(Pattern { synonym, var, expr })
}

fn with(scope: &Scope, lhs: UWithRef, rhs: UWithRef) -> Result<With, QueryError> {
    let lhs = with_ref(scope, lhs)?;
    let rhs = with_ref(scope, rhs)?;
    if lhs.attr_type() != rhs.attr_type() {
        return Err(QueryError::semantic("with compares values of different types"));
    }
    Ok(With { lhs, rhs })
}

fn with_ref(scope: &Scope, r: UWithRef) -> Result<WithRef, QueryError> {
    Ok(match r {
        UWithRef::Quoted(ident) => WithRef::Ident(ident),
        UWithRef::Integer(value) => WithRef::Integer(value),
        UWithRef::Attr(e) => {
            let synonym = scope.lookup(&e.name)?;
            let attr = e
                .attr
                .ok_or_else(|| QueryError::syntax("expected an attribute reference"))?;
            WithRef::Attr(attr_ref(synonym, attr)?)
        }
    })
}
