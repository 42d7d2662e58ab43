use crate::parser::{Parser, UClause, UQuery, URef, USelection};
use crate::tokens::tokenize;
use crate::*;

fn untyped(q: &str) -> Result<UQuery, QueryError> {
    Parser::new(tokenize(q)?).parse()
}

#[test]
fn declarations_accept_lists() {
    let parsed = untyped("stmt s1, s2; variable v; Select s1").unwrap();
    assert_eq!(parsed.declarations.len(), 3);
    assert_eq!(parsed.declarations[1], (DesignEntity::Stmt, "s2".to_string()));
}

#[test]
fn and_continues_the_current_section() {
    let parsed =
        untyped("assign a; Select a such that Follows(a, _) and Parent(_, a) pattern a(_, _)")
            .unwrap();
    assert_eq!(parsed.clauses.len(), 3);
    assert!(matches!(parsed.clauses[1].0, UClause::SuchThat { ref relation, .. } if relation == "Parent"));
    assert!(matches!(parsed.clauses[2].0, UClause::Pattern { .. }));
}

#[test]
fn not_is_a_synonym_when_no_clause_body_follows() {
    let parsed = untyped("assign not; Select not pattern not(_, _)").unwrap();
    assert!(matches!(
        parsed.clauses[0],
        (UClause::Pattern { ref synonym, .. }, false) if synonym == "not"
    ));

    let parsed = untyped("assign a; Select a such that not Follows(a, 3)").unwrap();
    assert!(parsed.clauses[0].1);
}

#[test]
fn boolean_keyword_is_left_for_validation() {
    let parsed = untyped("Select BOOLEAN").unwrap();
    assert_eq!(parsed.selection, USelection::Boolean);
    let parsed = untyped("stmt BOOLEAN; Select BOOLEAN.stmt#").unwrap();
    assert!(matches!(parsed.selection, USelection::Tuple(_)));
}

#[test]
fn integers_are_normalised_and_bounded() {
    let parsed = untyped("stmt s; Select s such that Follows(007, s)").unwrap();
    assert!(matches!(
        parsed.clauses[0].0,
        UClause::SuchThat { lhs: URef::Integer(7), .. }
    ));
    let err = untyped("stmt s; Select s such that Follows(99999999999, s)").unwrap_err();
    assert_eq!(err.kind_str(), "SyntaxError");
}

#[test]
fn error_kinds_map_to_answers() {
    assert_eq!(QueryError::syntax("x").kind_str(), "SyntaxError");
    assert_eq!(QueryError::semantic("x").kind_str(), "SemanticError");
}
