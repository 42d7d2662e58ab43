use super::*;

#[test]
fn follows_in_all_argument_shapes() {
    let pkb = build(PROGRAM);
    let cases: &[(&str, &[&str])] = &[
        (
            "stmt a, b; Select <a, b> such that Follows(a, b)",
            &["1 2", "2 8", "3 7", "5 6", "9 10"],
        ),
        ("stmt s; Select s such that Follows(s, 8)", &["2"]),
        ("stmt s; Select s such that Follows(s, _)", &["1", "2", "3", "5", "9"]),
        ("stmt s; Select s such that Follows(3, s)", &["7"]),
        ("stmt s; Select s such that Follows(_, s)", &["2", "6", "7", "8", "10"]),
        ("Select BOOLEAN such that Follows(1, 2)", &["TRUE"]),
        ("Select BOOLEAN such that Follows(8, _)", &["FALSE"]),
        ("Select BOOLEAN such that Follows(1, _)", &["TRUE"]),
        ("Select BOOLEAN such that Follows(_, 1)", &["FALSE"]),
        ("Select BOOLEAN such that Follows(_, _)", &["TRUE"]),
    ];
    for (query, expected) in cases {
        assert_eq!(ask_all_ways(&pkb, query), *expected, "{query}");
    }
}

#[test]
fn synonym_types_restrict_results() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "assign a; Select a such that Follows(_, a)"), ["7"]);
    assert_eq!(ask(&pkb, "call c; Select c such that Parent(_, c)"), ["6"]);
    assert_eq!(ask(&pkb, "read r; print p; Select p such that Follows*(r, p)"), ["8"]);
}

#[test]
fn same_synonym_on_both_sides() {
    let pkb = build(PROGRAM);
    assert!(ask(&pkb, "stmt s; Select s such that Parent(s, s)").is_empty());
    assert!(ask(&pkb, "stmt s; Select s such that Follows*(s, s)").is_empty());
    assert_eq!(
        ask(&pkb, "stmt s; Select s such that Next*(s, s)"),
        ["2", "3", "4", "5", "6", "7"]
    );
    assert_eq!(ask(&pkb, "assign a; Select a such that Affects(a, a)"), ["7"]);
}

#[test]
fn uses_and_modifies_through_calls() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "variable v; Select v such that Uses(6, v)"), ["leaf", "q"]);
    assert_eq!(
        ask(&pkb, r#"procedure p; Select p such that Uses(p, "q")"#),
        ["helper", "main"]
    );
    assert_eq!(ask(&pkb, r#"call c; Select c such that Modifies(c, "w")"#), ["6"]);
    assert_eq!(ask(&pkb, r#"Select BOOLEAN such that Modifies("leaf", _)"#), ["FALSE"]);
    assert_eq!(ask(&pkb, r#"Select BOOLEAN such that Uses("leaf", _)"#), ["TRUE"]);
    assert_eq!(
        ask(&pkb, "while w; variable v; Select v such that Modifies(w, v)"),
        ["w", "x", "y", "z"]
    );
}

#[test]
fn next_and_affects() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "stmt s; Select s such that Next(3, s)"), ["4", "5"]);
    assert_eq!(ask(&pkb, "stmt s; Select s such that Next(s, 2)"), ["1", "7"]);
    assert_eq!(ask(&pkb, "stmt s; Select s such that Next*(9, s)"), ["10"]);
    assert_eq!(
        ask(&pkb, "assign a1, a2; Select <a1, a2> such that Affects(a1, a2)"),
        ["4 5", "7 4", "7 7"]
    );
    assert_eq!(ask(&pkb, "stmt s; Select s such that Affects(s, 5)"), ["4"]);
}
