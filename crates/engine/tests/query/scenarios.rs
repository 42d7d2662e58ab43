use super::*;

#[test]
fn sequential_statements_follow() {
    let pkb = build("procedure P { x = 1; y = x + 1; }");
    assert_eq!(ask(&pkb, "stmt s1, s2; Select s1 such that Follows(s1, s2)"), ["1"]);
    assert_eq!(ask(&pkb, "Select BOOLEAN such that Follows(1, 2)"), ["TRUE"]);
    assert_eq!(ask(&pkb, "Select BOOLEAN such that Follows(2, 1)"), ["FALSE"]);
}

#[test]
fn if_nested_in_while() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "while w; if ifs; Select <w, ifs> such that Parent(w, ifs)"), ["2 3"]);
    assert_eq!(
        ask(&pkb, "while w; stmt s; Select s such that Parent*(w, s)"),
        ["3", "4", "5", "6", "7"]
    );
    assert_eq!(
        ask(&pkb, "if ifs; variable v; Select v such that Modifies(ifs, v)"),
        ["w", "y", "z"]
    );
}

#[test]
fn calls_closure_is_transitive() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, r#"Select BOOLEAN such that Calls*("main", "leaf")"#), ["TRUE"]);
    assert_eq!(ask(&pkb, r#"Select BOOLEAN such that Calls("main", "leaf")"#), ["FALSE"]);
    assert_eq!(
        ask(&pkb, r#"procedure p; Select p such that Calls*(p, "leaf")"#),
        ["helper", "main"]
    );
}

#[test]
fn loop_statements_reach_themselves() {
    let pkb = build("procedure p { x = 1; y = 2; z = 3; a = 4; while (x < 5) { x = x + 1; } }");
    for (a, b) in [(5, 5), (5, 6), (6, 5), (6, 6)] {
        assert_eq!(
            ask(&pkb, &format!("Select BOOLEAN such that Next*({a}, {b})")),
            ["TRUE"],
            "Next*({a}, {b})"
        );
    }
    assert_eq!(ask(&pkb, "stmt s; Select s such that Next*(s, s)"), ["5", "6"]);
    assert_eq!(ask(&pkb, "stmt s; Select s such that Next(s, s)"), Vec::<String>::new());
}

#[test]
fn unknown_callee_gives_empty_answer() {
    let pkb = build(PROGRAM);
    assert!(ask(&pkb, r#"procedure p; Select p such that Calls(p, "Q")"#).is_empty());
}

#[test]
fn invalid_queries_answer_error_kind() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "stmt s; Select s such that Follows(s, "), ["SyntaxError"]);
    assert_eq!(ask(&pkb, "stmt s; Select v"), ["SemanticError"]);
    assert_eq!(ask(&pkb, "stmt s; Select BOOLEAN such that Follows(s, v)"), ["SemanticError"]);
}
