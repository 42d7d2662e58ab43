use super::*;

#[test]
fn assignment_patterns() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, r#"assign a; Select a pattern a(_, _"x"_)"#), ["4", "7"]);
    assert_eq!(ask(&pkb, r#"assign a; Select a pattern a("x", _)"#), ["7"]);
    assert_eq!(
        ask(&pkb, r#"assign a; variable v; Select <a, v> pattern a(v, "x - 1")"#),
        ["7 x"]
    );
    assert_eq!(ask(&pkb, r#"assign a; Select a pattern a(_, "007 + q")"#), ["9"]);
    assert_eq!(ask(&pkb, r#"assign a; Select a pattern a(_, _"x * 2"_)"#), ["4"]);
    assert!(ask(&pkb, r#"assign a; Select a pattern a(_, _"2 * x"_)"#).is_empty());
    assert!(ask(&pkb, r#"assign a; Select a pattern a(_, "x")"#).is_empty());
}

#[test]
fn container_patterns_match_control_variables() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "while w; variable v; Select v pattern w(v, _)"), ["x"]);
    assert_eq!(ask(&pkb, r#"if ifs; Select ifs pattern ifs("x", _, _)"#), ["3"]);
    assert!(ask(&pkb, r#"if ifs; Select ifs pattern ifs("y", _, _)"#).is_empty());
}

#[test]
fn with_compares_attribute_values() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, r#"call c; Select c with c.procName = "helper""#), ["6"]);
    assert_eq!(
        ask(&pkb, "stmt s; constant c; Select s with s.stmt# = c.value"),
        ["1", "2", "5", "7"]
    );
    assert_eq!(
        ask(&pkb, "procedure p; call c; Select p with p.procName = c.procName"),
        ["helper", "leaf"]
    );
    assert_eq!(
        ask(&pkb, "print p; variable v; Select p with p.varName = v.varName"),
        ["8", "11"]
    );
    assert_eq!(ask(&pkb, "stmt s; Select s with s.stmt# = 0010"), ["10"]);
    assert_eq!(ask(&pkb, "Select BOOLEAN with 1 = 1"), ["TRUE"]);
    assert_eq!(ask(&pkb, r#"Select BOOLEAN with "a" = "b""#), ["FALSE"]);
}

#[test]
fn result_clause_forms() {
    let pkb = build(PROGRAM);
    assert_eq!(ask(&pkb, "procedure p; Select p"), ["helper", "leaf", "main"]);
    assert_eq!(ask(&pkb, "read r; Select r.varName"), ["x"]);
    assert_eq!(ask(&pkb, "call c; Select <c, c.procName>"), ["6 helper", "10 leaf"]);
    assert_eq!(
        ask(&pkb, "read r; procedure p; Select <r, p>"),
        ["1 helper", "1 leaf", "1 main"]
    );
    assert_eq!(
        ask(&pkb, "stmt BOOLEAN; Select BOOLEAN such that Follows(BOOLEAN, 8)"),
        ["2"]
    );
    assert_eq!(ask(&pkb, "call c; Select c.procName such that Parent(_, c)"), ["helper"]);
    assert_eq!(ask(&pkb, "stmt s; Select <s, s> such that Follows(s, 8)"), ["2 2"]);
}

#[test]
fn unrelated_groups_only_need_results() {
    let pkb = build(PROGRAM);
    assert_eq!(
        ask_all_ways(&pkb, "procedure p; stmt s; Select p such that Follows(s, 8)"),
        ["helper", "leaf", "main"]
    );
    assert!(ask_all_ways(&pkb, "procedure p; stmt s; Select p such that Follows(8, s)").is_empty());
    assert_eq!(
        ask_all_ways(&pkb, "stmt s; Select BOOLEAN such that Parent(s, 4) and Follows(1, 2)"),
        ["TRUE"]
    );
}
