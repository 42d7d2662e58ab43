use super::*;
use serde_json::Value as JsonValue;

fn var(name: &str) -> Expr {
    Expr::Var(name.into())
}

fn constant(value: &str) -> Expr {
    Expr::Const(value.into())
}

fn rel(lhs: Expr, rhs: Expr) -> CondExpr {
    CondExpr::Rel {
        op: RelOp::Lt,
        lhs,
        rhs,
    }
}

/// procedure main { read x; while (x < 10) { x = x + 1; print x; } y = x; }
/// procedure other { call main; }
fn sample() -> (Program, [StmtId; 6]) {
    let mut p = Program::default();
    let read = p.push_statement(StmtKind::Read { var: "x".into() }, Meta::new(2, 5));
    let inc = p.push_statement(
        StmtKind::Assign {
            var: "x".into(),
            expr: Expr::binary(BinOp::Add, var("x"), constant("1")),
        },
        Meta::new(4, 9),
    );
    let print = p.push_statement(StmtKind::Print { var: "x".into() }, Meta::new(5, 9));
    let wh = p.push_statement(
        StmtKind::While {
            cond: rel(var("x"), constant("10")),
            body: vec![inc, print],
        },
        Meta::new(3, 5),
    );
    let assign = p.push_statement(
        StmtKind::Assign {
            var: "y".into(),
            expr: var("x"),
        },
        Meta::new(7, 5),
    );
    let call = p.push_statement(
        StmtKind::Call {
            procedure: "main".into(),
        },
        Meta::new(10, 5),
    );
    p.procedures.push(Procedure {
        name: "main".into(),
        body: vec![read, wh, assign],
        meta: Meta::new(1, 1),
    });
    p.procedures.push(Procedure {
        name: "other".into(),
        body: vec![call],
        meta: Meta::new(9, 1),
    });
    (p, [read, inc, print, wh, assign, call])
}

#[test]
fn annotate_numbers_in_pre_order() {
    let (program, [read, inc, print, wh, assign, call]) = sample();
    let numbers = annotate(&program);
    assert_eq!(numbers.number(read), 1);
    assert_eq!(numbers.number(wh), 2);
    assert_eq!(numbers.number(inc), 3);
    assert_eq!(numbers.number(print), 4);
    assert_eq!(numbers.number(assign), 5);
    assert_eq!(numbers.number(call), 6);
    assert_eq!(numbers.len(), 6);
    assert_eq!(numbers.id(0), None);
    assert_eq!(numbers.id(7), None);
    let order: Vec<StmtNum> = numbers.iter().map(|(n, _)| n).collect();
    assert_eq!(order, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn push_statement_links_parent() {
    let (program, ids) = sample();
    let wh = ids[3];
    assert_eq!(program.statement(ids[1]).parent, Some(wh));
    assert_eq!(program.statement(ids[2]).parent, Some(wh));
    assert_eq!(program.statement(wh).parent, None);
    assert_eq!(program.descendants(&[wh]), vec![wh, ids[1], ids[2]]);
}

#[test]
fn postfix_respects_tree_shape() {
    // a - (b - c)
    let e = Expr::binary(
        BinOp::Sub,
        var("a"),
        Expr::binary(BinOp::Sub, var("b"), var("c")),
    );
    assert_eq!(e.postfix(), ["a", "b", "c", "-", "-"]);
    assert_eq!(e.to_string(), "a - (b - c)");

    let e = Expr::binary(
        BinOp::Add,
        var("a"),
        Expr::binary(BinOp::Mul, var("b"), constant("3")),
    );
    assert_eq!(e.to_string(), "a + b * 3");
    assert_eq!(e.variables().into_iter().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(e.constants().into_iter().collect::<Vec<_>>(), ["3"]);
}

#[test]
fn condition_collects_control_variables() {
    let cond = CondExpr::And(
        Box::new(CondExpr::Not(Box::new(rel(var("i"), constant("5"))))),
        Box::new(rel(var("j"), var("k"))),
    );
    let vars: Vec<String> = cond.variables().into_iter().collect();
    assert_eq!(vars, ["i", "j", "k"]);
    assert_eq!(cond.to_string(), "(!(i < 5)) && (j < k)");
}

#[test]
fn statement_serialization_carries_kind_and_meta() {
    let (program, ids) = sample();
    let json = serde_json::to_string(program.statement(ids[0])).unwrap();
    let v: JsonValue = serde_json::from_str(&json).unwrap();
    assert_eq!(v["kind"], "read");
    assert_eq!(v["var"], "x");
    assert_eq!(v["meta"]["line"], 2);

    let back: Statement = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, program.statement(ids[0]));
}

#[test]
fn cfg_exports() {
    let mut cfg = Cfg::new("main");
    cfg.nodes.push(CfgNode {
        id: 1,
        line: 2,
        code: "read x".into(),
    });
    cfg.nodes.push(CfgNode {
        id: 2,
        line: 3,
        code: "while (x < 10)".into(),
    });
    cfg.add_edge(1, 2);
    cfg.add_edge(1, 2);
    cfg.add_edge(2, 2);
    assert_eq!(cfg.edges.len(), 2);
    assert_eq!(cfg.successors(2).collect::<Vec<_>>(), vec![2]);

    let dot = cfg.to_dot();
    assert!(dot.starts_with("digraph main {"));
    assert!(dot.contains("1 -> 2;"));
    let mermaid = cfg.to_mermaid();
    assert!(mermaid.contains("s2 --> s2"));
    let json: JsonValue = serde_json::from_str(&cfg.to_json().unwrap()).unwrap();
    assert_eq!(json["procedure"], "main");
    assert_eq!(json["edges"][0], serde_json::json!([1, 2]));
}
