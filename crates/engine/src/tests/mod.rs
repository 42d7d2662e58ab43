use std::cmp::Ordering;
use std::collections::HashSet;

use pql::{parse_query, DesignEntity, Synonym};

use crate::optimiser::{has_opposite_pair, plan};
use crate::*;

fn syn(name: &str) -> Synonym {
    Synonym::new(name, DesignEntity::Stmt)
}

fn s(n: u32) -> Entity {
    Entity::Stmt(n)
}

fn table(cols: &[&str], rows: &[&[u32]]) -> OutputTable {
    OutputTable::new(
        cols.iter().map(|c| syn(c)).collect(),
        rows.iter().map(|r| r.iter().map(|&n| s(n)).collect()),
    )
}

/// Row set with columns in a fixed order, so tables built by joins in
/// different orders can be compared.
fn canonical(t: &OutputTable) -> HashSet<Row> {
    let mut cols = t.columns().to_vec();
    cols.sort();
    t.project(&cols).rows().cloned().collect()
}

#[test]
fn unit_is_join_identity() {
    let t = table(&["a", "b"], &[&[1, 2], &[2, 3]]);
    assert_eq!(OutputTable::unit().join(t.clone()), t);
    assert_eq!(t.clone().join(OutputTable::unit()), t);
}

#[test]
fn empty_absorbs_join() {
    let t = table(&["a"], &[&[1]]);
    let empty = OutputTable::empty(vec![syn("b")]);
    let joined = t.join(empty);
    assert!(joined.is_empty());
    assert_eq!(joined.columns().len(), 2);
    assert!(OutputTable::truth(false).join(OutputTable::unit()).is_empty());
}

#[test]
fn join_on_shared_column() {
    let left = table(&["a", "b"], &[&[1, 2], &[2, 3], &[3, 4]]);
    let right = table(&["b", "c"], &[&[2, 7], &[3, 8], &[9, 9]]);
    let joined = left.join(right);
    assert_eq!(joined.columns(), &[syn("a"), syn("b"), syn("c")]);
    let rows: HashSet<Row> = joined.rows().cloned().collect();
    assert_eq!(
        rows,
        HashSet::from([vec![s(1), s(2), s(7)], vec![s(2), s(3), s(8)]])
    );
}

#[test]
fn join_without_shared_columns_is_cross_product() {
    let joined = table(&["a"], &[&[1], &[2]]).join(table(&["b"], &[&[5], &[6], &[7]]));
    assert_eq!(joined.len(), 6);
}

#[test]
fn join_is_commutative_and_associative() {
    let x = table(&["a", "b"], &[&[1, 2], &[2, 3], &[3, 3]]);
    let y = table(&["b", "c"], &[&[2, 5], &[3, 6], &[3, 7]]);
    let z = table(&["c", "a"], &[&[5, 1], &[6, 2], &[7, 9]]);
    let xy_z = x.clone().join(y.clone()).join(z.clone());
    let x_yz = x.clone().join(y.clone().join(z.clone()));
    let zyx = z.join(y).join(x);
    assert_eq!(canonical(&xy_z), canonical(&x_yz));
    assert_eq!(canonical(&xy_z), canonical(&zyx));
    assert_eq!(xy_z.len(), 2);
}

#[test]
fn subtract_aligns_columns() {
    let universe = table(&["a", "b"], &[&[1, 1], &[1, 2], &[2, 1], &[2, 2]]);
    let positive = table(&["b", "a"], &[&[2, 1]]);
    let rest = universe.subtract(&positive);
    assert_eq!(rest.len(), 3);
    assert!(!rest.rows().any(|r| r == &vec![s(1), s(2)]));

    assert!(OutputTable::unit().subtract(&OutputTable::unit()).is_empty());
    assert_eq!(
        OutputTable::unit().subtract(&OutputTable::truth(false)),
        OutputTable::unit()
    );
}

#[test]
fn subtracting_an_empty_table_keeps_every_row() {
    let rest = table(&["s"], &[&[1], &[2]]).subtract(&OutputTable::empty(vec![syn("s")]));
    assert_eq!(rest, table(&["s"], &[&[1], &[2]]));
    let pairs = table(&["a", "b"], &[&[1, 2], &[2, 1]]);
    assert_eq!(pairs.clone().subtract(&OutputTable::empty(vec![syn("b")])), pairs);
}

#[test]
fn zero_column_rows_collapse_to_unit() {
    assert_eq!(OutputTable::new(Vec::new(), [Vec::new()]), OutputTable::unit());
    assert!(OutputTable::new(Vec::new(), Vec::<Row>::new()).is_empty());
    assert_eq!(OutputTable::unit().project(&[syn("a")]), OutputTable::unit());
}

#[test]
fn planner_groups_by_shared_synonyms() {
    let q = parse_query(
        "stmt s1, s2, s3; assign a; Select s1 such that Follows(s1, s2) and Parent(s3, a) \
         and Next(1, 2) and Follows(s1, s2) with s2.stmt# = 3",
    )
    .unwrap();
    let groups = plan(&q);
    assert_eq!(groups.len(), 3);
    assert!(groups[0].synonyms.is_empty());
    assert!(!groups[1].selected);
    assert!(groups[2].selected);
    // the duplicate Follows clause is dropped and the with clause leads
    assert_eq!(groups[2].clauses.len(), 2);
    assert!(matches!(groups[2].clauses[0].kind, pql::ClauseKind::With(_)));
}

#[test]
fn negated_clauses_are_placed_last() {
    let q = parse_query("stmt s; assign a; Select s such that not Follows(s, a) and Parent(s, a)")
        .unwrap();
    let groups = plan(&q);
    assert_eq!(groups.len(), 1);
    assert!(!groups[0].clauses[0].negated);
    assert!(groups[0].clauses[1].negated);
}

#[test]
fn answers_sort_numerically_by_field() {
    let mut answers = vec!["10", "9", "x", "2 10", "2 9", "100"];
    answers.sort_by(|a, b| answer_order(a, b));
    assert_eq!(answers, ["2 9", "2 10", "9", "10", "100", "x"]);
    assert_eq!(answer_order("a b", "a b"), Ordering::Equal);
}

#[test]
fn config_defaults_enable_everything() {
    let cfg: EngineConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
    assert!(cfg.optimise);
    assert!(!cfg.parallel);
}

#[test]
fn opposite_clauses_are_detected() {
    let q = parse_query("stmt s; Select s such that Follows(s, _) and not Follows(s, _)").unwrap();
    assert!(has_opposite_pair(&q));
    let q = parse_query("stmt s; Select s such that Follows(s, _) and not Follows(_, s)").unwrap();
    assert!(!has_opposite_pair(&q));
    let q = parse_query("stmt s; Select s such that not Follows(s, _) and not Follows(s, _)").unwrap();
    assert!(!has_opposite_pair(&q));
}
