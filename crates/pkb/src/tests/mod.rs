use super::*;
use crate::closure::{dag_closure, numbered_closure, scc_closure};
use std::collections::HashSet;

fn sorted<K: Ord + Clone>(pairs: Vec<(K, K)>) -> Vec<(K, K)> {
    let mut pairs = pairs;
    pairs.sort();
    pairs
}

fn store(pairs: &[(StmtNum, StmtNum)]) -> RelationStore<StmtNum, StmtNum> {
    let mut store = RelationStore::new();
    for &(a, b) in pairs {
        store.add(a, b);
    }
    store
}

#[test]
fn add_is_idempotent() {
    let mut store: RelationStore<StmtNum, String> = RelationStore::new();
    assert!(store.add(1, "x".into()));
    assert!(!store.add(1, "x".into()));
    store.add(2, "x".into());

    let view = store.view();
    assert_eq!(view.len(), 2);
    assert!(view.has(&1, "x"));
    assert_eq!(view.get_forward(&1).len(), 1);
    let mut keys: Vec<StmtNum> = view.get_reverse("x").iter().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2]);
    assert_eq!(view.values().count(), 1);
}

#[test]
fn missing_keys_are_empty_not_errors() {
    let store: RelationStore<String, String> = RelationStore::new();
    let view = store.view();
    assert!(view.is_empty());
    assert!(view.get_forward("nobody").is_empty());
    assert!(view.get_reverse("nothing").is_empty());
    assert!(!view.contains_key("nobody"));
    assert!(!view.has("a", "b"));
    assert_eq!(view.pairs().count(), 0);
}

#[test]
fn numbered_closure_chains_forward() {
    let direct = store(&[(1, 2), (2, 3), (3, 4), (2, 5)]);
    let closure = sorted(numbered_closure(direct.view()));
    assert_eq!(
        closure,
        vec![(1, 2), (1, 3), (1, 4), (1, 5), (2, 3), (2, 4), (2, 5), (3, 4)]
    );
    assert!(closure.iter().all(|(a, b)| a != b));
}

#[test]
fn dag_closure_over_names() {
    let mut direct: RelationStore<String, String> = RelationStore::new();
    direct.add("P".into(), "Q".into());
    direct.add("Q".into(), "R".into());
    direct.add("P".into(), "S".into());
    let closure: HashSet<(String, String)> = dag_closure(direct.view()).into_iter().collect();
    assert!(closure.contains(&("P".into(), "R".into())));
    assert!(closure.contains(&("P".into(), "S".into())));
    assert!(!closure.contains(&("R".into(), "P".into())));
    assert_eq!(closure.len(), 4);
}

#[test]
fn dag_closure_tolerates_cycles() {
    let direct = store(&[(1, 2), (2, 1)]);
    let closure = sorted(dag_closure(direct.view()));
    assert_eq!(closure, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
}

#[test]
fn scc_closure_loop_members_reach_themselves() {
    // 1 -> 2 -> 3 -> 2, 2 -> 4
    let direct = store(&[(1, 2), (2, 3), (3, 2), (2, 4)]);
    let closure: HashSet<(StmtNum, StmtNum)> = scc_closure(direct.view()).into_iter().collect();
    for pair in [(2, 2), (3, 3), (2, 3), (3, 2), (1, 2), (1, 3), (1, 4), (3, 4)] {
        assert!(closure.contains(&pair), "missing {pair:?}");
    }
    assert!(!closure.contains(&(1, 1)));
    assert!(!closure.contains(&(4, 4)));
    assert!(!closure.contains(&(4, 2)));
    assert!(closure.contains(&(2, 4)));
    assert_eq!(closure.len(), 9);
}

#[test]
fn scc_closure_singleton_self_loop() {
    let direct = store(&[(5, 5), (5, 6)]);
    let closure = sorted(scc_closure(direct.view()));
    assert_eq!(closure, vec![(5, 5), (5, 6)]);
}

#[test]
fn scc_closure_matches_naive_reachability() {
    let edges = [
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 2),
        (3, 5),
        (5, 6),
        (6, 7),
        (7, 6),
        (6, 8),
        (8, 9),
        (1, 9),
    ];
    let direct = store(&edges);
    let closure: HashSet<(StmtNum, StmtNum)> = scc_closure(direct.view()).into_iter().collect();

    let mut naive = HashSet::new();
    for start in 1..=9 {
        let mut stack: Vec<StmtNum> = edges
            .iter()
            .filter(|(a, _)| *a == start)
            .map(|(_, b)| *b)
            .collect();
        let mut seen = HashSet::new();
        while let Some(n) = stack.pop() {
            if seen.insert(n) {
                naive.insert((start, n));
                stack.extend(edges.iter().filter(|(a, _)| *a == n).map(|(_, b)| *b));
            }
        }
    }
    assert_eq!(closure, naive);
}

#[test]
fn partial_pattern_matches_subtrees_only() {
    let mut store = AssignmentStore::default();
    // x = a + b * c
    store.add(
        1,
        "x".into(),
        ["a", "b", "c", "*", "+"].map(String::from).to_vec(),
    );
    let pat = |tokens: &[&str]| tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();
    assert!(store.matches(1, &pat(&["b", "c", "*"]), true));
    assert!(store.matches(1, &pat(&["a"]), true));
    assert!(!store.matches(1, &pat(&["a", "b", "+"]), true));
    assert!(store.matches(1, &pat(&["a", "b", "c", "*", "+"]), false));
    assert!(!store.matches(1, &pat(&["b", "c", "*"]), false));
    assert!(!store.matches(2, &pat(&["a"]), true));
    assert!(!store.matches(1, &[], true));
}

#[test]
fn write_facade_finalize_fills_closures() {
    let mut pkb = Pkb::new();
    {
        let mut w = pkb.writer();
        w.add_follows(1, 2);
        w.add_follows(2, 3);
        w.add_follows(2, 3);
        w.add_calls("P", "Q");
        w.add_calls("Q", "R");
        w.add_next(5, 6);
        w.add_next(6, 5);
        w.finalize();
    }
    let r = pkb.reader();
    assert!(pkb.is_finalized());
    assert!(r.follows_star().has(&1, &3));
    assert_eq!(r.follows().len(), 2);
    assert!(r.calls_star().has("P", "R"));
    assert!(!r.calls().has("P", "R"));
    for (a, b) in [(5, 5), (5, 6), (6, 5), (6, 6)] {
        assert!(r.next_star().has(&a, &b));
    }
}

#[test]
fn direct_pairs_are_in_closure_before_finalize() {
    let mut pkb = Pkb::new();
    pkb.writer().add_parent(1, 2);
    pkb.writer().add_calls("a", "b");
    pkb.writer().add_next(1, 2);
    let r = pkb.reader();
    assert!(r.parent_star().has(&1, &2));
    assert!(r.calls_star().has("a", "b"));
    assert!(r.next_star().is_empty());
}
