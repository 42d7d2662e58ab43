//! Transitive closure passes run once all direct facts are known.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use ir::StmtNum;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::warn;

use crate::store::RelationView;

/// Closure of a relation whose edges always go from a lower to a higher
/// statement number (Follows, Parent).
///
/// Keys are visited from the highest number down, so every successor's
/// closure is complete by the time it is merged:
/// `closure(s) = direct(s) ∪ closure(direct(s))`.
pub fn numbered_closure(direct: RelationView<'_, StmtNum, StmtNum>) -> Vec<(StmtNum, StmtNum)> {
    let mut keys: Vec<StmtNum> = direct.keys().copied().collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));

    let mut closure: HashMap<StmtNum, HashSet<StmtNum>> = HashMap::with_capacity(keys.len());
    for key in keys {
        let mut reach = HashSet::new();
        for &next in direct.get_forward(&key) {
            reach.insert(next);
            if let Some(further) = closure.get(&next) {
                reach.extend(further.iter().copied());
            }
        }
        closure.insert(key, reach);
    }
    flatten(closure)
}

/// Closure over an acyclic relation, propagated in reverse topological
/// order (Calls). Falls back to [`scc_closure`] if a cycle shows up.
pub fn dag_closure<K>(direct: RelationView<'_, K, K>) -> Vec<(K, K)>
where
    K: Eq + Hash + Clone,
{
    let graph = index_graph(direct);
    let order = match toposort(&graph, None) {
        Ok(order) => order,
        Err(cycle) => {
            warn!(
                node = cycle.node_id().index(),
                "Cycle in acyclic relation, using SCC closure"
            );
            return scc_closure(direct);
        }
    };

    let mut reach: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
    for &node in order.iter().rev() {
        let mut set = HashSet::new();
        for succ in graph.neighbors(node) {
            set.insert(succ);
            if let Some(further) = reach.get(&succ) {
                set.extend(further.iter().copied());
            }
        }
        reach.insert(node, set);
    }
    resolve(&graph, reach)
}

/// Closure over a possibly cyclic relation (Next).
///
/// Strongly connected components come out of `tarjan_scc` in reverse
/// topological order, so each component's downstream reach is final when
/// it is visited. A component with more than one member reaches all of its
/// members, itself included; a singleton only reaches itself through a
/// self loop.
pub fn scc_closure<K>(direct: RelationView<'_, K, K>) -> Vec<(K, K)>
where
    K: Eq + Hash + Clone,
{
    let graph = index_graph(direct);
    let sccs = tarjan_scc(&graph);

    let mut component = vec![0usize; graph.node_count()];
    for (c, members) in sccs.iter().enumerate() {
        for node in members {
            component[node.index()] = c;
        }
    }

    let mut comp_reach: Vec<HashSet<NodeIndex>> = Vec::with_capacity(sccs.len());
    for (c, members) in sccs.iter().enumerate() {
        let cyclic = members.len() > 1 || graph.contains_edge(members[0], members[0]);
        let mut set: HashSet<NodeIndex> = HashSet::new();
        if cyclic {
            set.extend(members.iter().copied());
        }
        for &node in members {
            for succ in graph.neighbors(node) {
                let target = component[succ.index()];
                if target != c {
                    set.extend(sccs[target].iter().copied());
                    set.extend(comp_reach[target].iter().copied());
                }
            }
        }
        comp_reach.push(set);
    }

    let mut reach = HashMap::with_capacity(graph.node_count());
    for (c, members) in sccs.iter().enumerate() {
        for &node in members {
            reach.insert(node, comp_reach[c].clone());
        }
    }
    resolve(&graph, reach)
}

fn index_graph<K>(direct: RelationView<'_, K, K>) -> DiGraph<K, ()>
where
    K: Eq + Hash + Clone,
{
    let mut graph = DiGraph::new();
    let mut index: HashMap<K, NodeIndex> = HashMap::new();
    let mut node = |graph: &mut DiGraph<K, ()>, key: &K| {
        *index
            .entry(key.clone())
            .or_insert_with(|| graph.add_node(key.clone()))
    };
    for (from, to) in direct.pairs() {
        let a = node(&mut graph, from);
        let b = node(&mut graph, to);
        graph.add_edge(a, b, ());
    }
    graph
}

fn resolve<K: Clone>(
    graph: &DiGraph<K, ()>,
    reach: HashMap<NodeIndex, HashSet<NodeIndex>>,
) -> Vec<(K, K)> {
    reach
        .into_iter()
        .flat_map(|(from, tos)| {
            tos.into_iter()
                .map(move |to| (graph[from].clone(), graph[to].clone()))
        })
        .collect()
}

fn flatten(closure: HashMap<StmtNum, HashSet<StmtNum>>) -> Vec<(StmtNum, StmtNum)> {
    closure
        .into_iter()
        .flat_map(|(from, tos)| tos.into_iter().map(move |to| (from, to)))
        .collect()
}
