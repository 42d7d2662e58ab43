//! Clause planning: deduplication, grouping by shared synonyms and
//! evaluation order.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::unionfind::UnionFind;
use pql::{Clause, ClauseKind, Query};

/// Clauses connected through shared synonyms, in evaluation order.
#[derive(Debug, Clone)]
pub struct ClauseGroup<'q> {
    pub clauses: Vec<&'q Clause>,
    pub synonyms: BTreeSet<&'q str>,
    /// Whether the group binds a synonym of the result clause.
    pub selected: bool,
}

impl ClauseGroup<'_> {
    fn rank(&self) -> u8 {
        match (self.synonyms.is_empty(), self.selected) {
            (true, _) => 0,
            (false, false) => 1,
            (false, true) => 2,
        }
    }
}

/// Splits the query's clauses into independently evaluable groups.
pub fn plan(query: &Query) -> Vec<ClauseGroup<'_>> {
    let mut seen = HashSet::new();
    let clauses: Vec<&Clause> = query.clauses.iter().filter(|c| seen.insert(*c)).collect();
    let selected: HashSet<&str> = query
        .selected_synonyms()
        .into_iter()
        .map(|s| s.name.as_str())
        .collect();

    let mut sets = UnionFind::new(clauses.len());
    let mut owner: HashMap<&str, usize> = HashMap::new();
    for (i, &clause) in clauses.iter().enumerate() {
        for s in clause.synonyms() {
            match owner.get(s.name.as_str()) {
                Some(&j) => {
                    sets.union(i, j);
                }
                None => {
                    owner.insert(s.name.as_str(), i);
                }
            }
        }
    }

    let mut by_root: HashMap<usize, Vec<&Clause>> = HashMap::new();
    let mut roots = Vec::new();
    for (i, &clause) in clauses.iter().enumerate() {
        let root = sets.find(i);
        if !by_root.contains_key(&root) {
            roots.push(root);
        }
        by_root.entry(root).or_default().push(clause);
    }

    let mut groups: Vec<ClauseGroup<'_>> = roots
        .into_iter()
        .filter_map(|root| by_root.remove(&root))
        .map(|members| {
            let synonyms: BTreeSet<&str> = members
                .iter()
                .flat_map(|&c| c.synonyms())
                .map(|s| s.name.as_str())
                .collect();
            let touches_selection = synonyms.iter().any(|s| selected.contains(s));
            ClauseGroup {
                clauses: order(members),
                synonyms,
                selected: touches_selection,
            }
        })
        .collect();
    groups.sort_by_key(|g| g.rank());
    groups
}

/// Whether some clause also appears negated, which makes the query
/// unsatisfiable whatever the knowledge base holds.
pub fn has_opposite_pair(query: &Query) -> bool {
    let positive: HashSet<&ClauseKind> = query
        .clauses
        .iter()
        .filter(|c| !c.negated)
        .map(|c| &c.kind)
        .collect();
    query
        .clauses
        .iter()
        .any(|c| c.negated && positive.contains(&c.kind))
}

/// All clauses as one group in written order.
pub fn unplanned(query: &Query) -> Vec<ClauseGroup<'_>> {
    if query.clauses.is_empty() {
        return Vec::new();
    }
    let clauses: Vec<&Clause> = query.clauses.iter().collect();
    let synonyms = clauses
        .iter()
        .flat_map(|&c| c.synonyms())
        .map(|s| s.name.as_str())
        .collect();
    vec![ClauseGroup {
        clauses,
        synonyms,
        selected: true,
    }]
}

fn cost(clause: &Clause) -> (bool, usize, u8) {
    let kind = match clause.kind {
        ClauseKind::With(_) => 0,
        ClauseKind::SuchThat(_) | ClauseKind::Pattern(_) => 1,
    };
    (clause.negated, clause.synonyms().len(), kind)
}

/// Greedy order: cheapest clause first, then always the cheapest clause
/// sharing a synonym with those already placed.
fn order(mut pending: Vec<&Clause>) -> Vec<&Clause> {
    let mut placed: Vec<&Clause> = Vec::with_capacity(pending.len());
    let mut bound: HashSet<&str> = HashSet::new();
    while !pending.is_empty() {
        let connected = |c: &&Clause| c.synonyms().iter().any(|s| bound.contains(s.name.as_str()));
        let pick = pending
            .iter()
            .enumerate()
            .filter(|(_, c)| placed.is_empty() || connected(*c))
            .min_by_key(|(_, c)| cost(c))
            .or_else(|| pending.iter().enumerate().min_by_key(|(_, c)| cost(c)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let clause = pending.remove(pick);
        bound.extend(clause.synonyms().into_iter().map(|s| s.name.as_str()));
        placed.push(clause);
    }
    placed
}
