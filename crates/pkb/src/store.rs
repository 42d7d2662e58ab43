//! Generic two-way indexed relation store.
//!
//! Every relation of the knowledge base is a [`RelationStore`]: a forward
//! map `K -> {V}` and a reverse map `V -> {K}` kept in lock step. Transitive
//! relations pair a direct store with a closure store ([`TransitiveStore`]).
//! Readers only ever see a [`RelationView`], which has no mutating methods.

use std::borrow::Borrow;
use std::collections::{hash_set, HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct RelationStore<K, V> {
    forward: HashMap<K, HashSet<V>>,
    reverse: HashMap<V, HashSet<K>>,
    len: usize,
}

impl<K, V> Default for RelationStore<K, V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
            len: 0,
        }
    }
}

impl<K, V> RelationStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `(k, v)` into both indices. Returns `false` when the pair
    /// was already present, in which case nothing changes.
    pub fn add(&mut self, k: K, v: V) -> bool {
        let inserted = self
            .forward
            .entry(k.clone())
            .or_default()
            .insert(v.clone());
        if inserted {
            self.reverse.entry(v).or_default().insert(k);
            self.len += 1;
        }
        inserted
    }

    pub fn view(&self) -> RelationView<'_, K, V> {
        RelationView { store: self }
    }

    pub fn has<Q1, Q2>(&self, k: &Q1, v: &Q2) -> bool
    where
        K: Borrow<Q1>,
        V: Borrow<Q2>,
        Q1: Eq + Hash + ?Sized,
        Q2: Eq + Hash + ?Sized,
    {
        self.forward.get(k).is_some_and(|vs| vs.contains(v))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Set of values related to one key. Absent keys give an empty set.
#[derive(Debug)]
pub struct Related<'a, T> {
    set: Option<&'a HashSet<T>>,
}

impl<T> Clone for Related<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Related<'_, T> {}

impl<'a, T: Eq + Hash> Related<'a, T> {
    pub fn len(&self) -> usize {
        self.set.map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.set.is_some_and(|s| s.contains(value))
    }

    pub fn iter(&self) -> RelatedIter<'a, T> {
        RelatedIter {
            inner: self.set.map(HashSet::iter),
        }
    }
}

impl<'a, T: Eq + Hash> IntoIterator for Related<'a, T> {
    type Item = &'a T;
    type IntoIter = RelatedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct RelatedIter<'a, T> {
    inner: Option<hash_set::Iter<'a, T>>,
}

impl<'a, T> Iterator for RelatedIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }
}

/// Read-only window onto a [`RelationStore`].
#[derive(Debug)]
pub struct RelationView<'a, K, V> {
    store: &'a RelationStore<K, V>,
}

impl<K, V> Clone for RelationView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for RelationView<'_, K, V> {}

impl<'a, K, V> RelationView<'a, K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Membership of a fully bound pair.
    pub fn has<Q1, Q2>(&self, k: &Q1, v: &Q2) -> bool
    where
        K: Borrow<Q1>,
        V: Borrow<Q2>,
        Q1: Eq + Hash + ?Sized,
        Q2: Eq + Hash + ?Sized,
    {
        self.store.has(k, v)
    }

    /// Values related to `k`; empty when `k` was never inserted.
    pub fn get_forward<Q>(&self, k: &Q) -> Related<'a, V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        Related {
            set: self.store.forward.get(k),
        }
    }

    /// Keys related to `v`; empty when `v` was never inserted.
    pub fn get_reverse<Q>(&self, v: &Q) -> Related<'a, K>
    where
        V: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        Related {
            set: self.store.reverse.get(v),
        }
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.forward.contains_key(k)
    }

    pub fn contains_value<Q>(&self, v: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.reverse.contains_key(v)
    }

    /// Every key with at least one related value.
    pub fn keys(&self) -> impl Iterator<Item = &'a K> + 'a {
        self.store.forward.keys()
    }

    /// Every value with at least one related key.
    pub fn values(&self) -> impl Iterator<Item = &'a V> + 'a {
        self.store.reverse.keys()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
        self.store
            .forward
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k, v)))
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Direct relation plus its transitive closure.
#[derive(Debug, Clone)]
pub struct TransitiveStore<K> {
    pub(crate) direct: RelationStore<K, K>,
    pub(crate) star: RelationStore<K, K>,
}

impl<K> Default for TransitiveStore<K> {
    fn default() -> Self {
        Self {
            direct: RelationStore::default(),
            star: RelationStore::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> TransitiveStore<K> {
    /// Records a direct pair and its trivial closure membership.
    pub fn add(&mut self, from: K, to: K) {
        self.direct.add(from.clone(), to.clone());
        self.star.add(from, to);
    }

    /// Records a direct pair only; the closure is filled in by a later pass.
    pub fn add_direct(&mut self, from: K, to: K) {
        self.direct.add(from, to);
    }

    pub fn extend_star(&mut self, pairs: impl IntoIterator<Item = (K, K)>) {
        for (from, to) in pairs {
            self.star.add(from, to);
        }
    }

    pub fn direct(&self) -> RelationView<'_, K, K> {
        self.direct.view()
    }

    pub fn star(&self) -> RelationView<'_, K, K> {
        self.star.view()
    }
}
