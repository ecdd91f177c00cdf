//! Clause hash table

use crate::{
    clause::Clause,
    literal::Literal,
    memory::{Offset, Vector},
};
use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
};

/// A clause viewed as a set of literals: sorted, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseKey(Vector<Literal>);

impl ClauseKey {
    /// Compute the key of some literals.
    pub fn new(literals: &[Literal]) -> ClauseKey {
        let mut key: Vec<Literal> = literals.to_vec();
        key.sort_unstable();
        key.dedup();
        ClauseKey(Vector::from_vec(key))
    }
    /// The sorted literals.
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }
}

impl Hash for ClauseKey {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        clause_hash(&self.0).hash(hasher);
    }
}

/// Maps clauses (by literal set) to the identifiers of the live clauses
/// with that set, oldest first.
#[derive(Debug, Default, Clone)]
pub struct ClauseHashTable(HashMap<ClauseKey, Vector<Clause>>);

impl ClauseHashTable {
    /// Create an empty hash table.
    pub fn new() -> ClauseHashTable {
        ClauseHashTable(HashMap::new())
    }
    /// Add a new clause to the hash table.
    pub fn add_clause(&mut self, key: ClauseKey, clause: Clause) {
        let equal_clauses = self.0.entry(key).or_insert_with(Vector::new);
        invariant!(equal_clauses.last().map_or(true, |&last| last < clause));
        equal_clauses.push(clause)
    }
    /// Find the oldest clause with this literal set.
    ///
    /// If delete is true, remove the found clause from the table.
    pub fn find_equal_clause(&mut self, key: &ClauseKey, delete: bool) -> Option<Clause> {
        let equal_clauses = self.0.get_mut(key)?;
        let first = equal_clauses.first().cloned();
        if delete && first.is_some() {
            equal_clauses.remove(0);
            if equal_clauses.is_empty() {
                self.0.remove(key);
            }
        }
        first
    }
    /// The oldest clause with this literal set, without removing it.
    pub fn first_equal_clause(&self, key: &ClauseKey) -> Option<Clause> {
        self.0.get(key).and_then(|equal_clauses| equal_clauses.first().cloned())
    }
    /// Return the number of literal sets with at least one clause.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Return true if there is no clause in the table.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute the hash of a clause. This is the same hash function `drat-trim` uses.
fn clause_hash(clause: &[Literal]) -> usize {
    let mut sum: usize = 0;
    let mut prod: usize = 1;
    let mut xor: usize = 0;
    for &literal in clause {
        prod = prod.wrapping_mul(literal.as_offset());
        sum = sum.wrapping_add(literal.as_offset());
        xor ^= literal.as_offset();
    }
    (1023usize.wrapping_mul(sum).wrapping_add(prod)) ^ (31usize.wrapping_mul(xor))
}
