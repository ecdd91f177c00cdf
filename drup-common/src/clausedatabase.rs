//! Container for clauses

use crate::{
    clause::{Clause, ClauseIdentifierType},
    hashtable::{ClauseHashTable, ClauseKey},
    literal::Literal,
    memory::{Offset, Vector},
};
use bitfield::bitfield;
use std::{convert::TryFrom, ops::Range};

/// Size of metadata that precede the literals of a clause
pub const PADDING_START: usize = 2;
/// Location of the fields within the metadata.
pub const FIELDS_OFFSET: usize = 1;
/// Size of the clause suffix (terminating 0)
pub const PADDING_END: usize = 1;

bitfield! {
    /// The data to store for each clause in the metadata field of the
    /// [ClauseDatabase](struct.ClauseDatabase.html).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ClauseFields(u32);
    impl Debug;
    /// Whether the clause was deleted by a proof step.
    pub is_deleted, set_is_deleted: 0;
    /// Whether the clause was introduced by the proof (not a premise).
    pub is_lemma, set_is_lemma: 1;
    /// Whether duplicate literals were dropped when adding the clause.
    pub had_duplicates, set_had_duplicates: 2;
}

/// Stores clauses in a flat buffer
///
/// Clauses are never physically removed; deletion only sets a flag, so
/// clause identifiers stay valid for the whole run.
#[derive(Debug, Clone)]
pub struct ClauseDatabase {
    /// Stores clauses with some metadata.
    /// The first element encodes the clause ID.
    /// The second element contains a `struct ClauseFields`.
    /// After that, the literals are stored (zero-terminated)
    data: Vector<Literal>,
    /// Maps clause ID to offset in above data, plus a sentinel pointing
    /// one beyond the last element of `data`.
    offset: Vector<usize>,
    /// Live clauses by content.
    clause_ids: ClauseHashTable,
    /// Number of clauses that have not been deleted.
    live_clauses: usize,
}

impl Default for ClauseDatabase {
    /// Create an empty clause database.
    fn default() -> ClauseDatabase {
        ClauseDatabase {
            data: Vector::new(),
            offset: vector!(0),
            clause_ids: ClauseHashTable::new(),
            live_clauses: 0,
        }
    }
}

impl PartialEq for ClauseDatabase {
    fn eq(&self, other: &ClauseDatabase) -> bool {
        self.data == other.data && self.offset == other.offset
    }
}

impl ClauseDatabase {
    /// Create an empty clause database.
    pub fn new() -> ClauseDatabase {
        ClauseDatabase::default()
    }
    /// Create a database holding the given premise clauses.
    pub fn from_clauses<'a>(clauses: impl IntoIterator<Item = &'a [Literal]>) -> ClauseDatabase {
        let mut db = ClauseDatabase::new();
        for clause in clauses {
            db.add_clause(clause, false);
        }
        db
    }
    /// Returns the total number of clauses that were ever added.
    pub fn number_of_clauses(&self) -> ClauseIdentifierType {
        let number = self.offset.len() - 1;
        requires!(ClauseIdentifierType::try_from(number).is_ok());
        number as ClauseIdentifierType
    }
    /// Returns the number of clauses that were not deleted.
    pub fn number_of_live_clauses(&self) -> usize {
        self.live_clauses
    }
    /// Returns the clause that was added last.
    pub fn last_clause(&self) -> Clause {
        requires!(self.number_of_clauses() > 0);
        Clause::new(self.number_of_clauses() - 1)
    }
    /// Add a clause, dropping repeated literals but keeping the order of
    /// their first occurrences.
    pub fn add_clause(&mut self, literals: &[Literal], is_lemma: bool) -> Clause {
        let clause = Clause::new(self.number_of_clauses());
        self.data.push(Literal::from_raw(clause.index));
        let mut fields = ClauseFields(0);
        fields.set_is_lemma(is_lemma);
        self.data.push(Literal::from_raw(fields.0));
        let start = self.data.len();
        for &literal in literals {
            requires!(!literal.is_zero());
            if self.data[start..self.data.len()].contains(&literal) {
                fields.set_had_duplicates(true);
            } else {
                self.data.push(literal);
            }
        }
        self.data.push(Literal::new(0));
        self.offset.push(self.data.len());
        self.set_fields(clause, fields);
        self.clause_ids
            .add_clause(ClauseKey::new(self.clause(clause)), clause);
        self.live_clauses += 1;
        clause
    }
    /// Delete the oldest live clause with the same literal set.
    ///
    /// Returns the deleted clause, or `None` if there is no such clause.
    pub fn delete_clause(&mut self, literals: &[Literal]) -> Option<Clause> {
        let clause = self
            .clause_ids
            .find_equal_clause(&ClauseKey::new(literals), /*delete=*/ true)?;
        let mut fields = self.fields(clause);
        invariant!(!fields.is_deleted());
        fields.set_is_deleted(true);
        self.set_fields(clause, fields);
        self.live_clauses -= 1;
        Some(clause)
    }
    /// Find the oldest live clause with the same literal set.
    pub fn find_clause(&self, literals: &[Literal]) -> Option<Clause> {
        self.clause_ids.first_equal_clause(&ClauseKey::new(literals))
    }
    /// Return true if the clause has not been deleted.
    pub fn is_live(&self, clause: Clause) -> bool {
        !self.fields(clause).is_deleted()
    }
    /// Iterate over all clauses that have not been deleted, oldest first.
    pub fn live_clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        Clause::range(0usize, self.number_of_clauses()).filter(move |&clause| self.is_live(clause))
    }
    /// The literals in the the clause.
    pub fn clause(&self, clause: Clause) -> &[Literal] {
        &self.data[self.clause_range(clause)]
    }
    /// The internal offsets of the literals in the the clause.
    pub fn clause_range(&self, clause: Clause) -> Range<usize> {
        self.offset[clause.as_offset()] + PADDING_START
            ..self.offset[clause.as_offset() + 1] - PADDING_END
    }
    /// Access the metadata for this clause.
    pub fn fields(&self, clause: Clause) -> ClauseFields {
        ClauseFields(self.data[self.offset[clause.as_offset()] + FIELDS_OFFSET].encoding)
    }
    /// Overwrite the metadata for this clause.
    fn set_fields(&mut self, clause: Clause, fields: ClauseFields) {
        let offset = self.offset[clause.as_offset()] + FIELDS_OFFSET;
        self.data[offset] = Literal::from_raw(fields.0);
    }
    /// Give the DIMACS representation of a clause.
    ///
    /// Prefixed by the clause ID, used in diagnostics.
    pub fn clause_to_string(&self, clause: Clause) -> String {
        format!(
            "[{}]{} 0",
            clause,
            self.clause(clause)
                .iter()
                .map(|&literal| format!(" {}", literal))
                .collect::<Vec<_>>()
                .join("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::clause_from_dimacs;

    fn sample_db() -> ClauseDatabase {
        let clauses = vec![
            clause_from_dimacs(&[1, 2]),
            clause_from_dimacs(&[-2, 3, -2, 1]),
            clause_from_dimacs(&[]),
            clause_from_dimacs(&[2, 1]),
        ];
        ClauseDatabase::from_clauses(clauses.iter().map(|clause| &**clause))
    }

    #[test]
    fn clauses_keep_order_without_duplicates() {
        let db = sample_db();
        assert_eq!(db.number_of_clauses(), 4);
        assert_eq!(
            db.clause(Clause::new(1)),
            &(*clause_from_dimacs(&[-2, 3, 1]))[..]
        );
        assert!(db.fields(Clause::new(1)).had_duplicates());
        assert!(!db.fields(Clause::new(0)).had_duplicates());
        assert!(db.clause(Clause::new(2)).is_empty());
        assert_eq!(db.clause_to_string(Clause::new(3)), "[3] 2 1 0");
    }

    #[test]
    fn deletion_removes_oldest_match() {
        let mut db = sample_db();
        assert_eq!(db.delete_clause(&clause_from_dimacs(&[2, 1])), Some(Clause::new(0)));
        assert!(!db.is_live(Clause::new(0)));
        assert!(db.is_live(Clause::new(3)));
        assert_eq!(db.delete_clause(&clause_from_dimacs(&[1, 2, 2])), Some(Clause::new(3)));
        assert_eq!(db.delete_clause(&clause_from_dimacs(&[1, 2])), None);
        assert_eq!(db.number_of_live_clauses(), 2);
        let live: Vec<Clause> = db.live_clauses().collect();
        assert_eq!(live, vec![Clause::new(1), Clause::new(2)]);
    }

    #[test]
    fn lemmas_are_flagged() {
        let mut db = sample_db();
        let lemma = db.add_clause(&clause_from_dimacs(&[4]), true);
        assert_eq!(lemma, Clause::new(4));
        assert!(db.fields(lemma).is_lemma());
        assert!(!db.fields(Clause::new(0)).is_lemma());
        assert_eq!(db.find_clause(&clause_from_dimacs(&[4])), Some(lemma));
        assert_eq!(db.last_clause(), lemma);
    }
}
