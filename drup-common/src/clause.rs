//! Clauses, proof steps and reasons

use crate::{
    literal::Literal,
    memory::{Offset, Vector},
};
use serde_derive::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    io::{self, Write},
};

/// An index uniquely identifying a clause in the
/// [ClauseDatabase](../clausedatabase/struct.ClauseDatabase.html) during one run
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub struct Clause {
    pub index: ClauseIdentifierType,
}

/// The type that backs [Clause](struct.Clause.html).
pub type ClauseIdentifierType = u32;

impl Clause {
    /// Create the clause index with the given ID.
    pub fn new(index: ClauseIdentifierType) -> Clause {
        Clause { index }
    }
    /// Create the clause index with the given usize ID.
    /// # Panics
    /// Panics if the index exceeds the internal limit.
    pub fn from_usize(index: usize) -> Clause {
        requires!(ClauseIdentifierType::try_from(index).is_ok());
        Clause::new(index as ClauseIdentifierType)
    }
    /// Create an iterator from clause indices `start` up to (excluding) `end`.
    pub fn range(start: impl Offset, end: impl Offset) -> impl Iterator<Item = Clause> {
        (start.as_offset()..end.as_offset()).map(Clause::from_usize)
    }
}

impl Offset for Clause {
    fn as_offset(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// Build a clause from DIMACS integers (without terminating 0).
pub fn clause_from_dimacs(values: &[i32]) -> Vector<Literal> {
    values.iter().map(|&value| Literal::new(value)).collect()
}

/// A clause introduction or deletion, as read from a DRUP/DRAT proof
///
/// Deletions only carry the literals; which clause of the formula
/// they refer to is decided by content when they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofStep {
    Lemma(Vector<Literal>),
    Deletion(Vector<Literal>),
}

impl ProofStep {
    /// Create a proof step that introduces a clause, given DIMACS literals.
    pub fn lemma(values: &[i32]) -> ProofStep {
        ProofStep::Lemma(clause_from_dimacs(values))
    }
    /// Create a proof step that deletes a clause, given DIMACS literals.
    pub fn deletion(values: &[i32]) -> ProofStep {
        ProofStep::Deletion(clause_from_dimacs(values))
    }
    /// Return true if this proof step is a clause deletion.
    pub fn is_deletion(&self) -> bool {
        match self {
            ProofStep::Lemma(_) => false,
            ProofStep::Deletion(_) => true,
        }
    }
    /// The literals that are introduced or deleted.
    pub fn literals(&self) -> &[Literal] {
        match self {
            ProofStep::Lemma(literals) | ProofStep::Deletion(literals) => literals,
        }
    }
}

impl fmt::Display for ProofStep {
    /// The proof line in DRAT syntax.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_deletion() {
            write!(f, "d ")?;
        }
        for literal in self.literals() {
            write!(f, "{} ", literal)?;
        }
        write!(f, "0")
    }
}

/// The reason for assigning a literal during a redundancy check
///
/// A literal is either assumed (it falsifies a literal of the clause under
/// check) or forced by a unit clause of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Assumed,
    Forced(Clause),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reason::Assumed => write!(f, "Assumption"),
            Reason::Forced(clause) => write!(f, "Forced by clause {}", clause),
        }
    }
}

/// Write some literals in DIMACS format.
///
/// Includes a terminating 0, but no newline.
pub fn write_clause<'a, T>(file: &mut impl Write, clause: T) -> io::Result<()>
where
    T: Iterator<Item = &'a Literal>,
{
    for &literal in clause {
        write!(file, "{} ", literal)?;
    }
    write!(file, "0")
}

/// Give the DIMACS representation of some literals, including the terminating 0.
pub fn clause_to_string(clause: &[Literal]) -> String {
    clause
        .iter()
        .map(|literal| format!("{} ", literal))
        .chain(std::iter::once("0".to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_steps_print_as_drat() {
        assert_eq!(format!("{}", ProofStep::lemma(&[1, -2])), "1 -2 0");
        assert_eq!(format!("{}", ProofStep::deletion(&[3])), "d 3 0");
        assert_eq!(format!("{}", ProofStep::lemma(&[])), "0");
    }

    #[test]
    fn clause_strings_include_terminator() {
        assert_eq!(clause_to_string(&clause_from_dimacs(&[-1, 4])), "-1 4 0");
        let mut buffer = Vec::new();
        write_clause(&mut buffer, clause_from_dimacs(&[2]).iter()).unwrap();
        assert_eq!(buffer, b"2 0");
    }
}
