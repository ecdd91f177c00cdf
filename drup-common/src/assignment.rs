//! A partial assignment.
//!
//! Each redundancy check starts from an empty assignment and leaves it
//! empty again, see [`Assignment::clear()`](struct.Assignment.html#method.clear).

use crate::{
    clause::Reason,
    literal::{Literal, Variable},
    memory::{Array, Vector},
};
use std::{fmt, fmt::Display, ops::Index, slice};

/// An assignment comprising a mapping plus a trail (stack of literals).
///
/// A literal and its negation are never assigned at the same time;
/// a conflict is reported before that happens.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Maps assigned literal to true.
    mapping: Array<Literal, bool>,
    /// Assigned literals, in chronologic order.
    trail: Vector<(Literal, Reason)>,
    /// Maps literal to their offset in `trail`, or `usize::max_value()`
    position_in_trail: Array<Literal, usize>,
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Assignment) -> bool {
        self.mapping == other.mapping
            && self.trail == other.trail
            && (0..self.trail.len()).all(|pos| {
                let lit = self.trail_at(pos).0;
                self.position_in_trail[lit] == other.position_in_trail[lit]
            })
    }
}

impl Assignment {
    /// Create an empty assignment.
    pub fn new(maxvar: Variable) -> Assignment {
        Assignment {
            mapping: Array::new(false, maxvar.array_size_for_literals()),
            trail: Vector::with_capacity(maxvar.array_size_for_variables()),
            position_in_trail: Array::new(usize::max_value(), maxvar.array_size_for_literals()),
        }
    }
    /// Return the number of assigned literals.
    pub fn len(&self) -> usize {
        self.trail.len()
    }
    /// Return true if no literal is assigned.
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }
    /// The highest variable this assignment can hold.
    pub fn maxvar(&self) -> Variable {
        Variable::new((self.mapping.size() / 2).saturating_sub(1) as u32)
    }
    /// Return the position in the trail where this literal was assigned.
    pub fn position_in_trail(&self, literal: Literal) -> usize {
        requires!(self[literal]);
        self.position_in_trail[literal]
    }
    /// Access the trail by offset.
    pub fn trail_at(&self, offset: usize) -> (Literal, Reason) {
        self.trail[offset]
    }
    /// Add a new literal to the trail, assigning it to true.
    pub fn push(&mut self, literal: Literal, reason: Reason) {
        requires!(literal.is_valid());
        requires!(!self[literal] && !self[-literal]);
        self.mapping[literal] = true;
        self.position_in_trail[literal] = self.len();
        self.trail.push((literal, reason));
    }
    /// View the literal that was assigned last.
    pub fn peek(&self) -> Option<(Literal, Reason)> {
        self.trail.last().cloned()
    }
    /// Unassign the literal that was assigned last.
    pub fn pop(&mut self) -> Option<(Literal, Reason)> {
        let (literal, reason) = self.trail.pop()?;
        self.mapping[literal] = false;
        self.position_in_trail[literal] = usize::max_value();
        Some((literal, reason))
    }
    /// Unassign everything, in time proportional to the length of the trail.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
    /// The assigned literals in chronological order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.trail.iter().map(|&(literal, _reason)| literal)
    }
}

/// Iterate over the literals in the trail, from oldest to newest.
impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a (Literal, Reason);
    type IntoIter = slice::Iter<'a, (Literal, Reason)>;
    fn into_iter(self) -> Self::IntoIter {
        self.trail.iter()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Assignment: {}", self.len())?;
        for (literal, reason) in self {
            write!(f, " {} ({}),", literal, reason)?;
        }
        Ok(())
    }
}

impl Index<Literal> for Assignment {
    type Output = bool;
    fn index(&self, literal: Literal) -> &bool {
        &self.mapping[literal]
    }
}

/// Return true if unit propagation cannot derive anything new from this
/// clause: it is satisfied, or it has at least two unassigned literals.
pub fn stable_under_unit_propagation(assignment: &Assignment, clause: &[Literal]) -> bool {
    let clause_is_satisfied = clause.iter().any(|&literal| assignment[literal]);
    let unknown_count = clause
        .iter()
        .filter(|&&literal| !assignment[literal] && !assignment[-literal])
        .count();
    clause_is_satisfied || unknown_count >= 2
}
