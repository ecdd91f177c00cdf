//! Unit propagation with two watched literals

use drup_common::{
    assignment::Assignment,
    clause::{Clause, Reason},
    clausedatabase::ClauseDatabase,
    config::CHECK_WATCH_INVARIANTS,
    literal::{Literal, Variable},
    memory::{Array, Offset, Vector},
};

/// The result of a propagation or an assignment.
///
/// We use the newtype pattern here to clearly distinguish from other
/// boolean values. We provide both constants explicitly and use `==` to compare it
/// instead of making it an enum for the lack of a good enum name.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MaybeConflict(bool);
/// A conflict has been found
pub const CONFLICT: MaybeConflict = MaybeConflict(true);
/// No conflict has been found yet
pub const NO_CONFLICT: MaybeConflict = MaybeConflict(false);

/// Run some computation, then undo every assignment made by it.
macro_rules! preserve_assignment {
    ($propagator:expr, $computation:expr) => {{
        let trail_length = $propagator.assignment.len();
        let result = $computation;
        while $propagator.assignment.len() > trail_length {
            $propagator.assignment.pop();
        }
        $propagator.processed = trail_length;
        result
    }};
}

/// The live clauses together with the data structures for propagating them
///
/// Outside of a redundancy check, the assignment is empty.
#[derive(Debug)]
pub struct Propagator {
    pub maxvar: Variable,
    pub clause_db: ClauseDatabase,
    pub assignment: Assignment,
    /// Number of trail literals whose watches have been visited.
    pub processed: usize,
    /// Maps a literal to the clauses watching it.
    watchlist: Array<Literal, Vector<Clause>>,
    /// The two watched positions within each clause of size two or more.
    watches: Vector<[usize; 2]>,
    /// Live unit clauses, oldest first.
    units: Vector<Clause>,
    /// Number of live empty clauses.
    empty_clauses: usize,
}

impl Propagator {
    /// Create a propagator without clauses for literals up to `maxvar`.
    pub fn new(maxvar: Variable) -> Propagator {
        Propagator {
            maxvar,
            clause_db: ClauseDatabase::new(),
            assignment: Assignment::new(maxvar),
            processed: 0,
            watchlist: Array::new(Vector::new(), maxvar.array_size_for_literals()),
            watches: Vector::new(),
            units: Vector::new(),
            empty_clauses: 0,
        }
    }
    /// Return true if a live clause is empty.
    pub fn has_empty_clause(&self) -> bool {
        self.empty_clauses > 0
    }
    /// The live unit clauses, oldest first.
    pub fn units(&self) -> &[Clause] {
        &self.units
    }
    /// The clauses currently watching the given literal.
    pub fn watchers(&self, literal: Literal) -> &[Clause] {
        &self.watchlist[literal]
    }
}

/// Add a clause to the database and start watching it.
pub fn add_clause(propagator: &mut Propagator, literals: &[Literal], is_lemma: bool) -> Clause {
    requires!(propagator.assignment.is_empty());
    requires!(literals
        .iter()
        .all(|&literal| literal.variable() <= propagator.maxvar));
    let clause = propagator.clause_db.add_clause(literals, is_lemma);
    invariant!(propagator.watches.len() == clause.as_offset());
    let stored = propagator.clause_db.clause(clause);
    match stored.len() {
        0 => {
            propagator.empty_clauses += 1;
            propagator.watches.push([0, 0]);
        }
        1 => {
            propagator.units.push(clause);
            propagator.watches.push([0, 0]);
        }
        _ => {
            propagator.watchlist[stored[0]].push(clause);
            propagator.watchlist[stored[1]].push(clause);
            propagator.watches.push([0, 1]);
        }
    }
    clause
}

/// Delete the oldest live clause with the given literal set.
///
/// Returns `None` if there is no such clause.
pub fn delete_clause(propagator: &mut Propagator, literals: &[Literal]) -> Option<Clause> {
    requires!(propagator.assignment.is_empty());
    let clause = propagator.clause_db.delete_clause(literals)?;
    let stored = propagator.clause_db.clause(clause);
    match stored.len() {
        0 => propagator.empty_clauses -= 1,
        1 => {
            let position = propagator.units.iter().position(|&unit| unit == clause);
            invariant!(position.is_some());
            if let Some(position) = position {
                propagator.units.remove(position);
            }
        }
        _ => {
            for &position in &propagator.watches[clause.as_offset()] {
                let watchers = &mut propagator.watchlist[stored[position]];
                let index = watchers.iter().position(|&watcher| watcher == clause);
                invariant!(index.is_some());
                if let Some(index) = index {
                    watchers.swap_remove(index);
                }
            }
        }
    }
    Some(clause)
}

/// Make a literal true.
///
/// Assigning a true literal again does nothing. Returns CONFLICT if the
/// literal is already false.
pub fn assign(propagator: &mut Propagator, literal: Literal, reason: Reason) -> MaybeConflict {
    if propagator.assignment[-literal] {
        return CONFLICT;
    }
    if !propagator.assignment[literal] {
        propagator.assignment.push(literal, reason);
    }
    NO_CONFLICT
}

/// Assign all literals of the live unit clauses, oldest first.
pub fn assign_units(propagator: &mut Propagator) -> MaybeConflict {
    for i in 0..propagator.units.len() {
        let unit = propagator.units[i];
        let literal = propagator.clause_db.clause(unit)[0];
        if assign(propagator, literal, Reason::Forced(unit)) == CONFLICT {
            return CONFLICT;
        }
    }
    NO_CONFLICT
}

/// Propagate the trail literals that have not been processed yet, in
/// trail order, until a conflict or a fixpoint is reached.
pub fn propagate(propagator: &mut Propagator) -> MaybeConflict {
    let Propagator {
        clause_db,
        assignment,
        processed,
        watchlist,
        watches,
        ..
    } = propagator;
    while *processed < assignment.len() {
        let literal = -assignment.trail_at(*processed).0;
        *processed += 1;
        let mut i = 0;
        while i < watchlist[literal].len() {
            let clause = watchlist[literal][i];
            let literals = clause_db.clause(clause);
            let positions = watches[clause.as_offset()];
            let mine = if literals[positions[0]] == literal { 0 } else { 1 };
            invariant!(literals[positions[mine]] == literal);
            let other = literals[positions[1 - mine]];
            if assignment[other] {
                i += 1;
                continue;
            }
            let replacement = (0..literals.len()).find(|&position| {
                position != positions[0]
                    && position != positions[1]
                    && !assignment[-literals[position]]
            });
            if let Some(position) = replacement {
                watches[clause.as_offset()][mine] = position;
                watchlist[literal].swap_remove(i);
                watchlist[literals[position]].push(clause);
                continue;
            }
            if assignment[-other] {
                return CONFLICT;
            }
            assignment.push(other, Reason::Forced(clause));
            i += 1;
        }
    }
    if CHECK_WATCH_INVARIANTS {
        watch_invariants(propagator);
    }
    NO_CONFLICT
}

/// Undo all assignments.
pub fn backtrack(propagator: &mut Propagator) {
    propagator.assignment.clear();
    propagator.processed = 0;
}

/// Check that a fixpoint leaves no live clause falsified or unit.
fn watch_invariants(propagator: &Propagator) {
    for clause in propagator.clause_db.live_clauses() {
        let literals = propagator.clause_db.clause(clause);
        if literals.len() < 2 {
            continue;
        }
        for &position in &propagator.watches[clause.as_offset()] {
            invariant!(propagator.watchlist[literals[position]].contains(&clause));
        }
        invariant!(
            drup_common::assignment::stable_under_unit_propagation(
                &propagator.assignment,
                literals
            ),
            "clause {} is not propagated",
            propagator.clause_db.clause_to_string(clause)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drup_common::clause::clause_from_dimacs;

    fn lit(x: i32) -> Literal {
        Literal::new(x)
    }

    fn propagator(clauses: &[&[i32]]) -> Propagator {
        let mut propagator = Propagator::new(Variable::new(5));
        for clause in clauses {
            add_clause(&mut propagator, &clause_from_dimacs(clause), false);
        }
        propagator
    }

    fn trail(propagator: &Propagator) -> Vec<i32> {
        propagator
            .assignment
            .literals()
            .map(|literal| literal.decode())
            .collect()
    }

    #[test]
    fn propagates_in_trail_order() {
        let mut propagator = propagator(&[&[1, 2], &[-2, 3], &[-3, 4, -1]]);
        assert_eq!(assign(&mut propagator, lit(-1), Reason::Assumed), NO_CONFLICT);
        assert_eq!(propagate(&mut propagator), NO_CONFLICT);
        assert_eq!(trail(&propagator), vec![-1, 2, 3]);
        backtrack(&mut propagator);
        assert!(propagator.assignment.is_empty());
        assert_eq!(assign(&mut propagator, lit(1), Reason::Assumed), NO_CONFLICT);
        assert_eq!(assign(&mut propagator, lit(-4), Reason::Assumed), NO_CONFLICT);
        assert_eq!(propagate(&mut propagator), NO_CONFLICT);
        assert_eq!(trail(&propagator), vec![1, -4, -3, -2]);
    }

    #[test]
    fn finds_conflicts() {
        let mut propagator = propagator(&[&[1, 2], &[1, -2]]);
        assign(&mut propagator, lit(-1), Reason::Assumed);
        assert_eq!(propagate(&mut propagator), CONFLICT);
        backtrack(&mut propagator);
        assert_eq!(assign(&mut propagator, lit(1), Reason::Assumed), NO_CONFLICT);
        assert_eq!(assign(&mut propagator, lit(1), Reason::Assumed), NO_CONFLICT);
        assert_eq!(propagator.assignment.len(), 1);
        assert_eq!(assign(&mut propagator, lit(-1), Reason::Assumed), CONFLICT);
    }

    #[test]
    fn units_and_empty_clauses() {
        let mut propagator = propagator(&[&[-2], &[1, 2], &[3, 3]]);
        assert_eq!(propagator.units().len(), 2);
        assert_eq!(assign_units(&mut propagator), NO_CONFLICT);
        assert_eq!(propagate(&mut propagator), NO_CONFLICT);
        assert_eq!(trail(&propagator), vec![-2, 3, 1]);
        backtrack(&mut propagator);
        add_clause(&mut propagator, &[], true);
        assert!(propagator.has_empty_clause());
        assert!(delete_clause(&mut propagator, &[]).is_some());
        assert!(!propagator.has_empty_clause());
    }

    #[test]
    fn deleted_clauses_stop_propagating() {
        let mut propagator = propagator(&[&[1, 2], &[-2, 3], &[4]]);
        assert!(delete_clause(&mut propagator, &clause_from_dimacs(&[3, -2])).is_some());
        assert!(delete_clause(&mut propagator, &clause_from_dimacs(&[4])).is_some());
        assert!(delete_clause(&mut propagator, &clause_from_dimacs(&[4])).is_none());
        assert!(propagator.units().is_empty());
        assert!(propagator.watchers(lit(-2)).is_empty());
        assign(&mut propagator, lit(-1), Reason::Assumed);
        assert_eq!(propagate(&mut propagator), NO_CONFLICT);
        assert_eq!(trail(&propagator), vec![-1, 2]);
    }

    #[test]
    fn preserves_assignment() {
        let mut propagator = propagator(&[&[1, 2]]);
        let result = preserve_assignment!(propagator, {
            assign(&mut propagator, lit(-1), Reason::Assumed);
            propagate(&mut propagator)
        });
        assert_eq!(result, NO_CONFLICT);
        assert!(propagator.assignment.is_empty());
        assert_eq!(propagator.processed, 0);
    }
}
