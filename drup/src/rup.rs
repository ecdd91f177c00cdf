//! Reverse unit propagation

use crate::{
    propagate::{assign, assign_units, propagate, MaybeConflict, Propagator, CONFLICT},
    witness::{Inference, RupInfo},
};
use drup_common::{
    assignment::Assignment,
    clause::Reason,
    literal::Literal,
    memory::Vector,
};

/// Assume the negation of every literal of the clause and propagate.
///
/// The trail is left in place so the caller can inspect the chain.
/// Returns CONFLICT if the clause is implied.
pub fn rup(propagator: &mut Propagator, clause: &[Literal]) -> MaybeConflict {
    requires!(propagator.assignment.is_empty());
    if propagator.has_empty_clause() {
        return CONFLICT;
    }
    for &literal in clause {
        if assign(propagator, -literal, Reason::Assumed) == CONFLICT {
            return CONFLICT;
        }
    }
    if assign_units(propagator) == CONFLICT {
        return CONFLICT;
    }
    propagate(propagator)
}

/// Check whether a clause is implied by reverse unit propagation.
///
/// `checked` is the clause reported in the diagnostics, usually the same as
/// `clause`; RAT checks report the lemma rather than the resolvent.
pub fn check_rup(
    propagator: &mut Propagator,
    clause: &[Literal],
    checked: &[Literal],
    with_diagnostics: bool,
) -> Inference<RupInfo> {
    preserve_assignment!(propagator, {
        if rup(propagator, clause) == CONFLICT {
            Inference::Valid
        } else if with_diagnostics {
            Inference::Invalid(Some(RupInfo {
                clause: checked.iter().cloned().collect(),
                chain: chain_in_clause_order(propagator, clause),
            }))
        } else {
            Inference::Invalid(None)
        }
    })
}

/// Replay a fixpoint reached by `rup()` as a scan over the live clauses.
///
/// Starting from the assumptions, repeatedly force the literal of the
/// oldest live clause that is unit. The set of forced literals equals the
/// trail of the watch-based propagation; only the order differs.
fn chain_in_clause_order(propagator: &Propagator, clause: &[Literal]) -> Vector<Literal> {
    let clause_db = &propagator.clause_db;
    let mut assignment = Assignment::new(propagator.maxvar);
    for &literal in clause {
        if !assignment[-literal] {
            assignment.push(-literal, Reason::Assumed);
        }
    }
    loop {
        let next = clause_db.live_clauses().find_map(|unit| {
            unit_literal(&assignment, clause_db.clause(unit)).map(|literal| (unit, literal))
        });
        match next {
            Some((unit, literal)) => assignment.push(literal, Reason::Forced(unit)),
            None => break,
        }
    }
    invariant!(assignment.len() == propagator.assignment.len());
    assignment.literals().collect()
}

/// The only unassigned literal of a clause whose other literals are false.
fn unit_literal(assignment: &Assignment, clause: &[Literal]) -> Option<Literal> {
    let mut unassigned = None;
    for &literal in clause {
        if assignment[literal] {
            return None;
        }
        if !assignment[-literal] {
            if unassigned.is_some() {
                return None;
            }
            unassigned = Some(literal);
        }
    }
    unassigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::{add_clause, NO_CONFLICT};
    use drup_common::{clause::clause_from_dimacs, literal::Variable};

    fn propagator(clauses: &[&[i32]]) -> Propagator {
        let mut propagator = Propagator::new(Variable::new(4));
        for clause in clauses {
            add_clause(&mut propagator, &clause_from_dimacs(clause), false);
        }
        propagator
    }

    fn check(propagator: &mut Propagator, clause: &[i32]) -> Inference<RupInfo> {
        let clause = clause_from_dimacs(clause);
        check_rup(propagator, &clause, &clause, true)
    }

    #[test]
    fn implied_clauses() {
        let mut propagator = propagator(&[&[1, 2], &[-1, 2], &[1, -2]]);
        assert_eq!(check(&mut propagator, &[2]), Inference::Valid);
        assert_eq!(check(&mut propagator, &[1]), Inference::Valid);
        assert!(propagator.assignment.is_empty());
        assert_eq!(check(&mut propagator, &[3, -3]), Inference::Valid);
    }

    #[test]
    fn chain_of_a_failed_check() {
        let mut propagator = propagator(&[&[1, 2], &[-2, 3], &[4]]);
        assert_eq!(
            check(&mut propagator, &[1]),
            Inference::Invalid(Some(RupInfo {
                clause: clause_from_dimacs(&[1]),
                chain: clause_from_dimacs(&[-1, 2, 3, 4]),
            }))
        );
        let clause = clause_from_dimacs(&[1]);
        assert_eq!(
            check_rup(&mut propagator, &clause, &clause, false),
            Inference::Invalid(None)
        );
    }

    #[test]
    fn chain_follows_clause_order() {
        // Watch propagation reaches 4 before 3.
        let mut propagator = Propagator::new(Variable::new(5));
        for clause in &[&[1, 2][..], &[-2, 3], &[1, 4], &[-1, 5], &[-5, -4]] {
            add_clause(&mut propagator, &clause_from_dimacs(clause), false);
        }
        let clause = clause_from_dimacs(&[1]);
        let trail: Vec<i32> = preserve_assignment!(propagator, {
            assert_eq!(rup(&mut propagator, &clause), NO_CONFLICT);
            propagator.assignment.literals().map(Literal::decode).collect()
        });
        assert_eq!(trail, vec![-1, 2, 4, 3, -5]);
        assert_eq!(
            check(&mut propagator, &[1]),
            Inference::Invalid(Some(RupInfo {
                clause: clause_from_dimacs(&[1]),
                chain: clause_from_dimacs(&[-1, 2, 3, 4, -5]),
            }))
        );
    }

    #[test]
    fn unit_literals() {
        let mut assignment = Assignment::new(Variable::new(3));
        assignment.push(Literal::new(-1), Reason::Assumed);
        let unit = |literals: &[i32]| unit_literal(&assignment, &clause_from_dimacs(literals));
        assert_eq!(unit(&[1, 2]), Some(Literal::new(2)));
        assert_eq!(unit(&[1, 2, 3]), None);
        assert_eq!(unit(&[-1, 2]), None);
        assert_eq!(unit(&[1]), None);
    }

    #[test]
    fn empty_clause() {
        let mut propagator = propagator(&[&[1], &[-1, 2]]);
        assert!(!check(&mut propagator, &[]).is_valid());
        add_clause(&mut propagator, &clause_from_dimacs(&[-2]), true);
        assert!(check(&mut propagator, &[]).is_valid());
        let mut propagator = propagator_with_empty_clause();
        assert!(check(&mut propagator, &[3]).is_valid());
    }

    fn propagator_with_empty_clause() -> Propagator {
        propagator(&[&[1, 2], &[]])
    }
}
