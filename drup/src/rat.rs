//! Resolution asymmetric tautology
//!
//! A lemma C with first literal p is RAT if for every live clause D that
//! contains ¬p, the resolvent of C and D on p is a tautology or RUP.

use crate::{
    propagate::Propagator,
    rup::check_rup,
    witness::{Inference, RatInfo},
};
use drup_common::{clause::Clause, literal::Literal, memory::Vector};

/// The live clauses that contain the negated pivot, oldest first.
pub fn resolution_candidates(propagator: &Propagator, pivot: Literal) -> Vector<Clause> {
    let clause_db = &propagator.clause_db;
    clause_db
        .live_clauses()
        .filter(|&clause| clause_db.clause(clause).contains(&-pivot))
        .collect()
}

/// Resolve `clause` and `candidate` on `pivot`.
///
/// The literals of `clause` come first, each literal is kept once.
pub fn resolve(clause: &[Literal], pivot: Literal, candidate: &[Literal]) -> Vector<Literal> {
    let mut resolvent = Vector::with_capacity(clause.len() + candidate.len());
    let sides = clause
        .iter()
        .filter(|&&literal| literal != pivot)
        .chain(candidate.iter().filter(|&&literal| literal != -pivot));
    for &literal in sides {
        if !resolvent.contains(&literal) {
            resolvent.push(literal);
        }
    }
    resolvent
}

/// Return true if the clause contains a literal and its negation.
pub fn is_tautology(clause: &[Literal]) -> bool {
    clause.iter().any(|&literal| clause.contains(&-literal))
}

/// Check whether a clause is RAT on its first literal.
///
/// Stops at the first resolution candidate whose resolvent is neither a
/// tautology nor RUP.
pub fn check_rat(
    propagator: &mut Propagator,
    clause: &[Literal],
    with_diagnostics: bool,
) -> Inference<RatInfo> {
    if clause.is_empty() {
        return Inference::Invalid(None);
    }
    let pivot = clause[0];
    for candidate in resolution_candidates(propagator, pivot) {
        let resolvent = resolve(clause, pivot, propagator.clause_db.clause(candidate));
        if is_tautology(&resolvent) {
            continue;
        }
        if let Inference::Invalid(rup_info) =
            check_rup(propagator, &resolvent, clause, with_diagnostics)
        {
            return Inference::Invalid(rup_info.map(|rup_info| RatInfo {
                clause: clause.iter().cloned().collect(),
                pivot_clause: propagator.clause_db.clause(candidate).iter().cloned().collect(),
                rup_info,
            }));
        }
    }
    Inference::Valid
}
