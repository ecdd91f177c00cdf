//! Independent re-checking of failure witnesses
//!
//! A witness for a rejected lemma is accepted if its chains are models that
//! falsify the lemma (or the resolvent) and leave every live clause
//! satisfied or with two unassigned literals, so unit propagation cannot
//! derive a conflict from them.

use crate::{
    error::Error,
    frontend::parse_files,
    rat::{is_tautology, resolve},
    witness::{CheckerResult, Outcome},
};
use drup_common::{
    as_error,
    assignment::{stable_under_unit_propagation, Assignment},
    clause::{clause_to_string, ProofStep, Reason},
    clausedatabase::ClauseDatabase,
    literal::{max_variable, Literal, Variable},
    memory::Vector,
    puts,
};
use std::cmp;

/// Check a witness against the parsed formula and proof.
///
/// Returns a description of the first problem found.
pub fn check_witness(
    formula: &[Vector<Literal>],
    proof: &[ProofStep],
    witness: &CheckerResult,
) -> Result<(), String> {
    if witness.outcome != Outcome::Invalid {
        return Err("Witness does not claim the proof is incorrect".to_string());
    }
    let proof_step = match witness.proof_step {
        Some(proof_step) => proof_step,
        None => return check_missing_empty_clause(proof, witness),
    };
    if proof_step == 0 || proof_step > proof.len() {
        return Err(format!(
            "Specified proof step exceeds proof size: {}",
            proof_step
        ));
    }
    let lemma = match &proof[proof_step - 1] {
        ProofStep::Lemma(literals) => literals,
        ProofStep::Deletion(_) => {
            return Err(format!("Proof step {} is a deletion", proof_step));
        }
    };
    check_steps(&proof[0..proof_step - 1], witness)?;
    let maxvar = cmp::max(
        max_variable(formula.iter().map(|clause| &**clause)),
        max_variable(proof.iter().map(|step| step.literals())),
    );
    let clause_db = replay(formula, &proof[0..proof_step - 1]);

    let rup_info = witness
        .rup_info
        .as_ref()
        .ok_or_else(|| "Witness carries no RUP diagnostics".to_string())?;
    if rup_info.clause != *lemma {
        return Err(format!(
            "RUP clause {} differs from lemma {}",
            clause_to_string(&rup_info.clause),
            clause_to_string(lemma)
        ));
    }
    check_chain(&clause_db, maxvar, lemma, &rup_info.chain)?;

    let rat_info = match &witness.rat_info {
        Some(_) if lemma.is_empty() => {
            return Err("Witness carries RAT diagnostics for the empty clause".to_string());
        }
        Some(rat_info) => rat_info,
        None if lemma.is_empty() => return Ok(()),
        None => return Err("Witness carries no RAT diagnostics".to_string()),
    };
    if rat_info.clause != *lemma || rat_info.rup_info.clause != *lemma {
        return Err(format!(
            "RAT clause {} differs from lemma {}",
            clause_to_string(&rat_info.clause),
            clause_to_string(lemma)
        ));
    }
    let pivot = lemma[0];
    if clause_db.find_clause(&rat_info.pivot_clause).is_none() {
        return Err(format!(
            "Pivot clause is not present in the formula: {}",
            clause_to_string(&rat_info.pivot_clause)
        ));
    }
    if !rat_info.pivot_clause.contains(&-pivot) {
        return Err(format!(
            "Pivot clause {} does not contain {}",
            clause_to_string(&rat_info.pivot_clause),
            -pivot
        ));
    }
    let resolvent = resolve(lemma, pivot, &rat_info.pivot_clause);
    if is_tautology(&resolvent) {
        return Err(format!(
            "Resolvent {} is a tautology",
            clause_to_string(&resolvent)
        ));
    }
    check_chain(&clause_db, maxvar, &resolvent, &rat_info.rup_info.chain)
}

/// A proof that is rejected for lacking the empty clause must not add it.
fn check_missing_empty_clause(proof: &[ProofStep], witness: &CheckerResult) -> Result<(), String> {
    if let Some(i) = proof
        .iter()
        .position(|step| *step == ProofStep::Lemma(Vector::new()))
    {
        return Err(format!("Proof step {} adds the empty clause", i + 1));
    }
    check_steps(proof, witness)
}

/// The accepted lemmas, if given, must be the lemmas of the proof prefix.
fn check_steps(accepted: &[ProofStep], witness: &CheckerResult) -> Result<(), String> {
    let steps = match &witness.steps {
        Some(steps) => steps,
        None => return Ok(()),
    };
    let lemmas: Vector<Vector<Literal>> = accepted
        .iter()
        .filter(|step| !step.is_deletion())
        .map(|step| step.literals().iter().cloned().collect())
        .collect();
    if *steps != lemmas {
        return Err(format!(
            "Witness lists {} accepted lemmas, the proof has {} before the failure",
            steps.len(),
            lemmas.len()
        ));
    }
    Ok(())
}

/// Apply proof steps without checking them.
pub fn replay(formula: &[Vector<Literal>], proof: &[ProofStep]) -> ClauseDatabase {
    let mut clause_db = ClauseDatabase::from_clauses(formula.iter().map(|clause| &**clause));
    for step in proof {
        match step {
            ProofStep::Lemma(literals) => {
                clause_db.add_clause(literals, true);
            }
            ProofStep::Deletion(literals) => {
                clause_db.delete_clause(literals);
            }
        }
    }
    clause_db
}

/// Check that a chain falsifies a clause and is stable for all live clauses.
fn check_chain(
    clause_db: &ClauseDatabase,
    maxvar: Variable,
    clause: &[Literal],
    chain: &[Literal],
) -> Result<(), String> {
    let mut assignment = Assignment::new(maxvar);
    for &literal in chain {
        if literal.variable() > maxvar {
            return Err(format!("Chain contains unknown variable {}", literal.variable()));
        }
        if assignment[-literal] {
            return Err(format!(
                "Chain is inconsistent in variable {}",
                literal.variable()
            ));
        }
        if !assignment[literal] {
            assignment.push(literal, Reason::Assumed);
        }
    }
    for &literal in clause {
        if !assignment[-literal] {
            return Err(format!("Chain does not falsify literal {}", literal));
        }
    }
    for clause in clause_db.live_clauses() {
        if !stable_under_unit_propagation(&assignment, clause_db.clause(clause)) {
            return Err(format!(
                "Chain is not stable under unit propagation for clause {}",
                clause_db.clause_to_string(clause)
            ));
        }
    }
    Ok(())
}

/// Parse formula and proof files and check a witness, printing an error
/// message if it is not accepted.
///
/// Returns true if accepted.
pub fn check_witness_files(formula_file: &str, proof_file: &str, witness: &CheckerResult) -> bool {
    let outcome = parse_files(formula_file, proof_file)
        .map_err(|err: Error| err.to_string())
        .and_then(|parser| check_witness(&parser.formula, &parser.proof, witness));
    match outcome {
        Ok(()) => true,
        Err(string) => {
            as_error!({
                puts!("{}\n", &string);
                puts!("Proof claimed incorrect but validation failed, please report a bug!\n");
            });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{check_with_flags, Diagnostics, Flags, Mode};
    use crate::witness::{RatInfo, RupInfo};
    use drup_common::clause::clause_from_dimacs;

    fn formula(clauses: &[&[i32]]) -> Vector<Vector<Literal>> {
        clauses.iter().map(|clause| clause_from_dimacs(clause)).collect()
    }

    fn witness(formula: &[Vector<Literal>], proof: &[ProofStep]) -> CheckerResult {
        check_with_flags(
            formula.iter().cloned().collect(),
            proof.iter().cloned().collect(),
            Flags::new(Mode::FullProof, Diagnostics::Verbose),
        )
    }

    #[test]
    fn accepts_genuine_witnesses() {
        let formula = formula(&[&[1, 2], &[-2, 3]]);
        let proof = [
            ProofStep::lemma(&[3]),
            ProofStep::deletion(&[1, 2]),
            ProofStep::lemma(&[-3]),
        ];
        let result = witness(&formula, &proof);
        assert_eq!(result.proof_step, Some(3));
        assert_eq!(check_witness(&formula, &proof, &result), Ok(()));
        let missing = witness(&formula, &proof[0..2]);
        assert_eq!(check_witness(&formula, &proof[0..2], &missing), Ok(()));
    }

    #[test]
    fn rejects_tampered_witnesses() {
        let formula = formula(&[&[1, 2], &[-2, 3]]);
        let proof = [ProofStep::lemma(&[-1])];
        let result = witness(&formula, &proof);
        assert_eq!(check_witness(&formula, &proof, &result), Ok(()));

        let mut tampered = result.clone();
        if let Some(rup_info) = tampered.rup_info.as_mut() {
            rup_info.chain = clause_from_dimacs(&[1, -3]);
        }
        assert!(check_witness(&formula, &proof, &tampered)
            .unwrap_err()
            .contains("not stable"));

        let mut tampered = result.clone();
        if let Some(rat_info) = tampered.rat_info.as_mut() {
            rat_info.pivot_clause = clause_from_dimacs(&[1, 3]);
        }
        assert!(check_witness(&formula, &proof, &tampered)
            .unwrap_err()
            .contains("not present"));

        let mut tampered = result.clone();
        tampered.proof_step = Some(2);
        assert!(check_witness(&formula, &proof, &tampered).is_err());
        assert!(check_witness(&formula, &proof, &CheckerResult::valid()).is_err());
    }

    #[test]
    fn rejects_rat_diagnostics_for_the_empty_clause() {
        let formula = formula(&[&[1, 2], &[-2, 3]]);
        let proof = [ProofStep::lemma(&[])];
        let result = witness(&formula, &proof);
        assert_eq!(result.proof_step, Some(1));
        assert_eq!(result.rat_info, None);
        assert_eq!(check_witness(&formula, &proof, &result), Ok(()));

        let mut tampered = result;
        tampered.rat_info = Some(RatInfo {
            clause: Vector::new(),
            pivot_clause: clause_from_dimacs(&[1, 2]),
            rup_info: RupInfo {
                clause: Vector::new(),
                chain: Vector::new(),
            },
        });
        assert!(check_witness(&formula, &proof, &tampered)
            .unwrap_err()
            .contains("empty clause"));
    }
}
