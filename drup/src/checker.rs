//! The proof driver
//!
//! A [`Checker`](struct.Checker.html) owns the clause database of one run.
//! It walks the proof front to back, verifying each lemma by RUP or else
//! RAT before adding it, and applying deletions without verification.

use crate::{
    error::InputError,
    propagate::{add_clause, delete_clause, Propagator},
    rat::check_rat,
    rup::check_rup,
    witness::{build_witness, CheckerResult, Inference, RatInfo, RupInfo},
};
use drup_common::{
    clause::{clause_to_string, ProofStep},
    literal::{max_variable, Literal},
    memory::Vector,
};
use std::cmp;

/// What it takes for a proof to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every lemma must be redundant and the proof must derive the empty clause.
    FullProof,
    /// Every lemma must be redundant.
    Derivation,
}

/// How much to report about a rejected proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    /// Only the outcome.
    Fast,
    /// The outcome, the accepted lemmas and the failed checks.
    Verbose,
}

/// Options for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub mode: Mode,
    pub diagnostics: Diagnostics,
    /// Print a line for each processed proof step.
    pub verbose: bool,
}

impl Flags {
    /// Create flags without logging.
    pub fn new(mode: Mode, diagnostics: Diagnostics) -> Flags {
        Flags {
            mode,
            diagnostics,
            verbose: false,
        }
    }
    fn with_diagnostics(self) -> bool {
        self.diagnostics == Diagnostics::Verbose
    }
}

/// The progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ready,
    Processing,
    DoneValid,
    DoneInvalid,
}

/// Counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub premise_clauses: usize,
    pub proof_steps: usize,
    pub rup_introductions: usize,
    pub rat_introductions: usize,
    pub deletions: usize,
    /// Deletions that did not match any live clause.
    pub unmatched_deletions: usize,
}

/// A single proof checking run.
#[derive(Debug)]
pub struct Checker {
    pub flags: Flags,
    pub propagator: Propagator,
    pub proof: Vector<ProofStep>,
    pub state: State,
    pub stats: Stats,
}

impl Checker {
    /// Load the formula into a fresh clause database.
    pub fn new(formula: Vector<Vector<Literal>>, proof: Vector<ProofStep>, flags: Flags) -> Checker {
        let maxvar = cmp::max(
            max_variable(formula.iter().map(|clause| &**clause)),
            max_variable(proof.iter().map(|step| step.literals())),
        );
        let mut propagator = Propagator::new(maxvar);
        for clause in &formula {
            add_clause(&mut propagator, clause, false);
        }
        Checker {
            flags,
            propagator,
            stats: Stats {
                premise_clauses: formula.len(),
                proof_steps: proof.len(),
                ..Stats::default()
            },
            proof,
            state: State::Ready,
        }
    }
}

/// Run the checker to completion.
///
/// Stops at the first rejected lemma. In full-proof mode, also stops as
/// soon as the empty clause is added.
pub fn run(checker: &mut Checker) -> CheckerResult {
    requires!(checker.state == State::Ready);
    checker.state = State::Processing;
    for i in 0..checker.proof.len() {
        match checker.proof[i].clone() {
            ProofStep::Deletion(literals) => delete(checker, &literals),
            ProofStep::Lemma(literals) => {
                if let Err((rup_info, rat_info)) = introduce(checker, &literals) {
                    checker.state = State::DoneInvalid;
                    return build_witness(
                        checker.flags.with_diagnostics(),
                        &checker.proof,
                        Some(i + 1),
                        rup_info,
                        rat_info,
                    );
                }
                if literals.is_empty() && checker.flags.mode == Mode::FullProof {
                    checker.state = State::DoneValid;
                    return CheckerResult::valid();
                }
            }
        }
    }
    match checker.flags.mode {
        Mode::Derivation => {
            checker.state = State::DoneValid;
            CheckerResult::valid()
        }
        Mode::FullProof => {
            log!(checker.flags, "no empty clause");
            checker.state = State::DoneInvalid;
            build_witness(
                checker.flags.with_diagnostics(),
                &checker.proof,
                None,
                None,
                None,
            )
        }
    }
}

/// Apply a deletion step.
fn delete(checker: &mut Checker, literals: &[Literal]) {
    checker.stats.deletions += 1;
    match delete_clause(&mut checker.propagator, literals) {
        Some(clause) => log!(
            checker.flags,
            "del {}",
            checker.propagator.clause_db.clause_to_string(clause)
        ),
        None => {
            checker.stats.unmatched_deletions += 1;
            if checker.flags.verbose {
                warn!("ignoring deletion of missing clause {}", clause_to_string(literals));
            }
        }
    }
}

/// Verify a lemma and add it.
///
/// Returns the diagnostics of the failed checks if it is not redundant.
fn introduce(
    checker: &mut Checker,
    literals: &[Literal],
) -> Result<(), (Option<RupInfo>, Option<RatInfo>)> {
    let with_diagnostics = checker.flags.with_diagnostics();
    let rup_info = match check_rup(&mut checker.propagator, literals, literals, with_diagnostics) {
        Inference::Valid => {
            checker.stats.rup_introductions += 1;
            let clause = add_clause(&mut checker.propagator, literals, true);
            log!(
                checker.flags,
                "lemma RUP {}",
                checker.propagator.clause_db.clause_to_string(clause)
            );
            return Ok(());
        }
        Inference::Invalid(rup_info) => rup_info,
    };
    match check_rat(&mut checker.propagator, literals, with_diagnostics) {
        Inference::Valid => {
            checker.stats.rat_introductions += 1;
            let clause = add_clause(&mut checker.propagator, literals, true);
            log!(
                checker.flags,
                "lemma RAT {}",
                checker.propagator.clause_db.clause_to_string(clause)
            );
            Ok(())
        }
        Inference::Invalid(rat_info) => {
            log!(checker.flags, "rejected {}", clause_to_string(literals));
            Err((rup_info, rat_info))
        }
    }
}

/// A proof step given as DIMACS integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Add(Vec<i32>),
    Delete(Vec<i32>),
}

impl Step {
    fn values(&self) -> &[i32] {
        match self {
            Step::Add(values) | Step::Delete(values) => values,
        }
    }
}

/// A plain clause is an addition.
impl From<Vec<i32>> for Step {
    fn from(values: Vec<i32>) -> Step {
        Step::Add(values)
    }
}

/// Return the first literal that does not denote a variable.
fn first_invalid(values: &[i32]) -> Option<i32> {
    values
        .iter()
        .cloned()
        .find(|&value| value == 0 || value == i32::min_value())
}

/// Convert DIMACS integers to literals, rejecting anything unrepresentable.
fn to_clauses(formula: &[Vec<i32>]) -> Result<Vector<Vector<Literal>>, InputError> {
    formula
        .iter()
        .enumerate()
        .map(|(i, values)| match first_invalid(values) {
            Some(literal) => Err(InputError::Premise {
                clause: i + 1,
                literal,
            }),
            None => Ok(values.iter().map(|&value| Literal::new(value)).collect()),
        })
        .collect()
}

fn to_proof(proof: &[Step]) -> Result<Vector<ProofStep>, InputError> {
    proof
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if let Some(literal) = first_invalid(step.values()) {
                return Err(InputError::ProofStep {
                    step: i + 1,
                    literal,
                });
            }
            Ok(match step {
                Step::Add(values) => ProofStep::lemma(values),
                Step::Delete(values) => ProofStep::deletion(values),
            })
        })
        .collect()
}

/// Check a proof for a formula.
///
/// All literals are validated before any checking happens.
pub fn check(
    formula: &[Vec<i32>],
    proof: &[Step],
    mode: Mode,
    diagnostics: Diagnostics,
) -> Result<CheckerResult, InputError> {
    Ok(check_with_flags(
        to_clauses(formula)?,
        to_proof(proof)?,
        Flags::new(mode, diagnostics),
    ))
}

/// Check already converted clauses and proof steps.
pub fn check_with_flags(
    formula: Vector<Vector<Literal>>,
    proof: Vector<ProofStep>,
    flags: Flags,
) -> CheckerResult {
    let mut checker = Checker::new(formula, proof, flags);
    run(&mut checker)
}

/// Check whether a single clause is RUP or RAT with respect to a formula.
pub fn check_step(formula: &[Vec<i32>], clause: &[i32]) -> Result<bool, InputError> {
    let formula = to_clauses(formula)?;
    if let Some(literal) = first_invalid(clause) {
        return Err(InputError::Lemma { literal });
    }
    let lemma: Vector<Literal> = clause.iter().map(|&value| Literal::new(value)).collect();
    Ok(is_redundant(formula, &lemma))
}

/// Check a lemma against a formula, without diagnostics.
pub fn is_redundant(formula: Vector<Vector<Literal>>, lemma: &[Literal]) -> bool {
    let proof = vector!(ProofStep::Lemma(lemma.iter().cloned().collect()));
    let mut checker = Checker::new(formula, proof, Flags::new(Mode::Derivation, Diagnostics::Fast));
    check_rup(&mut checker.propagator, lemma, lemma, false).is_valid()
        || check_rat(&mut checker.propagator, lemma, false).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drup_common::clause::clause_from_dimacs;

    fn checker(formula: &[&[i32]], proof: Vec<ProofStep>, mode: Mode) -> Checker {
        Checker::new(
            formula.iter().map(|clause| clause_from_dimacs(clause)).collect(),
            Vector::from_vec(proof),
            Flags::new(mode, Diagnostics::Verbose),
        )
    }

    #[test]
    fn state_transitions() {
        let mut checker = checker(
            &[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]],
            vec![ProofStep::lemma(&[2]), ProofStep::lemma(&[]), ProofStep::lemma(&[3])],
            Mode::FullProof,
        );
        assert_eq!(checker.state, State::Ready);
        assert!(run(&mut checker).is_valid());
        assert_eq!(checker.state, State::DoneValid);
        assert_eq!(
            checker.stats,
            Stats {
                premise_clauses: 4,
                proof_steps: 3,
                rup_introductions: 2,
                ..Stats::default()
            }
        );
    }

    #[test]
    fn counts_deletions() {
        let mut checker = checker(
            &[&[1, 2], &[-1]],
            vec![
                ProofStep::deletion(&[2, 1]),
                ProofStep::deletion(&[2, 1]),
                ProofStep::lemma(&[2]),
            ],
            Mode::Derivation,
        );
        let result = run(&mut checker);
        assert!(result.is_valid());
        assert_eq!(checker.stats.deletions, 2);
        assert_eq!(checker.stats.unmatched_deletions, 1);
        assert_eq!(checker.stats.rat_introductions, 1);
        assert_eq!(checker.propagator.clause_db.number_of_live_clauses(), 2);
    }

    #[test]
    fn rejected_lemma() {
        let mut checker = checker(
            &[&[1, 2], &[-2, 3]],
            vec![ProofStep::lemma(&[3]), ProofStep::lemma(&[-1])],
            Mode::Derivation,
        );
        let result = run(&mut checker);
        assert_eq!(checker.state, State::DoneInvalid);
        assert_eq!(result.proof_step, Some(2));
        assert_eq!(result.steps, Some(vector!(clause_from_dimacs(&[3]))));
        assert_eq!(checker.stats.rat_introductions, 1);
        let rup_info = result.rup_info.unwrap();
        assert_eq!(rup_info.clause, clause_from_dimacs(&[-1]));
        // Both premises are satisfied once the unit {3} is propagated.
        assert_eq!(rup_info.chain, clause_from_dimacs(&[1, 3]));
        let rat_info = result.rat_info.unwrap();
        assert_eq!(rat_info.pivot_clause, clause_from_dimacs(&[1, 2]));
        assert_eq!(rat_info.rup_info.clause, clause_from_dimacs(&[-1]));
        assert_eq!(rat_info.rup_info.chain, clause_from_dimacs(&[-2, 1, 3]));
    }

    #[test]
    fn input_errors() {
        assert_eq!(
            check(&[vec![1], vec![2, 0]], &[], Mode::FullProof, Diagnostics::Fast),
            Err(InputError::Premise {
                clause: 2,
                literal: 0
            })
        );
        assert_eq!(
            check(
                &[vec![1]],
                &[Step::Delete(vec![1]), Step::Add(vec![i32::min_value()])],
                Mode::FullProof,
                Diagnostics::Fast
            ),
            Err(InputError::ProofStep {
                step: 2,
                literal: i32::min_value()
            })
        );
        assert_eq!(
            check_step(&[vec![1]], &[0]),
            Err(InputError::Lemma { literal: 0 })
        );
    }

    #[test]
    fn single_steps() {
        assert_eq!(check_step(&[vec![1, 2], vec![-2]], &[1]), Ok(true));
        assert_eq!(check_step(&[vec![1, 2], vec![-1, 2]], &[-2]), Ok(false));
        assert_eq!(check_step(&[vec![1, 2]], &[1]), Ok(true));
    }
}
