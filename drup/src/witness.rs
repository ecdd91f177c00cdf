//! Check results and failure witnesses

use drup_common::{
    clause::{clause_to_string, ProofStep},
    literal::Literal,
    memory::Vector,
};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The verdict of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Valid,
    Invalid,
}

/// A failed RUP check: the clause and the literals assigned before
/// propagation stalled (assumptions first, then propagated literals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RupInfo {
    pub clause: Vector<Literal>,
    pub chain: Vector<Literal>,
}

/// A failed RAT check on the first literal of `clause`.
///
/// `pivot_clause` is the resolution candidate whose resolvent is not RUP;
/// `rup_info` carries `clause` and the chain of that resolvent check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatInfo {
    pub clause: Vector<Literal>,
    pub pivot_clause: Vector<Literal>,
    pub rup_info: RupInfo,
}

/// The result of checking a proof.
///
/// The optional fields are only filled in for invalid proofs checked with
/// [`Diagnostics::Verbose`](../checker/enum.Diagnostics.html).
/// Field order matters for TOML: tables go last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerResult {
    pub outcome: Outcome,
    /// The 1-based index of the rejected proof step, absent if the proof
    /// ended without the empty clause.
    pub proof_step: Option<usize>,
    /// The lemmas that were accepted before the failure.
    pub steps: Option<Vector<Vector<Literal>>>,
    pub rup_info: Option<RupInfo>,
    pub rat_info: Option<RatInfo>,
}

impl CheckerResult {
    /// A successful check.
    pub fn valid() -> CheckerResult {
        CheckerResult {
            outcome: Outcome::Valid,
            proof_step: None,
            steps: None,
            rup_info: None,
            rat_info: None,
        }
    }
    /// A failed check without diagnostics.
    pub fn invalid() -> CheckerResult {
        CheckerResult {
            outcome: Outcome::Invalid,
            ..CheckerResult::valid()
        }
    }
    /// Return true if the proof was accepted.
    pub fn is_valid(&self) -> bool {
        self.outcome == Outcome::Valid
    }
}

/// The result of a single redundancy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inference<T> {
    /// The clause is implied by the formula.
    Valid,
    /// The clause is not implied; carries diagnostics if they were requested.
    Invalid(Option<T>),
}

impl<T> Inference<T> {
    pub fn is_valid(&self) -> bool {
        match self {
            Inference::Valid => true,
            Inference::Invalid(_) => false,
        }
    }
}

/// Assemble the result for a rejected proof.
///
/// `proof` is the full proof; the accepted lemmas are the ones before
/// `proof_step` (or all of them if the empty clause is missing).
/// Without diagnostics, only the outcome is set.
pub fn build_witness(
    with_diagnostics: bool,
    proof: &[ProofStep],
    proof_step: Option<usize>,
    rup_info: Option<RupInfo>,
    rat_info: Option<RatInfo>,
) -> CheckerResult {
    if !with_diagnostics {
        return CheckerResult::invalid();
    }
    let accepted = proof_step.map_or(proof.len(), |step| step - 1);
    let steps = proof[0..accepted]
        .iter()
        .filter_map(|step| match step {
            ProofStep::Lemma(literals) => Some(literals.clone()),
            ProofStep::Deletion(_) => None,
        })
        .collect();
    CheckerResult {
        outcome: Outcome::Invalid,
        proof_step,
        steps: Some(steps),
        rup_info,
        rat_info,
    }
}

/// Print a chain like `<-1 2 3>`.
fn chain_to_string(chain: &[Literal]) -> String {
    let literals: Vec<String> = chain.iter().map(|literal| literal.to_string()).collect();
    format!("<{}>", literals.join(" "))
}

impl fmt::Display for RupInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RUP check failed for {} with chain {}",
            clause_to_string(&self.clause),
            chain_to_string(&self.chain)
        )
    }
}

impl fmt::Display for RatInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RAT check failed for {}", clause_to_string(&self.clause))?;
        if let Some(pivot) = self.clause.first() {
            write!(f, " on pivot {}", pivot)?;
        }
        write!(
            f,
            " with clause {} and chain {}",
            clause_to_string(&self.pivot_clause),
            chain_to_string(&self.rup_info.chain)
        )
    }
}
