//! A checker for DRUP and DRAT proofs
//!
//! Given a formula in conjunctive normal form and a proof (a sequence of
//! clause additions and deletions), decide whether every added clause is
//! implied by reverse unit propagation (RUP) or is a resolution asymmetric
//! tautology (RAT) on its first literal, and, in full-proof mode, whether
//! the proof derives the empty clause.
//!
//! Rejected proofs come with a [`CheckerResult`](witness/struct.CheckerResult.html)
//! that can be re-checked independently with
//! [`check_witness()`](witness_check/fn.check_witness.html).

#[macro_use]
extern crate drup_common;

pub mod error;
pub mod witness;
#[macro_use]
pub mod propagate;
pub mod rup;
pub mod rat;
pub mod checker;
pub mod frontend;
pub mod witness_check;

pub use crate::{
    checker::{check, check_step, Diagnostics, Mode, Step},
    error::{Error, InputError},
    frontend::{
        check_derivation_from_files, check_derivation_from_strings, check_lemmas_from_strings,
        check_proof_from_files, check_proof_from_strings,
    },
    witness::{CheckerResult, Outcome, RatInfo, RupInfo},
    witness_check::check_witness,
};
