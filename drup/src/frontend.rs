//! Checking proofs given as DIMACS/DRAT text or files

use crate::{
    checker::{check_with_flags, is_redundant, Diagnostics, Flags, Mode},
    error::Error,
    witness::CheckerResult,
};
use drup_common::{
    input::Input,
    parser::{parse_clauses, parse_formula, parse_proof, read_compressed_file, Parser},
};

/// Parse a formula and a proof given as text.
pub fn parse_strings(formula: &str, proof: &str) -> Result<Parser, Error> {
    let mut parser = Parser::new();
    parse_formula(&mut parser, Input::from_bytes(formula.as_bytes())).map_err(Error::Formula)?;
    parse_proof(&mut parser, Input::from_bytes(proof.as_bytes())).map_err(Error::Proof)?;
    Ok(parser)
}

/// Parse a formula and a proof file, either of which may be compressed.
pub fn parse_files(formula_file: &str, proof_file: &str) -> Result<Parser, Error> {
    let formula = read_compressed_file(formula_file).map_err(Error::Formula)?;
    let proof = read_compressed_file(proof_file).map_err(Error::Proof)?;
    let mut parser = Parser::new();
    parse_formula(&mut parser, Input::from_bytes(&formula)).map_err(Error::Formula)?;
    parse_proof(&mut parser, Input::from_bytes(&proof)).map_err(Error::Proof)?;
    Ok(parser)
}

fn check_parsed(parser: Parser, mode: Mode, diagnostics: Diagnostics) -> CheckerResult {
    check_with_flags(parser.formula, parser.proof, Flags::new(mode, diagnostics))
}

/// Check a refutation given as text.
pub fn check_proof_from_strings(
    formula: &str,
    proof: &str,
    diagnostics: Diagnostics,
) -> Result<CheckerResult, Error> {
    let parser = parse_strings(formula, proof)?;
    Ok(check_parsed(parser, Mode::FullProof, diagnostics))
}

/// Check a refutation given as files.
pub fn check_proof_from_files(
    formula_file: &str,
    proof_file: &str,
    diagnostics: Diagnostics,
) -> Result<CheckerResult, Error> {
    let parser = parse_files(formula_file, proof_file)?;
    Ok(check_parsed(parser, Mode::FullProof, diagnostics))
}

/// Check a derivation given as text.
pub fn check_derivation_from_strings(
    formula: &str,
    proof: &str,
    diagnostics: Diagnostics,
) -> Result<CheckerResult, Error> {
    let parser = parse_strings(formula, proof)?;
    Ok(check_parsed(parser, Mode::Derivation, diagnostics))
}

/// Check a derivation given as files.
pub fn check_derivation_from_files(
    formula_file: &str,
    proof_file: &str,
    diagnostics: Diagnostics,
) -> Result<CheckerResult, Error> {
    let parser = parse_files(formula_file, proof_file)?;
    Ok(check_parsed(parser, Mode::Derivation, diagnostics))
}

/// Check each lemma on its own against the formula.
///
/// `lemmas` holds one clause per line, each terminated by 0. Lemmas are
/// not added to the formula, so they cannot depend on each other.
pub fn check_lemmas_from_strings(formula: &str, lemmas: &str) -> Result<Vec<bool>, Error> {
    let mut parser = Parser::new();
    parse_formula(&mut parser, Input::from_bytes(formula.as_bytes())).map_err(Error::Formula)?;
    let lemmas =
        parse_clauses(&mut parser, Input::from_bytes(lemmas.as_bytes())).map_err(Error::Proof)?;
    Ok(lemmas
        .iter()
        .map(|lemma| is_redundant(parser.formula.clone(), lemma))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    const FORMULA: &str = "p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n";

    #[test]
    fn refutation() {
        let result = check_proof_from_strings(FORMULA, "2 0\n0\n", Diagnostics::Fast).unwrap();
        assert!(result.is_valid());
        let result = check_proof_from_strings(FORMULA, "2 0\n", Diagnostics::Fast).unwrap();
        assert!(!result.is_valid());
        let result = check_derivation_from_strings(FORMULA, "2 0\n", Diagnostics::Fast).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn parse_errors_name_the_input() {
        match check_proof_from_strings("1 2 0\n", "0\n", Diagnostics::Fast) {
            Err(Error::Formula(err)) => assert_eq!(err.kind(), ErrorKind::InvalidData),
            other => panic!("unexpected {:?}", other),
        }
        match check_proof_from_strings(FORMULA, "1 x 0\n", Diagnostics::Fast) {
            Err(Error::Proof(err)) => assert_eq!(err.kind(), ErrorKind::InvalidData),
            other => panic!("unexpected {:?}", other),
        }
        match check_proof_from_files("/nonexistent.cnf", "/nonexistent.drat", Diagnostics::Fast) {
            Err(Error::Formula(err)) => assert_eq!(err.kind(), ErrorKind::NotFound),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn lemmas_are_independent() {
        let lemmas = check_lemmas_from_strings(FORMULA, "2 0\n-2 0\n0\n").unwrap();
        assert_eq!(lemmas, vec![true, true, false]);
    }
}
