use drup::{
    check_derivation_from_files, check_lemmas_from_strings, check_proof_from_files,
    check_proof_from_strings, check_witness,
    frontend::parse_strings,
    CheckerResult, Diagnostics, Error, Outcome,
};
use std::{fs, path::PathBuf};

const FORMULA: &str = "c three variables, all eight clauses
p cnf 3 8
1 2 3 0
1 2 -3 0
1 -2 3 0
1 -2 -3 0
-1 2 3 0
-1 2 -3 0
-1 -2 3 0
-1 -2 -3 0
";

const PROOF: &str = "1 2 0
1 0
d 1 2 0
2
0
0
";

/// A proof whose third lemma is neither RUP nor RAT.
const BROKEN_PROOF: &str = "1 2 0
d 1 2 0
d 1 2 3 0
c the next lemma is fine
3 -1 0
1 0
0
";

fn witness_for(formula: &str, proof: &str) -> CheckerResult {
    let result = check_proof_from_strings(formula, proof, Diagnostics::Verbose).unwrap();
    assert_eq!(result.outcome, Outcome::Invalid);
    result
}

fn recheck(formula: &str, proof: &str, witness: &CheckerResult) -> Result<(), String> {
    let parser = parse_strings(formula, proof).unwrap();
    check_witness(&parser.formula, &parser.proof, witness)
}

#[test]
fn valid_proof() {
    let result = check_proof_from_strings(FORMULA, PROOF, Diagnostics::Verbose).unwrap();
    assert!(result.is_valid());
}

#[test]
fn witness_survives_toml() {
    let witness = witness_for(FORMULA, BROKEN_PROOF);
    assert_eq!(witness.proof_step, Some(5));
    assert_eq!(witness.steps.as_ref().map(|steps| steps.len()), Some(2));
    assert!(witness.rat_info.is_some());
    let text = toml::to_string(&witness).unwrap();
    assert!(text.starts_with("outcome = \"INVALID\"\nproof_step = 5\n"));
    let parsed: CheckerResult = toml::from_str(&text).unwrap();
    assert_eq!(parsed, witness);
    assert_eq!(recheck(FORMULA, BROKEN_PROOF, &parsed), Ok(()));
}

#[test]
fn witness_for_missing_empty_clause() {
    let proof = "1 2 0\n1 0\n";
    let witness = witness_for(FORMULA, proof);
    assert_eq!(witness.proof_step, None);
    let text = toml::to_string(&witness).unwrap();
    let parsed: CheckerResult = toml::from_str(&text).unwrap();
    assert_eq!(parsed, witness);
    assert_eq!(recheck(FORMULA, proof, &parsed), Ok(()));
    // The same witness does not fit a proof that derives the empty clause.
    assert!(recheck(FORMULA, PROOF, &parsed).is_err());
}

#[test]
fn witness_must_match_the_proof() {
    let witness = witness_for(FORMULA, BROKEN_PROOF);
    assert!(recheck(FORMULA, PROOF, &witness).is_err());
    let mut tampered = witness;
    if let Some(rat_info) = tampered.rat_info.as_mut() {
        rat_info.rup_info.chain.truncate(1);
    }
    assert!(recheck(FORMULA, BROKEN_PROOF, &tampered).is_err());
}

#[test]
fn fast_witnesses_cannot_be_rechecked() {
    let result = check_proof_from_strings(FORMULA, BROKEN_PROOF, Diagnostics::Fast).unwrap();
    assert_eq!(result, CheckerResult::invalid());
    assert!(recheck(FORMULA, BROKEN_PROOF, &result).is_err());
}

#[test]
fn lemma_lines() {
    let results = check_lemmas_from_strings(FORMULA, "1 2 0\n1 0\nc comment\n0\n").unwrap();
    assert_eq!(results, vec![true, true, false]);
    match check_lemmas_from_strings(FORMULA, "1 2\n") {
        Err(Error::Proof(err)) => assert!(err.to_string().contains("terminating")),
        other => panic!("unexpected {:?}", other),
    }
}

fn temporary_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("drup-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn files() {
    let formula = temporary_file("formula.cnf", FORMULA);
    let proof = temporary_file("proof.drat", PROOF);
    let broken = temporary_file("broken.drat", BROKEN_PROOF);
    let formula = formula.to_str().unwrap();
    let proof = proof.to_str().unwrap();
    let broken = broken.to_str().unwrap();
    assert!(check_proof_from_files(formula, proof, Diagnostics::Fast)
        .unwrap()
        .is_valid());
    assert!(!check_derivation_from_files(formula, broken, Diagnostics::Fast)
        .unwrap()
        .is_valid());
    match check_proof_from_files(formula, "/nonexistent/proof.drat", Diagnostics::Fast) {
        Err(err @ Error::Proof(_)) => assert!(!err.is_parse_error()),
        other => panic!("unexpected {:?}", other),
    }
    for path in &[formula, proof, broken] {
        let _ = fs::remove_file(path);
    }
}
