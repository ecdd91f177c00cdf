//! Apply a proof up to a given step without checking it and output the
//! accumulated formula and the remaining proof.

use clap::Arg;
use std::io::{Result, Write};

use drup::witness_check::replay;
use drup_common::{
    clause::write_clause,
    die, output,
    output::unreachable,
    parser::{open_file_for_writing, parse_files},
};

/// Run `apply-proof`.
fn main() {
    run().unwrap_or_else(|err| die!("{}", err))
}

/// Run `apply-proof`, possibly returning an `io::Error`.
fn run() -> Result<()> {
    output::install_signal_handler();
    let matches = clap::App::new("apply-proof")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "
Apply the first <STEPS> proof steps without checking them and output the
accumulated formula to <FORMULA_OUTPUT> and the remaining proof to <PROOF_OUTPUT>."
                .trim(),
        )
        .arg(
            Arg::with_name("INPUT")
                .required(true)
                .help("input formula file in DIMACS format"),
        )
        .arg(
            Arg::with_name("PROOF")
                .required(true)
                .help("input proof file in DRUP/DRAT format"),
        )
        .arg(
            Arg::with_name("STEPS")
                .required(true)
                .help("number of proof steps to apply"),
        )
        .arg(
            Arg::with_name("FORMULA_OUTPUT")
                .required(true)
                .help("file for the output formula"),
        )
        .arg(
            Arg::with_name("PROOF_OUTPUT")
                .required(true)
                .help("file for the output proof"),
        )
        .get_matches();
    let value_of = |name: &str| matches.value_of(name).unwrap_or_else(|| unreachable());
    let steps: usize = value_of("STEPS")
        .parse()
        .unwrap_or_else(|err| die!("Number of steps must be an integer: {}", err));
    let parser = parse_files(value_of("INPUT"), value_of("PROOF"), /*verbose=*/ false)?;
    if steps > parser.proof.len() {
        die!(
            "Number of steps exceeds proof size: {} > {}",
            steps,
            parser.proof.len()
        );
    }
    let clause_db = replay(&parser.formula, &parser.proof[0..steps]);

    let mut formula_output = open_file_for_writing(value_of("FORMULA_OUTPUT"))?;
    writeln!(
        formula_output,
        "p cnf {} {}",
        parser.maxvar,
        clause_db.number_of_live_clauses()
    )?;
    for clause in clause_db.live_clauses() {
        write_clause(&mut formula_output, clause_db.clause(clause).iter())?;
        writeln!(formula_output)?;
    }
    formula_output.flush()?;

    let mut proof_output = open_file_for_writing(value_of("PROOF_OUTPUT"))?;
    for step in &parser.proof[steps..parser.proof.len()] {
        writeln!(proof_output, "{}", step)?;
    }
    proof_output.flush()
}
