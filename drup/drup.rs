//! DRUP/DRAT proof checker

use clap::Arg;
use drup::{
    checker::{run, Checker, Diagnostics, Flags, Mode},
    witness::CheckerResult,
    witness_check::check_witness_files,
};
use drup_common::{
    as_warning, comment, config, die,
    output::{install_signal_handler, print_key_value, print_solution, unreachable, Timer},
    parser::{open_file_for_writing, parse_files},
    puts,
};
use std::io::{self, Write};

fn main() {
    std::process::exit(run_frontend());
}

/// Run `drup`, returning its exit code.
///
/// This is a separate function because `std::process::exit` does not
/// call destructors.
fn run_frontend() -> i32 {
    install_signal_handler();
    let mut app = clap::App::new("drup")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .after_help(
            "Input files may be compressed - supported file extensions are: zst, gz, bz2, xz and lz4.
Use \"-\" for an input file to read it from standard input.",
        )
        .arg(Arg::with_name("INPUT").required(true).help("input file in DIMACS format"))
        .arg(Arg::with_name("PROOF").required(true).help("proof file in DRUP or DRAT format"))
        .arg(
            Arg::with_name("DERIVATION")
                .short("d")
                .long("derivation")
                .help("Only check that every lemma is redundant, do not require the empty clause."),
        )
        .arg(
            Arg::with_name("WITNESS_FILE")
                .takes_value(true)
                .short("w")
                .long("witness")
                .help("Write the failure witness of an incorrect proof to this file (TOML)."),
        );
    if config::ENABLE_LOGGING {
        app = app.arg(
            Arg::with_name("v")
                .short("v")
                .long("verbose")
                .help("Verbose output. Print a line for each processed proof step."),
        );
    }
    let matches = app.get_matches();
    let formula_filename = matches.value_of("INPUT").unwrap_or_else(|| unreachable());
    let proof_filename = matches.value_of("PROOF").unwrap_or_else(|| unreachable());
    let witness_filename = matches.value_of("WITNESS_FILE");
    let flags = Flags {
        mode: if matches.is_present("DERIVATION") {
            Mode::Derivation
        } else {
            Mode::FullProof
        },
        diagnostics: Diagnostics::Verbose,
        verbose: matches.is_present("v"),
    };

    let timer = Timer::name("total time");
    let parser = parse_files(formula_filename, proof_filename, flags.verbose)
        .unwrap_or_else(|err| die!("{}", err));
    let mut checker = Checker::new(parser.formula, parser.proof, flags);
    let result = {
        let mut _timer = Timer::name("verification time");
        _timer.disabled = !flags.verbose;
        run(&mut checker)
    };
    print_key_value("premise clauses", checker.stats.premise_clauses);
    print_key_value("proof steps", checker.stats.proof_steps);
    print_key_value("RUP introductions", checker.stats.rup_introductions);
    print_key_value("RAT introductions", checker.stats.rat_introductions);
    print_key_value("deletions", checker.stats.deletions);
    print_key_value("unmatched deletions", checker.stats.unmatched_deletions);
    drop(timer);
    if !result.is_valid() {
        as_warning!(report_failure(&checker, &result, proof_filename));
    }
    print_solution(if result.is_valid() {
        "VERIFIED"
    } else {
        "NOT VERIFIED"
    });
    if let (false, Some(filename)) = (result.is_valid(), witness_filename) {
        write_witness(filename, &result)
            .unwrap_or_else(|err| die!("Failed to write failure witness: {}", err));
        if !check_witness_files(formula_filename, proof_filename, &result) {
            return 2;
        }
    }
    if result.is_valid() {
        0
    } else {
        1
    }
}

/// Explain why the proof was rejected.
fn report_failure(checker: &Checker, result: &CheckerResult, proof_filename: &str) {
    let proof_step = match result.proof_step {
        Some(proof_step) => proof_step,
        None => {
            puts!("c no conflict\n");
            return;
        }
    };
    puts!(
        "c {}:{} redundancy check failed for {}\n",
        proof_filename,
        proof_step,
        checker.proof[proof_step - 1]
    );
    if checker.flags.verbose {
        if let Some(rup_info) = &result.rup_info {
            comment!("{}", rup_info);
        }
        if let Some(rat_info) = &result.rat_info {
            comment!("{}", rat_info);
        }
    }
}

/// Write a witness as TOML.
fn write_witness(filename: &str, result: &CheckerResult) -> io::Result<()> {
    let text = toml::to_string(result)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
    let mut file = open_file_for_writing(filename)?;
    writeln!(file, "# Failure witness produced by drup")?;
    write!(file, "{}", text)?;
    file.flush()
}
