//! Check lemmas one by one against a formula.

use clap::Arg;
use std::io::Result;

use drup::checker::is_redundant;
use drup_common::{
    clause::clause_to_string,
    comment, die,
    input::Input,
    output::{self, print_key_value, unreachable},
    parser::{parse_clauses, parse_formula_file, read_compressed_file, Parser},
    puts,
};

/// Run `check-lemmas`.
fn main() {
    let rejected = run().unwrap_or_else(|err| die!("{}", err));
    std::process::exit(if rejected == 0 { 0 } else { 1 })
}

/// Run `check-lemmas`, returning the number of lemmas that are not redundant.
fn run() -> Result<usize> {
    output::install_signal_handler();
    let matches = clap::App::new("check-lemmas")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "
Check every lemma in <LEMMAS> on its own against the formula, by RUP or else
RAT on its first literal. Lemmas are not added to the formula."
                .trim(),
        )
        .arg(
            Arg::with_name("INPUT")
                .required(true)
                .help("input formula file in DIMACS format"),
        )
        .arg(
            Arg::with_name("LEMMAS")
                .required(true)
                .help("lemmas, one clause per line, each terminated by 0"),
        )
        .get_matches();
    let value_of = |name: &str| matches.value_of(name).unwrap_or_else(|| unreachable());
    let mut parser = Parser::new();
    parse_formula_file(&mut parser, value_of("INPUT"))?;
    let bytes = read_compressed_file(value_of("LEMMAS"))?;
    let lemmas = parse_clauses(&mut parser, Input::from_bytes(&bytes))?;
    let mut rejected = 0;
    for (i, lemma) in lemmas.iter().enumerate() {
        if is_redundant(parser.formula.clone(), lemma) {
            continue;
        }
        rejected += 1;
        puts!("c lemma {} is not redundant: {}\n", i + 1, clause_to_string(lemma));
    }
    print_key_value("lemmas", lemmas.len());
    print_key_value("rejected lemmas", rejected);
    if rejected == 0 {
        comment!("all lemmas are redundant");
    }
    Ok(rejected)
}
