//! Verify failure witnesses of incorrect proofs produced by drup

use clap::Arg;

use drup::{witness::CheckerResult, witness_check::check_witness_files};
use drup_common::{
    die,
    output::{install_signal_handler, print_solution, unreachable},
    parser::read_compressed_file,
};

fn main() {
    install_signal_handler();
    let app = clap::App::new("witness-check")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Verify failure witnesses stating why a DRUP/DRAT proof is incorrect")
        .arg(
            Arg::with_name("INPUT")
                .required(true)
                .help("input file in DIMACS format"),
        )
        .arg(
            Arg::with_name("PROOF")
                .required(true)
                .help("proof file in DRUP/DRAT format"),
        )
        .arg(
            Arg::with_name("WITNESS")
                .required(true)
                .help("failure witness file in TOML format"),
        );
    let matches = app.get_matches();
    let value_of = |name: &str| matches.value_of(name).unwrap_or_else(|| unreachable());
    let bytes = read_compressed_file(value_of("WITNESS"))
        .unwrap_or_else(|err| die!("Failed to read witness file: {}", err));
    let text = String::from_utf8(bytes)
        .unwrap_or_else(|err| die!("Failed to read witness file: {}", err));
    let witness: CheckerResult =
        toml::from_str(&text).unwrap_or_else(|err| die!("Failed to parse witness file: {}", err));
    if check_witness_files(value_of("INPUT"), value_of("PROOF"), &witness) {
        print_solution("VERIFIED");
    } else {
        std::process::exit(1);
    }
}
