//! DIMACS and DRUP/DRAT parser

use crate::{
    clause::ProofStep,
    input::Input,
    literal::{Literal, Variable},
    memory::{Offset, Vector},
    output::Timer,
};
use std::{
    cmp,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Result},
};

/// CNF and DRUP/DRAT parser.
///
/// Clauses are kept exactly as written (order and duplicates included);
/// normalization is up to the consumer.
#[derive(Debug, PartialEq, Default)]
pub struct Parser {
    /// The highest variable parsed so far
    pub maxvar: Variable,
    /// The number of variables and clauses announced in the header
    pub header: Option<(i32, u64)>,
    /// The premise clauses
    pub formula: Vector<Vector<Literal>>,
    /// The proof steps
    pub proof: Vector<ProofStep>,
    /// Print diagnostics and timing information
    pub verbose: bool,
}

impl Parser {
    /// Create a new parser.
    pub fn new() -> Parser {
        Parser::default()
    }
    /// The premise clauses as slices.
    pub fn clauses(&self) -> impl Iterator<Item = &[Literal]> {
        self.formula.iter().map(|clause| &**clause)
    }
}

/// Parse a formula and a proof file.
///
/// Errors are tagged with the file they come from.
pub fn parse_files(formula_file: &str, proof_file: &str, verbose: bool) -> Result<Parser> {
    let mut parser = Parser::new();
    parser.verbose = verbose;
    parse_formula_file(&mut parser, formula_file)
        .map_err(|err| in_file(err, "formula", formula_file))?;
    parse_proof_file(&mut parser, proof_file).map_err(|err| in_file(err, "proof", proof_file))?;
    if let Some(variables) = maxvar_exceeds_header(&parser) {
        warn!(
            "variable {} is far beyond the {} variables of the header, memory use grows with it",
            parser.maxvar, variables
        );
    }
    Ok(parser)
}

/// Return the header's variable count if the largest variable cannot be
/// explained by it.
///
/// Each variable beyond the header needs at least one lemma to introduce it.
/// Assignments and watchlists are dense arrays sized by the largest
/// variable, so an outlier here costs memory for every variable below it.
pub fn maxvar_exceeds_header(parser: &Parser) -> Option<i32> {
    let (variables, _clauses) = parser.header?;
    let lemmas = parser
        .proof
        .iter()
        .filter(|step| !step.is_deletion())
        .count();
    if parser.maxvar.as_offset() > variables as usize + lemmas {
        Some(variables)
    } else {
        None
    }
}

/// Prefix an error with the file it concerns.
fn in_file(err: io::Error, what: &str, filename: &str) -> io::Error {
    io::Error::new(err.kind(), format!("{} {}: {}", what, filename, err))
}

/// Parse a possibly compressed DIMACS file.
pub fn parse_formula_file(parser: &mut Parser, filename: &str) -> Result<()> {
    let mut _timer = Timer::name("parsing formula");
    _timer.disabled = !parser.verbose;
    let bytes = read_compressed_file(filename)?;
    parse_formula(parser, Input::from_bytes(&bytes))
}

/// Parse a possibly compressed DRUP/DRAT file.
pub fn parse_proof_file(parser: &mut Parser, filename: &str) -> Result<()> {
    let mut _timer = Timer::name("parsing proof");
    _timer.disabled = !parser.verbose;
    let bytes = read_compressed_file(filename)?;
    parse_proof(parser, Input::from_bytes(&bytes))
}

/// Open a file for writing.
pub fn open_file_for_writing(filename: &str) -> Result<BufWriter<File>> {
    File::create(filename).map(BufWriter::new)
}

/// File extension of Zstandard archives.
const ZSTD: &str = ".zst";
/// File extension of Gzip archives.
const GZIP: &str = ".gz";
/// File extension of Bzip2 archives.
const BZIP2: &str = ".bz2";
/// File extension of XZ archives.
const XZ: &str = ".xz";
/// File extension of LZ4 archives.
const LZ4: &str = ".lz4";

/// Strip the compression format off a filename.
///
/// If the filename ends with a known archive extension,
/// return the filname without extension and the extension.
/// Otherwise return the unmodified filename and the empty string.
fn compression_format_by_extension(filename: &str) -> (&str, &str) {
    for extension in &[ZSTD, GZIP, BZIP2, LZ4, XZ] {
        if filename.ends_with(extension) {
            return (&filename[0..filename.len() - extension.len()], extension);
        }
    }
    (filename, "")
}

/// Read the contents of a possibly compressed file.
///
/// If the file is compressed it is transparently uncompressed.
/// If the filename is "-", read from stdin.
pub fn read_compressed_file(filename: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if filename == "-" {
        io::stdin().lock().read_to_end(&mut buffer)?;
        return Ok(buffer);
    }
    let file = File::open(filename)?;
    let (_basename, compression_format) = compression_format_by_extension(filename);
    match compression_format {
        ZSTD => zstd::stream::read::Decoder::new(file)?.read_to_end(&mut buffer),
        GZIP => flate2::read::GzDecoder::new(file).read_to_end(&mut buffer),
        BZIP2 => bzip2::read::BzDecoder::new(file).read_to_end(&mut buffer),
        XZ => xz2::read::XzDecoder::new(file).read_to_end(&mut buffer),
        LZ4 => lz4::Decoder::new(file)?.read_to_end(&mut buffer),
        _ => BufReader::new(file).read_to_end(&mut buffer),
    }?;
    Ok(buffer)
}

/// Parse a DIMACS comment starting with "c".
///
/// Consumes a leading "c" and any characters until (including) the next newline.
fn parse_comment(input: &mut Input) -> Result<()> {
    match input.peek() {
        Some(b'c') => {
            input.skip_line();
            Ok(())
        }
        _ => Err(input.error(Input::DRAT)),
    }
}

/// Parse a DIMACS header, skipping any preceding comments.
fn parse_formula_header(input: &mut Input) -> Result<(i32, u64)> {
    input.skip_any_whitespace();
    while Some(b'c') == input.peek() {
        parse_comment(input)?;
        input.skip_any_whitespace();
    }
    for &expected in b"p cnf" {
        if input.peek().map_or(true, |c| c != expected) {
            return Err(input.error(Input::P_CNF));
        }
        input.next();
    }
    input.skip_some_whitespace()?;
    let maxvar = input.parse_dec32()?;
    input.skip_some_whitespace()?;
    let num_clauses = input.parse_dec64()?;
    if maxvar < 0 || num_clauses < 0 {
        return Err(input.error(Input::P_CNF));
    }
    input.skip_some_whitespace()?;
    Ok((maxvar, num_clauses as u64))
}

/// Parse literals up to and including the terminating 0.
///
/// The literals may span several lines.
fn parse_clause(parser: &mut Parser, input: &mut Input) -> Result<Vector<Literal>> {
    let mut clause = Vector::new();
    loop {
        input.skip_any_whitespace();
        if input.peek().is_none() {
            return Err(input.error(Input::TERMINATOR));
        }
        let value = input.parse_dec32()?;
        input.skip_some_whitespace()?;
        if value == 0 {
            return Ok(clause);
        }
        let literal = Literal::new(value);
        parser.maxvar = cmp::max(parser.maxvar, literal.variable());
        clause.push(literal);
    }
}

/// Parse a DIMACS formula.
pub fn parse_formula(parser: &mut Parser, mut input: Input) -> Result<()> {
    let header = parse_formula_header(&mut input)?;
    parser.header = Some(header);
    loop {
        input.skip_any_whitespace();
        match input.peek() {
            None => break,
            Some(b'c') => parse_comment(&mut input)?,
            Some(c) if Input::is_digit_or_dash(c) => {
                let clause = parse_clause(parser, &mut input)?;
                parser.formula.push(clause);
            }
            Some(_) => return Err(input.error(Input::NUMBER)),
        }
    }
    if parser.verbose && header.1 != parser.formula.len() as u64 {
        warn!(
            "header announces {} clauses, but the formula has {}",
            header.1,
            parser.formula.len()
        );
    }
    Ok(())
}

/// Parse a DRUP/DRAT proof.
pub fn parse_proof(parser: &mut Parser, mut input: Input) -> Result<()> {
    loop {
        input.skip_any_whitespace();
        match input.peek() {
            None => break,
            Some(b'c') => parse_comment(&mut input)?,
            Some(b'd') => {
                input.next();
                input.skip_some_whitespace()?;
                let clause = parse_clause(parser, &mut input)?;
                parser.proof.push(ProofStep::Deletion(clause));
            }
            Some(c) if Input::is_digit_or_dash(c) => {
                let clause = parse_clause(parser, &mut input)?;
                parser.proof.push(ProofStep::Lemma(clause));
            }
            Some(_) => return Err(input.error(Input::DRAT)),
        }
    }
    Ok(())
}

/// Parse a sequence of clauses without header, as used for lemma files.
pub fn parse_clauses(parser: &mut Parser, mut input: Input) -> Result<Vector<Vector<Literal>>> {
    let mut clauses = Vector::new();
    loop {
        input.skip_any_whitespace();
        match input.peek() {
            None => break,
            Some(b'c') => parse_comment(&mut input)?,
            Some(c) if Input::is_digit_or_dash(c) => clauses.push(parse_clause(parser, &mut input)?),
            Some(_) => return Err(input.error(Input::NUMBER)),
        }
    }
    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::clause_from_dimacs;
    use std::io::ErrorKind;

    fn sample_formula() -> Parser {
        let mut parser = Parser::new();
        let example = r#"c comment
p cnf 2 2
1 2 0
c comment
-1
 -2 0"#;
        assert!(parse_formula(&mut parser, Input::from_bytes(example.as_bytes())).is_ok());
        parser
    }

    #[test]
    fn valid_formula_and_proof() {
        let mut parser = sample_formula();
        let result = parse_proof(
            &mut parser,
            Input::from_bytes(b"1 2 3 0\nc note\nd 1 2 0\n0\n"),
        );
        assert!(result.is_ok());
        assert_eq!(
            parser,
            Parser {
                maxvar: Variable::new(3),
                header: Some((2, 2)),
                formula: vector!(clause_from_dimacs(&[1, 2]), clause_from_dimacs(&[-1, -2])),
                proof: vector!(
                    ProofStep::lemma(&[1, 2, 3]),
                    ProofStep::deletion(&[1, 2]),
                    ProofStep::lemma(&[]),
                ),
                verbose: false,
            }
        );
    }

    #[test]
    fn variables_beyond_the_header() {
        let mut parser = sample_formula();
        assert_eq!(maxvar_exceeds_header(&parser), None);
        assert!(parse_proof(&mut parser, Input::from_bytes(b"-3 1 0\n3 0\n")).is_ok());
        assert_eq!(maxvar_exceeds_header(&parser), None);
        assert!(parse_proof(&mut parser, Input::from_bytes(b"1000000000 0\n")).is_ok());
        assert_eq!(maxvar_exceeds_header(&parser), Some(2));
        assert_eq!(maxvar_exceeds_header(&Parser::new()), None);
    }

    #[test]
    fn missing_header() {
        let mut parser = Parser::new();
        let err = parse_formula(&mut parser, Input::from_bytes(b"1 2 0\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().starts_with(Input::P_CNF));
    }

    #[test]
    fn missing_terminator() {
        let mut parser = sample_formula();
        let err = parse_proof(&mut parser, Input::from_bytes(b"1 0\n-2 3")).unwrap_err();
        assert!(err.to_string().starts_with(Input::TERMINATOR));
    }

    #[test]
    fn stray_characters() {
        let mut parser = sample_formula();
        assert!(parse_proof(&mut parser, Input::from_bytes(b"1x 0\n")).is_err());
        let mut parser = sample_formula();
        assert!(parse_proof(&mut parser, Input::from_bytes(b"e 1 0\n")).is_err());
        let mut parser = sample_formula();
        assert!(parse_proof(&mut parser, Input::from_bytes(b"d1 0\n")).is_err());
    }

    #[test]
    fn lemma_lines() {
        let mut parser = Parser::new();
        let clauses = parse_clauses(&mut parser, Input::from_bytes(b"1 -2 0\n\n3 0\n")).unwrap();
        assert_eq!(clauses, vector!(clause_from_dimacs(&[1, -2]), clause_from_dimacs(&[3])));
        assert_eq!(parser.maxvar, Variable::new(3));
    }

    #[test]
    fn compression_by_extension() {
        assert_eq!(compression_format_by_extension("a.drat.xz"), ("a.drat", XZ));
        assert_eq!(compression_format_by_extension("a.cnf"), ("a.cnf", ""));
    }

    #[test]
    fn missing_file() {
        let err = read_compressed_file("/nonexistent/formula.cnf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
