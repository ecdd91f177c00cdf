//! Errors that keep a proof from being checked at all
//!
//! A proof that is checked and found wrong is not an error, see
//! [`Outcome::Invalid`](../witness/enum.Outcome.html).

use std::{error, fmt, io};

/// A literal that cannot be represented, found before any checking.
///
/// Positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// A literal in the given premise clause.
    Premise { clause: usize, literal: i32 },
    /// A literal in the given proof step.
    ProofStep { step: usize, literal: i32 },
    /// A literal in a single clause passed to `check_step`.
    Lemma { literal: i32 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::Premise { clause, literal } => {
                write!(f, "invalid literal {} in premise clause {}", literal, clause)
            }
            InputError::ProofStep { step, literal } => {
                write!(f, "invalid literal {} in proof step {}", literal, step)
            }
            InputError::Lemma { literal } => write!(f, "invalid literal {} in lemma", literal),
        }
    }
}

impl error::Error for InputError {}

/// Failure to read the inputs of a check.
///
/// The wrapped `io::Error` has kind `InvalidData` for malformed text and
/// the kind reported by the operating system for unreadable files.
#[derive(Debug)]
pub enum Error {
    /// The formula could not be read or parsed.
    Formula(io::Error),
    /// The proof (or lemma list) could not be read or parsed.
    Proof(io::Error),
}

impl Error {
    /// The underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Error::Formula(err) | Error::Proof(err) => err,
        }
    }
    /// Return true if the input was readable but malformed.
    pub fn is_parse_error(&self) -> bool {
        self.io_error().kind() == io::ErrorKind::InvalidData
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Formula(err) => write!(f, "failed to read formula: {}", err),
            Error::Proof(err) => write!(f, "failed to read proof: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.io_error())
    }
}
