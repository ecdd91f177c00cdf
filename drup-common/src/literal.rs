//! Variable and literal representations

use crate::memory::Offset;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use static_assertions::const_assert;
use std::{fmt, mem::size_of, ops};

/// A propositional variable, identified by a positive integer.
///
/// Variable 0 does not exist in DIMACS; literals over it are rejected by
/// [`Literal::is_valid()`](struct.Literal.html#method.is_valid).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub struct Variable {
    pub index: u32,
}

impl Variable {
    /// The largest variable that fits a DIMACS integer.
    pub const MAX: Variable = Variable {
        index: i32::max_value() as u32,
    };
    /// Create a variable from its DIMACS number.
    pub fn new(index: u32) -> Variable {
        Variable { index }
    }
    /// The positive literal of this variable.
    pub fn literal(self) -> Literal {
        Literal::from_raw(self.index * 2)
    }
    /// The size of an array that can be indexed by variables up to and including `self`.
    pub fn array_size_for_variables(self) -> usize {
        self.as_offset() + 1
    }
    /// The size of an array that can be indexed by literals up to and including `self` or `-self`.
    pub fn array_size_for_literals(self) -> usize {
        2 * (self.as_offset() + 1)
    }
}

impl Offset for Variable {
    fn as_offset(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// A signed variable, stored as `2 * variable + sign`
///
/// Negative literals have the lowest bit set, so negation flips that bit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    pub encoding: u32,
}

impl Literal {
    /// Construct a literal from the usual signed DIMACS representation.
    ///
    /// This does not reject 0, see [`is_valid()`](#method.is_valid).
    pub fn new(value: i32) -> Literal {
        requires!(value != i32::min_value());
        Literal {
            encoding: value.unsigned_abs() * 2 + (value < 0) as u32,
        }
    }
    /// Construct a literal from its internal encoding.
    pub fn from_raw(encoding: u32) -> Literal {
        Literal { encoding }
    }
    /// The signed DIMACS representation.
    pub fn decode(self) -> i32 {
        let magnitude = self.variable().index as i32;
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
    pub fn variable(self) -> Variable {
        Variable::new(self.encoding / 2)
    }
    pub fn is_negative(self) -> bool {
        self.encoding & 1 != 0
    }
    /// Return true if this is the DIMACS clause terminator.
    pub fn is_zero(self) -> bool {
        self.encoding == 0
    }
    /// Return true if the literal refers to an actual variable (not 0).
    pub fn is_valid(self) -> bool {
        let variable = self.variable();
        variable.index >= 1 && variable <= Variable::MAX
    }
    /// Iterate over both polarities of all variables up to `maxvar`.
    pub fn all(maxvar: Variable) -> impl Iterator<Item = Literal> {
        (2..maxvar.array_size_for_literals() as u32).map(Literal::from_raw)
    }
}

impl Offset for Literal {
    fn as_offset(&self) -> usize {
        self.encoding as usize
    }
}

impl ops::Neg for Literal {
    type Output = Literal;
    fn neg(self) -> Literal {
        Literal {
            encoding: self.encoding ^ 1,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.decode())
    }
}

impl Serialize for Literal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.decode())
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        if value == 0 || value == i32::min_value() {
            return Err(de::Error::custom(format!("invalid literal {}", value)));
        }
        Ok(Literal::new(value))
    }
}

/// The highest variable occurring in some clauses.
pub fn max_variable<'a>(clauses: impl IntoIterator<Item = &'a [Literal]>) -> Variable {
    clauses
        .into_iter()
        .flat_map(|clause| clause.iter())
        .map(|literal| literal.variable())
        .max()
        .unwrap_or_default()
}

#[allow(dead_code)]
fn assert_primitive_sizes() {
    const_assert!(size_of::<Literal>() == 4);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_and_negation() {
        let literal = Literal::new(-3);
        assert_eq!(literal.encoding, 7);
        assert_eq!(literal.variable(), Variable::new(3));
        assert_eq!(-literal, Literal::new(3));
        assert_eq!((-literal).decode(), 3);
        assert_eq!(format!("{}", literal), "-3");
    }

    #[test]
    fn zero_is_not_a_valid_literal() {
        assert!(Literal::new(0).is_zero());
        assert!(!Literal::new(0).is_valid());
        assert!(Literal::new(1).is_valid());
        assert!(Literal::new(-1).is_valid());
        assert!(Literal::new(i32::max_value()).is_valid());
    }

    #[test]
    fn all_literals_skip_variable_zero() {
        let all: Vec<i32> = Literal::all(Variable::new(2)).map(Literal::decode).collect();
        assert_eq!(all, vec![1, -1, 2, -2]);
    }
}
