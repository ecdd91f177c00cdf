//! General purpose data structures
//!
//! These are `std::vec::Vec` wrappers that index by a dedicated type and can
//! skip bounds checks in release builds.
//!
//! - `Array<I, T>` requires to specify a type that is used for indexing, so
//!   a variable can never index a map over literals by accident.
//! - `Vector<T>` grows by a factor of 1.5 instead of 2.

mod array;
#[macro_use]
mod vector;

use std::convert::TryFrom;

pub use crate::memory::{
    array::Array,
    vector::{assert_in_bounds, Vector},
};

/// Trait for types that can be used as an array index.
pub trait Offset {
    fn as_offset(&self) -> usize;
}

impl Offset for usize {
    fn as_offset(&self) -> usize {
        *self
    }
}

impl Offset for u32 {
    fn as_offset(&self) -> usize {
        requires!(usize::try_from(*self).is_ok());
        *self as usize
    }
}
