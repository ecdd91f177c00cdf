//! A growable array with optional bounds checks

use crate::config;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    iter::FromIterator,
    ops::{Deref, DerefMut, Index, IndexMut, Range},
    slice,
};

/// A `Vec` that grows by a factor of 1.5 and skips bounds checks unless
/// `config::ENABLE_BOUNDS_CHECKING` is set.
#[derive(Debug, Clone, Eq, Hash)]
pub struct Vector<T>(Vec<T>);

impl<T> Vector<T> {
    pub fn from_vec(vec: Vec<T>) -> Vector<T> {
        Vector(vec)
    }
    pub fn new() -> Vector<T> {
        Vector(Vec::new())
    }
    pub fn with_capacity(capacity: usize) -> Vector<T> {
        Vector(Vec::with_capacity(capacity))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }
    pub fn iter(&self) -> slice::Iter<T> {
        self.0.iter()
    }
    pub fn truncate(&mut self, new_length: usize) {
        self.0.truncate(new_length)
    }
    pub fn push(&mut self, value: T) {
        let capacity = self.0.capacity();
        if self.len() == capacity {
            let grown = if capacity == 0 {
                4
            } else {
                capacity + capacity / 2 + 1
            };
            self.0.reserve_exact(grown - capacity)
        }
        self.0.push(value)
    }
    pub fn swap_remove(&mut self, index: usize) -> T {
        assert_in_bounds(0..self.len(), index);
        self.0.swap_remove(index)
    }
    pub fn remove(&mut self, index: usize) -> T {
        assert_in_bounds(0..self.len(), index);
        self.0.remove(index)
    }
}

/// Like `vec!`, for `Vector`.
#[macro_export]
macro_rules! vector {
    ($($x:expr),*) => (
        {
            #[allow(unused_mut)]
            let mut result = $crate::memory::Vector::new();
            $(
                result.push($x);
            )*
            result
        }
    );
    ($($x:expr,)*) => ($crate::vector!($($x),*))
}

/// An empty vector, for any element type.
impl<T> Default for Vector<T> {
    fn default() -> Vector<T> {
        Vector::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

/// Check if an offset is contained in a half-open range.
/// # Panics
/// Panic if bounds checking is enabled and the index is out of the given bounds.
pub fn assert_in_bounds(bounds: Range<usize>, offset: usize) {
    if config::ENABLE_BOUNDS_CHECKING {
        assert!(
            bounds.contains(&offset),
            "array index out of bounds: {} (range is {:?})",
            offset,
            bounds,
        );
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        assert_in_bounds(0..self.len(), index);
        unsafe { self.0.get_unchecked(index) }
    }
}

impl<T> Index<Range<usize>> for Vector<T> {
    type Output = [T];
    #[allow(clippy::range_plus_one)]
    fn index(&self, index: Range<usize>) -> &Self::Output {
        assert_in_bounds(0..self.len() + 1, index.start);
        assert_in_bounds(0..self.len() + 1, index.end);
        &self.0[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert_in_bounds(0..self.len(), index);
        unsafe { self.0.get_unchecked_mut(index) }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && (0..self.len()).all(|i| self[i] == other[i])
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = <Vec<T> as IntoIterator>::IntoIter;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Vector<T> {
        Vector(Vec::from_iter(iter))
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Serialize> Serialize for Vector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Vector<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::deserialize(deserializer).map(Vector::from_vec)
    }
}
