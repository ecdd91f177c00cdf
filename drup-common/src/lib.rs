//! Internal modules for drup

pub mod config;
#[macro_use]
pub mod macros;
pub mod output;
#[macro_use]
pub mod memory;
pub mod literal;
pub mod clause;
pub mod assignment;
pub mod hashtable;
pub mod clausedatabase;
pub mod input;
pub mod parser;
