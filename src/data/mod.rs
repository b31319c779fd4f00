//! # Data structures
//!
//! Linear algebra primitives and the vocabulary types describing a linear program.
pub mod linear_algebra;
pub mod linear_program;
