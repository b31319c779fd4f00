//! # A steppable revised simplex solver
//!
//! Small dense linear programs are solved with the revised Simplex method. The algorithm is
//! exposed as an explicit state machine: a driver advances it either one discrete step at a time,
//! inspecting intermediate state and optionally overriding pivot choices between steps, or one
//! full iteration at a time.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;

#[cfg(test)]
mod tests;
