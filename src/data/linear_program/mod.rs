//! # Describing linear programs
pub mod elements;
