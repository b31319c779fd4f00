//! # Shared problem fixtures for tests that look inside the crate.
//!
//! Convention for function names:
//!
//! * `const COST`
//! * `fn engine()` — the problem described, constraints and objective set
//! * `fn initialized_engine()` — same, after `initialize`
