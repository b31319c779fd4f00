//! # Error reporting for model building and pivot overrides
//!
//! Misuse of the building API is rejected with a value instead of being left undefined: the
//! engine checks dimensions and call order and refuses to continue on a mismatch.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::algorithm::revised_simplex::iteration::Step;

/// The model was built or manipulated in a way that contradicts its declared shape.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ModelError {
    /// A coefficient slice had a different length than the declared number of variables.
    CoefficientCount {
        /// Declared number of structural variables.
        expected: usize,
        /// Length of the slice that was provided.
        actual: usize,
    },
    /// More rows were added than were declared at construction.
    TooManyConstraints {
        /// Declared number of constraints.
        declared: usize,
    },
    /// Initialization was requested before all declared rows were added.
    MissingConstraints {
        /// Declared number of constraints.
        declared: usize,
        /// Number of rows added so far.
        taken: usize,
    },
    /// The problem was already initialized; rows and objective are immutable now.
    AlreadyInitialized,
    /// The operation needs an initialized problem.
    NotInitialized,
    /// A pivot override arrived outside the step that accepts it.
    OverrideWindowClosed {
        /// The step the engine was at when the override arrived.
        step: Step,
    },
    /// The entering override did not point at a nonbasic position with negative reduced cost.
    InvalidEntering {
        /// The rejected position into the nonbasic sequence.
        position: usize,
    },
    /// The leaving override did not point at a row that attains the minimum ratio.
    InvalidLeaving {
        /// The rejected position into the basic sequence.
        position: usize,
    },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::CoefficientCount { expected, actual } => write!(
                f, "expected {} coefficients, got {}", expected, actual,
            ),
            ModelError::TooManyConstraints { declared } => write!(
                f, "all {} declared constraints were already added", declared,
            ),
            ModelError::MissingConstraints { declared, taken } => write!(
                f, "only {} of {} declared constraints were added", taken, declared,
            ),
            ModelError::AlreadyInitialized => write!(f, "the problem was already initialized"),
            ModelError::NotInitialized => write!(f, "the problem was not yet initialized"),
            ModelError::OverrideWindowClosed { step } => write!(
                f, "no pivot override is accepted at step {:?}", step,
            ),
            ModelError::InvalidEntering { position } => write!(
                f, "nonbasic position {} is not a valid entering choice", position,
            ),
            ModelError::InvalidLeaving { position } => write!(
                f, "basic position {} is not a valid leaving choice", position,
            ),
        }
    }
}

impl Error for ModelError {
}
