//! # Building blocks to describe linear programs.
use enum_map::Enum;

/// A `Constraint` is a type of (in)equality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintType {
    Less,
    Greater,
    Equal,
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Minimize
    }
}

/// What role a column of the augmented coefficient matrix plays.
///
/// Assigned once, when the problem is initialized, and never changed afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Enum)]
pub enum VariableKind {
    /// A decision variable of the original problem.
    Structural,
    /// A slack or surplus column added to turn an inequality into an equality.
    Slack,
    /// A synthetic column added solely to obtain an initial feasible basis.
    ///
    /// Must be driven to zero during the first phase and removed before the second.
    Artificial,
}
