//! # Algorithms
pub mod revised_simplex;

/// What the engine reports after advancing.
///
/// This is determined per call; once a terminal value is returned, the engine keeps returning it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IterationStatus {
    /// The iteration is not done; keep advancing.
    Continue,
    /// All reduced costs are nonnegative: the current basis is optimal for the active objective.
    ///
    /// During the first phase this only means feasibility of the phase-one problem; the driver
    /// still has to inspect the objective value to distinguish a feasible program from an
    /// infeasible one.
    OptimalForPhase,
    /// The first phase ended with a strictly positive objective: no feasible solution exists.
    ///
    /// Never produced by the engine itself; drivers derive it from `OptimalForPhase` and the
    /// phase-one objective value.
    Infeasible,
    /// The objective can be improved without bound in the chosen direction.
    Unbounded,
}
