//! # The iteration state machine
//!
//! One revised Simplex iteration is split into twelve observable steps. A driver advances the
//! engine either one step at a time with [`RevisedSimplex::step`], inspecting state and
//! optionally overriding pivot choices at the two pause points, or one full iteration at a time
//! with [`RevisedSimplex::iterate`], which runs all steps atomically and resolves the pause
//! points with the automatic choice.
use log::trace;

use crate::algorithm::IterationStatus;
use crate::algorithm::revised_simplex::RevisedSimplex;
use crate::data::linear_algebra::Scalar;
use crate::data::linear_algebra::solver::SingularMatrix;

/// The phases a single Simplex iteration is made of, in execution order.
///
/// Transitions only go forward, except for the wrap-around from [`Step::UpdateSolution`] back to
/// [`Step::RebuildBasis`] that starts the next iteration, and the jump to a terminal status when
/// optimality or unboundedness is detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// Rebuild the basis matrix and its transpose from the current basic variables.
    RebuildBasis,
    /// Solve `Bᵀ π = c_B` for the simplex multipliers.
    ComputeMultipliers,
    /// Compute the reduced cost of every nonbasic variable.
    PriceNonBasic,
    /// The basis is optimal iff no reduced cost is negative.
    OptimalityTest,
    /// Automatically choose the entering variable: the most negative reduced cost.
    SelectEntering,
    /// Pause point: the entering choice may be overridden before it is consumed.
    ConfirmEntering,
    /// Solve `B y = a_j` for the update direction of the entering column.
    ComputeDirection,
    /// The problem is unbounded iff no entry of the direction is positive.
    UnboundednessTest,
    /// Minimum-ratio test over the rows with a positive direction entry.
    RatioTest,
    /// Pause point, reached only on a ratio tie: the leaving choice may be overridden.
    BreakTie,
    /// The leaving choice is final.
    ConfirmLeaving,
    /// Apply the pivot and wrap around to the next iteration.
    UpdateSolution,
}

impl Step {
    /// Position of this step in the 0 through 11 numbering of an iteration.
    pub fn number(self) -> u8 {
        match self {
            Step::RebuildBasis => 0,
            Step::ComputeMultipliers => 1,
            Step::PriceNonBasic => 2,
            Step::OptimalityTest => 3,
            Step::SelectEntering => 4,
            Step::ConfirmEntering => 5,
            Step::ComputeDirection => 6,
            Step::UnboundednessTest => 7,
            Step::RatioTest => 8,
            Step::BreakTie => 9,
            Step::ConfirmLeaving => 10,
            Step::UpdateSolution => 11,
        }
    }
}

impl<F: Scalar> RevisedSimplex<F> {
    /// Advance the state machine by exactly one step.
    ///
    /// The problem must have been initialized. Once a terminal status was reached, further calls
    /// return that status without changing any state.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` when the basis matrix could not be inverted while computing the
    /// multipliers or the update direction. This indicates a numerically degenerate basis; the
    /// engine is left at the failing step.
    pub fn step(&mut self) -> Result<IterationStatus, SingularMatrix> {
        debug_assert!(self.initialized);

        if let Some(status) = self.finished {
            return Ok(status);
        }

        let status = match self.current_step {
            Step::RebuildBasis => {
                self.nr_iterations += 1;
                self.rebuild_basis();
                self.current_step = Step::ComputeMultipliers;
                IterationStatus::Continue
            },
            Step::ComputeMultipliers => {
                self.compute_multipliers()?;
                self.current_step = Step::PriceNonBasic;
                IterationStatus::Continue
            },
            Step::PriceNonBasic => {
                self.price_nonbasic();
                self.current_step = Step::OptimalityTest;
                IterationStatus::Continue
            },
            Step::OptimalityTest => {
                if self.is_optimal() {
                    trace!("optimal for the active objective after {} iterations", self.nr_iterations);
                    self.finished = Some(IterationStatus::OptimalForPhase);
                    IterationStatus::OptimalForPhase
                } else {
                    self.current_step = Step::SelectEntering;
                    IterationStatus::Continue
                }
            },
            Step::SelectEntering => {
                self.entering = self.select_entering();
                self.current_step = Step::ConfirmEntering;
                IterationStatus::Continue
            },
            Step::ConfirmEntering => {
                self.current_step = Step::ComputeDirection;
                IterationStatus::Continue
            },
            Step::ComputeDirection => {
                self.compute_direction()?;
                self.current_step = Step::UnboundednessTest;
                IterationStatus::Continue
            },
            Step::UnboundednessTest => {
                if self.is_unbounded() {
                    trace!("unbounded in the direction of column {}", self.nonbasic[self.entering]);
                    self.finished = Some(IterationStatus::Unbounded);
                    IterationStatus::Unbounded
                } else {
                    self.current_step = Step::RatioTest;
                    IterationStatus::Continue
                }
            },
            Step::RatioTest => {
                self.ratio_test();
                self.current_step = if self.nr_min_ratio > 1 {
                    Step::BreakTie
                } else {
                    Step::ConfirmLeaving
                };
                IterationStatus::Continue
            },
            Step::BreakTie => {
                // Without an external override, the automatic choice from the ratio test stands.
                self.current_step = Step::ConfirmLeaving;
                IterationStatus::Continue
            },
            Step::ConfirmLeaving => {
                self.current_step = Step::UpdateSolution;
                IterationStatus::Continue
            },
            Step::UpdateSolution => {
                self.update_solution();
                self.current_step = Step::RebuildBasis;
                IterationStatus::Continue
            },
        };

        Ok(status)
    }

    /// Run the remainder of the current iteration atomically.
    ///
    /// Pause points are passed through with the automatic choice. Returns when the next
    /// iteration is about to start, or with the terminal status.
    ///
    /// # Errors
    ///
    /// `SingularMatrix`, as for [`RevisedSimplex::step`].
    pub fn iterate(&mut self) -> Result<IterationStatus, SingularMatrix> {
        loop {
            let status = self.step()?;
            if status != IterationStatus::Continue {
                return Ok(status);
            }
            if self.current_step == Step::RebuildBasis {
                return Ok(IterationStatus::Continue);
            }
        }
    }
}
