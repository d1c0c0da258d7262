//! Core trait for self-tuning Simulated Annealing.

use rand::Rng;

/// Temperature state handed to neighbor generation.
///
/// Problems use it to adapt the move size to the phase of the search:
/// coarse moves while hot, fine moves while cold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    /// Temperature the move is generated at.
    pub current: f64,
    /// Upper end of the normalization range.
    pub initial: f64,
    /// Lower end of the normalization range (the stopping temperature).
    pub final_: f64,
}

impl Temperature {
    pub fn new(current: f64, initial: f64, final_: f64) -> Self {
        Self {
            current,
            initial,
            final_,
        }
    }

    /// Position of `current` in `[final_, initial]`, mapped to `[0, 1]`
    /// for temperatures inside that range.
    ///
    /// Returns 0 when the range is empty.
    pub fn normalized(&self) -> f64 {
        let span = self.initial - self.final_;
        if span <= 0.0 {
            return 0.0;
        }
        (self.current - self.final_) / span
    }
}

/// Defines a problem for the self-tuning annealer.
///
/// Unlike a plain SA problem, the initial solution is built by a
/// deterministic constructive heuristic, the evaluation caches its result
/// on the solution, and neighbor generation sees the temperature so it
/// can change strategy between phases.
///
/// # Minimization
///
/// The annealer minimizes cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_surgery::sa::{AnnealProblem, Temperature};
///
/// struct Parabola;
///
/// impl AnnealProblem for Parabola {
///     type Solution = f64;
///
///     fn initial_solution(&self) -> f64 {
///         8.0
///     }
///
///     fn evaluate(&self, x: &mut f64) -> f64 {
///         *x * *x
///     }
///
///     fn neighbor<R: Rng>(&self, x: &f64, t: &Temperature, rng: &mut R) -> f64 {
///         let step = if t.normalized() > 0.5 { 2.0 } else { 0.2 };
///         x + rng.random_range(-step..step)
///     }
///
///     fn size(&self) -> usize {
///         10
///     }
/// }
/// ```
pub trait AnnealProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Builds the starting solution.
    fn initial_solution(&self) -> Self::Solution;

    /// Computes the cost of a solution (lower is better), recording it on
    /// the solution if the representation caches cost.
    fn evaluate(&self, solution: &mut Self::Solution) -> f64;

    /// Returns a solution one move away from `solution`.
    ///
    /// Must not modify `solution`. Returning an unchanged copy is allowed
    /// when no acceptable move exists.
    fn neighbor<R: Rng>(
        &self,
        solution: &Self::Solution,
        temperature: &Temperature,
        rng: &mut R,
    ) -> Self::Solution;

    /// Instance size driving the adaptive cooling rate and the number of
    /// iterations per temperature step. Zero means there is nothing to
    /// optimize.
    fn size(&self) -> usize;
}
