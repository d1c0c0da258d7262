//! Self-tuning SA execution loop.
//!
//! # Algorithm
//!
//! 1. Build and evaluate the initial solution; it seeds both `current`
//!    and `best` as independent copies
//! 2. Calibrate the starting temperature by bisection
//! 3. While `T > final_temperature`:
//!    a. Run `round(beta * n)` Metropolis steps from `current`
//!    b. Copy `current` into `best` whenever it is strictly better
//!    c. Cool: `T *= (alpha * sqrt(n) - 1) / (alpha * sqrt(n))`
//! 4. Report the initial and the best solution

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::acceptance::metropolis;
use super::calibrate::find_initial_temperature;
use super::config::AnnealConfig;
use super::types::{AnnealProblem, Temperature};
use crate::error::ConfigError;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<S: Clone> {
    /// The constructive starting solution, kept for comparison.
    pub initial: S,

    /// Cost of the starting solution.
    pub initial_cost: f64,

    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Calibrated starting temperature.
    pub initial_temperature: f64,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Total number of neighbor evaluations in the main loop.
    pub iterations: usize,

    /// Number of cooling steps taken.
    pub temperature_steps: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Seed the run used, so it can be replayed.
    pub seed: u64,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost at the start and after every temperature step.
    pub cost_history: Vec<f64>,
}

impl<S: Clone> AnnealResult<S> {
    /// `true` when the search never improved on the starting solution.
    pub fn is_stalled(&self) -> bool {
        self.best_cost >= self.initial_cost
    }
}

/// Executes self-tuning Simulated Annealing.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the annealer.
    ///
    /// Returns `Ok(None)` when the problem has size zero, which is
    /// distinct from a run that found a zero-cost solution.
    pub fn run<P: AnnealProblem>(
        problem: &P,
        config: &AnnealConfig,
    ) -> Result<Option<AnnealResult<P::Solution>>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the annealer with an optional cancellation flag, checked
    /// between temperature steps.
    pub fn run_with_cancel<P: AnnealProblem>(
        problem: &P,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Option<AnnealResult<P::Solution>>, ConfigError> {
        config.validate()?;

        let n = problem.size();
        if n == 0 {
            info!("nothing to schedule, skipping annealing");
            return Ok(None);
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        // Initialize
        let mut initial = problem.initial_solution();
        let initial_cost = problem.evaluate(&mut initial);
        let mut current = initial.clone();
        let mut current_cost = initial_cost;
        let mut best = initial.clone();
        let mut best_cost = initial_cost;

        let initial_temperature =
            find_initial_temperature(problem, &current, current_cost, config, &mut rng);
        let mut temperature = initial_temperature;

        let cooling_rate = config.cooling_rate(n);
        let inner_iters = config.iterations_per_temperature(n);

        info!(
            seed,
            size = n,
            initial_cost,
            initial_temperature,
            cooling_rate,
            inner_iters,
            "starting annealing"
        );

        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut temperature_steps = 0usize;
        let mut cancelled = false;
        let mut cost_history = vec![best_cost];

        while temperature > config.final_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let phase = Temperature::new(
                temperature,
                initial_temperature,
                config.final_temperature,
            );

            for _ in 0..inner_iters {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    break;
                }

                let mut neighbor = problem.neighbor(&current, &phase, &mut rng);
                let neighbor_cost = problem.evaluate(&mut neighbor);

                if metropolis(current_cost, neighbor_cost, temperature, &mut rng) {
                    if neighbor_cost < current_cost {
                        improving_moves += 1;
                    }
                    current = neighbor;
                    current_cost = neighbor_cost;
                    accepted_moves += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }

                total_iterations += 1;
            }

            // Check hard iteration limit
            if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                break;
            }

            temperature *= cooling_rate;
            temperature_steps += 1;
            cost_history.push(best_cost);

            debug!(
                step = temperature_steps,
                temperature, current_cost, best_cost, "cooled"
            );
        }

        info!(
            best_cost,
            iterations = total_iterations,
            accepted_moves,
            improving_moves,
            temperature_steps,
            cancelled,
            "annealing finished"
        );

        Ok(Some(AnnealResult {
            initial,
            initial_cost,
            best,
            best_cost,
            initial_temperature,
            final_temperature: temperature,
            iterations: total_iterations,
            temperature_steps,
            accepted_moves,
            improving_moves,
            seed,
            cancelled,
            cost_history,
        }))
    }

    /// Runs `restarts` independently seeded searches in parallel and
    /// keeps the one with the lowest best cost.
    ///
    /// Restart `i` uses seed `config.seed + i` (wrapping), so the whole
    /// batch is reproducible when `config.seed` is set.
    #[cfg(feature = "parallel")]
    pub fn run_restarts<P: AnnealProblem>(
        problem: &P,
        config: &AnnealConfig,
        restarts: usize,
    ) -> Result<Option<AnnealResult<P::Solution>>, ConfigError> {
        use rayon::prelude::*;

        config.validate()?;
        let base = config.seed.unwrap_or_else(rand::random);

        let results = (0..restarts.max(1) as u64)
            .into_par_iter()
            .map(|i| {
                let config = config.clone().with_seed(base.wrapping_add(i));
                Self::run(problem, &config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results.into_iter().flatten().min_by(|a, b| {
            a.best_cost
                .partial_cmp(&b.best_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        }))
    }
}
