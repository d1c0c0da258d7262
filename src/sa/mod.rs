//! Self-tuning Simulated Annealing.
//!
//! A single-solution trajectory metaheuristic that accepts worsening
//! moves with a probability that decreases with temperature. This
//! variant tunes itself to the instance:
//!
//! - the starting temperature is calibrated by bisection to a target
//!   acceptance rate,
//! - the cooling factor and the moves per temperature grow with the
//!   instance size,
//! - neighbor generation sees the normalized temperature and can switch
//!   between coarse and fine moves.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod acceptance;
mod calibrate;
mod config;
mod runner;
mod types;

pub use acceptance::{acceptance_probability, metropolis};
pub use calibrate::{acceptance_rate, find_initial_temperature};
pub use config::AnnealConfig;
pub use runner::{AnnealResult, AnnealRunner};
pub use types::{AnnealProblem, Temperature};
