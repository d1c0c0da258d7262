//! End-to-end scheduling: construct, anneal, report.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::warn;

use super::problem::SurgeryProblem;
use crate::data::DataSource;
use crate::error::ScheduleError;
use crate::model::{RoomSet, SurgeryRequest, TuningParameters};
use crate::sa::{AnnealConfig, AnnealResult, AnnealRunner};
use crate::schedule::{Schedule, ScheduleMetrics};

/// Outcome of a scheduling run: the constructive schedule, the best
/// schedule found, and the annealing statistics.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Raw annealing result; `initial` and `best` are both evaluated.
    pub result: AnnealResult<Schedule>,
    pub initial_metrics: ScheduleMetrics,
    pub best_metrics: ScheduleMetrics,
}

impl ScheduleOutcome {
    pub fn initial(&self) -> &Schedule {
        &self.result.initial
    }

    pub fn best(&self) -> &Schedule {
        &self.result.best
    }

    /// Cost reduction from the initial to the best schedule.
    pub fn improvement(&self) -> f64 {
        self.result.initial_cost - self.result.best_cost
    }
}

/// Assigns surgery requests to operating rooms by simulated annealing.
///
/// # Examples
///
/// ```
/// use u_surgery::model::{RoomSet, SurgeryRequest, TuningParameters};
/// use u_surgery::sa::AnnealConfig;
/// use u_surgery::surgery::Scheduler;
///
/// let rooms = RoomSet::new(["OR1", "OR2"], Vec::<String>::new()).unwrap();
/// let requests = vec![
///     SurgeryRequest::new("A1", "OR1", 480, false),
///     SurgeryRequest::new("A2", "OR1", 60, false),
///     SurgeryRequest::new("A3", "OR1", 90, false),
///     SurgeryRequest::new("A4", "OR1", 30, false),
/// ];
/// let scheduler = Scheduler::new(
///     rooms,
///     requests,
///     TuningParameters::default(),
///     AnnealConfig::default().with_seed(42),
/// )
/// .unwrap();
///
/// let outcome = scheduler.schedule().unwrap().expect("requests present");
/// assert!(outcome.result.best_cost <= outcome.result.initial_cost);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    problem: SurgeryProblem,
    config: AnnealConfig,
}

impl Scheduler {
    /// Builds a scheduler, validating both the instance and the config.
    pub fn new(
        rooms: RoomSet,
        requests: Vec<SurgeryRequest>,
        params: TuningParameters,
        config: AnnealConfig,
    ) -> Result<Self, ScheduleError> {
        config.validate()?;
        let problem = SurgeryProblem::new(rooms, requests, params)?
            .with_high_phase_threshold(config.high_phase_threshold)
            .with_max_attempts(config.max_neighbor_attempts);
        Ok(Self { problem, config })
    }

    /// Builds a scheduler from a data-access collaborator.
    pub fn from_source<D: DataSource + ?Sized>(
        source: &D,
        config: AnnealConfig,
    ) -> Result<Self, ScheduleError> {
        let rooms = RoomSet::new(
            source.all_rooms().iter().cloned(),
            source.special_rooms().iter().cloned(),
        )?;
        Self::new(
            rooms,
            source.surgery_requests().to_vec(),
            source.tuning_parameters(),
            config,
        )
    }

    pub fn problem(&self) -> &SurgeryProblem {
        &self.problem
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Runs the search.
    ///
    /// Returns `Ok(None)` when there are no requests to schedule.
    pub fn schedule(&self) -> Result<Option<ScheduleOutcome>, ScheduleError> {
        self.schedule_with_cancel(None)
    }

    /// Runs the search with an optional cancellation flag, checked
    /// between temperature steps.
    pub fn schedule_with_cancel(
        &self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Option<ScheduleOutcome>, ScheduleError> {
        self.warn_if_degenerate();
        let result = AnnealRunner::run_with_cancel(&self.problem, &self.config, cancel)?;
        Ok(result.map(|result| self.outcome(result)))
    }

    /// Runs `restarts` independently seeded searches in parallel and keeps
    /// the best.
    #[cfg(feature = "parallel")]
    pub fn schedule_restarts(
        &self,
        restarts: usize,
    ) -> Result<Option<ScheduleOutcome>, ScheduleError> {
        self.warn_if_degenerate();
        let result = AnnealRunner::run_restarts(&self.problem, &self.config, restarts)?;
        Ok(result.map(|result| self.outcome(result)))
    }

    fn warn_if_degenerate(&self) {
        if self.problem.rooms().len() < 2 && !self.problem.requests().is_empty() {
            warn!(
                rooms = self.problem.rooms().len(),
                "fewer than two rooms, no relocation is possible and the initial schedule is final"
            );
        }
    }

    fn outcome(&self, result: AnnealResult<Schedule>) -> ScheduleOutcome {
        debug_assert!(self.problem.is_valid(&result.best));
        let rooms = self.problem.rooms();
        let params = self.problem.params();
        ScheduleOutcome {
            initial_metrics: ScheduleMetrics::compute(&result.initial, rooms, params),
            best_metrics: ScheduleMetrics::compute(&result.best, rooms, params),
            result,
        }
    }
}
