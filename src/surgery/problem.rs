//! Operating-room assignment as an annealing problem.

use std::collections::HashSet;

use rand::Rng;

use crate::error::ScheduleError;
use crate::model::{RoomSet, SurgeryRequest, TuningParameters};
use crate::sa::{AnnealConfig, AnnealProblem, Temperature};
use crate::schedule::{RoomMetrics, Schedule};

/// One scheduling horizon: the requests to place, the rooms they can go
/// to, and the capacity settings that price each room's load.
#[derive(Debug, Clone)]
pub struct SurgeryProblem {
    pub(super) rooms: RoomSet,
    pub(super) requests: Vec<SurgeryRequest>,
    pub(super) params: TuningParameters,
    pub(super) high_phase_threshold: f64,
    pub(super) max_attempts: usize,
}

impl SurgeryProblem {
    /// Builds a problem instance.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::NoRooms`] if `rooms` is empty
    /// - [`ScheduleError::DuplicateRequest`] if two requests share an id
    /// - [`ScheduleError::UnschedulableSpecialRequests`] if a request needs
    ///   a special room and none exists
    ///
    /// Move settings start from [`AnnealConfig::default`].
    pub fn new(
        rooms: RoomSet,
        requests: Vec<SurgeryRequest>,
        params: TuningParameters,
    ) -> Result<Self, ScheduleError> {
        if rooms.is_empty() {
            return Err(ScheduleError::NoRooms);
        }

        let mut seen = HashSet::with_capacity(requests.len());
        if let Some(dup) = requests.iter().find(|r| !seen.insert(r.id())) {
            return Err(ScheduleError::DuplicateRequest(dup.id().to_string()));
        }

        let special = requests
            .iter()
            .filter(|r| r.requires_special_room())
            .count();

        if special > 0 && rooms.special().is_empty() {
            return Err(ScheduleError::UnschedulableSpecialRequests { count: special });
        }

        let defaults = AnnealConfig::default();
        Ok(Self {
            rooms,
            requests,
            params,
            high_phase_threshold: defaults.high_phase_threshold,
            max_attempts: defaults.max_neighbor_attempts,
        })
    }

    /// Sets the normalized temperature above which moves relocate the
    /// longest case of a room instead of the shortest.
    pub fn with_high_phase_threshold(mut self, threshold: f64) -> Self {
        self.high_phase_threshold = threshold;
        self
    }

    /// Sets how many random moves are tried before a neighbor falls back
    /// to an unchanged copy.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.rooms
    }

    pub fn requests(&self) -> &[SurgeryRequest] {
        &self.requests
    }

    pub fn params(&self) -> &TuningParameters {
        &self.params
    }

    /// Computes the cost of `schedule` without touching its cached value.
    ///
    /// Per room, usage is the case durations plus the changeovers between
    /// them. The cost adds up, over all rooms:
    ///
    /// - regular overtime, `max(0, usage - max_regular)`
    /// - twice the hard overtime, `max(0, usage - (max_regular + max_overtime))`
    /// - the absolute deviation of usage from the mean usage
    pub fn cost(&self, schedule: &Schedule) -> f64 {
        let loads: Vec<RoomMetrics> = self
            .rooms
            .all()
            .iter()
            .map(|room| RoomMetrics::of(schedule.room(room).unwrap_or(&[]), &self.params))
            .collect();

        let mut regular_overtime = 0.0;
        let mut overtime = 0.0;
        let mut total_usage = 0.0;
        for load in &loads {
            regular_overtime += load.regular_overtime_minutes as f64;
            overtime += load.overtime_minutes as f64;
            total_usage += load.usage_minutes as f64;
        }

        let avg_usage = total_usage / loads.len().max(1) as f64;
        let balance: f64 = loads
            .iter()
            .map(|load| (load.usage_minutes as f64 - avg_usage).abs())
            .sum();

        regular_overtime + 2.0 * overtime + balance
    }

    /// Computes the cost of `schedule` and caches it on the schedule.
    pub fn evaluate(&self, schedule: &mut Schedule) -> f64 {
        let cost = self.cost(schedule);
        schedule.set_cost(cost);
        cost
    }

    /// `true` iff no special-requirement request sits outside a special room.
    pub fn is_valid(&self, schedule: &Schedule) -> bool {
        schedule.rooms().iter().all(|(room, seq)| {
            self.rooms.is_special(room) || !seq.iter().any(SurgeryRequest::requires_special_room)
        })
    }
}

impl AnnealProblem for SurgeryProblem {
    type Solution = Schedule;

    fn initial_solution(&self) -> Schedule {
        self.initial_schedule()
    }

    fn evaluate(&self, schedule: &mut Schedule) -> f64 {
        SurgeryProblem::evaluate(self, schedule)
    }

    fn neighbor<R: Rng>(
        &self,
        schedule: &Schedule,
        temperature: &Temperature,
        rng: &mut R,
    ) -> Schedule {
        self.perturb(schedule, temperature, rng)
    }

    /// Requests times rooms.
    fn size(&self) -> usize {
        self.requests.len() * self.rooms.len()
    }
}
