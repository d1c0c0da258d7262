//! Per-room load figures derived from a schedule.

use std::collections::BTreeMap;

use super::types::Schedule;
use crate::model::{RoomSet, SurgeryRequest, TuningParameters};

/// Load of a single room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomMetrics {
    /// Number of cases in the room.
    pub cases: usize,
    /// Sum of case durations.
    pub surgery_minutes: u64,
    /// Changeover between consecutive cases: `transition * (cases - 1)`.
    pub transition_minutes: u64,
    /// `surgery_minutes + transition_minutes`.
    pub usage_minutes: u64,
    /// Usage beyond regular capacity.
    pub regular_overtime_minutes: u64,
    /// Usage beyond regular plus overtime capacity.
    pub overtime_minutes: u64,
}

impl RoomMetrics {
    /// Computes the load of one room sequence.
    ///
    /// An empty or single-case room carries no transition time.
    pub fn of(requests: &[SurgeryRequest], params: &TuningParameters) -> Self {
        let cases = requests.len();
        let surgery_minutes: u64 = requests
            .iter()
            .map(|r| u64::from(r.duration_minutes()))
            .sum();
        let transition_minutes =
            cases.saturating_sub(1) as u64 * u64::from(params.transition_minutes);
        let usage_minutes = surgery_minutes + transition_minutes;

        Self {
            cases,
            surgery_minutes,
            transition_minutes,
            usage_minutes,
            regular_overtime_minutes: usage_minutes
                .saturating_sub(u64::from(params.max_regular_minutes)),
            overtime_minutes: usage_minutes.saturating_sub(u64::from(params.hard_limit_minutes())),
        }
    }
}

/// Summary statistics of a whole schedule, used to compare the
/// constructive starting point against the annealed result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleMetrics {
    /// Cached cost of the schedule at the time of measurement.
    pub cost: f64,
    pub total_surgery_minutes: u64,
    pub total_transition_minutes: u64,
    pub total_usage_minutes: u64,
    pub total_regular_overtime_minutes: u64,
    pub total_overtime_minutes: u64,
    /// `true` if no special-requirement case sits in a general room.
    pub special_requirement_met: bool,
    /// Per-room figures, ordered by room name.
    pub rooms: BTreeMap<String, RoomMetrics>,
}

impl ScheduleMetrics {
    /// Measures `schedule` over every room in `rooms`.
    ///
    /// Rooms missing from the schedule are reported as empty.
    pub fn compute(schedule: &Schedule, rooms: &RoomSet, params: &TuningParameters) -> Self {
        let mut metrics = Self {
            cost: schedule.cost(),
            total_surgery_minutes: 0,
            total_transition_minutes: 0,
            total_usage_minutes: 0,
            total_regular_overtime_minutes: 0,
            total_overtime_minutes: 0,
            special_requirement_met: true,
            rooms: BTreeMap::new(),
        };

        for room in rooms.all() {
            let seq = schedule.room(room).unwrap_or(&[]);
            if !rooms.is_special(room) && seq.iter().any(SurgeryRequest::requires_special_room) {
                metrics.special_requirement_met = false;
            }

            let m = RoomMetrics::of(seq, params);
            metrics.total_surgery_minutes += m.surgery_minutes;
            metrics.total_transition_minutes += m.transition_minutes;
            metrics.total_usage_minutes += m.usage_minutes;
            metrics.total_regular_overtime_minutes += m.regular_overtime_minutes;
            metrics.total_overtime_minutes += m.overtime_minutes;
            metrics.rooms.insert(room.clone(), m);
        }

        metrics
    }
}
