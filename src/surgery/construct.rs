//! Greedy constructive heuristic for the starting schedule.

use super::problem::SurgeryProblem;
use crate::schedule::Schedule;

impl SurgeryProblem {
    /// Builds the starting schedule deterministically from input order.
    ///
    /// Special-requirement requests are dealt round-robin over the special
    /// rooms, then all remaining requests round-robin over the general
    /// rooms, or over every room when all rooms are special. The cached
    /// cost is left at 0; evaluate before use.
    pub fn initial_schedule(&self) -> Schedule {
        let mut schedule = Schedule::empty(&self.rooms);

        let special: Vec<&str> = self.rooms.special().iter().map(String::as_str).collect();
        let mut general = self.rooms.general();
        if general.is_empty() {
            general = self.rooms.all().iter().map(String::as_str).collect();
        }

        // Unreachable for a validated problem; kept so the heuristic never
        // divides by zero.
        if !special.is_empty() {
            for (i, request) in self
                .requests
                .iter()
                .filter(|r| r.requires_special_room())
                .enumerate()
            {
                schedule.push(special[i % special.len()], request.clone());
            }
        }

        if !general.is_empty() {
            for (i, request) in self
                .requests
                .iter()
                .filter(|r| !r.requires_special_room())
                .enumerate()
            {
                schedule.push(general[i % general.len()], request.clone());
            }
        }

        schedule
    }
}
