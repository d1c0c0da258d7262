use std::collections::{BTreeMap, BTreeSet};

use super::DataSource;
use crate::model::{RoomSet, SurgeryRequest, TuningParameters};
use crate::schedule::Schedule;

/// A data source held entirely in memory.
///
/// The final assignment is kept as a map from request id to room.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rooms: RoomSet,
    requests: Vec<SurgeryRequest>,
    params: TuningParameters,
    assignment: BTreeMap<String, String>,
}

impl InMemorySource {
    pub fn new(rooms: RoomSet, requests: Vec<SurgeryRequest>, params: TuningParameters) -> Self {
        Self {
            rooms,
            requests,
            params,
            assignment: BTreeMap::new(),
        }
    }

    /// Room assigned to each request id by the last applied schedule.
    pub fn assignment(&self) -> &BTreeMap<String, String> {
        &self.assignment
    }
}

impl DataSource for InMemorySource {
    fn all_rooms(&self) -> &BTreeSet<String> {
        self.rooms.all()
    }

    fn special_rooms(&self) -> &BTreeSet<String> {
        self.rooms.special()
    }

    fn surgery_requests(&self) -> &[SurgeryRequest] {
        &self.requests
    }

    fn tuning_parameters(&self) -> TuningParameters {
        self.params
    }

    fn apply_final_assignment(&mut self, schedule: &Schedule) {
        self.assignment = schedule
            .assignments()
            .map(|(room, request)| (request.id().to_string(), room.to_string()))
            .collect();
    }
}
