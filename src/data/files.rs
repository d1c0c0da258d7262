//! File-backed data source.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use super::parse::{infer_rooms, parse_arguments, parse_rooms, Timetable};
use super::write::{timestamped_path, write_rows};
use super::DataSource;
use crate::error::DataError;
use crate::model::{RoomSet, SurgeryRequest, TuningParameters};
use crate::schedule::Schedule;

/// Rooms, timetable and arguments loaded from delimited text files.
#[derive(Debug, Clone)]
pub struct TimetableSource {
    rooms: RoomSet,
    timetable: Timetable,
    params: TuningParameters,
}

impl TimetableSource {
    pub fn new(rooms: RoomSet, timetable: Timetable, params: TuningParameters) -> Self {
        Self {
            rooms,
            timetable,
            params,
        }
    }

    /// Loads the input files.
    ///
    /// Without a room file the rooms are inferred from the timetable. A
    /// room file that is named but absent is an error. A missing argument
    /// file means default parameters.
    pub fn load(
        rooms_path: Option<&Path>,
        timetable_path: &Path,
        arguments_path: Option<&Path>,
    ) -> Result<Self, DataError> {
        let timetable = Timetable::read(timetable_path)?;

        let rooms = match rooms_path {
            Some(path) if !path.exists() => {
                return Err(DataError::MissingFile(path.to_path_buf()));
            }
            Some(path) => parse_rooms(&std::fs::read_to_string(path)?)?,
            None => infer_rooms(timetable.requests())?,
        };

        let params = match arguments_path {
            Some(path) if path.exists() => parse_arguments(&std::fs::read_to_string(path)?),
            Some(path) => {
                warn!(path = %path.display(), "argument file not found, using defaults");
                TuningParameters::default()
            }
            None => TuningParameters::default(),
        };

        info!(
            rooms = rooms.len(),
            special_rooms = rooms.special().len(),
            requests = timetable.requests().len(),
            "input loaded"
        );

        Ok(Self::new(rooms, timetable, params))
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.rooms
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Writes the current timetable next to `base` under a timestamped
    /// name and returns the path written.
    pub fn write_output(&self, base: &Path) -> Result<PathBuf, DataError> {
        let path = timestamped_path(base, Local::now().naive_local());
        write_rows(&path, self.timetable.header(), self.timetable.rows())?;
        info!(path = %path.display(), rows = self.timetable.rows().len(), "timetable written");
        Ok(path)
    }
}

impl DataSource for TimetableSource {
    fn all_rooms(&self) -> &BTreeSet<String> {
        self.rooms.all()
    }

    fn special_rooms(&self) -> &BTreeSet<String> {
        self.rooms.special()
    }

    fn surgery_requests(&self) -> &[SurgeryRequest] {
        self.timetable.requests()
    }

    fn tuning_parameters(&self) -> TuningParameters {
        self.params
    }

    fn apply_final_assignment(&mut self, schedule: &Schedule) {
        self.timetable.reassign(schedule);
    }
}
