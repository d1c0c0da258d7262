//! Input data access and result output.
//!
//! The scheduler only sees the [`DataSource`] contract. Two sources are
//! provided: [`InMemorySource`] for programmatic use and
//! [`TimetableSource`], which reads the room list, the timetable and the
//! numeric arguments from delimited text files and writes the final
//! timetable back under a timestamped name.

mod files;
mod memory;
mod parse;
mod write;

use std::collections::BTreeSet;

use crate::model::{SurgeryRequest, TuningParameters};
use crate::schedule::Schedule;

pub use files::TimetableSource;
pub use memory::InMemorySource;
pub use parse::{infer_rooms, parse_arguments, parse_rooms, Timetable};
pub use write::{timestamped_path, write_rows};

/// Data-access collaborator consumed by the scheduler.
pub trait DataSource {
    /// Every room name, in lexicographic order.
    fn all_rooms(&self) -> &BTreeSet<String>;

    /// Rooms eligible for special-requirement requests; a subset of
    /// [`all_rooms`](DataSource::all_rooms).
    fn special_rooms(&self) -> &BTreeSet<String>;

    /// Requests in stable input order.
    fn surgery_requests(&self) -> &[SurgeryRequest];

    /// Timing parameters, with defaults filled in for anything unset.
    fn tuning_parameters(&self) -> TuningParameters;

    /// Records the final room of every request in `schedule`.
    fn apply_final_assignment(&mut self, schedule: &Schedule);
}
