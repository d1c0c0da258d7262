//! Operating-room surgery scheduling.
//!
//! Requests are assigned to rooms to minimize overtime and balance room
//! load, under the hard constraint that special-requirement requests run
//! only in special rooms. The search is the self-tuning annealer from
//! [`crate::sa`]:
//!
//! - the starting schedule deals requests round-robin, special ones over
//!   the special rooms and the rest over the general rooms,
//! - a neighbor relocates one case between two random rooms, by insert or
//!   swap, and is only returned if it stays feasible,
//! - cost is regular overtime plus twice the hard overtime plus the
//!   absolute deviation of each room's usage from the mean.

mod construct;
mod neighbor;
mod problem;
mod scheduler;

pub use problem::SurgeryProblem;
pub use scheduler::{ScheduleOutcome, Scheduler};
