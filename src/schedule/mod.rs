//! Room assignments and their derived load metrics.

mod metrics;
mod types;

pub use metrics::{RoomMetrics, ScheduleMetrics};
pub use types::Schedule;
