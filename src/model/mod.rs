//! Problem data model.
//!
//! Immutable inputs consumed by the scheduler: the surgery requests to
//! place, the operating rooms they may be placed in, and the timing
//! parameters that define regular and overtime capacity.

mod params;
mod types;

pub use params::TuningParameters;
pub use types::{RoomSet, SurgeryRequest};
