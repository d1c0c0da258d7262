//! Operating-room surgery scheduling by self-tuning simulated annealing.
//!
//! Assigns surgery requests to operating rooms over a single day,
//! minimizing overtime and balancing room usage, while keeping
//! special-requirement cases in special rooms.
//!
//! - **Model** ([`model`]): surgery requests, rooms and timing parameters.
//! - **Schedule** ([`schedule`]): per-room ordered case sequences with a
//!   cached cost, plus derived load metrics.
//! - **Simulated Annealing** ([`sa`]): a generic annealer that calibrates
//!   its starting temperature by bisection and scales cooling and effort
//!   with instance size.
//! - **Surgery** ([`surgery`]): cost and feasibility model, constructive
//!   start, temperature-phased relocation moves and the [`Scheduler`]
//!   facade.
//! - **Data** ([`data`]): the data-access contract and file-backed input
//!   and output.
//!
//! # Example
//!
//! ```
//! use u_surgery::model::{RoomSet, SurgeryRequest, TuningParameters};
//! use u_surgery::sa::AnnealConfig;
//! use u_surgery::Scheduler;
//!
//! let rooms = RoomSet::new(["OR1", "OR2", "OR3"], ["OR3"])?;
//! let requests = vec![
//!     SurgeryRequest::new("A1", "OR1", 300, false),
//!     SurgeryRequest::new("A2", "OR1", 240, false),
//!     SurgeryRequest::new("A3", "OR3", 120, true),
//!     SurgeryRequest::new("A4", "OR2", 60, false),
//! ];
//!
//! let scheduler = Scheduler::new(
//!     rooms,
//!     requests,
//!     TuningParameters::default(),
//!     AnnealConfig::default().with_seed(1),
//! )?;
//! if let Some(outcome) = scheduler.schedule()? {
//!     assert_eq!(outcome.best().room_of("A3"), Some("OR3"));
//! }
//! # Ok::<(), u_surgery::error::ScheduleError>(())
//! ```

pub mod data;
pub mod error;
pub mod model;
pub mod sa;
pub mod schedule;
pub mod surgery;

pub use surgery::{ScheduleOutcome, Scheduler};
