//! Error types.

use thiserror::Error;

/// Invalid annealing configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("final_temperature must be positive, got {0}")]
    FinalTemperature(f64),

    #[error("target_acceptance must be in (0, 1], got {0}")]
    TargetAcceptance(f64),

    #[error("calibration_samples must be at least 1")]
    CalibrationSamples,

    #[error("calibration bounds must satisfy 0 < low < high, got [{low}, {high}]")]
    CalibrationBounds { low: f64, high: f64 },

    #[error("calibration_tolerance must be positive, got {0}")]
    CalibrationTolerance(f64),

    #[error("reference_temperature must exceed final_temperature, got {0}")]
    ReferenceTemperature(f64),

    #[error("cooling_alpha must be greater than 1, got {0}")]
    CoolingAlpha(f64),

    #[error("iteration_beta must be positive, got {0}")]
    IterationBeta(f64),

    #[error("max_neighbor_attempts must be at least 1")]
    NeighborAttempts,
}

/// A problem instance that cannot be scheduled as given.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("no operating rooms configured")]
    NoRooms,

    #[error("special room {0:?} is not listed among all rooms")]
    UnknownSpecialRoom(String),

    #[error("{count} request(s) require a special room but no special room is configured")]
    UnschedulableSpecialRequests { count: usize },

    #[error("duplicate request id {0:?}")]
    DuplicateRequest(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure while reading input data or writing the result.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("input file not found: {}", .0.display())]
    MissingFile(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
