//! Annealing configuration and size-adaptive schedules.

use crate::error::ConfigError;

/// Configuration for the self-tuning annealer.
///
/// The starting temperature is not configured directly. It is found by
/// bisection over `calibration_bounds` so that a sample of moves from the
/// initial solution is accepted at `target_acceptance`. The cooling
/// factor and the iterations per temperature step scale with instance
/// size `n`:
///
/// - cooling rate: `(alpha * sqrt(n) - 1) / (alpha * sqrt(n))`
/// - iterations: `round(beta * n)`
///
/// # Examples
///
/// ```
/// use u_surgery::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_final_temperature(0.05)
///     .with_iteration_beta(2.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealConfig {
    /// Stopping temperature. The search ends once T drops to this value.
    pub final_temperature: f64,

    /// Acceptance rate the calibrated starting temperature should reach.
    pub target_acceptance: f64,

    /// Number of neighbor proposals sampled per calibration probe.
    pub calibration_samples: usize,

    /// Search interval `(low, high)` for the starting temperature.
    pub calibration_bounds: (f64, f64),

    /// Bisection stops once the interval is no wider than this.
    pub calibration_tolerance: f64,

    /// Temperature used as the top of the normalization range while
    /// calibrating, before the real starting temperature is known.
    pub reference_temperature: f64,

    /// Normalized temperature above which neighbor generation uses
    /// coarse moves.
    pub high_phase_threshold: f64,

    /// Cooling factor scale `alpha`.
    pub cooling_alpha: f64,

    /// Iteration count scale `beta`.
    pub iteration_beta: f64,

    /// Attempts per neighbor before falling back to an unchanged copy.
    pub max_neighbor_attempts: usize,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility. A random seed is drawn and
    /// reported in the result when unset.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            final_temperature: 0.01,
            target_acceptance: 0.95,
            calibration_samples: 100,
            calibration_bounds: (0.01, 10_000.0),
            calibration_tolerance: 0.1,
            reference_temperature: 10_000.0,
            high_phase_threshold: 0.6,
            cooling_alpha: 1.2,
            iteration_beta: 1.5,
            max_neighbor_attempts: 50,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_target_acceptance(mut self, rate: f64) -> Self {
        self.target_acceptance = rate;
        self
    }

    pub fn with_calibration_samples(mut self, n: usize) -> Self {
        self.calibration_samples = n;
        self
    }

    pub fn with_calibration_bounds(mut self, low: f64, high: f64) -> Self {
        self.calibration_bounds = (low, high);
        self
    }

    pub fn with_calibration_tolerance(mut self, tolerance: f64) -> Self {
        self.calibration_tolerance = tolerance;
        self
    }

    pub fn with_reference_temperature(mut self, t: f64) -> Self {
        self.reference_temperature = t;
        self
    }

    pub fn with_high_phase_threshold(mut self, threshold: f64) -> Self {
        self.high_phase_threshold = threshold;
        self
    }

    pub fn with_cooling_alpha(mut self, alpha: f64) -> Self {
        self.cooling_alpha = alpha;
        self
    }

    pub fn with_iteration_beta(mut self, beta: f64) -> Self {
        self.iteration_beta = beta;
        self
    }

    pub fn with_max_neighbor_attempts(mut self, n: usize) -> Self {
        self.max_neighbor_attempts = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Multiplicative cooling factor for an instance of size `n`.
    ///
    /// Strictly below 1 and approaching 1 as `n` grows, so larger
    /// instances cool more slowly. `n` is clamped to at least 1; with the
    /// default alpha the factor is then always positive.
    pub fn cooling_rate(&self, n: usize) -> f64 {
        let scale = self.cooling_alpha * (n.max(1) as f64).sqrt();
        (scale - 1.0) / scale
    }

    /// Number of moves attempted at each temperature for size `n`.
    pub fn iterations_per_temperature(&self, n: usize) -> usize {
        (self.iteration_beta * n as f64).round() as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.final_temperature <= 0.0 {
            return Err(ConfigError::FinalTemperature(self.final_temperature));
        }
        if self.target_acceptance <= 0.0 || self.target_acceptance > 1.0 {
            return Err(ConfigError::TargetAcceptance(self.target_acceptance));
        }
        if self.calibration_samples == 0 {
            return Err(ConfigError::CalibrationSamples);
        }
        let (low, high) = self.calibration_bounds;
        if low <= 0.0 || low >= high {
            return Err(ConfigError::CalibrationBounds { low, high });
        }
        if self.calibration_tolerance <= 0.0 {
            return Err(ConfigError::CalibrationTolerance(self.calibration_tolerance));
        }
        if self.reference_temperature <= self.final_temperature {
            return Err(ConfigError::ReferenceTemperature(self.reference_temperature));
        }
        // alpha <= 1 would make the cooling factor non-positive for n = 1
        if self.cooling_alpha <= 1.0 {
            return Err(ConfigError::CoolingAlpha(self.cooling_alpha));
        }
        if self.iteration_beta <= 0.0 {
            return Err(ConfigError::IterationBeta(self.iteration_beta));
        }
        if self.max_neighbor_attempts == 0 {
            return Err(ConfigError::NeighborAttempts);
        }
        Ok(())
    }
}
