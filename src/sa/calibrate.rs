//! Starting temperature calibration.
//!
//! The starting temperature is the lowest temperature at which a sample
//! of moves from the initial solution is accepted at the target rate.
//! Acceptance rate is monotone in temperature (up to sampling noise), so
//! the temperature is located by bisection.

use rand::Rng;

use super::acceptance::metropolis;
use super::config::AnnealConfig;
use super::types::{AnnealProblem, Temperature};

/// Fraction of `config.calibration_samples` independent neighbors of
/// `solution` that pass the Metropolis test at `temperature`.
///
/// Neighbors are generated against `config.reference_temperature` as the
/// top of the normalization range, since the real starting temperature
/// is what is being searched for.
pub fn acceptance_rate<P: AnnealProblem, R: Rng>(
    problem: &P,
    solution: &P::Solution,
    cost: f64,
    temperature: f64,
    config: &AnnealConfig,
    rng: &mut R,
) -> f64 {
    let phase = Temperature::new(
        temperature,
        config.reference_temperature,
        config.final_temperature,
    );

    let accepted = (0..config.calibration_samples)
        .filter(|_| {
            let mut neighbor = problem.neighbor(solution, &phase, rng);
            let neighbor_cost = problem.evaluate(&mut neighbor);
            metropolis(cost, neighbor_cost, temperature, rng)
        })
        .count();

    accepted as f64 / config.calibration_samples as f64
}

/// Bisects `config.calibration_bounds` for the starting temperature.
///
/// The lower bound moves up while the midpoint is accepted below
/// `config.target_acceptance`; otherwise the upper bound moves down.
/// Returns the final upper bound, which reaches the target to within
/// `config.calibration_tolerance`, or to float resolution when the
/// tolerance is finer than the bounds can represent.
pub fn find_initial_temperature<P: AnnealProblem, R: Rng>(
    problem: &P,
    solution: &P::Solution,
    cost: f64,
    config: &AnnealConfig,
    rng: &mut R,
) -> f64 {
    let (mut low, mut high) = config.calibration_bounds;

    while high - low > config.calibration_tolerance {
        let mid = low + (high - low) / 2.0;
        if mid <= low || mid >= high {
            break;
        }
        if acceptance_rate(problem, solution, cost, mid, config, rng) < config.target_acceptance {
            low = mid;
        } else {
            high = mid;
        }
    }

    high
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every move worsens the cost by exactly `delta`.
    struct FixedUphill {
        delta: f64,
    }

    impl AnnealProblem for FixedUphill {
        type Solution = f64;

        fn initial_solution(&self) -> f64 {
            0.0
        }

        fn evaluate(&self, x: &mut f64) -> f64 {
            *x
        }

        fn neighbor<R: Rng>(&self, x: &f64, _t: &Temperature, _rng: &mut R) -> f64 {
            x + self.delta
        }

        fn size(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_rate_is_one_for_free_moves() {
        let problem = FixedUphill { delta: 0.0 };
        let mut rng = StdRng::seed_from_u64(3);
        let rate = acceptance_rate(&problem, &0.0, 0.0, 0.5, &AnnealConfig::default(), &mut rng);
        assert_eq!(rate, 1.0);
    }

    #[test]
    fn test_free_moves_calibrate_to_lower_bound() {
        let problem = FixedUphill { delta: 0.0 };
        let config = AnnealConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let t0 = find_initial_temperature(&problem, &0.0, 0.0, &config, &mut rng);
        let (low, _) = config.calibration_bounds;
        assert!(t0 > low && t0 <= low + config.calibration_tolerance + 1e-9, "got {t0}");
    }

    #[test]
    fn test_calibrated_temperature_near_analytic() {
        // exp(-1 / T) = 0.95  =>  T = -1 / ln(0.95) ~ 19.5
        let problem = FixedUphill { delta: 1.0 };
        let config = AnnealConfig::default().with_calibration_samples(2_000);
        let mut rng = StdRng::seed_from_u64(11);
        let t0 = find_initial_temperature(&problem, &0.0, 0.0, &config, &mut rng);
        assert!(t0 > 8.0 && t0 < 60.0, "expected ~19.5, got {t0}");
    }

    #[test]
    fn test_rate_grows_with_temperature() {
        let problem = FixedUphill { delta: 10.0 };
        let config = AnnealConfig::default().with_calibration_samples(1_000);
        let mut rng = StdRng::seed_from_u64(5);
        let cold = acceptance_rate(&problem, &0.0, 0.0, 1.0, &config, &mut rng);
        let hot = acceptance_rate(&problem, &0.0, 0.0, 1_000.0, &config, &mut rng);
        assert!(cold < 0.05, "cold rate {cold}");
        assert!(hot > 0.95, "hot rate {hot}");
    }

    #[test]
    fn test_bisection_stops_at_float_resolution() {
        let problem = FixedUphill { delta: 1.0 };
        let config = AnnealConfig::default()
            .with_calibration_samples(10)
            .with_calibration_tolerance(1e-300);
        let mut rng = StdRng::seed_from_u64(4);
        let t0 = find_initial_temperature(&problem, &0.0, 0.0, &config, &mut rng);
        let (low, high) = config.calibration_bounds;
        assert!(t0 >= low && t0 <= high, "got {t0}");
    }

    #[test]
    fn test_calibration_deterministic_with_seed() {
        let problem = FixedUphill { delta: 2.0 };
        let config = AnnealConfig::default();
        let a = find_initial_temperature(
            &problem,
            &0.0,
            0.0,
            &config,
            &mut StdRng::seed_from_u64(9),
        );
        let b = find_initial_temperature(
            &problem,
            &0.0,
            0.0,
            &config,
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(a, b);
    }
}
