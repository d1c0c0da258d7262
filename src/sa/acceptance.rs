//! Metropolis acceptance criterion.

use rand::Rng;

/// Probability of accepting a move from cost `current` to `candidate` at
/// temperature `temperature`.
///
/// Improvements are always accepted. Otherwise the probability is
/// `exp(-(candidate - current) / temperature)`, which lies in `(0, 1]`,
/// falls as the cost increase grows and rises with the temperature.
///
/// `temperature` must be strictly positive.
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    debug_assert!(temperature > 0.0, "temperature must be positive");
    let delta = candidate - current;
    if delta < 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Applies the Metropolis test, drawing one uniform value in `[0, 1)`
/// only when the candidate is not an improvement.
pub fn metropolis<R: Rng>(current: f64, candidate: f64, temperature: f64, rng: &mut R) -> bool {
    if candidate < current {
        return true;
    }
    rng.random::<f64>() < acceptance_probability(current, candidate, temperature)
}
