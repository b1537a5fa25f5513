//! Metropolis acceptance rule.
//!
//! Costs are mapped to profit as `profit = -cost`, so the exponent is
//! `(old_cost - new_cost) / T`. Cost-improving or neutral moves are always
//! kept; worsening moves survive with probability `exp(delta / T)`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::PlacementError;

/// What the controller does with a move after evaluating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptanceMode {
    /// Keep or revert each move by the Metropolis criterion.
    #[default]
    Metropolis,
    /// Keep every move regardless of cost. Reproduces the legacy run
    /// where the acceptance rule was never consulted.
    AlwaysCommit,
}

impl fmt::Display for AcceptanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptanceMode::Metropolis => write!(f, "metropolis"),
            AcceptanceMode::AlwaysCommit => write!(f, "always"),
        }
    }
}

impl FromStr for AcceptanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metropolis" => Ok(AcceptanceMode::Metropolis),
            "always" | "always-commit" => Ok(AcceptanceMode::AlwaysCommit),
            other => Err(format!(
                "unknown acceptance mode {other:?} (expected metropolis or always)"
            )),
        }
    }
}

/// Probability of keeping a move that takes the cost from `old_cost` to
/// `new_cost` at `temperature`.
///
/// A zero, negative or NaN temperature is a `Domain` error.
pub fn acceptance_probability(
    old_cost: f64,
    new_cost: f64,
    temperature: f64,
) -> Result<f64, PlacementError> {
    if temperature.is_nan() || temperature <= 0.0 {
        return Err(PlacementError::Domain { temperature });
    }
    let delta = old_cost - new_cost;
    if delta >= 0.0 {
        return Ok(1.0);
    }
    Ok((delta / temperature).exp())
}

/// Decides whether to keep a move. Worsening moves consume one uniform
/// draw from `rng`; improving moves are kept without drawing.
pub fn accept<R: Rng + ?Sized>(
    old_cost: f64,
    new_cost: f64,
    temperature: f64,
    rng: &mut R,
) -> Result<bool, PlacementError> {
    let probability = acceptance_probability(old_cost, new_cost, temperature)?;
    if probability >= 1.0 {
        return Ok(true);
    }
    Ok(rng.gen::<f64>() <= probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_improvement_always_accepted() {
        // StepRng at u64::MAX draws as close to 1.0 as an f64 in [0, 1) gets.
        let mut worst_draw = StepRng::new(u64::MAX, 0);
        assert!(accept(100.0, 50.0, 1e-12, &mut worst_draw).unwrap());
        assert!(accept(100.0, 100.0, 1e-12, &mut worst_draw).unwrap());
    }

    #[test]
    fn test_improvement_does_not_draw() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut untouched = rng.clone();
        accept(10.0, 5.0, 1.0, &mut rng).unwrap();
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_probability_for_worsening_move() {
        let p = acceptance_probability(100.0, 110.0, 10.0).unwrap();
        assert!((p - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_probability_approaches_one_when_hot() {
        let p = acceptance_probability(0.0, 75_000.0, 1e15).unwrap();
        assert!(p > 0.999_999);
    }

    #[test]
    fn test_probability_approaches_zero_when_cold() {
        let p = acceptance_probability(0.0, 75_000.0, 1e-3).unwrap();
        assert_eq!(p, 0.0);
        let mut worst_draw = StepRng::new(u64::MAX, 0);
        assert!(!accept(0.0, 75_000.0, 1e-3, &mut worst_draw).unwrap());
    }

    #[test]
    fn test_non_positive_temperature_is_domain_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for t in [0.0, -5.0, f64::NAN] {
            let err = accept(1.0, 2.0, t, &mut rng).unwrap_err();
            assert!(matches!(err, PlacementError::Domain { .. }));
        }
    }

    #[test]
    fn test_acceptance_rate_tracks_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let trials = 20_000;
        let kept = (0..trials)
            .filter(|_| accept(0.0, 1.0, 1.0, &mut rng).unwrap())
            .count();
        let rate = kept as f64 / trials as f64;
        let expected = (-1.0f64).exp();
        assert!((rate - expected).abs() < 0.02, "rate {rate} vs {expected}");
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Metropolis".parse(), Ok(AcceptanceMode::Metropolis));
        assert_eq!("always".parse(), Ok(AcceptanceMode::AlwaysCommit));
        assert!("sometimes".parse::<AcceptanceMode>().is_err());
    }
}
