//! Cooling schedules.

use std::fmt;
use std::str::FromStr;

use crate::error::PlacementError;

/// Temperature as a function of the 1-based iteration index.
///
/// Every schedule is floored at the configured minimum temperature, so the
/// acceptance rule never sees a non-positive value from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CoolingSchedule {
    /// `T_i = T_0 / i`.
    #[default]
    Harmonic,

    /// `T_i = T_0 * (N - i + 1) / N` over an iteration budget of `N`.
    Linear,

    /// `T_i = T_0 * alpha^(i - 1)`.
    Geometric {
        /// Cooling factor in (0, 1).
        alpha: f64,
    },
}

impl CoolingSchedule {
    pub fn temperature(
        &self,
        initial: f64,
        min: f64,
        iteration: usize,
        budget: usize,
    ) -> f64 {
        let i = iteration.max(1) as f64;
        let t = match *self {
            CoolingSchedule::Harmonic => initial / i,
            CoolingSchedule::Linear => {
                let n = budget.max(1) as f64;
                initial * ((n - i + 1.0) / n)
            }
            CoolingSchedule::Geometric { alpha } => initial * alpha.powf(i - 1.0),
        };
        t.max(min)
    }

    pub fn validate(&self) -> Result<(), PlacementError> {
        if let CoolingSchedule::Geometric { alpha } = *self {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(PlacementError::Configuration(format!(
                    "geometric alpha must be in (0, 1), got {alpha}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for CoolingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoolingSchedule::Harmonic => write!(f, "harmonic"),
            CoolingSchedule::Linear => write!(f, "linear"),
            CoolingSchedule::Geometric { alpha } => write!(f, "geometric:{alpha}"),
        }
    }
}

impl FromStr for CoolingSchedule {
    type Err = String;

    /// Accepts `harmonic`, `linear` or `geometric:<alpha>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once(':') {
            None if s == "harmonic" => Ok(CoolingSchedule::Harmonic),
            None if s == "linear" => Ok(CoolingSchedule::Linear),
            Some(("geometric", alpha)) => alpha
                .parse::<f64>()
                .map(|alpha| CoolingSchedule::Geometric { alpha })
                .map_err(|e| format!("bad geometric alpha {alpha:?}: {e}")),
            _ => Err(format!(
                "unknown cooling schedule {s:?} (expected harmonic, linear or geometric:<alpha>)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: f64 = 45_000_000.0;
    const MIN: f64 = 1e-9;

    #[test]
    fn test_harmonic_matches_reciprocal_decay() {
        let s = CoolingSchedule::Harmonic;
        assert_eq!(s.temperature(T0, MIN, 1, 100), T0);
        assert_eq!(s.temperature(T0, MIN, 2, 100), T0 / 2.0);
        assert_eq!(s.temperature(T0, MIN, 1_000_000, 100), 45.0);
    }

    #[test]
    fn test_harmonic_is_monotone() {
        let s = CoolingSchedule::Harmonic;
        let mut last = f64::INFINITY;
        for i in 1..1000 {
            let t = s.temperature(T0, MIN, i, 1000);
            assert!(t < last);
            last = t;
        }
    }

    #[test]
    fn test_linear_ends_above_zero() {
        let s = CoolingSchedule::Linear;
        assert_eq!(s.temperature(100.0, MIN, 1, 10), 100.0);
        assert!((s.temperature(100.0, MIN, 10, 10) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_floors_at_min() {
        let s = CoolingSchedule::Geometric { alpha: 0.5 };
        assert_eq!(s.temperature(8.0, MIN, 1, 0), 8.0);
        assert_eq!(s.temperature(8.0, MIN, 4, 0), 1.0);
        assert_eq!(s.temperature(8.0, MIN, 10_000, 0), MIN);
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!("harmonic".parse(), Ok(CoolingSchedule::Harmonic));
        assert_eq!(" Linear ".parse(), Ok(CoolingSchedule::Linear));
        assert_eq!(
            "geometric:0.95".parse(),
            Ok(CoolingSchedule::Geometric { alpha: 0.95 })
        );
        assert!("geometric:fast".parse::<CoolingSchedule>().is_err());
        assert!("exponential".parse::<CoolingSchedule>().is_err());
    }

    #[test]
    fn test_validate_alpha() {
        assert!(CoolingSchedule::Geometric { alpha: 1.5 }.validate().is_err());
        assert!(CoolingSchedule::Geometric { alpha: 0.0 }.validate().is_err());
        assert!(CoolingSchedule::Geometric { alpha: f64::NAN }.validate().is_err());
        assert!(CoolingSchedule::Geometric { alpha: f64::INFINITY }.validate().is_err());
        assert!(CoolingSchedule::Geometric { alpha: 0.9 }.validate().is_ok());
        assert!(CoolingSchedule::Harmonic.validate().is_ok());
    }
}
