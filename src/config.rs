use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PlacementError;
use crate::evaluation::cost::CostModel;
use crate::solver::annealing::acceptance::AcceptanceMode;
use crate::solver::annealing::schedule::CoolingSchedule;

pub mod constant {
    pub const ITERATIONS: usize = 350_000_000;
    pub const INITIAL_TEMPERATURE: f64 = 45_000_000.0;
    pub const MIN_TEMPERATURE: f64 = 1e-9;
    pub const PROGRESS_INTERVAL: usize = 1_000_000;
    // Cumulative thresholds on a uniform draw: delete, then add, else relocate.
    pub const DELETE_THRESHOLD: f64 = 0.02;
    pub const ADD_THRESHOLD: f64 = 0.20;
    pub const SERVICE_POINTS_CSV_PATH: &str = "service_points.csv";
    pub const VALID_COORDINATES_CSV_PATH: &str = "valid_coordinates.csv";
}

/// Immutable settings for one annealing run.
///
/// ```
/// use sp_placement::config::AnnealingConfig;
/// use sp_placement::solver::annealing::schedule::CoolingSchedule;
///
/// let config = AnnealingConfig::default()
///     .with_iterations(10_000)
///     .with_initial_temperature(500.0)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    pub service_points_path: PathBuf,
    pub valid_coordinates_path: PathBuf,

    /// Iteration budget. Zero leaves the loaded solution untouched.
    pub iterations: usize,
    pub initial_temperature: f64,
    /// Floor applied to every scheduled temperature.
    pub min_temperature: f64,
    pub cooling: CoolingSchedule,

    pub delete_threshold: f64,
    pub add_threshold: f64,

    pub acceptance: AcceptanceMode,
    pub cost_model: CostModel,

    pub progress_interval: usize,
    pub seed: Option<u64>,

    /// Checkpoint history is written here when set.
    pub history_path: Option<PathBuf>,
    /// Final service points are written here when set.
    pub solution_path: Option<PathBuf>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            service_points_path: PathBuf::from(constant::SERVICE_POINTS_CSV_PATH),
            valid_coordinates_path: PathBuf::from(constant::VALID_COORDINATES_CSV_PATH),
            iterations: constant::ITERATIONS,
            initial_temperature: constant::INITIAL_TEMPERATURE,
            min_temperature: constant::MIN_TEMPERATURE,
            cooling: CoolingSchedule::default(),
            delete_threshold: constant::DELETE_THRESHOLD,
            add_threshold: constant::ADD_THRESHOLD,
            acceptance: AcceptanceMode::default(),
            cost_model: CostModel::default(),
            progress_interval: constant::PROGRESS_INTERVAL,
            seed: None,
            history_path: None,
            solution_path: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_service_points_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.service_points_path = path.into();
        self
    }

    pub fn with_valid_coordinates_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.valid_coordinates_path = path.into();
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_move_thresholds(mut self, delete: f64, add: f64) -> Self {
        self.delete_threshold = delete;
        self.add_threshold = add;
        self
    }

    pub fn with_acceptance(mut self, acceptance: AcceptanceMode) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn with_progress_interval(mut self, n: usize) -> Self {
        self.progress_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    pub fn with_solution_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solution_path = Some(path.into());
        self
    }

    /// Reads overrides from the process environment. `.env` is loaded by
    /// the binary before this is called.
    pub fn from_env() -> Result<Self, PlacementError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to the defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlacementError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SP_SERVICE_POINTS_CSV") {
            config.service_points_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SP_VALID_COORDINATES_CSV") {
            config.valid_coordinates_path = PathBuf::from(path);
        }
        if let Some(n) = parse_var(&lookup, "SP_ITERATIONS")? {
            config.iterations = n;
        }
        if let Some(t) = parse_var(&lookup, "SP_INITIAL_TEMPERATURE")? {
            config.initial_temperature = t;
        }
        if let Some(t) = parse_var(&lookup, "SP_MIN_TEMPERATURE")? {
            config.min_temperature = t;
        }
        if let Some(cooling) = parse_var(&lookup, "SP_COOLING")? {
            config.cooling = cooling;
        }
        if let Some(p) = parse_var(&lookup, "SP_DELETE_THRESHOLD")? {
            config.delete_threshold = p;
        }
        if let Some(p) = parse_var(&lookup, "SP_ADD_THRESHOLD")? {
            config.add_threshold = p;
        }
        if let Some(mode) = parse_var(&lookup, "SP_ACCEPTANCE")? {
            config.acceptance = mode;
        }
        if let Some(n) = parse_var(&lookup, "SP_PROGRESS_INTERVAL")? {
            config.progress_interval = n;
        }
        if let Some(seed) = parse_var(&lookup, "SP_SEED")? {
            config.seed = Some(seed);
        }
        config.history_path = lookup("SP_HISTORY_CSV").map(PathBuf::from);
        config.solution_path = lookup("SP_SOLUTION_CSV").map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlacementError> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(PlacementError::Configuration(format!(
                "initial_temperature must be finite and positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err(PlacementError::Configuration(format!(
                "min_temperature must be finite and positive, got {}",
                self.min_temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.delete_threshold)
            || !(0.0..=1.0).contains(&self.add_threshold)
            || self.delete_threshold > self.add_threshold
        {
            return Err(PlacementError::Configuration(format!(
                "move thresholds must satisfy 0 <= delete <= add <= 1, got delete={} add={}",
                self.delete_threshold, self.add_threshold
            )));
        }
        if self.progress_interval == 0 {
            return Err(PlacementError::Configuration(
                "progress_interval must be at least 1".into(),
            ));
        }
        self.cooling.validate()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, PlacementError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            PlacementError::Configuration(format!("{key}={raw:?} could not be parsed: {e}"))
        }),
    }
}
