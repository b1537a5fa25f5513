use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading inputs, configuring, or running the annealer.
///
/// Moves applied to an empty solution are not errors; they come back as
/// `AppliedMove::NoOp`.
#[derive(Debug)]
pub enum PlacementError {
    /// Missing file, missing column or non-numeric field in an input table.
    Load { path: PathBuf, source: csv::Error },
    /// Invalid configuration value or an empty coordinate catalog.
    Configuration(String),
    /// A non-positive temperature reached the acceptance formula.
    Domain { temperature: f64 },
    /// Writing one of the optional CSV outputs failed.
    Output { path: PathBuf, source: csv::Error },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Load { path, source } => {
                write!(f, "failed to load {}: {}", path.display(), source)
            }
            PlacementError::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            PlacementError::Domain { temperature } => write!(
                f,
                "temperature must be strictly positive, got {temperature}"
            ),
            PlacementError::Output { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for PlacementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlacementError::Load { source, .. } | PlacementError::Output { source, .. } => {
                Some(source)
            }
            PlacementError::Configuration(_) | PlacementError::Domain { .. } => None,
        }
    }
}
