use std::fs::File;
use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

// Internal module imports
use crate::config::AnnealingConfig;
use crate::domain::catalog::CoordinateCatalog;
use crate::domain::solution::Solution;
use crate::domain::types::{Coordinate, ServicePoint};
use crate::error::PlacementError;
use crate::setup::init_types::{CoordinateRow, ServicePointRow};

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

/// Parses a service-point table with columns
/// `id, x, y, pickup, delivery, total_dist, cost` (`total_dist` optional).
pub fn read_service_points<R: io::Read>(reader: R) -> Result<Vec<ServicePoint>, csv::Error> {
    reader_builder()
        .from_reader(reader)
        .into_deserialize::<ServicePointRow>()
        .map(|row| row.map(ServicePoint::from))
        .collect()
}

/// Parses a coordinate table with columns `x, y`.
pub fn read_coordinates<R: io::Read>(reader: R) -> Result<Vec<Coordinate>, csv::Error> {
    reader_builder()
        .from_reader(reader)
        .into_deserialize::<CoordinateRow>()
        .map(|row| row.map(Coordinate::from))
        .collect()
}

pub fn load_service_points(path: &Path) -> Result<Solution, PlacementError> {
    let load_err = |source: csv::Error| PlacementError::Load {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| load_err(e.into()))?;
    let points = read_service_points(file).map_err(load_err)?;

    info!(
        "Loaded {} service points from {}",
        points.len(),
        path.display()
    );
    if points.is_empty() {
        warn!("Service point table is empty; only add moves can change the solution");
    }
    Ok(Solution::new(points))
}

pub fn load_catalog(path: &Path) -> Result<CoordinateCatalog, PlacementError> {
    let load_err = |source: csv::Error| PlacementError::Load {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|e| load_err(e.into()))?;
    let coordinates = read_coordinates(file).map_err(load_err)?;

    let catalog = CoordinateCatalog::new(coordinates).map_err(|_| {
        PlacementError::Configuration(format!(
            "coordinate catalog {} has no rows",
            path.display()
        ))
    })?;

    info!(
        "Loaded {} valid coordinates from {}",
        catalog.len(),
        path.display()
    );
    let duplicates = catalog.duplicate_count();
    if duplicates > 0 {
        warn!("Coordinate catalog contains {} duplicate entries", duplicates);
    }
    Ok(catalog)
}

/// Loads both input tables named by `config`.
pub fn setup(config: &AnnealingConfig) -> Result<(Solution, CoordinateCatalog), PlacementError> {
    debug!(
        "Reading inputs: service points = {}, coordinates = {}",
        config.service_points_path.display(),
        config.valid_coordinates_path.display()
    );
    let solution = load_service_points(&config.service_points_path)?;
    let catalog = load_catalog(&config.valid_coordinates_path)?;
    Ok((solution, catalog))
}
