use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::catalog::CoordinateCatalog;
use crate::domain::solution::Solution;
use crate::domain::types::{Coordinate, ServicePoint};
use crate::error::PlacementError;

/// Square grid of `side * side` integer coordinates starting at the origin.
pub fn generate_catalog(side: usize) -> Result<CoordinateCatalog, PlacementError> {
    let coordinates = (0..side)
        .flat_map(|x| (0..side).map(move |y| Coordinate::new(x as f64, y as f64)))
        .collect();
    CoordinateCatalog::new(coordinates)
}

/// Random service points placed on catalog coordinates.
///
/// Pickup capacities fall in [100, 1_000] and distances in [0, 5_000].
pub fn generate_service_points(
    count: usize,
    catalog: &CoordinateCatalog,
    seed: u64,
) -> Solution {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = (0..count as u64)
        .map(|id| {
            let pickup = rng.gen_range(100..=1_000) as f64;
            ServicePoint {
                id,
                location: catalog.sample(&mut rng),
                pickup,
                delivery: rng.gen_range(0..=pickup as u64) as f64,
                total_dist: rng.gen_range(0.0..5_000.0),
                cost: 0.0,
            }
        })
        .collect();
    Solution::new(points)
}

/// Seeded instance for tests and dry runs.
pub fn generate_instance(
    points: usize,
    grid_side: usize,
    seed: u64,
) -> Result<(Solution, CoordinateCatalog), PlacementError> {
    let catalog = generate_catalog(grid_side)?;
    let solution = generate_service_points(points, &catalog, seed);
    info!(
        "Generated {} service points on a {}x{} grid",
        solution.len(),
        grid_side,
        grid_side
    );
    Ok((solution, catalog))
}
