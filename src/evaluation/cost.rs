use crate::domain::solution::Solution;
use crate::domain::types::ServicePoint;

pub const BASE_COST: f64 = 75_000.0;
pub const PICKUP_WEIGHT: f64 = 0.1;
pub const DIST_WEIGHT: f64 = 0.5;

/// Linear operating cost of a set of service points.
///
/// Each open point pays a fixed base cost plus weighted pickup capacity and
/// weighted distance to the demand it serves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub base_cost: f64,
    pub pickup_weight: f64,
    pub dist_weight: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base_cost: BASE_COST,
            pickup_weight: PICKUP_WEIGHT,
            dist_weight: DIST_WEIGHT,
        }
    }
}

impl CostModel {
    pub fn point_cost(&self, sp: &ServicePoint) -> f64 {
        self.base_cost + self.pickup_weight * sp.pickup + self.dist_weight * sp.total_dist
    }

    pub fn total_cost(&self, solution: &Solution) -> f64 {
        solution.points().iter().map(|sp| self.point_cost(sp)).sum()
    }
}

pub fn total_cost(solution: &Solution) -> f64 {
    CostModel::default().total_cost(solution)
}
