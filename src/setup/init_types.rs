use serde::{Deserialize, Serialize};

use crate::domain::types::{Coordinate, ServicePoint};

/// One row of the service-point table.
///
/// Some exports omit `total_dist`; it then loads as zero.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServicePointRow {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub pickup: f64,
    pub delivery: f64,
    #[serde(default)]
    pub total_dist: f64,
    pub cost: f64,
}

/// One row of the valid-coordinates table.
#[derive(Debug, Deserialize)]
pub struct CoordinateRow {
    pub x: f64,
    pub y: f64,
}

impl From<ServicePointRow> for ServicePoint {
    fn from(row: ServicePointRow) -> Self {
        ServicePoint {
            id: row.id,
            location: Coordinate::new(row.x, row.y),
            pickup: row.pickup,
            delivery: row.delivery,
            total_dist: row.total_dist,
            cost: row.cost,
        }
    }
}

impl From<&ServicePoint> for ServicePointRow {
    fn from(sp: &ServicePoint) -> Self {
        ServicePointRow {
            id: sp.id,
            x: sp.location.x,
            y: sp.location.y,
            pickup: sp.pickup,
            delivery: sp.delivery,
            total_dist: sp.total_dist,
            cost: sp.cost,
        }
    }
}

impl From<CoordinateRow> for Coordinate {
    fn from(row: CoordinateRow) -> Self {
        Coordinate::new(row.x, row.y)
    }
}
