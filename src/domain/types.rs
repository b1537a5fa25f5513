use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A facility placed at one of the catalog coordinates.
///
/// `cost` is carried through from the input table but does not feed the
/// cost model.
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePoint {
    pub id: u64,
    pub location: Coordinate,
    pub pickup: f64,
    pub delivery: f64,
    pub total_dist: f64,
    pub cost: f64,
}

impl ServicePoint {
    /// A freshly opened point: capacity, distance and cost fields start at zero.
    pub fn opened_at(id: u64, location: Coordinate) -> Self {
        Self {
            id,
            location,
            pickup: 0.0,
            delivery: 0.0,
            total_dist: 0.0,
            cost: 0.0,
        }
    }
}
