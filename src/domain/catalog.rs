use rand::Rng;

use crate::domain::types::Coordinate;
use crate::error::PlacementError;

/// Fixed set of admissible locations for service points.
#[derive(Debug, Clone)]
pub struct CoordinateCatalog {
    coordinates: Vec<Coordinate>,
}

impl CoordinateCatalog {
    pub fn new(coordinates: Vec<Coordinate>) -> Result<Self, PlacementError> {
        if coordinates.is_empty() {
            return Err(PlacementError::Configuration(
                "coordinate catalog is empty".into(),
            ));
        }
        Ok(Self { coordinates })
    }

    /// Uniform draw over the catalog entries.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        self.coordinates[rng.gen_range(0..self.coordinates.len())]
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    // Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Number of entries that repeat an earlier entry exactly.
    pub fn duplicate_count(&self) -> usize {
        let mut seen: Vec<(u64, u64)> = self
            .coordinates
            .iter()
            .map(|c| (c.x.to_bits(), c.y.to_bits()))
            .collect();
        seen.sort_unstable();
        seen.windows(2).filter(|w| w[0] == w[1]).count()
    }
}
