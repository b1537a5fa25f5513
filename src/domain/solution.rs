use crate::domain::types::{Coordinate, ServicePoint};

/// The working set of service points for one annealing run.
///
/// All mutation goes through the methods below. No cost is cached here;
/// callers recompute it from the points after every change.
#[derive(Debug, Clone)]
pub struct Solution {
    points: Vec<ServicePoint>,
    /// `None` once `u64::MAX` has been seen and the id space is used up.
    next_id: Option<u64>,
}

impl Default for Solution {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            next_id: Some(0),
        }
    }
}

impl Solution {
    pub fn new(points: Vec<ServicePoint>) -> Self {
        let mut solution = Self::default();
        for sp in &points {
            solution.reserve_id(sp.id);
        }
        solution.points = points;
        solution
    }

    fn reserve_id(&mut self, id: u64) {
        self.next_id = match (self.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    pub fn points(&self) -> &[ServicePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hands out an identifier no point in this run has used yet, or
    /// `None` once the `u64` id space is used up.
    pub fn allocate_id(&mut self) -> Option<u64> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }

    pub fn push(&mut self, point: ServicePoint) {
        self.reserve_id(point.id);
        self.points.push(point);
    }

    pub fn pop(&mut self) -> Option<ServicePoint> {
        self.points.pop()
    }

    /// Moves the point at `index` and returns where it was.
    ///
    /// Panics if `index` is out of bounds.
    pub fn relocate(&mut self, index: usize, location: Coordinate) -> Coordinate {
        std::mem::replace(&mut self.points[index].location, location)
    }

    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> ServicePoint {
        self.points.remove(index)
    }

    /// Puts a point back at `index`, shifting later points right.
    pub fn insert(&mut self, index: usize, point: ServicePoint) {
        self.reserve_id(point.id);
        self.points.insert(index, point);
    }
}
