//! Neighbourhood moves: relocate, add and delete a service point.
//!
//! Moves are blind to cost. Each returns an [`AppliedMove`] that can undo
//! itself, so the controller can evaluate after mutating and roll back on
//! rejection.

use std::fmt;

use rand::Rng;
use tracing::trace;

use crate::domain::catalog::CoordinateCatalog;
use crate::domain::solution::Solution;
use crate::domain::types::{Coordinate, ServicePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Relocate,
    Add,
    Delete,
}

impl MoveKind {
    pub const ALL: [MoveKind; 3] = [MoveKind::Relocate, MoveKind::Add, MoveKind::Delete];

    /// Maps a uniform draw in [0, 1) onto a move using cumulative thresholds.
    pub fn select(draw: f64, delete_threshold: f64, add_threshold: f64) -> Self {
        if draw <= delete_threshold {
            MoveKind::Delete
        } else if draw <= add_threshold {
            MoveKind::Add
        } else {
            MoveKind::Relocate
        }
    }

    pub fn index(self) -> usize {
        match self {
            MoveKind::Relocate => 0,
            MoveKind::Add => 1,
            MoveKind::Delete => 2,
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Relocate => write!(f, "relocate"),
            MoveKind::Add => write!(f, "add"),
            MoveKind::Delete => write!(f, "delete"),
        }
    }
}

/// Record of a mutation already applied to a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum AppliedMove {
    Relocated { index: usize, previous: Coordinate },
    Added { id: u64 },
    Deleted { index: usize, point: ServicePoint },
    /// The move needed an existing point and the solution was empty.
    NoOp(MoveKind),
}

impl AppliedMove {
    pub fn kind(&self) -> MoveKind {
        match self {
            AppliedMove::Relocated { .. } => MoveKind::Relocate,
            AppliedMove::Added { .. } => MoveKind::Add,
            AppliedMove::Deleted { .. } => MoveKind::Delete,
            AppliedMove::NoOp(kind) => *kind,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, AppliedMove::NoOp(_))
    }

    /// Restores `solution` to its state before this move.
    ///
    /// Must be called on the solution the move was applied to, before any
    /// other mutation.
    pub fn revert(self, solution: &mut Solution) {
        match self {
            AppliedMove::Relocated { index, previous } => {
                solution.relocate(index, previous);
            }
            AppliedMove::Added { id } => {
                let removed = solution.pop();
                debug_assert_eq!(removed.map(|sp| sp.id), Some(id));
            }
            AppliedMove::Deleted { index, point } => solution.insert(index, point),
            AppliedMove::NoOp(_) => {}
        }
    }
}

/// Moves a uniformly chosen point to a freshly sampled catalog coordinate.
pub fn relocate<R: Rng + ?Sized>(
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    rng: &mut R,
) -> AppliedMove {
    if solution.is_empty() {
        trace!("relocate skipped: no service points");
        return AppliedMove::NoOp(MoveKind::Relocate);
    }
    let index = rng.gen_range(0..solution.len());
    let location = catalog.sample(rng);
    let previous = solution.relocate(index, location);
    trace!(
        "Service point {} moved from {} to {}",
        solution.points()[index].id,
        previous,
        location
    );
    AppliedMove::Relocated { index, previous }
}

/// Opens a point with a generated identifier at a sampled coordinate.
pub fn add<R: Rng + ?Sized>(
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    rng: &mut R,
) -> AppliedMove {
    match solution.allocate_id() {
        Some(id) => add_with_id(solution, catalog, rng, id),
        None => {
            trace!("add skipped: service point ids exhausted");
            AppliedMove::NoOp(MoveKind::Add)
        }
    }
}

/// Opens a point with a caller-supplied identifier. Capacity, distance and
/// cost fields always start at zero.
pub fn add_with_id<R: Rng + ?Sized>(
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    rng: &mut R,
    id: u64,
) -> AppliedMove {
    let location = catalog.sample(rng);
    solution.push(ServicePoint::opened_at(id, location));
    trace!("New service point {} opened at {}", id, location);
    AppliedMove::Added { id }
}

/// Closes a uniformly chosen point.
pub fn delete<R: Rng + ?Sized>(solution: &mut Solution, rng: &mut R) -> AppliedMove {
    if solution.is_empty() {
        trace!("delete skipped: no service points");
        return AppliedMove::NoOp(MoveKind::Delete);
    }
    let index = rng.gen_range(0..solution.len());
    let point = solution.remove(index);
    trace!("Service point {} closed", point.id);
    AppliedMove::Deleted { index, point }
}

pub fn apply<R: Rng + ?Sized>(
    kind: MoveKind,
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    rng: &mut R,
) -> AppliedMove {
    match kind {
        MoveKind::Relocate => relocate(solution, catalog, rng),
        MoveKind::Add => add(solution, catalog, rng),
        MoveKind::Delete => delete(solution, rng),
    }
}
