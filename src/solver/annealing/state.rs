use std::fmt;

use crate::solver::annealing::moves::MoveKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initializing => write!(f, "INITIALIZING"),
            Phase::Running => write!(f, "RUNNING"),
            Phase::Terminated => write!(f, "TERMINATED"),
        }
    }
}

/// Per-move-kind counters, indexed by [`MoveKind::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveStats {
    pub attempted: [usize; 3],
    pub accepted: [usize; 3],
    pub rejected: [usize; 3],
    pub noop: [usize; 3],
}

impl MoveStats {
    pub fn attempted(&self, kind: MoveKind) -> usize {
        self.attempted[kind.index()]
    }

    pub fn accepted(&self, kind: MoveKind) -> usize {
        self.accepted[kind.index()]
    }

    pub fn rejected(&self, kind: MoveKind) -> usize {
        self.rejected[kind.index()]
    }

    pub fn noop(&self, kind: MoveKind) -> usize {
        self.noop[kind.index()]
    }

    pub fn total_accepted(&self) -> usize {
        self.accepted.iter().sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected.iter().sum()
    }
}

/// Progress observation taken every `progress_interval` iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub iteration: usize,
    pub cost: f64,
    pub temperature: f64,
    pub service_points: usize,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub phase: Phase,
    pub current_cost: f64,
    pub initial_cost: f64,
    pub best_cost: f64,
    pub best_iteration: usize,
    pub temperature: f64,
    pub iterations: usize,
    pub improving_moves: usize,
    pub stats: MoveStats,
    pub history: Vec<Checkpoint>,
}

impl SearchState {
    pub fn new(initial_cost: f64, initial_temperature: f64) -> Self {
        Self {
            phase: Phase::Initializing,
            current_cost: initial_cost,
            initial_cost,
            best_cost: initial_cost,
            best_iteration: 0,
            temperature: initial_temperature,
            iterations: 0,
            improving_moves: 0,
            stats: MoveStats::default(),
            history: Vec::new(),
        }
    }
}
