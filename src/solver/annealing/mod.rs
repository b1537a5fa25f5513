//! Simulated annealing over service-point placements.

pub mod acceptance;
pub mod moves;
pub mod report;
pub mod schedule;
pub mod search;
pub mod state;

pub use acceptance::{accept, acceptance_probability, AcceptanceMode};
pub use moves::{AppliedMove, MoveKind};
pub use report::AnnealingReport;
pub use schedule::CoolingSchedule;
pub use search::{anneal, anneal_with_rng, run};
pub use state::{Checkpoint, MoveStats, Phase, SearchState};
