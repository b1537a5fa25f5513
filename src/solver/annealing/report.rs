use std::path::Path;

use colored::*;
use csv::Writer;
use tracing::info;

use crate::domain::solution::Solution;
use crate::error::PlacementError;
use crate::setup::init_types::ServicePointRow;
use crate::solver::annealing::moves::MoveKind;
use crate::solver::annealing::state::{Checkpoint, MoveStats};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct AnnealingReport {
    pub initial_cost: f64,
    pub final_cost: f64,
    pub best_cost: f64,
    pub best_iteration: usize,
    pub iterations: usize,
    pub final_temperature: f64,
    pub service_points: usize,
    /// Feasibility is not checked; always `true`.
    pub valid: bool,
    pub improving_moves: usize,
    pub stats: MoveStats,
    pub history: Vec<Checkpoint>,
}

pub fn print_summary(report: &AnnealingReport) {
    println!("FINAL SOLUTION");

    let final_line = format!("Final cost: {:.2}", report.final_cost);
    if report.final_cost <= report.initial_cost {
        println!(
            "Initial cost: {:.2} -> {}",
            report.initial_cost,
            final_line.green()
        );
    } else {
        println!(
            "Initial cost: {:.2} -> {}",
            report.initial_cost,
            final_line.red()
        );
    }
    println!(
        "Best cost: {:.2} (iteration {})",
        report.best_cost, report.best_iteration
    );
    println!("Number of service points: {}", report.service_points);
    println!(
        "Iterations: {}, final temperature: {:.6}",
        report.iterations, report.final_temperature
    );
    println!("Solution is valid: {}", report.valid.to_string().bold());

    for line in move_stat_lines(report) {
        println!("{}", line);
    }
}

/// Per-kind move counts followed by the improving-move total.
fn move_stat_lines(report: &AnnealingReport) -> Vec<String> {
    let mut lines: Vec<String> = MoveKind::ALL
        .iter()
        .map(|&kind| {
            format!(
                "{:>8}: attempted {}, accepted {}, rejected {}, no-op {}",
                kind.to_string(),
                report.stats.attempted(kind),
                report.stats.accepted(kind),
                report.stats.rejected(kind),
                report.stats.noop(kind)
            )
        })
        .collect();
    lines.push(format!("Improving moves: {}", report.improving_moves));
    lines
}

/// Writes the progress checkpoints as CSV.
pub fn save_history_csv(history: &[Checkpoint], path: &Path) -> Result<(), PlacementError> {
    let out_err = |source| PlacementError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = Writer::from_path(path).map_err(out_err)?;

    wtr.write_record(["iteration", "cost", "temperature", "service_points"])
        .map_err(out_err)?;

    for cp in history {
        wtr.write_record([
            cp.iteration.to_string(),
            cp.cost.to_string(),
            cp.temperature.to_string(),
            cp.service_points.to_string(),
        ])
        .map_err(out_err)?;
    }

    wtr.flush().map_err(|e| out_err(e.into()))?;
    info!("Wrote {} checkpoints to {}", history.len(), path.display());
    Ok(())
}

/// Writes the solution in the service-point input layout.
pub fn save_solution_csv(solution: &Solution, path: &Path) -> Result<(), PlacementError> {
    let out_err = |source| PlacementError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = Writer::from_path(path).map_err(out_err)?;
    for sp in solution.points() {
        wtr.serialize(ServicePointRow::from(sp)).map_err(out_err)?;
    }
    wtr.flush().map_err(|e| out_err(e.into()))?;
    info!(
        "Wrote {} service points to {}",
        solution.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_lines_include_improving_moves() {
        let report = AnnealingReport {
            initial_cost: 10.0,
            final_cost: 8.0,
            best_cost: 8.0,
            best_iteration: 3,
            iterations: 5,
            final_temperature: 1.0,
            service_points: 2,
            valid: true,
            improving_moves: 7,
            stats: MoveStats::default(),
            history: Vec::new(),
        };
        let lines = move_stat_lines(&report);
        assert_eq!(lines.len(), MoveKind::ALL.len() + 1);
        assert_eq!(lines.last().map(String::as_str), Some("Improving moves: 7"));
    }
}
