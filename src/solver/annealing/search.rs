use std::error::Error;

use rand::Rng;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AnnealingConfig;
use crate::domain::catalog::CoordinateCatalog;
use crate::domain::solution::Solution;
use crate::error::PlacementError;
use crate::setup::init::setup;
use crate::solver::annealing::acceptance::{accept, AcceptanceMode};
use crate::solver::annealing::moves::{self, MoveKind};
use crate::solver::annealing::report::{
    print_summary, save_history_csv, save_solution_csv, AnnealingReport,
};
use crate::solver::annealing::state::{Checkpoint, Phase, SearchState};
use crate::utils::create_rng;

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .try_init()?;
    Ok(())
}

fn enter_phase(state: &mut SearchState, phase: Phase) {
    debug!("Phase {} -> {}", state.phase, phase);
    state.phase = phase;
}

fn record_checkpoint(
    iteration: usize,
    state: &mut SearchState,
    solution: &Solution,
    config: &AnnealingConfig,
) {
    // Fresh fold rather than the tracked cost.
    let cost = config.cost_model.total_cost(solution);
    info!(
        "Iteration {}, cost: {:.2}, temperature: {:.6}, service points: {}",
        iteration,
        cost,
        state.temperature,
        solution.len()
    );
    state.history.push(Checkpoint {
        iteration,
        cost,
        temperature: state.temperature,
        service_points: solution.len(),
    });
}

/// Perform a single annealing iteration: cool, move, evaluate, keep or revert.
fn perform_iteration<R: Rng + ?Sized>(
    iteration: usize,
    state: &mut SearchState,
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Result<(), PlacementError> {
    state.temperature = config.cooling.temperature(
        config.initial_temperature,
        config.min_temperature,
        iteration,
        config.iterations,
    );

    let kind = MoveKind::select(rng.gen(), config.delete_threshold, config.add_threshold);
    let applied = moves::apply(kind, solution, catalog, rng);
    state.stats.attempted[kind.index()] += 1;

    if applied.is_noop() {
        state.stats.noop[kind.index()] += 1;
    } else {
        let new_cost = config.cost_model.total_cost(solution);
        let keep = match config.acceptance {
            AcceptanceMode::Metropolis => {
                accept(state.current_cost, new_cost, state.temperature, rng)?
            }
            AcceptanceMode::AlwaysCommit => true,
        };

        if keep {
            state.stats.accepted[kind.index()] += 1;
            if new_cost < state.current_cost {
                state.improving_moves += 1;
            }
            state.current_cost = new_cost;
            if new_cost < state.best_cost {
                state.best_cost = new_cost;
                state.best_iteration = iteration;
            }
        } else {
            applied.revert(solution);
            state.stats.rejected[kind.index()] += 1;
        }
    }

    state.iterations = iteration;
    if iteration % config.progress_interval == 0 {
        record_checkpoint(iteration, state, solution, config);
    }
    Ok(())
}

/// Anneals `solution` in place using a generator built from `config.seed`.
pub fn anneal(
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    config: &AnnealingConfig,
) -> Result<AnnealingReport, PlacementError> {
    let mut rng = create_rng(config.seed);
    anneal_with_rng(solution, catalog, config, &mut rng)
}

pub fn anneal_with_rng<R: Rng + ?Sized>(
    solution: &mut Solution,
    catalog: &CoordinateCatalog,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Result<AnnealingReport, PlacementError> {
    config.validate()?;

    let initial_cost = config.cost_model.total_cost(solution);
    let mut state = SearchState::new(initial_cost, config.initial_temperature);
    info!("Initial cost: {:.2}", initial_cost);
    info!("Number of service points: {}", solution.len());

    let loop_span = span!(
        Level::INFO,
        "annealing",
        total_iterations = config.iterations
    );
    let _loop_guard = loop_span.enter();

    enter_phase(&mut state, Phase::Running);
    for iteration in 1..=config.iterations {
        perform_iteration(iteration, &mut state, solution, catalog, config, rng)?;
    }
    enter_phase(&mut state, Phase::Terminated);

    let final_cost = config.cost_model.total_cost(solution);
    debug_assert!((final_cost - state.current_cost).abs() <= 1e-6 * final_cost.abs().max(1.0));
    info!(
        "Final cost: {:.2}, service points: {}",
        final_cost,
        solution.len()
    );

    Ok(AnnealingReport {
        initial_cost,
        final_cost,
        best_cost: state.best_cost,
        best_iteration: state.best_iteration,
        iterations: state.iterations,
        final_temperature: state.temperature,
        service_points: solution.len(),
        valid: true,
        improving_moves: state.improving_moves,
        stats: state.stats,
        history: state.history,
    })
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;
    let config = AnnealingConfig::from_env()?;

    info!(
        "Starting annealer: {} iterations, T0 = {}, schedule = {}, acceptance = {}",
        config.iterations, config.initial_temperature, config.cooling, config.acceptance
    );
    debug!("Configuration: {:?}", config);

    let (mut solution, catalog) = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        setup(&config)?
    };

    let report = anneal(&mut solution, &catalog, &config)?;
    print_summary(&report);

    if let Some(path) = &config.history_path {
        save_history_csv(&report.history, path)?;
    }
    if let Some(path) = &config.solution_path {
        save_solution_csv(&solution, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Coordinate, ServicePoint};
    use crate::evaluation::cost::total_cost;
    use crate::solver::annealing::schedule::CoolingSchedule;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> CoordinateCatalog {
        CoordinateCatalog::new(
            (0..10)
                .map(|i| Coordinate::new(i as f64, (i * 2) as f64))
                .collect(),
        )
        .unwrap()
    }

    fn heavy_solution(n: u64) -> Solution {
        Solution::new(
            (0..n)
                .map(|id| ServicePoint {
                    id,
                    location: Coordinate::new(0.0, 0.0),
                    pickup: 1_000.0 * id as f64,
                    delivery: 0.0,
                    total_dist: 500.0,
                    cost: 0.0,
                })
                .collect(),
        )
    }

    fn small_config() -> AnnealingConfig {
        AnnealingConfig::default()
            .with_iterations(2_000)
            .with_initial_temperature(50_000.0)
            .with_progress_interval(500)
            .with_seed(17)
    }

    #[test]
    fn test_zero_iterations_leaves_solution_untouched() {
        let mut solution = heavy_solution(5);
        let before = solution.points().to_vec();
        let config = small_config().with_iterations(0);

        let report = anneal(&mut solution, &catalog(), &config).unwrap();

        assert_eq!(solution.points(), before.as_slice());
        assert_eq!(report.initial_cost, report.final_cost);
        assert_eq!(report.iterations, 0);
        assert!(report.history.is_empty());
        assert_eq!(report.stats.attempted, [0, 0, 0]);
    }

    #[test]
    fn test_report_matches_solution() {
        let mut solution = heavy_solution(8);
        let report = anneal(&mut solution, &catalog(), &small_config()).unwrap();

        assert_eq!(report.iterations, 2_000);
        assert_eq!(report.service_points, solution.len());
        assert!((report.final_cost - total_cost(&solution)).abs() < 1e-6);
        assert!(report.best_cost <= report.initial_cost);
        assert!(report.best_cost <= report.final_cost);
        assert!(report.valid);
        assert_eq!(report.stats.attempted.iter().sum::<usize>(), 2_000);
    }

    #[test]
    fn test_every_attempt_is_classified() {
        let mut solution = heavy_solution(3);
        let report = anneal(&mut solution, &catalog(), &small_config()).unwrap();
        for kind in MoveKind::ALL {
            let s = &report.stats;
            assert_eq!(
                s.attempted(kind),
                s.accepted(kind) + s.rejected(kind) + s.noop(kind)
            );
        }
    }

    #[test]
    fn test_checkpoints_follow_interval() {
        let mut solution = heavy_solution(4);
        let report = anneal(&mut solution, &catalog(), &small_config()).unwrap();
        let iterations: Vec<usize> = report.history.iter().map(|c| c.iteration).collect();
        assert_eq!(iterations, vec![500, 1_000, 1_500, 2_000]);
        let temps: Vec<f64> = report.history.iter().map(|c| c.temperature).collect();
        assert!(temps.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut a = heavy_solution(6);
        let mut b = heavy_solution(6);
        let ra = anneal(&mut a, &catalog(), &small_config()).unwrap();
        let rb = anneal(&mut b, &catalog(), &small_config()).unwrap();
        assert_eq!(a.points(), b.points());
        assert_eq!(ra.final_cost, rb.final_cost);
        assert_eq!(ra.stats, rb.stats);
    }

    #[test]
    fn test_cold_metropolis_never_worsens() {
        // At a floor temperature of 1e-9 any cost increase has probability 0.
        let mut solution = heavy_solution(6);
        let config = small_config()
            .with_initial_temperature(1e-9)
            .with_min_temperature(1e-9);
        let report = anneal(&mut solution, &catalog(), &config).unwrap();

        assert_eq!(report.stats.accepted(MoveKind::Add), 0);
        assert!(report.final_cost <= report.initial_cost);
        for window in report.history.windows(2) {
            assert!(window[1].cost <= window[0].cost);
        }
    }

    #[test]
    fn test_always_commit_keeps_every_move() {
        let mut solution = heavy_solution(6);
        let config = small_config().with_acceptance(AcceptanceMode::AlwaysCommit);
        let report = anneal(&mut solution, &catalog(), &config).unwrap();
        assert_eq!(report.stats.total_rejected(), 0);
    }

    #[test]
    fn test_relocate_only_keeps_cost() {
        let mut solution = heavy_solution(4);
        let config = small_config().with_move_thresholds(0.0, 0.0);
        let report = anneal(&mut solution, &catalog(), &config).unwrap();

        assert_eq!(report.stats.attempted(MoveKind::Relocate), 2_000);
        assert_eq!(solution.len(), 4);
        assert_eq!(report.initial_cost, report.final_cost);
        let placed: Vec<Coordinate> = solution.points().iter().map(|sp| sp.location).collect();
        assert!(placed.iter().all(|c| catalog().coordinates().contains(c)));
    }

    #[test]
    fn test_empty_solution_only_grows_by_add() {
        let mut solution = Solution::default();
        let config = small_config()
            .with_acceptance(AcceptanceMode::AlwaysCommit)
            .with_move_thresholds(0.0, 1.0)
            .with_iterations(10);
        let report = anneal(&mut solution, &catalog(), &config).unwrap();
        assert_eq!(solution.len(), 10);
        assert_eq!(report.final_cost, 750_000.0);
    }

    #[test]
    fn test_invalid_config_rejected_before_loop() {
        let mut solution = heavy_solution(2);
        let config = small_config().with_cooling(CoolingSchedule::Geometric { alpha: 2.0 });
        let err = anneal(&mut solution, &catalog(), &config).unwrap_err();
        assert!(matches!(err, PlacementError::Configuration(_)));
    }

    #[test]
    fn test_explicit_rng_is_used() {
        let mut a = heavy_solution(5);
        let mut b = heavy_solution(5);
        let config = small_config();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        anneal_with_rng(&mut a, &catalog(), &config, &mut rng).unwrap();
        anneal(&mut b, &catalog(), &config).unwrap();
        assert_eq!(a.points(), b.points());
    }
}
