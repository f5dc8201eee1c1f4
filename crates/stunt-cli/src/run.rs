use std::time::Instant;

use stunt_core::{Plan, Planner, Problem, SolveStats, SolveStrategy};
use tracing::{Level, event};

#[derive(Debug, Clone)]
pub struct PlanReport {
    pub plan: Plan,
    pub stats: SolveStats,
    pub feasible_candidates: usize,
}

/// Solves `problem` and records a `stunt_cli::solve` event when INFO is enabled.
pub fn plan_problem(problem: &Problem, strategy: SolveStrategy) -> PlanReport {
    let start = Instant::now();
    let mut planner = Planner::new(problem);
    let plan = planner.solve(strategy);
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let stats = planner.stats();
    let feasible_candidates = planner.feasible().total_candidates();

    if tracing::enabled!(Level::INFO) {
        event!(
            target: "stunt_cli::solve",
            Level::INFO,
            stages = problem.stage_count() as u64,
            tricks = problem.trick_count() as u64,
            strategy = strategy.as_str(),
            feasible_candidates = feasible_candidates as u64,
            states_computed = stats.states_computed as u64,
            transitions = stats.transitions as u64,
            total = plan.total,
            elapsed_ms
        );
    }

    PlanReport {
        plan,
        stats,
        feasible_candidates,
    }
}
