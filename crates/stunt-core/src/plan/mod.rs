pub mod enumerate;
pub mod scoring;
pub mod solver;

pub use enumerate::FeasibleSubsets;
pub use scoring::{StageBreakdown, breakdown, stage_points};
pub use solver::{Plan, Planner, SolveStats, SolveStrategy, StageTable, solve};
