#![deny(warnings)]
pub mod generate;
pub mod model;
pub mod plan;

pub use model::problem::{Problem, ProblemError};
pub use model::stage::Stage;
pub use model::trick::Trick;
pub use model::trick_set::{MAX_TRICKS, TrickSet};
pub use plan::{Plan, Planner, SolveStats, SolveStrategy, solve};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "stunt-plan"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "stunt-plan");
        assert!(!AppInfo::version().is_empty());
    }
}
