//! Seeded random problems for property tests and benchmarks.

use crate::model::problem::Problem;
use crate::model::stage::Stage;
use crate::model::trick::Trick;
use crate::model::trick_set::MAX_TRICKS;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Value ranges sampled by [`random_problem_with`].
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub max_multiplier: i64,
    pub max_points: i64,
    pub max_trick_time: u32,
    pub max_stage_time: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_multiplier: 5,
            max_points: 100,
            max_trick_time: 6,
            max_stage_time: 12,
        }
    }
}

pub fn random_problem(seed: u64, stages: usize, tricks: usize) -> Problem {
    random_problem_with(seed, stages, tricks, &GeneratorConfig::default())
}

/// Builds a problem with non-negative values drawn from `config`.
///
/// `tricks` is clamped to [`MAX_TRICKS`] so the result is always valid.
pub fn random_problem_with(
    seed: u64,
    stages: usize,
    tricks: usize,
    config: &GeneratorConfig,
) -> Problem {
    let mut rng = SmallRng::seed_from_u64(seed);

    let stages = (0..stages)
        .map(|_| {
            Stage::new(
                rng.gen_range(0..=config.max_multiplier),
                rng.gen_range(0..=config.max_stage_time),
            )
        })
        .collect();
    let tricks = (0..tricks.min(MAX_TRICKS))
        .map(|_| {
            Trick::new(
                rng.gen_range(0..=config.max_points),
                rng.gen_range(0..=config.max_trick_time),
            )
        })
        .collect();

    match Problem::new(stages, tricks) {
        Ok(problem) => problem,
        Err(err) => unreachable!("trick count clamped to the supported range: {err}"),
    }
}
