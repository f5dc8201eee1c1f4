use crate::model::problem::Problem;
use crate::model::trick_set::TrickSet;

/// Component view of one stage's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageBreakdown {
    /// Tricks performed at full value.
    pub fresh: TrickSet,
    /// Tricks carried over from the previous stage, worth half.
    pub repeated: TrickSet,
    /// Sum of per-trick contributions before any multiplier.
    pub raw_points: i64,
    pub multiplier: i64,
    /// Number of tricks performed; scales the stage a second time.
    pub volume: i64,
    pub total: i64,
}

/// Points earned at `stage` for performing `chosen` after `incoming` was
/// performed in the previous stage.
pub fn stage_points(problem: &Problem, stage: usize, chosen: TrickSet, incoming: TrickSet) -> i64 {
    breakdown(problem, stage, chosen, incoming).total
}

pub fn breakdown(
    problem: &Problem,
    stage: usize,
    chosen: TrickSet,
    incoming: TrickSet,
) -> StageBreakdown {
    let tricks = problem.tricks();
    let repeated = chosen.intersection(incoming);
    let fresh = TrickSet::from_bits(chosen.bits() & !repeated.bits());

    let raw_points: i64 = chosen
        .iter()
        .map(|index| {
            if repeated.contains(index) {
                tricks[index].repeat_points()
            } else {
                tricks[index].base_points
            }
        })
        .sum();

    let multiplier = problem.stage(stage).bonus_multiplier;
    let volume = chosen.len() as i64;

    StageBreakdown {
        fresh,
        repeated,
        raw_points,
        multiplier,
        volume,
        total: raw_points * multiplier * volume,
    }
}
