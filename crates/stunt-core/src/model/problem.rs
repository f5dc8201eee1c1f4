use super::stage::Stage;
use super::trick::Trick;
use super::trick_set::{MAX_TRICKS, TrickSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered stages plus the trick catalogue shared by every stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct Problem {
    stages: Vec<Stage>,
    tricks: Vec<Trick>,
}

#[derive(Deserialize)]
struct RawProblem {
    stages: Vec<Stage>,
    tricks: Vec<Trick>,
}

impl TryFrom<RawProblem> for Problem {
    type Error = ProblemError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        Problem::new(raw.stages, raw.tricks)
    }
}

impl Problem {
    pub fn new(stages: Vec<Stage>, tricks: Vec<Trick>) -> Result<Self, ProblemError> {
        if tricks.len() > MAX_TRICKS {
            return Err(ProblemError::TooManyTricks {
                count: tricks.len(),
                max: MAX_TRICKS,
            });
        }
        if score_bound(&stages, &tricks).is_none_or(|bound| bound > i64::MAX as u128) {
            return Err(ProblemError::ScoreOverflow);
        }
        Ok(Self { stages, tricks })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn stage(&self, index: usize) -> &Stage {
        &self.stages[index]
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn trick_count(&self) -> usize {
        self.tricks.len()
    }

    /// Number of distinct trick sets, i.e. the width of every per-stage table.
    pub fn subset_count(&self) -> usize {
        TrickSet::subset_count(self.tricks.len())
    }

    pub fn total_time(&self, set: TrickSet) -> u64 {
        set.iter()
            .map(|index| self.tricks[index].time_required as u64)
            .sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Upper bound on the magnitude of any plan total or partial total.
///
/// Each stage contributes at most `points * multiplier * count` with
/// `count` tricks of at most `points` each.
fn score_bound(stages: &[Stage], tricks: &[Trick]) -> Option<u128> {
    let count = tricks.len() as u128;
    let max_points = tricks
        .iter()
        .map(|trick| trick.base_points.unsigned_abs())
        .max()
        .unwrap_or(0) as u128;
    let max_multiplier = stages
        .iter()
        .map(|stage| stage.bonus_multiplier.unsigned_abs())
        .max()
        .unwrap_or(0) as u128;

    (stages.len() as u128)
        .checked_mul(count)?
        .checked_mul(count)?
        .checked_mul(max_points)?
        .checked_mul(max_multiplier)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    TooManyTricks { count: usize, max: usize },
    ScoreOverflow,
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::TooManyTricks { count, max } => {
                write!(f, "{count} tricks requested but at most {max} are supported")
            }
            ProblemError::ScoreOverflow => {
                write!(f, "points and multipliers are large enough to overflow the score")
            }
        }
    }
}

impl std::error::Error for ProblemError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Problem {
        Problem::new(
            vec![Stage::new(2, 5), Stage::new(1, 3)],
            vec![Trick::new(10, 3), Trick::new(6, 2)],
        )
        .unwrap()
    }

    #[test]
    fn rejects_more_tricks_than_the_mask_supports() {
        let tricks = vec![Trick::new(1, 1); MAX_TRICKS + 1];
        let err = Problem::new(vec![Stage::new(1, 1)], tricks).unwrap_err();
        assert_eq!(
            err,
            ProblemError::TooManyTricks {
                count: MAX_TRICKS + 1,
                max: MAX_TRICKS
            }
        );
    }

    #[test]
    fn rejects_values_whose_scores_could_overflow() {
        let err = Problem::new(
            vec![Stage::new(1, 5)],
            vec![Trick::new(5_000_000_000_000_000_000, 1); 2],
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::ScoreOverflow);

        let err = Problem::new(
            vec![Stage::new(i32::MAX as i64, 5); 2],
            vec![Trick::new(i32::MAX as i64, 1); MAX_TRICKS],
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::ScoreOverflow);

        let err = Problem::new(vec![Stage::new(i64::MIN, 1)], vec![Trick::new(i64::MIN, 1)])
            .unwrap_err();
        assert_eq!(err, ProblemError::ScoreOverflow);
    }

    #[test]
    fn accepts_values_at_the_overflow_boundary() {
        // 1 stage * 1 trick * 1 trick * points * multiplier == i64::MAX exactly.
        let problem = Problem::new(vec![Stage::new(1, 1)], vec![Trick::new(i64::MAX, 1)]);
        assert!(problem.is_ok());

        // 2 * (2^31 - 1)^2 still fits below i64::MAX.
        let problem = Problem::new(
            vec![Stage::new(i32::MAX as i64, 5); 2],
            vec![Trick::new(i32::MAX as i64, 1)],
        );
        assert!(problem.is_ok());
    }

    #[test]
    fn total_time_sums_selected_tricks() {
        let problem = sample();
        assert_eq!(problem.total_time(TrickSet::EMPTY), 0);
        assert_eq!(problem.total_time(TrickSet::from_bits(0b01)), 3);
        assert_eq!(problem.total_time(TrickSet::from_bits(0b11)), 5);
        assert_eq!(problem.subset_count(), 4);
    }

    #[test]
    fn json_document_round_trips() {
        let problem = sample();
        let json = problem.to_json().unwrap();
        assert_eq!(Problem::from_json(&json).unwrap(), problem);
    }

    #[test]
    fn json_document_enforces_trick_bound() {
        let tricks: Vec<String> = (0..=MAX_TRICKS)
            .map(|_| r#"{"base_points":1,"time_required":1}"#.to_string())
            .collect();
        let json = format!(r#"{{"stages":[],"tricks":[{}]}}"#, tricks.join(","));
        let err = Problem::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("at most"));
    }
}
