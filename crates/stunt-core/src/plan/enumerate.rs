use crate::model::problem::Problem;
use crate::model::trick_set::TrickSet;

/// Per-stage lists of the trick sets that fit inside each stage's time budget.
///
/// Lists are in ascending mask order; the planner's tie-breaking depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibleSubsets {
    per_stage: Vec<Vec<TrickSet>>,
}

impl FeasibleSubsets {
    pub fn build(problem: &Problem) -> Self {
        let mut per_stage = vec![Vec::new(); problem.stage_count()];

        for bits in 0..problem.subset_count() as u32 {
            let set = TrickSet::from_bits(bits);
            let total_time = problem.total_time(set);
            for (stage, feasible) in problem.stages().iter().zip(per_stage.iter_mut()) {
                if stage.admits(total_time) {
                    feasible.push(set);
                }
            }
        }

        Self { per_stage }
    }

    pub fn for_stage(&self, stage: usize) -> &[TrickSet] {
        &self.per_stage[stage]
    }

    pub fn stage_count(&self) -> usize {
        self.per_stage.len()
    }

    pub fn total_candidates(&self) -> usize {
        self.per_stage.iter().map(Vec::len).sum()
    }
}
