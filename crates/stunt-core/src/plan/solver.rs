// Stage planner: dynamic programming over (stage, incoming trick set).
//
// The value of a state is the best total obtainable from that stage to the
// end, given the set performed in the previous stage. Candidates are tried
// in ascending mask order against a best seeded at zero with the empty set,
// and only a strictly greater total replaces it, so the first maximal
// candidate wins and negative totals never do.

use super::enumerate::FeasibleSubsets;
use super::scoring::{StageBreakdown, breakdown, stage_points};
use crate::model::problem::Problem;
use crate::model::trick_set::TrickSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStrategy {
    /// Depth-first exploration from the first stage; fills reachable states only.
    #[default]
    Memoized,
    /// Iterative fill of every state from the last stage backward.
    BottomUp,
}

impl SolveStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            SolveStrategy::Memoized => "memoized",
            SolveStrategy::BottomUp => "bottom_up",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "memoized" | "memo" | "top_down" => Some(SolveStrategy::Memoized),
            "bottom_up" | "iterative" => Some(SolveStrategy::BottomUp),
            _ => None,
        }
    }
}

/// Flat `stages x 2^tricks` table; `None` marks a state not yet computed.
#[derive(Debug, Clone)]
pub struct StageTable<T> {
    width: usize,
    slots: Vec<Option<T>>,
}

impl<T: Copy> StageTable<T> {
    pub fn new(stages: usize, width: usize) -> Self {
        Self {
            width,
            slots: vec![None; stages * width],
        }
    }

    pub fn get(&self, stage: usize, incoming: TrickSet) -> Option<T> {
        self.slots[self.slot(stage, incoming)]
    }

    pub fn set(&mut self, stage: usize, incoming: TrickSet, value: T) {
        let slot = self.slot(stage, incoming);
        self.slots[slot] = Some(value);
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn slot(&self, stage: usize, incoming: TrickSet) -> usize {
        debug_assert!(incoming.index() < self.width);
        stage * self.width + incoming.index()
    }
}

/// Best downstream total for a state and the set chosen to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub total: i64,
    pub choice: TrickSet,
}

impl Decision {
    const SEED: Self = Self {
        total: 0,
        choice: TrickSet::EMPTY,
    };

    fn offer(&mut self, candidate: TrickSet, total: i64) {
        if total > self.total {
            *self = Decision {
                total,
                choice: candidate,
            };
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// States whose optimum was computed and stored.
    pub states_computed: usize,
    /// Candidate evaluations across all states.
    pub transitions: usize,
}

/// Maximum total score and the trick set chosen at each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub total: i64,
    pub selections: Vec<TrickSet>,
}

impl Plan {
    pub fn stage_count(&self) -> usize {
        self.selections.len()
    }

    /// Replays the selections and returns each stage's score components.
    pub fn stage_scores(&self, problem: &Problem) -> Vec<StageBreakdown> {
        let mut incoming = TrickSet::EMPTY;
        self.selections
            .iter()
            .enumerate()
            .map(|(stage, &chosen)| {
                let parts = breakdown(problem, stage, chosen, incoming);
                incoming = chosen;
                parts
            })
            .collect()
    }
}

pub struct Planner<'a> {
    problem: &'a Problem,
    feasible: FeasibleSubsets,
    table: StageTable<Decision>,
    stats: SolveStats,
}

impl<'a> Planner<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            feasible: FeasibleSubsets::build(problem),
            table: StageTable::new(problem.stage_count(), problem.subset_count()),
            stats: SolveStats::default(),
        }
    }

    pub fn feasible(&self) -> &FeasibleSubsets {
        &self.feasible
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    pub fn table(&self) -> &StageTable<Decision> {
        &self.table
    }

    pub fn solve(&mut self, strategy: SolveStrategy) -> Plan {
        self.table = StageTable::new(self.problem.stage_count(), self.problem.subset_count());
        self.stats = SolveStats::default();

        match strategy {
            SolveStrategy::Memoized => {
                explore(
                    self.problem,
                    &self.feasible,
                    &mut self.table,
                    &mut self.stats,
                );
            }
            SolveStrategy::BottomUp => self.fill_backward(),
        }

        self.reconstruct()
    }

    fn fill_backward(&mut self) {
        let problem = self.problem;
        let stages = problem.stage_count();
        let width = problem.subset_count();

        for stage in (0..stages).rev() {
            for bits in 0..width as u32 {
                let incoming = TrickSet::from_bits(bits);
                let table = &self.table;
                let stats = &mut self.stats;
                let decision = pick_best(self.feasible.for_stage(stage), |candidate| {
                    stats.transitions += 1;
                    let downstream = if stage + 1 == stages {
                        0
                    } else {
                        table
                            .get(stage + 1, candidate)
                            .map_or(0, |next| next.total)
                    };
                    stage_points(problem, stage, candidate, incoming) + downstream
                });
                self.table.set(stage, incoming, decision);
                self.stats.states_computed += 1;
            }
        }
    }

    fn reconstruct(&self) -> Plan {
        let stages = self.problem.stage_count();
        let mut selections = Vec::with_capacity(stages);
        let mut incoming = TrickSet::EMPTY;

        for stage in 0..stages {
            let decision = self.table.get(stage, incoming);
            debug_assert!(decision.is_some(), "stage {stage} unsolved on replay path");
            let chosen = decision.map_or(TrickSet::EMPTY, |d| d.choice);
            selections.push(chosen);
            incoming = chosen;
        }

        let total = if stages == 0 {
            0
        } else {
            self.table
                .get(0, TrickSet::EMPTY)
                .map_or(0, |decision| decision.total)
        };

        Plan { total, selections }
    }
}

/// Solves `problem` with the memoized strategy.
pub fn solve(problem: &Problem) -> Plan {
    Planner::new(problem).solve(SolveStrategy::Memoized)
}

/// A state whose candidates are partly evaluated.
struct Frame {
    stage: usize,
    incoming: TrickSet,
    next: usize,
    best: Decision,
}

impl Frame {
    fn new(stage: usize, incoming: TrickSet) -> Self {
        Self {
            stage,
            incoming,
            next: 0,
            best: Decision::SEED,
        }
    }
}

/// Depth-first fill of every state reachable from `(0, EMPTY)`.
///
/// The stack holds one frame per stage on the current path, so its depth is
/// bounded by the stage count and lives on the heap.
fn explore(
    problem: &Problem,
    feasible: &FeasibleSubsets,
    table: &mut StageTable<Decision>,
    stats: &mut SolveStats,
) {
    let stages = problem.stage_count();
    if stages == 0 {
        return;
    }

    let mut stack = vec![Frame::new(0, TrickSet::EMPTY)];
    while let Some(frame) = stack.last_mut() {
        let candidates = feasible.for_stage(frame.stage);
        let Some(&candidate) = candidates.get(frame.next) else {
            table.set(frame.stage, frame.incoming, frame.best);
            stats.states_computed += 1;
            stack.pop();
            continue;
        };

        let next_stage = frame.stage + 1;
        let downstream = if next_stage == stages {
            Some(0)
        } else {
            table.get(next_stage, candidate).map(|next| next.total)
        };

        match downstream {
            Some(downstream) => {
                stats.transitions += 1;
                let total =
                    stage_points(problem, frame.stage, candidate, frame.incoming) + downstream;
                frame.best.offer(candidate, total);
                frame.next += 1;
            }
            None => stack.push(Frame::new(next_stage, candidate)),
        }
    }
}

fn pick_best(candidates: &[TrickSet], mut total_for: impl FnMut(TrickSet) -> i64) -> Decision {
    let mut best = Decision::SEED;
    for &candidate in candidates {
        best.offer(candidate, total_for(candidate));
    }
    best
}
