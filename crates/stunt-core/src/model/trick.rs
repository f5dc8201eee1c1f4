use serde::{Deserialize, Serialize};

/// A trick that can be performed during a stage.
///
/// A trick's position in the problem's trick list is also its bit in every
/// [`TrickSet`](super::trick_set::TrickSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trick {
    pub base_points: i64,
    pub time_required: u32,
}

impl Trick {
    pub const fn new(base_points: i64, time_required: u32) -> Self {
        Self {
            base_points,
            time_required,
        }
    }

    /// Points earned when the trick was also performed in the previous stage.
    pub const fn repeat_points(&self) -> i64 {
        self.base_points / 2
    }
}
