use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stage {
    pub bonus_multiplier: i64,
    pub max_time: u32,
}

impl Stage {
    pub const fn new(bonus_multiplier: i64, max_time: u32) -> Self {
        Self {
            bonus_multiplier,
            max_time,
        }
    }

    pub const fn admits(&self, total_time: u64) -> bool {
        total_time <= self.max_time as u64
    }
}
