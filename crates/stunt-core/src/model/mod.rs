pub mod problem;
pub mod stage;
pub mod trick;
pub mod trick_set;
