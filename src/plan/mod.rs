//! Savings-goal and category-limit domain models and aggregates.

pub mod goal;
pub mod ledger;
pub mod limits;

pub use goal::GoalState;
pub use ledger::GoalLedger;
pub use limits::CategoryLimits;
