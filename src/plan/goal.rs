use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const WEEKS_PER_MONTH: u32 = 4;

/// A savings goal together with its derived contribution targets.
///
/// The targets are never set directly; they follow from the amount and the
/// period. A zero period means "no horizon chosen yet" and yields zero
/// targets rather than a division error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalState {
    pub goal_amount: Decimal,
    pub goal_period_months: u32,
    pub weekly_target: Decimal,
    pub monthly_target: Decimal,
}

impl GoalState {
    /// Builds a goal from its parameters, deriving both targets rounded to
    /// two decimal places. Negative amounts are treated as unset.
    pub fn new(goal_amount: Decimal, goal_period_months: u32) -> Self {
        let goal_amount = goal_amount.max(Decimal::ZERO);
        let (weekly_target, monthly_target) = if goal_period_months > 0 {
            let months = Decimal::from(goal_period_months);
            // Widened before multiplying so huge periods cannot overflow u32.
            let weeks = months * Decimal::from(WEEKS_PER_MONTH);
            (
                (goal_amount / weeks).round_dp(2),
                (goal_amount / months).round_dp(2),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };
        Self {
            goal_amount,
            goal_period_months,
            weekly_target,
            monthly_target,
        }
    }
}
