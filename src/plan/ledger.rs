use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    errors::{PlanningError, Result},
    parse,
    storage::{self, keys, KeyValueStore, GOAL_PREFS},
};

use super::GoalState;

/// The savings-goal aggregate: goal parameters plus the ordered sequence of
/// saving contributions, persisted through an injected store.
///
/// The in-memory state is the source of truth. Mutating operations apply the
/// change in memory first and then persist; a persistence failure is returned
/// to the caller but does not roll the change back. One mutation at a time per
/// instance — callers sharing a ledger across threads must serialize access.
pub struct GoalLedger {
    store: Arc<dyn KeyValueStore>,
    goal: GoalState,
    savings: Vec<Decimal>,
}

impl GoalLedger {
    /// Rehydrates the ledger from the store. Malformed scalar fields degrade
    /// to zero; targets are re-derived rather than trusted from storage. A
    /// corrupted saved-amounts list is a storage fault and surfaces as such.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let amount = match store.get(GOAL_PREFS, keys::GOAL_AMOUNT)? {
            Some(text) => parse::amount_or_zero(&text),
            None => Decimal::ZERO,
        };
        let months = match store.get(GOAL_PREFS, keys::GOAL_PERIOD)? {
            Some(text) => parse::months_or_zero(&text),
            None => 0,
        };
        let savings = storage::get_json_or_default(&*store, GOAL_PREFS, keys::SAVED_AMOUNTS)?;
        Ok(Self {
            store,
            goal: GoalState::new(amount, months),
            savings,
        })
    }

    pub fn goal(&self) -> &GoalState {
        &self.goal
    }

    pub fn savings(&self) -> &[Decimal] {
        &self.savings
    }

    /// Recomputes the goal from user-entered text. Unparsable or missing
    /// values degrade to zero, so this never fails. Does not persist; call
    /// [`GoalLedger::save_goal`] once the user confirms.
    pub fn set_goal(&mut self, amount: &str, period_months: &str) -> GoalState {
        self.goal = GoalState::new(
            parse::amount_or_zero(amount),
            parse::months_or_zero(period_months),
        );
        self.goal.clone()
    }

    /// Persists the goal's four fields as a unit: a later load sees either the
    /// previous goal or this one, never a mix.
    pub fn save_goal(&self) -> Result<()> {
        let entries = [
            (keys::GOAL_AMOUNT, self.goal.goal_amount.to_string()),
            (keys::GOAL_PERIOD, self.goal.goal_period_months.to_string()),
            (keys::WEEKLY_SAVING, two_decimal_places(self.goal.weekly_target)),
            (
                keys::MONTHLY_SAVING,
                two_decimal_places(self.goal.monthly_target),
            ),
        ];
        self.store.set_many(GOAL_PREFS, &entries)?;
        debug!(
            amount = %self.goal.goal_amount,
            months = self.goal.goal_period_months,
            "goal saved"
        );
        Ok(())
    }

    /// Records a saving contribution from user-entered text. This is the one
    /// strict input: missing, unparsable, or non-positive amounts are rejected
    /// with [`PlanningError::NotPositive`] and the sequence is left untouched.
    /// On success the entry is appended and the full sequence persisted.
    pub fn add_saving(&mut self, amount: &str) -> Result<&[Decimal]> {
        let value = parse::amount_or_zero(amount);
        if value <= Decimal::ZERO {
            return Err(PlanningError::NotPositive);
        }
        self.savings.push(value);
        debug!(%value, count = self.savings.len(), "saving added");
        self.persist_savings()?;
        Ok(&self.savings)
    }

    /// Replaces the entry at `index` in place, preserving its position.
    pub fn update_saving(&mut self, index: usize, new_amount: Decimal) -> Result<()> {
        let len = self.savings.len();
        let slot = self
            .savings
            .get_mut(index)
            .ok_or(PlanningError::IndexOutOfRange { index, len })?;
        *slot = new_amount;
        self.persist_savings()
    }

    /// Removes the entry at `index`, shifting later entries down by one.
    pub fn delete_saving(&mut self, index: usize) -> Result<()> {
        let len = self.savings.len();
        if index >= len {
            return Err(PlanningError::IndexOutOfRange { index, len });
        }
        self.savings.remove(index);
        self.persist_savings()
    }

    pub fn total_saved(&self) -> Decimal {
        self.savings.iter().copied().sum()
    }

    /// Progress toward the goal as a percentage, uncapped so over-saving reads
    /// as more than one hundred. Zero when no goal amount is set.
    pub fn percent_to_goal(&self) -> Decimal {
        if self.goal.goal_amount > Decimal::ZERO {
            self.total_saved() / self.goal.goal_amount * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    fn persist_savings(&self) -> Result<()> {
        let json = serde_json::to_string(&self.savings)?;
        self.store.set(GOAL_PREFS, keys::SAVED_AMOUNTS, &json)
    }
}

fn two_decimal_places(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
