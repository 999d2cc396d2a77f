use std::{collections::BTreeMap, sync::Arc};

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    errors::Result,
    parse,
    storage::{self, keys, KeyValueStore, EXPENSE_PREFS},
};

/// Per-category spending limits, independent of the expense tracker that
/// supplies current spend.
///
/// The category name order and the current-expense map belong to the expense
/// tracker; this component reads them but only ever writes the limit map. A
/// zero limit means "no limit set", not "fully used".
pub struct CategoryLimits {
    store: Arc<dyn KeyValueStore>,
    categories: Vec<String>,
    limits: BTreeMap<String, Decimal>,
}

impl CategoryLimits {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let categories = storage::get_json_or_default(&*store, EXPENSE_PREFS, keys::CATEGORIES)?;
        let limits = storage::get_json_or_default(&*store, EXPENSE_PREFS, keys::MAX_EXPENSES)?;
        Ok(Self {
            store,
            categories,
            limits,
        })
    }

    /// Category names in the expense tracker's display order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn limit(&self, category: &str) -> Option<Decimal> {
        self.limits.get(category).copied()
    }

    /// Upserts the limit for a category and persists the full mapping.
    /// Negative values normalize to zero; there is no rejection path.
    pub fn set_limit(&mut self, category: &str, max_expense: Decimal) -> Result<()> {
        let value = max_expense.max(Decimal::ZERO);
        self.limits.insert(category.to_owned(), value);
        let json = serde_json::to_string(&self.limits)?;
        self.store.set(EXPENSE_PREFS, keys::MAX_EXPENSES, &json)?;
        debug!(category, limit = %value, "category limit saved");
        Ok(())
    }

    /// Text entry point for the limit input field; malformed text becomes a
    /// zero limit rather than an error.
    pub fn set_limit_text(&mut self, category: &str, text: &str) -> Result<()> {
        self.set_limit(category, parse::amount_or_zero(text))
    }

    /// Share of the limit consumed, as a percentage, uncapped. Zero when the
    /// category has no limit or a zero limit.
    pub fn percent_used(&self, category: &str, current_expense: Decimal) -> Decimal {
        match self.limits.get(category) {
            Some(max) if *max > Decimal::ZERO => {
                current_expense / *max * Decimal::ONE_HUNDRED
            }
            _ => Decimal::ZERO,
        }
    }

    /// Current spend per category, owned by the expense tracker and read-only
    /// here.
    pub fn current_expenses(&self) -> Result<BTreeMap<String, Decimal>> {
        storage::get_json_or_default(&*self.store, EXPENSE_PREFS, keys::EXPENSES)
    }

    /// Categories ordered by ascending current spend for display
    /// prioritization; categories with no recorded spend sort first, and ties
    /// keep the tracker's original order.
    pub fn sorted_by_expense_ascending(
        &self,
        current_expenses: &BTreeMap<String, Decimal>,
    ) -> Vec<String> {
        let mut ordered = self.categories.clone();
        ordered.sort_by_key(|category| {
            current_expenses
                .get(category)
                .copied()
                .unwrap_or(Decimal::ZERO)
        });
        ordered
    }
}
