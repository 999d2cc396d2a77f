pub mod json_backend;
pub mod memory;
pub mod write_behind;

use serde::de::DeserializeOwned;

use crate::errors::Result;

/// Namespace holding the savings goal and the saved-amounts list.
pub const GOAL_PREFS: &str = "GoalPrefs";
/// Namespace shared with the expense tracker: category order, limits, and the
/// current-expense map (the last is read-only from this crate).
pub const EXPENSE_PREFS: &str = "ExpensePrefs";

/// Well-known keys within the namespaces above.
pub mod keys {
    pub const GOAL_AMOUNT: &str = "goal_amount";
    pub const GOAL_PERIOD: &str = "goal_period";
    pub const WEEKLY_SAVING: &str = "weekly_saving";
    pub const MONTHLY_SAVING: &str = "monthly_saving";
    pub const SAVED_AMOUNTS: &str = "saved_amounts";
    pub const MAX_EXPENSES: &str = "max_expenses";
    pub const CATEGORIES: &str = "categories";
    pub const EXPENSES: &str = "expenses";
}

/// Abstraction over key-value persistence backends, keyed by namespace and key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>>;
    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()>;

    /// Writes several keys in one namespace. The default implementation loops
    /// over [`KeyValueStore::set`]; backends that can commit a namespace in a
    /// single write should override this so the batch lands as a unit.
    fn set_many(&self, namespace: &str, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(namespace, key, value)?;
        }
        Ok(())
    }
}

/// Reads a serialized collection from the store, returning the default value
/// when the key is absent.
pub fn get_json_or_default<T>(store: &dyn KeyValueStore, namespace: &str, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(namespace, key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use write_behind::WriteBehindStore;
