#![doc(test(attr(deny(warnings))))]

//! Planning Core offers the savings-goal ledger and category-limit primitives
//! behind a household budget-planning screen, persisted through a pluggable
//! key-value store.

pub mod errors;
pub mod parse;
pub mod plan;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Planning Core tracing initialized.");
    });
}
