mod common;

use std::sync::Arc;

use planning_core::{
    errors::PlanningError,
    plan::GoalLedger,
    storage::{keys, KeyValueStore, MemoryStore, GOAL_PREFS},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::FailingStore;

fn empty_ledger() -> (Arc<MemoryStore>, GoalLedger) {
    let store = Arc::new(MemoryStore::new());
    let ledger = GoalLedger::load(store.clone()).expect("load empty ledger");
    (store, ledger)
}

fn ledger_with_savings(amounts: &[Decimal]) -> GoalLedger {
    let (_, mut ledger) = empty_ledger();
    for amount in amounts {
        ledger
            .add_saving(&amount.to_string())
            .expect("seed saving entry");
    }
    ledger
}

#[test]
fn set_goal_derives_weekly_and_monthly_targets() {
    let (_, mut ledger) = empty_ledger();
    let goal = ledger.set_goal("5000", "10");
    assert_eq!(goal.goal_amount, dec!(5000));
    assert_eq!(goal.goal_period_months, 10);
    assert_eq!(goal.weekly_target, dec!(125));
    assert_eq!(goal.monthly_target, dec!(500));
}

#[test]
fn unparsable_goal_input_degrades_to_zero() {
    let (_, mut ledger) = empty_ledger();
    let goal = ledger.set_goal("lots", "soon");
    assert_eq!(goal.goal_amount, Decimal::ZERO);
    assert_eq!(goal.goal_period_months, 0);
    assert_eq!(goal.weekly_target, Decimal::ZERO);
    assert_eq!(goal.monthly_target, Decimal::ZERO);
}

#[test]
fn zero_period_never_divides() {
    let (_, mut ledger) = empty_ledger();
    let goal = ledger.set_goal("9000", "0");
    assert_eq!(goal.weekly_target, Decimal::ZERO);
    assert_eq!(goal.monthly_target, Decimal::ZERO);
}

#[test]
fn saved_goal_round_trips_through_the_store() {
    let (store, mut ledger) = empty_ledger();
    ledger.set_goal("1000", "3");
    ledger.save_goal().expect("save goal");

    let targets = store
        .get(GOAL_PREFS, keys::MONTHLY_SAVING)
        .expect("read monthly target");
    assert_eq!(targets.as_deref(), Some("333.33"));

    let reloaded = GoalLedger::load(store).expect("reload");
    assert_eq!(reloaded.goal().goal_amount, dec!(1000));
    assert_eq!(reloaded.goal().goal_period_months, 3);
    assert_eq!(reloaded.goal().monthly_target, dec!(333.33));
}

#[test]
fn set_goal_alone_does_not_persist() {
    let (store, mut ledger) = empty_ledger();
    ledger.set_goal("750", "5");
    assert_eq!(
        store.get(GOAL_PREFS, keys::GOAL_AMOUNT).expect("read"),
        None
    );
}

#[test]
fn first_saving_appears_in_sequence_and_total() {
    let (_, mut ledger) = empty_ledger();
    let entries = ledger.add_saving("12.5").expect("add saving");
    assert_eq!(entries, &[dec!(12.5)]);
    assert_eq!(ledger.total_saved(), dec!(12.5));
}

#[test]
fn non_positive_savings_are_rejected_and_sequence_unchanged() {
    let (_, mut ledger) = empty_ledger();
    ledger.add_saving("10").expect("seed");

    for input in ["-5", "0", "", "not money"] {
        let err = ledger.add_saving(input).unwrap_err();
        assert!(matches!(err, PlanningError::NotPositive), "input {input:?}");
    }
    assert_eq!(ledger.savings(), &[dec!(10)]);
}

#[test]
fn delete_shifts_later_entries_down() {
    let mut ledger = ledger_with_savings(&[dec!(10), dec!(20), dec!(30)]);
    ledger.delete_saving(1).expect("delete middle entry");
    assert_eq!(ledger.savings(), &[dec!(10), dec!(30)]);
}

#[test]
fn update_replaces_in_place() {
    let mut ledger = ledger_with_savings(&[dec!(10), dec!(20), dec!(30)]);
    ledger.delete_saving(1).expect("delete");
    ledger.update_saving(0, dec!(99)).expect("update");
    assert_eq!(ledger.savings(), &[dec!(99), dec!(30)]);
}

#[test]
fn stale_index_is_rejected_without_corrupting_the_sequence() {
    let mut ledger = ledger_with_savings(&[dec!(10), dec!(20), dec!(30)]);

    let err = ledger.update_saving(5, dec!(1)).unwrap_err();
    assert!(matches!(
        err,
        PlanningError::IndexOutOfRange { index: 5, len: 3 }
    ));
    let err = ledger.delete_saving(3).unwrap_err();
    assert!(matches!(
        err,
        PlanningError::IndexOutOfRange { index: 3, len: 3 }
    ));
    assert_eq!(ledger.savings(), &[dec!(10), dec!(20), dec!(30)]);
}

#[test]
fn percent_to_goal_is_zero_without_a_goal() {
    let mut ledger = ledger_with_savings(&[dec!(40)]);
    ledger.set_goal("0", "6");
    assert_eq!(ledger.percent_to_goal(), Decimal::ZERO);
}

#[test]
fn percent_to_goal_is_uncapped_when_over_saved() {
    let mut ledger = ledger_with_savings(&[dec!(150), dec!(100)]);
    ledger.set_goal("200", "2");
    assert_eq!(ledger.percent_to_goal(), dec!(125));
}

#[test]
fn savings_round_trip_through_the_store() {
    let (store, mut ledger) = empty_ledger();
    for input in ["10", "20.25", "30"] {
        ledger.add_saving(input).expect("add saving");
    }

    let reloaded = GoalLedger::load(store).expect("reload");
    assert_eq!(reloaded.savings(), &[dec!(10), dec!(20.25), dec!(30)]);
    assert_eq!(reloaded.total_saved(), dec!(60.25));
}

#[test]
fn persistence_failure_surfaces_but_keeps_memory() {
    let store = Arc::new(FailingStore::new());
    let mut ledger = GoalLedger::load(store.clone()).expect("load");
    store.set_fail_writes(true);

    let err = ledger.add_saving("25").unwrap_err();
    assert!(matches!(err, PlanningError::Storage(_)));
    // In-memory state is the source of truth; the caller retries the write.
    assert_eq!(ledger.savings(), &[dec!(25)]);

    store.set_fail_writes(false);
    ledger.update_saving(0, dec!(25)).expect("retry persists");
    let reloaded = GoalLedger::load(store).expect("reload");
    assert_eq!(reloaded.savings(), &[dec!(25)]);
}
