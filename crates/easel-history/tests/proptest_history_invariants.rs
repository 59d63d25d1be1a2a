//! Property tests for history log invariants.
//!
//! Each block drives a `HistoryLog` and an `ElementStore` with random
//! action sequences and checks one invariant the editing surface relies on:
//! round-trip fidelity, cursor consistency, boundary idempotence, merge
//! behavior, and the retention bound.

use std::time::Duration;

use proptest::prelude::*;

use easel_core::{Bounds, Element, ElementId, ElementStore, ShapeKind};
use easel_history::{HistoryConfig, HistoryLog, Operation};

// ============================================================================
// Strategies and helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Action {
    Add(u64),
    Move(u64, f64),
    Remove(u64),
    Undo,
    Redo,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (1u64..40).prop_map(Action::Add),
        3 => (1u64..40, 0.0f64..500.0).prop_map(|(id, x)| Action::Move(id, x)),
        2 => (1u64..40).prop_map(Action::Remove),
        2 => Just(Action::Undo),
        2 => Just(Action::Redo),
    ]
}

fn actions() -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(action_strategy(), 1..60)
}

fn shape_at(id: ElementId, x: f64) -> Element {
    Element::shape(id, Bounds::new(x, 0.0, 20.0, 20.0), ShapeKind::Rectangle)
}

fn fingerprint(store: &ElementStore) -> Vec<Element> {
    store.iter_ordered().cloned().collect()
}

/// Applies one action the way an editing surface would: mutate the store
/// first, then record the already-applied operation.
fn run_action(store: &mut ElementStore, log: &mut HistoryLog, action: &Action) {
    match action {
        Action::Add(raw) => {
            let id = ElementId::new(*raw);
            if !store.contains(id) {
                let element = shape_at(id, 0.0);
                store.insert(element.clone());
                log.push_one(Operation::add(vec![element]).unwrap(), Some("Add"), None);
            }
        }
        Action::Move(raw, x) => {
            let id = ElementId::new(*raw);
            if let Some(before) = store.get(id).cloned() {
                let mut after = before.clone();
                after.bounds.x = *x;
                store.write(after.clone());
                log.push_one(
                    Operation::update_one(before, after).unwrap(),
                    Some("Move"),
                    None,
                );
            }
        }
        Action::Remove(raw) => {
            let id = ElementId::new(*raw);
            if let Some(index) = store.index_of(id) {
                let element = store.remove(id).unwrap();
                log.push_one(
                    Operation::remove_at(vec![element], vec![index]).unwrap(),
                    Some("Remove"),
                    None,
                );
            }
        }
        Action::Undo => {
            log.undo(store);
        }
        Action::Redo => {
            log.redo(store);
        }
    }
}

// ============================================================================
// Round-trip: undo-all then redo-all restores the document exactly
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn undo_all_redo_all_round_trips(actions in actions()) {
        let mut store = ElementStore::new();
        let mut log = HistoryLog::default();
        for action in &actions {
            run_action(&mut store, &mut log, action);
        }

        let final_state = fingerprint(&store);
        let mut undone = 0usize;
        while log.undo(&mut store) {
            undone += 1;
        }
        for _ in 0..undone {
            prop_assert!(log.redo(&mut store));
        }
        prop_assert_eq!(fingerprint(&store), final_state);
    }
}

// ============================================================================
// Cursor consistency against an exact integer model
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn cursor_matches_integer_model(actions in actions()) {
        // Coalescing off and no pruning, so the ledger mirrors the model
        // exactly: every push appends, every undo/redo moves the cursor.
        let config = HistoryConfig::unlimited().with_merge_window(Duration::ZERO);
        let mut store = ElementStore::new();
        let mut log = HistoryLog::new(config);
        let mut model_len = 0usize;
        let mut model_applied = 0usize;

        for action in &actions {
            let recorded = match action {
                Action::Add(raw) => !store.contains(ElementId::new(*raw)),
                Action::Move(raw, _) | Action::Remove(raw) => {
                    store.contains(ElementId::new(*raw))
                }
                Action::Undo | Action::Redo => false,
            };
            match action {
                Action::Undo => {
                    if model_applied > 0 {
                        model_applied -= 1;
                    }
                }
                Action::Redo => {
                    if model_applied < model_len {
                        model_applied += 1;
                    }
                }
                _ if recorded => {
                    model_len = model_applied + 1;
                    model_applied = model_len;
                }
                _ => {}
            }
            run_action(&mut store, &mut log, action);

            prop_assert_eq!(log.len(), model_len);
            prop_assert_eq!(log.can_undo(), model_applied > 0);
            prop_assert_eq!(log.can_redo(), model_applied < model_len);
        }
    }
}

// ============================================================================
// Boundary idempotence: undo/redo past the edge change nothing
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn exhausted_undo_and_redo_leave_state_unchanged(actions in actions()) {
        let mut store = ElementStore::new();
        let mut log = HistoryLog::default();
        for action in &actions {
            run_action(&mut store, &mut log, action);
        }

        while log.undo(&mut store) {}
        let floor = fingerprint(&store);
        prop_assert!(!log.can_undo());
        prop_assert!(!log.undo(&mut store));
        prop_assert_eq!(fingerprint(&store), floor);

        while log.redo(&mut store) {}
        let ceiling = fingerprint(&store);
        prop_assert!(!log.can_redo());
        prop_assert!(!log.redo(&mut store));
        prop_assert_eq!(fingerprint(&store), ceiling);
    }
}

// ============================================================================
// Merge correctness: shared-key pushes concatenate into one entry
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn shared_key_pushes_merge_in_order(raw_ids in proptest::collection::vec(1u64..1000, 2..30)) {
        let mut ids = raw_ids;
        ids.sort_unstable();
        ids.dedup();

        // A window far wider than test runtime: every push must coalesce.
        let config =
            HistoryConfig::unlimited().with_merge_window(Duration::from_secs(3600));
        let mut store = ElementStore::new();
        let mut log = HistoryLog::new(config);

        for &raw in &ids {
            let element = shape_at(ElementId::new(raw), 0.0);
            store.insert(element.clone());
            log.push_one(
                Operation::add(vec![element]).unwrap(),
                Some("Draw"),
                Some("stroke:42"),
            );
        }

        prop_assert_eq!(log.len(), 1);
        let entry = &log.entries()[0];
        prop_assert_eq!(entry.operations.len(), ids.len());
        for (op, &raw) in entry.operations.iter().zip(&ids) {
            match op {
                Operation::Add { elements, .. } => {
                    prop_assert_eq!(elements[0].id, ElementId::new(raw));
                }
                other => prop_assert!(false, "unexpected operation {:?}", other),
            }
        }
    }
}

// ============================================================================
// Retention bound: the ledger never outgrows its entry ceiling
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn ledger_stays_within_entry_ceiling(count in 1usize..200) {
        let config = HistoryConfig::new(20, usize::MAX).with_merge_window(Duration::ZERO);
        let mut store = ElementStore::new();
        let mut log = HistoryLog::new(config);

        for raw in 0..count as u64 {
            let element = shape_at(ElementId::new(raw), 0.0);
            store.insert(element.clone());
            log.push_one(Operation::add(vec![element]).unwrap(), None, None);
            prop_assert!(log.len() <= 20);
        }
    }
}

// ============================================================================
// Memory accounting: usage always equals the sum of entry estimates
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn memory_usage_equals_entry_sum(actions in actions()) {
        let mut store = ElementStore::new();
        let mut log = HistoryLog::default();
        for action in &actions {
            run_action(&mut store, &mut log, action);
            let usage = log.memory_usage();
            let expected: usize = log.entries().iter().map(|e| e.estimated_bytes).sum();
            prop_assert_eq!(usage.estimated_bytes, expected);
            prop_assert_eq!(usage.entries, log.len());
        }
    }
}

// ============================================================================
// Batching: a whole gesture costs exactly one undo
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn batched_drag_costs_one_undo(xs in proptest::collection::vec(0.0f64..500.0, 1..20)) {
        let mut store = ElementStore::new();
        let mut log = HistoryLog::default();
        let id = ElementId::new(1);
        store.insert(shape_at(id, 0.0));
        let initial = fingerprint(&store);

        log.with_undo("Drag", |log| {
            for &x in &xs {
                let before = store.get(id).cloned().unwrap();
                let mut after = before.clone();
                after.bounds.x = x;
                store.write(after.clone());
                log.push_one(Operation::update_one(before, after).unwrap(), None, None);
            }
        });

        prop_assert_eq!(log.len(), 1);
        prop_assert!(log.undo(&mut store));
        prop_assert_eq!(fingerprint(&store), initial);
        prop_assert!(!log.can_undo());
    }
}
