//! Property tests for the store laws.

use std::collections::BTreeMap;

use menu_model::{DateKey, MealType, MenuData, Slot};
use menu_store::{MemoryBackend, MenuStore, decode_menu, migrate_legacy_schema};
use proptest::prelude::*;
use serde_json::{Map, Value};

const DATES: [&str; 3] = ["2024-06-10", "2024-06-11", "2024-06-12"];
const DISHES: [&str; 4] = ["Суп", "Плов", "Каша", "Салат"];

#[derive(Debug, Clone)]
enum Op {
    Add { date: usize, meal: usize, dish: usize },
    Remove { date: usize, meal: usize, index: usize },
    Move { from: (usize, usize), index: usize, to: (usize, usize) },
}

fn key(index: usize) -> DateKey {
    DateKey::parse(DATES[index]).unwrap()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..3usize, 0..4usize).prop_map(|(date, meal, dish)| Op::Add {
            date,
            meal,
            dish
        }),
        (0..3usize, 0..3usize, 0..3usize).prop_map(|(date, meal, index)| Op::Remove {
            date,
            meal,
            index
        }),
        ((0..3usize, 0..3usize), 0..3usize, (0..3usize, 0..3usize))
            .prop_map(|(from, index, to)| Op::Move { from, index, to }),
    ]
}

fn apply(store: &mut MenuStore<MemoryBackend>, op: &Op) {
    // Out-of-range indices are expected to fail without changing anything.
    let _ = match *op {
        Op::Add { date, meal, dish } => store
            .add_dish(key(date), MealType::ALL[meal], DISHES[dish])
            .map(|_| ()),
        Op::Remove { date, meal, index } => store
            .remove_dish(key(date), MealType::ALL[meal], index)
            .map(|_| ()),
        Op::Move { from, index, to } => store
            .move_dish(
                key(from.0),
                MealType::ALL[from.1],
                index,
                key(to.0),
                MealType::ALL[to.1],
            )
            .map(|_| ()),
    };
}

fn populated_store(ops: &[Op]) -> MenuStore<MemoryBackend> {
    let mut store = MenuStore::new(MemoryBackend::new());
    store.load().unwrap();
    for op in ops {
        apply(&mut store, op);
    }
    store
}

/// Per-slot dish multiset.
fn slot_contents(menu: &MenuData) -> BTreeMap<Slot, Vec<String>> {
    let mut contents = BTreeMap::new();
    for (date, day) in menu.days() {
        for (meal, dishes) in day.meals() {
            let mut names: Vec<String> = dishes.iter().map(|d| d.as_str().to_string()).collect();
            names.sort();
            contents.insert(Slot::new(date, meal), names);
        }
    }
    contents
}

fn legacy_document() -> impl Strategy<Value = Value> {
    let meal = prop_oneof![
        prop::sample::select(DISHES.to_vec()).prop_map(|d| Value::String(d.to_string())),
        prop::collection::vec(prop::sample::select(DISHES.to_vec()), 0..3).prop_map(|ds| {
            Value::Array(ds.into_iter().map(|d| Value::String(d.to_string())).collect())
        }),
    ];
    let day = prop::collection::btree_map(
        prop::sample::select(vec!["breakfast", "lunch", "dinner"]),
        meal,
        0..3,
    )
    .prop_map(|meals| {
        Value::Object(
            meals
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect::<Map<String, Value>>(),
        )
    });
    prop::collection::btree_map(prop::sample::select(DATES.to_vec()), day, 0..3).prop_map(
        |days| {
            Value::Object(
                days.into_iter()
                    .map(|(date, value)| (date.to_string(), value))
                    .collect::<Map<String, Value>>(),
            )
        },
    )
}

proptest! {
    #[test]
    fn every_mutation_keeps_the_document_normalized(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let mut store = MenuStore::new(MemoryBackend::new());
        store.load().unwrap();
        for op in &ops {
            apply(&mut store, op);
            prop_assert!(store.menu().unwrap().is_normalized());
        }
    }

    #[test]
    fn migration_is_idempotent(document in legacy_document()) {
        let mut once = document.clone();
        migrate_legacy_schema(&mut once);
        let mut twice = once.clone();
        prop_assert_eq!(migrate_legacy_schema(&mut twice), 0);
        prop_assert_eq!(&once, &twice);
        prop_assert!(decode_menu(once).is_ok());
    }

    #[test]
    fn move_there_and_back_preserves_slot_contents(
        ops in prop::collection::vec(op_strategy(), 1..32),
        from in (0..3usize, 0..3usize),
        to in (0..3usize, 0..3usize),
        pick in 0..8usize,
    ) {
        let mut store = populated_store(&ops);
        let source = (key(from.0), MealType::ALL[from.1]);
        let dest = (key(to.0), MealType::ALL[to.1]);
        let len = store.dishes(source.0, source.1).unwrap().len();
        prop_assume!(len > 0);
        let before = slot_contents(store.menu().unwrap());

        store.move_dish(source.0, source.1, pick % len, dest.0, dest.1).unwrap();
        let back = store.dishes(dest.0, dest.1).unwrap().len() - 1;
        store.move_dish(dest.0, dest.1, back, source.0, source.1).unwrap();

        prop_assert_eq!(slot_contents(store.menu().unwrap()), before);
    }

    #[test]
    fn export_then_import_round_trips(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut store = populated_store(&ops);
        let exported = store.export_snapshot().unwrap();
        let document = serde_json::to_value(&exported).unwrap();

        let mut other = MenuStore::new(MemoryBackend::new());
        other.load().unwrap();
        other.import_snapshot(&document).unwrap();
        prop_assert_eq!(other.export_snapshot().unwrap(), exported.clone());

        store.import_snapshot(&document).unwrap();
        prop_assert_eq!(store.export_snapshot().unwrap(), exported);
    }
}
