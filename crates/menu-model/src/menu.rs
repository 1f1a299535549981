//! The menu document: day → meal → ordered dish list.
//!
//! A normalized document never stores an empty dish list and never keeps a
//! day whose meals are all empty. Every mutating method here restores that
//! shape before returning.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DateKey, DishName, MealType};

/// One cell of the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub date: DateKey,
    pub meal: MealType,
}

impl Slot {
    pub fn new(date: DateKey, meal: MealType) -> Self {
        Self { date, meal }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date, self.meal)
    }
}

/// Meals planned for a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMenu {
    meals: BTreeMap<MealType, Vec<DishName>>,
}

impl DayMenu {
    pub fn dishes(&self, meal: MealType) -> &[DishName] {
        self.meals.get(&meal).map_or(&[], Vec::as_slice)
    }

    pub fn meals(&self) -> impl Iterator<Item = (MealType, &[DishName])> {
        self.meals
            .iter()
            .map(|(meal, dishes)| (*meal, dishes.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.meals.values().all(Vec::is_empty)
    }

    fn prune(&mut self) {
        self.meals.retain(|_, dishes| !dishes.is_empty());
    }
}

/// The whole planner document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuData {
    days: BTreeMap<DateKey, DayMenu>,
}

impl MenuData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dishes of a slot, empty when nothing is planned.
    pub fn dishes(&self, slot: Slot) -> &[DishName] {
        self.days
            .get(&slot.date)
            .map_or(&[], |day| day.dishes(slot.meal))
    }

    pub fn day(&self, date: DateKey) -> Option<&DayMenu> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = (DateKey, &DayMenu)> {
        self.days.iter().map(|(date, day)| (*date, day))
    }

    pub fn contains_date(&self, date: DateKey) -> bool {
        self.days.contains_key(&date)
    }

    /// Number of days with at least one dish.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn dish_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|day| day.meals.values())
            .map(Vec::len)
            .sum()
    }

    /// Append a dish at the end of the slot, creating the day and meal entries.
    pub fn push_dish(&mut self, slot: Slot, dish: DishName) {
        self.days
            .entry(slot.date)
            .or_default()
            .meals
            .entry(slot.meal)
            .or_default()
            .push(dish);
    }

    /// Remove the dish at `index`, dropping the meal and day entries if they
    /// become empty. Returns `None` when the index is out of range.
    pub fn remove_dish(&mut self, slot: Slot, index: usize) -> Option<DishName> {
        let day = self.days.get_mut(&slot.date)?;
        let dishes = day.meals.get_mut(&slot.meal)?;
        if index >= dishes.len() {
            return None;
        }
        let removed = dishes.remove(index);
        if dishes.is_empty() {
            day.meals.remove(&slot.meal);
        }
        if day.meals.is_empty() {
            self.days.remove(&slot.date);
        }
        Some(removed)
    }

    /// Drop empty dish lists and empty days.
    pub fn normalize(&mut self) {
        for day in self.days.values_mut() {
            day.prune();
        }
        self.days.retain(|_, day| !day.meals.is_empty());
    }

    /// True when no day maps to an empty mapping and no meal to an empty list.
    pub fn is_normalized(&self) -> bool {
        self.days
            .values()
            .all(|day| !day.meals.is_empty() && day.meals.values().all(|d| !d.is_empty()))
    }
}
