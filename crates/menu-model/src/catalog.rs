use serde::{Deserialize, Serialize};

use crate::DishName;

/// Dishes offered as quick picks when nothing has been saved yet.
pub const DEFAULT_DISHES: &[&str] = &[
    "Овсяная каша",
    "Сырники",
    "Омлет",
    "Куриный суп",
    "Плов",
    "Гречка с котлетой",
    "Паста",
    "Салат",
];

/// The user's reusable dish list, in insertion order, without duplicates.
///
/// Names are compared exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DishName>", into = "Vec<DishName>")]
pub struct DishCatalog {
    dishes: Vec<DishName>,
}

impl DishCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with [`DEFAULT_DISHES`].
    pub fn with_defaults() -> Self {
        DEFAULT_DISHES
            .iter()
            .filter_map(|name| DishName::new(*name).ok())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dishes.iter().any(|dish| dish.as_str() == name)
    }

    /// Append a dish. Returns `false` and leaves the catalog untouched if the
    /// name is already present.
    pub fn insert(&mut self, dish: DishName) -> bool {
        if self.contains(dish.as_str()) {
            return false;
        }
        self.dishes.push(dish);
        true
    }

    /// Remove a dish by name. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.dishes.len();
        self.dishes.retain(|dish| dish.as_str() != name);
        self.dishes.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &DishName> {
        self.dishes.iter()
    }

    pub fn as_slice(&self) -> &[DishName] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

impl FromIterator<DishName> for DishCatalog {
    fn from_iter<I: IntoIterator<Item = DishName>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for dish in iter {
            catalog.insert(dish);
        }
        catalog
    }
}

impl From<Vec<DishName>> for DishCatalog {
    fn from(dishes: Vec<DishName>) -> Self {
        dishes.into_iter().collect()
    }
}

impl From<DishCatalog> for Vec<DishName> {
    fn from(catalog: DishCatalog) -> Self {
        catalog.dishes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str) -> DishName {
        DishName::new(name).unwrap()
    }

    #[test]
    fn defaults_are_unique_and_non_empty() {
        let catalog = DishCatalog::with_defaults();
        assert_eq!(catalog.len(), DEFAULT_DISHES.len());
    }

    #[test]
    fn insert_rejects_exact_duplicates_only() {
        let mut catalog = DishCatalog::new();
        assert!(catalog.insert(dish("Борщ")));
        assert!(!catalog.insert(dish("Борщ")));
        assert!(catalog.insert(dish("борщ")));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut catalog = DishCatalog::new();
        catalog.insert(dish("Плов"));
        assert!(catalog.remove("Плов"));
        assert!(!catalog.remove("Плов"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn deserialize_drops_duplicates() {
        let catalog: DishCatalog = serde_json::from_str(r#"["Плов","Суп","Плов"]"#).unwrap();
        assert_eq!(catalog.as_slice(), ["Плов", "Суп"]);
    }
}
