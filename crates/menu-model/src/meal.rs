use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// One of the three daily meals.
///
/// Variant order is the display order of the week grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    /// Storage key of the meal.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Display label shown in the week grid.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Завтрак",
            Self::Lunch => "Обед",
            Self::Dinner => "Ужин",
        }
    }
}

impl FromStr for MealType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|meal| {
                meal.as_str().eq_ignore_ascii_case(trimmed)
                    || meal.label().to_lowercase() == trimmed.to_lowercase()
            })
            .ok_or_else(|| ModelError::InvalidMealType(s.to_string()))
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_keys_and_labels() {
        assert_eq!("lunch".parse::<MealType>(), Ok(MealType::Lunch));
        assert_eq!("Dinner".parse::<MealType>(), Ok(MealType::Dinner));
        assert_eq!("завтрак".parse::<MealType>(), Ok(MealType::Breakfast));
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&MealType::Breakfast).unwrap();
        assert_eq!(json, "\"breakfast\"");
    }
}
