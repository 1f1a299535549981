use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ModelError;

/// `chrono` format of a [`DateKey`].
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day used as the top-level key of the menu document.
///
/// Always a local calendar date rendered as `YYYY-MM-DD`. The key is never
/// derived from a UTC timestamp, so a dish planned late in the evening stays on
/// the day the user sees in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Key for the current local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a strict `YYYY-MM-DD` key. Surrounding whitespace is an error.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        if value.len() != 10 {
            return Err(ModelError::InvalidDateKey(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| ModelError::InvalidDateKey(value.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A non-empty, trimmed dish label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DishName(String);

impl DishName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyDishName);
        }
        if trimmed.len() == value.len() {
            return Ok(Self(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DishName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DishName {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DishName> for String {
    fn from(value: DishName) -> Self {
        value.0
    }
}

impl AsRef<str> for DishName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DishName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DishName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for DishName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_parses_and_displays() {
        let key = DateKey::parse("2024-06-10").unwrap();
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(key.to_string(), "2024-06-10");
    }

    #[test]
    fn date_key_rejects_loose_formats() {
        assert!(DateKey::parse("2024-6-10").is_err());
        assert!(DateKey::parse("10.06.2024").is_err());
        assert!(DateKey::parse("2024-02-30").is_err());
        assert!(DateKey::parse("").is_err());
        assert!(DateKey::parse(" 2024-06-10").is_err());
        assert!(DateKey::parse("2024-06-10\n").is_err());
    }

    #[test]
    fn dish_name_is_trimmed() {
        let dish = DishName::new("  Суп ").unwrap();
        assert_eq!(dish.as_str(), "Суп");
        assert_eq!(DishName::new("   "), Err(ModelError::EmptyDishName));
    }

    #[test]
    fn dish_name_rejects_empty_on_deserialize() {
        let parsed: Result<DishName, _> = serde_json::from_str("\" \"");
        assert!(parsed.is_err());
    }
}
