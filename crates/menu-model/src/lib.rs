//! Data model for the weekly meal planner.
//!
//! The planner keeps one [`MenuData`] document: a mapping from calendar day to
//! meal to an ordered list of dishes, plus a [`DishCatalog`] of reusable dish
//! names. This crate holds the types and the week calendar; it performs no I/O.

pub mod calendar;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod meal;
pub mod menu;

pub use calendar::{Week, day_name, format_display_date, start_of_week};
pub use catalog::{DEFAULT_DISHES, DishCatalog};
pub use error::{ModelError, Result};
pub use ids::{DATE_KEY_FORMAT, DateKey, DishName};
pub use meal::MealType;
pub use menu::{DayMenu, MenuData, Slot};
