//! Week arithmetic for the planner grid.
//!
//! Weeks start on Monday. Day numbering follows the rule "Monday is day 1;
//! Sunday, which the native weekday index reports as 0, is day 7".

use chrono::{Datelike, Days, Duration, Local, NaiveDate};

use crate::DateKey;

/// Weekday names indexed from Monday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

/// Monday of the week that contains `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let native = date.weekday().num_days_from_sunday();
    let day_of_week = if native == 0 { 7 } else { native };
    date - Days::new(u64::from(day_of_week - 1))
}

/// `DD.MM` label used in the grid headers.
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}", date.day(), date.month())
}

pub fn day_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// A Monday-to-Sunday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: start_of_week(date),
        }
    }

    /// Week of the current local calendar day.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(6)
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|offset| self.start + Days::new(offset as u64))
    }

    pub fn date_keys(&self) -> [DateKey; 7] {
        self.days().map(DateKey::from_date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// Shift by a whole number of weeks.
    pub fn offset(&self, weeks: i64) -> Self {
        Self {
            start: self.start + Duration::weeks(weeks),
        }
    }

    /// Header shown above the grid, e.g. `Неделя 10.06 - 16.06`.
    pub fn label(&self) -> String {
        format!(
            "Неделя {} - {}",
            format_display_date(self.start),
            format_display_date(self.end())
        )
    }
}
