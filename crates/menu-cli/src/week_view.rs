//! Terminal rendering of a week grid.

use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use menu_model::{
    DateKey, DishCatalog, MealType, MenuData, Slot, Week, day_name, format_display_date,
};

/// One day of the grid, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub date: NaiveDate,
    pub heading: String,
    pub is_today: bool,
    /// Dishes per meal in [`MealType::ALL`] order, numbered from 1.
    pub meals: [Vec<String>; 3],
}

pub fn week_rows(week: &Week, menu: &MenuData, today: NaiveDate) -> Vec<DayRow> {
    week.days()
        .into_iter()
        .map(|date| {
            let key = DateKey::from_date(date);
            let meals = MealType::ALL.map(|meal| {
                menu.dishes(Slot::new(key, meal))
                    .iter()
                    .enumerate()
                    .map(|(index, dish)| format!("{}. {dish}", index + 1))
                    .collect::<Vec<_>>()
            });
            DayRow {
                date,
                heading: format!("{} {}", day_name(date), format_display_date(date)),
                is_today: date == today,
                meals,
            }
        })
        .collect()
}

pub fn week_table(
    week: &Week,
    menu: &MenuData,
    today: NaiveDate,
    show_empty_slots: bool,
) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("День")];
    header.extend(MealType::ALL.map(|meal| header_cell(meal.label())));
    table.set_header(header);
    apply_week_table_style(&mut table);
    for row in week_rows(week, menu, today) {
        let day = if row.is_today {
            Cell::new(&row.heading)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&row.heading)
        };
        let mut cells = vec![day];
        for dishes in &row.meals {
            cells.push(if dishes.is_empty() {
                if show_empty_slots {
                    dim_cell("-")
                } else {
                    Cell::new("")
                }
            } else {
                Cell::new(dishes.join("\n"))
            });
        }
        table.add_row(cells);
    }
    table
}

pub fn catalog_table(catalog: &DishCatalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Блюдо")]);
    apply_table_style(&mut table);
    for (index, dish) in catalog.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(dish)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_week_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
