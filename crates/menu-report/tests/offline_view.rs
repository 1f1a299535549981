//! Integration tests for the offline HTML view.

use chrono::NaiveDate;
use menu_model::{DateKey, DishName, MealType, MenuData, Slot, Week};
use menu_report::{render_offline_html, write_offline_html};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_menu() -> MenuData {
    let mut menu = MenuData::new();
    let monday = DateKey::from_date(date(2024, 6, 10));
    menu.push_dish(
        Slot::new(monday, MealType::Breakfast),
        DishName::new("Каша").unwrap(),
    );
    menu.push_dish(
        Slot::new(monday, MealType::Lunch),
        DishName::new("Суп").unwrap(),
    );
    menu.push_dish(
        Slot::new(monday, MealType::Lunch),
        DishName::new("<script>alert(1)</script>").unwrap(),
    );
    // Next week, must not appear.
    menu.push_dish(
        Slot::new(DateKey::from_date(date(2024, 6, 17)), MealType::Dinner),
        DishName::new("Плов").unwrap(),
    );
    menu
}

#[test]
fn renders_seven_day_cards_with_label() {
    let week = Week::containing(date(2024, 6, 12));
    let html = render_offline_html(&week, &sample_menu(), date(2024, 6, 12));

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"ru\">"));
    assert!(html.contains("<title>Моё Меню - Неделя 10.06 - 16.06</title>"));
    assert!(html.contains("<h1>Неделя 10.06 - 16.06</h1>"));
    assert_eq!(html.matches("class=\"day-card\"").count(), 7);
    assert_eq!(html.matches("class=\"meal-slot\"").count(), 21);
    assert_eq!(html.matches("class=\"meal-content filled\"").count(), 2);
}

#[test]
fn lists_dishes_in_order_and_escapes_them() {
    let week = Week::containing(date(2024, 6, 10));
    let html = render_offline_html(&week, &sample_menu(), date(2024, 6, 10));

    assert!(html.contains("<span>Каша</span>"));
    assert!(html.contains(
        "<span>Суп</span><span>&lt;script&gt;alert(1)&lt;/script&gt;</span>"
    ));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("Плов"));
}

#[test]
fn has_no_interactive_elements() {
    let week = Week::containing(date(2024, 6, 10));
    let html = render_offline_html(&week, &sample_menu(), date(2024, 6, 10));

    assert!(!html.contains("onclick"));
    assert!(!html.contains("delete-dish"));
    assert!(!html.contains("<button"));
}

#[test]
fn marks_only_today() {
    let week = Week::containing(date(2024, 6, 10));
    let html = render_offline_html(&week, &MenuData::new(), date(2024, 6, 13));
    assert_eq!(html.matches("day-header today").count(), 1);
    assert!(html.contains("<div class=\"day-header today\"><span>Четверг</span> <span>13.06</span></div>"));

    let other_week = render_offline_html(&week.next(), &MenuData::new(), date(2024, 6, 13));
    assert!(!other_week.contains("day-header today"));
}

#[test]
fn writes_file_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("menu_view.html");
    let week = Week::containing(date(2024, 6, 10));
    write_offline_html(&path, &week, &sample_menu(), date(2024, 6, 10)).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<h1>Неделя 10.06 - 16.06</h1>"));
}
