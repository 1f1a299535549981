//! Static offline view of one week.
//!
//! The page is self-contained: styles are embedded so it opens from disk
//! without a server, and it carries no scripts or click handlers.

use std::path::Path;

use chrono::NaiveDate;
use menu_model::{DateKey, MealType, MenuData, Slot, Week, day_name, format_display_date};

use crate::error::Result;
use crate::export::write_file;

const OFFLINE_CSS: &str = r#"
:root {
    --primary-color: #4a90e2;
    --bg-color: #f5f7fa;
    --card-bg: #ffffff;
    --text-color: #333333;
    --text-secondary: #666666;
    --border-color: #e1e4e8;
    --shadow: 0 2px 8px rgba(0,0,0,0.05);
    --radius: 12px;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', sans-serif;
    background-color: var(--bg-color);
    color: var(--text-color);
    line-height: 1.5;
    padding-bottom: 20px;
}
.app-container { max-width: 800px; margin: 0 auto; padding: 16px; }
h1 { margin-bottom: 20px; font-size: 1.5rem; text-align: center; }
.week-grid { display: grid; grid-template-columns: 1fr; gap: 16px; }
.day-card {
    background: var(--card-bg);
    border-radius: var(--radius);
    padding: 16px;
    box-shadow: var(--shadow);
}
.day-header {
    font-weight: 600;
    margin-bottom: 12px;
    padding-bottom: 8px;
    border-bottom: 1px solid var(--border-color);
    display: flex;
    justify-content: space-between;
}
.day-header.today { color: var(--primary-color); }
.meal-slot { margin-bottom: 12px; }
.meal-slot:last-child { margin-bottom: 0; }
.meal-label { font-size: 0.85rem; color: var(--text-secondary); margin-bottom: 4px; }
.meal-content {
    min-height: 32px;
    padding: 6px 10px;
    background: #f8f9fa;
    border-radius: 6px;
    border: 1px dashed var(--border-color);
    font-size: 0.95rem;
    display: flex;
    flex-direction: column;
    gap: 4px;
}
.meal-content.filled { background: #eef6ff; border: 1px solid #b3d7ff; }
@media (min-width: 768px) {
    .week-grid { grid-template-columns: repeat(2, 1fr); }
}
"#;

/// File name of the offline view saved on `date`.
pub fn offline_file_name(date: NaiveDate) -> String {
    format!("menu_view_{}.html", DateKey::from_date(date))
}

/// Render the offline page for `week`. `today` gets the highlighted header.
pub fn render_offline_html(week: &Week, menu: &MenuData, today: NaiveDate) -> String {
    let label = escape_html(&week.label());
    let mut html = String::with_capacity(OFFLINE_CSS.len() + 4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>Моё Меню - {label}</title>\n"));
    html.push_str("    <style>");
    html.push_str(OFFLINE_CSS);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str("    <div class=\"app-container\">\n");
    html.push_str(&format!("        <h1>{label}</h1>\n"));
    html.push_str("        <div class=\"week-grid\">\n");
    for date in week.days() {
        push_day_card(&mut html, menu, date, date == today);
    }
    html.push_str("        </div>\n    </div>\n</body>\n</html>\n");
    html
}

pub fn write_offline_html(
    path: &Path,
    week: &Week,
    menu: &MenuData,
    today: NaiveDate,
) -> Result<()> {
    let html = render_offline_html(week, menu, today);
    write_file(path, &html)?;
    tracing::info!(path = %path.display(), week = %week.label(), "wrote offline view");
    Ok(())
}

fn push_day_card(html: &mut String, menu: &MenuData, date: NaiveDate, is_today: bool) {
    let header_class = if is_today {
        "day-header today"
    } else {
        "day-header"
    };
    html.push_str("            <div class=\"day-card\">\n");
    html.push_str(&format!(
        "                <div class=\"{header_class}\"><span>{}</span> <span>{}</span></div>\n",
        day_name(date),
        format_display_date(date)
    ));
    let key = DateKey::from_date(date);
    for meal in MealType::ALL {
        let dishes = menu.dishes(Slot::new(key, meal));
        let content_class = if dishes.is_empty() {
            "meal-content"
        } else {
            "meal-content filled"
        };
        html.push_str("                <div class=\"meal-slot\">\n");
        html.push_str(&format!(
            "                    <div class=\"meal-label\">{}</div>\n",
            meal.label()
        ));
        html.push_str(&format!(
            "                    <div class=\"{content_class}\">"
        ));
        for dish in dishes {
            html.push_str(&format!("<span>{}</span>", escape_html(dish.as_str())));
        }
        html.push_str("</div>\n                </div>\n");
    }
    html.push_str("            </div>\n");
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn file_name_uses_date_key() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(offline_file_name(date), "menu_view_2024-06-09.html");
    }
}
