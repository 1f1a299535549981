//! Decoding of the raw menu record, including the legacy upgrade.
//!
//! The legacy schema stored one dish per meal as a plain string:
//!
//! ```text
//! { "2024-01-01": { "breakfast": "Каша" } }
//! ```
//!
//! The current schema stores a list per meal:
//!
//! ```text
//! { "2024-01-01": { "breakfast": ["Каша"] } }
//! ```

use menu_model::MenuData;
use serde_json::Value;

/// Replace every single-string meal value with a one-element list.
///
/// Blank strings become empty lists, which [`decode_menu`] then drops.
/// Returns the number of upgraded meal values; running it on an already
/// upgraded document returns 0 and changes nothing.
pub fn migrate_legacy_schema(document: &mut Value) -> usize {
    let Some(days) = document.as_object_mut() else {
        return 0;
    };
    let mut migrated = 0;
    for day in days.values_mut() {
        let Some(meals) = day.as_object_mut() else {
            continue;
        };
        for value in meals.values_mut() {
            if let Value::String(name) = value {
                let name = std::mem::take(name);
                *value = if name.trim().is_empty() {
                    Value::Array(Vec::new())
                } else {
                    Value::Array(vec![Value::String(name)])
                };
                migrated += 1;
            }
        }
    }
    migrated
}

/// Decode a menu document in the list schema and normalize it.
///
/// Anything that is not a map of `YYYY-MM-DD` dates to maps of meal names to
/// lists of non-empty dish names is rejected with a description of the first
/// problem.
pub fn decode_menu(document: Value) -> Result<MenuData, String> {
    if !document.is_object() {
        return Err("expected an object keyed by YYYY-MM-DD dates".to_string());
    }
    let mut menu: MenuData = serde_json::from_value(document).map_err(|e| e.to_string())?;
    menu.normalize();
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_model::{DateKey, MealType, Slot};
    use serde_json::json;

    #[test]
    fn upgrades_single_strings() {
        let mut doc = json!({
            "2024-01-01": { "breakfast": "Каша", "dinner": ["Плов"] },
            "2024-01-02": { "lunch": "Суп" }
        });
        assert_eq!(migrate_legacy_schema(&mut doc), 2);
        assert_eq!(
            doc,
            json!({
                "2024-01-01": { "breakfast": ["Каша"], "dinner": ["Плов"] },
                "2024-01-02": { "lunch": ["Суп"] }
            })
        );
        assert_eq!(migrate_legacy_schema(&mut doc), 0);
    }

    #[test]
    fn blank_legacy_values_disappear_after_decode() {
        let mut doc = json!({ "2024-01-01": { "breakfast": "  " } });
        assert_eq!(migrate_legacy_schema(&mut doc), 1);
        let menu = decode_menu(doc).unwrap();
        assert!(menu.is_empty());
    }

    #[test]
    fn ignores_non_object_documents() {
        let mut doc = json!(["Каша"]);
        assert_eq!(migrate_legacy_schema(&mut doc), 0);
        assert_eq!(doc, json!(["Каша"]));
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        assert!(decode_menu(json!([1, 2])).is_err());
        assert!(decode_menu(json!({ "not-a-date": {} })).is_err());
        assert!(decode_menu(json!({ "2024-01-01": { "brunch": ["Каша"] } })).is_err());
        assert!(decode_menu(json!({ "2024-01-01": { "lunch": "Суп" } })).is_err());
        assert!(decode_menu(json!({ "2024-01-01": { "lunch": [""] } })).is_err());
        assert!(decode_menu(json!({ "2024-01-01": { "lunch": [42] } })).is_err());
    }

    #[test]
    fn decode_rejects_null() {
        assert!(decode_menu(Value::Null).is_err());
    }

    #[test]
    fn decode_normalizes() {
        let menu = decode_menu(json!({
            "2024-01-01": { "lunch": [] },
            "2024-01-02": { "lunch": ["Суп"] }
        }))
        .unwrap();
        assert_eq!(menu.len(), 1);
        let slot = Slot::new(DateKey::parse("2024-01-02").unwrap(), MealType::Lunch);
        assert_eq!(menu.dishes(slot), ["Суп"]);
    }
}
