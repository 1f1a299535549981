//! JSON plan export and import file reading.

use std::fs;
use std::path::Path;

use menu_model::MenuData;

use crate::error::{ReportError, Result};

/// Default download name of the JSON plan.
pub const EXPORT_FILE_NAME: &str = "menu-plan.json";

/// Serialize a menu snapshot exactly as the store produced it.
pub fn export_document(menu: &MenuData) -> Result<String> {
    Ok(serde_json::to_string_pretty(menu)?)
}

pub fn write_export(menu: &MenuData, path: &Path) -> Result<()> {
    let document = export_document(menu)?;
    write_file(path, &document)?;
    tracing::info!(path = %path.display(), days = menu.len(), "exported menu");
    Ok(())
}

/// Read an import file as UTF-8 text; parsing is left to the store.
pub fn read_import_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ReportError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, contents).map_err(|e| ReportError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_model::{DateKey, DishName, MealType, Slot};

    #[test]
    fn export_has_no_envelope() {
        let mut menu = MenuData::new();
        menu.push_dish(
            Slot::new(DateKey::parse("2024-06-10").unwrap(), MealType::Lunch),
            DishName::new("Суп").unwrap(),
        );
        let document = export_document(&menu).unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value, serde_json::json!({"2024-06-10": {"lunch": ["Суп"]}}));
    }

    #[test]
    fn write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(EXPORT_FILE_NAME);
        write_export(&MenuData::new(), &path).unwrap();
        assert_eq!(read_import_file(&path).unwrap(), "{}");
    }

    #[test]
    fn missing_import_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_import_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ReportError::Io { operation: "read", .. })));
    }
}
