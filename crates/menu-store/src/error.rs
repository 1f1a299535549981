//! Store error types.
//!
//! Every variant is recoverable: the store keeps its previous state whenever an
//! operation returns an error.

use std::path::PathBuf;

use menu_model::Slot;
use thiserror::Error;

/// Failure of the persistence collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored record is not UTF-8 text.
    #[error("Record file is not valid UTF-8: {path}")]
    Encoding { path: PathBuf },

    /// Temp file could not be renamed over the record.
    #[error("Failed to complete write of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Menu store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A persisted record could not be decoded.
    #[error("Stored record '{key}' is corrupt: {reason}")]
    CorruptStorage { key: &'static str, reason: String },

    /// Empty or otherwise unusable user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catalog already holds this exact name.
    #[error("Dish '{0}' is already in the catalog")]
    DuplicateDish(String),

    /// Stale or invalid position inside a slot.
    #[error("No dish at index {index} in {slot} (slot holds {len})")]
    IndexOutOfRange { slot: Slot, index: usize, len: usize },

    /// Import document does not have the menu shape.
    #[error("Invalid import document: {0}")]
    InvalidImport(String),

    /// Operation called before `load()`.
    #[error("Menu store used before load()")]
    NotReady,

    /// A record could not be encoded for writing.
    #[error("Failed to encode record '{key}'")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::CorruptStorage { .. } => {
                "Сохранённые данные повреждены, меню начато заново.".to_string()
            }
            Self::InvalidInput(reason) => format!("Некорректный ввод: {reason}"),
            Self::DuplicateDish(name) => format!("Блюдо «{name}» уже есть в списке."),
            Self::IndexOutOfRange { slot, .. } => {
                format!("Блюдо в ячейке {slot} не найдено. Обновите меню и повторите.")
            }
            Self::InvalidImport(_) => {
                "Ошибка при чтении файла. Убедитесь, что это корректный JSON.".to_string()
            }
            Self::NotReady => "Меню ещё не загружено.".to_string(),
            Self::Encode { .. } | Self::Storage(_) => "Не удалось сохранить меню.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::CorruptStorage { .. } => {
                Some("Импортируйте ранее экспортированный menu-plan.json, чтобы восстановить план.".into())
            }
            Self::IndexOutOfRange { .. } => {
                Some("Выведите неделю заново, чтобы получить актуальные номера блюд.".into())
            }
            Self::InvalidImport(_) => Some(
                "Файл должен сопоставлять даты YYYY-MM-DD спискам блюд breakfast/lunch/dinner."
                    .into(),
            ),
            Self::Storage(_) => {
                Some("Проверьте, что каталог данных существует и доступен для записи.".into())
            }
            Self::InvalidInput(_) | Self::DuplicateDish(_) | Self::NotReady | Self::Encode { .. } => {
                None
            }
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
