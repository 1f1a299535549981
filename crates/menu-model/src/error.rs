use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDateKey(String),
    #[error("unknown meal type '{0}': expected breakfast, lunch or dinner")]
    InvalidMealType(String),
    #[error("dish name must not be empty")]
    EmptyDishName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
