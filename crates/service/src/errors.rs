use thiserror::Error;

/// Domain failures surfaced to the HTTP layer. Display strings are the
/// messages clients see.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Item not found with id {0}")]
    NotFound(i32),
    #[error("Failed to add item: {0}")]
    ItemCreation(String),
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(e: &sea_orm::DbErr) -> Self { Self::Storage(models::item::db_err_message(e)) }

    /// Stable numeric code for logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::ItemCreation(_) => 1101,
            ServiceError::Storage(_) => 1200,
        }
    }
}
