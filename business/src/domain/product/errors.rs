use crate::domain::errors::{ErrorKind, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("field `{0}` is required")]
    MissingField(&'static str),
    #[error("field `{0}` cannot be empty")]
    EmptyField(&'static str),
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("stock must be a non-negative integer")]
    InvalidStock,
    #[error("product code `{0}` already exists")]
    DuplicateCode(String),
    #[error("product not found")]
    NotFound,
    #[error("product storage failure")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::MissingField(_)
            | ProductError::EmptyField(_)
            | ProductError::InvalidPrice
            | ProductError::InvalidStock
            | ProductError::DuplicateCode(_) => ErrorKind::InvalidArgument,
            ProductError::NotFound | ProductError::Repository(RepositoryError::NotFound) => {
                ErrorKind::NotFound
            }
            ProductError::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Lifts a repository lookup failure into the product vocabulary.
pub fn map_lookup(error: RepositoryError) -> ProductError {
    match error {
        RepositoryError::NotFound => ProductError::NotFound,
        other => ProductError::Repository(other),
    }
}

/// Lifts a repository write failure; a unique violation means the code is taken.
pub fn map_save(error: RepositoryError, code: &str) -> ProductError {
    match error {
        RepositoryError::Duplicated => ProductError::DuplicateCode(code.to_string()),
        RepositoryError::NotFound => ProductError::NotFound,
        other => ProductError::Repository(other),
    }
}
