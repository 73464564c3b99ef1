use crate::domain::errors::{ErrorKind, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart not found")]
    NotFound,
    #[error("product {0} not found")]
    ProductNotFound(String),
    #[error("product {0} is not in the cart")]
    LineItemNotFound(String),
    #[error("quantity must be a positive integer")]
    InvalidQuantity,
    #[error("every line item needs a product reference")]
    MissingProduct,
    #[error("cart storage failure")]
    Repository(#[from] RepositoryError),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound
            | CartError::ProductNotFound(_)
            | CartError::LineItemNotFound(_)
            | CartError::Repository(RepositoryError::NotFound) => ErrorKind::NotFound,
            CartError::InvalidQuantity | CartError::MissingProduct => ErrorKind::InvalidArgument,
            CartError::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Lifts a cart lookup failure; a missing row means the cart does not exist.
pub fn map_lookup(error: RepositoryError) -> CartError {
    match error {
        RepositoryError::NotFound => CartError::NotFound,
        other => CartError::Repository(other),
    }
}
