use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Product;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order.
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
    /// Products whose id is in `ids`. Unknown ids are skipped, not reported.
    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, RepositoryError>;
    /// Fails with `Duplicated` when the code is taken.
    async fn create(&self, product: &Product) -> Result<(), RepositoryError>;
    /// Overwrites an existing row. Fails with `NotFound` when the product is
    /// gone and with `Duplicated` when the code is taken.
    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;
    /// Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
