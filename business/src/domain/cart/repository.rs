use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Cart;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError>;
    /// Replaces the whole line-item document in a single write.
    /// Fails with `NotFound` when the cart does not exist.
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}
