use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::aggregation::ResolvedCart;
use crate::domain::cart::errors::CartError;

pub struct GetCartByIdParams {
    pub id: Uuid,
}

#[async_trait]
pub trait GetCartByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetCartByIdParams) -> Result<ResolvedCart, CartError>;
}
