use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::aggregation::ResolvedCart;
use crate::domain::cart::errors::CartError;

pub struct UpdateLineQuantityParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    /// Raw value from the request; absent or below one is rejected.
    pub quantity: Option<i64>,
}

#[async_trait]
pub trait UpdateLineQuantityUseCase: Send + Sync {
    async fn execute(&self, params: UpdateLineQuantityParams) -> Result<ResolvedCart, CartError>;
}
