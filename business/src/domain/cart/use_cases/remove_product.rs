use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::aggregation::ResolvedCart;
use crate::domain::cart::errors::CartError;

pub struct RemoveProductFromCartParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
}

#[async_trait]
pub trait RemoveProductFromCartUseCase: Send + Sync {
    async fn execute(
        &self,
        params: RemoveProductFromCartParams,
    ) -> Result<ResolvedCart, CartError>;
}
