use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::aggregation::ResolvedCart;
use crate::domain::cart::errors::CartError;

pub struct AddProductToCartParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
}

#[async_trait]
pub trait AddProductToCartUseCase: Send + Sync {
    async fn execute(&self, params: AddProductToCartParams) -> Result<ResolvedCart, CartError>;
}
