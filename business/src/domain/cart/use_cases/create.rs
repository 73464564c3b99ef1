use async_trait::async_trait;

use crate::domain::cart::aggregation::ResolvedCart;
use crate::domain::cart::errors::CartError;

#[async_trait]
pub trait CreateCartUseCase: Send + Sync {
    async fn execute(&self) -> Result<ResolvedCart, CartError>;
}
