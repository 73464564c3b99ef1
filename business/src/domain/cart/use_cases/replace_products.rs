use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::aggregation::ResolvedCart;
use crate::domain::cart::errors::CartError;

/// One requested line, unvalidated.
#[derive(Debug, Clone, Default)]
pub struct ReplacementItem {
    pub product: Option<String>,
    pub quantity: Option<i64>,
}

pub struct ReplaceCartProductsParams {
    pub cart_id: Uuid,
    pub items: Vec<ReplacementItem>,
}

#[async_trait]
pub trait ReplaceCartProductsUseCase: Send + Sync {
    async fn execute(
        &self,
        params: ReplaceCartProductsParams,
    ) -> Result<ResolvedCart, CartError>;
}
