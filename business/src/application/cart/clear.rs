use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::aggregation::{ResolvedCart, aggregate};
use crate::domain::cart::errors::{CartError, map_lookup};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!("Clearing cart: {}", params.cart_id));

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(map_lookup)?;

        cart.clear();
        self.repository.save(&cart).await.map_err(map_lookup)?;

        Ok(aggregate(&cart, &[]))
    }
}
