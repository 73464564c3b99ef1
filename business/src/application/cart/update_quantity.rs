use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::aggregation::{ResolvedCart, resolve};
use crate::domain::cart::errors::{CartError, map_lookup};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::update_quantity::{
    UpdateLineQuantityParams, UpdateLineQuantityUseCase,
};
use crate::domain::cart::value_objects::Quantity;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct UpdateLineQuantityUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateLineQuantityUseCase for UpdateLineQuantityUseCaseImpl {
    async fn execute(&self, params: UpdateLineQuantityParams) -> Result<ResolvedCart, CartError> {
        let quantity = params
            .quantity
            .ok_or(CartError::InvalidQuantity)
            .and_then(Quantity::new)?;

        self.logger.info(&format!(
            "Setting quantity of product {} in cart {} to {}",
            params.product_id, params.cart_id, quantity
        ));

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(map_lookup)?;

        cart.update_quantity(params.product_id, quantity)?;
        self.repository.save(&cart).await.map_err(map_lookup)?;

        resolve(&cart, self.products.as_ref()).await
    }
}
