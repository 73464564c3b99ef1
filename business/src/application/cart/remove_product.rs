use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::aggregation::{ResolvedCart, resolve};
use crate::domain::cart::errors::{CartError, map_lookup};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::remove_product::{
    RemoveProductFromCartParams, RemoveProductFromCartUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct RemoveProductFromCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveProductFromCartUseCase for RemoveProductFromCartUseCaseImpl {
    async fn execute(
        &self,
        params: RemoveProductFromCartParams,
    ) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!(
            "Removing product {} from cart {}",
            params.product_id, params.cart_id
        ));

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(map_lookup)?;

        cart.remove_product(params.product_id)?;
        self.repository.save(&cart).await.map_err(map_lookup)?;

        resolve(&cart, self.products.as_ref()).await
    }
}
