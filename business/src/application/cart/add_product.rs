use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::aggregation::{ResolvedCart, resolve};
use crate::domain::cart::errors::{CartError, map_lookup};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::add_product::{
    AddProductToCartParams, AddProductToCartUseCase,
};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct AddProductToCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddProductToCartUseCase for AddProductToCartUseCaseImpl {
    async fn execute(&self, params: AddProductToCartParams) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!(
            "Adding product {} to cart {}",
            params.product_id, params.cart_id
        ));

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(map_lookup)?;

        match self.products.get_by_id(params.product_id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => {
                return Err(CartError::ProductNotFound(params.product_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        cart.add_product(params.product_id);
        self.repository.save(&cart).await.map_err(map_lookup)?;

        resolve(&cart, self.products.as_ref()).await
    }
}
