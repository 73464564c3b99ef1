use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::aggregation::{ResolvedCart, resolve};
use crate::domain::cart::errors::{CartError, map_lookup};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use crate::domain::logger::Logger;
use crate::domain::product::repository::ProductRepository;

pub struct GetCartByIdUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartByIdUseCase for GetCartByIdUseCaseImpl {
    async fn execute(&self, params: GetCartByIdParams) -> Result<ResolvedCart, CartError> {
        self.logger.debug(&format!("Resolving cart: {}", params.id));

        let cart = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(map_lookup)?;

        resolve(&cart, self.products.as_ref()).await
    }
}
