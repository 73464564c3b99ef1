use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::aggregation::{ResolvedCart, aggregate};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::create::CreateCartUseCase;
use crate::domain::logger::Logger;

pub struct CreateCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateCartUseCase for CreateCartUseCaseImpl {
    async fn execute(&self) -> Result<ResolvedCart, CartError> {
        let cart = Cart::new();
        self.repository.create(&cart).await?;

        self.logger.info(&format!("Cart created: {}", cart.id));
        Ok(aggregate(&cart, &[]))
    }
}
