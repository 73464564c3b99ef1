use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::aggregation::{ResolvedCart, aggregate};
use crate::domain::cart::errors::{CartError, map_lookup};
use crate::domain::cart::model::LineItem;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::replace_products::{
    ReplaceCartProductsParams, ReplaceCartProductsUseCase, ReplacementItem,
};
use crate::domain::cart::value_objects::Quantity;
use crate::domain::logger::Logger;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;

pub struct ReplaceCartProductsUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

/// Checks one requested line against the products known to exist.
fn validate_item(item: &ReplacementItem, known: &HashSet<Uuid>) -> Result<LineItem, CartError> {
    let reference = item
        .product
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(CartError::MissingProduct)?;
    let quantity = item
        .quantity
        .ok_or(CartError::InvalidQuantity)
        .and_then(Quantity::new)?;
    let product_id = Uuid::parse_str(reference)
        .ok()
        .filter(|id| known.contains(id))
        .ok_or_else(|| CartError::ProductNotFound(reference.to_string()))?;

    Ok(LineItem {
        product_id,
        quantity,
    })
}

#[async_trait]
impl ReplaceCartProductsUseCase for ReplaceCartProductsUseCaseImpl {
    async fn execute(
        &self,
        params: ReplaceCartProductsParams,
    ) -> Result<ResolvedCart, CartError> {
        self.logger.info(&format!(
            "Replacing {} line items in cart {}",
            params.items.len(),
            params.cart_id
        ));

        let mut cart = self
            .repository
            .get_by_id(params.cart_id)
            .await
            .map_err(map_lookup)?;

        let requested: Vec<Uuid> = params
            .items
            .iter()
            .filter_map(|item| item.product.as_deref())
            .filter_map(|r| Uuid::parse_str(r.trim()).ok())
            .collect();
        let products: Vec<Product> = if requested.is_empty() {
            Vec::new()
        } else {
            self.products.get_by_ids(&requested).await?
        };
        let known: HashSet<Uuid> = products.iter().map(|p| p.id).collect();

        let items = params
            .items
            .iter()
            .map(|item| validate_item(item, &known))
            .collect::<Result<Vec<_>, _>>()?;

        cart.replace_items(items);
        self.repository.save(&cart).await.map_err(map_lookup)?;

        Ok(aggregate(&cart, &products))
    }
}
