use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::{ProductError, map_lookup, map_save};
use crate::domain::product::model::{Product, ProductChanges};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};
use crate::domain::product::validation;

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Updating product: {}", params.id));

        let changes = ProductChanges {
            title: validation::optional_text(params.title, "title")?,
            description: validation::optional_text(params.description, "description")?,
            code: validation::optional_text(params.code, "code")?,
            price: params.price.map(validation::price).transpose()?,
            stock: params.stock.map(validation::stock).transpose()?,
            category: validation::optional_text(params.category, "category")?,
            status: params.status,
            thumbnails: params.thumbnails.map(validation::thumbnails),
        };

        let existing = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(map_lookup)?;

        if let Some(code) = &changes.code {
            let holder = self.repository.find_by_code(code).await?;
            validation::code_available(code, holder.as_ref(), Some(existing.id))?;
        }

        let updated_product = existing.with_changes(changes);
        self.repository
            .update(&updated_product)
            .await
            .map_err(|e| map_save(e, &updated_product.code))?;

        self.logger
            .info(&format!("Product updated: {}", updated_product.id));
        Ok(updated_product)
    }
}
