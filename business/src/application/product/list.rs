use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::listing::{self, ListingPage, ListingQuery};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::list::ListProductsUseCase;

pub struct ListProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListProductsUseCase for ListProductsUseCaseImpl {
    async fn execute(&self, query: &ListingQuery) -> Result<ListingPage, ProductError> {
        self.logger.debug(&format!("Listing products: {:?}", query));

        let products = self.repository.get_all().await?;
        let page = listing::run(products, query);

        self.logger.debug(&format!(
            "Listed {} of {} products (page {}/{})",
            page.items.len(),
            page.total_count,
            page.page,
            page.total_pages
        ));
        Ok(page)
    }
}
