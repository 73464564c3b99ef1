use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use business::domain::product::listing::{ListingPage, ListingQuery};
use business::domain::product::model::Product;
use business::domain::product::use_cases::create::CreateProductParams;
use business::domain::product::use_cases::update::UpdateProductParams;
use uuid::Uuid;

/// Prices are stored exactly and rendered as JSON numbers. Going through the
/// decimal string yields the closest `f64`.
pub fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value.to_string().parse().unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub status: bool,
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            price: decimal_to_f64(&product.price),
            title: product.title,
            description: product.description,
            code: product.code,
            stock: product.stock,
            category: product.category,
            status: product.status,
            thumbnails: product.thumbnails,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Success envelope for single-product responses.
#[derive(Debug, Object)]
pub struct ProductEnvelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: ProductResponse,
}

impl ProductEnvelope {
    pub fn new(product: Product, message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(str::to_string),
            data: product.into(),
        }
    }
}

/// Every field is optional here; presence rules are enforced by the use case
/// so a missing field produces the same error body as a blank one.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl From<CreateProductRequest> for CreateProductParams {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            code: request.code,
            price: request.price,
            stock: request.stock,
            category: request.category,
            status: request.status,
            thumbnails: request.thumbnails,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl UpdateProductRequest {
    pub fn into_params(self, id: Uuid) -> UpdateProductParams {
        UpdateProductParams {
            id,
            title: self.title,
            description: self.description,
            code: self.code,
            price: self.price,
            stock: self.stock,
            category: self.category,
            status: self.status,
            thumbnails: self.thumbnails,
        }
    }
}

/// Paginated product list with navigation metadata.
#[derive(Debug, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub status: String,
    pub payload: Vec<ProductResponse>,
    pub total_pages: u64,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
    pub page: u64,
    pub limit: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
    pub total_count: u64,
    pub categories: Vec<String>,
}

impl ProductListResponse {
    pub fn from_page(page: ListingPage, query: &ListingQuery, base: &str) -> Self {
        Self {
            status: "success".to_string(),
            prev_link: page.prev_link(query, base),
            next_link: page.next_link(query, base),
            total_pages: page.total_pages as u64,
            prev_page: page.prev_page.map(|p| p as u64),
            next_page: page.next_page.map(|p| p as u64),
            page: page.page as u64,
            limit: page.limit as u64,
            has_prev_page: page.has_prev_page,
            has_next_page: page.has_next_page,
            total_count: page.total_count as u64,
            categories: page.categories,
            payload: page.items.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::product::listing::{self, ListingParams};
    use business::domain::product::model::NewProductProps;
    use std::str::FromStr;

    fn product(price: &str, category: &str) -> Product {
        Product::new(NewProductProps {
            title: "Shirt".to_string(),
            description: "Cotton".to_string(),
            code: format!("SH-{price}"),
            price: BigDecimal::from_str(price).unwrap(),
            stock: 1,
            category: category.to_string(),
            status: true,
            thumbnails: vec![],
        })
    }

    #[test]
    fn should_render_price_as_number() {
        let response = ProductResponse::from(product("19.99", "Tops"));

        assert_eq!(response.price, 19.99);
    }

    #[test]
    fn should_build_links_preserving_active_filters() {
        let query = ListingQuery::parse(&ListingParams {
            category: Some("Tops".to_string()),
            limit: Some("1".to_string()),
            ..Default::default()
        });
        let products = vec![product("1", "Tops"), product("2", "Tops"), product("3", "Tops")];

        let response = ProductListResponse::from_page(
            listing::run(products, &query),
            &query,
            "/api/products",
        );

        assert_eq!(response.status, "success");
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.prev_link, None);
        let next = response.next_link.unwrap();
        assert!(next.starts_with("/api/products?"));
        assert!(next.contains("category=Tops"));
        assert!(next.contains("page=2"));
    }
}
