use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::Product;

pub const PRODUCT_COLUMNS: &str =
    "id, title, description, code, price, stock, category, status, thumbnails, created_at, updated_at";

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: bool,
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.title,
            self.description,
            self.code,
            self.price,
            self.stock,
            self.category,
            self.status,
            self.thumbnails,
            self.created_at,
            self.updated_at,
        )
    }
}
