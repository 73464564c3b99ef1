use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use business::domain::cart::model::{Cart, LineItem};
use business::domain::cart::value_objects::Quantity;

/// Stored shape of one element of the `items` JSONB array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemEntity {
    pub product: Uuid,
    pub quantity: i64,
}

#[derive(Debug, FromRow)]
pub struct CartEntity {
    pub id: Uuid,
    pub items: Json<Vec<LineItemEntity>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartEntity {
    pub fn into_domain(self) -> Cart {
        // Rows written outside the application may carry a non-positive quantity.
        let items = self
            .items
            .0
            .into_iter()
            .filter_map(|item| {
                Quantity::new(item.quantity).ok().map(|quantity| LineItem {
                    product_id: item.product,
                    quantity,
                })
            })
            .collect();

        Cart::from_repository(self.id, items, self.created_at, self.updated_at)
    }
}

pub fn items_document(cart: &Cart) -> Json<Vec<LineItemEntity>> {
    Json(
        cart.items
            .iter()
            .map(|item| LineItemEntity {
                product: item.product_id,
                quantity: i64::from(item.quantity),
            })
            .collect(),
    )
}
