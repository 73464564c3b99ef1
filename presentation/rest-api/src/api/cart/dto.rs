use chrono::{DateTime, Utc};
use poem_openapi::{Object, Union};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::cart::aggregation::{
    MISSING_PRODUCT, ProductSummary, ResolvedCart, ResolvedLine,
};
use business::domain::cart::use_cases::replace_products::ReplacementItem;

use crate::api::product::dto::decimal_to_f64;

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ProductSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub code: String,
    pub stock: i32,
    pub category: String,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(summary: ProductSummary) -> Self {
        Self {
            id: summary.id,
            price: decimal_to_f64(&summary.price),
            title: summary.title,
            description: summary.description,
            thumbnail: summary.thumbnail,
            code: summary.code,
            stock: summary.stock,
            category: summary.category,
        }
    }
}

/// Stand-in for a product deleted after it was added to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct MissingProductResponse {
    pub id: Uuid,
    pub error: String,
}

#[derive(Debug, Clone, Union)]
pub enum CartLineProduct {
    Found(ProductSummaryResponse),
    Missing(MissingProductResponse),
}

#[derive(Debug, Clone, Object)]
pub struct CartLineResponse {
    pub product: CartLineProduct,
    pub quantity: i64,
    pub subtotal: f64,
}

impl From<ResolvedLine> for CartLineResponse {
    fn from(line: ResolvedLine) -> Self {
        let quantity = i64::from(line.quantity());
        let subtotal = decimal_to_f64(&line.subtotal());
        let product = match line {
            ResolvedLine::Found { product, .. } => CartLineProduct::Found(product.into()),
            ResolvedLine::Missing { product_id, .. } => {
                CartLineProduct::Missing(MissingProductResponse {
                    id: product_id,
                    error: MISSING_PRODUCT.to_string(),
                })
            }
        };
        Self {
            product,
            quantity,
            subtotal,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: Uuid,
    pub products: Vec<CartLineResponse>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResolvedCart> for CartResponse {
    fn from(cart: ResolvedCart) -> Self {
        Self {
            id: cart.id,
            total: decimal_to_f64(&cart.total),
            products: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

/// Success envelope for every cart endpoint.
#[derive(Debug, Object)]
pub struct CartEnvelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: CartResponse,
}

impl CartEnvelope {
    pub fn new(cart: ResolvedCart, message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(str::to_string),
            data: cart.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ReplacementItemRequest {
    /// Product identifier.
    pub product: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ReplaceCartRequest {
    pub products: Vec<ReplacementItemRequest>,
}

impl From<ReplacementItemRequest> for ReplacementItem {
    fn from(request: ReplacementItemRequest) -> Self {
        Self {
            product: request.product,
            quantity: request.quantity,
        }
    }
}
