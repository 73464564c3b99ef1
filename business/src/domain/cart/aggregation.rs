use std::collections::HashMap;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;

use super::errors::CartError;
use super::model::Cart;
use super::value_objects::Quantity;

/// Placeholder shown in place of a product that no longer exists.
pub const MISSING_PRODUCT: &str = "not found";

/// Product fields exposed inside a resolved cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub thumbnail: Option<String>,
    pub code: String,
    pub stock: i32,
    pub category: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            thumbnail: product.thumbnail().map(str::to_string),
            code: product.code.clone(),
            stock: product.stock,
            category: product.category.clone(),
        }
    }
}

/// Renders an amount with exactly two decimals, rounding half-up.
/// `BigDecimal` drops the scale of zero when printing, so the digits are
/// padded here.
pub fn format_money(value: &BigDecimal) -> String {
    let rounded = value.with_scale_round(2, RoundingMode::HalfUp).to_string();
    match rounded.split_once('.') {
        Some((whole, fraction)) => format!("{whole}.{fraction:0<2}"),
        None => format!("{rounded}.00"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLine {
    Found {
        product: ProductSummary,
        quantity: Quantity,
    },
    /// The referenced product was deleted after being added.
    Missing { product_id: Uuid, quantity: Quantity },
}

impl ResolvedLine {
    pub fn quantity(&self) -> Quantity {
        match self {
            ResolvedLine::Found { quantity, .. } | ResolvedLine::Missing { quantity, .. } => {
                *quantity
            }
        }
    }

    /// Price times quantity; missing products contribute zero.
    pub fn subtotal(&self) -> BigDecimal {
        match self {
            ResolvedLine::Found { product, quantity } => {
                &product.price * BigDecimal::from(quantity.get())
            }
            ResolvedLine::Missing { .. } => BigDecimal::from(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCart {
    pub id: Uuid,
    pub lines: Vec<ResolvedLine>,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Joins line items with the given products, keeping the cart's line order.
pub fn aggregate(cart: &Cart, products: &[Product]) -> ResolvedCart {
    let by_id: HashMap<Uuid, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let lines: Vec<ResolvedLine> = cart
        .items
        .iter()
        .map(|item| match by_id.get(&item.product_id) {
            Some(product) => ResolvedLine::Found {
                product: ProductSummary::from(*product),
                quantity: item.quantity,
            },
            None => ResolvedLine::Missing {
                product_id: item.product_id,
                quantity: item.quantity,
            },
        })
        .collect();

    let total = lines
        .iter()
        .fold(BigDecimal::from(0), |acc, line| acc + line.subtotal())
        .with_scale_round(2, RoundingMode::HalfUp);

    ResolvedCart {
        id: cart.id,
        lines,
        total,
        created_at: cart.created_at,
        updated_at: cart.updated_at,
    }
}

/// Fetches the referenced products in one batch and aggregates the cart.
pub async fn resolve(
    cart: &Cart,
    products: &dyn ProductRepository,
) -> Result<ResolvedCart, CartError> {
    let ids = cart.product_ids();
    let found = if ids.is_empty() {
        Vec::new()
    } else {
        products.get_by_ids(&ids).await?
    };
    Ok(aggregate(cart, &found))
}
