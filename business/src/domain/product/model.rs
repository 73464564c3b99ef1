use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
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

/// Already validated fields for a new product.
pub struct NewProductProps {
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: bool,
    pub thumbnails: Vec<String>,
}

/// Already validated partial update. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl Product {
    pub fn new(props: NewProductProps) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: props.title,
            description: props.description,
            code: props.code,
            price: props.price,
            stock: props.stock,
            category: props.category,
            status: props.status,
            thumbnails: props.thumbnails,
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        title: String,
        description: String,
        code: String,
        price: BigDecimal,
        stock: i32,
        category: String,
        status: bool,
        thumbnails: Vec<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            code,
            price,
            stock,
            category,
            status,
            thumbnails,
            created_at,
            updated_at,
        }
    }

    /// Returns a copy with `changes` merged in. The identifier never changes.
    pub fn with_changes(&self, changes: ProductChanges) -> Self {
        Self {
            id: self.id,
            title: changes.title.unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            code: changes.code.unwrap_or_else(|| self.code.clone()),
            price: changes.price.unwrap_or_else(|| self.price.clone()),
            stock: changes.stock.unwrap_or(self.stock),
            category: changes.category.unwrap_or_else(|| self.category.clone()),
            status: changes.status.unwrap_or(self.status),
            thumbnails: changes
                .thumbnails
                .unwrap_or_else(|| self.thumbnails.clone()),
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnails.first().map(String::as_str)
    }
}
