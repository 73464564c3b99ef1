use askama::Template;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use business::domain::cart::aggregation::{
    MISSING_PRODUCT, ResolvedCart, ResolvedLine, format_money as money,
};
use business::domain::product::listing::{ListingPage, ListingQuery};
use business::domain::product::model::Product;

pub struct ProductView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: String,
    pub stock: i32,
    pub category: String,
    pub available: bool,
    pub thumbnail: Option<String>,
    pub thumbnails: Vec<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            price: money(&product.price),
            thumbnail: product.thumbnail().map(str::to_string),
            title: product.title,
            description: product.description,
            code: product.code,
            stock: product.stock,
            category: product.category,
            available: product.status,
            thumbnails: product.thumbnails,
        }
    }
}

#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<String>,
    /// Echo of the active filters for the form.
    pub query: String,
    pub category: String,
    pub status: String,
    pub sort: String,
    pub limit: usize,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl ProductsIndexTemplate {
    pub fn new(page: ListingPage, query: &ListingQuery, base: &str) -> Self {
        Self {
            prev_link: page.prev_link(query, base),
            next_link: page.next_link(query, base),
            query: query.query.clone().unwrap_or_default(),
            category: query.category.clone().unwrap_or_default(),
            status: query.status.map(|s| s.to_string()).unwrap_or_default(),
            sort: query.sort.map(|s| s.to_string()).unwrap_or_default(),
            limit: page.limit,
            page: page.page,
            total_pages: page.total_pages,
            total_count: page.total_count,
            categories: page.categories,
            products: page.items.into_iter().map(ProductView::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

pub struct CartLineView {
    pub product_id: Uuid,
    /// Product title, or the missing-product marker.
    pub title: String,
    pub found: bool,
    pub thumbnail: Option<String>,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<ResolvedLine> for CartLineView {
    fn from(line: ResolvedLine) -> Self {
        let quantity = line.quantity().get();
        let subtotal = money(&line.subtotal());
        match line {
            ResolvedLine::Found { product, .. } => Self {
                product_id: product.id,
                title: product.title,
                found: true,
                thumbnail: product.thumbnail,
                price: money(&product.price),
                quantity,
                subtotal,
            },
            ResolvedLine::Missing { product_id, .. } => Self {
                product_id,
                title: MISSING_PRODUCT.to_string(),
                found: false,
                thumbnail: None,
                price: money(&BigDecimal::from(0)),
                quantity,
                subtotal,
            },
        }
    }
}

#[derive(Template)]
#[template(path = "carts/show.html")]
pub struct CartShowTemplate {
    pub id: Uuid,
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl From<ResolvedCart> for CartShowTemplate {
    fn from(cart: ResolvedCart) -> Self {
        Self {
            id: cart.id,
            total: money(&cart.total),
            lines: cart.lines.into_iter().map(CartLineView::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "realtime.html")]
pub struct RealtimeTemplate;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}
