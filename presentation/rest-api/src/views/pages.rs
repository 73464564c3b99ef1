use std::sync::Arc;

use askama::Template;
use poem::{
    IntoResponse, Response, handler,
    http::StatusCode,
    web::{Data, Html, Path, Query, Redirect},
};
use uuid::Uuid;

use business::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use business::domain::errors::ErrorKind;
use business::domain::product::listing::{ListingParams, ListingQuery};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::list::ListProductsUseCase;

use super::templates::{
    CartShowTemplate, ErrorTemplate, ProductShowTemplate, ProductsIndexTemplate,
    RealtimeTemplate,
};

const PRODUCTS_PAGE: &str = "/products";

/// Use cases reachable from the server-rendered pages.
pub struct PageState {
    pub list_products: Arc<dyn ListProductsUseCase>,
    pub get_product: Arc<dyn GetProductByIdUseCase>,
    pub get_cart: Arc<dyn GetCartByIdUseCase>,
}

fn render<T: Template>(status: StatusCode, template: &T) -> Response {
    let body = template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    });
    Html(body).with_status(status).into_response()
}

fn error_page(kind: ErrorKind, message: String) -> Response {
    let (status, message) = match kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, message),
        ErrorKind::InvalidArgument => (StatusCode::BAD_REQUEST, message),
        ErrorKind::Internal => {
            tracing::error!(cause = %message, "page failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
            )
        }
    };
    render(
        status,
        &ErrorTemplate {
            status: status.as_u16(),
            message,
        },
    )
}

fn not_found(message: &str) -> Response {
    error_page(ErrorKind::NotFound, message.to_string())
}

#[handler]
pub fn home() -> Redirect {
    Redirect::see_other(PRODUCTS_PAGE)
}

#[handler]
pub async fn products_index(
    Query(params): Query<ListingParams>,
    Data(state): Data<&Arc<PageState>>,
) -> Response {
    let query = ListingQuery::parse(&params);
    match state.list_products.execute(&query).await {
        Ok(page) => render(
            StatusCode::OK,
            &ProductsIndexTemplate::new(page, &query, PRODUCTS_PAGE),
        ),
        Err(err) => error_page(err.kind(), err.to_string()),
    }
}

#[handler]
pub async fn product_show(Path(pid): Path<String>, Data(state): Data<&Arc<PageState>>) -> Response {
    let Ok(id) = Uuid::parse_str(pid.trim()) else {
        return not_found("product not found");
    };
    match state.get_product.execute(GetProductByIdParams { id }).await {
        Ok(product) => render(
            StatusCode::OK,
            &ProductShowTemplate {
                product: product.into(),
            },
        ),
        Err(err) => error_page(err.kind(), err.to_string()),
    }
}

#[handler]
pub async fn cart_show(Path(cid): Path<String>, Data(state): Data<&Arc<PageState>>) -> Response {
    let Ok(id) = Uuid::parse_str(cid.trim()) else {
        return not_found("cart not found");
    };
    match state.get_cart.execute(GetCartByIdParams { id }).await {
        Ok(cart) => render(StatusCode::OK, &CartShowTemplate::from(cart)),
        Err(err) => error_page(err.kind(), err.to_string()),
    }
}

#[handler]
pub fn realtime() -> Response {
    render(StatusCode::OK, &RealtimeTemplate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use business::domain::cart::aggregation::{ResolvedCart, aggregate};
    use business::domain::cart::errors::CartError;
    use business::domain::cart::model::Cart;
    use business::domain::errors::RepositoryError;
    use business::domain::product::errors::ProductError;
    use business::domain::product::listing::{self, ListingPage};
    use business::domain::product::model::{NewProductProps, Product};
    use poem::test::TestClient;
    use poem::{EndpointExt, Route, get};

    struct Shop {
        products: Vec<Product>,
        cart: Option<Cart>,
        broken: bool,
    }

    #[async_trait]
    impl ListProductsUseCase for Shop {
        async fn execute(&self, query: &ListingQuery) -> Result<ListingPage, ProductError> {
            if self.broken {
                return Err(ProductError::Repository(RepositoryError::DatabaseError));
            }
            Ok(listing::run(self.products.clone(), query))
        }
    }

    #[async_trait]
    impl GetProductByIdUseCase for Shop {
        async fn execute(&self, params: GetProductByIdParams) -> Result<Product, ProductError> {
            self.products
                .iter()
                .find(|p| p.id == params.id)
                .cloned()
                .ok_or(ProductError::NotFound)
        }
    }

    #[async_trait]
    impl GetCartByIdUseCase for Shop {
        async fn execute(&self, params: GetCartByIdParams) -> Result<ResolvedCart, CartError> {
            self.cart
                .as_ref()
                .filter(|c| c.id == params.id)
                .map(|c| aggregate(c, &self.products))
                .ok_or(CartError::NotFound)
        }
    }

    fn product(title: &str, price: i32, category: &str, status: bool) -> Product {
        Product::new(NewProductProps {
            title: title.to_string(),
            description: format!("A {title}"),
            code: title.to_uppercase(),
            price: BigDecimal::from(price),
            stock: 3,
            category: category.to_string(),
            status,
            thumbnails: vec![],
        })
    }

    fn app(shop: Shop) -> TestClient<impl poem::Endpoint> {
        let shop = Arc::new(shop);
        let state = Arc::new(PageState {
            list_products: shop.clone(),
            get_product: shop.clone(),
            get_cart: shop,
        });
        TestClient::new(
            Route::new()
                .at("/", get(home))
                .at("/products", get(products_index))
                .at("/products/:pid", get(product_show))
                .at("/carts/:cid", get(cart_show))
                .at("/realtime", get(realtime))
                .data(state),
        )
    }

    fn shop(products: Vec<Product>) -> Shop {
        Shop {
            products,
            cart: None,
            broken: false,
        }
    }

    #[tokio::test]
    async fn should_redirect_home_to_products() {
        let response = app(shop(vec![])).get("/").send().await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "/products");
    }

    #[tokio::test]
    async fn should_render_filtered_listing_with_navigation() {
        let client = app(shop(vec![
            product("Shirt", 20, "Tops", true),
            product("Socks", 5, "Feet", true),
            product("Hat", 15, "Tops", false),
            product("Scarf", 12, "Tops", true),
        ]));

        let response = client
            .get("/products")
            .query("category", &"tops")
            .query("status", &"true")
            .query("limit", &"1")
            .send()
            .await;

        response.assert_status_is_ok();
        let html = response.0.into_body().into_string().await.unwrap();
        assert!(html.contains("Shirt"));
        assert!(!html.contains("Socks"));
        assert!(!html.contains(">Hat<"));
        assert!(html.contains("page 1 of 2"));
        assert!(html.contains("category=tops"));
        assert!(html.contains("Next"));
    }

    #[tokio::test]
    async fn should_render_product_detail() {
        let hat = product("Hat", 15, "Tops", true);
        let id = hat.id;

        let response = app(shop(vec![hat])).get(format!("/products/{id}")).send().await;

        response.assert_status_is_ok();
        let html = response.0.into_body().into_string().await.unwrap();
        assert!(html.contains("$15.00"));
        assert!(html.contains("Code HAT"));
    }

    #[tokio::test]
    async fn should_render_not_found_page_for_unknown_product() {
        let response = app(shop(vec![]))
            .get(format!("/products/{}", Uuid::new_v4()))
            .send()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let html = response.0.into_body().into_string().await.unwrap();
        assert!(html.contains("product not found"));
    }

    #[tokio::test]
    async fn should_render_internal_error_page_without_cause() {
        let mut broken = shop(vec![]);
        broken.broken = true;

        let response = app(broken).get("/products").send().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let html = response.0.into_body().into_string().await.unwrap();
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("storage"));
    }

    #[tokio::test]
    async fn should_render_cart_with_missing_product_and_total() {
        let socks = product("Socks", 5, "Feet", true);
        let mut cart = Cart::new();
        cart.add_product(socks.id);
        cart.add_product(socks.id);
        cart.add_product(Uuid::new_v4());
        let cid = cart.id;

        let client = app(Shop {
            products: vec![socks],
            cart: Some(cart),
            broken: false,
        });
        let response = client.get(format!("/carts/{cid}")).send().await;

        response.assert_status_is_ok();
        let html = response.0.into_body().into_string().await.unwrap();
        assert!(html.contains("Total: $10.00"));
        assert!(html.contains("(not found)"));
    }

    #[tokio::test]
    async fn should_render_realtime_page_with_socket_client() {
        let response = app(shop(vec![])).get("/realtime").send().await;

        response.assert_status_is_ok();
        let html = response.0.into_body().into_string().await.unwrap();
        assert!(html.contains("/ws"));
        assert!(html.contains("client:ping"));
    }
}
