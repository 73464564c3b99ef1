use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::cart::aggregation::ResolvedCart;
use business::domain::cart::errors::CartError;
use business::domain::cart::use_cases::add_product::{
    AddProductToCartParams, AddProductToCartUseCase,
};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::create::CreateCartUseCase;
use business::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use business::domain::cart::use_cases::remove_product::{
    RemoveProductFromCartParams, RemoveProductFromCartUseCase,
};
use business::domain::cart::use_cases::replace_products::{
    ReplaceCartProductsParams, ReplaceCartProductsUseCase,
};
use business::domain::cart::use_cases::update_quantity::{
    UpdateLineQuantityParams, UpdateLineQuantityUseCase,
};

use crate::api::cart::dto::{CartEnvelope, ReplaceCartRequest, UpdateQuantityRequest};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    create_use_case: Arc<dyn CreateCartUseCase>,
    get_by_id_use_case: Arc<dyn GetCartByIdUseCase>,
    add_product_use_case: Arc<dyn AddProductToCartUseCase>,
    update_quantity_use_case: Arc<dyn UpdateLineQuantityUseCase>,
    remove_product_use_case: Arc<dyn RemoveProductFromCartUseCase>,
    replace_products_use_case: Arc<dyn ReplaceCartProductsUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
}

impl CartApi {
    pub fn new(
        create_use_case: Arc<dyn CreateCartUseCase>,
        get_by_id_use_case: Arc<dyn GetCartByIdUseCase>,
        add_product_use_case: Arc<dyn AddProductToCartUseCase>,
        update_quantity_use_case: Arc<dyn UpdateLineQuantityUseCase>,
        remove_product_use_case: Arc<dyn RemoveProductFromCartUseCase>,
        replace_products_use_case: Arc<dyn ReplaceCartProductsUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_by_id_use_case,
            add_product_use_case,
            update_quantity_use_case,
            remove_product_use_case,
            replace_products_use_case,
            clear_use_case,
        }
    }
}

fn parse_cart_id(raw: &str) -> Result<Uuid, CartError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CartError::NotFound)
}

/// Resolves both path identifiers. `absent` builds the error for a product
/// identifier that cannot be parsed.
fn parse_ids(
    cid: &str,
    pid: &str,
    absent: fn(String) -> CartError,
) -> Result<(Uuid, Uuid), CartError> {
    let cart_id = parse_cart_id(cid)?;
    let product_id = Uuid::parse_str(pid.trim()).map_err(|_| absent(pid.to_string()))?;
    Ok((cart_id, product_id))
}

fn respond(result: Result<ResolvedCart, CartError>, message: Option<&str>) -> CartResponse {
    match result {
        Ok(cart) => CartResponse::Ok(Json(CartEnvelope::new(cart, message))),
        Err(err) => {
            let (status, json) = err.into_error_response();
            match status.as_u16() {
                400 => CartResponse::BadRequest(json),
                404 => CartResponse::NotFound(json),
                _ => CartResponse::InternalError(json),
            }
        }
    }
}

/// Shopping cart API
///
/// Every successful call returns the cart with its products resolved and
/// the total computed.
#[OpenApi]
impl CartApi {
    /// Create an empty cart
    #[oai(path = "/carts", method = "post", tag = "ApiTags::Carts")]
    async fn create_cart(&self) -> CreateCartResponse {
        match self.create_use_case.execute().await {
            Ok(cart) => {
                CreateCartResponse::Created(Json(CartEnvelope::new(cart, Some("cart created"))))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                CreateCartResponse::InternalError(json)
            }
        }
    }

    /// Get a cart with its products and total
    ///
    /// Lines whose product was deleted are kept, shown as not found and
    /// excluded from the total.
    #[oai(path = "/carts/:cid", method = "get", tag = "ApiTags::Carts")]
    async fn get_cart(&self, cid: Path<String>) -> CartResponse {
        let result = match parse_cart_id(&cid.0) {
            Ok(id) => self.get_by_id_use_case.execute(GetCartByIdParams { id }).await,
            Err(err) => Err(err),
        };
        respond(result, None)
    }

    /// Replace every line of a cart
    ///
    /// All entries are validated before anything is written. Repeated
    /// products are merged into one line.
    #[oai(path = "/carts/:cid", method = "put", tag = "ApiTags::Carts")]
    async fn replace_products(
        &self,
        cid: Path<String>,
        body: Json<ReplaceCartRequest>,
    ) -> CartResponse {
        let result = match parse_cart_id(&cid.0) {
            Ok(cart_id) => {
                let items = body.0.products.into_iter().map(Into::into).collect();
                self.replace_products_use_case
                    .execute(ReplaceCartProductsParams { cart_id, items })
                    .await
            }
            Err(err) => Err(err),
        };
        respond(result, Some("cart updated"))
    }

    /// Empty a cart
    #[oai(path = "/carts/:cid", method = "delete", tag = "ApiTags::Carts")]
    async fn clear_cart(&self, cid: Path<String>) -> CartResponse {
        let result = match parse_cart_id(&cid.0) {
            Ok(cart_id) => self.clear_use_case.execute(ClearCartParams { cart_id }).await,
            Err(err) => Err(err),
        };
        respond(result, Some("cart emptied"))
    }

    /// Add one unit of a product
    #[oai(path = "/carts/:cid/products/:pid", method = "post", tag = "ApiTags::Carts")]
    async fn add_product(&self, cid: Path<String>, pid: Path<String>) -> CartResponse {
        let result = match parse_ids(&cid.0, &pid.0, CartError::ProductNotFound) {
            Ok((cart_id, product_id)) => {
                self.add_product_use_case
                    .execute(AddProductToCartParams {
                        cart_id,
                        product_id,
                    })
                    .await
            }
            Err(err) => Err(err),
        };
        respond(result, Some("product added to cart"))
    }

    /// Set the quantity of a line
    #[oai(path = "/carts/:cid/products/:pid", method = "put", tag = "ApiTags::Carts")]
    async fn update_quantity(
        &self,
        cid: Path<String>,
        pid: Path<String>,
        body: Json<UpdateQuantityRequest>,
    ) -> CartResponse {
        let result = match parse_ids(&cid.0, &pid.0, CartError::LineItemNotFound) {
            Ok((cart_id, product_id)) => {
                self.update_quantity_use_case
                    .execute(UpdateLineQuantityParams {
                        cart_id,
                        product_id,
                        quantity: body.0.quantity,
                    })
                    .await
            }
            Err(err) => Err(err),
        };
        respond(result, Some("quantity updated"))
    }

    /// Remove a line
    #[oai(path = "/carts/:cid/products/:pid", method = "delete", tag = "ApiTags::Carts")]
    async fn remove_product(&self, cid: Path<String>, pid: Path<String>) -> CartResponse {
        let result = match parse_ids(&cid.0, &pid.0, CartError::LineItemNotFound) {
            Ok((cart_id, product_id)) => {
                self.remove_product_use_case
                    .execute(RemoveProductFromCartParams {
                        cart_id,
                        product_id,
                    })
                    .await
            }
            Err(err) => Err(err),
        };
        respond(result, Some("product removed from cart"))
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateCartResponse {
    #[oai(status = 201)]
    Created(Json<CartEnvelope>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartResponse {
    #[oai(status = 200)]
    Ok(Json<CartEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use business::application::cart::add_product::AddProductToCartUseCaseImpl;
    use business::application::cart::clear::ClearCartUseCaseImpl;
    use business::application::cart::create::CreateCartUseCaseImpl;
    use business::application::cart::get_by_id::GetCartByIdUseCaseImpl;
    use business::application::cart::remove_product::RemoveProductFromCartUseCaseImpl;
    use business::application::cart::replace_products::ReplaceCartProductsUseCaseImpl;
    use business::application::cart::update_quantity::UpdateLineQuantityUseCaseImpl;
    use business::domain::cart::model::Cart;
    use business::domain::cart::repository::CartRepository;
    use business::domain::errors::RepositoryError;
    use business::domain::logger::Logger;
    use business::domain::product::model::{NewProductProps, Product};
    use business::domain::product::repository::ProductRepository;
    use poem::http::StatusCode;
    use crate::api::error::with_error_envelope;
    use poem::test::TestClient;
    use poem::{endpoint::BoxEndpoint, IntoEndpoint};
    use poem_openapi::OpenApiService;
    use serde_json::json;

    struct SilentLogger;

    impl Logger for SilentLogger {
        fn info(&self, _message: &str) {}
        fn warn(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn debug(&self, _message: &str) {}
    }

    #[derive(Default)]
    struct MemoryCarts(Mutex<HashMap<Uuid, Cart>>);

    #[async_trait]
    impl CartRepository for MemoryCarts {
        async fn create(&self, cart: &Cart) -> Result<(), RepositoryError> {
            self.0.lock().unwrap().insert(cart.id, cart.clone());
            Ok(())
        }
        async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError> {
            self.0
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }
        async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
            let mut carts = self.0.lock().unwrap();
            match carts.get_mut(&cart.id) {
                Some(stored) => {
                    *stored = cart.clone();
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }
    }

    struct MemoryProducts(Vec<Product>);

    #[async_trait]
    impl ProductRepository for MemoryProducts {
        async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
            Ok(self.0.clone())
        }
        async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
            self.0
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }
        async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
            Ok(self.0.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
        }
        async fn find_by_code(&self, code: &str) -> Result<Option<Product>, RepositoryError> {
            Ok(self.0.iter().find(|p| p.code == code).cloned())
        }
        async fn create(&self, _product: &Product) -> Result<(), RepositoryError> {
            Ok(())
        }
        async fn update(&self, _product: &Product) -> Result<(), RepositoryError> {
            Ok(())
        }
        async fn delete(&self, _id: Uuid) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn product(code: &str, price: &str) -> Product {
        Product::new(NewProductProps {
            title: code.to_string(),
            description: "item".to_string(),
            code: code.to_string(),
            price: price.parse::<BigDecimal>().unwrap(),
            stock: 5,
            category: "Misc".to_string(),
            status: true,
            thumbnails: vec![format!("{code}.png")],
        })
    }

    fn client(products: Vec<Product>) -> TestClient<BoxEndpoint<'static>> {
        let carts: Arc<dyn CartRepository> = Arc::new(MemoryCarts::default());
        let products: Arc<dyn ProductRepository> = Arc::new(MemoryProducts(products));
        let logger: Arc<dyn Logger> = Arc::new(SilentLogger);

        let api = CartApi::new(
            Arc::new(CreateCartUseCaseImpl {
                repository: carts.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetCartByIdUseCaseImpl {
                repository: carts.clone(),
                products: products.clone(),
                logger: logger.clone(),
            }),
            Arc::new(AddProductToCartUseCaseImpl {
                repository: carts.clone(),
                products: products.clone(),
                logger: logger.clone(),
            }),
            Arc::new(UpdateLineQuantityUseCaseImpl {
                repository: carts.clone(),
                products: products.clone(),
                logger: logger.clone(),
            }),
            Arc::new(RemoveProductFromCartUseCaseImpl {
                repository: carts.clone(),
                products: products.clone(),
                logger: logger.clone(),
            }),
            Arc::new(ReplaceCartProductsUseCaseImpl {
                repository: carts.clone(),
                products,
                logger: logger.clone(),
            }),
            Arc::new(ClearCartUseCaseImpl {
                repository: carts,
                logger,
            }),
        );
        TestClient::new(with_error_envelope(
            OpenApiService::new(api, "test", "0.1.0").into_endpoint(),
        ))
    }

    async fn create_cart(client: &TestClient<BoxEndpoint<'static>>) -> String {
        let response = client.post("/carts").send().await;
        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.0.into_body().into_json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn should_add_same_product_twice_as_one_line() {
        let pen = product("PEN", "1.50");
        let pen_id = pen.id;
        let client = client(vec![pen]);
        let cid = create_cart(&client).await;

        client.post(format!("/carts/{cid}/products/{pen_id}")).send().await;
        let response = client
            .post(format!("/carts/{cid}/products/{pen_id}"))
            .send()
            .await;

        response.assert_status_is_ok();
        let body: serde_json::Value = response.0.into_body().into_json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["products"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["products"][0]["quantity"], 2);
        assert_eq!(body["data"]["products"][0]["product"]["thumbnail"], "PEN.png");
        assert_eq!(body["data"]["total"], 3.0);
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity() {
        let pen = product("PEN", "1");
        let pen_id = pen.id;
        let client = client(vec![pen]);
        let cid = create_cart(&client).await;
        client.post(format!("/carts/{cid}/products/{pen_id}")).send().await;

        let response = client
            .put(format!("/carts/{cid}/products/{pen_id}"))
            .body_json(&json!({"quantity": 0}))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_non_integer_quantity_with_error_envelope() {
        let pen = product("PEN", "1");
        let pen_id = pen.id;
        let client = client(vec![pen]);
        let cid = create_cart(&client).await;
        client.post(format!("/carts/{cid}/products/{pen_id}")).send().await;

        for quantity in [json!("abc"), json!(1.5)] {
            let response = client
                .put(format!("/carts/{cid}/products/{pen_id}"))
                .body_json(&json!({ "quantity": quantity }))
                .send()
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let body: serde_json::Value = response.0.into_body().into_json().await.unwrap();
            assert_eq!(body["success"], false);
            assert_eq!(body["name"], "InvalidArgument");
            assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
        }
    }

    #[tokio::test]
    async fn should_answer_non_json_replacement_with_error_envelope() {
        let client = client(vec![]);
        let cid = create_cart(&client).await;

        let response = client
            .put(format!("/carts/{cid}"))
            .content_type("text/plain")
            .body("products")
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.0.into_body().into_json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["name"], "InvalidArgument");
    }

    #[tokio::test]
    async fn should_return_not_found_when_removing_absent_line() {
        let client = client(vec![]);
        let cid = create_cart(&client).await;

        let response = client
            .delete(format!("/carts/{cid}/products/{}", Uuid::new_v4()))
            .send()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_not_found_for_malformed_cart_id() {
        let client = client(vec![]);

        let response = client.get("/carts/123").send().await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.0.into_body().into_json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "cart not found");
    }

    #[tokio::test]
    async fn should_replace_lines_and_merge_duplicates() {
        let a = product("A", "2");
        let b = product("B", "5");
        let (a_id, b_id) = (a.id, b.id);
        let client = client(vec![a, b]);
        let cid = create_cart(&client).await;

        let response = client
            .put(format!("/carts/{cid}"))
            .body_json(&json!({"products": [
                {"product": a_id, "quantity": 1},
                {"product": b_id, "quantity": 1},
                {"product": a_id, "quantity": 2}
            ]}))
            .send()
            .await;

        response.assert_status_is_ok();
        let body: serde_json::Value = response.0.into_body().into_json().await.unwrap();
        assert_eq!(body["data"]["products"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["products"][0]["quantity"], 3);
        assert_eq!(body["data"]["total"], 11.0);
    }
}
