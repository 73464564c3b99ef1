use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use business::domain::product::errors::ProductError;
use business::domain::product::listing::{ListingParams, ListingQuery};
use business::domain::product::use_cases::create::CreateProductUseCase;
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::list::ListProductsUseCase;
use business::domain::product::use_cases::update::UpdateProductUseCase;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    CreateProductRequest, ProductEnvelope, ProductListResponse, UpdateProductRequest,
};
use crate::api::tags::ApiTags;

/// Base used for the navigation links of the JSON list.
pub const PRODUCTS_PATH: &str = "/api/products";

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    list_use_case: Arc<dyn ListProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
}

impl ProductApi {
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        list_use_case: Arc<dyn ListProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
        }
    }
}

/// A malformed identifier cannot name any product.
fn parse_id(raw: &str) -> Result<Uuid, ProductError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ProductError::NotFound)
}

/// Product catalogue API
///
/// Endpoints for listing, creating, reading, updating, and deleting products.
#[OpenApi]
impl ProductApi {
    /// List products
    ///
    /// Filters by free text, category and availability, sorts by price and
    /// paginates. Unparseable `page`/`limit` fall back to 1/10.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    async fn list_products(
        &self,
        query: Query<Option<String>>,
        category: Query<Option<String>>,
        status: Query<Option<String>>,
        sort: Query<Option<String>>,
        page: Query<Option<String>>,
        limit: Query<Option<String>>,
    ) -> ListProductsResponse {
        let listing = ListingQuery::parse(&ListingParams {
            query: query.0,
            category: category.0,
            status: status.0,
            sort: sort.0,
            page: page.0,
            limit: limit.0,
        });

        match self.list_use_case.execute(&listing).await {
            Ok(page) => ListProductsResponse::Ok(Json(ProductListResponse::from_page(
                page,
                &listing,
                PRODUCTS_PATH,
            ))),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ListProductsResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    #[oai(path = "/products/:pid", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, pid: Path<String>) -> GetProductByIdResponse {
        let result = match parse_id(&pid.0) {
            Ok(id) => {
                self.get_by_id_use_case
                    .execute(GetProductByIdParams { id })
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(product) => GetProductByIdResponse::Ok(Json(ProductEnvelope::new(product, None))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Create a new product
    ///
    /// Title, description, code, price, stock and category are required.
    /// The code must not be used by another product.
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(&self, body: Json<CreateProductRequest>) -> CreateProductResponse {
        match self.create_use_case.execute(body.0.into()).await {
            Ok(product) => CreateProductResponse::Created(Json(ProductEnvelope::new(
                product,
                Some("product created"),
            ))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateProductResponse::BadRequest(json),
                    _ => CreateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a product
    ///
    /// Only the fields present in the body change; the identifier never does.
    #[oai(path = "/products/:pid", method = "put", tag = "ApiTags::Products")]
    async fn update_product(
        &self,
        pid: Path<String>,
        body: Json<UpdateProductRequest>,
    ) -> UpdateProductResponse {
        let result = match parse_id(&pid.0) {
            Ok(id) => self.update_use_case.execute(body.0.into_params(id)).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(product) => UpdateProductResponse::Ok(Json(ProductEnvelope::new(
                product,
                Some("product updated"),
            ))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateProductResponse::BadRequest(json),
                    404 => UpdateProductResponse::NotFound(json),
                    _ => UpdateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a product
    ///
    /// Returns the product as it was before removal. Carts referencing it
    /// keep their line, shown as not found.
    #[oai(path = "/products/:pid", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, pid: Path<String>) -> DeleteProductResponse {
        let result = match parse_id(&pid.0) {
            Ok(id) => self.delete_use_case.execute(DeleteProductParams { id }).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(product) => DeleteProductResponse::Ok(Json(ProductEnvelope::new(
                product,
                Some("product deleted"),
            ))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteProductResponse::NotFound(json),
                    _ => DeleteProductResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListProductsResponse {
    #[oai(status = 200)]
    Ok(Json<ProductListResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductEnvelope>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductEnvelope>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
