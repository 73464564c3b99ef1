use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::product::repository::ProductRepositoryPostgres;

use business::application::cart::add_product::AddProductToCartUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::create::CreateCartUseCaseImpl;
use business::application::cart::get_by_id::GetCartByIdUseCaseImpl;
use business::application::cart::remove_product::RemoveProductFromCartUseCaseImpl;
use business::application::cart::replace_products::ReplaceCartProductsUseCaseImpl;
use business::application::cart::update_quantity::UpdateLineQuantityUseCaseImpl;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::list::ListProductsUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;
use business::domain::cart::repository::CartRepository;
use business::domain::logger::Logger;
use business::domain::product::repository::ProductRepository;

use crate::api::cart::routes::CartApi;
use crate::api::health::routes::HealthApi;
use crate::api::product::routes::ProductApi;
use crate::config::realtime_config::RealtimeConfig;
use crate::realtime::hub::ChatHub;
use crate::views::pages::PageState;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub product_api: ProductApi,
    pub cart_api: CartApi,
    pub pages: Arc<PageState>,
    pub hub: Arc<ChatHub>,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, realtime: &RealtimeConfig) -> Self {
        let product_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("products"));
        let cart_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("carts"));
        let realtime_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("realtime"));

        // Infrastructure adapters
        let product_repository: Arc<dyn ProductRepository> =
            Arc::new(ProductRepositoryPostgres::new(pool.clone()));
        let cart_repository: Arc<dyn CartRepository> =
            Arc::new(CartRepositoryPostgres::new(pool));

        // Product use cases
        let create_product = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let list_products = Arc::new(ListProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let get_product = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let update_product = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger.clone(),
        });
        let delete_product = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: product_logger,
        });

        // Cart use cases
        let create_cart = Arc::new(CreateCartUseCaseImpl {
            repository: cart_repository.clone(),
            logger: cart_logger.clone(),
        });
        let get_cart = Arc::new(GetCartByIdUseCaseImpl {
            repository: cart_repository.clone(),
            products: product_repository.clone(),
            logger: cart_logger.clone(),
        });
        let add_product = Arc::new(AddProductToCartUseCaseImpl {
            repository: cart_repository.clone(),
            products: product_repository.clone(),
            logger: cart_logger.clone(),
        });
        let update_quantity = Arc::new(UpdateLineQuantityUseCaseImpl {
            repository: cart_repository.clone(),
            products: product_repository.clone(),
            logger: cart_logger.clone(),
        });
        let remove_product = Arc::new(RemoveProductFromCartUseCaseImpl {
            repository: cart_repository.clone(),
            products: product_repository.clone(),
            logger: cart_logger.clone(),
        });
        let replace_products = Arc::new(ReplaceCartProductsUseCaseImpl {
            repository: cart_repository.clone(),
            products: product_repository,
            logger: cart_logger.clone(),
        });
        let clear_cart = Arc::new(ClearCartUseCaseImpl {
            repository: cart_repository,
            logger: cart_logger,
        });

        let pages = Arc::new(PageState {
            list_products: list_products.clone(),
            get_product: get_product.clone(),
            get_cart: get_cart.clone(),
        });

        let product_api = ProductApi::new(
            create_product,
            list_products,
            get_product,
            update_product,
            delete_product,
        );

        let cart_api = CartApi::new(
            create_cart,
            get_cart,
            add_product,
            update_quantity,
            remove_product,
            replace_products,
            clear_cart,
        );

        Self {
            health_api: HealthApi::new(),
            product_api,
            cart_api,
            pages,
            hub: Arc::new(ChatHub::new(realtime.channel_capacity, realtime_logger)),
        }
    }
}
