use poem::{
    EndpointExt, IntoEndpoint, Route, Server as PoemServer, get, listener::TcpListener,
    middleware::Tracing,
};
use poem_openapi::OpenApiService;
use tracing::info;

use crate::api::error::with_error_envelope;
use crate::realtime::hub;
use crate::views::pages;
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let api_service = OpenApiService::new(
            (
                container.health_api,
                container.product_api,
                container.cart_api,
            ),
            "Shop Backend API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}/api", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/api", with_error_envelope(api_service.into_endpoint()))
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .at("/", get(pages::home))
            .at("/products", get(pages::products_index))
            .at("/products/:pid", get(pages::product_show))
            .at("/carts/:cid", get(pages::cart_show))
            .at("/realtime", get(pages::realtime))
            .at("/ws", get(hub::ws))
            .data(container.pages)
            .data(container.hub)
            .with(config.cors)
            .with(Tracing);
        info!("Server running at http://{}", addr);
        info!("Swagger UI at http://{}/docs", addr);
        info!("OpenAPI JSON at http://{}/openapi.json", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}
