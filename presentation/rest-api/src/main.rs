use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod tags;
    pub mod cart {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod health {
        pub mod routes;
    }
    pub mod product {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}
mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod database_config;
    pub mod error;
    pub mod realtime_config;
    pub mod server_config;
}
mod realtime {
    pub mod hub;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
}
mod views {
    pub mod pages;
    pub mod templates;
}

use config::{app_config::AppConfig, database_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Shop backend entry point
///
/// Layout:
/// - config/: Environment configuration (server, CORS, database, realtime)
/// - setup/: Dependency injection and server setup
/// - api/: JSON routes, DTOs and error mappers
/// - views/: Server-rendered pages
/// - realtime/: WebSocket fan-out
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize database and apply migrations
    let pool = database_config::init_database().await?;

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, &config.realtime);

    // 6. Run server
    Server::run(config, container).await?;

    Ok(())
}
