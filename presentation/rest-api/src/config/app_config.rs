use super::{
    cors_config, error::ConfigError, realtime_config::RealtimeConfig, server_config::ServerConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            cors: cors_config::init_cors(),
            realtime: RealtimeConfig::from_env()?,
        })
    }
}
