use std::env;

use super::error::{ConfigError, parse_or};

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Realtime channel configuration
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Frames buffered per subscriber before a slow socket starts skipping.
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    /// Environment variables:
    /// - REALTIME_CHANNEL_CAPACITY: broadcast buffer size (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        let channel_capacity = parse_or(
            "REALTIME_CHANNEL_CAPACITY",
            env::var("REALTIME_CHANNEL_CAPACITY").ok(),
            DEFAULT_CHANNEL_CAPACITY,
        )?;
        if channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                name: "REALTIME_CHANNEL_CAPACITY",
                value: "0".to_string(),
            });
        }
        Ok(Self { channel_capacity })
    }
}
