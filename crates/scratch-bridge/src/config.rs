//! Configuration loaded from environment variables

use std::env;

/// Bridge configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// HTTP bind address (e.g. "0.0.0.0:5000")
    pub bind_address: String,

    /// Host running the Minecraft Pi API server
    pub minecraft_host: String,

    /// Minecraft Pi API port (default: 4711)
    pub minecraft_port: u16,
}

impl BridgeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".into()),
            minecraft_host: env::var("MINECRAFT_HOST").unwrap_or_else(|_| "localhost".into()),
            minecraft_port: env::var("MINECRAFT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4711),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".into(),
            minecraft_host: "localhost".into(),
            minecraft_port: 4711,
        }
    }
}
