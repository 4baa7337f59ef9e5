//! scratch-bridge: HTTP bridge between Scratch and Minecraft Pi Edition
//!
//! Attempts one connection to the game server at startup, then serves the
//! command endpoint. If the connection attempt fails the bridge still runs,
//! but every command answers 503 until the process is restarted.

use anyhow::Result;
use mcpi_client::Minecraft;
use scratch_bridge::{BridgeConfig, Dispatcher, http};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BridgeConfig::from_env();

    info!(
        "Attempting to connect to Minecraft at {}:{}",
        config.minecraft_host, config.minecraft_port
    );
    let remote = connect(&config).await;
    if remote.is_none() {
        warn!("The bridge will run, but Minecraft commands will fail until restart");
    }

    let app = http::router(Dispatcher::new(remote));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Minecraft Scratch Bridge listening on http://{}", config.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}

/// One connection attempt; greets the player in chat so a successful bridge
/// start is visible in-game. Any failure leaves the holder absent.
async fn connect(config: &BridgeConfig) -> Option<Arc<Minecraft>> {
    let mc = match Minecraft::connect(&config.minecraft_host, config.minecraft_port).await {
        Ok(mc) => mc,
        Err(e) => {
            warn!(
                "Could not connect to Minecraft at {}:{} - {}",
                config.minecraft_host, config.minecraft_port, e
            );
            return None;
        }
    };

    use mcpi_client::MinecraftApi;
    if let Err(e) = mc.post_to_chat("Scratch bridge connected!").await {
        warn!("Connected but chat greeting failed: {}", e);
        mc.disconnect().await;
        return None;
    }

    info!("Successfully connected to Minecraft at {}", mc.address());
    Some(Arc::new(mc))
}
