//! # mcpi-client
//!
//! Client for the Minecraft Pi Edition API protocol: newline-terminated
//! ASCII commands over TCP, as served by Minecraft Pi Edition (Reborn) and
//! the RaspberryJuice plugin on port 4711.
//!
//! This crate provides:
//! - `Minecraft`: the concrete TCP client
//! - `MinecraftApi`: the trait boundary consumed by bridges (mockable)
//! - Position, direction and event types with JSON-friendly serialization

pub mod client;
pub mod connection;
pub mod error;
pub mod types;

pub use client::{Minecraft, MinecraftApi};
pub use connection::ServerConnection;
pub use error::{McpiError, Result};
pub use types::{BlockHitEvent, ChatPostEvent, TileVec3, Vec3};
