//! # scratch-bridge
//!
//! HTTP bridge between Scratch and a Minecraft Pi API server.
//!
//! Scratch extensions POST `{"command": ..., "args": [...]}` to `/command`;
//! the bridge validates the arguments against a fixed command table, invokes
//! the corresponding remote operation through `mcpi-client`, and answers with
//! a JSON envelope carrying `status` plus command-specific fields.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod http;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::BridgeConfig;
pub use dispatch::Dispatcher;
