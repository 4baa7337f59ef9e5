//! Command dispatcher
//!
//! Takes a command name and positional JSON arguments, validates them against
//! the command table, invokes the remote operation, and shapes the response
//! envelope plus HTTP status. Validation runs in a fixed order: connected
//! check, table lookup, arity, per-argument coercion, remote call.

use crate::command::{Arity, Command, bool_arg, float_arg, int_arg, string_arg};
use axum::http::StatusCode;
use mcpi_client::{McpiError, MinecraftApi};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::error;

/// Why a command did not produce a success envelope
enum Rejection {
    /// Request-shape or validation problem (400)
    Invalid(String),
    /// The remote call itself failed (500)
    Remote(McpiError),
}

/// Holds the (possibly absent) remote connection and routes commands to it.
///
/// The connection is established once at startup; if it was never obtained
/// the dispatcher stays in the unconnected state for the process lifetime
/// and answers every command with 503.
pub struct Dispatcher<A: MinecraftApi> {
    remote: Option<Arc<A>>,
}

impl<A: MinecraftApi> Dispatcher<A> {
    pub fn new(remote: Option<Arc<A>>) -> Self {
        Self { remote }
    }

    /// Create a dispatcher that was never connected
    pub fn unconnected() -> Self {
        Self { remote: None }
    }

    pub fn is_connected(&self) -> bool {
        self.remote.is_some()
    }

    /// Handle one command request, producing the response envelope and the
    /// HTTP status to attach to it.
    pub async fn handle(&self, name: &str, args: &[Value]) -> (StatusCode, Value) {
        let Some(remote) = &self.remote else {
            return error_envelope(StatusCode::SERVICE_UNAVAILABLE, "Minecraft not connected");
        };

        let Some(command) = Command::lookup(name) else {
            return error_envelope(
                StatusCode::BAD_REQUEST,
                format!("Unknown command: {}", name),
            );
        };

        let arity = command.arity();
        if !arity.accepts(args.len()) {
            let message = if arity == Arity::Exact(0) {
                format!("{} does not take any arguments", command.name())
            } else {
                format!(
                    "Incorrect number of arguments for {} (expected {})",
                    command.name(),
                    command.arity_hint()
                )
            };
            return error_envelope(StatusCode::BAD_REQUEST, message);
        }

        match invoke(remote.as_ref(), command, args).await {
            Ok(envelope) => (StatusCode::OK, envelope),
            Err(Rejection::Invalid(message)) => error_envelope(StatusCode::BAD_REQUEST, message),
            Err(Rejection::Remote(e)) => {
                error!(command = name, ?args, error = %e, "Minecraft command failed");
                error_envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Minecraft command failed: {}", e),
                )
            }
        }
    }
}

fn error_envelope(status: StatusCode, message: impl Into<String>) -> (StatusCode, Value) {
    (
        status,
        json!({"status": "error", "message": message.into()}),
    )
}

fn success_message(message: String) -> Value {
    json!({"status": "success", "message": message})
}

/// Coerce every argument to an integer, or reject with the command's
/// type-mismatch message
fn int_args(command: Command, args: &[Value]) -> Result<Vec<i32>, Rejection> {
    args.iter()
        .map(int_arg)
        .collect::<Option<Vec<i32>>>()
        .ok_or_else(|| {
            Rejection::Invalid(format!(
                "Invalid arguments for {} (must be integers)",
                command.name()
            ))
        })
}

fn float_args(command: Command, args: &[Value]) -> Result<Vec<f64>, Rejection> {
    args.iter()
        .map(float_arg)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| {
            Rejection::Invalid(format!(
                "Invalid arguments for {} (must be numbers)",
                command.name()
            ))
        })
}

/// Validation already passed arity; coerce the arguments, make exactly one
/// remote call, and build the success envelope.
async fn invoke<A: MinecraftApi>(
    remote: &A,
    command: Command,
    args: &[Value],
) -> Result<Value, Rejection> {
    let envelope = match command {
        Command::PostToChat => {
            let message = string_arg(&args[0]).ok_or_else(|| {
                Rejection::Invalid("Invalid arguments for postToChat (must be a string)".into())
            })?;
            remote.post_to_chat(&message).await.map_err(Rejection::Remote)?;
            success_message(format!("Posted '{}' to chat", message))
        }
        Command::SetBlock => {
            let v = int_args(command, args)?;
            remote
                .set_block(v[0], v[1], v[2], v[3])
                .await
                .map_err(Rejection::Remote)?;
            success_message(format!(
                "Set block at ({},{},{}) to {}",
                v[0], v[1], v[2], v[3]
            ))
        }
        Command::SetBlocks => {
            let v = int_args(command, args)?;
            let block_id = v[6];
            let block_data = v.get(7).copied();
            remote
                .set_blocks(v[0], v[1], v[2], v[3], v[4], v[5], block_id, block_data)
                .await
                .map_err(Rejection::Remote)?;
            let mut message = format!(
                "Set blocks in range ({}..{}, {}..{}, {}..{}) to {}",
                v[0], v[3], v[1], v[4], v[2], v[5], block_id
            );
            if let Some(data) = block_data {
                message.push_str(&format!(":{}", data));
            }
            success_message(message)
        }
        Command::GetBlock => {
            let v = int_args(command, args)?;
            let block_id = remote
                .get_block(v[0], v[1], v[2])
                .await
                .map_err(Rejection::Remote)?;
            json!({"status": "success", "block_id": block_id})
        }
        Command::GetHeight => {
            let v = int_args(command, args)?;
            let height = remote
                .get_height(v[0], v[1])
                .await
                .map_err(Rejection::Remote)?;
            json!({"status": "success", "height": height})
        }
        Command::SetPlayerPos => {
            let v = float_args(command, args)?;
            remote
                .set_player_pos(v[0], v[1], v[2])
                .await
                .map_err(Rejection::Remote)?;
            success_message(format!("Set player position to ({},{},{})", v[0], v[1], v[2]))
        }
        Command::GetPlayerPos => {
            let pos = remote.player_pos().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "x": pos.x, "y": pos.y, "z": pos.z})
        }
        Command::GetPlayerTilePos => {
            let pos = remote.player_tile_pos().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "x": pos.x, "y": pos.y, "z": pos.z})
        }
        Command::GetPlayerDirection => {
            let dir = remote.player_direction().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "x": dir.x, "y": dir.y, "z": dir.z})
        }
        Command::GetPlayerRotation => {
            let rotation = remote.player_rotation().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "rotation": rotation})
        }
        Command::GetPlayerPitch => {
            let pitch = remote.player_pitch().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "pitch": pitch})
        }
        Command::WorldSetting => {
            let name = string_arg(&args[0]).ok_or_else(|| {
                Rejection::Invalid("Invalid arguments for worldSetting (must be a string)".into())
            })?;
            let status = bool_arg(&args[1]).ok_or_else(|| {
                Rejection::Invalid(
                    "Invalid status for worldSetting (must be true/false or 1/0)".into(),
                )
            })?;
            remote
                .world_setting(&name, status)
                .await
                .map_err(Rejection::Remote)?;
            success_message(format!("Set world setting '{}' to {}", name, status))
        }
        Command::PollBlockHits => {
            let hits = remote.poll_block_hits().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "hits": hits})
        }
        Command::PollChatPosts => {
            let posts = remote.poll_chat_posts().await.map_err(Rejection::Remote)?;
            json!({"status": "success", "posts": posts})
        }
        Command::ClearEvents => {
            remote.clear_events().await.map_err(Rejection::Remote)?;
            success_message("Cleared all events".into())
        }
    };
    Ok(envelope)
}
