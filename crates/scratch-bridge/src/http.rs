//! HTTP surface
//!
//! Two routes: a plain-text liveness check at `/` and the command endpoint
//! at `/command`. The command endpoint owns request-shape errors (non-JSON
//! bodies); everything past that is the dispatcher's problem.

use crate::command::CommandRequest;
use crate::dispatch::Dispatcher;
use axum::{
    Json, Router,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
};
use mcpi_client::MinecraftApi;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state
pub struct AppState<A: MinecraftApi> {
    pub dispatcher: Arc<Dispatcher<A>>,
}

impl<A: MinecraftApi> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

/// Build the bridge router around a dispatcher
pub fn router<A: MinecraftApi + 'static>(dispatcher: Dispatcher<A>) -> Router {
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    Router::new()
        .route("/", get(index))
        .route("/command", post(handle_command::<A>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Minecraft Scratch Bridge is running!"
}

async fn handle_command<A: MinecraftApi + 'static>(
    State(state): State<AppState<A>>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "Invalid JSON"})),
        );
    };

    info!(command = %request.command, args = ?request.args, "Received command");

    let (status, envelope) = state
        .dispatcher
        .handle(&request.command, &request.args)
        .await;
    (status, Json(envelope))
}
