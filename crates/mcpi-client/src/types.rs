//! Position, direction and event types returned by the API

use serde::Serialize;

/// Event type ids used by the Pi API event queue
pub mod event_type {
    /// A sword right-click on a block
    pub const BLOCK_HIT: i32 = 1;
    /// A chat message posted by an entity
    pub const CHAT_POST: i32 = 2;
}

/// Exact position in the world (player positions can sit between tiles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Whole-tile position (block coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TileVec3 {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// A polled block-hit event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHitEvent {
    #[serde(rename = "type")]
    pub event_type: i32,
    pub pos: TileVec3,
    pub face: i32,
    #[serde(rename = "entityId")]
    pub entity_id: i32,
}

impl BlockHitEvent {
    pub fn new(pos: TileVec3, face: i32, entity_id: i32) -> Self {
        Self {
            event_type: event_type::BLOCK_HIT,
            pos,
            face,
            entity_id,
        }
    }
}

/// A polled chat-post event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPostEvent {
    #[serde(rename = "type")]
    pub event_type: i32,
    #[serde(rename = "entityId")]
    pub entity_id: i32,
    pub message: String,
}

impl ChatPostEvent {
    pub fn new(entity_id: i32, message: impl Into<String>) -> Self {
        Self {
            event_type: event_type::CHAT_POST,
            entity_id,
            message: message.into(),
        }
    }
}
