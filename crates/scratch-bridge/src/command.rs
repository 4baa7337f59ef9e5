//! Command table and argument coercion
//!
//! The bridge supports a fixed enumeration of commands. Each entry carries
//! its arity so the dispatcher can validate before touching the remote, and
//! the coercion helpers here turn JSON scalars into the concrete argument
//! types the Pi API wants.

use serde::Deserialize;
use serde_json::Value;

/// A single command request posted by a Scratch extension
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Number of positional arguments a command accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// setBlocks takes 7 args, or 8 with the block-data variant
    Either(usize, usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(want) => n == want,
            Arity::Either(a, b) => n == a || n == b,
        }
    }
}

/// The fixed table of commands the bridge understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PostToChat,
    SetBlock,
    SetBlocks,
    GetBlock,
    GetHeight,
    SetPlayerPos,
    GetPlayerPos,
    GetPlayerTilePos,
    GetPlayerDirection,
    GetPlayerRotation,
    GetPlayerPitch,
    WorldSetting,
    PollBlockHits,
    PollChatPosts,
    ClearEvents,
}

impl Command {
    /// Look a command up by its wire name
    pub fn lookup(name: &str) -> Option<Self> {
        let command = match name {
            "postToChat" => Self::PostToChat,
            "setBlock" => Self::SetBlock,
            "setBlocks" => Self::SetBlocks,
            "getBlock" => Self::GetBlock,
            "getHeight" => Self::GetHeight,
            "setPlayerPos" => Self::SetPlayerPos,
            "getPlayerPos" => Self::GetPlayerPos,
            "getPlayerTilePos" => Self::GetPlayerTilePos,
            "getPlayerDirection" => Self::GetPlayerDirection,
            "getPlayerRotation" => Self::GetPlayerRotation,
            "getPlayerPitch" => Self::GetPlayerPitch,
            "worldSetting" => Self::WorldSetting,
            "pollBlockHits" => Self::PollBlockHits,
            "pollChatPosts" => Self::PollChatPosts,
            "clearEvents" => Self::ClearEvents,
            _ => return None,
        };
        Some(command)
    }

    /// Wire name of the command
    pub fn name(self) -> &'static str {
        match self {
            Self::PostToChat => "postToChat",
            Self::SetBlock => "setBlock",
            Self::SetBlocks => "setBlocks",
            Self::GetBlock => "getBlock",
            Self::GetHeight => "getHeight",
            Self::SetPlayerPos => "setPlayerPos",
            Self::GetPlayerPos => "getPlayerPos",
            Self::GetPlayerTilePos => "getPlayerTilePos",
            Self::GetPlayerDirection => "getPlayerDirection",
            Self::GetPlayerRotation => "getPlayerRotation",
            Self::GetPlayerPitch => "getPlayerPitch",
            Self::WorldSetting => "worldSetting",
            Self::PollBlockHits => "pollBlockHits",
            Self::PollChatPosts => "pollChatPosts",
            Self::ClearEvents => "clearEvents",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::PostToChat => Arity::Exact(1),
            Self::SetBlock => Arity::Exact(4),
            Self::SetBlocks => Arity::Either(7, 8),
            Self::GetBlock => Arity::Exact(3),
            Self::GetHeight => Arity::Exact(2),
            Self::SetPlayerPos => Arity::Exact(3),
            Self::WorldSetting => Arity::Exact(2),
            Self::GetPlayerPos
            | Self::GetPlayerTilePos
            | Self::GetPlayerDirection
            | Self::GetPlayerRotation
            | Self::GetPlayerPitch
            | Self::PollBlockHits
            | Self::PollChatPosts
            | Self::ClearEvents => Arity::Exact(0),
        }
    }

    /// How the expected arity reads in the arity-mismatch message
    pub fn arity_hint(self) -> &'static str {
        match self {
            Self::SetBlocks => "7 or 8",
            Self::WorldSetting => "2: name, status",
            Self::PostToChat => "1",
            Self::GetHeight => "2",
            Self::GetBlock | Self::SetPlayerPos => "3",
            Self::SetBlock => "4",
            _ => "0",
        }
    }
}

/// Coerce a JSON scalar to an integer.
///
/// Accepts integral numbers and strings that parse as integers; a value with
/// a fractional part is rejected rather than truncated.
pub fn int_arg(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else {
                // e.g. the JSON literal 3.0: integral, just parsed as float
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
                    Some(f as i32)
                } else {
                    None
                }
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a JSON scalar to a float (any numeric string qualifies)
pub fn float_arg(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render a JSON scalar as text, the way chat arguments are taken
pub fn string_arg(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a bool-like scalar: native booleans, `"true"`/`"false"`
/// (case-insensitive), and `1`/`0` in either string or number form.
pub fn bool_arg(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}
