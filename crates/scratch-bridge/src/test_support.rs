//! Recording mock of the remote API for dispatcher and router tests

use mcpi_client::{BlockHitEvent, ChatPostEvent, McpiError, MinecraftApi, Result, TileVec3, Vec3};
use std::sync::Mutex;

/// One recorded remote invocation, with the coerced arguments it received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PostToChat(String),
    SetBlock(i32, i32, i32, i32),
    SetBlocks([i32; 6], i32, Option<i32>),
    GetBlock(i32, i32, i32),
    GetHeight(i32, i32),
    SetPlayerPos(f64, f64, f64),
    PlayerPos,
    PlayerTilePos,
    PlayerDirection,
    PlayerRotation,
    PlayerPitch,
    WorldSetting(String, bool),
    PollBlockHits,
    PollChatPosts,
    ClearEvents,
}

/// In-memory stand-in for a connected game server.
///
/// Records every invocation; when `fail_with` is set, every operation still
/// records but then fails, so tests can check the call happened before the
/// error surfaced.
pub struct MockMinecraft {
    calls: Mutex<Vec<Call>>,
    fail_with: Option<String>,
    pub block_id: i32,
    pub height: i32,
    pub pos: Vec3,
    pub tile: TileVec3,
    pub direction: Vec3,
    pub rotation: f64,
    pub pitch: f64,
    pub hits: Vec<BlockHitEvent>,
    pub posts: Vec<ChatPostEvent>,
}

impl Default for MockMinecraft {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
            block_id: 0,
            height: 0,
            pos: Vec3::new(0.0, 0.0, 0.0),
            tile: TileVec3::new(0, 0, 0),
            direction: Vec3::new(0.0, 0.0, 1.0),
            rotation: 0.0,
            pitch: 0.0,
            hits: vec![],
            posts: vec![],
        }
    }
}

impl MockMinecraft {
    /// A mock whose every operation fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Everything invoked so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(McpiError::Connection(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl MinecraftApi for MockMinecraft {
    async fn post_to_chat(&self, message: &str) -> Result<()> {
        self.record(Call::PostToChat(message.to_string()))
    }

    async fn set_block(&self, x: i32, y: i32, z: i32, block_id: i32) -> Result<()> {
        self.record(Call::SetBlock(x, y, z, block_id))
    }

    async fn set_blocks(
        &self,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        block_id: i32,
        block_data: Option<i32>,
    ) -> Result<()> {
        self.record(Call::SetBlocks([x1, y1, z1, x2, y2, z2], block_id, block_data))
    }

    async fn get_block(&self, x: i32, y: i32, z: i32) -> Result<i32> {
        self.record(Call::GetBlock(x, y, z))?;
        Ok(self.block_id)
    }

    async fn get_height(&self, x: i32, z: i32) -> Result<i32> {
        self.record(Call::GetHeight(x, z))?;
        Ok(self.height)
    }

    async fn set_player_pos(&self, x: f64, y: f64, z: f64) -> Result<()> {
        self.record(Call::SetPlayerPos(x, y, z))
    }

    async fn player_pos(&self) -> Result<Vec3> {
        self.record(Call::PlayerPos)?;
        Ok(self.pos)
    }

    async fn player_tile_pos(&self) -> Result<TileVec3> {
        self.record(Call::PlayerTilePos)?;
        Ok(self.tile)
    }

    async fn player_direction(&self) -> Result<Vec3> {
        self.record(Call::PlayerDirection)?;
        Ok(self.direction)
    }

    async fn player_rotation(&self) -> Result<f64> {
        self.record(Call::PlayerRotation)?;
        Ok(self.rotation)
    }

    async fn player_pitch(&self) -> Result<f64> {
        self.record(Call::PlayerPitch)?;
        Ok(self.pitch)
    }

    async fn world_setting(&self, name: &str, status: bool) -> Result<()> {
        self.record(Call::WorldSetting(name.to_string(), status))
    }

    async fn poll_block_hits(&self) -> Result<Vec<BlockHitEvent>> {
        self.record(Call::PollBlockHits)?;
        Ok(self.hits.clone())
    }

    async fn poll_chat_posts(&self) -> Result<Vec<ChatPostEvent>> {
        self.record(Call::PollChatPosts)?;
        Ok(self.posts.clone())
    }

    async fn clear_events(&self) -> Result<()> {
        self.record(Call::ClearEvents)
    }
}
