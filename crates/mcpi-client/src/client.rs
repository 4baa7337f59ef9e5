//! Typed Minecraft client over the API connection

use crate::connection::ServerConnection;
use crate::error::{McpiError, Result};
use crate::types::{BlockHitEvent, ChatPostEvent, TileVec3, Vec3};

/// The remote operations a bridge can invoke against a running game server.
///
/// `Minecraft` is the real implementation; consumers hold this trait so
/// tests can substitute a recording mock.
#[async_trait::async_trait]
pub trait MinecraftApi: Send + Sync {
    /// Post a message to the in-game chat
    async fn post_to_chat(&self, message: &str) -> Result<()>;

    /// Set a single block
    async fn set_block(&self, x: i32, y: i32, z: i32, block_id: i32) -> Result<()>;

    /// Fill a cuboid with a block type, optionally with block data
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<()>;

    /// Get the block type at a position
    async fn get_block(&self, x: i32, y: i32, z: i32) -> Result<i32>;

    /// Get the y of the highest non-air block at (x, z)
    async fn get_height(&self, x: i32, z: i32) -> Result<i32>;

    /// Teleport the player
    async fn set_player_pos(&self, x: f64, y: f64, z: f64) -> Result<()>;

    /// Get the player's exact position
    async fn player_pos(&self) -> Result<Vec3>;

    /// Get the player's tile position
    async fn player_tile_pos(&self) -> Result<TileVec3>;

    /// Get the player's facing direction as a unit vector
    async fn player_direction(&self) -> Result<Vec3>;

    /// Get the player's rotation in degrees
    async fn player_rotation(&self) -> Result<f64>;

    /// Get the player's pitch in degrees
    async fn player_pitch(&self) -> Result<f64>;

    /// Toggle a world setting such as `world_immutable`
    async fn world_setting(&self, name: &str, status: bool) -> Result<()>;

    /// Drain queued sword-hit events
    async fn poll_block_hits(&self) -> Result<Vec<BlockHitEvent>>;

    /// Drain queued chat-post events
    async fn poll_chat_posts(&self) -> Result<Vec<ChatPostEvent>>;

    /// Clear all queued events without reading them
    async fn clear_events(&self) -> Result<()>;
}

/// Client for a running Minecraft Pi API server
pub struct Minecraft {
    conn: ServerConnection,
}

impl Minecraft {
    /// Connect to the game server at `host:port`
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let conn = ServerConnection::connect(host, port).await?;
        Ok(Self { conn })
    }

    /// Server address this client is connected to
    pub fn address(&self) -> &str {
        self.conn.address()
    }

    /// Shut the connection down
    pub async fn disconnect(&self) {
        self.conn.disconnect().await;
    }
}

#[async_trait::async_trait]
impl MinecraftApi for Minecraft {
    async fn post_to_chat(&self, message: &str) -> Result<()> {
        // Newlines would terminate the frame early
        let message = sanitize_chat(message);
        self.conn.send(&format!("chat.post({})", message)).await
    }

    async fn set_block(&self, x: i32, y: i32, z: i32, block_id: i32) -> Result<()> {
        self.conn
            .send(&format!("world.setBlock({},{},{},{})", x, y, z, block_id))
            .await
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
        let command = match block_data {
            Some(data) => format!(
                "world.setBlocks({},{},{},{},{},{},{},{})",
                x1, y1, z1, x2, y2, z2, block_id, data
            ),
            None => format!(
                "world.setBlocks({},{},{},{},{},{},{})",
                x1, y1, z1, x2, y2, z2, block_id
            ),
        };
        self.conn.send(&command).await
    }

    async fn get_block(&self, x: i32, y: i32, z: i32) -> Result<i32> {
        let reply = self
            .conn
            .send_receive(&format!("world.getBlock({},{},{})", x, y, z))
            .await?;
        parse_int(&reply)
    }

    async fn get_height(&self, x: i32, z: i32) -> Result<i32> {
        let reply = self
            .conn
            .send_receive(&format!("world.getHeight({},{})", x, z))
            .await?;
        parse_int(&reply)
    }

    async fn set_player_pos(&self, x: f64, y: f64, z: f64) -> Result<()> {
        self.conn
            .send(&format!("player.setPos({},{},{})", x, y, z))
            .await
    }

    async fn player_pos(&self) -> Result<Vec3> {
        let reply = self.conn.send_receive("player.getPos()").await?;
        parse_vec3(&reply)
    }

    async fn player_tile_pos(&self) -> Result<TileVec3> {
        let reply = self.conn.send_receive("player.getTile()").await?;
        parse_tile_vec3(&reply)
    }

    async fn player_direction(&self) -> Result<Vec3> {
        let reply = self.conn.send_receive("player.getDirection()").await?;
        parse_vec3(&reply)
    }

    async fn player_rotation(&self) -> Result<f64> {
        let reply = self.conn.send_receive("player.getRotation()").await?;
        parse_float(&reply)
    }

    async fn player_pitch(&self) -> Result<f64> {
        let reply = self.conn.send_receive("player.getPitch()").await?;
        parse_float(&reply)
    }

    async fn world_setting(&self, name: &str, status: bool) -> Result<()> {
        self.conn
            .send(&format!(
                "world.setting({},{})",
                name,
                if status { 1 } else { 0 }
            ))
            .await
    }

    async fn poll_block_hits(&self) -> Result<Vec<BlockHitEvent>> {
        let reply = self.conn.send_receive("events.block.hits()").await?;
        parse_block_hits(&reply)
    }

    async fn poll_chat_posts(&self) -> Result<Vec<ChatPostEvent>> {
        let reply = self.conn.send_receive("events.chat.posts()").await?;
        parse_chat_posts(&reply)
    }

    async fn clear_events(&self) -> Result<()> {
        self.conn.send("events.clear()").await
    }
}

fn sanitize_chat(message: &str) -> String {
    message.replace(['\r', '\n'], " ")
}

fn parse_int(reply: &str) -> Result<i32> {
    reply
        .trim()
        .parse()
        .map_err(|_| McpiError::Protocol(format!("expected integer reply, got {:?}", reply)))
}

fn parse_float(reply: &str) -> Result<f64> {
    reply
        .trim()
        .parse()
        .map_err(|_| McpiError::Protocol(format!("expected float reply, got {:?}", reply)))
}

fn parse_vec3(reply: &str) -> Result<Vec3> {
    let parts: Vec<&str> = reply.split(',').collect();
    if parts.len() != 3 {
        return Err(McpiError::Protocol(format!(
            "expected x,y,z reply, got {:?}",
            reply
        )));
    }
    Ok(Vec3::new(
        parse_float(parts[0])?,
        parse_float(parts[1])?,
        parse_float(parts[2])?,
    ))
}

fn parse_tile_vec3(reply: &str) -> Result<TileVec3> {
    let parts: Vec<&str> = reply.split(',').collect();
    if parts.len() != 3 {
        return Err(McpiError::Protocol(format!(
            "expected x,y,z reply, got {:?}",
            reply
        )));
    }
    Ok(TileVec3::new(
        parse_int(parts[0])?,
        parse_int(parts[1])?,
        parse_int(parts[2])?,
    ))
}

/// Block-hit events arrive as `x,y,z,face,entityId` records joined by `|`
fn parse_block_hits(reply: &str) -> Result<Vec<BlockHitEvent>> {
    if reply.is_empty() {
        return Ok(vec![]);
    }
    reply
        .split('|')
        .map(|record| {
            let fields: Vec<&str> = record.split(',').collect();
            if fields.len() != 5 {
                return Err(McpiError::Protocol(format!(
                    "malformed block hit record {:?}",
                    record
                )));
            }
            Ok(BlockHitEvent::new(
                TileVec3::new(
                    parse_int(fields[0])?,
                    parse_int(fields[1])?,
                    parse_int(fields[2])?,
                ),
                parse_int(fields[3])?,
                parse_int(fields[4])?,
            ))
        })
        .collect()
}

/// Chat-post events arrive as `entityId,message` records joined by `|`;
/// the message itself may contain commas, so only the first one splits.
fn parse_chat_posts(reply: &str) -> Result<Vec<ChatPostEvent>> {
    if reply.is_empty() {
        return Ok(vec![]);
    }
    reply
        .split('|')
        .map(|record| {
            let (entity_id, message) = record.split_once(',').ok_or_else(|| {
                McpiError::Protocol(format!("malformed chat post record {:?}", record))
            })?;
            Ok(ChatPostEvent::new(parse_int(entity_id)?, message))
        })
        .collect()
}
