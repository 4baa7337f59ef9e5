//! TCP connection to the Minecraft Pi API socket
//!
//! The wire protocol is line-oriented ASCII: one `name(arg,arg,...)\n`
//! command per line, and for query commands one `\n`-terminated reply line.
//! Mutating commands produce no reply at all, so the connection exposes both
//! fire-and-forget `send` and round-trip `send_receive`.

use crate::error::{McpiError, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tracing::{debug, info};

struct Halves {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

/// A connection to the game server's API socket.
///
/// Both halves live behind one mutex so a command and its reply line are
/// never interleaved with another caller's.
pub struct ServerConnection {
    stream: Mutex<Option<Halves>>,
    address: String,
}

impl ServerConnection {
    /// Connect to the API socket at `host:port`
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let address = format!("{}:{}", host, port);
        info!("Connecting to Minecraft at {}", address);

        let stream = TcpStream::connect(&address)
            .await
            .map_err(|e| McpiError::Connection(format!("connect to {} failed: {}", address, e)))?;

        // Disable Nagle's algorithm for low latency
        stream
            .set_nodelay(true)
            .map_err(|e| McpiError::Connection(format!("failed to set TCP_NODELAY: {}", e)))?;

        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            stream: Mutex::new(Some(Halves {
                reader: BufReader::new(read_half),
                writer: write_half,
            })),
            address,
        })
    }

    /// Whether the underlying stream is still held
    pub async fn is_connected(&self) -> bool {
        self.stream.lock().await.is_some()
    }

    /// Server address this connection was opened against
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Send a command line without waiting for a reply
    pub async fn send(&self, command: &str) -> Result<()> {
        let mut guard = self.stream.lock().await;
        let halves = guard.as_mut().ok_or(McpiError::NotConnected)?;

        debug!("mcpi send: {}", command);
        write_line(&mut halves.writer, command).await
    }

    /// Send a command line and read one reply line
    pub async fn send_receive(&self, command: &str) -> Result<String> {
        let mut guard = self.stream.lock().await;
        let halves = guard.as_mut().ok_or(McpiError::NotConnected)?;

        debug!("mcpi send: {}", command);
        write_line(&mut halves.writer, command).await?;

        let mut line = String::new();
        let n = halves
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| McpiError::Connection(format!("read failed: {}", e)))?;
        if n == 0 {
            return Err(McpiError::Connection("server closed the connection".into()));
        }

        let reply = line.trim_end_matches(['\r', '\n']).to_string();
        debug!("mcpi recv: {}", reply);

        if reply == "Fail" {
            return Err(McpiError::CommandFailed(command.to_string()));
        }
        Ok(reply)
    }

    /// Shut the connection down
    pub async fn disconnect(&self) {
        if let Some(mut halves) = self.stream.lock().await.take() {
            let _ = halves.writer.shutdown().await;
        }
        info!("Disconnected from {}", self.address);
    }
}

async fn write_line(writer: &mut OwnedWriteHalf, command: &str) -> Result<()> {
    let mut frame = Vec::with_capacity(command.len() + 1);
    frame.extend_from_slice(command.as_bytes());
    frame.push(b'\n');
    writer
        .write_all(&frame)
        .await
        .map_err(|e| McpiError::Connection(format!("write failed: {}", e)))?;
    writer
        .flush()
        .await
        .map_err(|e| McpiError::Connection(format!("flush failed: {}", e)))?;
    Ok(())
}
