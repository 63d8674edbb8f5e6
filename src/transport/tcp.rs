use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::{Transport, TransportEvent};

/// Default timeout for a single send (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (64 KiB). Game messages are tiny.
const MAX_MESSAGE_SIZE: u32 = 64 * 1024;

const EVENT_BUFFER: usize = 64;

/// Length-prefixed JSON frames over TCP.
///
/// Each frame is a big-endian `u32` length followed by that many bytes of
/// JSON. A background task reads frames and queues them as events, so
/// [`Transport::next_event`] stays cancel safe.
pub struct TcpTransport {
    writer: Option<OwnedWriteHalf>,
    events: mpsc::Receiver<TransportEvent>,
    reader: JoinHandle<()>,
    timeout_duration: Duration,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, None)
    }

    /// `idle_timeout` bounds the silence between two inbound frames; when it
    /// expires the transport reports an error event.
    pub fn with_config(
        stream: TcpStream,
        timeout_duration: Duration,
        idle_timeout: Option<Duration>,
    ) -> Self {
        let (read, writer) = stream.into_split();
        let (tx, events) = mpsc::channel(EVENT_BUFFER);
        let reader = tokio::spawn(read_loop(read, tx, idle_timeout));
        Self {
            writer: Some(writer),
            events,
            reader,
            timeout_duration,
        }
    }

    /// Connect to `addr`, failing if the connection does not open within
    /// `connect_timeout`.
    pub async fn connect<A: ToSocketAddrs>(
        addr: A,
        connect_timeout: Duration,
        idle_timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let stream = timeout(connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", connect_timeout))??;
        Ok(Self::with_config(stream, DEFAULT_TIMEOUT, idle_timeout))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_loop(
    mut read: OwnedReadHalf,
    tx: mpsc::Sender<TransportEvent>,
    idle_timeout: Option<Duration>,
) {
    if tx.send(TransportEvent::Open).await.is_err() {
        return;
    }
    loop {
        let frame = match idle_timeout {
            Some(idle) => match timeout(idle, read_frame(&mut read)).await {
                Ok(frame) => frame,
                Err(_) => Err(anyhow::anyhow!(
                    "Connection idle timeout exceeded ({:?})",
                    idle
                )),
            },
            None => read_frame(&mut read).await,
        };
        let event = match frame {
            Ok(Some(bytes)) => match Message::decode(&bytes) {
                Ok(msg) => {
                    debug!("[TcpTransport] received {:?}", msg);
                    TransportEvent::Data(msg)
                }
                Err(e) => {
                    // Framing is intact, only this message is unusable.
                    warn!("[TcpTransport] dropping malformed frame: {}", e);
                    continue;
                }
            },
            Ok(None) => TransportEvent::Close,
            Err(e) => TransportEvent::Error(e.to_string()),
        };
        let last = !matches!(event, TransportEvent::Data(_));
        if tx.send(event).await.is_err() || last {
            return;
        }
    }
}

/// Read one frame. `Ok(None)` on a clean end of stream between frames.
async fn read_frame(read: &mut OwnedReadHalf) -> anyhow::Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    match read.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => {
            return Err(anyhow::anyhow!("Connection reset by peer"))
        }
        Err(e) => return Err(anyhow::anyhow!("Read error: {}", e)),
    }

    let len = u32::from_be_bytes(len_buf);
    // Bounded read length check to prevent excessive memory allocation
    if len > MAX_MESSAGE_SIZE {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            len,
            MAX_MESSAGE_SIZE
        ));
    }
    if len == 0 {
        return Err(anyhow::anyhow!("Invalid message length: 0"));
    }

    let mut buf = vec![0u8; len as usize];
    read.read_exact(&mut buf).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            anyhow::anyhow!("Connection closed mid-frame")
        } else {
            anyhow::anyhow!("Read error: {}", e)
        }
    })?;
    Ok(Some(buf))
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        let data = msg.encode()?;
        if data.len() as u32 > MAX_MESSAGE_SIZE {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                MAX_MESSAGE_SIZE
            ));
        }

        let send_op = async {
            let mut frame = Vec::with_capacity(4 + data.len());
            frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
            frame.extend_from_slice(&data);
            writer.write_all(&frame).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::BrokenPipe
                    || e.kind() == std::io::ErrorKind::ConnectionReset
                {
                    anyhow::anyhow!("Connection closed by peer")
                } else {
                    anyhow::anyhow!("Write error: {}", e)
                }
            })
        };

        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    async fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.shutdown().await;
        }
    }
}
