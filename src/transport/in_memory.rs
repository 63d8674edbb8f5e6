use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::Message;
use crate::transport::{Transport, TransportEvent};

/// One end of an in-process connection. Each end sees `Open` first; dropping
/// or closing one end delivers `Close` to the other.
pub struct InMemoryTransport {
    outgoing: Option<UnboundedSender<TransportEvent>>,
    incoming: UnboundedReceiver<TransportEvent>,
    closed: bool,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        let _ = tx1.send(TransportEvent::Open);
        let _ = tx2.send(TransportEvent::Open);
        (
            Self {
                outgoing: Some(tx2),
                incoming: rx1,
                closed: false,
            },
            Self {
                outgoing: Some(tx1),
                incoming: rx2,
                closed: false,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let outgoing = self
            .outgoing
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        outgoing
            .send(TransportEvent::Data(msg))
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        if self.closed {
            return None;
        }
        match self.incoming.recv().await {
            Some(TransportEvent::Close) | None => {
                self.closed = true;
                Some(TransportEvent::Close)
            }
            Some(event) => Some(event),
        }
    }

    async fn close(&mut self) {
        if let Some(outgoing) = self.outgoing.take() {
            let _ = outgoing.send(TransportEvent::Close);
        }
    }
}
