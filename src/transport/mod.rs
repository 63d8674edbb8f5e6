//! Peer transports.
//!
//! A transport is a reliable, ordered, point-to-point channel. Sessions only
//! need to send messages and observe four kinds of event: the connection
//! opened, a message arrived, the connection closed, or it failed.

use crate::protocol::Message;

/// Something that happened on a peer connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Open,
    Data(Message),
    Close,
    Error(String),
}

#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;

    /// Next connection event, `None` once the connection has been fully
    /// torn down and no more events will arrive. Cancel safe.
    async fn next_event(&mut self) -> Option<TransportEvent>;

    /// Close the connection. The peer observes [`TransportEvent::Close`].
    async fn close(&mut self);
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        (**self).send(msg).await
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        (**self).next_event().await
    }

    async fn close(&mut self) {
        (**self).close().await
    }
}

pub mod in_memory;
pub mod tcp;
