use seabattle::{InMemoryTransport, Message, Transport, TransportEvent};

#[tokio::test]
async fn test_pair_delivers_open_then_messages() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();
    assert_eq!(a.next_event().await, Some(TransportEvent::Open));
    assert_eq!(b.next_event().await, Some(TransportEvent::Open));

    a.send(Message::Hello).await?;
    a.send(Message::Shot { x: 1, y: 2 }).await?;
    assert_eq!(b.next_event().await, Some(TransportEvent::Data(Message::Hello)));
    assert_eq!(
        b.next_event().await,
        Some(TransportEvent::Data(Message::Shot { x: 1, y: 2 }))
    );

    b.send(Message::Ready).await?;
    assert_eq!(a.next_event().await, Some(TransportEvent::Data(Message::Ready)));
    Ok(())
}

#[tokio::test]
async fn test_close_is_seen_once_by_peer() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send(Message::Ready).await?;
    a.close().await;
    assert!(a.send(Message::Hello).await.is_err());

    assert_eq!(b.next_event().await, Some(TransportEvent::Open));
    assert_eq!(b.next_event().await, Some(TransportEvent::Data(Message::Ready)));
    assert_eq!(b.next_event().await, Some(TransportEvent::Close));
    assert_eq!(b.next_event().await, None);
    Ok(())
}

#[tokio::test]
async fn test_dropped_end_reads_as_close() {
    let (a, mut b) = InMemoryTransport::pair();
    drop(a);
    assert_eq!(b.next_event().await, Some(TransportEvent::Open));
    assert_eq!(b.next_event().await, Some(TransportEvent::Close));
    assert!(b.send(Message::Hello).await.is_err());
}

#[tokio::test]
async fn test_boxed_transport_forwards() -> anyhow::Result<()> {
    let (a, b) = InMemoryTransport::pair();
    let mut a: Box<dyn Transport> = Box::new(a);
    let mut b: Box<dyn Transport> = Box::new(b);
    assert_eq!(a.next_event().await, Some(TransportEvent::Open));
    a.send(Message::PlayAgain).await?;
    a.close().await;
    assert_eq!(b.next_event().await, Some(TransportEvent::Open));
    assert_eq!(b.next_event().await, Some(TransportEvent::Data(Message::PlayAgain)));
    assert_eq!(b.next_event().await, Some(TransportEvent::Close));
    Ok(())
}
