// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{FanOut, Head, OnExhaustion};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn forwards_in_order_to_every_subscriber() -> anyhow::Result<()> {
    // Arrange
    let (input_tx, input_rx) = async_channel::unbounded();
    let fan_out = FanOut::new(Head::new(None));
    let (a_tx, a_rx) = async_channel::unbounded();
    let (b_tx, b_rx) = async_channel::unbounded();
    let a_tx = Arc::new(a_tx);
    let b_tx = Arc::new(b_tx);
    fan_out.subscribers.register(&a_tx, OnExhaustion::Close)?;
    fan_out.subscribers.register(&b_tx, OnExhaustion::Close)?;
    fan_out.spawn("test", input_rx);

    // Act
    for n in 1..=3 {
        input_tx.send(n).await?;
    }

    // Assert
    for n in 1..=3 {
        assert_eq!(a_rx.recv().await?, n);
        assert_eq!(b_rx.recv().await?, n);
    }
    assert_eq!(fan_out.head.read(), Some(3));
    Ok(())
}

#[tokio::test]
async fn head_is_updated_before_delivery() -> anyhow::Result<()> {
    let (input_tx, input_rx) = async_channel::unbounded();
    let fan_out = FanOut::new(Head::new(Some(0)));
    let (tx, rx) = async_channel::unbounded();
    let tx = Arc::new(tx);
    fan_out.subscribers.register(&tx, OnExhaustion::Detach)?;
    fan_out.spawn("test", input_rx);

    input_tx.send(7).await?;
    let received = rx.recv().await?;

    assert_eq!(received, 7);
    assert_eq!(fan_out.head.read(), Some(7));
    Ok(())
}

#[tokio::test]
async fn exhaustion_closes_only_linked_subscribers() -> anyhow::Result<()> {
    // Arrange
    let (input_tx, input_rx) = async_channel::unbounded::<i32>();
    let fan_out = FanOut::new(Head::new(None));
    let (linked_tx, linked_rx) = async_channel::unbounded();
    let (detached_tx, _detached_rx) = async_channel::unbounded();
    let linked_tx = Arc::new(linked_tx);
    let detached_tx = Arc::new(detached_tx);
    fan_out.subscribers.register(&linked_tx, OnExhaustion::Close)?;
    fan_out.subscribers.register(&detached_tx, OnExhaustion::Detach)?;
    fan_out.spawn("test", input_rx);

    // Act
    input_tx.close();
    timeout(Duration::from_secs(1), fan_out.termination.terminated()).await?;

    // Assert
    assert!(linked_rx.recv().await.is_err());
    assert!(!detached_tx.is_closed());
    assert!(fan_out.subscribers.is_closed());
    Ok(())
}

#[tokio::test]
async fn queued_messages_drain_before_termination() -> anyhow::Result<()> {
    let (input_tx, input_rx) = async_channel::unbounded();
    let fan_out = FanOut::new(Head::new(None));
    let (tx, rx) = async_channel::unbounded();
    let tx = Arc::new(tx);
    fan_out.subscribers.register(&tx, OnExhaustion::Close)?;

    input_tx.send(1).await?;
    input_tx.send(2).await?;
    input_tx.close();
    fan_out.spawn("test", input_rx);
    timeout(Duration::from_secs(1), fan_out.termination.terminated()).await?;

    assert_eq!(rx.recv().await?, 1);
    assert_eq!(rx.recv().await?, 2);
    assert!(rx.recv().await.is_err());
    assert_eq!(fan_out.head.read(), Some(2));
    Ok(())
}

#[tokio::test]
async fn dropped_subscriber_does_not_stall_delivery() -> anyhow::Result<()> {
    let (input_tx, input_rx) = async_channel::unbounded();
    let fan_out = FanOut::new(Head::new(None));
    let (gone_tx, gone_rx) = async_channel::unbounded::<i32>();
    let (kept_tx, kept_rx) = async_channel::unbounded();
    let gone_tx = Arc::new(gone_tx);
    let kept_tx = Arc::new(kept_tx);
    fan_out.subscribers.register(&gone_tx, OnExhaustion::Close)?;
    fan_out.subscribers.register(&kept_tx, OnExhaustion::Close)?;
    fan_out.spawn("test", input_rx);

    drop(gone_rx);
    drop(gone_tx);
    input_tx.send(1).await?;

    assert_eq!(kept_rx.recv().await?, 1);
    assert_eq!(fan_out.subscribers.len(), 1);
    Ok(())
}
