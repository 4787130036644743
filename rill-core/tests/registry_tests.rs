// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{OnExhaustion, StreamError, Subscribers};
use std::sync::Arc;

#[test]
fn registered_senders_are_live() {
    // Arrange
    let subscribers = Subscribers::<i32>::new();
    let (tx, _rx) = async_channel::unbounded();
    let tx = Arc::new(tx);

    // Act
    subscribers.register(&tx, OnExhaustion::Detach).unwrap();

    // Assert
    assert_eq!(subscribers.len(), 1);
    let live = subscribers.live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].on_exhaustion, OnExhaustion::Detach);
}

#[test]
fn dropped_sender_is_pruned() {
    // Arrange
    let subscribers = Subscribers::<i32>::new();
    let (tx, _rx) = async_channel::unbounded();
    let tx = Arc::new(tx);
    subscribers.register(&tx, OnExhaustion::Close).unwrap();

    // Act
    drop(tx);

    // Assert
    assert!(subscribers.live().is_empty());
    assert!(subscribers.is_empty());
}

#[test]
fn closed_sender_is_pruned() {
    let subscribers = Subscribers::<i32>::new();
    let (tx, _rx) = async_channel::unbounded();
    let tx = Arc::new(tx);
    subscribers.register(&tx, OnExhaustion::Detach).unwrap();

    tx.close();

    assert_eq!(subscribers.len(), 0);
}

#[test]
fn registry_does_not_own_senders() {
    let subscribers = Subscribers::<i32>::new();
    let (tx, _rx) = async_channel::unbounded();
    let tx = Arc::new(tx);

    subscribers.register(&tx, OnExhaustion::Detach).unwrap();

    assert_eq!(Arc::strong_count(&tx), 1);
}

#[test]
fn close_returns_live_and_refuses_new_registrations() {
    // Arrange
    let subscribers = Subscribers::<i32>::new();
    let (kept, _rx1) = async_channel::unbounded();
    let (dropped, _rx2) = async_channel::unbounded();
    let kept = Arc::new(kept);
    let dropped = Arc::new(dropped);
    subscribers.register(&kept, OnExhaustion::Close).unwrap();
    subscribers.register(&dropped, OnExhaustion::Detach).unwrap();
    drop(dropped);

    // Act
    let remaining = subscribers.close();

    // Assert
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].on_exhaustion, OnExhaustion::Close);
    assert!(subscribers.is_closed());
    assert!(subscribers.close().is_empty());

    let (late, _rx3) = async_channel::unbounded();
    let result = subscribers.register(&Arc::new(late), OnExhaustion::Detach);
    assert_eq!(result, Err(StreamError::Closed));
}

#[test]
fn registering_twice_keeps_a_single_subscription() {
    // Arrange
    let subscribers = Subscribers::<i32>::new();
    let (tx, _rx) = async_channel::unbounded();
    let tx = Arc::new(tx);

    // Act
    subscribers.register(&tx, OnExhaustion::Detach).unwrap();
    subscribers.register(&tx, OnExhaustion::Detach).unwrap();

    // Assert
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers.live().len(), 1);
}

#[test]
fn registering_twice_upgrades_to_close_on_exhaustion() {
    // Arrange
    let subscribers = Subscribers::<i32>::new();
    let (tx, _rx) = async_channel::unbounded();
    let tx = Arc::new(tx);

    // Act
    subscribers.register(&tx, OnExhaustion::Close).unwrap();
    subscribers.register(&tx, OnExhaustion::Detach).unwrap();

    // Assert
    let live = subscribers.live();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].on_exhaustion, OnExhaustion::Close);
}
