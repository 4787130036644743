// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::Termination;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn starts_not_terminated() {
    let termination = Termination::new();

    assert!(!termination.is_terminated());
    assert!(timeout(Duration::from_millis(20), termination.terminated())
        .await
        .is_err());
}

#[tokio::test]
async fn resolves_immediately_when_already_terminated() {
    let termination = Termination::default();

    termination.terminate();

    termination.terminated().await;
    assert!(termination.is_terminated());
}

#[tokio::test]
async fn wakes_all_waiters() -> anyhow::Result<()> {
    // Arrange
    let termination = Termination::new();
    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let probe = termination.clone();
            tokio::spawn(async move { probe.terminated().await })
        })
        .collect();

    // Act
    tokio::task::yield_now().await;
    termination.terminate();

    // Assert
    for waiter in waiters {
        timeout(Duration::from_secs(1), waiter).await??;
    }
    Ok(())
}

#[tokio::test]
async fn terminate_is_idempotent() {
    let termination = Termination::new();

    termination.terminate();
    termination.terminate();

    assert!(termination.is_terminated());
}
