// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use rill_core::Termination;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Default wait used by tests that expect something to happen "soon".
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;

/// Next element of `stream`, failing the test if none arrives within `timeout_ms`
/// or if the stream ends.
pub async fn next_within<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Stream ended, expected another element."),
        Err(_) => panic!("No element emitted within {timeout_ms}ms."),
    }
}

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!(
                "Unexpected element emitted, expected no output."
            );
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Assert that `stream` ends (yields `None`) within `timeout_ms`, skipping any
/// elements still queued.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    let drained = timeout(Duration::from_millis(timeout_ms), async {
        while stream.next().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok(), "Stream still open after {timeout_ms}ms.");
}

/// Wait for a stream's termination probe, failing the test after `timeout_ms`.
pub async fn wait_terminated(termination: &Termination, timeout_ms: u64) {
    let terminated = timeout(Duration::from_millis(timeout_ms), termination.terminated()).await;
    assert!(
        terminated.is_ok(),
        "Stream did not terminate within {timeout_ms}ms."
    );
}

/// The next `n` elements of `stream`, each awaited with [`DEFAULT_TIMEOUT_MS`].
pub async fn collect_n<S, T>(stream: &mut S, n: usize) -> Vec<T>
where
    S: Stream<Item = T> + Unpin,
{
    let mut items = Vec::with_capacity(n);
    for _ in 0..n {
        items.push(next_within(stream, DEFAULT_TIMEOUT_MS).await);
    }
    items
}
