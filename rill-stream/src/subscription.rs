// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A self-owned observer channel attached to a stream.

use async_channel::{Receiver, Sender, TryRecvError};
use futures::Stream as FuturesStream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Receiving end of a channel registered on a stream's fan-out.
///
/// The subscription owns the only strong reference to its sender, so the stream's
/// registry forgets it as soon as the subscription is dropped. The channel is
/// closed by the stream when the stream terminates: [`recv`](Subscription::recv)
/// then drains what is queued and returns `None`.
///
/// `Subscription` also implements [`futures::Stream`].
///
/// # Example
///
/// ```
/// use rill_stream::Source;
///
/// # #[tokio::main]
/// # async fn main() -> rill_core::Result<()> {
/// let source = Source::new();
/// let mut subscription = source.listen()?;
///
/// source.push(1)?;
/// source.push(2)?;
///
/// assert_eq!(subscription.recv().await, Some(1));
/// assert_eq!(subscription.recv().await, Some(2));
/// # Ok(())
/// # }
/// ```
pub struct Subscription<T> {
    sender: Arc<Sender<T>>,
    receiver: Pin<Box<Receiver<T>>>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(sender: Arc<Sender<T>>, receiver: Receiver<T>) -> Self {
        Self {
            sender,
            receiver: Box::pin(receiver),
        }
    }

    /// Wait for the next message; `None` once the stream has terminated and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await.ok()
    }

    /// Take a queued message without waiting.
    ///
    /// Returns `Ok(None)` when nothing is queued yet.
    ///
    /// # Errors
    ///
    /// Returns [`rill_core::StreamError::Closed`] once the stream has terminated and
    /// the queue is drained.
    pub fn try_recv(&mut self) -> rill_core::Result<Option<T>> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(rill_core::StreamError::Closed),
        }
    }

    /// Number of messages delivered but not yet received.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// `true` once the stream closed this subscription (queued messages may remain).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T> FuturesStream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.as_mut().poll_next(cx)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.sender.close();
    }
}
