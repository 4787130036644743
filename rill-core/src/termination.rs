// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic "this stream has stopped" signal.
//!
//! A [`Termination`] is fired by a stream's distribution task when it exits, which
//! only happens after every channel the stream owns has been closed and drained.
//! Clones share state, so a caller can keep a clone as a liveness probe after
//! dropping the stream itself.

use event_listener::{Event, EventListener};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Shared termination flag with async notification.
///
/// # Example
///
/// ```
/// use rill_core::Termination;
///
/// # #[tokio::main]
/// # async fn main() {
/// let termination = Termination::new();
/// let probe = termination.clone();
///
/// tokio::spawn(async move {
///     termination.terminate();
/// });
///
/// probe.terminated().await;
/// assert!(probe.is_terminated());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Termination {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    terminated: AtomicBool,
    event: Event,
}

impl Termination {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                terminated: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Mark the stream as terminated, waking all waiters. Idempotent.
    pub fn terminate(&self) {
        self.inner.terminated.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.load(Ordering::Acquire)
    }

    /// Wait until the stream has terminated; resolves immediately if it already has.
    pub fn terminated(&self) -> Terminated<'_> {
        Terminated {
            termination: self,
            listener: None,
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`Termination::terminated()`].
pub struct Terminated<'a> {
    termination: &'a Termination,
    listener: Option<EventListener>,
}

impl Future for Terminated<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.termination.is_terminated() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                None => {
                    // Re-check after listening: terminate() may have run in between.
                    self.listener = Some(self.termination.inner.event.listen());
                }
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    self.listener = None;
                }
            }
        }
    }
}
