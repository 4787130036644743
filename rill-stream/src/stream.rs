// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The shared stream handle.
//!
//! A [`Stream`] is a reference-counted handle to a single heap-allocated stream
//! record. The record owns the stream's channels; dropping the last handle closes
//! them, which ends the stream's distribution task and, through channel exhaustion,
//! every handler loop fed by it.
//!
//! ## Ownership
//!
//! - A derived stream holds strong handles to its parents, so observing a leaf keeps
//!   the whole upstream chain alive.
//! - A parent only holds weak references to its children's input channels, so
//!   children are never kept alive by their parents.

use crate::subscription::Subscription;
use async_channel::{Receiver, Sender};
use rill_core::{
    Closeable, FanOut, Head, Message, OnExhaustion, Result, StreamConfig, Termination,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub(crate) type KeepAlive = Arc<dyn Any + Send + Sync>;

pub(crate) enum Owned<T> {
    Source {
        sender: Sender<T>,
    },
    Derived {
        output: Receiver<T>,
        inputs: Vec<Box<dyn Closeable>>,
        _parents: Vec<KeepAlive>,
    },
}

pub(crate) struct Inner<T: Message> {
    label: &'static str,
    config: StreamConfig,
    fan_out: FanOut<T>,
    pub(crate) owned: Owned<T>,
}

impl<T: Message> Drop for Inner<T> {
    fn drop(&mut self) {
        trace!("{}: last handle dropped, closing owned channels", self.label);
        match &self.owned {
            Owned::Source { sender } => {
                sender.close();
            }
            Owned::Derived { output, inputs, .. } => {
                for input in inputs {
                    input.close();
                }
                output.close();
            }
        }
    }
}

/// A push-based, time-varying value.
///
/// Cloning a `Stream` clones the handle, never the stream: all clones share one
/// head, one fan-out and one set of channels.
pub struct Stream<T: Message> {
    pub(crate) inner: Arc<Inner<T>>,
}

impl<T: Message> Stream<T> {
    /// Build a stream whose distribution task drains `drained`.
    ///
    /// For a source `drained` is the receiving end of its own input channel; for a
    /// derived stream it is the handler's output channel.
    pub(crate) fn spawn(
        label: &'static str,
        config: StreamConfig,
        head: Head<T>,
        drained: Receiver<T>,
        owned: Owned<T>,
    ) -> Self {
        let fan_out = FanOut::new(head);
        fan_out.spawn(label, drained);
        trace!("{label}: stream constructed");

        Self {
            inner: Arc::new(Inner {
                label,
                config,
                fan_out,
                owned,
            }),
        }
    }

    /// The current value: the last message that completed propagation into this
    /// stream, or its initial value. `None` means "no value yet".
    ///
    /// Never blocks and never fails, even on a terminated stream.
    pub fn read(&self) -> Option<T> {
        self.inner.fan_out.head.read()
    }

    /// Register `sender` on this stream's fan-out without taking ownership of it.
    ///
    /// The registration lives as long as the caller keeps the `Arc`. The channel is
    /// left open when the stream terminates; use [`subscribe_linked`](Self::subscribe_linked)
    /// to have it closed instead.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if the stream
    /// has terminated.
    pub fn subscribe(&self, sender: &Arc<Sender<T>>) -> Result<()> {
        self.inner
            .fan_out
            .subscribers
            .register(sender, OnExhaustion::Detach)
    }

    /// Like [`subscribe`](Self::subscribe), but the stream closes `sender` when it
    /// terminates so the receiver observes the end.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if the stream
    /// has terminated.
    pub fn subscribe_linked(&self, sender: &Arc<Sender<T>>) -> Result<()> {
        self.inner
            .fan_out
            .subscribers
            .register(sender, OnExhaustion::Close)
    }

    /// Attach a fresh observer channel to this stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if the stream
    /// has terminated.
    pub fn listen(&self) -> Result<Subscription<T>> {
        let (sender, receiver) = self.inner.config.channel();
        let sender = Arc::new(sender);
        self.subscribe_linked(&sender)?;
        Ok(Subscription::new(sender, receiver))
    }

    /// A probe that resolves once this stream's distribution task has exited.
    ///
    /// The probe does not keep the stream alive.
    #[must_use]
    pub fn termination(&self) -> Termination {
        self.inner.fan_out.termination.clone()
    }

    /// `true` once the stream has stopped distributing and refuses new subscribers.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.fan_out.subscribers.is_closed()
    }

    /// Number of live subscribers, dead registrations excluded.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.fan_out.subscribers.len()
    }

    #[must_use]
    pub fn is_source(&self) -> bool {
        matches!(self.inner.owned, Owned::Source { .. })
    }

    /// The channel configuration this stream was built with.
    #[must_use]
    pub fn config(&self) -> StreamConfig {
        self.inner.config
    }

    /// Name of the combinator (or `"source"`) that built this stream.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.inner.label
    }

    /// Strong, type-erased handle used by children to keep this stream alive.
    pub(crate) fn keep_alive(&self) -> KeepAlive {
        self.inner.clone()
    }
}

impl<T: Message> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Message + fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("label", &self.inner.label)
            .field("head", &self.read())
            .field("closed", &self.is_closed())
            .finish()
    }
}
