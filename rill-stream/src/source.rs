// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Externally pushable streams.
//!
//! A [`Source`] is the entry point of a stream graph: producers push messages into
//! its channel and its distribution task forwards each one to every live
//! subscriber, in push order.
//!
//! ## Example
//!
//! ```
//! use rill_stream::Source;
//!
//! # #[tokio::main]
//! # async fn main() -> rill_core::Result<()> {
//! let clicks = Source::with_initial(0);
//! let doubled = clicks.map(|n| n * 2)?;
//! let mut observer = doubled.listen()?;
//!
//! assert_eq!(doubled.read(), Some(0));
//!
//! clicks.push(21)?;
//! assert_eq!(observer.recv().await, Some(42));
//! assert_eq!(doubled.read(), Some(42));
//! # Ok(())
//! # }
//! ```

use crate::stream::{Inner, Owned, Stream};
use async_channel::Sender;
use rill_core::{Head, Message, Result, StreamConfig, StreamError};
use std::ops::Deref;
use std::sync::{Arc, Weak};

/// A stream fed by external pushes.
///
/// Dereferences to [`Stream`], so every read, subscription and combinator is
/// available on a source directly. Dropping the last handle (including handles
/// held by derived streams) closes the source's channel.
pub struct Source<T: Message> {
    stream: Stream<T>,
    sender: Sender<T>,
}

impl<T: Message> Source<T> {
    /// A source with no value yet.
    #[must_use]
    pub fn new() -> Self {
        Self::build(StreamConfig::default(), Head::new(None))
    }

    /// A source whose head starts at `initial`.
    #[must_use]
    pub fn with_initial(initial: T) -> Self {
        Self::build(StreamConfig::default(), Head::new(Some(initial)))
    }

    /// A source whose initial head is computed by `init`.
    ///
    /// `init` runs at most once, on the first read that happens before any message
    /// has been accepted, and its result is cached.
    pub fn with_lazy<F>(init: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::build(StreamConfig::default(), Head::deferred(move || Some(init())))
    }

    /// A source with no value yet and explicit channel configuration.
    #[must_use]
    pub fn with_config(config: StreamConfig) -> Self {
        Self::build(config, Head::new(None))
    }

    /// A source with both an initial value and explicit channel configuration.
    #[must_use]
    pub fn with_initial_and_config(initial: T, config: StreamConfig) -> Self {
        Self::build(config, Head::new(Some(initial)))
    }

    fn build(config: StreamConfig, head: Head<T>) -> Self {
        let (sender, receiver) = config.channel();
        let owned = Owned::Source {
            sender: sender.clone(),
        };
        let stream = Stream::spawn("source", config, head, receiver, owned);
        Self { stream, sender }
    }

    /// Push `message` into the source and return it.
    ///
    /// This is a blocking send: with bounded channels it parks the calling thread
    /// while the channel is full. Callers running inside an async task with bounded
    /// channels should use [`send`](Self::send) instead.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] if the source's channel has been closed.
    pub fn push(&self, message: T) -> Result<T> {
        self.sender
            .send_blocking(message.clone())
            .map_err(|_| StreamError::Closed)?;
        Ok(message)
    }

    /// Push every message of `messages` in order, returning the last one pushed.
    ///
    /// Not atomic: a concurrent reader may observe any prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] at the first push that fails; earlier
    /// messages stay pushed.
    pub fn push_all<I>(&self, messages: I) -> Result<Option<T>>
    where
        I: IntoIterator<Item = T>,
    {
        messages
            .into_iter()
            .try_fold(None, |_, message| self.push(message).map(Some))
    }

    /// Asynchronous push: suspends the calling task while a bounded channel is full.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] if the source's channel has been closed.
    pub async fn send(&self, message: T) -> Result<T> {
        self.sender
            .send(message.clone())
            .await
            .map_err(|_| StreamError::Closed)?;
        Ok(message)
    }

    /// Stop accepting pushes.
    ///
    /// Messages already pushed are still delivered; the source then terminates, and
    /// so does everything derived from it. Returns `false` if the source was
    /// already closed.
    pub fn close(&self) -> bool {
        debug!("source: closed by caller");
        self.sender.close()
    }

    /// A plain [`Stream`] handle sharing this source.
    #[must_use]
    pub fn as_stream(&self) -> &Stream<T> {
        &self.stream
    }

    /// A handle that can push into this source without keeping it alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakSource<T> {
        WeakSource {
            inner: Arc::downgrade(&self.stream.inner),
            sender: self.sender.clone(),
        }
    }
}

/// Non-owning handle to a [`Source`], obtained with [`Source::downgrade`].
///
/// Producers that outlive the graph (forwarding tasks, for instance) hold one of
/// these so the source still closes once nobody else references it.
pub struct WeakSource<T: Message> {
    inner: Weak<Inner<T>>,
    sender: Sender<T>,
}

impl<T: Message> WeakSource<T> {
    /// The source, if any strong handle to it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Source<T>> {
        self.inner.upgrade().map(|inner| Source {
            stream: Stream { inner },
            sender: self.sender.clone(),
        })
    }
}

impl<T: Message> Clone for WeakSource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
            sender: self.sender.clone(),
        }
    }
}

impl<T: Message> Default for Source<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<T: Message> Deref for Source<T> {
    type Target = Stream<T>;

    fn deref(&self) -> &Stream<T> {
        &self.stream
    }
}

impl<T: Message> From<Source<T>> for Stream<T> {
    fn from(source: Source<T>) -> Self {
        source.stream
    }
}

/// Create a source stream, optionally seeded with an initial value.
#[must_use]
pub fn event_stream<T: Message>(initial: Option<T>) -> Source<T> {
    Source::build(StreamConfig::default(), Head::new(initial))
}
