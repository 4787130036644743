// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The derivation protocol.
//!
//! A derived stream is built from a *handler*: a function that receives one fresh
//! input channel per parent and returns a single output channel. The handler spawns
//! whatever loop it needs to turn inputs into outputs; the engine takes care of the
//! rest:
//!
//! 1. one fresh channel is allocated per parent,
//! 2. the handler is called with the receiving ends,
//! 3. each sending end is registered weakly on its parent's fan-out,
//! 4. the handler's output channel becomes the input of the new stream's own
//!    fan-out, which updates the head cell on every message,
//! 5. the new stream owns the input channels, the output channel and strong handles
//!    to its parents, and closes the channels when its last handle is dropped.
//!
//! Every combinator in this crate is a handler plugged into this protocol.
//!
//! ## Example
//!
//! ```
//! use rill_stream::{derive, Source};
//!
//! # #[tokio::main]
//! # async fn main() -> rill_core::Result<()> {
//! let source = Source::new();
//!
//! // A hand-written handler: add one to each message.
//! let plus_one = derive(
//!     |mut inputs| {
//!         let input = inputs.remove(0);
//!         let (tx, rx) = async_channel::unbounded();
//!         tokio::spawn(async move {
//!             while let Ok(n) = input.recv().await {
//!                 if tx.send(n + 1).await.is_err() {
//!                     break;
//!                 }
//!             }
//!         });
//!         rx
//!     },
//!     None,
//!     &[&source],
//! )?;
//!
//! let mut observer = plus_one.listen()?;
//! source.push(41)?;
//! assert_eq!(observer.recv().await, Some(42));
//! # Ok(())
//! # }
//! ```
//!
//! ## Acyclicity
//!
//! Parents must exist before their child and are fixed at construction, so the
//! typed API cannot build a cycle. Raw [`subscribe`](Stream::subscribe) calls that
//! feed a stream's output back into one of its ancestors are the caller's
//! responsibility.

use crate::stream::{KeepAlive, Owned, Stream};
use async_channel::Receiver;
use rill_core::{Closeable, Head, Message, Result, StreamConfig, StreamError};
use std::sync::Arc;

type PendingSubscription = Box<dyn FnOnce() -> Result<()> + Send>;

/// Step-by-step builder behind [`derive`] and [`derive2`].
///
/// Parents may carry different message types; each [`input`](Derivation::input)
/// call yields a receiver typed after its parent.
pub(crate) struct Derivation {
    config: Option<StreamConfig>,
    inputs: Vec<Box<dyn Closeable>>,
    parents: Vec<KeepAlive>,
    pending: Vec<PendingSubscription>,
}

impl Derivation {
    pub(crate) fn new() -> Self {
        Self {
            config: None,
            inputs: Vec::new(),
            parents: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Allocate a fresh input channel fed by `parent`.
    ///
    /// The subscription itself is deferred to [`finish`](Self::finish), after the
    /// handler has been given the receiver.
    pub(crate) fn input<T: Message>(&mut self, parent: &Stream<T>) -> Result<Receiver<T>> {
        if parent.is_closed() {
            return Err(StreamError::Closed);
        }

        let config = *self.config.get_or_insert_with(|| parent.config());
        let (sender, receiver) = config.channel();
        let sender = Arc::new(sender);

        let target = Arc::clone(&sender);
        let parent_handle = parent.clone();
        self.pending
            .push(Box::new(move || parent_handle.subscribe_linked(&target)));

        self.inputs.push(Box::new(sender));
        self.parents.push(parent.keep_alive());
        Ok(receiver)
    }

    /// Configuration inherited from the first parent.
    pub(crate) fn config(&self) -> StreamConfig {
        self.config.unwrap_or_default()
    }

    /// Wire the inputs to their parents and publish `output` as a new stream.
    pub(crate) fn finish<U: Message>(
        self,
        label: &'static str,
        output: Receiver<U>,
        initial: Option<U>,
    ) -> Result<Stream<U>> {
        let Self {
            config,
            inputs,
            parents,
            pending,
        } = self;

        if inputs.is_empty() {
            output.close();
            return Err(StreamError::NoParents);
        }

        for subscribe in pending {
            if let Err(err) = subscribe() {
                debug!("{label}: parent closed while deriving");
                for input in &inputs {
                    input.close();
                }
                output.close();
                return Err(err);
            }
        }

        let owned = Owned::Derived {
            output: output.clone(),
            inputs,
            _parents: parents,
        };
        Ok(Stream::spawn(
            label,
            config.unwrap_or_default(),
            Head::new(initial),
            output,
            owned,
        ))
    }
}

/// Derive a new stream from one or more parents of the same message type.
///
/// `handler` receives one fresh input channel per parent, in `parents` order, and
/// must return the channel the new stream publishes from. The new stream's head
/// starts at `initial`.
///
/// # Errors
///
/// - [`StreamError::NoParents`] if `parents` is empty.
/// - [`StreamError::Closed`] if any parent has already terminated.
pub fn derive<T, U, H>(handler: H, initial: Option<U>, parents: &[&Stream<T>]) -> Result<Stream<U>>
where
    T: Message,
    U: Message,
    H: FnOnce(Vec<Receiver<T>>) -> Receiver<U>,
{
    derive_labeled("derive", |inputs, _| handler(inputs), initial, parents)
}

/// Derive a new stream from two parents of different message types.
///
/// # Errors
///
/// Returns [`StreamError::Closed`] if either parent has already terminated.
pub fn derive2<A, B, U, H>(
    handler: H,
    initial: Option<U>,
    first: &Stream<A>,
    second: &Stream<B>,
) -> Result<Stream<U>>
where
    A: Message,
    B: Message,
    U: Message,
    H: FnOnce(Receiver<A>, Receiver<B>) -> Receiver<U>,
{
    derive2_labeled("derive2", |a, b, _| handler(a, b), initial, first, second)
}

/// A stream identical to `stream` except for its starting head, which is `value`.
///
/// # Errors
///
/// Returns [`StreamError::Closed`] if `stream` has already terminated.
pub fn initial<T: Message>(value: T, stream: &Stream<T>) -> Result<Stream<T>> {
    derive1_labeled("initial", |input, _| input, Some(value), stream)
}

impl<T: Message> Stream<T> {
    /// Method form of [`initial`].
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] if this stream has already terminated.
    pub fn initial(&self, value: T) -> Result<Stream<T>> {
        initial(value, self)
    }
}

pub(crate) fn derive1_labeled<T, U, H>(
    label: &'static str,
    handler: H,
    initial: Option<U>,
    parent: &Stream<T>,
) -> Result<Stream<U>>
where
    T: Message,
    U: Message,
    H: FnOnce(Receiver<T>, StreamConfig) -> Receiver<U>,
{
    let mut derivation = Derivation::new();
    let input = derivation.input(parent)?;

    let output = handler(input, derivation.config());
    derivation.finish(label, output, initial)
}

pub(crate) fn derive_labeled<T, U, H>(
    label: &'static str,
    handler: H,
    initial: Option<U>,
    parents: &[&Stream<T>],
) -> Result<Stream<U>>
where
    T: Message,
    U: Message,
    H: FnOnce(Vec<Receiver<T>>, StreamConfig) -> Receiver<U>,
{
    if parents.is_empty() {
        return Err(StreamError::NoParents);
    }

    let mut derivation = Derivation::new();
    let inputs = parents
        .iter()
        .map(|parent| derivation.input(parent))
        .collect::<Result<Vec<_>>>()?;

    let output = handler(inputs, derivation.config());
    derivation.finish(label, output, initial)
}

pub(crate) fn derive2_labeled<A, B, U, H>(
    label: &'static str,
    handler: H,
    initial: Option<U>,
    first: &Stream<A>,
    second: &Stream<B>,
) -> Result<Stream<U>>
where
    A: Message,
    B: Message,
    U: Message,
    H: FnOnce(Receiver<A>, Receiver<B>, StreamConfig) -> Receiver<U>,
{
    let mut derivation = Derivation::new();
    let a = derivation.input(first)?;
    let b = derivation.input(second)?;

    let output = handler(a, b, derivation.config());
    derivation.finish(label, output, initial)
}
