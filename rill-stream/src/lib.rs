// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-based event streams with a current value.
//!
//! A [`Stream`] is a time-varying value: it has a *head* (its latest value, read
//! with [`Stream::read`]) and it forwards every new message to its subscribers.
//! Streams are either [`Source`]s, fed by external pushes, or *derived* from one or
//! more parent streams through a handler.
//!
//! # Architecture
//!
//! - **Sources**: [`Source::push`] sends into the source's own channel.
//! - **Fan-out**: every stream runs one distribution task that updates the head and
//!   forwards each message, in order, to every live subscriber.
//! - **Derivation**: [`derive`] allocates one input channel per parent, hands them
//!   to a handler and publishes the handler's output channel as a new stream.
//! - **Combinators**: [`map`](Stream::map), [`filter`](Stream::filter),
//!   [`reduce`](Stream::reduce), [`merge`], [`zip`] and the rest are handlers
//!   plugged into [`derive`].
//!
//! # Lifecycle
//!
//! Children keep their parents alive; parents hold their children only weakly.
//! Dropping the last handle to a stream closes its channels, its tasks drain and
//! exit, and termination cascades to everything derived from it. Observe it with
//! [`Stream::termination`].
//!
//! # Faults
//!
//! A panic (or an `Err` from [`try_map`](Stream::try_map)) inside a combinator's
//! function stops only that combinator: the fault is logged, its output closes and
//! its subscribers see the stream terminate. The rest of the graph keeps running.
//!
//! # Example
//!
//! ```
//! use rill_stream::Source;
//!
//! # #[tokio::main]
//! # async fn main() -> rill_core::Result<()> {
//! let clicks = Source::new();
//! let clicked = clicks.count()?;
//! let even = clicked.filter(|n| n % 2 == 0)?;
//! let mut observer = even.listen()?;
//!
//! clicks.push_all(["a", "b", "c", "d"])?;
//!
//! assert_eq!(observer.recv().await, Some(2));
//! assert_eq!(observer.recv().await, Some(4));
//! assert_eq!(clicked.read(), Some(4));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
extern crate rill_core;

pub mod derive;
mod handler;
pub mod operators;
pub mod source;
pub mod stream;
pub mod subscription;

pub use derive::{derive, derive2, initial};
pub use operators::{map2, map_all, mapcat_all, merge, zip, zip2, Merge, Transform};
pub use source::{event_stream, Source, WeakSource};
pub use stream::Stream;
pub use subscription::Subscription;

pub use rill_core::{Capacity, Result, ResultExt, StreamConfig, StreamError, Termination};
