// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks of the rill dataflow engine.
//!
//! This crate holds everything a stream is made of, independent of how streams are
//! composed: the channel configuration, the head cell holding a stream's current
//! value, the weak subscriber registry, the distribution fan-out task and the
//! termination signal. Stream handles and combinators live in `rill-stream`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
pub mod logging;
pub mod closeable;
pub mod config;
pub mod fan_out;
pub mod head;
pub mod message;
pub mod registry;
pub mod stream_error;
pub mod task;
pub mod termination;

pub use self::closeable::Closeable;
pub use self::config::{Capacity, StreamConfig};
pub use self::fan_out::FanOut;
pub use self::head::Head;
pub use self::message::Message;
pub use self::registry::{LiveSubscriber, OnExhaustion, Subscribers};
pub use self::stream_error::{Result, ResultExt, StreamError};
pub use self::termination::Termination;

pub use async_channel::{Receiver, Sender};
