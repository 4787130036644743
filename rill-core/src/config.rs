// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Channel capacity configuration.
//!
//! Every channel in a stream graph is created through [`StreamConfig::channel`].
//! A source picks its configuration at construction time and every stream derived
//! from it inherits the configuration of its first parent.

use async_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Capacity of the channels backing a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    /// Sends never suspend.
    #[default]
    Unbounded,
    /// Sends suspend while the channel holds this many undelivered messages.
    Bounded(NonZeroUsize),
}

/// Configuration shared by a source and all streams derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub capacity: Capacity,
}

impl StreamConfig {
    /// Unbounded channels everywhere.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            capacity: Capacity::Unbounded,
        }
    }

    /// Bounded channels holding at most `capacity` messages.
    #[must_use]
    pub const fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Capacity::Bounded(capacity),
        }
    }

    /// Allocate a fresh channel with this configuration's capacity.
    #[must_use]
    pub fn channel<T>(&self) -> (Sender<T>, Receiver<T>) {
        match self.capacity {
            Capacity::Unbounded => async_channel::unbounded(),
            Capacity::Bounded(n) => async_channel::bounded(n.get()),
        }
    }
}
