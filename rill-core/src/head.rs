// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-slot holder of a stream's current value.

use parking_lot::Mutex;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

type Deferred<T> = Box<dyn FnOnce() -> Option<T> + Send>;

enum Slot<T> {
    Deferred(Deferred<T>),
    /// The initializer is running on another thread; readers see "no value yet".
    Initializing,
    Ready(Option<T>),
}

/// The "current value" of a stream.
///
/// A head starts either with a ready value (possibly `None`, meaning "no value yet")
/// or with a deferred initializer. The initializer runs at most once: on the first
/// [`read`](Head::read) if no message has been stored before then, and never if a
/// message arrives first.
///
/// Only the owning stream's distribution task calls [`store`](Head::store), so the
/// lock is never contended by two writers.
pub struct Head<T> {
    slot: Mutex<Slot<T>>,
}

impl<T: Clone> Head<T> {
    #[must_use]
    pub fn new(initial: Option<T>) -> Self {
        Self {
            slot: Mutex::new(Slot::Ready(initial)),
        }
    }

    /// A head whose initial value is computed lazily and cached.
    pub fn deferred<F>(init: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        Self {
            slot: Mutex::new(Slot::Deferred(Box::new(init))),
        }
    }

    /// The most recently stored message, or the initial value if none was stored yet.
    ///
    /// Never blocks on the stream's channels and never fails. The initializer runs
    /// without holding the lock, so a concurrent [`store`](Head::store) is never
    /// stalled by it and wins over its result. A panicking initializer is logged and
    /// leaves the head empty.
    pub fn read(&self) -> Option<T> {
        let init = {
            let mut slot = self.slot.lock();
            match std::mem::replace(&mut *slot, Slot::Initializing) {
                Slot::Deferred(init) => init,
                other => {
                    let value = match &other {
                        Slot::Ready(value) => value.clone(),
                        _ => None,
                    };
                    *slot = other;
                    return value;
                }
            }
        };

        let value = panic::catch_unwind(AssertUnwindSafe(init)).unwrap_or_else(|_| {
            error!("head: lazy initializer panicked; head stays empty");
            None
        });

        let mut slot = self.slot.lock();
        match &*slot {
            Slot::Initializing => {
                *slot = Slot::Ready(value.clone());
                value
            }
            Slot::Ready(stored) => stored.clone(),
            Slot::Deferred(_) => None,
        }
    }

    /// Record a message that was accepted by the stream.
    pub fn store(&self, value: T) {
        *self.slot.lock() = Slot::Ready(Some(value));
    }
}

impl<T: fmt::Debug> fmt::Debug for Head<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.slot.lock() {
            Slot::Deferred(_) => f.write_str("Head(<deferred>)"),
            Slot::Initializing => f.write_str("Head(<initializing>)"),
            Slot::Ready(value) => f.debug_tuple("Head").field(value).finish(),
        }
    }
}
