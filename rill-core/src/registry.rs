// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Weakly-held subscriber set of a distribution fan-out.
//!
//! The registry never owns a subscriber channel. Whoever registered the channel keeps
//! the only strong `Arc` to its sender; once that `Arc` is dropped the entry is dead
//! and is pruned the next time the registry is walked.

use crate::{Result, StreamError};
use async_channel::Sender;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// What the fan-out does with a subscriber channel when its own input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnExhaustion {
    /// Leave the channel open; it belongs to the subscriber.
    Detach,
    /// Close the channel so the subscriber observes the end of the stream.
    Close,
}

struct Entry<T> {
    sender: Weak<Sender<T>>,
    on_exhaustion: OnExhaustion,
}

impl<T> Entry<T> {
    fn upgrade(&self) -> Option<Arc<Sender<T>>> {
        self.sender.upgrade().filter(|tx| !tx.is_closed())
    }
}

/// A live subscriber, upgraded for the duration of one delivery.
pub struct LiveSubscriber<T> {
    pub sender: Arc<Sender<T>>,
    pub on_exhaustion: OnExhaustion,
}

struct State<T> {
    closed: bool,
    entries: Vec<Entry<T>>,
}

/// Concurrently mutable set of weak subscriber channels.
///
/// Registration may race with distribution: [`live`](Subscribers::live) takes a
/// snapshot under the lock and releases it before any send, so a subscriber added
/// mid-delivery starts receiving from the next message onward.
pub struct Subscribers<T> {
    state: Mutex<State<T>>,
}

impl<T> Subscribers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                closed: false,
                entries: Vec::new(),
            }),
        }
    }

    /// Register `sender` without taking ownership of it.
    ///
    /// Registering a sender that is already present does not add a second entry, so
    /// it still receives each message once. Its exhaustion policy is upgraded to
    /// [`OnExhaustion::Close`] if either registration asked for it. Dead entries are
    /// pruned on every registration.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`] once the owning fan-out has terminated.
    pub fn register(&self, sender: &Arc<Sender<T>>, on_exhaustion: OnExhaustion) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(StreamError::Closed);
        }

        state.entries.retain(|entry| entry.upgrade().is_some());

        let weak = Arc::downgrade(sender);
        match state
            .entries
            .iter_mut()
            .find(|entry| Weak::ptr_eq(&entry.sender, &weak))
        {
            Some(existing) => {
                if on_exhaustion == OnExhaustion::Close {
                    existing.on_exhaustion = OnExhaustion::Close;
                }
            }
            None => state.entries.push(Entry {
                sender: weak,
                on_exhaustion,
            }),
        }
        Ok(())
    }

    /// Snapshot of the subscribers still alive, pruning the dead ones.
    pub fn live(&self) -> Vec<LiveSubscriber<T>> {
        let mut state = self.state.lock();
        let mut live = Vec::with_capacity(state.entries.len());

        state.entries.retain(|entry| match entry.upgrade() {
            Some(sender) => {
                live.push(LiveSubscriber {
                    sender,
                    on_exhaustion: entry.on_exhaustion,
                });
                true
            }
            None => false,
        });

        live
    }

    /// Number of subscribers still alive.
    ///
    /// Dead entries are pruned as a side effect, so the count is exact at call time.
    pub fn len(&self) -> usize {
        let mut state = self.state.lock();
        state.entries.retain(|entry| entry.upgrade().is_some());
        state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refuse further registrations and remove every entry, returning the ones still alive.
    ///
    /// Idempotent: a second call returns an empty list.
    pub fn close(&self) -> Vec<LiveSubscriber<T>> {
        let entries = {
            let mut state = self.state.lock();
            state.closed = true;
            std::mem::take(&mut state.entries)
        };

        entries
            .into_iter()
            .filter_map(|entry| {
                entry.upgrade().map(|sender| LiveSubscriber {
                    sender,
                    on_exhaustion: entry.on_exhaustion,
                })
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(subscribers: &Subscribers<i32>) -> usize {
        subscribers.state.lock().entries.len()
    }

    #[test]
    fn register_prunes_dropped_senders_without_distribution() {
        let subscribers = Subscribers::<i32>::new();

        for _ in 0..100 {
            let (tx, _rx) = async_channel::unbounded();
            let tx = Arc::new(tx);
            subscribers.register(&tx, OnExhaustion::Close).unwrap();
        }

        assert!(stored(&subscribers) <= 1);
    }

    #[test]
    fn repeated_registration_keeps_one_entry() {
        let subscribers = Subscribers::<i32>::new();
        let (tx, _rx) = async_channel::unbounded();
        let tx = Arc::new(tx);

        subscribers.register(&tx, OnExhaustion::Detach).unwrap();
        subscribers.register(&tx, OnExhaustion::Detach).unwrap();

        assert_eq!(stored(&subscribers), 1);
    }
}
