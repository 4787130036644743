// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Distribution fan-out: one input channel copied to every live subscriber.
//!
//! ## Characteristics
//!
//! - **Hot**: a subscriber receives only messages forwarded after it registered.
//! - **Ordered**: one task forwards messages strictly in arrival order; each message is
//!   offered to every live subscriber before the next one is received.
//! - **Weak**: subscribers are held through [`Subscribers`], never owned.
//! - **Backpressure**: a send to a full bounded subscriber suspends the task; a send to
//!   a closed subscriber is skipped.
//!
//! The head cell is updated before the message is offered to subscribers, so anyone
//! who has observed a message reads a head at least that recent.

use crate::{
    registry::{OnExhaustion, Subscribers},
    task, Head, Message, Termination,
};
use async_channel::Receiver;
use std::sync::Arc;

/// The shared state a distribution task publishes into.
pub struct FanOut<T> {
    pub head: Arc<Head<T>>,
    pub subscribers: Arc<Subscribers<T>>,
    pub termination: Termination,
}

impl<T> Clone for FanOut<T> {
    fn clone(&self) -> Self {
        Self {
            head: Arc::clone(&self.head),
            subscribers: Arc::clone(&self.subscribers),
            termination: self.termination.clone(),
        }
    }
}

impl<T: Message> FanOut<T> {
    #[must_use]
    pub fn new(head: Head<T>) -> Self {
        Self {
            head: Arc::new(head),
            subscribers: Arc::new(Subscribers::new()),
            termination: Termination::new(),
        }
    }

    /// Spawn the distribution task draining `input` into this fan-out.
    ///
    /// `label` identifies the owning stream in log output.
    pub fn spawn(&self, label: &'static str, input: Receiver<T>) {
        let fan_out = self.clone();
        task::spawn(async move { fan_out.distribute(label, input).await });
    }

    async fn distribute(self, label: &'static str, input: Receiver<T>) {
        trace!("{label}: distribution started");

        while let Ok(message) = input.recv().await {
            self.head.store(message.clone());

            for subscriber in self.subscribers.live() {
                if subscriber.sender.send(message.clone()).await.is_err() {
                    trace!("{label}: subscriber closed during delivery");
                }
            }
        }

        // Subscribers that asked to observe the end are closed; detached ones stay open.
        let remaining = self.subscribers.close();
        for subscriber in remaining {
            if subscriber.on_exhaustion == OnExhaustion::Close {
                subscriber.sender.close();
            }
        }

        self.termination.terminate();
        debug!("{label}: input exhausted, distribution terminated");
    }
}
