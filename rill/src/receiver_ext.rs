// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods for `async_channel::Receiver` to create event streams.

use async_channel::Receiver;
use futures::future::{self, Either};
use rill_core::{task, Message};
use rill_stream::{Source, Stream};
use std::pin::pin;

/// Extension trait turning an existing channel into a rill stream.
pub trait ReceiverExt<T: Message> {
    /// Feed every message of this channel into a new source stream.
    ///
    /// A forwarding task pushes every received message into the source without
    /// keeping it alive. Once the channel is closed and drained the stream
    /// terminates; once the stream is dropped the task closes the channel and exits.
    /// The stream uses the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rill::prelude::*;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> rill::Result<()> {
    /// let (tx, rx) = async_channel::unbounded();
    /// let readings = rx.into_event_stream(Some(0));
    /// let mut observer = readings.listen()?;
    ///
    /// tx.send(5).await.unwrap();
    ///
    /// assert_eq!(observer.recv().await, Some(5));
    /// assert_eq!(readings.read(), Some(5));
    /// # Ok(())
    /// # }
    /// ```
    fn into_event_stream(self, initial: Option<T>) -> Stream<T>;
}

impl<T: Message> ReceiverExt<T> for Receiver<T> {
    fn into_event_stream(self, initial: Option<T>) -> Stream<T> {
        let source = match initial {
            Some(value) => Source::with_initial(value),
            None => Source::new(),
        };
        let stream = source.as_stream().clone();
        let termination = source.termination();
        let weak = source.downgrade();
        drop(source);

        task::spawn(async move {
            loop {
                let received = {
                    let recv = pin!(self.recv());
                    match future::select(recv, termination.terminated()).await {
                        Either::Left((received, _)) => received,
                        Either::Right(_) => break,
                    }
                };

                let Ok(message) = received else {
                    if let Some(source) = weak.upgrade() {
                        source.close();
                    }
                    return;
                };

                let Some(source) = weak.upgrade() else {
                    break;
                };
                if source.send(message).await.is_err() {
                    break;
                }
            }

            // Nobody can observe the stream anymore.
            self.close();
        });

        stream
    }
}
