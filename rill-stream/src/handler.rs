// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared handler loop for single-input combinators.

use crate::derive::derive1_labeled;
use crate::stream::Stream;
use async_channel::Receiver;
use rill_core::{task, Message, Result, StreamConfig, StreamError};
use std::panic::{self, AssertUnwindSafe};

/// Run `f`, turning a panic into [`StreamError::HandlerFault`].
pub(crate) fn contain<R>(label: &str, f: impl FnOnce() -> Result<R>) -> Result<R> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(StreamError::from_panic(label, payload)))
}

/// Spawn a loop feeding every message of `input` through `step` and publishing the
/// produced messages, in order, on the returned channel.
///
/// `step` may produce zero, one or many messages per input. If it panics or returns
/// an error, the fault is logged and the loop closes its output and stops; nothing
/// else in the graph is affected. The output is also closed when `input` is
/// exhausted, and the loop stops early once nobody listens to the output anymore.
pub(crate) fn pipe<T, U, F>(
    label: &'static str,
    config: StreamConfig,
    input: Receiver<T>,
    mut step: F,
) -> Receiver<U>
where
    T: Message,
    U: Message,
    F: FnMut(T) -> Result<Vec<U>> + Send + 'static,
{
    let (tx, rx) = config.channel();

    task::spawn(async move {
        while let Ok(message) = input.recv().await {
            let produced = match contain(label, || step(message)) {
                Ok(produced) => produced,
                Err(fault) => {
                    error!("{label}: {fault}; closing output");
                    break;
                }
            };

            for item in produced {
                if tx.send(item).await.is_err() {
                    trace!("{label}: output closed, stopping handler");
                    return;
                }
            }
        }

        tx.close();
    });

    rx
}

/// Derive a stream from `parent` whose handler is a [`pipe`] running `step`.
pub(crate) fn piped<T, U, F>(
    label: &'static str,
    parent: &Stream<T>,
    initial: Option<U>,
    step: F,
) -> Result<Stream<U>>
where
    T: Message,
    U: Message,
    F: FnMut(T) -> Result<Vec<U>> + Send + 'static,
{
    derive1_labeled(
        label,
        move |input, config| pipe(label, config, input, step),
        initial,
        parent,
    )
}
