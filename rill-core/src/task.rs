// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning for distribution and handler loops.
//!
//! Tasks are detached: none is ever aborted from the outside. Each loop owns its
//! channels and exits once its input is exhausted or its output is closed, so
//! shutdown is driven entirely by closing channels.

use std::future::Future;

/// Spawn a detached background task on the configured runtime.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime context, like `tokio::spawn` does.
/// Streams must therefore be constructed inside a runtime.
pub fn spawn<Fut>(future: Fut)
where
    Fut: Future<Output = ()> + Send + 'static,
{
    drop(tokio::spawn(future));
}
