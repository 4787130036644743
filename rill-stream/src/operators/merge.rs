// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::derive::derive_labeled;
use crate::stream::Stream;
use futures::stream::{self, StreamExt};
use rill_core::{task, Message, Result};

/// Interleave the messages of every parent as they arrive.
///
/// Each parent's own order is preserved; no order is imposed across parents. The
/// merged stream has no initial value and terminates once every parent has.
///
/// # Errors
///
/// - [`StreamError::NoParents`](rill_core::StreamError::NoParents) if `parents` is
///   empty.
/// - [`StreamError::Closed`](rill_core::StreamError::Closed) if a parent has
///   terminated.
///
/// # Example
///
/// ```
/// use rill_stream::{merge, Source};
///
/// # #[tokio::main]
/// # async fn main() -> rill_core::Result<()> {
/// let left = Source::new();
/// let right = Source::new();
/// let both = merge(&[&left, &right])?;
/// let mut observer = both.listen()?;
///
/// left.push(1)?;
/// assert_eq!(observer.recv().await, Some(1));
/// right.push(2)?;
/// assert_eq!(observer.recv().await, Some(2));
/// # Ok(())
/// # }
/// ```
pub fn merge<T: Message>(parents: &[&Stream<T>]) -> Result<Stream<T>> {
    derive_labeled(
        "merge",
        |inputs, config| {
            let (tx, rx) = config.channel();
            let mut merged = stream::select_all(inputs.into_iter().map(Box::pin));

            task::spawn(async move {
                while let Some(message) = merged.next().await {
                    if tx.send(message).await.is_err() {
                        trace!("merge: output closed, stopping handler");
                        return;
                    }
                }
                tx.close();
            });

            rx
        },
        None,
        parents,
    )
}
