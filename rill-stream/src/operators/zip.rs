// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::derive::{derive2_labeled, derive_labeled};
use crate::handler::contain;
use crate::stream::Stream;
use futures::stream::{self, StreamExt};
use rill_core::{task, Message, Result};

/// Latest value of every parent, re-emitted whenever any parent fires.
///
/// The emitted vector has one slot per parent, in `parents` order; only the slot of
/// the parent that just fired changes. A slot is `None` until its parent has a
/// value. The head starts with every parent's head.
///
/// Updates from different parents are serialized in arrival order, never combined.
/// The zipped stream terminates once every parent has.
///
/// # Errors
///
/// - [`StreamError::NoParents`](rill_core::StreamError::NoParents) if `parents` is
///   empty.
/// - [`StreamError::Closed`](rill_core::StreamError::Closed) if a parent has
///   terminated.
pub fn zip<T: Message>(parents: &[&Stream<T>]) -> Result<Stream<Vec<Option<T>>>> {
    let latest: Vec<Option<T>> =
        contain("zip", || Ok(parents.iter().map(|parent| parent.read()).collect()))?;
    let initial = Some(latest.clone());

    derive_labeled(
        "zip",
        move |inputs, config| {
            let (tx, rx) = config.channel();
            let mut tagged = stream::select_all(
                inputs
                    .into_iter()
                    .enumerate()
                    .map(|(index, input)| input.map(move |message| (index, message)).boxed()),
            );

            task::spawn(async move {
                let mut latest = latest;
                while let Some((index, message)) = tagged.next().await {
                    latest[index] = Some(message);
                    if tx.send(latest.clone()).await.is_err() {
                        trace!("zip: output closed, stopping handler");
                        return;
                    }
                }
                tx.close();
            });

            rx
        },
        initial,
        parents,
    )
}

enum Side<A, B> {
    First(A),
    Second(B),
}

/// [`zip`] over two parents of different types.
///
/// # Errors
///
/// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if a parent has
/// terminated.
///
/// # Example
///
/// ```
/// use rill_stream::{zip2, Source};
///
/// # #[tokio::main]
/// # async fn main() -> rill_core::Result<()> {
/// let count = Source::with_initial(0);
/// let name = Source::with_initial("a");
/// let pair = zip2(&count, &name)?;
/// let mut observer = pair.listen()?;
///
/// count.push(1)?;
/// assert_eq!(observer.recv().await, Some((Some(1), Some("a"))));
/// name.push("b")?;
/// assert_eq!(observer.recv().await, Some((Some(1), Some("b"))));
/// # Ok(())
/// # }
/// ```
pub fn zip2<A, B>(first: &Stream<A>, second: &Stream<B>) -> Result<Stream<(Option<A>, Option<B>)>>
where
    A: Message,
    B: Message,
{
    let latest = contain("zip2", || Ok((first.read(), second.read())))?;
    let initial = Some(latest.clone());

    derive2_labeled(
        "zip2",
        move |a, b, config| {
            let (tx, rx) = config.channel();
            let mut tagged = stream::select(a.map(Side::First).boxed(), b.map(Side::Second).boxed());

            task::spawn(async move {
                let (mut left, mut right) = latest;
                while let Some(side) = tagged.next().await {
                    match side {
                        Side::First(value) => left = Some(value),
                        Side::Second(value) => right = Some(value),
                    }
                    if tx.send((left.clone(), right.clone())).await.is_err() {
                        trace!("zip2: output closed, stopping handler");
                        return;
                    }
                }
                tx.close();
            });

            rx
        },
        initial,
        first,
        second,
    )
}
