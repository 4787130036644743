// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::patch::Merge;
use super::zip::zip;
use crate::handler::{contain, piped};
use crate::stream::Stream;
use rill_core::{Message, Result};

impl<T: Message> Stream<T> {
    /// Emit every element of `f(message)`, in order, for each message.
    ///
    /// An empty result emits nothing. The head starts at the last element of
    /// `f(self.read())`, or stays unset if that is empty.
    ///
    /// Elements of one result are not published atomically: a concurrent close may
    /// cut the sequence short.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream has
    ///   terminated.
    /// - [`StreamError::HandlerFault`](rill_core::StreamError::HandlerFault) if `f`
    ///   panics while computing the initial head.
    ///
    /// # Example
    ///
    /// ```
    /// use rill_stream::Source;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> rill_core::Result<()> {
    /// let lines = Source::new();
    /// let words = lines.mapcat(|line: String| {
    ///     line.split_whitespace().map(str::to_owned).collect::<Vec<_>>()
    /// })?;
    /// let mut observer = words.listen()?;
    ///
    /// lines.push("hello world".to_owned())?;
    ///
    /// assert_eq!(observer.recv().await.as_deref(), Some("hello"));
    /// assert_eq!(observer.recv().await.as_deref(), Some("world"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn mapcat<U, I, F>(&self, f: F) -> Result<Stream<U>>
    where
        U: Message,
        I: IntoIterator<Item = U>,
        F: FnMut(T) -> I + Send + 'static,
    {
        self.mapcat_labeled("mapcat", f)
    }

    pub(crate) fn mapcat_labeled<U, I, F>(&self, label: &'static str, mut f: F) -> Result<Stream<U>>
    where
        U: Message,
        I: IntoIterator<Item = U>,
        F: FnMut(T) -> I + Send + 'static,
    {
        let initial = contain(label, || {
            Ok(self
                .read()
                .and_then(|message| f(message).into_iter().last()))
        })?;
        piped(label, self, initial, move |message| {
            Ok(f(message).into_iter().collect())
        })
    }

    /// Keep only the messages satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Same as [`mapcat`](Self::mapcat).
    pub fn filter<P>(&self, mut predicate: P) -> Result<Stream<T>>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.mapcat_labeled("filter", move |message| {
            predicate(&message).then_some(message)
        })
    }

    /// Drop the messages satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Same as [`mapcat`](Self::mapcat).
    pub fn remove<P>(&self, mut predicate: P) -> Result<Stream<T>>
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.mapcat_labeled("remove", move |message| {
            (!predicate(&message)).then_some(message)
        })
    }
}

impl<T: Message + Merge + PartialEq> Stream<T> {
    /// Keep only the messages that already match every field of `partial`.
    ///
    /// A message matches when merging `partial` onto it leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`mapcat`](Self::mapcat).
    ///
    /// # Example
    ///
    /// ```
    /// use rill_stream::Source;
    /// use serde_json::json;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> rill_core::Result<()> {
    /// let events = Source::new();
    /// let clicks = events.filter_by(json!({ "kind": "click" }))?;
    /// let mut observer = clicks.listen()?;
    ///
    /// events.push(json!({ "kind": "scroll", "y": 10 }))?;
    /// events.push(json!({ "kind": "click", "x": 3 }))?;
    ///
    /// assert_eq!(observer.recv().await, Some(json!({ "kind": "click", "x": 3 })));
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter_by(&self, partial: T) -> Result<Stream<T>> {
        self.mapcat_labeled("filter_by", move |message: T| {
            (message.merged(&partial) == message).then_some(message)
        })
    }
}

/// Emit every element of `f(latest)`, in order, whenever any parent emits.
///
/// `latest` holds the latest value of every parent, in `parents` order. Like
/// [`map_all`](super::map_all), nothing is produced until every parent has a value.
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
/// use rill_stream::{mapcat_all, Source};
///
/// # #[tokio::main]
/// # async fn main() -> rill_core::Result<()> {
/// let low = Source::with_initial(1);
/// let high = Source::with_initial(3);
/// let range = mapcat_all(&[&low, &high], |bounds| bounds[0]..=bounds[1])?;
/// let mut observer = range.listen()?;
///
/// assert_eq!(range.read(), Some(3));
///
/// high.push(2)?;
/// assert_eq!(observer.recv().await, Some(1));
/// assert_eq!(observer.recv().await, Some(2));
/// # Ok(())
/// # }
/// ```
pub fn mapcat_all<T, U, I, F>(parents: &[&Stream<T>], mut f: F) -> Result<Stream<U>>
where
    T: Message,
    U: Message,
    I: IntoIterator<Item = U>,
    F: FnMut(Vec<T>) -> I + Send + 'static,
{
    zip(parents)?.mapcat_labeled("mapcat_all", move |latest: Vec<Option<T>>| {
        latest
            .into_iter()
            .collect::<Option<Vec<T>>>()
            .into_iter()
            .flat_map(&mut f)
            .collect::<Vec<U>>()
    })
}
