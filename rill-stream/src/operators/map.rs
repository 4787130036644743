// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::zip::{zip, zip2};
use crate::handler::{contain, piped};
use crate::stream::Stream;
use rill_core::{Message, Result};

impl<T: Message> Stream<T> {
    /// Emit `f(message)` for every message of this stream.
    ///
    /// The new stream's head starts at `f(self.read())`, so `f` is also called once
    /// at construction when this stream already has a value.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream has
    ///   terminated.
    /// - [`StreamError::HandlerFault`](rill_core::StreamError::HandlerFault) if `f`
    ///   panics while computing the initial head.
    ///
    /// A panic of `f` on a later message terminates only the mapped stream.
    ///
    /// # Example
    ///
    /// ```
    /// use rill_stream::Source;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> rill_core::Result<()> {
    /// let celsius = Source::with_initial(100.0);
    /// let fahrenheit = celsius.map(|c| c * 9.0 / 5.0 + 32.0)?;
    ///
    /// assert_eq!(fahrenheit.read(), Some(212.0));
    /// # Ok(())
    /// # }
    /// ```
    pub fn map<U, F>(&self, mut f: F) -> Result<Stream<U>>
    where
        U: Message,
        F: FnMut(T) -> U + Send + 'static,
    {
        let initial = contain("map", || Ok(self.read().map(&mut f)))?;
        piped("map", self, initial, move |message| Ok(vec![f(message)]))
    }

    /// Fallible [`map`](Self::map): an `Err` from `f` is a handler fault.
    ///
    /// Use [`ResultExt`](rill_core::ResultExt) to turn foreign errors into a fault
    /// with context.
    ///
    /// # Errors
    ///
    /// Same as [`map`](Self::map); additionally returns the error of `f` if it fails
    /// on the initial head.
    pub fn try_map<U, F>(&self, mut f: F) -> Result<Stream<U>>
    where
        U: Message,
        F: FnMut(T) -> Result<U> + Send + 'static,
    {
        let initial = contain("try_map", || self.read().map(&mut f).transpose())?;
        piped("try_map", self, initial, move |message| {
            f(message).map(|mapped| vec![mapped])
        })
    }

    /// Replace every message with a clone of `value`.
    ///
    /// The head starts at `value` regardless of this stream's head.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream
    /// has terminated.
    pub fn constantly<U: Message>(&self, value: U) -> Result<Stream<U>> {
        let emitted = value.clone();
        piped("constantly", self, Some(value), move |_| Ok(vec![emitted.clone()]))
    }
}

/// Combine two streams of different types with `f`.
///
/// Whenever either parent emits, `f` is applied to the latest value of both.
/// Nothing is emitted until both parents have a value.
///
/// # Errors
///
/// - [`StreamError::Closed`](rill_core::StreamError::Closed) if a parent has
///   terminated.
/// - [`StreamError::HandlerFault`](rill_core::StreamError::HandlerFault) if `f`
///   panics while computing the initial head.
///
/// # Example
///
/// ```
/// use rill_stream::{map2, Source};
///
/// # #[tokio::main]
/// # async fn main() -> rill_core::Result<()> {
/// let price = Source::with_initial(3u32);
/// let quantity = Source::with_initial(4u32);
/// let total = map2(&price, &quantity, |p, q| p * q)?;
///
/// assert_eq!(total.read(), Some(12));
/// # Ok(())
/// # }
/// ```
pub fn map2<A, B, U, F>(first: &Stream<A>, second: &Stream<B>, mut f: F) -> Result<Stream<U>>
where
    A: Message,
    B: Message,
    U: Message,
    F: FnMut(A, B) -> U + Send + 'static,
{
    zip2(first, second)?.mapcat_labeled("map2", move |pair| match pair {
        (Some(a), Some(b)) => Some(f(a, b)),
        _ => None,
    })
}

/// Combine any number of streams of one type with `f`.
///
/// `f` receives the latest value of every parent, in `parents` order. Nothing is
/// emitted until every parent has a value.
///
/// # Errors
///
/// - [`StreamError::NoParents`](rill_core::StreamError::NoParents) if `parents` is
///   empty.
/// - [`StreamError::Closed`](rill_core::StreamError::Closed) if a parent has
///   terminated.
pub fn map_all<T, U, F>(parents: &[&Stream<T>], mut f: F) -> Result<Stream<U>>
where
    T: Message,
    U: Message,
    F: FnMut(Vec<T>) -> U + Send + 'static,
{
    zip(parents)?.mapcat_labeled("map_all", move |latest: Vec<Option<T>>| {
        latest.into_iter().collect::<Option<Vec<T>>>().map(&mut f)
    })
}

