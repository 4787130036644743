// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handler::piped;
use crate::stream::Stream;
use rill_core::{Message, Result};
use std::sync::Arc;

/// A state transformer carried by the streams [`accum`](Stream::accum) folds.
pub type Transform<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

impl<T: Message> Stream<T> {
    /// Running fold: starting from `seed`, emit `acc = f(acc, message)` after each
    /// message.
    ///
    /// The head starts at `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream
    /// has terminated.
    ///
    /// # Example
    ///
    /// ```
    /// use rill_stream::Source;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> rill_core::Result<()> {
    /// let deposits = Source::new();
    /// let balance = deposits.reduce(100, |acc, amount| acc + amount)?;
    /// let mut observer = balance.listen()?;
    ///
    /// deposits.push_all([10, 20])?;
    ///
    /// assert_eq!(observer.recv().await, Some(110));
    /// assert_eq!(observer.recv().await, Some(130));
    /// # Ok(())
    /// # }
    /// ```
    pub fn reduce<A, F>(&self, seed: A, mut f: F) -> Result<Stream<A>>
    where
        A: Message,
        F: FnMut(A, T) -> A + Send + 'static,
    {
        let mut acc = seed.clone();
        piped("reduce", self, Some(seed), move |message| {
            acc = f(acc.clone(), message);
            Ok(vec![acc.clone()])
        })
    }

    /// Running fold seeded with this stream's current head.
    ///
    /// When this stream has no value yet, the first message becomes the
    /// accumulator as is.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream
    /// has terminated.
    pub fn reduce_from_head<F>(&self, mut f: F) -> Result<Stream<T>>
    where
        F: FnMut(T, T) -> T + Send + 'static,
    {
        let initial = self.read();
        let mut acc = initial.clone();
        piped("reduce_from_head", self, initial, move |message| {
            let next = match acc.take() {
                Some(current) => f(current, message),
                None => message,
            };
            acc = Some(next.clone());
            Ok(vec![next])
        })
    }

    /// Number of messages seen so far; the head starts at `0`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream
    /// has terminated.
    pub fn count(&self) -> Result<Stream<usize>> {
        self.reduce(0, |n, _| n + 1)
    }
}

impl<T: Message> Stream<Transform<T>> {
    /// Apply each incoming transformer to a running state that starts at `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Closed`](rill_core::StreamError::Closed) if this stream
    /// has terminated.
    ///
    /// # Example
    ///
    /// ```
    /// use rill_stream::{Source, Transform};
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> rill_core::Result<()> {
    /// let commands: Source<Transform<i32>> = Source::new();
    /// let state = commands.accum(1)?;
    /// let mut observer = state.listen()?;
    ///
    /// commands.push(Arc::new(|n: i32| n + 1))?;
    /// commands.push(Arc::new(|n: i32| n * 10))?;
    ///
    /// assert_eq!(observer.recv().await, Some(2));
    /// assert_eq!(observer.recv().await, Some(20));
    /// # Ok(())
    /// # }
    /// ```
    pub fn accum(&self, seed: T) -> Result<Stream<T>> {
        let mut state = seed.clone();
        piped("accum", self, Some(seed), move |transform: Transform<T>| {
            state = transform(state.clone());
            Ok(vec![state.clone()])
        })
    }
}
