// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handler::piped;
use crate::stream::Stream;
use rill_core::{Message, Result};

impl<T: Message + PartialEq> Stream<T> {
    /// Suppress messages equal to the one immediately before them.
    ///
    /// The first message always passes; the head starts at this stream's head.
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
    /// let readings = Source::new();
    /// let changes = readings.uniq()?;
    /// let mut observer = changes.listen()?;
    ///
    /// readings.push_all([1, 1, 2, 2, 1])?;
    ///
    /// assert_eq!(observer.recv().await, Some(1));
    /// assert_eq!(observer.recv().await, Some(2));
    /// assert_eq!(observer.recv().await, Some(1));
    /// # Ok(())
    /// # }
    /// ```
    pub fn uniq(&self) -> Result<Stream<T>> {
        let mut previous: Option<T> = None;
        piped("uniq", self, self.read(), move |message| {
            if previous.as_ref() == Some(&message) {
                return Ok(Vec::new());
            }
            previous = Some(message.clone());
            Ok(vec![message])
        })
    }
}
