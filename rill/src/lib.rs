// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # rill
//!
//! Push-based event streams with a current value.
//!
//! Build a graph from [`Source`]s and combinators; every stream in it keeps its
//! latest value ([`Stream::read`]) and forwards new messages to its subscribers in
//! push order. Dropping the handles you no longer need shuts the corresponding part
//! of the graph down.
//!
//! ## Quick start
//!
//! ```
//! use rill::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> rill::Result<()> {
//! let temperature = Source::with_initial(18);
//! let humidity = Source::with_initial(40);
//!
//! let comfortable = map2(&temperature, &humidity, |t, h| (18..=24).contains(&t) && h < 60)?;
//! let changes = comfortable.uniq()?;
//! let mut observer = changes.listen()?;
//!
//! assert_eq!(comfortable.read(), Some(true));
//!
//! humidity.push(75)?;
//! assert_eq!(observer.recv().await, Some(false));
//!
//! humidity.push(70)?; // still uncomfortable: suppressed by uniq
//! temperature.push(20)?;
//! humidity.push(50)?;
//! assert_eq!(observer.recv().await, Some(true));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |---|---|
//! | `rill-core` | configuration, head cell, subscriber registry, fan-out, errors |
//! | `rill-stream` | [`Stream`], [`Source`], [`derive`] and the combinators |
//! | `rill` | this facade, the [`prelude`] and [`ReceiverExt`] |

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod receiver_ext;

pub use receiver_ext::ReceiverExt;

// Re-export core types
pub use rill_core::{Capacity, Result, ResultExt, StreamConfig, StreamError, Termination};

// Re-export streams and combinators
pub use rill_stream::{
    derive, derive2, event_stream, initial, map2, map_all, mapcat_all, merge, zip, zip2, Merge,
    Source, Stream, Subscription, Transform, WeakSource,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ReceiverExt;
    pub use rill_core::{Result, ResultExt, StreamConfig, StreamError};
    pub use rill_stream::{
        derive, event_stream, initial, map2, map_all, mapcat_all, merge, zip, zip2, Source,
        Stream, Subscription,
    };
}
