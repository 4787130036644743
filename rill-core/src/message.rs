// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Bound shared by every value that flows through a stream graph.
///
/// Messages are opaque to the engine: they are cloned once per subscriber and once
/// into the head cell, and moved across tasks.
pub trait Message: Clone + Send + Sync + 'static {}

impl<T> Message for T where T: Clone + Send + Sync + 'static {}
