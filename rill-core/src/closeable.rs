// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::{Receiver, Sender};
use std::sync::Arc;

/// A channel endpoint a stream owns and must close when it is dropped.
///
/// Type-erased so a derived stream can own input channels of heterogeneous
/// parent message types.
pub trait Closeable: Send + Sync {
    /// Close the underlying channel. Queued messages remain receivable.
    fn close(&self);

    fn is_closed(&self) -> bool;
}

impl<T: Send> Closeable for Sender<T> {
    fn close(&self) {
        Sender::close(self);
    }

    fn is_closed(&self) -> bool {
        Sender::is_closed(self)
    }
}

impl<T: Send> Closeable for Receiver<T> {
    fn close(&self) {
        Receiver::close(self);
    }

    fn is_closed(&self) -> bool {
        Receiver::is_closed(self)
    }
}

impl<C: Closeable + ?Sized> Closeable for Arc<C> {
    fn close(&self) {
        (**self).close();
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
