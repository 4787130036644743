// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rill dataflow engine.
//!
//! Errors surface in two places only: at graph construction time (deriving from
//! or subscribing to a stream that has already terminated) and at push time on a
//! closed source. Faults raised inside a running handler never reach an unrelated
//! caller; they are logged and terminate the faulting branch of the graph.
//!
//! # Examples
//!
//! ```
//! use rill_core::{Result, StreamError};
//!
//! fn push_into_dead_stream() -> Result<()> {
//!     Err(StreamError::Closed)
//! }
//!
//! assert!(push_into_dead_stream().is_err());
//! ```

use std::any::Any;

/// Root error type for all rill operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The stream's channel has been closed; it no longer accepts messages or subscribers.
    #[error("Stream is closed")]
    Closed,

    /// A user-supplied function failed while a combinator was processing a message.
    ///
    /// Only the faulting derivation stops: its output channel is closed and its
    /// subscribers observe termination.
    #[error("Handler fault: {context}")]
    HandlerFault {
        /// What failed and why
        context: String,
    },

    /// A derivation was requested without any parent stream.
    #[error("Derivation requires at least one parent stream")]
    NoParents,
}

impl StreamError {
    /// Create a handler fault with the given context
    pub fn handler_fault(context: impl Into<String>) -> Self {
        Self::HandlerFault {
            context: context.into(),
        }
    }

    /// Convert a panic payload caught inside combinator `name` into a handler fault.
    pub fn from_panic(name: &str, payload: Box<dyn Any + Send>) -> Self {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());

        Self::handler_fault(format!("{name} panicked: {reason}"))
    }

    /// Returns `true` for the closed-stream condition.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Specialized Result type for rill operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Helper trait for adding context to fallible handler results
///
/// Any displayable error is folded into [`StreamError::HandlerFault`], which is how
/// `try_map` and friends report user errors.
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(StreamError::HandlerFault)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(StreamError::HandlerFault)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| StreamError::handler_fault(format!("{}: {e}", context.into())))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| StreamError::handler_fault(format!("{}: {e}", f())))
    }
}
