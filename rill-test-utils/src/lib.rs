// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rill dataflow engine.
//!
//! Helpers work on any [`futures::Stream`], which is what a rill `Subscription`
//! is, and on [`rill_core::Termination`] probes. They are designed for use in
//! development and testing only, not for production code.
//!
//! # Example
//!
//! ```rust
//! use rill_test_utils::helpers::{assert_no_element_emitted, next_within};
//! use futures::stream;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut numbers = stream::iter([1, 2]);
//! assert_eq!(next_within(&mut numbers, 100).await, 1);
//! assert_eq!(next_within(&mut numbers, 100).await, 2);
//!
//! let mut silent = stream::pending::<i32>();
//! assert_no_element_emitted(&mut silent, 10).await;
//! # }
//! ```

pub mod helpers;
pub mod person;
pub mod test_data;

pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, collect_n, next_within, wait_terminated,
};
pub use person::Person;
pub use test_data::TestData;
