// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The combinator library.
//!
//! Every combinator is a handler plugged into the derivation protocol. Single-parent
//! combinators are methods on [`Stream`](crate::Stream); combinators over several
//! parents are free functions taking a slice of parents.
//!
//! | Combinator | Initial head |
//! |---|---|
//! | [`map`](crate::Stream::map), [`try_map`](crate::Stream::try_map) | `f(read(s))` |
//! | [`map2`], [`map_all`] | `f` over every parent's head, if all have one |
//! | [`mapcat_all`] | last element produced from every parent's head, if all have one |
//! | [`mapcat`](crate::Stream::mapcat), [`filter`](crate::Stream::filter), [`remove`](crate::Stream::remove), [`filter_by`](crate::Stream::filter_by) | last element produced from `read(s)` |
//! | [`reduce`](crate::Stream::reduce), [`count`](crate::Stream::count), [`accum`](crate::Stream::accum) | the seed |
//! | [`reduce_from_head`](crate::Stream::reduce_from_head), [`uniq`](crate::Stream::uniq) | `read(s)` |
//! | [`merge`] | none |
//! | [`zip`], [`zip2`] | every parent's head |
//! | [`constantly`](crate::Stream::constantly) | the constant |

mod map;
mod mapcat;
mod merge;
mod patch;
mod reduce;
mod uniq;
mod zip;

pub use map::{map2, map_all};
pub use mapcat::mapcat_all;
pub use merge::merge;
pub use patch::Merge;
pub use reduce::Transform;
pub use zip::{zip, zip2};
