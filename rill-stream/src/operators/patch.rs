// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Record-like messages that can be patched with a partial value.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Shallow, right-biased merge of two values of the same shape.
///
/// `a.merged(&b)` is `a` with every field present in `b` overwritten by `b`'s
/// value. Used by [`Stream::filter_by`](crate::Stream::filter_by).
pub trait Merge {
    #[must_use]
    fn merged(&self, patch: &Self) -> Self;
}

/// Objects merge field by field; any other patch replaces the value entirely.
impl Merge for Value {
    fn merged(&self, patch: &Self) -> Self {
        match (self, patch) {
            (Value::Object(base), Value::Object(fields)) => {
                let mut merged = base.clone();
                for (key, value) in fields {
                    merged.insert(key.clone(), value.clone());
                }
                Value::Object(merged)
            }
            _ => patch.clone(),
        }
    }
}

impl<K, V, S> Merge for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn merged(&self, patch: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

impl<K: Ord + Clone, V: Clone> Merge for BTreeMap<K, V> {
    fn merged(&self, patch: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}
