// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion state: which branches are open.
//!
//! Transitions are pure: they return the proposed next set and leave `self`
//! untouched, so the tree can notify observers before anything commits.

use alloc::vec::Vec;
use core::slice;

/// Ordered list of expanded node ids.
///
/// Expanding a single node puts it at the front; batch expansion appends.
/// Observers receive the ids in this order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionSet<K> {
    ids: Vec<K>,
}

impl<K> Default for ExpansionSet<K> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<K: Clone + PartialEq> ExpansionSet<K> {
    /// An empty set: every branch collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `ids`, dropping duplicates.
    pub fn from_ids(ids: Vec<K>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.ids.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Returns `true` if `id` is expanded.
    pub fn contains(&self, id: &K) -> bool {
        self.ids.contains(id)
    }

    /// Expanded ids in notification order.
    pub fn as_slice(&self) -> &[K] {
        &self.ids
    }

    /// Iterate over expanded ids.
    pub fn iter(&self) -> slice::Iter<'_, K> {
        self.ids.iter()
    }

    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The set after toggling `id`: removed if present, otherwise prepended.
    pub fn toggled(&self, id: &K) -> Self {
        if self.contains(id) {
            Self {
                ids: self.ids.iter().filter(|e| *e != id).cloned().collect(),
            }
        } else {
            let mut ids = Vec::with_capacity(self.ids.len() + 1);
            ids.push(id.clone());
            ids.extend(self.ids.iter().cloned());
            Self { ids }
        }
    }

    /// The set after expanding every id in `candidates`, or `None` if all of
    /// them are already expanded.
    pub fn expanded_with(&self, candidates: &[K]) -> Option<Self> {
        let mut ids = self.ids.clone();
        for id in candidates {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        (ids.len() != self.ids.len()).then_some(Self { ids })
    }
}

impl<'a, K> IntoIterator for &'a ExpansionSet<K> {
    type Item = &'a K;
    type IntoIter = slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
