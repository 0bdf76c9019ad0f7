// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection value and the range-tracking selection engine.
//!
//! The engine computes proposals: every operation returns the selection that
//! should be emitted and leaves committing it to the caller. Its own range
//! bookkeeping (anchor, whether the last selection was a range, and which ids
//! the active range contributed) updates immediately.
//!
//! ## Range protocols
//!
//! - Anchored: [`SelectionEngine::select_range`] replaces whatever the previous
//!   range contributed with every visible node between the anchor and the target.
//!   Ids selected outside that range are kept.
//! - Stepwise: [`SelectionEngine::step`] moves one visible node at a time. Stepping
//!   onto a node the active range already covers retracts the node being left,
//!   so reversing direction shrinks the range.
//!
//! ```rust
//! use understory_tree_view::{Selection, SelectionEngine};
//!
//! let visible = ["one", "two", "three", "four", "five"];
//! let mut engine = SelectionEngine::new();
//! let mut selection = Selection::Multiple(Vec::new());
//!
//! selection = engine.select(&selection, &"three", true);
//! // Shift+ArrowDown twice from "three".
//! selection = engine.step(&selection, Some(&"four"), &"three").unwrap();
//! selection = engine.step(&selection, Some(&"five"), &"four").unwrap();
//! assert_eq!(selection.as_slice(), &["three", "four", "five"]);
//! // Shift+ArrowUp walks back and retracts.
//! selection = engine.step(&selection, Some(&"four"), &"five").unwrap();
//! assert_eq!(selection.as_slice(), &["three", "four"]);
//! # let _ = visible;
//! ```

use alloc::vec::Vec;
use core::slice;

/// Current selection of a tree.
///
/// Single-select trees always hold [`Selection::Single`], multi-select trees
/// always hold [`Selection::Multiple`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<K> {
    /// At most one selected node.
    Single(Option<K>),
    /// Any number of selected nodes, newest discrete selection first.
    Multiple(Vec<K>),
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl<K: Clone + PartialEq> Selection<K> {
    /// An empty selection of the right shape for `multi_select`.
    pub fn empty(multi_select: bool) -> Self {
        if multi_select {
            Self::Multiple(Vec::new())
        } else {
            Self::Single(None)
        }
    }

    /// Build a selection from `ids`.
    ///
    /// Single-select keeps only the first id. Multi-select drops duplicates.
    pub fn from_ids(multi_select: bool, ids: Vec<K>) -> Self {
        if multi_select {
            Self::Multiple(dedup(ids))
        } else {
            Self::Single(ids.into_iter().next())
        }
    }

    /// Returns `true` for [`Selection::Multiple`].
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: &K) -> bool {
        self.as_slice().contains(id)
    }

    /// Selected ids as a slice.
    pub fn as_slice(&self) -> &[K] {
        match self {
            Self::Single(id) => id.as_slice(),
            Self::Multiple(ids) => ids,
        }
    }

    /// Iterate over selected ids.
    pub fn iter(&self) -> slice::Iter<'_, K> {
        self.as_slice().iter()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

fn dedup<K: PartialEq>(ids: Vec<K>) -> Vec<K> {
    let mut out: Vec<K> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Visible nodes between `a` and `b`, inclusive, in visible order.
///
/// `None` when either end is not visible.
fn nodes_in_range<K: Clone + PartialEq>(visible: &[K], a: &K, b: &K) -> Option<Vec<K>> {
    let ia = visible.iter().position(|k| k == a)?;
    let ib = visible.iter().position(|k| k == b)?;
    let (lo, hi) = if ia <= ib { (ia, ib) } else { (ib, ia) };
    Some(visible[lo..=hi].to_vec())
}

/// Range bookkeeping behind multi-select.
#[derive(Clone, Debug)]
pub struct SelectionEngine<K> {
    last_selected: Option<K>,
    last_was_range: bool,
    current_range: Vec<K>,
}

impl<K> Default for SelectionEngine<K> {
    fn default() -> Self {
        Self {
            last_selected: None,
            last_was_range: false,
            current_range: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> SelectionEngine<K> {
    /// A fresh engine with no anchor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor of anchored ranges: the most recent discrete selection.
    pub fn anchor(&self) -> Option<&K> {
        self.last_selected.as_ref()
    }

    /// Returns `true` if the most recent selection operation was a range.
    pub fn last_was_range(&self) -> bool {
        self.last_was_range
    }

    /// Ids the active range has contributed to the selection.
    pub fn current_range(&self) -> &[K] {
        &self.current_range
    }

    /// Discrete selection of `id`.
    ///
    /// With `multiple` on a multi-select value, toggles `id` (new ids go to the
    /// front). Otherwise replaces the selection with `id`. Resets range tracking
    /// and makes `id` the anchor.
    pub fn select(&mut self, current: &Selection<K>, id: &K, multiple: bool) -> Selection<K> {
        let next = match current {
            Selection::Multiple(ids) if multiple => {
                if ids.contains(id) {
                    Selection::Multiple(ids.iter().filter(|k| *k != id).cloned().collect())
                } else {
                    let mut out = Vec::with_capacity(ids.len() + 1);
                    out.push(id.clone());
                    out.extend(ids.iter().cloned());
                    Selection::Multiple(out)
                }
            }
            Selection::Multiple(_) => Selection::Multiple(alloc::vec![id.clone()]),
            Selection::Single(_) => Selection::Single(Some(id.clone())),
        };
        self.last_selected = Some(id.clone());
        self.last_was_range = false;
        self.current_range.clear();
        next
    }

    /// Anchored range from `start` (or the anchor when `None`) to `end`.
    ///
    /// Without a `start` and without a recorded anchor, `end` becomes the anchor.
    /// Returns `None` when there is nothing to emit: an end point that is not
    /// visible, or a single-select value. The last selection is marked as a range
    /// either way.
    pub fn select_range(
        &mut self,
        current: &Selection<K>,
        visible: &[K],
        start: Option<&K>,
        end: &K,
    ) -> Option<Selection<K>> {
        let start = match start {
            Some(start) => start.clone(),
            None => self.last_selected.get_or_insert_with(|| end.clone()).clone(),
        };
        let proposal = match current {
            Selection::Multiple(ids) => self.range_to(ids, visible, &start, end),
            Selection::Single(_) => None,
        };
        self.last_was_range = true;
        proposal
    }

    fn range_to(&mut self, ids: &[K], visible: &[K], start: &K, end: &K) -> Option<Selection<K>> {
        let range = nodes_in_range(visible, start, end)?;
        let mut next: Vec<K> = if self.last_was_range {
            ids.iter()
                .filter(|k| !self.current_range.contains(k))
                .cloned()
                .collect()
        } else {
            ids.to_vec()
        };
        next.extend(range.iter().cloned());
        self.current_range = range;
        Some(Selection::Multiple(dedup(next)))
    }

    /// One stepwise move from `from` onto `next`, anchored at the anchor.
    ///
    /// `next` is `None` at either end of the visible sequence, in which case
    /// nothing is emitted. The last selection is marked as a range either way.
    pub fn step(&mut self, current: &Selection<K>, next: Option<&K>, from: &K) -> Option<Selection<K>> {
        let proposal = match (current, next) {
            (Selection::Multiple(ids), Some(next)) => Some(self.step_onto(ids, next, from)),
            _ => None,
        };
        self.last_was_range = true;
        proposal
    }

    fn step_onto(&mut self, ids: &[K], next: &K, from: &K) -> Selection<K> {
        let start = self.last_selected.clone();
        let mut selected = ids.to_vec();
        if !self.current_range.contains(from) {
            self.current_range.clear();
        }
        if self.last_was_range {
            if self.current_range.contains(next) {
                // Reversing direction: drop the node being left, never the anchor.
                let keep = |k: &K| start.as_ref() == Some(k) || k != from;
                selected.retain(|k| keep(k));
                self.current_range.retain(|k| keep(k));
            } else {
                if !selected.contains(next) {
                    selected.push(next.clone());
                }
                self.current_range.push(next.clone());
            }
        } else {
            if !selected.contains(next) {
                selected.push(next.clone());
            }
            self.current_range.push(from.clone());
            self.current_range.push(next.clone());
        }
        Selection::Multiple(selected)
    }

    /// Anchored range from the anchor to the first visible node.
    ///
    /// `id` becomes the anchor if none is recorded. Unless the previous selection
    /// was already a range, the range starts at `id`.
    pub fn to_first(&mut self, current: &Selection<K>, visible: &[K], id: &K) -> Option<Selection<K>> {
        let start = self.boundary_start(id);
        match visible.first() {
            Some(first) => self.select_range(current, visible, Some(&start), first),
            None => {
                self.last_was_range = true;
                None
            }
        }
    }

    /// Anchored range from the anchor to the last visible node.
    pub fn to_last(&mut self, current: &Selection<K>, visible: &[K], id: &K) -> Option<Selection<K>> {
        let start = self.boundary_start(id);
        match visible.last() {
            Some(last) => self.select_range(current, visible, Some(&start), last),
            None => {
                self.last_was_range = true;
                None
            }
        }
    }

    fn boundary_start(&mut self, id: &K) -> K {
        let anchor = self.last_selected.get_or_insert_with(|| id.clone()).clone();
        if self.last_was_range { anchor } else { id.clone() }
    }

    /// Range over every visible node.
    pub fn all(&mut self, current: &Selection<K>, visible: &[K]) -> Option<Selection<K>> {
        match (visible.first(), visible.last()) {
            (Some(first), Some(last)) => self.select_range(current, visible, Some(first), last),
            _ => {
                self.last_was_range = true;
                None
            }
        }
    }

    /// Forget the anchor and any range bookkeeping.
    pub fn reset(&mut self) {
        self.last_selected = None;
        self.last_was_range = false;
        self.current_range.clear();
    }
}
