// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged commands routed through [`TreeView::dispatch`](crate::TreeView::dispatch).
//!
//! Items never reach into the tree's engines directly. Every focus move,
//! expansion change, and selection change is expressed as a [`Command`] and
//! handled in one place, which keeps the ordering rules (notify, then commit)
//! uniform no matter where the request came from.

/// Propagation outcome of an item input handler.
///
/// Only controls propagation. Whether the host should suppress its default
/// action is reported separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Let ancestors see the event too.
    Continue,
    /// The event is fully handled; ancestors must not handle it again.
    Stop,
}

/// Focus moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusCommand<K> {
    /// Focus this node.
    Node(K),
    /// Focus the visible node after this one.
    Next(K),
    /// Focus the visible node before this one.
    Previous(K),
    /// Focus the first visible node.
    First,
    /// Focus the last visible node.
    Last,
    /// Type-ahead from this node for the given character.
    FirstCharacter(K, char),
}

/// Expansion changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleCommand<K> {
    /// Expand or collapse this node.
    Node(K),
    /// Expand every expandable sibling of this node.
    ExpandSiblings(K),
}

/// Selection changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectCommand<K> {
    /// Discrete selection; `multiple` toggles membership in multi-select trees.
    Node {
        /// Node to select.
        id: K,
        /// Toggle instead of replace.
        multiple: bool,
    },
    /// Anchored range. `start` defaults to the current anchor.
    Range {
        /// Range start, or `None` for the anchor.
        start: Option<K>,
        /// Range end.
        end: K,
    },
    /// Extend or retract the range one step down from this node.
    StepNext(K),
    /// Extend or retract the range one step up from this node.
    StepPrevious(K),
    /// Anchored range to the first visible node, triggered from this node.
    ToFirst(K),
    /// Anchored range to the last visible node, triggered from this node.
    ToLast(K),
    /// Select every visible node.
    All,
}

/// A request against the tree's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<K> {
    /// Move focus.
    Focus(FocusCommand<K>),
    /// Change expansion.
    Toggle(ToggleCommand<K>),
    /// Change selection.
    Select(SelectCommand<K>),
}

impl<K> From<FocusCommand<K>> for Command<K> {
    fn from(value: FocusCommand<K>) -> Self {
        Self::Focus(value)
    }
}

impl<K> From<ToggleCommand<K>> for Command<K> {
    fn from(value: ToggleCommand<K>) -> Self {
        Self::Toggle(value)
    }
}

impl<K> From<SelectCommand<K>> for Command<K> {
    fn from(value: SelectCommand<K>) -> Self {
        Self::Select(value)
    }
}
