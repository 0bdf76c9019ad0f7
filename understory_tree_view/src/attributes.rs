// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility attribute snapshots.
//!
//! The host maps these onto whatever its platform exposes (ARIA attributes,
//! AccessKit properties, ...). Optional fields that are `None` must be omitted
//! entirely rather than rendered as `false`.

use alloc::string::String;

bitflags::bitflags! {
    /// Visual state of an item, for the host's styling.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemState: u8 {
        /// The item is expanded.
        const EXPANDED = 0b0000_0001;
        /// The item is selected.
        const SELECTED = 0b0000_0010;
        /// The item is the focused item.
        const FOCUSED  = 0b0000_0100;
    }
}

/// Attributes of the tree root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeAttributes {
    /// Always `"tree"`.
    pub role: &'static str,
    /// Whether more than one item may be selected.
    pub multiselectable: bool,
    /// Descendant id of the tabbable item, once one exists.
    pub active_descendant: Option<String>,
}

/// Attributes of one tree item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemAttributes {
    /// Always `"treeitem"`.
    pub role: &'static str,
    /// `<tree-id>-<node-id>`.
    pub id: String,
    /// `Some` only for items with children.
    pub expanded: Option<bool>,
    /// See [`TreeView::aria_selected`](crate::TreeView::aria_selected).
    pub selected: Option<bool>,
    /// The item renders a group of children.
    pub group: bool,
    /// Styling state.
    pub state: ItemState,
}
