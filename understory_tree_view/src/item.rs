// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node controller: lifecycle, input binding, attributes, and icons.
//!
//! A [`TreeItem`] is what a host keeps next to each rendered item. It holds no
//! tree state of its own beyond its identity and icon overrides; everything
//! else is read from, and written to, the owning [`TreeView`].

use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use crate::attributes::{ItemAttributes, ItemState};
use crate::command::Outcome;
use crate::input::{ClickEvent, KeyEvent};
use crate::view::TreeView;

/// Tree-wide default icons.
///
/// `I` is whatever the host uses to describe an icon; the tree never looks inside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeIcons<I> {
    /// Shown on expanded branches.
    pub default_collapse_icon: Option<I>,
    /// Shown on collapsed branches.
    pub default_expand_icon: Option<I>,
    /// Shown on leaves.
    pub default_end_icon: Option<I>,
    /// Shown on branches that resolve no expansion icon.
    pub default_parent_icon: Option<I>,
}

impl<I> Default for TreeIcons<I> {
    fn default() -> Self {
        Self {
            default_collapse_icon: None,
            default_expand_icon: None,
            default_end_icon: None,
            default_parent_icon: None,
        }
    }
}

/// Controller for one tree node.
#[derive(Clone, Debug)]
pub struct TreeItem<K, I = ()> {
    id: K,
    parent: Option<K>,
    order_index: Option<usize>,
    /// Overrides every other icon.
    pub icon: Option<I>,
    /// Overrides [`TreeIcons::default_expand_icon`].
    pub expand_icon: Option<I>,
    /// Overrides [`TreeIcons::default_collapse_icon`].
    pub collapse_icon: Option<I>,
    /// Overrides [`TreeIcons::default_end_icon`].
    pub end_icon: Option<I>,
}

impl<K, I> TreeItem<K, I>
where
    K: Clone + Eq + Hash + Debug,
{
    /// A controller for `id` under `parent`. Nothing is registered until [`TreeItem::mount`].
    pub fn new(id: K, parent: Option<K>) -> Self {
        Self {
            id,
            parent,
            order_index: None,
            icon: None,
            expand_icon: None,
            collapse_icon: None,
            end_icon: None,
        }
    }

    /// Node id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Parent id.
    pub fn parent(&self) -> Option<&K> {
        self.parent.as_ref()
    }

    /// Order index assigned at mount, while mounted.
    pub fn order_index(&self) -> Option<usize> {
        self.order_index
    }

    /// Register with `tree`.
    ///
    /// Takes the next order index under the parent and records the first
    /// character of `text` for type-ahead.
    pub fn mount<L>(&mut self, tree: &mut TreeView<K, L>, label: L, text: &str) {
        let index = tree.next_order_index(self.parent.as_ref());
        self.order_index = Some(index);
        tree.register_node(self.id.clone(), self.parent.clone(), label, index);
        self.map_text(tree, text);
    }

    /// Re-register after the label, text, or parent changed.
    ///
    /// Moving to another parent takes a fresh order index there.
    pub fn update<L>(&mut self, tree: &mut TreeView<K, L>, parent: Option<K>, label: L, text: &str) {
        if parent != self.parent {
            self.parent = parent;
            self.order_index = None;
        }
        let index = match self.order_index {
            Some(index) => index,
            None => tree.next_order_index(self.parent.as_ref()),
        };
        self.order_index = Some(index);
        tree.register_node(self.id.clone(), self.parent.clone(), label, index);
        self.map_text(tree, text);
    }

    fn map_text<L>(&self, tree: &mut TreeView<K, L>, text: &str) {
        match text.chars().next() {
            Some(c) => tree.map_first_char(&self.id, c),
            None => tree.unmap_first_char(&self.id),
        }
    }

    /// Unregister from `tree`, taking the subtree with it. Returns the removed ids.
    pub fn unmount<L>(&mut self, tree: &mut TreeView<K, L>) -> Vec<K> {
        self.order_index = None;
        tree.unregister_node(&self.id)
    }

    /// A click on this item's content.
    ///
    /// Always [`Outcome::Stop`]: ancestors must not select or toggle themselves
    /// in response to a descendant's click.
    pub fn handle_click<L>(&self, tree: &mut TreeView<K, L>, click: &ClickEvent) -> Outcome {
        tree.handle_click(&self.id, click);
        Outcome::Stop
    }

    /// A key press while this item is focused. Returns `true` if handled.
    pub fn handle_key_down<L>(&self, tree: &mut TreeView<K, L>, key: &KeyEvent) -> bool {
        let handled = crate::keyboard::handle_key_down(tree, &self.id, key);
        tree.commit();
        handled
    }

    /// Resolve the icon to draw.
    ///
    /// The item's `icon` wins. Branches then use the expand or collapse icon for
    /// their state, item override first, falling back to the default parent icon.
    /// Leaves use the item's `end_icon`, then the default end icon.
    pub fn icon<'a, L>(&'a self, tree: &TreeView<K, L>, defaults: &'a TreeIcons<I>) -> Option<&'a I> {
        if let Some(icon) = self.icon.as_ref() {
            return Some(icon);
        }
        if tree.is_expandable(&self.id) {
            let expansion = if tree.is_expanded(&self.id) {
                self.collapse_icon
                    .as_ref()
                    .or(defaults.default_collapse_icon.as_ref())
            } else {
                self.expand_icon
                    .as_ref()
                    .or(defaults.default_expand_icon.as_ref())
            };
            expansion.or(defaults.default_parent_icon.as_ref())
        } else {
            self.end_icon.as_ref().or(defaults.default_end_icon.as_ref())
        }
    }
}

impl<K, I> TreeItem<K, I>
where
    K: Clone + Eq + Hash + Debug + Display,
{
    /// Accessibility and styling attributes.
    pub fn attributes<L>(&self, tree: &TreeView<K, L>) -> ItemAttributes {
        let expandable = tree.is_expandable(&self.id);
        let expanded = expandable && tree.is_expanded(&self.id);
        let mut state = ItemState::empty();
        state.set(ItemState::EXPANDED, expanded);
        state.set(ItemState::SELECTED, tree.is_selected(&self.id));
        state.set(ItemState::FOCUSED, tree.is_focused(&self.id));
        ItemAttributes {
            role: "treeitem",
            id: tree.descendant_id(&self.id),
            expanded: expandable.then_some(expanded),
            selected: tree.aria_selected(&self.id),
            group: expandable,
            state,
        }
    }
}
