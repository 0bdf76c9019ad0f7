// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tree View: headless state for accessible, keyboard-driven tree widgets.
//!
//! This crate owns everything a tree widget needs to know except how to draw it:
//!
//! - A **node registry** ([`Registry`]) mapping node ids to their parent, label, and
//!   sibling order, from which child lists and the visible node sequence derive.
//! - **Focus navigation** over the visible sequence ([`navigation`]), including
//!   type-ahead by first character.
//! - **Expansion** ([`ExpansionSet`]) with single toggles and batch sibling expansion.
//! - **Selection** ([`Selection`], [`SelectionEngine`]) in single and multi modes,
//!   with anchored and stepwise range selection and select-all.
//! - A per-node **controller** ([`TreeItem`]) that binds mount/unmount, clicks, and
//!   key presses to the tree, and reports accessibility attributes and icons.
//!
//! The root [`TreeView`] owns all of it. Every mutation is a [`Command`] routed
//! through [`TreeView::dispatch`]; observers ([`TreeObserver`]) hear about selection
//! and expansion changes before they commit.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_tree_view::{
//!     ClickEvent, Key, KeyEvent, Modifiers, TreeItem, TreeView, TreeViewProps,
//! };
//!
//! let mut tree: TreeView<&str> = TreeView::new(TreeViewProps {
//!     id: Some("files".into()),
//!     multi_select: true,
//!     ..TreeViewProps::default()
//! });
//!
//! // Items register themselves as the host mounts them.
//! let mut items = [
//!     TreeItem::<&str>::new("src", None),
//!     TreeItem::new("lib.rs", Some("src")),
//!     TreeItem::new("main.rs", Some("src")),
//!     TreeItem::new("Cargo.toml", None),
//! ];
//! for item in &mut items {
//!     let id = *item.id();
//!     item.mount(&mut tree, (), id);
//! }
//! tree.commit();
//! assert_eq!(tree.visible_nodes(), &["src", "Cargo.toml"]);
//!
//! // Clicking a branch selects and opens it.
//! items[0].handle_click(&mut tree, &ClickEvent::default());
//! assert_eq!(tree.visible_nodes(), &["src", "lib.rs", "main.rs", "Cargo.toml"]);
//!
//! // Shift+ArrowDown extends the selection one node at a time.
//! let shift_down = KeyEvent::new(Key::ArrowDown).with_modifiers(Modifiers::SHIFT);
//! tree.handle_key_down(&shift_down);
//! tree.handle_key_down(&shift_down);
//! assert_eq!(tree.selection().as_slice(), &["src", "lib.rs", "main.rs"]);
//! assert_eq!(
//!     tree.attributes().active_descendant.as_deref(),
//!     Some("files-main.rs"),
//! );
//! ```
//!
//! ## Commit phase
//!
//! Commands change expansion, selection, and focus right away, but the visible
//! sequence is derived data: it is rebuilt by [`TreeView::commit`], so it always
//! reflects the expansion that was committed, never a half-applied one. The input
//! entry points ([`TreeView::handle_key_down`], [`TreeView::handle_click`],
//! [`TreeView::handle_focus`], and the [`TreeItem`] handlers) commit on their own.
//! Hosts that register nodes or call [`TreeView::dispatch`] directly commit once the
//! batch is done.
//!
//! ## Controlled state
//!
//! Setting [`TreeViewProps::expanded`] or [`TreeViewProps::selected`] hands ownership
//! of that value to the caller. The tree still computes and announces the next value,
//! but only [`TreeView::set_expanded`] / [`TreeView::set_selected`] change it.
//!
//! ## Failure model
//!
//! There is no error type. Unknown ids, empty trees, and nodes that vanished during
//! an unmount all make operations inert: they return `false`, `None`, or an empty
//! list.
//!
//! ## Logging
//!
//! Committed mutations are logged through the [`log`] facade at `trace` level and
//! visible-sequence rebuilds at `debug` level. No logger is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod command;
mod expansion;
mod input;
mod item;
mod keyboard;
pub mod navigation;
mod registry;
mod selection;
mod view;

pub use attributes::{ItemAttributes, ItemState, TreeAttributes};
pub use command::{Command, FocusCommand, Outcome, SelectCommand, ToggleCommand};
pub use expansion::ExpansionSet;
pub use input::{ClickEvent, EventOrigin, Key, KeyEvent, Modifiers, TreeEvent};
pub use item::{TreeIcons, TreeItem};
pub use registry::{Registry, derive_visible};
pub use selection::{Selection, SelectionEngine};
pub use view::{TreeObserver, TreeView, TreeViewProps};
