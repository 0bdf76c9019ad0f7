// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input types: keys, modifier sets, and the events handed to observers.
//!
//! These are deliberately small and framework-agnostic. Hosts translate their
//! native keyboard and pointer events into [`KeyEvent`] and [`ClickEvent`]
//! before handing them to the tree.

bitflags::bitflags! {
    /// Modifier keys held while an input event fired.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Meta (Command on macOS, Windows key elsewhere).
        const META  = 0b0000_0100;
        /// Alt / Option.
        const ALT   = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if Control or Meta is held.
    ///
    /// Trees treat both the same way: as the "add to selection" modifier.
    pub fn ctrl_or_meta(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }

    /// Returns `true` if Shift is held.
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

/// A logical key, already resolved from the host's keyboard layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// A character-producing key, for example `a` or `*`.
    Character(char),
    /// Any other named key (Tab, Escape, function keys, ...).
    Other,
}

impl Key {
    /// Returns the character for printable keys.
    ///
    /// A key is printable when it produces a single non-whitespace character.
    pub fn printable(self) -> Option<char> {
        match self {
            Self::Character(c) if !c.is_whitespace() && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Where a key event originated relative to the tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventOrigin {
    /// The tree root itself held input focus.
    #[default]
    Tree,
    /// An interactive control nested inside an item label (for example a text box).
    ///
    /// The tree never interprets these so that the nested control keeps its input.
    Nested,
}

/// A key-down event as seen by the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
    /// Whether the tree root or a nested control received the event.
    pub origin: EventOrigin,
}

impl KeyEvent {
    /// A key press on the tree root with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            origin: EventOrigin::Tree,
        }
    }

    /// Returns this event with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns this event marked as coming from a nested control.
    pub fn nested(mut self) -> Self {
        self.origin = EventOrigin::Nested;
        self
    }
}

/// A click on an item's content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClickEvent {
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// A click with `modifiers` held.
    pub fn with_modifiers(modifiers: Modifiers) -> Self {
        Self { modifiers }
    }
}

/// The input that caused a notification.
///
/// Observers receive this alongside the new selection or expansion value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    /// A key press interpreted by the tree.
    Key(KeyEvent),
    /// A click on an item.
    Click(ClickEvent),
    /// The tree root received input focus.
    Focus,
    /// A command issued directly through [`TreeView::dispatch`](crate::TreeView::dispatch).
    Programmatic,
}
