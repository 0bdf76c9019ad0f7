// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard interpretation for the focused item.
//!
//! | Key                         | Effect                                                        |
//! |-----------------------------|---------------------------------------------------------------|
//! | `ArrowRight`                | collapsed branch: expand; expanded branch: focus first child  |
//! | `ArrowLeft`                 | expanded branch: collapse; otherwise focus the parent         |
//! | `ArrowDown` / `ArrowUp`     | focus next/previous; with Shift (multi) also step the range   |
//! | `Home` / `End`              | focus first/last; with Ctrl+Shift (multi) range-select to it  |
//! | `Enter`                     | toggle a branch                                               |
//! | `Space`                     | select; Ctrl toggles and Shift range-selects in multi mode    |
//! | `*`                         | expand every sibling branch                                   |
//! | `Ctrl+A`                    | select all (multi mode)                                       |
//! | any other printable char    | type-ahead, unless Ctrl, Meta, or Shift is held               |
//!
//! Alt-qualified keys and keys from nested controls are never interpreted.

use core::fmt::Debug;
use core::hash::Hash;

use crate::command::{FocusCommand, SelectCommand, ToggleCommand};
use crate::input::{EventOrigin, Key, KeyEvent, Modifiers, TreeEvent};
use crate::view::TreeView;

/// Interpret `key` as pressed while `id` is focused.
///
/// Returns `true` if the key was handled. The caller commits afterwards.
pub(crate) fn handle_key_down<K, L>(tree: &mut TreeView<K, L>, id: &K, key: &KeyEvent) -> bool
where
    K: Clone + Eq + Hash + Debug,
{
    if key.origin == EventOrigin::Nested || key.modifiers.contains(Modifiers::ALT) {
        return false;
    }
    if !tree.registry().contains(id) {
        return false;
    }

    let event = TreeEvent::Key(*key);
    let multi = tree.is_multi_select();
    let shift = key.modifiers.shift();
    let ctrl = key.modifiers.ctrl_or_meta();
    let id = id.clone();

    match key.key {
        Key::Space => {
            let command = if multi && shift {
                SelectCommand::Range {
                    start: None,
                    end: id,
                }
            } else {
                SelectCommand::Node { id, multiple: multi }
            };
            tree.dispatch(command.into(), &event)
        }
        Key::Enter => {
            if !tree.is_expandable(&id) {
                return false;
            }
            tree.dispatch(ToggleCommand::Node(id).into(), &event)
        }
        Key::ArrowDown => {
            if multi && shift {
                tree.dispatch(SelectCommand::StepNext(id.clone()).into(), &event);
            }
            tree.dispatch(FocusCommand::Next(id).into(), &event);
            true
        }
        Key::ArrowUp => {
            if multi && shift {
                tree.dispatch(SelectCommand::StepPrevious(id.clone()).into(), &event);
            }
            tree.dispatch(FocusCommand::Previous(id).into(), &event);
            true
        }
        Key::ArrowRight => {
            if !tree.is_expandable(&id) {
                return false;
            }
            if tree.is_expanded(&id) {
                tree.dispatch(FocusCommand::Next(id).into(), &event);
            } else {
                tree.dispatch(ToggleCommand::Node(id).into(), &event);
            }
            true
        }
        Key::ArrowLeft => {
            if tree.is_expanded(&id) {
                tree.dispatch(ToggleCommand::Node(id).into(), &event)
            } else if let Some(parent) = tree.registry().parent_of(&id).cloned() {
                tree.dispatch(FocusCommand::Node(parent).into(), &event)
            } else {
                false
            }
        }
        Key::Home => {
            if multi && ctrl && shift {
                tree.dispatch(SelectCommand::ToFirst(id).into(), &event);
            }
            tree.dispatch(FocusCommand::First.into(), &event);
            true
        }
        Key::End => {
            if multi && ctrl && shift {
                tree.dispatch(SelectCommand::ToLast(id).into(), &event);
            }
            tree.dispatch(FocusCommand::Last.into(), &event);
            true
        }
        Key::Character('*') => {
            tree.dispatch(ToggleCommand::ExpandSiblings(id).into(), &event);
            true
        }
        Key::Character(c) if multi && ctrl && c.eq_ignore_ascii_case(&'a') => {
            tree.dispatch(SelectCommand::All.into(), &event)
        }
        other => match other.printable() {
            Some(c) if !ctrl && !shift => {
                tree.dispatch(FocusCommand::FirstCharacter(id, c).into(), &event);
                true
            }
            _ => false,
        },
    }
}
