// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard and pointer driving of a headless tree view.
//!
//! This example shows how to:
//! - mount `TreeItem`s into a `TreeView` and commit the visible sequence,
//! - feed clicks and key presses through the tree's input entry points,
//! - observe selection and expansion changes,
//! - render the visible rows with icons and accessibility attributes.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example tree_view_keyboard`

use env_logger::Env;
use understory_tree_view::{
    ClickEvent, Key, KeyEvent, Modifiers, Selection, TreeEvent, TreeIcons, TreeItem,
    TreeObserver, TreeView, TreeViewProps,
};

type Id = &'static str;

struct Logger;

impl TreeObserver<Id> for Logger {
    fn on_node_select(&mut self, event: &TreeEvent, selection: &Selection<Id>) {
        log::info!("select via {event:?}: {:?}", selection.as_slice());
    }

    fn on_node_toggle(&mut self, event: &TreeEvent, expanded: &[Id]) {
        log::info!("toggle via {event:?}: {expanded:?}");
    }
}

fn depth(tree: &TreeView<Id, Id>, id: &Id) -> usize {
    let mut depth = 0;
    let mut cursor = tree.registry().parent_of(id);
    while let Some(parent) = cursor {
        depth += 1;
        cursor = tree.registry().parent_of(parent);
    }
    depth
}

fn render(title: &str, tree: &TreeView<Id, Id>, items: &[TreeItem<Id, char>], icons: &TreeIcons<char>) {
    println!("== {title}");
    for id in tree.visible_nodes() {
        let Some(item) = items.iter().find(|item| item.id() == id) else {
            continue;
        };
        let attrs = item.attributes(tree);
        let icon = item.icon(tree, icons).copied().unwrap_or(' ');
        let label = tree.registry().label(id).copied().unwrap_or_default();
        let focus = if tree.is_focused(id) { '>' } else { ' ' };
        let selected = if attrs.selected == Some(true) { '*' } else { ' ' };
        println!(
            "{focus}{selected} {:indent$}{icon} {label}  [{}]",
            "",
            attrs.id,
            indent = depth(tree, id) * 2,
        );
    }
    println!(
        "   active descendant: {:?}\n",
        tree.attributes().active_descendant
    );
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut tree: TreeView<Id, Id> = TreeView::new(TreeViewProps {
        id: Some("files".into()),
        multi_select: true,
        default_expanded: vec!["src"],
        ..TreeViewProps::default()
    });
    tree.set_observer(Box::new(Logger));

    let rows: [(Id, Option<Id>, Id); 7] = [
        ("src", None, "Sources"),
        ("lib", Some("src"), "lib.rs"),
        ("main", Some("src"), "main.rs"),
        ("tests", None, "Tests"),
        ("smoke", Some("tests"), "smoke.rs"),
        ("docs", None, "Documentation"),
        ("readme", None, "README.md"),
    ];
    let mut items: Vec<TreeItem<Id, char>> = rows
        .iter()
        .map(|&(id, parent, _)| TreeItem::new(id, parent))
        .collect();
    for (item, &(_, _, label)) in items.iter_mut().zip(&rows) {
        item.mount(&mut tree, label, label);
    }
    tree.commit();

    let icons = TreeIcons {
        default_collapse_icon: Some('v'),
        default_expand_icon: Some('>'),
        default_end_icon: Some('-'),
        default_parent_icon: None,
    };
    render("mounted", &tree, &items, &icons);

    tree.handle_focus();
    tree.handle_key_down(&KeyEvent::new(Key::ArrowDown));
    let shift_down = KeyEvent::new(Key::ArrowDown).with_modifiers(Modifiers::SHIFT);
    tree.handle_key_down(&shift_down);
    tree.handle_key_down(&shift_down);
    render("shift+down twice from lib.rs", &tree, &items, &icons);

    tree.handle_key_down(&KeyEvent::new(Key::Character('*')));
    render("expand siblings", &tree, &items, &icons);

    tree.handle_key_down(&KeyEvent::new(Key::Character('r')));
    render("type-ahead 'r'", &tree, &items, &icons);

    if let Some(tests) = items.iter().find(|item| *item.id() == "tests") {
        tests.handle_click(&mut tree, &ClickEvent::with_modifiers(Modifiers::CTRL));
    }
    render("ctrl+click Tests", &tree, &items, &icons);

    if let Some(smoke) = items.iter_mut().find(|item| *item.id() == "smoke") {
        let removed = smoke.unmount(&mut tree);
        log::info!("unmounted {removed:?}");
    }
    tree.commit();
    render("smoke.rs unmounted", &tree, &items, &icons);
}
