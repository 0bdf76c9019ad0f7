// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree root: owns the registry, expansion, selection, and focus pointers.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::attributes::TreeAttributes;
use crate::command::{Command, FocusCommand, SelectCommand, ToggleCommand};
use crate::expansion::ExpansionSet;
use crate::input::{ClickEvent, KeyEvent, TreeEvent};
use crate::navigation;
use crate::registry::{Registry, derive_visible};
use crate::selection::{Selection, SelectionEngine};

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

/// Configuration of a [`TreeView`].
///
/// Leaving `expanded` or `selected` as `None` makes the tree manage that state
/// itself, seeded from the matching `default_*` field. Supplying `Some` makes the
/// tree's own updates proposals: observers are told, but the value only changes
/// when fed back through [`TreeView::set_expanded`] / [`TreeView::set_selected`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeViewProps<K> {
    /// Prefix of descendant ids. A process-unique id is generated when `None`.
    pub id: Option<String>,
    /// Allow more than one selected node.
    pub multi_select: bool,
    /// Turn every selection operation into a no-op.
    pub disable_selection: bool,
    /// Initially expanded ids (uncontrolled).
    pub default_expanded: Vec<K>,
    /// Initially selected ids (uncontrolled). Single-select trees use the first.
    pub default_selected: Vec<K>,
    /// Controlled expansion.
    pub expanded: Option<Vec<K>>,
    /// Controlled selection.
    pub selected: Option<Vec<K>>,
}

impl<K> Default for TreeViewProps<K> {
    fn default() -> Self {
        Self {
            id: None,
            multi_select: false,
            disable_selection: false,
            default_expanded: Vec::new(),
            default_selected: Vec::new(),
            expanded: None,
            selected: None,
        }
    }
}

/// Receives selection and expansion changes.
///
/// Both methods run synchronously, before the tree commits the new value, so an
/// observer never sees a half-applied update.
pub trait TreeObserver<K> {
    /// The selection is about to become `selection`.
    fn on_node_select(&mut self, event: &TreeEvent, selection: &Selection<K>) {
        let _ = (event, selection);
    }

    /// The expanded ids are about to become `expanded`.
    fn on_node_toggle(&mut self, event: &TreeEvent, expanded: &[K]) {
        let _ = (event, expanded);
    }
}

#[derive(Clone, Debug)]
struct Controlled<T> {
    value: T,
    controlled: bool,
}

impl<T> Controlled<T> {
    /// Commit `next` unless a caller owns the value.
    fn propose(&mut self, next: T) -> bool {
        if self.controlled {
            return false;
        }
        self.value = next;
        true
    }
}

/// Headless tree view state.
///
/// `K` identifies nodes and `L` is an opaque label payload stored per node.
///
/// Mutations go through [`TreeView::dispatch`] (or the `handle_*` input entry
/// points, which translate input into commands). Derived data, the visible node
/// sequence and the initial tabbable node, is refreshed by [`TreeView::commit`].
/// The input entry points commit on their own; hosts that call `dispatch` or
/// register nodes directly call `commit` once the batch is done.
///
/// ## Example
///
/// ```rust
/// use understory_tree_view::{Key, KeyEvent, TreeView, TreeViewProps};
///
/// let mut tree: TreeView<&str> = TreeView::new(TreeViewProps {
///     id: Some("tree".into()),
///     ..TreeViewProps::default()
/// });
/// let one = tree.next_order_index(None);
/// tree.register_node("one", None, (), one);
/// let two = tree.next_order_index(Some(&"one"));
/// tree.register_node("two", Some("one"), (), two);
/// tree.commit();
///
/// tree.handle_focus();
/// tree.handle_key_down(&KeyEvent::new(Key::ArrowRight));
/// assert!(tree.is_expanded(&"one"));
/// assert_eq!(tree.focused(), Some(&"one"));
///
/// tree.handle_key_down(&KeyEvent::new(Key::ArrowRight));
/// assert_eq!(tree.attributes().active_descendant.as_deref(), Some("tree-two"));
/// ```
pub struct TreeView<K, L = ()> {
    id: String,
    multi_select: bool,
    disable_selection: bool,
    registry: Registry<K, L>,
    expanded: Controlled<ExpansionSet<K>>,
    selected: Controlled<Selection<K>>,
    engine: SelectionEngine<K>,
    tabbable: Option<K>,
    focused: Option<K>,
    visible: Vec<K>,
    expansion_dirty: bool,
    structure_dirty: bool,
    observer: Option<Box<dyn TreeObserver<K>>>,
}

impl<K: Debug, L> Debug for TreeView<K, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeView")
            .field("id", &self.id)
            .field("multi_select", &self.multi_select)
            .field("disable_selection", &self.disable_selection)
            .field("registry", &self.registry)
            .field("tabbable", &self.tabbable)
            .field("focused", &self.focused)
            .field("visible", &self.visible.len())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, L> TreeView<K, L>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Create a tree from `props`.
    pub fn new(props: TreeViewProps<K>) -> Self {
        let id = props.id.unwrap_or_else(|| {
            let n = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
            format!("understory-tree-{n}")
        });
        let expanded = match props.expanded {
            Some(ids) => Controlled {
                value: ExpansionSet::from_ids(ids),
                controlled: true,
            },
            None => Controlled {
                value: ExpansionSet::from_ids(props.default_expanded),
                controlled: false,
            },
        };
        let selected = match props.selected {
            Some(ids) => Controlled {
                value: Selection::from_ids(props.multi_select, ids),
                controlled: true,
            },
            None => Controlled {
                value: Selection::from_ids(props.multi_select, props.default_selected),
                controlled: false,
            },
        };
        Self {
            id,
            multi_select: props.multi_select,
            disable_selection: props.disable_selection,
            registry: Registry::new(),
            expanded,
            selected,
            engine: SelectionEngine::new(),
            tabbable: None,
            focused: None,
            visible: Vec::new(),
            expansion_dirty: true,
            structure_dirty: true,
            observer: None,
        }
    }

    /// Tree id used as the prefix of descendant ids.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` for multi-select trees.
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Returns `true` if selection is disabled.
    pub fn is_selection_disabled(&self) -> bool {
        self.disable_selection
    }

    /// Install the observer notified of selection and expansion changes.
    pub fn set_observer(&mut self, observer: Box<dyn TreeObserver<K>>) {
        self.observer = Some(observer);
    }

    /// Remove and return the installed observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn TreeObserver<K>>> {
        self.observer.take()
    }

    // --- registry lifecycle ---

    /// Read access to the node registry.
    pub fn registry(&self) -> &Registry<K, L> {
        &self.registry
    }

    /// Next order index for a child of `parent`. See [`Registry::next_order_index`].
    pub fn next_order_index(&mut self, parent: Option<&K>) -> usize {
        self.registry.next_order_index(parent)
    }

    /// Insert or overwrite a node. Returns `true` if the structure changed.
    pub fn register_node(&mut self, id: K, parent: Option<K>, label: L, index: usize) -> bool {
        let changed = self.registry.register(id, parent, label, index);
        self.structure_dirty |= changed;
        changed
    }

    /// Remove `id` and its subtree. Returns the removed ids.
    ///
    /// Clears the focused node if it was removed. A removed tabbable node is
    /// replaced by the first root-level node on the next commit.
    pub fn unregister_node(&mut self, id: &K) -> Vec<K> {
        let removed = self.registry.unregister(id);
        if removed.is_empty() {
            return removed;
        }
        if self.focused.as_ref().is_some_and(|f| removed.contains(f)) {
            self.focused = None;
        }
        if self.tabbable.as_ref().is_some_and(|t| removed.contains(t)) {
            self.tabbable = None;
        }
        self.structure_dirty = true;
        removed
    }

    /// Record the type-ahead character of `id`.
    pub fn map_first_char(&mut self, id: &K, ch: char) {
        self.registry.map_first_char(id, ch);
    }

    /// Forget the type-ahead character of `id`.
    pub fn unmap_first_char(&mut self, id: &K) {
        self.registry.unmap_first_char(id);
    }

    // --- commit ---

    /// Refresh derived state after a batch of changes.
    ///
    /// Rebuilds the visible sequence when expansion or structure changed, and
    /// points the tabbable node at the first root-level node if it is unset.
    pub fn commit(&mut self) {
        if self.expansion_dirty || self.structure_dirty {
            self.visible = derive_visible(&self.registry, &self.expanded.value);
            log::debug!("{}: {} visible nodes", self.id, self.visible.len());
            self.expansion_dirty = false;
            self.structure_dirty = false;
        }
        if self
            .tabbable
            .as_ref()
            .is_none_or(|t| !self.registry.contains(t))
        {
            self.tabbable = self.registry.children_of(None).into_iter().next();
        }
    }

    // --- controlled values ---

    /// Replace the expanded ids. This is how controlled trees accept a proposal.
    pub fn set_expanded(&mut self, ids: Vec<K>) {
        self.expanded.value = ExpansionSet::from_ids(ids);
        self.expansion_dirty = true;
    }

    /// Replace the selected ids. This is how controlled trees accept a proposal.
    pub fn set_selected(&mut self, ids: Vec<K>) {
        self.selected.value = Selection::from_ids(self.multi_select, ids);
    }

    // --- queries ---

    /// Visible node sequence as of the last commit.
    pub fn visible_nodes(&self) -> &[K] {
        &self.visible
    }

    /// Current expansion.
    pub fn expanded(&self) -> &ExpansionSet<K> {
        &self.expanded.value
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection<K> {
        &self.selected.value
    }

    /// Range bookkeeping of the selection engine.
    pub fn selection_engine(&self) -> &SelectionEngine<K> {
        &self.engine
    }

    /// The node reachable by sequential keyboard focus.
    pub fn tabbable(&self) -> Option<&K> {
        self.tabbable.as_ref()
    }

    /// The node currently indicated as active.
    pub fn focused(&self) -> Option<&K> {
        self.focused.as_ref()
    }

    /// Returns `true` if `id` is expanded.
    pub fn is_expanded(&self, id: &K) -> bool {
        self.expanded.value.contains(id)
    }

    /// Returns `true` if `id` has registered children.
    pub fn is_expandable(&self, id: &K) -> bool {
        self.registry.has_children(id)
    }

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: &K) -> bool {
        self.selected.value.contains(id)
    }

    /// Returns `true` if `id` is the focused node.
    pub fn is_focused(&self, id: &K) -> bool {
        self.focused.as_ref() == Some(id)
    }

    /// Returns `true` if `id` is the tabbable node.
    pub fn is_tabbable(&self, id: &K) -> bool {
        self.tabbable.as_ref() == Some(id)
    }

    /// Value of the selected state an item should expose.
    ///
    /// Multi-select trees always report a value, `false` while selection is
    /// disabled. Single-select trees only report `true` on the selected node.
    pub fn aria_selected(&self, id: &K) -> Option<bool> {
        let selected = !self.disable_selection && self.is_selected(id);
        if self.multi_select {
            Some(selected)
        } else {
            selected.then_some(true)
        }
    }

    // --- commands ---

    /// Apply `command`, citing `event` as its cause in notifications.
    ///
    /// Returns `false` when the command did not apply: an unregistered id, a
    /// disabled selection, or a range operation on a single-select tree. Derived
    /// state is not refreshed; call [`TreeView::commit`] afterwards.
    pub fn dispatch(&mut self, command: Command<K>, event: &TreeEvent) -> bool {
        match command {
            Command::Focus(cmd) => self.apply_focus(cmd),
            Command::Toggle(cmd) => self.apply_toggle(cmd, event),
            Command::Select(cmd) => self.apply_select(cmd, event),
        }
    }

    fn focus(&mut self, id: Option<K>) -> bool {
        match id {
            Some(id) if self.registry.contains(&id) => {
                log::trace!("{}: focus {id:?}", self.id);
                self.tabbable = Some(id.clone());
                self.focused = Some(id);
                true
            }
            _ => false,
        }
    }

    fn apply_focus(&mut self, cmd: FocusCommand<K>) -> bool {
        let target = match cmd {
            FocusCommand::Node(id) => Some(id),
            FocusCommand::Next(id) => navigation::next(&self.visible, &id).cloned(),
            FocusCommand::Previous(id) => navigation::previous(&self.visible, &id).cloned(),
            FocusCommand::First => navigation::first(&self.visible).cloned(),
            FocusCommand::Last => navigation::last(&self.visible).cloned(),
            FocusCommand::FirstCharacter(id, ch) => {
                navigation::find_by_first_char(&self.visible, &self.registry, &id, ch).cloned()
            }
        };
        self.focus(target)
    }

    fn apply_toggle(&mut self, cmd: ToggleCommand<K>, event: &TreeEvent) -> bool {
        match cmd {
            ToggleCommand::Node(id) => {
                if !self.registry.contains(&id) {
                    return false;
                }
                let collapsing = self.expanded.value.contains(&id);
                let next = self.expanded.value.toggled(&id);
                if collapsing {
                    self.pull_focus_out_of(&id);
                }
                self.emit_expansion(event, next);
                true
            }
            ToggleCommand::ExpandSiblings(id) => {
                if !self.registry.contains(&id) {
                    return false;
                }
                let siblings: Vec<K> = self
                    .registry
                    .children_of(self.registry.parent_of(&id))
                    .into_iter()
                    .filter(|k| self.registry.has_children(k))
                    .collect();
                if let Some(next) = self.expanded.value.expanded_with(&siblings) {
                    self.emit_expansion(event, next);
                }
                true
            }
        }
    }

    /// Move focus pointers sitting below a collapsing node onto the node itself.
    fn pull_focus_out_of(&mut self, id: &K) {
        let registry = &self.registry;
        if self.tabbable.as_ref().is_some_and(|t| registry.is_descendant_of(t, id)) {
            self.tabbable = Some(id.clone());
        }
        if self.focused.as_ref().is_some_and(|f| registry.is_descendant_of(f, id)) {
            self.focused = Some(id.clone());
        }
    }

    fn emit_expansion(&mut self, event: &TreeEvent, next: ExpansionSet<K>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_node_toggle(event, next.as_slice());
        }
        log::trace!("{}: expanded {:?}", self.id, next.as_slice());
        if self.expanded.propose(next) {
            self.expansion_dirty = true;
        }
    }

    fn emit_selection(&mut self, event: &TreeEvent, next: Selection<K>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_node_select(event, &next);
        }
        log::trace!("{}: selected {:?}", self.id, next.as_slice());
        self.selected.propose(next);
    }

    fn apply_select(&mut self, cmd: SelectCommand<K>, event: &TreeEvent) -> bool {
        if self.disable_selection {
            return false;
        }
        let current = &self.selected.value;
        let visible = &self.visible;
        let proposal = match cmd {
            SelectCommand::Node { id, multiple } => {
                if !self.registry.contains(&id) {
                    return false;
                }
                Some(self.engine.select(current, &id, multiple))
            }
            _ if !self.multi_select => return false,
            SelectCommand::Range { start, end } => {
                self.engine.select_range(current, visible, start.as_ref(), &end)
            }
            SelectCommand::StepNext(id) => {
                let next = navigation::next(visible, &id);
                self.engine.step(current, next, &id)
            }
            SelectCommand::StepPrevious(id) => {
                let next = navigation::previous(visible, &id);
                self.engine.step(current, next, &id)
            }
            SelectCommand::ToFirst(id) => self.engine.to_first(current, visible, &id),
            SelectCommand::ToLast(id) => self.engine.to_last(current, visible, &id),
            SelectCommand::All => self.engine.all(current, visible),
        };
        if let Some(next) = proposal {
            self.emit_selection(event, next);
        }
        true
    }

    // --- input ---

    /// The tree root received input focus.
    ///
    /// Focuses the first selected node that is still registered, otherwise the
    /// tabbable node. Does nothing if a node is already focused.
    pub fn handle_focus(&mut self) -> bool {
        self.commit();
        if self.focused.is_some() {
            return false;
        }
        let target = self
            .selected
            .value
            .iter()
            .find(|k| self.registry.contains(k))
            .cloned()
            .or_else(|| self.tabbable.clone());
        let moved = self.focus(target);
        self.commit();
        moved
    }

    /// The tree root lost input focus. The tabbable node is kept.
    pub fn handle_blur(&mut self) {
        self.focused = None;
    }

    /// Interpret a key press on the focused node.
    ///
    /// Returns `true` when the key was handled and the host should suppress its
    /// default action.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> bool {
        let Some(id) = self.focused.clone() else {
            return false;
        };
        let handled = crate::keyboard::handle_key_down(self, &id, event);
        self.commit();
        handled
    }

    /// A click on the content of `id`.
    ///
    /// Focuses and selects the node (unless selection is disabled), then toggles
    /// it if it has children. Returns `false` for unknown ids.
    pub fn handle_click(&mut self, id: &K, click: &ClickEvent) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        let event = TreeEvent::Click(*click);
        if !self.disable_selection {
            self.focus(Some(id.clone()));
            let command = if self.multi_select && click.modifiers.shift() {
                SelectCommand::Range {
                    start: None,
                    end: id.clone(),
                }
            } else {
                SelectCommand::Node {
                    id: id.clone(),
                    multiple: self.multi_select && click.modifiers.ctrl_or_meta(),
                }
            };
            self.dispatch(command.into(), &event);
        }
        if self.is_expandable(id) {
            self.dispatch(ToggleCommand::Node(id.clone()).into(), &event);
        }
        self.commit();
        true
    }
}

impl<K, L> TreeView<K, L>
where
    K: Clone + Eq + Hash + Debug + Display,
{
    /// Descendant id of `id`: `<tree-id>-<node-id>`.
    pub fn descendant_id(&self, id: &K) -> String {
        format!("{}-{}", self.id, id)
    }

    /// Accessibility attributes of the tree root.
    pub fn attributes(&self) -> TreeAttributes {
        TreeAttributes {
            role: "tree",
            multiselectable: self.multi_select,
            active_descendant: self.tabbable.as_ref().map(|t| self.descendant_id(t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use crate::input::{Key, Modifiers};

    type Tree = TreeView<&'static str>;

    fn build(props: TreeViewProps<&'static str>, nodes: &[(&'static str, Option<&'static str>)]) -> Tree {
        let mut tree = TreeView::new(props);
        for &(id, parent) in nodes {
            let index = tree.next_order_index(parent.as_ref());
            tree.register_node(id, parent, (), index);
            if let Some(c) = id.chars().next() {
                tree.map_first_char(&id, c);
            }
        }
        tree.commit();
        tree
    }

    #[derive(Default)]
    struct Log {
        selects: Vec<Vec<&'static str>>,
        toggles: Vec<Vec<&'static str>>,
    }

    struct Recorder(Rc<RefCell<Log>>);

    impl TreeObserver<&'static str> for Recorder {
        fn on_node_select(&mut self, _: &TreeEvent, selection: &Selection<&'static str>) {
            self.0.borrow_mut().selects.push(selection.as_slice().to_vec());
        }

        fn on_node_toggle(&mut self, _: &TreeEvent, expanded: &[&'static str]) {
            self.0.borrow_mut().toggles.push(expanded.to_vec());
        }
    }

    fn observe(tree: &mut Tree) -> Rc<RefCell<Log>> {
        let log = Rc::new(RefCell::new(Log::default()));
        tree.set_observer(Box::new(Recorder(log.clone())));
        log
    }

    const NESTED: [(&str, Option<&str>); 4] = [
        ("one", None),
        ("two", Some("one")),
        ("three", Some("two")),
        ("four", None),
    ];

    #[test]
    fn tabbable_starts_at_first_root() {
        let mut tree = Tree::new(TreeViewProps::default());
        tree.commit();
        assert_eq!(tree.tabbable(), None);
        let tree = build(TreeViewProps::default(), &NESTED);
        assert_eq!(tree.tabbable(), Some(&"one"));
        assert_eq!(tree.focused(), None);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Tree::new(TreeViewProps::default());
        let b = Tree::new(TreeViewProps::default());
        assert!(a.id().starts_with("understory-tree-"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn visible_follows_expansion_after_commit() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        assert_eq!(tree.visible_nodes(), &["one", "four"]);
        let ev = TreeEvent::Programmatic;
        assert!(tree.dispatch(ToggleCommand::Node("one").into(), &ev));
        // Derived state waits for the commit.
        assert_eq!(tree.visible_nodes(), &["one", "four"]);
        tree.commit();
        assert_eq!(tree.visible_nodes(), &["one", "two", "four"]);
    }

    #[test]
    fn collapsing_pulls_tabbable_and_focus_up() {
        let props = TreeViewProps {
            default_expanded: vec!["one", "two"],
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        let ev = TreeEvent::Programmatic;
        assert!(tree.dispatch(FocusCommand::Node("three").into(), &ev));
        tree.dispatch(ToggleCommand::Node("one").into(), &ev);
        tree.commit();
        assert_eq!(tree.tabbable(), Some(&"one"));
        assert_eq!(tree.focused(), Some(&"one"));
        assert_eq!(tree.visible_nodes(), &["one", "four"]);
    }

    #[test]
    fn expansion_and_selection_are_independent() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        let ev = TreeEvent::Programmatic;
        tree.dispatch(SelectCommand::Node { id: "four", multiple: false }.into(), &ev);
        let selection = tree.selection().clone();
        tree.dispatch(ToggleCommand::Node("one").into(), &ev);
        assert_eq!(tree.selection(), &selection);
        let expanded = tree.expanded().clone();
        tree.dispatch(SelectCommand::Node { id: "one", multiple: false }.into(), &ev);
        assert_eq!(tree.expanded(), &expanded);
    }

    #[test]
    fn unregister_clears_focus_and_reseeds_tabbable() {
        let props = TreeViewProps {
            default_expanded: vec!["one"],
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        tree.dispatch(FocusCommand::Node("two").into(), &TreeEvent::Programmatic);
        let removed = tree.unregister_node(&"one");
        assert_eq!(removed, vec!["one", "two", "three"]);
        assert_eq!(tree.focused(), None);
        tree.commit();
        assert_eq!(tree.tabbable(), Some(&"four"));
        assert_eq!(tree.visible_nodes(), &["four"]);
    }

    #[test]
    fn identical_reregister_is_inert() {
        let props = TreeViewProps {
            default_selected: vec!["two"],
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        let visible = tree.visible_nodes().to_vec();
        let index = tree.registry().order_index(&"two").unwrap();
        assert!(!tree.register_node("two", Some("one"), (), index));
        tree.commit();
        assert_eq!(tree.visible_nodes(), visible.as_slice());
        assert_eq!(tree.selection(), &Selection::Single(Some("two")));
    }

    #[test]
    fn observer_sees_proposals_in_controlled_mode() {
        let props = TreeViewProps {
            multi_select: true,
            expanded: Some(vec![]),
            selected: Some(vec![]),
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        let log = observe(&mut tree);
        let ev = TreeEvent::Programmatic;
        tree.dispatch(ToggleCommand::Node("one").into(), &ev);
        tree.dispatch(SelectCommand::Node { id: "four", multiple: true }.into(), &ev);
        tree.commit();
        assert_eq!(log.borrow().toggles, vec![vec!["one"]]);
        assert_eq!(log.borrow().selects, vec![vec!["four"]]);
        // Nothing commits until the caller feeds the value back.
        assert!(!tree.is_expanded(&"one"));
        assert!(!tree.is_selected(&"four"));

        tree.set_expanded(vec!["one"]);
        tree.set_selected(vec!["four"]);
        tree.commit();
        assert!(tree.is_expanded(&"one"));
        assert!(tree.is_selected(&"four"));
        assert_eq!(tree.visible_nodes(), &["one", "two", "four"]);
    }

    #[test]
    fn uncontrolled_commit_matches_notification() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        let log = observe(&mut tree);
        tree.dispatch(
            SelectCommand::Node { id: "one", multiple: false }.into(),
            &TreeEvent::Programmatic,
        );
        assert_eq!(log.borrow().selects, vec![vec!["one"]]);
        assert_eq!(tree.selection().as_slice(), &["one"]);
    }

    #[test]
    fn disabled_selection_is_inert() {
        let props = TreeViewProps {
            multi_select: true,
            disable_selection: true,
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        let log = observe(&mut tree);
        let ev = TreeEvent::Programmatic;
        assert!(!tree.dispatch(SelectCommand::Node { id: "one", multiple: false }.into(), &ev));
        assert!(!tree.dispatch(SelectCommand::All.into(), &ev));
        assert!(log.borrow().selects.is_empty());
        assert_eq!(tree.aria_selected(&"one"), Some(false));
    }

    #[test]
    fn unknown_ids_never_fault() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        let ev = TreeEvent::Programmatic;
        assert!(!tree.dispatch(FocusCommand::Node("ghost").into(), &ev));
        assert!(!tree.dispatch(FocusCommand::Next("ghost").into(), &ev));
        assert!(!tree.dispatch(ToggleCommand::Node("ghost").into(), &ev));
        assert!(!tree.dispatch(ToggleCommand::ExpandSiblings("ghost").into(), &ev));
        assert!(!tree.dispatch(SelectCommand::Node { id: "ghost", multiple: false }.into(), &ev));
        assert!(!tree.handle_click(&"ghost", &ClickEvent::default()));
        assert!(tree.unregister_node(&"ghost").is_empty());
    }

    #[test]
    fn range_commands_need_multi_select() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        let ev = TreeEvent::Programmatic;
        assert!(!tree.dispatch(SelectCommand::All.into(), &ev));
        assert!(!tree.dispatch(SelectCommand::StepNext("one").into(), &ev));
        assert!(tree.selection().is_empty());
    }

    #[test]
    fn focus_prefers_selected_node() {
        let props = TreeViewProps {
            default_selected: vec!["four"],
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        assert!(tree.handle_focus());
        assert_eq!(tree.focused(), Some(&"four"));
        // Already focused: a second focus event changes nothing.
        assert!(!tree.handle_focus());
        tree.handle_blur();
        assert_eq!(tree.focused(), None);
        assert_eq!(tree.tabbable(), Some(&"four"));
    }

    #[test]
    fn focus_falls_back_to_first_node() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        tree.handle_focus();
        assert_eq!(tree.focused(), Some(&"one"));
    }

    #[test]
    fn root_attributes() {
        let props = TreeViewProps {
            id: Some("tree".into()),
            multi_select: true,
            ..TreeViewProps::default()
        };
        let empty = Tree::new(props.clone());
        assert_eq!(empty.attributes().active_descendant, None);
        let tree = build(props, &NESTED);
        let attrs = tree.attributes();
        assert_eq!(attrs.role, "tree");
        assert!(attrs.multiselectable);
        assert_eq!(attrs.active_descendant.as_deref(), Some("tree-one"));
    }

    #[test]
    fn aria_selected_by_mode() {
        let single = build(
            TreeViewProps {
                default_selected: vec!["one"],
                ..TreeViewProps::default()
            },
            &NESTED,
        );
        assert_eq!(single.aria_selected(&"one"), Some(true));
        assert_eq!(single.aria_selected(&"four"), None);

        let multi = build(
            TreeViewProps {
                multi_select: true,
                default_selected: vec!["one"],
                ..TreeViewProps::default()
            },
            &NESTED,
        );
        assert_eq!(multi.aria_selected(&"one"), Some(true));
        assert_eq!(multi.aria_selected(&"four"), Some(false));
    }

    #[test]
    fn click_with_selection_disabled_only_toggles() {
        let props = TreeViewProps {
            disable_selection: true,
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &NESTED);
        assert!(tree.handle_click(&"one", &ClickEvent::default()));
        assert!(tree.is_expanded(&"one"));
        assert!(tree.selection().is_empty());
        assert_eq!(tree.focused(), None);
    }

    #[test]
    fn mouse_range_select() {
        let props = TreeViewProps {
            multi_select: true,
            default_expanded: vec!["two"],
            ..TreeViewProps::default()
        };
        let mut tree = build(
            props,
            &[
                ("one", None),
                ("two", None),
                ("three", Some("two")),
                ("four", Some("two")),
                ("five", None),
                ("six", Some("five")),
                ("seven", Some("five")),
                ("eight", None),
                ("nine", None),
            ],
        );
        let shift = ClickEvent::with_modifiers(Modifiers::SHIFT);
        tree.handle_click(&"five", &ClickEvent::default());
        assert!(tree.is_expanded(&"five"));
        tree.handle_click(&"nine", &shift);
        assert_eq!(
            tree.selection().as_slice(),
            &["five", "six", "seven", "eight", "nine"]
        );
        tree.handle_click(&"one", &shift);
        assert_eq!(
            tree.selection().as_slice(),
            &["one", "two", "three", "four", "five"]
        );
    }

    #[test]
    fn shift_click_without_anchor_selects_the_clicked_node() {
        let props = TreeViewProps {
            multi_select: true,
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &[("one", None), ("two", None), ("three", None)]);
        let shift = ClickEvent::with_modifiers(Modifiers::SHIFT);
        tree.handle_click(&"two", &shift);
        assert_eq!(tree.selection().as_slice(), &["two"]);
        // The clicked node became the anchor.
        tree.handle_click(&"three", &shift);
        assert_eq!(tree.selection().as_slice(), &["two", "three"]);
    }

    #[test]
    fn collapse_with_cyclic_parent_chain_terminates() {
        let props = TreeViewProps {
            default_expanded: vec!["b"],
            ..TreeViewProps::default()
        };
        let mut tree = build(props, &[("b", None), ("c", Some("b"))]);
        tree.register_node("a", Some("a"), (), 0);
        tree.commit();
        let ev = TreeEvent::Programmatic;
        assert!(tree.dispatch(FocusCommand::Node("a").into(), &ev));
        assert!(tree.dispatch(ToggleCommand::Node("b").into(), &ev));
        tree.commit();
        assert!(!tree.is_expanded(&"b"));
        assert_eq!(tree.focused(), Some(&"a"));
        assert_eq!(tree.visible_nodes(), &["b"]);
    }

    #[test]
    fn mouse_ctrl_and_meta_add_to_selection() {
        for modifier in [Modifiers::CTRL, Modifiers::META] {
            let props = TreeViewProps {
                multi_select: true,
                ..TreeViewProps::default()
            };
            let mut tree = build(props, &[("one", None), ("two", None)]);
            tree.handle_click(&"one", &ClickEvent::default());
            tree.handle_click(&"two", &ClickEvent::with_modifiers(modifier));
            assert!(tree.is_selected(&"one"));
            assert!(tree.is_selected(&"two"));
        }
    }

    #[test]
    fn key_events_need_a_focused_node() {
        let mut tree = build(TreeViewProps::default(), &NESTED);
        assert!(!tree.handle_key_down(&KeyEvent::new(Key::ArrowDown)));
        assert_eq!(tree.tabbable(), Some(&"one"));
    }
}
