// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node registry: identity → {parent, label, order index}, plus derived orderings.
//!
//! Nodes link to their parent by id, never by pointer, so removing a subtree is a
//! pure map operation. Sibling order comes from the order index handed out by the
//! per-parent position tracker at mount time, with registration sequence as the
//! tie breaker.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::expansion::ExpansionSet;

#[derive(Clone)]
struct NodeEntry<K, L> {
    parent: Option<K>,
    label: L,
    index: usize,
    // Monotonic registration stamp; orders siblings that share an index.
    seq: u64,
}

/// Arena-style map of every mounted tree node.
///
/// The registry is owned by [`TreeView`](crate::TreeView) and mutated only through
/// [`TreeItem`](crate::TreeItem) lifecycle calls. Unknown ids are never an error:
/// lookups return `None` or an empty list.
///
/// ## Example
///
/// ```rust
/// use understory_tree_view::Registry;
///
/// let mut registry: Registry<&str, ()> = Registry::new();
/// let one = registry.next_order_index(None);
/// registry.register("one", None, (), one);
/// let two = registry.next_order_index(Some(&"one"));
/// registry.register("two", Some("one"), (), two);
///
/// assert_eq!(registry.children_of(None), vec!["one"]);
/// assert_eq!(registry.children_of(Some(&"one")), vec!["two"]);
///
/// // Removing a node removes its whole subtree.
/// assert_eq!(registry.unregister(&"one").len(), 2);
/// assert!(registry.is_empty());
/// ```
#[derive(Clone)]
pub struct Registry<K, L> {
    nodes: HashMap<K, NodeEntry<K, L>>,
    first_chars: HashMap<K, char>,
    positions: HashMap<Option<K>, usize>,
    seq: u64,
}

impl<K, L> Debug for Registry<K, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("nodes", &self.nodes.len())
            .field("first_chars", &self.first_chars.len())
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl<K, L> Default for Registry<K, L> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            first_chars: HashMap::new(),
            positions: HashMap::new(),
            seq: 0,
        }
    }
}

impl<K: Clone + Eq + Hash + Debug, L> Registry<K, L> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    /// Hand out the next order index for a child of `parent`.
    ///
    /// Indices follow mount order, not the order the host renders siblings in.
    /// Siblings mounted out of visual order keep the order they mounted in.
    pub fn next_order_index(&mut self, parent: Option<&K>) -> usize {
        let slot = self.positions.entry(parent.cloned()).or_insert(0);
        let index = *slot;
        *slot += 1;
        index
    }

    /// Insert or overwrite the entry for `id`.
    ///
    /// Last write wins. Returns `true` when the tree structure changed: a new node,
    /// or an existing node with a different parent or order index. Replacing only
    /// the label is not a structural change.
    pub fn register(&mut self, id: K, parent: Option<K>, label: L, index: usize) -> bool {
        if let Some(entry) = self.nodes.get_mut(&id)
            && entry.parent == parent
            && entry.index == index
        {
            entry.label = label;
            return false;
        }
        self.seq += 1;
        log::trace!("register {id:?} under {parent:?} at {index}");
        self.nodes.insert(
            id,
            NodeEntry {
                parent,
                label,
                index,
                seq: self.seq,
            },
        );
        true
    }

    /// Remove `id` and every node reachable below it.
    ///
    /// Returns the removed ids, `id` first. Unknown ids yield an empty list.
    pub fn unregister(&mut self, id: &K) -> Vec<K> {
        let mut removed = Vec::new();
        if self.nodes.remove(id).is_none() {
            return removed;
        }
        self.first_chars.remove(id);
        self.positions.remove(&Some(id.clone()));
        removed.push(id.clone());

        let mut cursor = 0;
        while cursor < removed.len() {
            let parent = &removed[cursor];
            let children: Vec<K> = self
                .nodes
                .iter()
                .filter(|(_, e)| e.parent.as_ref() == Some(parent))
                .map(|(k, _)| k.clone())
                .collect();
            for child in children {
                self.nodes.remove(&child);
                self.first_chars.remove(&child);
                self.positions.remove(&Some(child.clone()));
                removed.push(child);
            }
            cursor += 1;
        }
        log::trace!("unregister {id:?} ({} nodes)", removed.len());
        removed
    }

    /// Parent of `id`, or `None` for root-level and unknown nodes.
    pub fn parent_of(&self, id: &K) -> Option<&K> {
        self.nodes.get(id).and_then(|e| e.parent.as_ref())
    }

    /// Returns `true` if `ancestor` is on the parent chain of `id`.
    ///
    /// The walk takes at most one step per registered node, so a cyclic parent
    /// chain ends the search.
    pub fn is_descendant_of(&self, id: &K, ancestor: &K) -> bool {
        let mut cursor = self.parent_of(id);
        for _ in 0..self.nodes.len() {
            match cursor {
                Some(p) if p == ancestor => return true,
                Some(p) => cursor = self.parent_of(p),
                None => return false,
            }
        }
        false
    }

    /// Label payload of `id`.
    pub fn label(&self, id: &K) -> Option<&L> {
        self.nodes.get(id).map(|e| &e.label)
    }

    /// Order index `id` was registered with.
    pub fn order_index(&self, id: &K) -> Option<usize> {
        self.nodes.get(id).map(|e| e.index)
    }

    /// Children of `parent` sorted by order index; `None` yields root-level nodes.
    pub fn children_of(&self, parent: Option<&K>) -> Vec<K> {
        let mut children: Vec<(&K, usize, u64)> = self
            .nodes
            .iter()
            .filter(|(_, e)| e.parent.as_ref() == parent)
            .map(|(k, e)| (k, e.index, e.seq))
            .collect();
        children.sort_by_key(|&(_, index, seq)| (index, seq));
        children.into_iter().map(|(k, _, _)| k.clone()).collect()
    }

    /// Returns `true` if at least one registered node names `id` as its parent.
    pub fn has_children(&self, id: &K) -> bool {
        self.nodes.values().any(|e| e.parent.as_ref() == Some(id))
    }

    /// Record the type-ahead character for `id`, lowercased.
    ///
    /// Ignored for unregistered ids.
    pub fn map_first_char(&mut self, id: &K, ch: char) {
        if !self.nodes.contains_key(id) {
            return;
        }
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        self.first_chars.insert(id.clone(), lower);
    }

    /// Forget the type-ahead character for `id`.
    pub fn unmap_first_char(&mut self, id: &K) {
        self.first_chars.remove(id);
    }

    /// Lowercase type-ahead character of `id`, if one was recorded.
    pub fn first_char(&self, id: &K) -> Option<char> {
        self.first_chars.get(id).copied()
    }
}

/// Depth-first, pre-order sequence of nodes reachable through expanded branches.
///
/// Starts at the root-level nodes and enters a node's children only when the node
/// is in `expanded`. Nodes whose parent is not registered are unreachable.
pub fn derive_visible<K, L>(registry: &Registry<K, L>, expanded: &ExpansionSet<K>) -> Vec<K>
where
    K: Clone + Eq + Hash + Debug,
{
    let mut groups: HashMap<Option<&K>, Vec<(&K, usize, u64)>> = HashMap::new();
    for (id, entry) in &registry.nodes {
        groups
            .entry(entry.parent.as_ref())
            .or_default()
            .push((id, entry.index, entry.seq));
    }
    for siblings in groups.values_mut() {
        siblings.sort_by_key(|&(_, index, seq)| (index, seq));
    }

    let mut out = Vec::with_capacity(registry.len());
    let mut stack: SmallVec<[&K; 32]> = SmallVec::new();
    if let Some(roots) = groups.get(&None) {
        stack.extend(roots.iter().rev().map(|&(k, _, _)| k));
    }
    while let Some(id) = stack.pop() {
        out.push(id.clone());
        if expanded.contains(id)
            && let Some(children) = groups.get(&Some(id))
        {
            stack.extend(children.iter().rev().map(|&(k, _, _)| k));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn mount(r: &mut Registry<&'static str, ()>, id: &'static str, parent: Option<&'static str>) {
        let index = r.next_order_index(parent.as_ref());
        r.register(id, parent, (), index);
    }

    #[test]
    fn children_follow_mount_order() {
        let mut r = Registry::new();
        mount(&mut r, "b", None);
        mount(&mut r, "a", None);
        mount(&mut r, "c", None);
        assert_eq!(r.children_of(None), vec!["b", "a", "c"]);
    }

    #[test]
    fn reregister_identical_is_not_structural() {
        let mut r = Registry::new();
        assert!(r.register("one", None, 1_u8, 0));
        assert!(!r.register("one", None, 2_u8, 0));
        assert_eq!(r.label(&"one"), Some(&2));
        assert!(r.register("one", None, 2_u8, 4));
        assert_eq!(r.order_index(&"one"), Some(4));
    }

    #[test]
    fn unregister_removes_subtree_and_first_chars() {
        let mut r = Registry::new();
        mount(&mut r, "one", None);
        mount(&mut r, "two", Some("one"));
        mount(&mut r, "three", Some("two"));
        mount(&mut r, "four", None);
        r.map_first_char(&"three", 'T');
        assert_eq!(r.first_char(&"three"), Some('t'));

        let removed = r.unregister(&"one");
        assert_eq!(removed, vec!["one", "two", "three"]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.first_char(&"three"), None);
        assert!(r.unregister(&"missing").is_empty());
    }

    #[test]
    fn unregister_drops_child_position_trackers() {
        let mut r = Registry::new();
        mount(&mut r, "one", None);
        mount(&mut r, "two", Some("one"));
        mount(&mut r, "three", Some("two"));
        assert_eq!(r.positions.len(), 3);
        r.unregister(&"one");
        // Only the root-level tracker is left.
        assert_eq!(r.positions.len(), 1);
        assert_eq!(r.next_order_index(Some(&"one")), 0);
    }

    #[test]
    fn ancestor_walk_survives_parent_cycles() {
        let mut r = Registry::new();
        mount(&mut r, "root", None);
        mount(&mut r, "leaf", Some("root"));
        assert!(r.is_descendant_of(&"leaf", &"root"));
        assert!(!r.is_descendant_of(&"root", &"leaf"));

        r.register("self", Some("self"), (), 0);
        r.register("a", Some("b"), (), 0);
        r.register("b", Some("a"), (), 0);
        assert!(!r.is_descendant_of(&"self", &"root"));
        assert!(!r.is_descendant_of(&"a", &"root"));
        assert!(r.is_descendant_of(&"a", &"b"));
    }

    #[test]
    fn unknown_ids_are_inert() {
        let mut r: Registry<&str, ()> = Registry::new();
        assert_eq!(r.parent_of(&"x"), None);
        assert!(r.children_of(Some(&"x")).is_empty());
        assert!(!r.has_children(&"x"));
        r.map_first_char(&"x", 'x');
        assert_eq!(r.first_char(&"x"), None);
    }

    #[test]
    fn visible_enters_only_expanded_branches() {
        let mut r = Registry::new();
        mount(&mut r, "one", None);
        mount(&mut r, "two", Some("one"));
        mount(&mut r, "three", Some("two"));
        mount(&mut r, "four", None);
        mount(&mut r, "five", Some("four"));

        let collapsed = ExpansionSet::new();
        assert_eq!(derive_visible(&r, &collapsed), vec!["one", "four"]);

        let expanded = ExpansionSet::from_ids(vec!["one", "two"]);
        assert_eq!(
            derive_visible(&r, &expanded),
            vec!["one", "two", "three", "four"]
        );

        // An expanded node under a collapsed parent stays hidden.
        let inner_only = ExpansionSet::from_ids(vec!["two"]);
        assert_eq!(derive_visible(&r, &inner_only), vec!["one", "four"]);
    }

    #[test]
    fn orphans_are_not_visible() {
        let mut r = Registry::new();
        mount(&mut r, "one", None);
        mount(&mut r, "lost", Some("ghost"));
        let all = ExpansionSet::from_ids(vec!["ghost", "one"]);
        assert_eq!(derive_visible(&r, &all), vec!["one"]);
    }
}
