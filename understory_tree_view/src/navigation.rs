// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation queries over the visible node sequence.
//!
//! These never move focus themselves. [`TreeView`](crate::TreeView) resolves a
//! target here and then focuses it. Ids missing from the sequence resolve to `None`.

use core::fmt::Debug;
use core::hash::Hash;

use crate::registry::Registry;

/// Node after `id` in `visible`. No wraparound.
pub fn next<'a, K: PartialEq>(visible: &'a [K], id: &K) -> Option<&'a K> {
    let at = visible.iter().position(|k| k == id)?;
    visible.get(at + 1)
}

/// Node before `id` in `visible`. No wraparound.
pub fn previous<'a, K: PartialEq>(visible: &'a [K], id: &K) -> Option<&'a K> {
    let at = visible.iter().position(|k| k == id)?;
    at.checked_sub(1).and_then(|i| visible.get(i))
}

/// First visible node.
pub fn first<K>(visible: &[K]) -> Option<&K> {
    visible.first()
}

/// Last visible node.
pub fn last<K>(visible: &[K]) -> Option<&K> {
    visible.last()
}

/// Type-ahead search.
///
/// Candidates are the visible nodes that have a recorded first character. The
/// search starts strictly after `id` among the candidates and wraps to the start
/// when nothing matches, so repeated presses of one character cycle through every
/// node sharing it. Matching is case-insensitive.
pub fn find_by_first_char<'a, K, L>(
    visible: &'a [K],
    registry: &Registry<K, L>,
    id: &K,
    ch: char,
) -> Option<&'a K>
where
    K: Clone + Eq + Hash + Debug,
{
    let needle = ch.to_lowercase().next().unwrap_or(ch);
    let candidates: alloc::vec::Vec<(&K, char)> = visible
        .iter()
        .filter_map(|k| registry.first_char(k).map(|c| (k, c)))
        .collect();
    let start = candidates
        .iter()
        .position(|(k, _)| *k == id)
        .map_or(0, |i| i + 1);

    candidates
        .iter()
        .skip(start)
        .chain(candidates.iter())
        .find(|(_, c)| *c == needle)
        .map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(labels: &[&'static str]) -> Registry<&'static str, ()> {
        let mut r = Registry::new();
        for label in labels {
            let index = r.next_order_index(None);
            r.register(*label, None, (), index);
            if let Some(c) = label.chars().next() {
                r.map_first_char(label, c);
            }
        }
        r
    }

    #[test]
    fn adjacent_nodes_do_not_wrap() {
        let visible = ["one", "two", "three"];
        assert_eq!(next(&visible, &"one"), Some(&"two"));
        assert_eq!(next(&visible, &"three"), None);
        assert_eq!(previous(&visible, &"one"), None);
        assert_eq!(previous(&visible, &"three"), Some(&"two"));
        assert_eq!(next(&visible, &"missing"), None);
        assert_eq!(first(&visible), Some(&"one"));
        assert_eq!(last(&visible), Some(&"three"));
        assert_eq!(first::<&str>(&[]), None);
    }

    #[test]
    fn type_ahead_cycles_and_wraps() {
        let r = flat(&["one", "two", "three", "four"]);
        let visible = ["one", "two", "three", "four"];
        assert_eq!(find_by_first_char(&visible, &r, &"one", 't'), Some(&"two"));
        assert_eq!(find_by_first_char(&visible, &r, &"two", 't'), Some(&"three"));
        assert_eq!(find_by_first_char(&visible, &r, &"three", 'T'), Some(&"two"));
        assert_eq!(find_by_first_char(&visible, &r, &"two", 'f'), Some(&"four"));
        assert_eq!(find_by_first_char(&visible, &r, &"four", 'o'), Some(&"one"));
        assert_eq!(find_by_first_char(&visible, &r, &"four", 'z'), None);
    }

    #[test]
    fn type_ahead_skips_hidden_and_unlabelled_nodes() {
        let mut r = flat(&["apple", "avocado"]);
        let index = r.next_order_index(None);
        r.register("blank", None, (), index);
        // "avocado" is registered but not in the visible sequence.
        let visible = ["apple", "blank"];
        assert_eq!(find_by_first_char(&visible, &r, &"apple", 'a'), Some(&"apple"));
        assert_eq!(find_by_first_char(&visible, &r, &"blank", 'b'), None);
    }
}
