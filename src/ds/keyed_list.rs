//! Key-indexed doubly linked list backed by [`SlotArena`].
//!
//! The single ordering structure behind every policy in this crate: an LRU
//! recency list (front = MRU), a FIFO arrival queue (front = oldest), and the
//! four ARC lists are all `KeyedList`s differing only in which end gets
//! pushed and popped.
//!
//! ```text
//!   index: FxHashMap<String, SlotId>        arena: SlotArena<Node<P>>
//!   ┌───────────┬──────────┐
//!   │    key    │  SlotId  │    head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!   ├───────────┼──────────┤
//!   │   "A"     │   id_0   │──► node A
//!   │   "B"     │   id_1   │──► node B
//!   │   "C"     │   id_2   │──► node C
//!   └───────────┴──────────┘
//! ```
//!
//! Nodes live in the arena and link to each other by `SlotId`, so the key
//! index never holds a handle that a neighboring splice could invalidate.
//! `push_front` / `push_back` / `move_to_front` / `pop_front` / `pop_back` /
//! `remove` are all O(1) average.

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<P> {
    key: String,
    payload: P,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Ordered sequence of `(key, payload)` entries with O(1) lookup by key.
///
/// Keys are unique: pushing a key that is already present is a logic error
/// (callers check `contains` first; debug builds assert).
#[derive(Debug)]
pub struct KeyedList<P> {
    arena: SlotArena<Node<P>>,
    index: FxHashMap<String, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<P> KeyedList<P> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            index: FxHashMap::default(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the payload stored for `key`, if present.
    pub fn payload(&self, key: &str) -> Option<&P> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| &node.payload)
    }

    /// Returns a mutable reference to the payload for `key`, if present.
    pub fn payload_mut(&mut self, key: &str) -> Option<&mut P> {
        let id = *self.index.get(key)?;
        self.arena.get_mut(id).map(|node| &mut node.payload)
    }

    /// Returns the key at the front, if any.
    pub fn front_key(&self) -> Option<&str> {
        self.head
            .and_then(|id| self.arena.get(id))
            .map(|node| node.key.as_str())
    }

    /// Returns the key at the back, if any.
    pub fn back_key(&self) -> Option<&str> {
        self.tail
            .and_then(|id| self.arena.get(id))
            .map(|node| node.key.as_str())
    }

    /// Inserts a new entry at the front. The key must not be present.
    pub fn push_front(&mut self, key: String, payload: P) {
        debug_assert!(!self.index.contains_key(&key), "duplicate key in KeyedList");
        let id = self.arena.insert(Node {
            key: key.clone(),
            payload,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.attach_front(id);
    }

    /// Inserts a new entry at the back. The key must not be present.
    pub fn push_back(&mut self, key: String, payload: P) {
        debug_assert!(!self.index.contains_key(&key), "duplicate key in KeyedList");
        let id = self.arena.insert(Node {
            key: key.clone(),
            payload,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.attach_back(id);
    }

    /// Moves an existing entry to the front; returns `false` if absent.
    pub fn move_to_front(&mut self, key: &str) -> bool {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => return false,
        };
        if Some(id) != self.head {
            self.detach(id);
            self.attach_front(id);
        }
        true
    }

    /// Removes and returns the front entry.
    pub fn pop_front(&mut self) -> Option<(String, P)> {
        let id = self.head?;
        self.detach(id);
        let node = self.arena.remove(id)?;
        self.index.remove(&node.key);
        Some((node.key, node.payload))
    }

    /// Removes and returns the back entry.
    pub fn pop_back(&mut self) -> Option<(String, P)> {
        let id = self.tail?;
        self.detach(id);
        let node = self.arena.remove(id)?;
        self.index.remove(&node.key);
        Some((node.key, node.payload))
    }

    /// Removes the entry for `key` and returns its payload, if present.
    pub fn remove(&mut self, key: &str) -> Option<P> {
        let id = self.index.remove(key)?;
        self.detach(id);
        self.arena.remove(id).map(|node| node.payload)
    }

    /// Iterates front-to-back over `(key, payload)` pairs.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Iterates front-to-back over keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_id) => {
                if let Some(old_node) = self.arena.get_mut(old_id) {
                    old_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(old_id) => {
                if let Some(old_node) = self.arena.get_mut(old_id) {
                    old_node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.arena.debug_validate_invariants();
        assert_eq!(self.index.len(), self.arena.len());

        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev);
            assert_eq!(self.index.get(&node.key), Some(&id));
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }
        assert_eq!(count, self.len());
    }
}

impl<P> Default for KeyedList<P> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, P> {
    list: &'a KeyedList<P>,
    current: Option<SlotId>,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = (&'a str, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((node.key.as_str(), &node.payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_front_to_back(list: &KeyedList<i32>) -> Vec<String> {
        list.keys().map(str::to_owned).collect()
    }

    #[test]
    fn keyed_list_basic_ops() {
        let mut list = KeyedList::new();
        list.push_front("a".to_string(), 1);
        list.push_back("b".to_string(), 2);
        list.push_back("c".to_string(), 3);

        assert_eq!(list.front_key(), Some("a"));
        assert_eq!(list.back_key(), Some("c"));
        assert_eq!(list.len(), 3);
        assert_eq!(list.payload("b"), Some(&2));

        assert!(list.move_to_front("c"));
        assert_eq!(list.front_key(), Some("c"));
        assert_eq!(list.back_key(), Some("b"));

        assert_eq!(list.remove("a"), Some(1));
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_front(), Some(("c".to_string(), 3)));
        assert_eq!(list.pop_back(), Some(("b".to_string(), 2)));
        assert!(list.is_empty());
        assert!(!list.contains("a"));
    }

    #[test]
    fn keyed_list_iter_order() {
        let mut list = KeyedList::new();
        list.push_back("x".to_string(), 1);
        list.push_back("y".to_string(), 2);
        list.push_back("z".to_string(), 3);
        assert_eq!(keys_front_to_back(&list), vec!["x", "y", "z"]);

        list.move_to_front("z");
        assert_eq!(keys_front_to_back(&list), vec!["z", "x", "y"]);
    }

    #[test]
    fn keyed_list_move_to_front_edges() {
        let mut list = KeyedList::new();
        list.push_back("a".to_string(), 1);
        list.push_back("b".to_string(), 2);

        // Front stays front.
        assert!(list.move_to_front("a"));
        assert_eq!(keys_front_to_back(&list), vec!["a", "b"]);

        assert!(!list.move_to_front("missing"));
        list.debug_validate_invariants();
    }

    #[test]
    fn keyed_list_remove_middle_and_ends() {
        let mut list = KeyedList::new();
        list.push_back("a".to_string(), 1);
        list.push_back("b".to_string(), 2);
        list.push_back("c".to_string(), 3);

        assert_eq!(list.remove("b"), Some(2));
        assert_eq!(keys_front_to_back(&list), vec!["a", "c"]);

        assert_eq!(list.remove("a"), Some(1));
        assert_eq!(list.front_key(), Some("c"));
        assert_eq!(list.back_key(), Some("c"));

        assert_eq!(list.remove("c"), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.front_key(), None);
        assert_eq!(list.back_key(), None);
    }

    #[test]
    fn keyed_list_payload_mut_updates_value() {
        let mut list = KeyedList::new();
        list.push_back("k".to_string(), 10);
        if let Some(value) = list.payload_mut("k") {
            *value = 20;
        }
        assert_eq!(list.payload("k"), Some(&20));
    }

    #[test]
    fn keyed_list_clear_resets_state() {
        let mut list = KeyedList::new();
        list.push_back("a".to_string(), 1);
        list.push_back("b".to_string(), 2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        list.debug_validate_invariants();
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    proptest! {
        /// Invariants hold after any sequence of operations.
        #[test]
        fn prop_invariants_always_hold(
            ops in prop::collection::vec((0u8..4, 0u32..16), 0..60)
        ) {
            let mut list: KeyedList<u32> = KeyedList::new();
            for (op, key) in ops {
                let key = format!("k{key}");
                match op % 4 {
                    0 => {
                        if !list.contains(&key) {
                            list.push_front(key, 0);
                        }
                    }
                    1 => {
                        if !list.contains(&key) {
                            list.push_back(key, 0);
                        }
                    }
                    2 => { list.move_to_front(&key); }
                    3 => { list.remove(&key); }
                    _ => unreachable!(),
                }
                list.debug_validate_invariants();
            }
        }

        /// Behavior matches a reference VecDeque model under MRU discipline:
        /// re-pushing an existing key moves it to the front.
        #[test]
        fn prop_matches_reference_mru_model(
            keys in prop::collection::vec(0u32..20, 0..60)
        ) {
            let mut list: KeyedList<u32> = KeyedList::new();
            let mut reference: VecDeque<String> = VecDeque::new();

            for key in keys {
                let key = format!("k{key}");
                if list.contains(&key) {
                    list.move_to_front(&key);
                } else {
                    list.push_front(key.clone(), 0);
                }

                if let Some(pos) = reference.iter().position(|k| *k == key) {
                    reference.remove(pos);
                }
                reference.push_front(key);

                prop_assert_eq!(list.len(), reference.len());
                let observed: Vec<&str> = list.keys().collect();
                let expected: Vec<&str> =
                    reference.iter().map(String::as_str).collect();
                prop_assert_eq!(observed, expected);
            }
        }

        /// pop_back always returns the least recently pushed/promoted key.
        #[test]
        fn prop_pop_back_is_lru(
            keys in prop::collection::vec(0u32..10, 1..30)
        ) {
            let mut list: KeyedList<u32> = KeyedList::new();
            let mut reference: VecDeque<String> = VecDeque::new();

            for key in keys {
                let key = format!("k{key}");
                if !list.contains(&key) {
                    list.push_front(key.clone(), 0);
                    reference.push_front(key);
                }
            }

            while let Some((key, _)) = list.pop_back() {
                prop_assert_eq!(Some(key), reference.pop_back());
            }
            prop_assert!(reference.is_empty());
        }
    }
}
