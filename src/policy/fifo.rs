//! First In, First Out (FIFO) replacement policy.
//!
//! Entries are ordered by arrival only. Reads never reorder, and overwriting
//! an existing key updates its value in place without moving it; those two
//! properties are what distinguish FIFO from LRU on mixed traces.
//!
//! ```text
//!   front ──► [A] ──► [B] ──► [C] ◄── back
//!           oldest            newest
//!
//!   get(A):  lookup only, order unchanged
//!   put(D):  evict front if full, append D at back
//!   put(B):  update value in place, keep arrival position
//! ```

use crate::ds::KeyedList;
use crate::step::CacheEntry;

/// FIFO cache of fixed capacity over string keys and values.
///
/// # Example
///
/// ```
/// use cachesim::policy::fifo::FifoPolicy;
///
/// let mut cache = FifoPolicy::new(2);
/// cache.put("a", "1");
/// cache.put("b", "2");
///
/// // A read does not protect "a" from eviction.
/// assert_eq!(cache.get("a"), Some("1"));
/// assert_eq!(cache.put("c", "3"), Some("a".to_string()));
/// ```
#[derive(Debug)]
pub struct FifoPolicy {
    // Arrival order: front = oldest, back = newest.
    list: KeyedList<String>,
    capacity: usize,
}

impl FifoPolicy {
    /// Creates a FIFO cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: KeyedList::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the stored value without touching arrival order.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        self.list.payload(key).map(String::as_str)
    }

    /// Inserts or updates `key`; returns the evicted key, if any.
    ///
    /// An overwrite keeps the key's arrival position and never evicts.
    pub fn put(&mut self, key: &str, value: &str) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(stored) = self.list.payload_mut(key) {
            *stored = value.to_string();
            return None;
        }

        let evicted = if self.list.len() >= self.capacity {
            self.list.pop_front().map(|(victim, _)| victim)
        } else {
            None
        };
        self.list.push_back(key.to_string(), value.to_string());
        evicted
    }

    /// Resident entries in arrival order, oldest first.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        self.list
            .iter()
            .map(|(key, value)| CacheEntry::new(key, value.as_str()))
            .collect()
    }

    pub fn is_resident(&self, key: &str) -> bool {
        self.list.contains(key)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert!(self.list.len() <= self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_keys(cache: &FifoPolicy) -> Vec<String> {
        cache.snapshot().into_iter().map(|e| e.key).collect()
    }

    #[test]
    fn fifo_snapshot_is_arrival_order() {
        let mut cache = FifoPolicy::new(3);
        cache.put("a", "1");
        cache.put("b", "2");
        cache.put("c", "3");
        assert_eq!(snapshot_keys(&cache), vec!["a", "b", "c"]);
    }

    #[test]
    fn fifo_get_does_not_reorder() {
        let mut cache = FifoPolicy::new(2);
        cache.put("a", "1");
        cache.put("b", "2");
        assert_eq!(cache.get("a"), Some("1"));

        // "a" is still the oldest and still the victim.
        assert_eq!(cache.put("c", "3"), Some("a".to_string()));
        assert_eq!(snapshot_keys(&cache), vec!["b", "c"]);
        cache.debug_validate_invariants();
    }

    #[test]
    fn fifo_overwrite_keeps_position_and_never_evicts() {
        let mut cache = FifoPolicy::new(2);
        cache.put("a", "1");
        cache.put("b", "2");
        assert_eq!(cache.put("a", "1b"), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(snapshot_keys(&cache), vec!["a", "b"]);
        assert_eq!(cache.get("a"), Some("1b"));

        // "a" kept its arrival slot, so it is still evicted first.
        assert_eq!(cache.put("c", "3"), Some("a".to_string()));
    }

    #[test]
    fn fifo_evicts_oldest_on_full_insert() {
        let mut cache = FifoPolicy::new(2);
        cache.put("a", "1");
        cache.put("b", "2");
        assert_eq!(cache.put("c", "3"), Some("a".to_string()));
        assert_eq!(cache.put("d", "4"), Some("b".to_string()));
        assert_eq!(snapshot_keys(&cache), vec!["c", "d"]);
    }

    #[test]
    fn fifo_capacity_zero_rejects_inserts() {
        let mut cache = FifoPolicy::new(0);
        assert_eq!(cache.put("a", "1"), None);
        assert!(cache.is_empty());
        assert!(!cache.is_resident("a"));
    }
}
