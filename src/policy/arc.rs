//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! ARC balances recency against frequency by splitting the resident cache
//! into two lists and shadowing each with a ghost list of recently evicted
//! keys. Ghost hits tune a target size `p` for the recency half, so the
//! policy adapts to the workload without manual configuration.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                            ArcPolicy                                 │
//! │                                                                      │
//! │   T1 (seen once)                   T2 (seen twice or more)           │
//! │   ┌─────────────────────┐          ┌─────────────────────┐           │
//! │   │ MRU            LRU  │          │ MRU            LRU  │           │
//! │   │ [new] ◄──► [older]──┼─evict──┐ │ [hot] ◄──► [cooler]─┼─evict──┐  │
//! │   └─────────────────────┘        │ └─────────────────────┘        │  │
//! │                                  ▼                                ▼  │
//! │   B1 (ghosts of T1)              B2 (ghosts of T2)                   │
//! │   ┌─────────────────────┐        ┌─────────────────────┐             │
//! │   │ keys only           │        │ keys only           │             │
//! │   └─────────────────────┘        └─────────────────────┘             │
//! │                                                                      │
//! │   values: FxHashMap over T1 ∪ T2 ∪ B1 ∪ B2                           │
//! │   p: target size for T1    hit in B1 → p += 1;  hit in B2 → p -= 1   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification
//!
//! Every operation on key `k` falls into one of four cases:
//!
//! | Case | Where `k` is     | Action                                          |
//! |------|------------------|-------------------------------------------------|
//! | I    | T1 or T2         | true hit; move to MRU of T2                     |
//! | II   | B1               | `p += 1` (clamped to capacity); replace; B1 → T2 |
//! | III  | B2               | `p -= 1` (floored at 0); replace; B2 → T2       |
//! | IV   | nowhere          | replace; insert at MRU of T1; trim ghosts       |
//!
//! The `±1` adaptation is deliberate (the proportional deltas of the
//! original ARC paper are not used here), and ghost transitions fire on
//! `get` as well as `put`: a GET against a ghost key adapts `p` and promotes
//! the key back into T2 even though the caller sees a miss. That
//! read-mutates-state behavior is the defining property of the adaptive
//! policy and is relied on by the driver's hit accounting, which asks
//! [`ArcPolicy::is_resident`] *before* calling [`ArcPolicy::get`].
//!
//! ## Replacement
//!
//! When `|T1| + |T2| >= capacity`, `replace` demotes one resident key to its
//! ghost list: the LRU of T1 if T1 is non-empty and (the access was a B2
//! ghost hit or `|T1| > p`), otherwise the LRU of T2. Ghost bookkeeping is
//! capped by the combined bound `|T1|+|T2|+|B1|+|B2| <= 2 * capacity`,
//! dropping B1's LRU first, then B2's.
//!
//! Values for ghost keys are retained so a ghost promotion can restore the
//! entry, but they are unreachable through `get` until the key is resident
//! again.

use rustc_hash::FxHashMap;

use crate::ds::KeyedList;
use crate::step::{ArcSets, CacheEntry, Step};

/// Which of the four ARC lists currently holds a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    T1,
    T2,
    B1,
    B2,
}

/// ARC cache of fixed capacity over string keys and values.
///
/// # Example
///
/// ```
/// use cachesim::policy::arc::ArcPolicy;
///
/// let mut cache = ArcPolicy::new(2);
/// cache.put("a", "1");
/// cache.put("b", "2");
/// cache.put("c", "3"); // "a" demoted to the B1 ghost list
/// assert!(!cache.is_resident("a"));
///
/// // Ghost hit: "a" returns to the frequency side and p moves toward
/// // recency, but the caller still sees a miss.
/// assert_eq!(cache.get("a"), None);
/// assert!(cache.is_resident("a"));
/// assert_eq!(cache.p(), 1);
/// ```
#[derive(Debug)]
pub struct ArcPolicy {
    t1: KeyedList<()>,
    t2: KeyedList<()>,
    b1: KeyedList<()>,
    b2: KeyedList<()>,
    /// Values for every key in T1 ∪ T2 ∪ B1 ∪ B2. Ghost values are never
    /// returned from `get`.
    values: FxHashMap<String, String>,
    /// Target size for T1, in `[0, capacity]`.
    p: usize,
    capacity: usize,
}

impl ArcPolicy {
    /// Creates an ARC cache holding at most `capacity` resident entries.
    ///
    /// The adaptation target `p` starts at 0 (pure frequency preference)
    /// and is tuned by ghost hits.
    pub fn new(capacity: usize) -> Self {
        Self {
            t1: KeyedList::with_capacity(capacity),
            t2: KeyedList::with_capacity(capacity),
            b1: KeyedList::with_capacity(capacity),
            b2: KeyedList::with_capacity(capacity),
            values: FxHashMap::default(),
            p: 0,
            capacity,
        }
    }

    /// Returns the stored value for a resident key, promoting it to the MRU
    /// of T2. A ghost hit adapts `p` and promotes the key but returns `None`.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        match self.locate(key) {
            Some(Location::T1) => {
                self.t1.remove(key);
                self.t2.push_front(key.to_string(), ());
                self.values.get(key).map(String::as_str)
            }
            Some(Location::T2) => {
                self.t2.move_to_front(key);
                self.values.get(key).map(String::as_str)
            }
            Some(Location::B1) => {
                self.ghost_hit_b1(key);
                None
            }
            Some(Location::B2) => {
                self.ghost_hit_b2(key);
                None
            }
            None => None,
        }
    }

    /// Inserts or updates `key`; returns the key evicted from the resident
    /// cache, if any.
    pub fn put(&mut self, key: &str, value: &str) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }

        match self.locate(key) {
            Some(Location::T1) => {
                self.values.insert(key.to_string(), value.to_string());
                self.t1.remove(key);
                self.t2.push_front(key.to_string(), ());
                None
            }
            Some(Location::T2) => {
                self.values.insert(key.to_string(), value.to_string());
                self.t2.move_to_front(key);
                None
            }
            Some(Location::B1) => {
                self.values.insert(key.to_string(), value.to_string());
                self.ghost_hit_b1(key)
            }
            Some(Location::B2) => {
                self.values.insert(key.to_string(), value.to_string());
                self.ghost_hit_b2(key)
            }
            None => {
                self.values.insert(key.to_string(), value.to_string());
                let evicted = if self.resident_len() >= self.capacity {
                    self.replace(false)
                } else {
                    None
                };
                self.t1.push_front(key.to_string(), ());
                self.enforce_ghost_cap();
                evicted
            }
        }
    }

    /// Resident entries: T2 (MRU first) followed by T1 (MRU first).
    /// Ghosts are not included.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        let mut out = Vec::with_capacity(self.resident_len());
        for key in self.t2.keys().chain(self.t1.keys()) {
            let value = self
                .values
                .get(key)
                .expect("resident key missing from value map");
            out.push(CacheEntry::new(key, value.as_str()));
        }
        out
    }

    /// `true` iff the key is in T1 or T2. Ghost keys are not resident.
    pub fn is_resident(&self, key: &str) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    /// Fills `meta.arc_sets` with copies of the four lists and `p`.
    pub fn describe_meta(&self, step: &mut Step) {
        step.meta.arc_sets = Some(ArcSets {
            t1: self.t1.keys().map(str::to_owned).collect(),
            t2: self.t2.keys().map(str::to_owned).collect(),
            b1: self.b1.keys().map(str::to_owned).collect(),
            b2: self.b2.keys().map(str::to_owned).collect(),
            p: self.p,
        });
    }

    /// The current target size for T1.
    pub fn p(&self) -> usize {
        self.p
    }

    pub fn len(&self) -> usize {
        self.resident_len()
    }

    pub fn is_empty(&self) -> bool {
        self.t1.is_empty() && self.t2.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident_len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn locate(&self, key: &str) -> Option<Location> {
        if self.t1.contains(key) {
            Some(Location::T1)
        } else if self.t2.contains(key) {
            Some(Location::T2)
        } else if self.b1.contains(key) {
            Some(Location::B1)
        } else if self.b2.contains(key) {
            Some(Location::B2)
        } else {
            None
        }
    }

    /// Case II: B1 ghost hit. Returns the internally demoted key, if any.
    fn ghost_hit_b1(&mut self, key: &str) -> Option<String> {
        self.p = (self.p + 1).min(self.capacity);
        let evicted = if self.resident_len() >= self.capacity {
            self.replace(false)
        } else {
            None
        };
        self.b1.remove(key);
        self.t2.push_front(key.to_string(), ());
        evicted
    }

    /// Case III: B2 ghost hit. Returns the internally demoted key, if any.
    fn ghost_hit_b2(&mut self, key: &str) -> Option<String> {
        self.p = self.p.saturating_sub(1);
        let evicted = if self.resident_len() >= self.capacity {
            self.replace(true)
        } else {
            None
        };
        self.b2.remove(key);
        self.t2.push_front(key.to_string(), ());
        evicted
    }

    /// Demotes one resident key to its ghost list and returns it.
    ///
    /// The victim's value stays in the value map: it is now a ghost value,
    /// reachable again only through a later ghost promotion.
    fn replace(&mut self, in_b2: bool) -> Option<String> {
        let from_t1 = if self.t1.is_empty() {
            false
        } else if in_b2 || self.t1.len() > self.p {
            true
        } else {
            // T1 within target but T2 has nothing to give.
            self.t2.is_empty()
        };

        if from_t1 {
            let (victim, ()) = self.t1.pop_back()?;
            self.b1.push_front(victim.clone(), ());
            Some(victim)
        } else {
            let (victim, ()) = self.t2.pop_back()?;
            self.b2.push_front(victim.clone(), ());
            Some(victim)
        }
    }

    /// Drops ghost LRUs (B1 first, then B2) until the combined bound
    /// `|T1|+|T2|+|B1|+|B2| <= 2 * capacity` holds again.
    fn enforce_ghost_cap(&mut self) {
        while self.resident_len() + self.b1.len() + self.b2.len() > 2 * self.capacity {
            let dropped = if !self.b1.is_empty() {
                self.b1.pop_back()
            } else {
                self.b2.pop_back()
            };
            match dropped {
                Some((key, ())) => {
                    self.values.remove(&key);
                }
                None => break,
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        use std::collections::HashSet;

        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();

        assert!(self.resident_len() <= self.capacity);
        assert!(
            self.resident_len() + self.b1.len() + self.b2.len() <= 2 * self.capacity,
            "combined list size exceeds 2 * capacity"
        );
        assert!(self.p <= self.capacity);

        let mut seen: HashSet<&str> = HashSet::new();
        for list in [&self.t1, &self.t2, &self.b1, &self.b2] {
            for key in list.keys() {
                assert!(seen.insert(key), "key {key:?} appears in two ARC lists");
            }
        }

        assert_eq!(seen.len(), self.values.len());
        for key in self.values.keys() {
            assert!(seen.contains(key.as_str()), "orphaned value for {key:?}");
        }
    }
}
