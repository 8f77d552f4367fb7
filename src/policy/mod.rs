//! Replacement policies behind one closed interface.
//!
//! The four policies share the same five operations but keep entirely
//! different private state, so the driver holds them through the [`Policy`]
//! enum: a closed sum type rather than a trait object, which keeps dispatch
//! static and the set of policies explicit.
//!
//! | Policy | Evicts                                   | Display order              |
//! |--------|------------------------------------------|----------------------------|
//! | LRU    | least recently used                      | MRU first                  |
//! | FIFO   | oldest arrival                           | arrival order              |
//! | LFU    | least frequent, LRU within the tie       | descending frequency       |
//! | ARC    | adaptive between recency and frequency   | T2 then T1, MRU first      |

pub mod arc;
pub mod fifo;
pub mod lfu;
pub mod lru;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;
use crate::step::{CacheEntry, Step};

pub use arc::ArcPolicy;
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

/// Identifier of a replacement policy.
///
/// Parses from the uppercase wire names used in simulation requests.
///
/// # Example
///
/// ```
/// use cachesim::policy::PolicyKind;
///
/// assert_eq!("ARC".parse::<PolicyKind>(), Ok(PolicyKind::Arc));
/// assert!("arc".parse::<PolicyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolicyKind {
    #[serde(rename = "LRU")]
    Lru,
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "LFU")]
    Lfu,
    #[serde(rename = "ARC")]
    Arc,
}

impl PolicyKind {
    /// All supported kinds, in canonical order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Lru,
        PolicyKind::Fifo,
        PolicyKind::Lfu,
        PolicyKind::Arc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "LRU",
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lfu => "LFU",
            PolicyKind::Arc => "ARC",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LRU" => Ok(PolicyKind::Lru),
            "FIFO" => Ok(PolicyKind::Fifo),
            "LFU" => Ok(PolicyKind::Lfu),
            "ARC" => Ok(PolicyKind::Arc),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// A replacement policy of fixed capacity, one of the four variants.
///
/// Constructed per simulation run and owned exclusively by its driver.
///
/// # Example
///
/// ```
/// use cachesim::policy::{Policy, PolicyKind};
///
/// let mut policy = Policy::new(PolicyKind::Lru, 2);
/// policy.put("a", "1");
/// assert!(policy.is_resident("a"));
/// assert_eq!(policy.get("a"), Some("1"));
/// ```
#[derive(Debug)]
pub enum Policy {
    Lru(LruPolicy),
    Fifo(FifoPolicy),
    Lfu(LfuPolicy),
    Arc(ArcPolicy),
}

impl Policy {
    /// Creates a policy of the given kind and capacity.
    pub fn new(kind: PolicyKind, capacity: usize) -> Self {
        match kind {
            PolicyKind::Lru => Policy::Lru(LruPolicy::new(capacity)),
            PolicyKind::Fifo => Policy::Fifo(FifoPolicy::new(capacity)),
            PolicyKind::Lfu => Policy::Lfu(LfuPolicy::new(capacity)),
            PolicyKind::Arc => Policy::Arc(ArcPolicy::new(capacity)),
        }
    }

    /// Which policy this is.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Lru(_) => PolicyKind::Lru,
            Policy::Fifo(_) => PolicyKind::Fifo,
            Policy::Lfu(_) => PolicyKind::Lfu,
            Policy::Arc(_) => PolicyKind::Arc,
        }
    }

    /// Returns the stored value iff `key` was resident before the call;
    /// updates recency/frequency state per policy. For ARC, a `None` result
    /// may still have mutated ghost state.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        match self {
            Policy::Lru(p) => p.get(key),
            Policy::Fifo(p) => p.get(key),
            Policy::Lfu(p) => p.get(key),
            Policy::Arc(p) => p.get(key),
        }
    }

    /// Inserts or updates `key`; returns the key evicted from the main
    /// cache, if any. At most one key is evicted per call.
    pub fn put(&mut self, key: &str, value: &str) -> Option<String> {
        match self {
            Policy::Lru(p) => p.put(key, value),
            Policy::Fifo(p) => p.put(key, value),
            Policy::Lfu(p) => p.put(key, value),
            Policy::Arc(p) => p.put(key, value),
        }
    }

    /// All resident entries in the policy's display order. No side effects.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        match self {
            Policy::Lru(p) => p.snapshot(),
            Policy::Fifo(p) => p.snapshot(),
            Policy::Lfu(p) => p.snapshot(),
            Policy::Arc(p) => p.snapshot(),
        }
    }

    /// `true` iff `key` is in the main cache. Never mutates; the driver
    /// calls this *before* `get` to separate true hits from ghost hits.
    pub fn is_resident(&self, key: &str) -> bool {
        match self {
            Policy::Lru(p) => p.is_resident(key),
            Policy::Fifo(p) => p.is_resident(key),
            Policy::Lfu(p) => p.is_resident(key),
            Policy::Arc(p) => p.is_resident(key),
        }
    }

    /// Fills the policy-shaped fields of a step record.
    pub fn describe_meta(&self, step: &mut Step) {
        match self {
            Policy::Lru(_) | Policy::Fifo(_) => {}
            Policy::Lfu(p) => p.describe_meta(step),
            Policy::Arc(p) => p.describe_meta(step),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Policy::Lru(p) => p.len(),
            Policy::Fifo(p) => p.len(),
            Policy::Lfu(p) => p.len(),
            Policy::Arc(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match self {
            Policy::Lru(p) => p.capacity(),
            Policy::Fifo(p) => p.capacity(),
            Policy::Lfu(p) => p.capacity(),
            Policy::Arc(p) => p.capacity(),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        match self {
            Policy::Lru(p) => p.debug_validate_invariants(),
            Policy::Fifo(p) => p.debug_validate_invariants(),
            Policy::Lfu(p) => p.debug_validate_invariants(),
            Policy::Arc(p) => p.debug_validate_invariants(),
        }
    }
}
