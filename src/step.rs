//! Value types shared by the driver, the policies, and the request boundary:
//! the per-operation [`Step`] record, its policy-shaped metadata, and the
//! aggregate [`Stats`] counters.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Kind of a trace operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpKind {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "PUT")]
    Put,
}

impl OpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Get => "GET",
            OpKind::Put => "PUT",
        }
    }
}

/// One resident `(key, value)` pair in a cache snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Copies of the four ARC lists (each MRU first) and the current target `p`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArcSets {
    pub t1: Vec<String>,
    pub t2: Vec<String>,
    pub b1: Vec<String>,
    pub b2: Vec<String>,
    pub p: usize,
}

/// Policy-shaped step metadata: LFU fills `freq`, ARC fills `arc_sets`,
/// the others leave both empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepMeta {
    pub freq: FxHashMap<String, u64>,
    pub arc_sets: Option<ArcSets>,
}

/// The immutable record of one applied trace operation.
///
/// `cache` is the full ordered resident contents *after* the operation, in
/// each policy's display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub index: u32,
    pub op: OpKind,
    pub key: String,
    /// Echo of the operation's value; empty for GET.
    pub value: String,
    pub hit: bool,
    pub evicted: Option<String>,
    pub cache: Vec<CacheEntry>,
    pub meta: StepMeta,
}

/// Aggregate counters for one simulation run.
///
/// Ghost hits in ARC count as misses here even though they mutate policy
/// state; PUTs never touch `hits`/`misses`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Stats {
    /// `hits / (hits + misses)`, or `0.0` before any GET has run.
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::step::Stats;
    ///
    /// let stats = Stats { hits: 3, misses: 1, evictions: 0 };
    /// assert_eq!(stats.hit_ratio(), 0.75);
    /// assert_eq!(Stats::default().hit_ratio(), 0.0);
    /// ```
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
