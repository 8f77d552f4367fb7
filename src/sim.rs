//! The simulation driver.
//!
//! Threads a parsed trace through one policy, strictly in order, and emits a
//! step record per operation: hit flag, evicted key, the full ordered cache
//! snapshot, and policy metadata. Depending on the mode the log is dense
//! (every step) or sparse (every `snapshot_every`-th step plus the final
//! one); aggregate counters accumulate either way.
//!
//! Hit accounting asks the policy `is_resident` *before* `get`: an ARC ghost
//! hit mutates policy state yet still counts as a miss, because the key was
//! not resident when the operation arrived.

use tracing::{debug, warn};

use crate::policy::Policy;
use crate::step::{OpKind, Stats, Step, StepMeta};
use crate::trace::TraceOp;

/// Dense logging is refused above this many operations; the run is
/// downgraded to sparse snapshots and flagged.
pub const ANIMATE_OP_LIMIT: usize = 20_000;

/// Driver configuration for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub capacity: usize,
    /// Record every step (dense) instead of sparse snapshots.
    pub animate: bool,
    /// Sparse mode records step `i` when `i % snapshot_every == 0`, plus the
    /// final step.
    pub snapshot_every: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: 3,
            animate: true,
            snapshot_every: 1000,
        }
    }
}

/// Everything one run produces. Exactly one of `steps` / `snapshots` is
/// populated, matching the effective mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimResult {
    pub steps: Vec<Step>,
    pub snapshots: Vec<Step>,
    pub stats: Stats,
    /// `true` when an animate run was forced into sparse mode by
    /// [`ANIMATE_OP_LIMIT`].
    pub animate_downgraded: bool,
}

/// Runs `ops` through `policy` and returns the step log and statistics.
///
/// # Example
///
/// ```
/// use cachesim::policy::{Policy, PolicyKind};
/// use cachesim::sim::{run, SimConfig};
/// use cachesim::trace::parse_trace;
///
/// let ops = parse_trace("PUT a 1\nGET a\nGET b\n").operations;
/// let mut policy = Policy::new(PolicyKind::Lru, 2);
/// let cfg = SimConfig { capacity: 2, animate: true, snapshot_every: 1000 };
///
/// let result = run(&ops, &mut policy, &cfg);
/// assert_eq!(result.steps.len(), 3);
/// assert_eq!(result.stats.hits, 1);
/// assert_eq!(result.stats.misses, 1);
/// ```
pub fn run(ops: &[TraceOp], policy: &mut Policy, cfg: &SimConfig) -> SimResult {
    let mut animate = cfg.animate;
    let mut result = SimResult::default();

    if animate && ops.len() > ANIMATE_OP_LIMIT {
        warn!(
            ops = ops.len(),
            limit = ANIMATE_OP_LIMIT,
            "trace too large for a dense step log; downgrading to sparse snapshots"
        );
        animate = false;
        result.animate_downgraded = true;
    }

    let snapshot_every = cfg.snapshot_every.max(1);

    for (i, op) in ops.iter().enumerate() {
        let mut hit = false;
        let mut evicted = None;

        match op.kind {
            OpKind::Get => {
                let was_resident = policy.is_resident(&op.key);
                let found = policy.get(&op.key).is_some();
                hit = found && was_resident;
                if hit {
                    result.stats.hits += 1;
                } else {
                    result.stats.misses += 1;
                }
            }
            OpKind::Put => {
                evicted = policy.put(&op.key, &op.value);
                if evicted.is_some() {
                    result.stats.evictions += 1;
                }
            }
        }

        let step = build_step(i as u32, op, hit, evicted, policy);
        if animate {
            result.steps.push(step);
        } else if i % snapshot_every == 0 || i == ops.len() - 1 {
            result.snapshots.push(step);
        }
    }

    debug!(
        policy = policy.kind().as_str(),
        ops = ops.len(),
        hits = result.stats.hits,
        misses = result.stats.misses,
        evictions = result.stats.evictions,
        "simulation finished"
    );

    result
}

fn build_step(
    index: u32,
    op: &TraceOp,
    hit: bool,
    evicted: Option<String>,
    policy: &Policy,
) -> Step {
    let mut step = Step {
        index,
        op: op.kind,
        key: op.key.clone(),
        value: op.value.clone(),
        hit,
        evicted,
        cache: policy.snapshot(),
        meta: StepMeta::default(),
    };
    policy.describe_meta(&mut step);
    step
}
