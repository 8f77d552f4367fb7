//! The request boundary.
//!
//! A host hands in a [`SimRequest`] (capacity, policy names, mode, and the
//! raw trace text) and receives one [`PolicyReport`] per requested policy,
//! in request order. Validation happens up front and every failure is
//! returned as data ([`SimError`]); nothing past this boundary can fail.
//!
//! The types here derive `serde::Serialize`/`Deserialize` so the host can
//! move them across whatever transport it uses; this crate itself performs
//! no serialization.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, SimError};
use crate::policy::{Policy, PolicyKind};
use crate::sim::{run, SimConfig, SimResult};
use crate::step::{Stats, Step};
use crate::trace::parse_trace;

/// A host request: which policies to simulate, over what trace.
///
/// Unspecified fields take the same defaults the original host bridge used:
/// capacity 3, animate on, a snapshot every 1000 steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimRequest {
    pub capacity: u64,
    /// Empty means `["LRU"]`.
    pub policies: Vec<String>,
    pub animate: bool,
    pub snapshot_every: u64,
    pub trace_text: String,
}

impl Default for SimRequest {
    fn default() -> Self {
        Self {
            capacity: 3,
            policies: Vec::new(),
            animate: true,
            snapshot_every: 1000,
            trace_text: String::new(),
        }
    }
}

/// Stats as reported to the host, with the derived ratio materialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
    pub evictions: u64,
}

impl From<Stats> for StatsSummary {
    fn from(stats: Stats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            hit_ratio: stats.hit_ratio(),
            evictions: stats.evictions,
        }
    }
}

/// One policy's simulation output. Exactly one of `steps` / `snapshots` is
/// present, matching the effective logging mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub policy: PolicyKind,
    pub capacity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<Vec<Step>>,
    pub stats: StatsSummary,
    /// Set when an animate run was downgraded to sparse mode by the
    /// large-trace guardrail.
    pub animate_downgraded: bool,
}

impl PolicyReport {
    fn new(kind: PolicyKind, capacity: u64, animate: bool, result: SimResult) -> Self {
        let dense = animate && !result.animate_downgraded;
        Self {
            policy: kind,
            capacity,
            steps: if dense { Some(result.steps) } else { None },
            snapshots: if dense { None } else { Some(result.snapshots) },
            stats: result.stats.into(),
            animate_downgraded: result.animate_downgraded,
        }
    }
}

/// Per-request response: a single report when one policy was requested, an
/// ordered sequence otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimResponse {
    Single(Box<PolicyReport>),
    Multi(Vec<PolicyReport>),
}

impl SimResponse {
    /// The reports in request order, regardless of arity.
    pub fn reports(&self) -> Vec<&PolicyReport> {
        match self {
            SimResponse::Single(report) => vec![report.as_ref()],
            SimResponse::Multi(reports) => reports.iter().collect(),
        }
    }
}

/// Validates a request, runs one simulation per requested policy, and
/// returns the reports.
///
/// # Example
///
/// ```
/// use cachesim::session::{run_request, SimRequest, SimResponse};
///
/// let request = SimRequest {
///     capacity: 2,
///     policies: vec!["LRU".to_string()],
///     trace_text: "PUT a 1\nGET a\n".to_string(),
///     ..Default::default()
/// };
///
/// let response = run_request(&request).unwrap();
/// let reports = response.reports();
/// assert_eq!(reports[0].stats.hits, 1);
/// assert!(matches!(response, SimResponse::Single(_)));
/// ```
pub fn run_request(request: &SimRequest) -> Result<SimResponse, SimError> {
    if request.capacity == 0 {
        return Err(ConfigError::InvalidCapacity.into());
    }
    if request.snapshot_every == 0 {
        return Err(ConfigError::InvalidSnapshotEvery.into());
    }

    let kinds: Vec<PolicyKind> = if request.policies.is_empty() {
        vec![PolicyKind::Lru]
    } else {
        request
            .policies
            .iter()
            .map(|name| name.parse())
            .collect::<Result<_, ConfigError>>()?
    };

    let parsed = parse_trace(&request.trace_text);
    if !parsed.success {
        return Err(SimError::TraceParse(parsed.errors));
    }

    let cfg = SimConfig {
        capacity: request.capacity as usize,
        animate: request.animate,
        snapshot_every: request.snapshot_every as usize,
    };

    let mut reports = Vec::with_capacity(kinds.len());
    for kind in kinds {
        debug!(
            policy = kind.as_str(),
            capacity = cfg.capacity,
            ops = parsed.operations.len(),
            animate = cfg.animate,
            "running simulation"
        );
        let mut policy = Policy::new(kind, cfg.capacity);
        let result = run(&parsed.operations, &mut policy, &cfg);
        reports.push(PolicyReport::new(kind, request.capacity, cfg.animate, result));
    }

    if reports.len() == 1 {
        Ok(SimResponse::Single(Box::new(reports.remove(0))))
    } else {
        Ok(SimResponse::Multi(reports))
    }
}
