//! Error types for the cachesim library.
//!
//! All failures are surfaced as data at the request boundary, before the
//! driver runs. Once a validated trace enters the driver, every policy
//! operation is total: internal consistency is enforced by the debug-only
//! `debug_validate_invariants` methods, not by recoverable errors.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when simulation request parameters are invalid.
///
/// Produced by request validation in [`crate::session::run_request`] and by
/// [`crate::policy::PolicyKind`]'s `FromStr`.
///
/// # Example
///
/// ```
/// use cachesim::error::ConfigError;
/// use cachesim::policy::PolicyKind;
///
/// let err = "CLOCK".parse::<PolicyKind>().unwrap_err();
/// assert_eq!(err, ConfigError::UnknownPolicy("CLOCK".to_string()));
/// assert!(err.to_string().contains("CLOCK"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity was 0; a cache needs at least one slot.
    InvalidCapacity,
    /// Snapshot cadence was 0; sparse mode records every `n`-th step, n >= 1.
    InvalidSnapshotEvery,
    /// The policy name is not one of `LRU`, `FIFO`, `LFU`, `ARC`.
    UnknownPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity => f.write_str("capacity must be at least 1"),
            ConfigError::InvalidSnapshotEvery => {
                f.write_str("snapshot_every must be at least 1")
            }
            ConfigError::UnknownPolicy(name) => {
                write!(f, "Unknown policy: {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// SimError
// ---------------------------------------------------------------------------

/// Error returned from the request boundary.
///
/// Either a configuration problem or a trace that failed to parse; the
/// parse variant carries the per-line messages (`"Line N: <reason>"`)
/// collected by [`crate::trace::parse_trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    Config(ConfigError),
    TraceParse(Vec<String>),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(err) => err.fmt(f),
            SimError::TraceParse(errors) => {
                write!(f, "trace parse failed: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(err) => Some(err),
            SimError::TraceParse(_) => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::Config(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
