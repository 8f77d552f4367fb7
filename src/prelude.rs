pub use crate::ds::{FrequencyBuckets, KeyedList, SlotArena, SlotId};
pub use crate::error::{ConfigError, SimError};
pub use crate::policy::{Policy, PolicyKind};
pub use crate::session::{run_request, PolicyReport, SimRequest, SimResponse};
pub use crate::sim::{run, SimConfig, SimResult};
pub use crate::step::{ArcSets, CacheEntry, OpKind, Stats, Step, StepMeta};
pub use crate::trace::{parse_trace, ParseOutcome, TraceOp};
