//! Drain directive types shared by the command pipeline and the API client.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deadline applied when no drain-strategy flag is given.
pub const DEFAULT_DRAIN_DEADLINE: Duration = Duration::from_secs(60 * 60);

/// Longest deadline the signed nanosecond wire encoding can carry.
pub const MAX_DRAIN_DEADLINE: Duration = Duration::from_nanos(i64::MAX as u64);

/// Wire sentinel for an immediate, forced drain (-1s in nanoseconds).
const FORCED_DEADLINE_NANOS: i64 = -1_000_000_000;

/// When remaining work on a draining node is force-stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineDecision {
    /// Evict everything immediately.
    Forced,
    /// Drain indefinitely, never force-stop.
    Unbounded,
    /// Force-stop whatever is left after this long. Positive and at most
    /// [`MAX_DRAIN_DEADLINE`].
    Bounded(Duration),
}

impl DeadlineDecision {
    /// Signed nanosecond encoding understood by the management API. `None`
    /// for a bounded deadline past [`MAX_DRAIN_DEADLINE`].
    pub fn as_nanos(&self) -> Option<i64> {
        match self {
            DeadlineDecision::Forced => Some(FORCED_DEADLINE_NANOS),
            DeadlineDecision::Unbounded => Some(0),
            DeadlineDecision::Bounded(d) => i64::try_from(d.as_nanos()).ok(),
        }
    }

    pub fn from_nanos(nanos: i64) -> Self {
        match nanos {
            n if n < 0 => DeadlineDecision::Forced,
            0 => DeadlineDecision::Unbounded,
            n => DeadlineDecision::Bounded(Duration::from_nanos(n.unsigned_abs())),
        }
    }
}

impl Default for DeadlineDecision {
    fn default() -> Self {
        DeadlineDecision::Bounded(DEFAULT_DRAIN_DEADLINE)
    }
}

impl fmt::Display for DeadlineDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineDecision::Forced => write!(f, "forced"),
            DeadlineDecision::Unbounded => write!(f, "no deadline"),
            DeadlineDecision::Bounded(d) => write!(f, "{}", humantime::format_duration(*d)),
        }
    }
}

impl Serialize for DeadlineDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_nanos() {
            Some(nanos) => serializer.serialize_i64(nanos),
            None => Err(serde::ser::Error::custom(format!(
                "drain deadline {} does not fit in signed nanoseconds",
                self
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for DeadlineDecision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(DeadlineDecision::from_nanos)
    }
}

/// Drain directive sent when enabling drain. Disabling sends no spec at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DrainSpec {
    pub deadline: DeadlineDecision,
    #[serde(default)]
    pub ignore_system_jobs: bool,
}

/// Which way the drain toggle goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainAction {
    Enable,
    Disable,
}

impl fmt::Display for DrainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainAction::Enable => write!(f, "enable"),
            DrainAction::Disable => write!(f, "disable"),
        }
    }
}

/// Body of a drain update request.
#[derive(Debug, Clone, Serialize)]
pub struct DrainUpdateRequest<'a> {
    #[serde(rename = "NodeID")]
    pub node_id: &'a str,
    #[serde(rename = "DrainSpec")]
    pub spec: Option<DrainSpec>,
}

/// Service acknowledgement of a drain update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DrainUpdateResponse {
    #[serde(rename = "EvalIDs", default)]
    pub eval_ids: Vec<String>,
    #[serde(default)]
    pub eval_create_index: u64,
    #[serde(default)]
    pub node_modify_index: u64,
}
