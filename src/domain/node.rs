//! Node — read-only views of a cluster node as returned by the management API.
//!
//! A `NodeSummary` comes back from a prefix search and may be stale or partial.
//! A `NodeRecord` comes back from an exact-id lookup and is the authoritative
//! copy of the node that a drain toggle is applied to.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::drain::DrainSpec;

/// Short listing entry produced by a prefix search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeSummary {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub datacenter: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub node_class: String,
    #[serde(default)]
    pub drain: bool,
    #[serde(default)]
    pub status: NodeStatus,
}

/// Full node record returned by an exact lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub datacenter: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub node_class: String,
    #[serde(default)]
    pub drain: bool,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(rename = "HTTPAddr", default)]
    pub http_addr: String,
    #[serde(default)]
    pub drain_strategy: Option<DrainStrategy>,
    #[serde(default)]
    pub scheduling_eligibility: Eligibility,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

/// Drain currently in effect on a node, as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DrainStrategy {
    #[serde(flatten)]
    pub spec: DrainSpec,
    /// RFC 3339 instant after which remaining work is force-stopped.
    #[serde(default)]
    pub force_deadline: Option<String>,
}

/// Node lifecycle status as tracked by the cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Initializing,
    Ready,
    Down,
    Disconnected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStatus::Initializing => write!(f, "initializing"),
            NodeStatus::Ready => write!(f, "ready"),
            NodeStatus::Down => write!(f, "down"),
            NodeStatus::Disconnected => write!(f, "disconnected"),
            NodeStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Whether the scheduler may place new work on the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    #[default]
    Eligible,
    Ineligible,
}

impl From<&NodeRecord> for NodeSummary {
    fn from(record: &NodeRecord) -> Self {
        Self {
            id: record.id.clone(),
            datacenter: record.datacenter.clone(),
            name: record.name.clone(),
            node_class: record.node_class.clone(),
            drain: record.drain,
            status: record.status,
        }
    }
}
