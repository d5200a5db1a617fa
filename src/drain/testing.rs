//! In-memory collaborators for pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::domain::drain::{DrainSpec, DrainUpdateResponse};
use crate::domain::node::{Eligibility, NodeRecord, NodeStatus, NodeSummary};

use super::confirm::Prompter;
use super::NodeApi;

pub fn record(id: &str, name: &str) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        datacenter: "dc1".to_string(),
        name: name.to_string(),
        node_class: String::new(),
        drain: false,
        status: NodeStatus::Ready,
        http_addr: "10.0.0.1:4646".to_string(),
        drain_strategy: None,
        scheduling_eligibility: Eligibility::Eligible,
        attributes: HashMap::new(),
        meta: HashMap::new(),
    }
}

pub fn summary(id: &str, name: &str) -> NodeSummary {
    NodeSummary::from(&record(id, name))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub local_node_id: usize,
    pub prefix_search: usize,
    pub node_info: usize,
    pub update_drain: usize,
}

/// Cluster stand-in that counts every call it receives.
#[derive(Default)]
pub struct StubApi {
    pub nodes: Vec<NodeRecord>,
    pub local_id: Option<String>,
    /// Returned by prefix search instead of the summaries of `nodes`.
    pub summaries_override: Option<Vec<NodeSummary>>,
    pub fail_search: bool,
    pub fail_lookup: bool,
    pub fail_update: bool,
    calls: Mutex<Calls>,
    lookups: Mutex<Vec<String>>,
    updates: Mutex<Vec<(String, Option<DrainSpec>)>>,
}

impl StubApi {
    pub fn with_nodes(nodes: Vec<NodeRecord>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, Option<DrainSpec>)> {
        self.updates.lock().unwrap().clone()
    }
}

impl NodeApi for StubApi {
    async fn local_node_id(&self) -> Result<String> {
        self.calls.lock().unwrap().local_node_id += 1;
        self.local_id
            .clone()
            .ok_or_else(|| anyhow!("failed to determine node ID: not running in client mode"))
    }

    async fn prefix_search(&self, query: &str) -> Result<Vec<NodeSummary>> {
        self.calls.lock().unwrap().prefix_search += 1;
        if self.fail_search {
            return Err(anyhow!("connection refused").context("GET /v1/nodes"));
        }
        if let Some(summaries) = &self.summaries_override {
            return Ok(summaries.clone());
        }
        Ok(self
            .nodes
            .iter()
            .filter(|n| n.id.starts_with(query))
            .map(NodeSummary::from)
            .collect())
    }

    async fn node_info(&self, id: &str) -> Result<NodeRecord> {
        self.calls.lock().unwrap().node_info += 1;
        self.lookups.lock().unwrap().push(id.to_string());
        if self.fail_lookup {
            return Err(anyhow!("503 Service Unavailable: no leader"));
        }
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("node not found"))
    }

    async fn update_drain(
        &self,
        id: &str,
        spec: Option<DrainSpec>,
    ) -> Result<DrainUpdateResponse> {
        self.calls.lock().unwrap().update_drain += 1;
        if self.fail_update {
            return Err(anyhow!("permission denied"));
        }
        self.updates.lock().unwrap().push((id.to_string(), spec));
        Ok(DrainUpdateResponse {
            eval_ids: vec!["eval-1".to_string()],
            eval_create_index: 10,
            node_modify_index: 11,
        })
    }
}

/// Replays canned answers and records every question asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<io::Result<String>>,
    pub questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answer: &str) -> Self {
        Self {
            answers: VecDeque::from([Ok(answer.to_string())]),
            questions: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            answers: VecDeque::from([Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            ))]),
            questions: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::new(io::ErrorKind::Other, "no scripted answer")))
    }
}
