//! `node drain` pipeline.
//!
//! Validate → resolve deadline → resolve node → confirm → apply. The first
//! two stages are pure; the rest only talk to the cluster through
//! [`NodeApi`] and to the operator through [`Prompter`].

pub mod apply;
pub mod confirm;
pub mod deadline;
pub mod error;
pub mod resolve;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use tracing::debug;

use crate::client::ClusterClient;
use crate::domain::drain::{DeadlineDecision, DrainSpec, DrainUpdateResponse};
use crate::domain::node::{NodeRecord, NodeSummary};

pub use confirm::{Confirmation, Prompter};
pub use error::{DrainError, ErrorKind};
pub use validate::DrainFlags;

use validate::DrainRequest;

/// Cluster operations the drain command depends on.
#[allow(async_fn_in_trait)]
pub trait NodeApi {
    /// Id of the node this CLI runs on.
    async fn local_node_id(&self) -> Result<String>;
    async fn prefix_search(&self, query: &str) -> Result<Vec<NodeSummary>>;
    async fn node_info(&self, id: &str) -> Result<NodeRecord>;
    /// `None` disables draining.
    async fn update_drain(&self, id: &str, spec: Option<DrainSpec>)
        -> Result<DrainUpdateResponse>;
}

impl NodeApi for ClusterClient {
    async fn local_node_id(&self) -> Result<String> {
        ClusterClient::local_node_id(self).await
    }

    async fn prefix_search(&self, query: &str) -> Result<Vec<NodeSummary>> {
        self.node_prefix_list(query).await
    }

    async fn node_info(&self, id: &str) -> Result<NodeRecord> {
        ClusterClient::node_info(self, id).await
    }

    async fn update_drain(
        &self,
        id: &str,
        spec: Option<DrainSpec>,
    ) -> Result<DrainUpdateResponse> {
        ClusterClient::update_drain(self, id, spec).await
    }
}

/// How a drain toggle ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainOutcome {
    Applied {
        node_id: String,
        response: DrainUpdateResponse,
    },
    Cancelled,
    ExactYesRequired,
}

/// A drain toggle whose flags and deadline are settled. Building one never
/// touches the cluster.
#[derive(Debug)]
pub struct PreparedDrain {
    request: DrainRequest,
    deadline: DeadlineDecision,
}

pub fn prepare(flags: DrainFlags) -> Result<PreparedDrain, DrainError> {
    let request = validate::validate(flags)?;
    let deadline = deadline::resolve(&request.deadline)?;
    debug!(action = %request.action, deadline = %deadline, "drain request validated");
    Ok(PreparedDrain { request, deadline })
}

pub async fn run<A: NodeApi, P: Prompter>(
    api: &A,
    prompter: &mut P,
    prepared: PreparedDrain,
) -> Result<DrainOutcome, DrainError> {
    let PreparedDrain { request, deadline } = prepared;

    let resolved = resolve::resolve_node(api, &request.target).await?;

    match confirm::confirm(prompter, &resolved, request.action, request.auto_confirm)? {
        Confirmation::Proceed => {}
        Confirmation::Cancelled => return Ok(DrainOutcome::Cancelled),
        Confirmation::ExactYesRequired => return Ok(DrainOutcome::ExactYesRequired),
    }

    let spec = apply::drain_spec(request.action, deadline, request.ignore_system_jobs);
    let response = apply::apply(api, &resolved.node.id, spec).await?;
    debug!(
        node_id = %resolved.node.id,
        eval_ids = ?response.eval_ids,
        node_modify_index = response.node_modify_index,
        "drain specification updated"
    );

    Ok(DrainOutcome::Applied {
        node_id: resolved.node.id,
        response,
    })
}
