use tracing::debug;

use crate::domain::drain::{DeadlineDecision, DrainAction, DrainSpec, DrainUpdateResponse};

use super::error::DrainError;
use super::NodeApi;

/// The directive for `action`. Disabling is expressed by sending no spec.
pub fn drain_spec(
    action: DrainAction,
    deadline: DeadlineDecision,
    ignore_system_jobs: bool,
) -> Option<DrainSpec> {
    match action {
        DrainAction::Enable => Some(DrainSpec {
            deadline,
            ignore_system_jobs,
        }),
        DrainAction::Disable => None,
    }
}

pub async fn apply<A: NodeApi>(
    api: &A,
    node_id: &str,
    spec: Option<DrainSpec>,
) -> Result<DrainUpdateResponse, DrainError> {
    debug!(node_id, spec = ?spec, "updating drain specification");
    api.update_drain(node_id, spec)
        .await
        .map_err(DrainError::transport("error updating drain specification"))
}
