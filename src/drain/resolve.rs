//! Turns an identifier (or `-self`) into exactly one node record.

use tracing::debug;

use crate::domain::node::NodeRecord;

use super::error::DrainError;
use super::NodeApi;

/// Scheme marker some tools put in front of node UUIDs.
const UUID_SCHEME: &str = "urn:uuid:";

/// Which node the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTarget {
    /// The node the CLI runs on.
    LocalNode,
    /// Full node id or an id prefix.
    Identifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub node: NodeRecord,
    /// The normalized input was the node's full id, not just a prefix of it.
    pub exact_match: bool,
}

/// Strip decoration that is not part of the id itself.
pub fn normalize_identifier(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..UUID_SCHEME.len()) {
        Some(head) if head.eq_ignore_ascii_case(UUID_SCHEME) => &trimmed[UUID_SCHEME.len()..],
        _ => trimmed,
    }
}

pub async fn resolve_node<A: NodeApi>(
    api: &A,
    target: &NodeTarget,
) -> Result<ResolvedNode, DrainError> {
    let raw = match target {
        NodeTarget::Identifier(id) => id.clone(),
        NodeTarget::LocalNode => api
            .local_node_id()
            .await
            .map_err(DrainError::transport("error determining local node"))?,
    };

    if raw.chars().count() == 1 {
        return Err(DrainError::IdentifierTooShort);
    }

    let query = normalize_identifier(&raw);
    let mut matches = api
        .prefix_search(query)
        .await
        .map_err(DrainError::transport("error toggling drain mode"))?;
    debug!(query, matches = matches.len(), "node prefix search");

    let summary = match matches.len() {
        0 => return Err(DrainError::NoMatch(query.to_string())),
        1 => matches.remove(0),
        _ => return Err(DrainError::AmbiguousPrefix(matches)),
    };

    // The listing entry may be stale; the lookup is authoritative.
    let node = api
        .node_info(&summary.id)
        .await
        .map_err(DrainError::transport("error toggling drain mode"))?;

    let exact_match = query == node.id;
    debug!(node_id = %node.id, exact_match, "resolved node");
    Ok(ResolvedNode { node, exact_match })
}
