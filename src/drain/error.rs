use crate::domain::node::NodeSummary;
use crate::report::candidate_table;

/// Broad failure classes of a drain toggle, used to pick how a failure is
/// presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Contradictory or incomplete flags; nothing was sent to the cluster.
    Usage,
    Resolution,
    Confirmation,
    Transport,
}

#[derive(Debug, thiserror::Error)]
pub enum DrainError {
    #[error("must specify exactly one of -enable or -disable")]
    EnableDisableConflict,

    #[error("node ID must be specified if -self isn't being used")]
    MissingNodeId,

    #[error("-disable can't be combined with flags configuring drain strategy")]
    DisableWithStrategy,

    #[error("-deadline can't be combined with -force or -no-deadline")]
    DeadlineWithForce,

    #[error("-force and -no-deadline are mutually exclusive")]
    ForceWithNoDeadline,

    #[error("failed to parse deadline {input:?}: {reason}")]
    InvalidDeadline { input: String, reason: String },

    #[error("a positive drain duration must be given")]
    NonPositiveDeadline,

    #[error("identifier must contain at least two characters")]
    IdentifierTooShort,

    #[error("no node(s) with prefix or id {0:?} found")]
    NoMatch(String),

    #[error("prefix matched multiple nodes\n\n{}", candidate_table(.0))]
    AmbiguousPrefix(Vec<NodeSummary>),

    #[error("failed to parse answer: {0}")]
    PromptFailed(#[source] std::io::Error),

    #[error("no confirmation detected; for confirmation, an exact 'y' is required")]
    NotConfirmed,

    #[error("{context}: {cause:#}")]
    Transport {
        context: &'static str,
        cause: anyhow::Error,
    },
}

impl DrainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DrainError::EnableDisableConflict
            | DrainError::MissingNodeId
            | DrainError::DisableWithStrategy
            | DrainError::DeadlineWithForce
            | DrainError::ForceWithNoDeadline
            | DrainError::InvalidDeadline { .. }
            | DrainError::NonPositiveDeadline => ErrorKind::Usage,
            DrainError::IdentifierTooShort
            | DrainError::NoMatch(_)
            | DrainError::AmbiguousPrefix(_) => ErrorKind::Resolution,
            DrainError::PromptFailed(_) | DrainError::NotConfirmed => ErrorKind::Confirmation,
            DrainError::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// Only the enable/disable check prints the full command help.
    pub fn wants_usage(&self) -> bool {
        matches!(self, DrainError::EnableDisableConflict)
    }

    pub(crate) fn transport(context: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |cause| DrainError::Transport { context, cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::NodeStatus;

    #[test]
    fn transport_error_keeps_the_cause_chain() {
        let cause = anyhow::anyhow!("connection refused").context("GET http://127.0.0.1:4646/v1/nodes");
        let err = DrainError::transport("error toggling drain mode")(cause);
        assert_eq!(
            err.to_string(),
            "error toggling drain mode: GET http://127.0.0.1:4646/v1/nodes: connection refused"
        );
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn ambiguous_prefix_lists_candidates() {
        let nodes = vec![
            NodeSummary {
                id: "abc1".to_string(),
                datacenter: "dc1".to_string(),
                name: "a".to_string(),
                node_class: String::new(),
                drain: false,
                status: NodeStatus::Ready,
            },
            NodeSummary {
                id: "abc2".to_string(),
                datacenter: "dc2".to_string(),
                name: "b".to_string(),
                node_class: "gpu".to_string(),
                drain: true,
                status: NodeStatus::Down,
            },
        ];
        let msg = DrainError::AmbiguousPrefix(nodes).to_string();
        assert_eq!(
            msg,
            "prefix matched multiple nodes\n\n\
             ID|Datacenter|Name|Class|Drain|Status\n\
             abc1|dc1|a||false|ready\n\
             abc2|dc2|b|gpu|true|down"
        );
    }

    #[test]
    fn only_enable_disable_conflict_prints_usage() {
        assert!(DrainError::EnableDisableConflict.wants_usage());
        assert!(!DrainError::MissingNodeId.wants_usage());
        assert_eq!(DrainError::MissingNodeId.kind(), ErrorKind::Usage);
    }
}
