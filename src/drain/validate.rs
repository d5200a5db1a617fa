//! Flag validation. Runs before any network access.

use crate::domain::drain::DrainAction;

use super::error::DrainError;
use super::resolve::NodeTarget;

/// Raw flags of `node drain`, exactly as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainFlags {
    pub enable: bool,
    pub disable: bool,
    pub deadline: Option<String>,
    pub force: bool,
    pub no_deadline: bool,
    pub ignore_system: bool,
    pub self_node: bool,
    pub yes: bool,
    pub args: Vec<String>,
}

/// Flags that pick the drain deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineFlags {
    pub deadline: Option<String>,
    pub force: bool,
    pub no_deadline: bool,
}

impl DeadlineFlags {
    /// An empty `-deadline ""` counts as not given.
    pub fn explicit(&self) -> Option<&str> {
        self.deadline.as_deref().filter(|d| !d.is_empty())
    }
}

/// A consistent drain request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainRequest {
    pub action: DrainAction,
    pub deadline: DeadlineFlags,
    pub ignore_system_jobs: bool,
    pub target: NodeTarget,
    pub auto_confirm: bool,
}

/// Check the raw flags, in order, and return the first violation.
pub fn validate(flags: DrainFlags) -> Result<DrainRequest, DrainError> {
    let action = match (flags.enable, flags.disable) {
        (true, false) => DrainAction::Enable,
        (false, true) => DrainAction::Disable,
        _ => return Err(DrainError::EnableDisableConflict),
    };

    let DrainFlags {
        deadline,
        force,
        no_deadline,
        ignore_system,
        self_node,
        yes,
        mut args,
        ..
    } = flags;

    let target = match (self_node, args.len()) {
        (true, 0) => NodeTarget::LocalNode,
        (false, 1) => NodeTarget::Identifier(args.remove(0)),
        _ => return Err(DrainError::MissingNodeId),
    };

    let deadline = DeadlineFlags {
        deadline,
        force,
        no_deadline,
    };
    let has_deadline = deadline.explicit().is_some();

    if action == DrainAction::Disable && (has_deadline || force || no_deadline || ignore_system) {
        return Err(DrainError::DisableWithStrategy);
    }
    if has_deadline && (force || no_deadline) {
        return Err(DrainError::DeadlineWithForce);
    }
    if force && no_deadline {
        return Err(DrainError::ForceWithNoDeadline);
    }

    Ok(DrainRequest {
        action,
        deadline,
        ignore_system_jobs: ignore_system,
        target,
        auto_confirm: yes,
    })
}
