//! Maps the deadline flags to one concrete [`DeadlineDecision`].

use std::time::Duration;

use crate::domain::drain::{DeadlineDecision, MAX_DRAIN_DEADLINE};

use super::error::DrainError;
use super::validate::DeadlineFlags;

/// Pick the drain deadline. Priority: `-force`, `-no-deadline`, `-deadline`,
/// then the one hour default.
///
/// Conflicting flag sets are rejected here as well so the function is total
/// on any input, not only on validated requests.
pub fn resolve(flags: &DeadlineFlags) -> Result<DeadlineDecision, DrainError> {
    let explicit = flags.explicit();
    if explicit.is_some() && (flags.force || flags.no_deadline) {
        return Err(DrainError::DeadlineWithForce);
    }
    if flags.force && flags.no_deadline {
        return Err(DrainError::ForceWithNoDeadline);
    }

    if flags.force {
        return Ok(DeadlineDecision::Forced);
    }
    if flags.no_deadline {
        return Ok(DeadlineDecision::Unbounded);
    }
    match explicit {
        Some(input) => parse_deadline(input),
        None => Ok(DeadlineDecision::default()),
    }
}

/// Parse a signed duration expression such as `30m`, `1h30m` or `-5m`.
/// Only strictly positive values that fit the wire encoding are accepted.
pub fn parse_deadline(input: &str) -> Result<DeadlineDecision, DrainError> {
    let invalid = |reason: String| DrainError::InvalidDeadline {
        input: input.to_string(),
        reason,
    };

    let (negative, magnitude) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let duration = if magnitude == "0" {
        Duration::ZERO
    } else {
        humantime::parse_duration(magnitude).map_err(|e| invalid(e.to_string()))?
    };

    if negative || duration.is_zero() {
        return Err(DrainError::NonPositiveDeadline);
    }
    if duration > MAX_DRAIN_DEADLINE {
        return Err(invalid(format!(
            "duration out of range (maximum is {})",
            humantime::format_duration(MAX_DRAIN_DEADLINE)
        )));
    }
    Ok(DeadlineDecision::Bounded(duration))
}
