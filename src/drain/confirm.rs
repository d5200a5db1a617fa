//! Operator confirmation for prefix-expanded node ids.

use std::io;

use crate::domain::drain::DrainAction;

use super::error::DrainError;
use super::resolve::ResolvedNode;

/// Source of interactive answers.
pub trait Prompter {
    /// Ask `question` and return the answer line without its line ending.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    /// Empty answer or an answer starting with `n`.
    Cancelled,
    /// An answer like `yes`: starts with `y` but is not exactly `y`.
    ExactYesRequired,
}

pub fn question(action: DrainAction, node_id: &str) -> String {
    format!(
        "Are you sure you want to {} drain mode for node {:?}? [y/N]",
        action, node_id
    )
}

/// Classify an answer. Anything that is neither a cancel nor a `y…` answer
/// is a failed confirmation.
pub fn interpret(answer: &str) -> Result<Confirmation, DrainError> {
    let first = answer.chars().next().map(|c| c.to_ascii_lowercase());
    match first {
        None | Some('n') => Ok(Confirmation::Cancelled),
        Some('y') if answer.chars().count() > 1 => Ok(Confirmation::ExactYesRequired),
        _ if answer == "y" => Ok(Confirmation::Proceed),
        _ => Err(DrainError::NotConfirmed),
    }
}

pub fn confirm<P: Prompter>(
    prompter: &mut P,
    resolved: &ResolvedNode,
    action: DrainAction,
    auto_confirm: bool,
) -> Result<Confirmation, DrainError> {
    if resolved.exact_match || auto_confirm {
        return Ok(Confirmation::Proceed);
    }

    let answer = prompter
        .ask(&question(action, &resolved.node.id))
        .map_err(DrainError::PromptFailed)?;
    interpret(&answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drain::testing::{record, ScriptedPrompter};

    fn prefix_match() -> ResolvedNode {
        ResolvedNode {
            node: record("abc12de-0000-ffff", "web"),
            exact_match: false,
        }
    }

    #[test]
    fn answers() {
        assert_eq!(interpret("y").unwrap(), Confirmation::Proceed);
        assert_eq!(interpret("").unwrap(), Confirmation::Cancelled);
        assert_eq!(interpret("n").unwrap(), Confirmation::Cancelled);
        assert_eq!(interpret("no").unwrap(), Confirmation::Cancelled);
        assert_eq!(interpret("Nope").unwrap(), Confirmation::Cancelled);
        assert_eq!(interpret("yes").unwrap(), Confirmation::ExactYesRequired);
        assert_eq!(interpret("Yes").unwrap(), Confirmation::ExactYesRequired);
        assert!(matches!(interpret("Y"), Err(DrainError::NotConfirmed)));
        assert!(matches!(interpret("sure"), Err(DrainError::NotConfirmed)));
        assert!(matches!(interpret(" y"), Err(DrainError::NotConfirmed)));
    }

    #[test]
    fn exact_match_skips_the_prompt() {
        let mut prompter = ScriptedPrompter::default();
        let resolved = ResolvedNode {
            exact_match: true,
            ..prefix_match()
        };
        let outcome = confirm(&mut prompter, &resolved, DrainAction::Enable, false).unwrap();
        assert_eq!(outcome, Confirmation::Proceed);
        assert!(prompter.questions.is_empty());
    }

    #[test]
    fn auto_confirm_skips_the_prompt() {
        let mut prompter = ScriptedPrompter::default();
        let outcome = confirm(&mut prompter, &prefix_match(), DrainAction::Disable, true).unwrap();
        assert_eq!(outcome, Confirmation::Proceed);
        assert!(prompter.questions.is_empty());
    }

    #[test]
    fn question_names_the_action_and_full_id() {
        let mut prompter = ScriptedPrompter::answering("y");
        confirm(&mut prompter, &prefix_match(), DrainAction::Disable, false).unwrap();
        assert_eq!(
            prompter.questions,
            vec![
                "Are you sure you want to disable drain mode for node \"abc12de-0000-ffff\"? [y/N]"
                    .to_string()
            ]
        );
    }

    #[test]
    fn unreadable_answer_is_fatal() {
        let mut prompter = ScriptedPrompter::failing();
        let err = confirm(&mut prompter, &prefix_match(), DrainAction::Enable, false).unwrap_err();
        assert!(matches!(err, DrainError::PromptFailed(_)));
        assert!(err.to_string().starts_with("failed to parse answer"));
    }
}
