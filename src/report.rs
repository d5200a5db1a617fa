//! Operator-facing output of the drain command.

use colored::Colorize;

use crate::domain::node::NodeSummary;
use crate::drain::DrainOutcome;

const CANDIDATE_HEADER: &str = "ID|Datacenter|Name|Class|Drain|Status";

/// Pipe-delimited listing of prefix candidates, one row per node, in the
/// order given.
pub fn candidate_table(nodes: &[NodeSummary]) -> String {
    let mut out = Vec::with_capacity(nodes.len() + 1);
    out.push(CANDIDATE_HEADER.to_string());
    out.extend(nodes.iter().map(|node| {
        format!(
            "{}|{}|{}|{}|{}|{}",
            node.id, node.datacenter, node.name, node.node_class, node.drain, node.status
        )
    }));
    out.join("\n")
}

pub trait Reporter {
    fn drain_set(&mut self, node_id: &str);
    fn cancelled(&mut self);
    fn exact_yes_required(&mut self);
}

pub fn report<R: Reporter>(reporter: &mut R, outcome: &DrainOutcome) {
    match outcome {
        DrainOutcome::Applied { node_id, .. } => reporter.drain_set(node_id),
        DrainOutcome::Cancelled => reporter.cancelled(),
        DrainOutcome::ExactYesRequired => reporter.exact_yes_required(),
    }
}

/// Writes status lines to stdout.
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn drain_set(&mut self, node_id: &str) {
        println!("{} Node {:?} drain strategy set", "ok".green().bold(), node_id);
    }

    fn cancelled(&mut self) {
        println!("{} Canceling drain toggle", "::".blue().bold());
    }

    fn exact_yes_required(&mut self) {
        println!(
            "{} For confirmation, an exact 'y' is required.",
            "::".blue().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drain::DrainUpdateResponse;
    use crate::domain::node::NodeStatus;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Reporter for Recorder {
        fn drain_set(&mut self, node_id: &str) {
            self.0.push(format!("set {node_id}"));
        }

        fn cancelled(&mut self) {
            self.0.push("cancelled".to_string());
        }

        fn exact_yes_required(&mut self) {
            self.0.push("exact-y".to_string());
        }
    }

    #[test]
    fn outcomes_map_to_reporter_calls() {
        let mut recorder = Recorder::default();
        report(
            &mut recorder,
            &DrainOutcome::Applied {
                node_id: "abcd".to_string(),
                response: DrainUpdateResponse::default(),
            },
        );
        report(&mut recorder, &DrainOutcome::Cancelled);
        report(&mut recorder, &DrainOutcome::ExactYesRequired);
        assert_eq!(recorder.0, vec!["set abcd", "cancelled", "exact-y"]);
    }

    #[test]
    fn empty_table_is_just_the_header() {
        assert_eq!(candidate_table(&[]), CANDIDATE_HEADER);
    }

    #[test]
    fn rows_follow_the_header() {
        let node = NodeSummary {
            id: "ab12".to_string(),
            datacenter: "dc1".to_string(),
            name: "worker".to_string(),
            node_class: "batch".to_string(),
            drain: true,
            status: NodeStatus::Initializing,
        };
        assert_eq!(
            candidate_table(&[node]),
            "ID|Datacenter|Name|Class|Drain|Status\nab12|dc1|worker|batch|true|initializing"
        );
    }
}
