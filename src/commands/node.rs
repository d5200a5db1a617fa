//! `nodectl node drain`

use anyhow::Result;
use clap::Subcommand;

use crate::client::ClusterClient;
use crate::config::Config;
use crate::drain::{self, DrainFlags};
use crate::prompt::TerminalPrompter;
use crate::report::{self, TerminalReporter};

const DRAIN_LONG_ABOUT: &str = "\
Toggles node draining on a specified node. It is required that either
--enable or --disable is specified, but not both. The --self flag is useful
to drain the local node.

A node given by id prefix must be confirmed interactively unless --yes is
set; answer with an exact 'y'.";

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Toggle drain mode on a given node
    #[command(long_about = DRAIN_LONG_ABOUT)]
    Drain(DrainArgs),
}

#[derive(Debug, clap::Args)]
pub struct DrainArgs {
    /// Enable draining for the specified node
    #[arg(long)]
    enable: bool,

    /// Disable draining for the specified node
    #[arg(long)]
    disable: bool,

    /// Deadline by which all allocations must be moved off the node;
    /// whatever remains is force-stopped. Defaults to one hour
    #[arg(long, value_name = "DURATION", allow_hyphen_values = true)]
    deadline: Option<String>,

    /// Force remove allocations off the node immediately
    #[arg(long)]
    force: bool,

    /// Let allocations drain off the node without ever force-stopping them
    #[arg(long)]
    no_deadline: bool,

    /// Complete the drain without stopping system job allocations
    #[arg(long)]
    ignore_system: bool,

    /// Set the drain status of the local node
    #[arg(long = "self")]
    self_node: bool,

    /// Automatic yes to prompts
    #[arg(long)]
    yes: bool,

    /// Node id or id prefix (omit with --self)
    #[arg(value_name = "NODE")]
    node: Vec<String>,
}

impl From<DrainArgs> for DrainFlags {
    fn from(args: DrainArgs) -> Self {
        Self {
            enable: args.enable,
            disable: args.disable,
            deadline: args.deadline,
            force: args.force,
            no_deadline: args.no_deadline,
            ignore_system: args.ignore_system,
            self_node: args.self_node,
            yes: args.yes,
            args: args.node,
        }
    }
}

pub fn run(command: NodeCommands, config: &Config) -> Result<()> {
    match command {
        NodeCommands::Drain(args) => run_drain(args, config),
    }
}

fn run_drain(args: DrainArgs, config: &Config) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(drain_async(args, config))
}

async fn drain_async(args: DrainArgs, config: &Config) -> Result<()> {
    // Flag errors win over connection setup errors.
    let prepared = drain::prepare(args.into())?;
    let client = ClusterClient::new(config)?;
    let outcome = drain::run(&client, &mut TerminalPrompter, prepared).await?;
    report::report(&mut TerminalReporter, &outcome);
    Ok(())
}
