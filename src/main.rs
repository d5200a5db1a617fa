mod client;
mod commands;
mod config;
mod domain;
mod drain;
mod prompt;
mod report;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;

use crate::commands::node::NodeCommands;
use crate::config::CliOverrides;
use crate::drain::{DrainError, ErrorKind};

/// Long flags that may also be spelled with a single dash (`-enable`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "enable",
    "disable",
    "deadline",
    "force",
    "no-deadline",
    "ignore-system",
    "self",
    "yes",
    "address",
    "region",
    "token",
    "config",
    "log-level",
];

#[derive(Parser)]
#[command(name = "nodectl", version, about = "Cluster node management CLI")]
struct Cli {
    /// Address of the cluster management API
    #[arg(long, global = true)]
    address: Option<String>,

    /// Region to forward requests to
    #[arg(long, global = true)]
    region: Option<String>,

    /// ACL token sent with every request
    #[arg(long, global = true)]
    token: Option<String>,

    /// Path to config file (default: ~/.config/nodectl/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides config; RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node management
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },
}

/// Rewrite `-flag` / `-flag=value` to `--flag...` for known long flags, up to
/// a literal `--`.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if SINGLE_DASH_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", s))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_drain_usage() {
    let mut cmd = Cli::command();
    if let Some(drain) = cmd
        .find_subcommand_mut("node")
        .and_then(|node| node.find_subcommand_mut("drain"))
    {
        eprintln!("{}", drain.render_long_help());
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let overrides = CliOverrides {
        address: cli.address,
        region: cli.region,
        token: cli.token,
        log_level: cli.log_level,
    };
    let cfg = match config::load(cli.config.as_deref(), &overrides) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} {:#}", "!!".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&cfg.log_level);

    let result = match cli.command {
        Commands::Node { command } => commands::node::run(command, &cfg),
    };

    if let Err(e) = &result {
        report_failure(e);
    }
    exit_code(&result)
}

/// Cancelled toggles end in `Ok`; every failure exits 1.
fn exit_code(result: &anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn report_failure(e: &anyhow::Error) {
    let drain_err = e.downcast_ref::<DrainError>();
    if drain_err.is_some_and(DrainError::wants_usage) {
        print_drain_usage();
    }
    eprintln!("{} {:#}", "!!".red().bold(), e);
    if drain_err.is_some_and(|d| d.kind() == ErrorKind::Usage && !d.wants_usage()) {
        eprintln!("   Run `nodectl node drain --help` for usage.");
    }
}
