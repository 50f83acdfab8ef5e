use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tasktable_shared::TaskId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasktable",
    version,
    about = "Task table with titles, statuses and deadlines",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show tasks, optionally filtered (all, active, completed)
    List {
        #[arg(short = 'f', long = "filter")]
        filter: Option<String>,
    },
    /// Add a task; every field is required
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        status: String,
        #[arg(long, default_value = "")]
        deadline: String,
    },
    /// Rename a task
    Title { id: TaskId, title: String },
    /// Change a task's status
    Status { id: TaskId, status: String },
    /// Change a task's deadline
    Deadline { id: TaskId, deadline: String },
    /// Delete a task
    Delete { id: TaskId },
    /// Show a single task
    Show { id: TaskId },
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Command, GlobalCli, KeyVal};

    #[test]
    fn keyval_splits_on_first_equals() {
        let kv: KeyVal = "default_filter = a=b".parse().expect("parse");
        assert_eq!(kv.key, "default_filter");
        assert_eq!(kv.value, "a=b");
        assert!("nokey".parse::<KeyVal>().is_err());
    }

    #[test]
    fn parses_add_with_global_flags() {
        let cli = GlobalCli::parse_from([
            "tasktable",
            "add",
            "--title",
            "Submit report",
            "--status",
            "active",
            "--deadline",
            "2026-11-01",
            "-vv",
            "--rc",
            "color=off",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.rc_overrides.len(), 1);
        assert_eq!(
            cli.command,
            Some(Command::Add {
                title: "Submit report".to_string(),
                status: "active".to_string(),
                deadline: "2026-11-01".to_string(),
            })
        );
    }

    #[test]
    fn add_fields_default_to_empty() {
        let cli = GlobalCli::parse_from(["tasktable", "add"]);
        assert_eq!(
            cli.command,
            Some(Command::Add {
                title: String::new(),
                status: String::new(),
                deadline: String::new(),
            })
        );
    }
}
