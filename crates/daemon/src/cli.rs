//! Command-line surface, per spec.md §6: a single `heal` subcommand plus a
//! top-level logging format flag.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "healerd", version, about = "Live-remediation daemon for the control plane bus")]
pub struct Cli {
    /// Emit structured logs as JSON instead of the default compact format.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Connect to the bus and run every registered healer until Ctrl-C.
    Heal {
        /// `user:pass@host:port` bus credentials. Falls back to
        /// `CONTRAIL_HEALER_RABBIT_URL` when omitted.
        #[arg(long)]
        rabbit_url: Option<String>,

        /// AMQP vhost. Falls back to `CONTRAIL_HEALER_RABBIT_VHOST` when
        /// omitted.
        #[arg(long)]
        rabbit_vhost: Option<String>,
    },
}
