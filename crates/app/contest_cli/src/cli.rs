use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use contest_core::submission::DEFAULT_SUBMISSION_DELAY;

#[derive(Parser, Debug)]
#[command(name = "contest", version, about = "Parking ticket contest tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// List the contest-reason catalog.
    Reasons,

    /// Replay a YAML script of session commands against a fresh session.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Script file: a YAML list of commands tagged by `op`.
    pub script: PathBuf,

    /// Chat relay endpoint. Falls back to `CHAT_RELAY_URL`; without either,
    /// chat requests are dropped.
    #[arg(long)]
    pub relay_url: Option<String>,

    /// Bearer key sent to the relay.
    #[arg(long, env = "CHAT_RELAY_KEY", hide_env_values = true)]
    pub relay_key: Option<String>,

    /// Simulated latency of the mock submission service.
    #[arg(long, default_value_t = DEFAULT_SUBMISSION_DELAY.as_millis() as u64)]
    pub submit_delay_ms: u64,

    /// Print the final session as JSON instead of the transcript.
    #[arg(long)]
    pub json: bool,
}
