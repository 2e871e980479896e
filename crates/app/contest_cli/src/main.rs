// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use contest_core::reasons;

mod cli;
mod logging;
mod replay;

fn main() -> Result<()> {
    let _logger = logging::init()?;

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Reasons => {
            for reason in reasons::catalog() {
                println!("{:<22} {:<7} {}", reason.id, reason.success_rate, reason.title);
            }
        }
        Commands::Replay(replay_args) => replay::run(replay_args)?,
    }

    Ok(())
}
