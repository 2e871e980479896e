use contest_core::command::CommandError;
use contest_core::responder::ResponderError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Yaml: {}", .0)]
    Yaml(#[from] serde_yaml::Error),

    #[error("Json: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Responder: {}", .0)]
    Responder(#[from] ResponderError),

    #[error("Step {index} ({op}): {source}")]
    Command {
        index: usize,
        op: &'static str,
        #[source]
        source: CommandError,
    },
}
