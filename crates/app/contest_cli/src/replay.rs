//! `contest replay`: run a script of session commands and print the result.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use contest_core::command::SessionCommand;
use contest_core::responder::{DisabledResponder, HttpResponder, Responder, ResponderConfig};
use contest_core::submission::MockSubmissionService;
use contest_core::{Session, SessionManager};
use log::{debug, info};

use crate::cli::ReplayArgs;
use crate::{Error, Result};

pub fn run(args: &ReplayArgs) -> Result<()> {
    let script = fs::read_to_string(&args.script)?;
    let commands: Vec<SessionCommand> = serde_yaml::from_str(&script)?;
    info!("replaying {} command(s) from {}", commands.len(), args.script.display());

    let relay = relay_config(args);
    let relay_enabled = relay.is_some();
    let responder: Arc<dyn Responder> = match relay {
        Some(config) => Arc::new(HttpResponder::new(config)?),
        None => Arc::new(DisabledResponder),
    };
    let manager = SessionManager::new(
        responder,
        Arc::new(MockSubmissionService::new(Duration::from_millis(
            args.submit_delay_ms,
        ))),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let session = runtime.block_on(replay(&manager, commands, relay_enabled))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        print!("{}", transcript(&session));
    }
    Ok(())
}

/// `--relay-url` wins over the environment; `--relay-key` wins over whatever
/// key came with it.
fn relay_config(args: &ReplayArgs) -> Option<ResponderConfig> {
    let mut config = match &args.relay_url {
        Some(url) => ResponderConfig {
            relay_url: url.clone(),
            api_key: None,
        },
        None => ResponderConfig::from_env().ok()?,
    };
    if let Some(key) = args.relay_key.as_ref().filter(|k| !k.is_empty()) {
        config.api_key = Some(key.clone());
    }
    Some(config)
}

/// Apply `commands` in order. Chat requests are awaited inline when `chat`
/// is set, so replies land right after the message that triggered them.
async fn replay(
    manager: &SessionManager,
    commands: Vec<SessionCommand>,
    chat: bool,
) -> Result<Session> {
    let mut session = Session::new();
    for (i, command) in commands.into_iter().enumerate() {
        let op = command.name();
        let pending = manager
            .execute(&mut session, command)
            .await
            .map_err(|source| Error::Command {
                index: i + 1,
                op,
                source,
            })?;

        if !chat {
            if !pending.is_empty() {
                debug!("no relay configured, dropping {} chat request(s) from {op}", pending.len());
            }
            continue;
        }
        for request in pending {
            let reply = manager.respond(&request).await;
            session.apply_reply(reply);
        }
    }
    Ok(session)
}

/// One line per message, then the final step and submission id.
fn transcript(session: &Session) -> String {
    let mut out = String::new();
    for message in session.messages() {
        out.push_str(&format!("{:>9}: {}\n", message.role.as_str(), message.content));
    }
    out.push_str(&format!("step: {}\n", session.current_step));
    if let Some(id) = session.submission_id() {
        out.push_str(&format!("submission: {id}\n"));
    }
    out
}
