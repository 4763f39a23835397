//! `clawrecall hook` — answer a "before agent start" event.
//!
//! Reads the event JSON from stdin and writes the response JSON to stdout.
//! After the configuration has loaded, every outcome is a valid response:
//! unreadable events and search failures produce `{}`.

use clawrecall_core::Result;
use clawrecall_core::hook::{BeforeAgentStartEvent, HookResponse};
use clawrecall_recall::SessionRecall;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::warn;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let recall = SessionRecall::from_config(config)?;

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let response = respond(&recall, &input).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Parse `input` as an event and run recall for it.
pub async fn respond(recall: &SessionRecall, input: &str) -> HookResponse {
    match serde_json::from_str::<BeforeAgentStartEvent>(input) {
        Ok(event) => recall.before_agent_start(&event).await,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable hook event");
            HookResponse::none()
        }
    }
}
