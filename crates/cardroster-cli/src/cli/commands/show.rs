//! `cardroster show <user>` – resolve one roster and print it.

use anyhow::Result;
use cardroster_core::config::RosterConfig;
use cardroster_core::roster::UserId;
use std::sync::Arc;

use super::build_orchestrator;
use crate::cli::sink::TerminalSink;

pub async fn run_show(cfg: &RosterConfig, user: UserId) -> Result<()> {
    let orchestrator = build_orchestrator(cfg, Arc::new(TerminalSink::stdout()))?;
    orchestrator.change_user(user);
    orchestrator.wait().await;

    let cards = orchestrator.rendered().len();
    if cards == 0 {
        println!("No cards.");
    }
    tracing::info!(user, cards, "show finished");
    Ok(())
}
