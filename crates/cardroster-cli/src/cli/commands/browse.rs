//! `cardroster browse` – switch users interactively from stdin.
//!
//! Each line is a user number; switching cancels whatever is still loading
//! for the previous user. `q` quits at once; end of input waits for the
//! current user to finish.

use anyhow::Result;
use cardroster_core::config::RosterConfig;
use cardroster_core::roster::UserId;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::build_orchestrator;
use crate::cli::sink::TerminalSink;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    User(UserId),
    Quit,
    Empty,
    Invalid,
}

pub(crate) fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }
    match line.parse::<UserId>() {
        Ok(id) if id > 0 => Input::User(id),
        _ => Input::Invalid,
    }
}

pub async fn run_browse(cfg: &RosterConfig, start_user: UserId) -> Result<()> {
    let orchestrator = build_orchestrator(cfg, Arc::new(TerminalSink::stdout()))?;
    println!("Type a user number to switch, q to quit.");
    orchestrator.change_user(start_user);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::User(id) => orchestrator.change_user(id),
            Input::Quit => {
                orchestrator.shutdown();
                return Ok(());
            }
            Input::Empty => {}
            Input::Invalid => eprintln!("not a user number: {}", line.trim()),
        }
    }

    orchestrator.wait().await;
    Ok(())
}
