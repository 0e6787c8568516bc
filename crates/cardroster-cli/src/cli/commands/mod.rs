//! CLI command handlers, one per file.

pub(crate) mod browse;
mod config;
mod show;

use anyhow::{Context, Result};
use cardroster_core::config::RosterConfig;
use cardroster_core::fetch::CurlTransport;
use cardroster_core::roster::RosterResolver;
use cardroster_core::sink::RenderSink;
use cardroster_core::RefreshOrchestrator;
use std::sync::Arc;

pub use browse::run_browse;
pub use config::run_config;
pub use show::run_show;

fn build_orchestrator<S: RenderSink>(
    cfg: &RosterConfig,
    sink: Arc<S>,
) -> Result<RefreshOrchestrator<CurlTransport, S>> {
    let resolver = RosterResolver::from_config(cfg, Arc::new(CurlTransport::default()))
        .context("invalid configuration")?;
    Ok(RefreshOrchestrator::new(resolver, sink))
}
