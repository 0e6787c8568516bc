//! `cardroster config` – print the effective configuration.

use anyhow::Result;
use cardroster_core::config::RosterConfig;
use std::path::Path;

pub fn run_config(cfg: &RosterConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", cfg.to_toml()?);
    Ok(())
}
