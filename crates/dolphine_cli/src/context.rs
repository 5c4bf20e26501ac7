//! CLI execution context: output handler and the open store.

use std::path::Path;

use anyhow::{anyhow, Context as _, Result};
use dolphine_core::{default_log_level, init_logging, Storefront};
use log::info;

use crate::config::{CliConfig, Overrides};
use crate::output::Output;

pub struct Context {
    pub output: Output,
    pub store: Storefront,
}

impl Context {
    /// Resolves configuration, starts file logging when configured and opens
    /// the storefront database.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let mut config = CliConfig::discover(config_path, &cwd)?;
        config.apply_overrides(overrides);

        if let Some(dir) = &config.logging.dir {
            let level = config
                .logging
                .level
                .as_deref()
                .unwrap_or(default_log_level());
            let dir = dir
                .to_str()
                .ok_or_else(|| anyhow!("Log directory is not valid UTF-8: {}", dir.display()))?;
            init_logging(level, dir).map_err(|err| anyhow!(err))?;
        }

        let db_path = &config.store.db_path;
        let store = Storefront::open(db_path, config.storefront_settings())
            .with_context(|| format!("Failed to open store: {}", db_path.display()))?;
        info!(
            "event=cli_start module=cli status=ok db_path={}",
            db_path.display()
        );

        Ok(Self { output, store })
    }
}
