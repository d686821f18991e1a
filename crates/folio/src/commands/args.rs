//! Arguments shared by every command.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::DocsSite;

use crate::error::CliError;

/// Configuration and content source arguments.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long, env = "FOLIO_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Prebuilt manifest to load instead of scanning (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Base URL of page URLs (overrides config).
    #[arg(short, long)]
    base_url: Option<String>,

    /// Enable verbose output (show loader logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SourceArgs {
    /// Load the configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            manifest: self.manifest.clone(),
            base_url: self.base_url.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config = ?config.config_path,
            source_dir = %config.docs_resolved.source_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load the configuration and build the site from it.
    pub(crate) fn load_site(&self) -> Result<DocsSite, CliError> {
        let config = self.load_config()?;
        Ok(DocsSite::from_config(&config)?)
    }
}
