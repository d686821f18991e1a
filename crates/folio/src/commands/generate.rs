//! `folio generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_content::Collection;
use folio_site::DocsSite;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Manifest file to write.
    #[arg(short, long)]
    output: PathBuf,
}

impl GenerateArgs {
    /// Execute the generate command: scan content into a manifest.
    ///
    /// The scanned entries are loaded once before writing so that a manifest
    /// the loader would reject is never produced.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;

        output.info(&format!(
            "Scanning {}",
            config.docs_resolved.source_dir.display()
        ));
        let collection = DocsSite::scan_content(&config)?;
        DocsSite::new(&collection, &config.docs_resolved.base_url)?;

        if let Some(parent) = self.output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.output, collection.to_manifest_json()?)?;

        output.success(&format!(
            "Wrote {} pages and {} meta files to {}",
            collection.len(),
            collection.meta()?.len(),
            self.output.display()
        ));
        Ok(())
    }
}
