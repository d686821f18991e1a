//! `folio openapi` command implementation.

use clap::Args;
use folio_openapi::{OpenApi, OpenApiOptions};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the openapi command.
#[derive(Args)]
pub(crate) struct OpenApiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Document path, relative to the config directory.
    document: String,

    /// Print the operations as JSON.
    #[arg(long)]
    json: bool,
}

impl OpenApiArgs {
    /// Execute the openapi command: list the operations of a document.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;

        let openapi = OpenApi::new(OpenApiOptions {
            base_dir: config.base_dir().to_path_buf(),
            ..OpenApiOptions::default()
        });
        let document = openapi.load_document(&self.document)?;
        let operations = document.operations();

        if self.json {
            output.json(&operations)?;
            return Ok(());
        }

        let heading = format!(
            "{} (OpenAPI {})",
            document.title().unwrap_or(document.id()),
            document.version()
        );
        output.print(&output.strong(&heading));
        if operations.is_empty() {
            output.warning("No operations found");
        }
        for operation in &operations {
            output.print(&format!(
                "  {:<7} {}  {}",
                operation.method.badge(),
                operation.path,
                output.dim(&operation.title())
            ));
        }
        Ok(())
    }
}
