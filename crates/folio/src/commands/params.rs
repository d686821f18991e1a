//! `folio params` command implementation.

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the params command.
#[derive(Args)]
pub(crate) struct ParamsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl ParamsArgs {
    /// Execute the params command: print route params of every page as JSON.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.source.load_site()?;
        output.json(&site.source().generate_params())?;
        Ok(())
    }
}
