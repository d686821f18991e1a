//! Folio CLI - documentation content loader.
//!
//! Provides commands for:
//! - `tree`: Print the page tree
//! - `page`: Show a page with its breadcrumbs and neighbours
//! - `params`: Print route params of every page
//! - `generate`: Scan content into a manifest
//! - `openapi`: List the operations of an `OpenAPI` document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateArgs, OpenApiArgs, PageArgs, ParamsArgs, SourceArgs, TreeArgs};
use output::Output;

/// Folio - documentation content loader.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page tree.
    Tree(TreeArgs),
    /// Show a page with its breadcrumbs and neighbours.
    Page(PageArgs),
    /// Print route params of every page as JSON.
    Params(ParamsArgs),
    /// Scan the content directory into a manifest.
    Generate(GenerateArgs),
    /// List the operations of an OpenAPI document.
    #[command(name = "openapi")]
    OpenApi(OpenApiArgs),
}

impl Commands {
    fn source_args(&self) -> &SourceArgs {
        match self {
            Self::Tree(args) => &args.source,
            Self::Page(args) => &args.source,
            Self::Params(args) => &args.source,
            Self::Generate(args) => &args.source,
            Self::OpenApi(args) => &args.source,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.source_args().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Params(args) => args.execute(),
        Commands::Generate(args) => args.execute(),
        Commands::OpenApi(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
