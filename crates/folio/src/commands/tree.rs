//! `folio tree` command implementation.

use clap::Args;
use folio_source::{Item, Node};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the page tree as JSON.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.source.load_site()?;
        let tree = site.source().page_tree();

        if self.json {
            output.json(tree)?;
            return Ok(());
        }

        if tree.children.is_empty() {
            output.warning("No pages found");
            return Ok(());
        }

        output.print(&output.strong(&tree.name));
        print_nodes(&output, &tree.children, 1);
        Ok(())
    }
}

fn print_nodes(output: &Output, nodes: &[Node], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            Node::Page(item) => output.print(&format!("{indent}{}", item_line(output, item))),
            Node::Folder(folder) => {
                let line = match &folder.index {
                    Some(index) => format!("{indent}{}/  {}", folder.name, output.dim(&index.url)),
                    None => format!("{indent}{}/", folder.name),
                };
                output.print(&line);
                print_nodes(output, &folder.children, depth + 1);
            }
            Node::Separator(separator) => {
                let label = format!("--- {} ---", separator.name);
                output.print(&format!("{indent}{}", output.dim(&label)));
            }
        }
    }
}

/// Item name with its badge and URL.
pub(crate) fn item_line(output: &Output, item: &Item) -> String {
    let badge = item
        .attachment
        .as_ref()
        .and_then(|a| a.badge.as_deref())
        .map(|badge| format!("[{badge}] "))
        .unwrap_or_default();
    format!("{badge}{}  {}", item.name, output.dim(&item.url))
}
