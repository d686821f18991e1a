//! `folio page` command implementation.

use clap::Args;
use folio_source::{BreadcrumbItem, Item, Page, Source};
use serde::Serialize;

use super::SourceArgs;
use super::tree::item_line;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Page URL (`/docs/guide`), slug path (`guide/setup`) or file (`guide/setup.mdx`).
    path: String,

    /// Print the page as JSON.
    #[arg(long)]
    json: bool,
}

/// Page with its navigation context.
#[derive(Serialize)]
struct PageReport<'a> {
    #[serde(flatten)]
    page: &'a Page,
    breadcrumbs: Vec<BreadcrumbItem>,
    previous: Option<&'a Item>,
    next: Option<&'a Item>,
}

impl PageArgs {
    /// Execute the page command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.source.load_site()?;
        let source = site.source();

        let page =
            lookup(source, &self.path).ok_or_else(|| CliError::PageNotFound(self.path.clone()))?;
        let neighbours = source.find_neighbour(&page.url);
        let report = PageReport {
            page,
            breadcrumbs: source.breadcrumbs(&page.url),
            previous: neighbours.previous,
            next: neighbours.next,
        };

        if self.json {
            output.json(&report)?;
        } else {
            print_report(&output, source, &report);
        }
        Ok(())
    }
}

/// Find a page by URL, file path or slug path.
fn lookup<'a>(source: &'a Source, path: &str) -> Option<&'a Page> {
    if path.starts_with('/') {
        return source.get_page_by_url(path);
    }
    if path.ends_with(".mdx") || path.ends_with(".md") {
        return source.get_page_by_file(path);
    }
    let slugs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    source.get_page(&slugs)
}

fn print_report(output: &Output, source: &Source, report: &PageReport<'_>) {
    let page = report.page;
    output.print(&output.strong(&page.title));
    output.print(&format!("URL:   {}", page.url));
    output.print(&format!("File:  {}", page.file.path));
    if let Some(description) = page.description() {
        output.print(&format!("About: {description}"));
    }
    if let Some(attachment) = source
        .page_tree()
        .find_item(&page.url)
        .and_then(|item| item.attachment.as_ref())
    {
        let badge = attachment.badge.as_deref().unwrap_or_default();
        match &attachment.file {
            Some(file) => output.print(&format!("API:   {badge} ({file})")),
            None => output.print(&format!("API:   {badge}")),
        }
    }

    if !report.breadcrumbs.is_empty() {
        let trail: Vec<&str> = report.breadcrumbs.iter().map(|b| b.name.as_str()).collect();
        output.print(&format!("Path:  {}", trail.join(" > ")));
    }
    if let Some(previous) = report.previous {
        output.print(&format!("Prev:  {}", item_line(output, previous)));
    }
    if let Some(next) = report.next {
        output.print(&format!("Next:  {}", item_line(output, next)));
    }
}
