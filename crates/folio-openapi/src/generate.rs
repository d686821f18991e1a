//! API reference page generation.
//!
//! Turns every operation of a document into a documentation entry that the
//! loader places in the page tree like any authored page.

use std::collections::HashSet;

use folio_content::{DocEntry, Frontmatter, MetaData, MetaEntry};
use serde_json::{Value, json};

use crate::attach::OPENAPI_FRONTMATTER_KEY;
use crate::document::{OperationRef, SchemaDocument};
use crate::openapi::OperationSelector;

/// Page generation options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Folder of the generated pages relative to the content root ("" for root).
    pub output_dir: String,
    /// Render the operation heading on generated pages.
    pub has_head: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: "api".to_owned(),
            has_head: true,
        }
    }
}

/// Generated entries, ready to merge into a collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneratedEntries {
    /// One page per operation.
    pub docs: Vec<DocEntry>,
    /// `meta.json` of the output folder.
    pub meta: Vec<MetaEntry>,
}

/// Generate one page per operation of a document.
///
/// Page names come from `operationId` (kebab-cased), else from the method
/// and route; clashes get a numeric suffix. The output folder gets a
/// `meta.json` titled after the document, unless it is the content root.
pub fn generate_entries(document: &SchemaDocument, options: &GenerateOptions) -> GeneratedEntries {
    let dir = options.output_dir.trim_matches('/');
    let prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    };

    let mut used = HashSet::new();
    let docs: Vec<DocEntry> = document
        .operations()
        .into_iter()
        .map(|operation| {
            let name = unique_name(&mut used, page_name(&operation));
            let path = format!("{prefix}{name}.mdx");
            let description = document
                .operation(&operation.path, operation.method)
                .and_then(|op| op.get("description"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned);

            let mut frontmatter = Frontmatter {
                title: Some(operation.title()),
                description,
                full: true,
                ..Default::default()
            };
            frontmatter.extra.insert(
                OPENAPI_FRONTMATTER_KEY.to_owned(),
                json!({
                    "method": operation.method.as_str(),
                    "route": operation.path,
                    "document": document.id(),
                }),
            );

            tracing::debug!(path = %path, method = %operation.method, route = %operation.path, "Generated API page");

            DocEntry::new(path, frontmatter, api_page_body(document.id(), &operation, options.has_head))
        })
        .collect();

    let meta = if dir.is_empty() {
        Vec::new()
    } else {
        vec![MetaEntry::new(
            format!("{prefix}meta.json"),
            MetaData {
                title: document.title().map(ToOwned::to_owned),
                ..Default::default()
            },
        )]
    };

    tracing::info!(document = document.id(), pages = docs.len(), "Generated API pages");

    GeneratedEntries { docs, meta }
}

/// Page body rendering a single operation.
fn api_page_body(document: &str, operation: &OperationRef, has_head: bool) -> String {
    let selectors = [OperationSelector {
        path: operation.path.clone(),
        method: operation.method,
    }];
    let document = serde_json::to_string(document).unwrap_or_default();
    let operations = serde_json::to_string(&selectors).unwrap_or_default();

    format!("<APIPage document={{{document}}} operations={{{operations}}} hasHead={{{has_head}}} />\n")
}

fn page_name(operation: &OperationRef) -> String {
    let name = match &operation.operation_id {
        Some(id) => kebab_case(id),
        None => kebab_case(&format!("{} {}", operation.method.as_str(), operation.path)),
    };
    if name.is_empty() {
        operation.method.as_str().to_owned()
    } else {
        name
    }
}

fn unique_name(used: &mut HashSet<String>, name: String) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{name}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Convert an identifier or route to kebab-case.
///
/// Splits on non-alphanumeric characters and lower-to-upper case changes.
fn kebab_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev_lower && !result.ends_with('-') {
                result.push('-');
            }
            result.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_numeric();
        } else {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            prev_lower = false;
        }
    }
    result.trim_end_matches('-').to_owned()
}
