//! YAML frontmatter parsing for filesystem content.

use folio_content::Frontmatter;

/// Split a document into its frontmatter block and body.
///
/// The frontmatter block must open on the first line with `---` and close
/// with a line containing only `---`. Documents without a closed block are
/// returned whole as body.
pub(crate) fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(after_open) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Frontmatter parse failure.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FrontmatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid frontmatter: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Parse frontmatter YAML.
///
/// Empty blocks produce default frontmatter. The block is converted to a
/// JSON value first, so non-string map keys (`404: Not found`) become
/// string keys.
///
/// # Errors
///
/// Returns an error if the block is malformed or a known key has the wrong
/// type.
pub(crate) fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(Frontmatter::default());
    }
    let value: serde_yaml::Value = serde_yaml::from_str(trimmed)?;
    let json = serde_json::to_value(value)?;
    Ok(serde_json::from_value(json)?)
}
