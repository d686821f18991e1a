//! Loaded page type.

use folio_content::DocEntry;
use serde::Serialize;

use crate::slug::{FileInfo, segment_display_name, titlecase_from_slug};

/// A documentation page resolved by the loader.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    /// Location of the source file.
    pub file: FileInfo,
    /// URL slugs (empty for the root index page).
    pub slugs: Vec<String>,
    /// Absolute URL including the base URL.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Generated entry (frontmatter and body).
    pub entry: DocEntry,
}

impl Page {
    /// Slugs joined with `/` (e.g., "guide/setup", "" for root).
    #[must_use]
    pub fn slug_path(&self) -> String {
        self.slugs.join("/")
    }

    /// Page description from frontmatter.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.entry.frontmatter.description.as_deref()
    }

    /// Check if this page is the index of its folder.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.file.name == "index"
    }
}

/// Resolve a page title.
///
/// Frontmatter title wins. Otherwise index pages are named after their
/// folder ("Home" at the root) and other pages after their file name.
pub(crate) fn page_title(entry: &DocEntry, file: &FileInfo) -> String {
    if let Some(title) = entry.title().filter(|t| !t.trim().is_empty()) {
        return title.to_owned();
    }

    if file.name == "index" {
        return match file.dirname.rsplit('/').next().filter(|s| !s.is_empty()) {
            Some(segment) => titlecase_from_slug(segment_display_name(segment)),
            None => "Home".to_owned(),
        };
    }

    titlecase_from_slug(&file.name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn title_for(path: &str, title: Option<&str>) -> String {
        let entry = match title {
            Some(t) => DocEntry::with_title(path, t),
            None => DocEntry::new(path, folio_content::Frontmatter::default(), ""),
        };
        page_title(&entry, &FileInfo::parse(path))
    }

    #[test]
    fn test_page_title_prefers_frontmatter() {
        assert_eq!(title_for("guide/setup.mdx", Some("Getting Set Up")), "Getting Set Up");
    }

    #[test]
    fn test_page_title_falls_back_to_file_name() {
        assert_eq!(title_for("guide/first-steps.mdx", None), "First Steps");
    }

    #[test]
    fn test_page_title_blank_frontmatter_title_ignored() {
        assert_eq!(title_for("setup.mdx", Some("  ")), "Setup");
    }

    #[test]
    fn test_page_title_index_uses_folder_name() {
        assert_eq!(title_for("user-guide/index.mdx", None), "User Guide");
        assert_eq!(title_for("(internal)/index.mdx", None), "Internal");
    }

    #[test]
    fn test_page_title_root_index_is_home() {
        assert_eq!(title_for("index.mdx", None), "Home");
    }
}
