//! Documentation entry and folder metadata types.
//!
//! Both types are produced by a build step (see `folio-content-fs` or a JSON
//! manifest) and are immutable afterwards. Parsing of frontmatter and
//! `meta.json` files is the job of the producing backend; this module only
//! holds data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Frontmatter of a documentation page.
///
/// Known keys are typed; everything else is preserved in [`extra`](Self::extra)
/// so that integrations (such as `_openapi`) can read their own keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Icon name shown next to the page in navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Render the page without the table of contents column.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub full: bool,

    /// Any other frontmatter keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Frontmatter {
    /// Check if frontmatter has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && !self.full
            && self.extra.is_empty()
    }
}

/// A single pre-generated documentation page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocEntry {
    /// File path relative to the content root (e.g., "guide/intro.mdx").
    pub path: String,
    /// Parsed frontmatter.
    #[serde(default)]
    pub frontmatter: Frontmatter,
    /// Compiled page body. Opaque to the loader.
    #[serde(default)]
    pub body: String,
}

impl DocEntry {
    /// Create an entry with frontmatter and body.
    #[must_use]
    pub fn new(path: impl Into<String>, frontmatter: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            frontmatter,
            body: body.into(),
        }
    }

    /// Create an entry with only a title and an empty body.
    #[must_use]
    pub fn with_title(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            frontmatter: Frontmatter {
                title: Some(title.into()),
                ..Default::default()
            },
            body: String::new(),
        }
    }

    /// Title from frontmatter, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.title.as_deref()
    }
}

/// Contents of a folder's `meta.json`.
///
/// The `pages` list controls the order of the folder's children in the
/// page tree. See `folio-source` for the item syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    /// Folder title (overrides the index page title and directory name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Folder description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Icon name shown next to the folder in navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Mark the folder as a navigation root (a separate sidebar tab).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub root: bool,

    /// Expand the folder by default in navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_open: Option<bool>,

    /// Ordering of the folder's children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<String>>,
}

/// A folder metadata file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    /// File path relative to the content root (e.g., "guide/meta.json").
    pub path: String,
    /// Parsed metadata.
    #[serde(default)]
    pub data: MetaData,
}

impl MetaEntry {
    /// Create a meta entry.
    #[must_use]
    pub fn new(path: impl Into<String>, data: MetaData) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}
