//! Loader error types.

use folio_content::ContentError;

/// Error returned when building a [`Source`](crate::Source).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The collection failed to produce its entries, or an entry path is invalid.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Base URL does not start with `/`.
    #[error("Base URL must start with '/': {0:?}")]
    InvalidBaseUrl(String),

    /// Two pages resolve to the same slugs.
    #[error("Duplicate slug {slug:?}: {first} and {second}")]
    DuplicateSlug {
        /// Conflicting slug path.
        slug: String,
        /// File path of the page loaded first.
        first: String,
        /// File path of the conflicting page.
        second: String,
    },

    /// Meta entry path is not a `meta.json` file.
    #[error("Meta entry must be named meta.json: {0}")]
    InvalidMetaPath(String),

    /// Two meta entries describe the same folder.
    #[error("Duplicate meta for folder {0:?}")]
    DuplicateMeta(String),
}
