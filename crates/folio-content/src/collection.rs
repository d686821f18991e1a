//! Collection trait.

use crate::entry::{DocEntry, MetaEntry};
use crate::error::ContentError;

/// Source of pre-generated documentation entries and folder metadata.
///
/// Implementations return entries with paths relative to the content root.
/// Hierarchy, slugs and ordering are derived by the consumer (`Source`) from
/// those paths, so a collection only has to enumerate what exists.
pub trait Collection: Send + Sync {
    /// Return all documentation entries.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the collection cannot be read or an entry
    /// is malformed.
    fn docs(&self) -> Result<Vec<DocEntry>, ContentError>;

    /// Return all folder metadata entries.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the collection cannot be read or a
    /// metadata file is malformed.
    fn meta(&self) -> Result<Vec<MetaEntry>, ContentError>;
}
