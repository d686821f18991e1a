//! Attach-file hook.

use crate::page::Page;
use crate::tree::Attachment;

/// Hook called for every page item while the page tree is built.
///
/// Returning `Some` attaches the annotation to the page's tree item.
/// Closures with the matching signature implement this trait:
///
/// ```
/// use folio_source::{AttachFile, Attachment, Page};
///
/// fn badge_drafts(page: &Page) -> Option<Attachment> {
///     page.entry.frontmatter.extra.contains_key("draft").then(|| Attachment {
///         badge: Some("DRAFT".to_owned()),
///         file: None,
///     })
/// }
///
/// fn assert_hook(_: &dyn AttachFile) {}
/// assert_hook(&badge_drafts);
/// ```
pub trait AttachFile: Send + Sync {
    /// Compute the annotation for a page, if any.
    fn attach(&self, page: &Page) -> Option<Attachment>;
}

impl<F> AttachFile for F
where
    F: Fn(&Page) -> Option<Attachment> + Send + Sync,
{
    fn attach(&self, page: &Page) -> Option<Attachment> {
        self(page)
    }
}
