//! Attach-file hook for generated API pages.

use folio_source::{Attachment, Page};
use serde_json::Value;

/// Frontmatter key written on generated API pages.
pub const OPENAPI_FRONTMATTER_KEY: &str = "_openapi";

/// Annotate API pages in the page tree.
///
/// A page whose frontmatter has `_openapi.method` gets the upper-cased
/// method as badge and `_openapi.document` as the related file. Other
/// pages get no attachment.
pub fn attach_file(page: &Page) -> Option<Attachment> {
    let openapi = page.entry.frontmatter.extra.get(OPENAPI_FRONTMATTER_KEY)?;
    let method = openapi.get("method")?.as_str()?;

    Some(Attachment {
        badge: Some(method.to_ascii_uppercase()),
        file: openapi
            .get("document")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
    })
}
