//! Site construction errors.

use folio_content::ContentError;
use folio_openapi::OpenApiError;
use folio_source::SourceError;

/// Error returned when the documentation site cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Collection backend or manifest error.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// Loader error (base URL, duplicate slugs, invalid meta).
    #[error(transparent)]
    Source(#[from] SourceError),
    /// `OpenAPI` document error.
    #[error(transparent)]
    OpenApi(#[from] OpenApiError),
    /// [`DocsSite::init_global`](crate::DocsSite::init_global) was called twice.
    #[error("Documentation site is already initialized")]
    AlreadyInitialized,
}
