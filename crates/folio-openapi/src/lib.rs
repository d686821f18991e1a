//! `OpenAPI` integration for Folio documentation sites.
//!
//! This crate provides:
//! - [`OpenApi`]: Descriptor that loads, caches and resolves `OpenAPI` 3.x documents
//! - [`attach_file`]: Page tree hook badging generated API pages with their method
//! - [`generate_entries`]: One documentation entry per operation
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_content::MdxSource;
//! use folio_openapi::{GenerateOptions, OpenApi, attach_file, generate_entries};
//! use folio_source::{LoaderOptions, Source};
//!
//! let openapi = OpenApi::default();
//! let document = openapi.register_document(
//!     "api.json",
//!     r#"{ "openapi": "3.0.0", "paths": { "/users": { "get": { "operationId": "listUsers" } } } }"#,
//! )?;
//!
//! let generated = generate_entries(&document, &GenerateOptions::default());
//! let docs = MdxSource::new(generated.docs, generated.meta);
//! let source = Source::new(&docs, LoaderOptions::new("/docs").with_attach_file(attach_file))?;
//!
//! let item = source.page_tree().find_item("/docs/api/list-users").unwrap();
//! assert_eq!(item.attachment.as_ref().unwrap().badge.as_deref(), Some("GET"));
//! # Ok(())
//! # }
//! ```

mod attach;
mod document;
mod error;
mod generate;
mod method;
mod openapi;

pub use attach::{OPENAPI_FRONTMATTER_KEY, attach_file};
pub use document::{OperationRef, SchemaDocument};
pub use error::OpenApiError;
pub use generate::{GenerateOptions, GeneratedEntries, generate_entries};
pub use method::HttpMethod;
pub use openapi::{
    ApiOperation, ApiPage, ApiPageProps, OpenApi, OpenApiOptions, OperationSelector,
};
