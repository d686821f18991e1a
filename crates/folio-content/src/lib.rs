//! Content collection model for the Folio documentation loader.
//!
//! This crate provides the build-time side of a documentation site:
//!
//! - [`DocEntry`] and [`MetaEntry`]: pre-generated pages and folder metadata
//! - [`Collection`] trait for handing `docs`/`meta` collections to the loader
//! - [`MdxSource`]: in-memory collection built from generated entries or a
//!   JSON [`Manifest`]
//! - [`ContentError`] for unified error handling across collection backends
//!
//! # Path Convention
//!
//! Entry paths are **file paths relative to the content root**, always with
//! `/` separators:
//! - `"index.mdx"` - root page
//! - `"guide/intro.mdx"` - nested page
//! - `"guide/meta.json"` - metadata for the `guide` folder
//!
//! # Example
//!
//! ```
//! use folio_content::{Collection, DocEntry, MdxSource};
//!
//! let source = MdxSource::new(
//!     vec![DocEntry::with_title("guide/intro.mdx", "Introduction")],
//!     Vec::new(),
//! );
//! assert_eq!(source.docs().unwrap().len(), 1);
//! ```

mod collection;
mod entry;
mod error;
mod mdx;
mod path;

pub use collection::Collection;
pub use entry::{DocEntry, Frontmatter, MetaData, MetaEntry};
pub use error::{ContentError, ContentErrorKind};
pub use mdx::{MANIFEST_VERSION, Manifest, MdxSource};
pub use path::normalize_path;
