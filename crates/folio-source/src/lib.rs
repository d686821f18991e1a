//! Page tree and page lookup for Folio documentation sites.
//!
//! This crate provides:
//! - [`Source`]: Loader turning a content collection into pages and a page tree
//! - [`PageTree`]: Navigation structure with breadcrumbs and neighbours
//! - [`AttachFile`]: Hook annotating page tree items
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_content::{MdxSource, MetaData};
//! use folio_source::{LoaderOptions, Source};
//!
//! let docs = MdxSource::default()
//!     .with_doc("index.mdx", "Welcome", "")
//!     .with_doc("guide/install.mdx", "Install", "")
//!     .with_meta("meta.json", MetaData {
//!         pages: Some(vec!["index".to_owned(), "---Guides---".to_owned(), "...".to_owned()]),
//!         ..Default::default()
//!     });
//!
//! let source = Source::new(&docs, LoaderOptions::new("/docs"))?;
//!
//! let page = source.get_page(&["guide", "install"]).unwrap();
//! assert_eq!(page.url, "/docs/guide/install");
//! assert_eq!(source.page_tree().children.len(), 3);
//! # Ok(())
//! # }
//! ```

mod attach;
mod builder;
mod error;
mod page;
mod slug;
mod source;
mod tree;

pub use attach::AttachFile;
pub use error::SourceError;
pub use page::Page;
pub use slug::FileInfo;
pub use source::{DEFAULT_BASE_URL, DEFAULT_ROOT_NAME, LoaderOptions, SlugParams, Source};
pub use tree::{Attachment, BreadcrumbItem, Folder, Item, Neighbours, Node, PageTree, Separator};
