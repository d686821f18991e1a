//! Documentation site wiring for Folio.
//!
//! This crate binds the loader and the `OpenAPI` descriptor together:
//! - [`DocsSite`]: the loaded [`Source`](folio_source::Source) paired with an
//!   [`OpenApi`](folio_openapi::OpenApi) descriptor
//! - [`SiteError`]: errors raised while building the site
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_config::Config;
//! use folio_site::DocsSite;
//!
//! let config = Config::load(None, None)?;
//! let site = DocsSite::init_global(DocsSite::from_config(&config)?)?;
//!
//! // Look up a page
//! let page = site.source().get_page(&["guide", "setup"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod site;

pub use error::SiteError;
pub use site::DocsSite;
