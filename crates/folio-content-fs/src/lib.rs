//! Filesystem content generator for the Folio documentation loader.
//!
//! This crate provides [`FsCollection`], a filesystem-based implementation of
//! the [`Collection`](folio_content::Collection) trait. It plays the role of
//! the build-time content generator:
//!
//! - Recursive directory scanning for `.mdx`/`.md` pages and `meta.json` files
//! - YAML frontmatter parsing, with title fallback to the first H1 heading
//! - Parallel parsing of discovered files
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_content::Collection;
//! use folio_content_fs::FsCollection;
//!
//! let collection = FsCollection::new(PathBuf::from("content/docs"));
//! for doc in collection.docs()? {
//!     println!("{}", doc.path);
//! }
//! ```

mod frontmatter;
mod scanner;

use std::path::{Path, PathBuf};

use folio_content::{Collection, ContentError, ContentErrorKind, DocEntry, MetaData, MetaEntry};
use glob::Pattern;
use rayon::prelude::*;
use regex::Regex;

use frontmatter::{parse_frontmatter, split_frontmatter};
use scanner::{FileRef, Scanner};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default page patterns.
const DEFAULT_PATTERNS: [&str; 2] = ["**/*.mdx", "**/*.md"];

/// Filesystem content collection.
///
/// Scans a content directory recursively and parses every page and
/// `meta.json` file it finds. Each call to [`docs`](Collection::docs) or
/// [`meta`](Collection::meta) rescans the directory; wrap the result in an
/// `MdxSource` snapshot when the entries are needed more than once.
pub struct FsCollection {
    scanner: Scanner,
    h1_regex: Regex,
}

impl FsCollection {
    /// Create a collection with the default `**/*.mdx` and `**/*.md` patterns.
    ///
    /// # Panics
    ///
    /// Panics if the built-in patterns or the H1 regex fail to compile.
    /// This should never happen as both are compile-time constants.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .map(|p| Pattern::new(p).expect("invalid built-in glob pattern"))
            .collect();
        Self::from_parts(source_dir, patterns)
    }

    /// Create a collection with custom page patterns.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing content files
    /// * `patterns` - Glob patterns relative to the root (e.g., `["guides/**/*.mdx"]`)
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPath` error if a pattern is not a valid glob.
    pub fn with_patterns(source_dir: PathBuf, patterns: &[String]) -> Result<Self, ContentError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    ContentError::new(ContentErrorKind::InvalidPath)
                        .with_backend(BACKEND)
                        .with_message(format!("invalid glob pattern {p:?}"))
                        .with_source(e)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(source_dir, patterns))
    }

    fn from_parts(source_dir: PathBuf, patterns: Vec<Pattern>) -> Self {
        Self {
            scanner: Scanner::new(source_dir, patterns),
            h1_regex: Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*#*[ \t]*$").expect("invalid H1 regex"),
        }
    }

    /// Root content directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        self.scanner.source_dir()
    }

    /// Read and parse a page file.
    fn read_doc(&self, file: &FileRef) -> Result<DocEntry, ContentError> {
        let content = std::fs::read_to_string(&file.abs_path).map_err(|e| {
            ContentError::io(e, Some(PathBuf::from(&file.rel_path))).with_backend(BACKEND)
        })?;

        let (yaml, body) = split_frontmatter(&content);
        let mut frontmatter = match yaml {
            Some(yaml) => parse_frontmatter(yaml)
                .map_err(|e| ContentError::malformed(&file.rel_path, e).with_backend(BACKEND))?,
            None => folio_content::Frontmatter::default(),
        };

        if frontmatter.title.is_none() {
            frontmatter.title = self.extract_h1(body);
        }

        tracing::debug!(path = %file.rel_path, "Parsed page");

        Ok(DocEntry::new(file.rel_path.clone(), frontmatter, body))
    }

    /// Extract the first H1 heading from a markdown body.
    fn extract_h1(&self, body: &str) -> Option<String> {
        self.h1_regex
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
    }
}

/// Read and parse a `meta.json` file.
fn read_meta(file: &FileRef) -> Result<MetaEntry, ContentError> {
    let content = std::fs::read_to_string(&file.abs_path).map_err(|e| {
        ContentError::io(e, Some(PathBuf::from(&file.rel_path))).with_backend(BACKEND)
    })?;

    let data: MetaData = serde_json::from_str(&content)
        .map_err(|e| ContentError::malformed(&file.rel_path, e).with_backend(BACKEND))?;

    Ok(MetaEntry::new(file.rel_path.clone(), data))
}

impl Collection for FsCollection {
    fn docs(&self) -> Result<Vec<DocEntry>, ContentError> {
        let scan = self.scanner.scan();
        let docs = scan
            .pages
            .par_iter()
            .map(|file| self.read_doc(file))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            dir = %self.source_dir().display(),
            count = docs.len(),
            "Scanned content pages"
        );

        Ok(docs)
    }

    fn meta(&self) -> Result<Vec<MetaEntry>, ContentError> {
        let scan = self.scanner.scan();
        scan.metas.par_iter().map(read_meta).collect()
    }
}
