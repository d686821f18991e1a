//! In-memory MDX collection and its manifest format.
//!
//! [`MdxSource`] wraps the `docs` and `meta` collections produced by a build
//! step. It can be built directly from entries, snapshotted from any other
//! [`Collection`], or loaded from a JSON [`Manifest`] written at build time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::entry::{DocEntry, MetaData, MetaEntry};
use crate::error::{ContentError, ContentErrorKind};

/// Manifest format version written by this crate.
pub const MANIFEST_VERSION: u32 = 1;

/// Backend identifier for error messages.
const BACKEND: &str = "Manifest";

/// Serialized form of a generated collection.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version, must equal [`MANIFEST_VERSION`].
    pub version: u32,
    /// Documentation entries.
    #[serde(default)]
    pub docs: Vec<DocEntry>,
    /// Folder metadata entries.
    #[serde(default)]
    pub meta: Vec<MetaEntry>,
}

/// In-memory collection of generated documentation entries.
///
/// # Example
///
/// ```
/// use folio_content::{Collection, MdxSource, MetaData};
///
/// let source = MdxSource::default()
///     .with_doc("index.mdx", "Home", "Welcome")
///     .with_meta("guide/meta.json", MetaData::default());
///
/// assert_eq!(source.docs().unwrap()[0].path, "index.mdx");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MdxSource {
    docs: Vec<DocEntry>,
    meta: Vec<MetaEntry>,
}

impl MdxSource {
    /// Create a collection from generated `docs` and `meta` entries.
    #[must_use]
    pub fn new(docs: Vec<DocEntry>, meta: Vec<MetaEntry>) -> Self {
        Self { docs, meta }
    }

    /// Snapshot another collection into memory.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying collection.
    pub fn from_collection(collection: &dyn Collection) -> Result<Self, ContentError> {
        Ok(Self {
            docs: collection.docs()?,
            meta: collection.meta()?,
        })
    }

    /// Add a page with a title and body.
    #[must_use]
    pub fn with_doc(
        mut self,
        path: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let mut entry = DocEntry::with_title(path, title);
        entry.body = body.into();
        self.docs.push(entry);
        self
    }

    /// Add a prepared page entry.
    #[must_use]
    pub fn with_entry(mut self, entry: DocEntry) -> Self {
        self.docs.push(entry);
        self
    }

    /// Add a folder metadata entry.
    #[must_use]
    pub fn with_meta(mut self, path: impl Into<String>, data: MetaData) -> Self {
        self.meta.push(MetaEntry::new(path, data));
        self
    }

    /// Append entries from another generated set (e.g., API reference pages).
    pub fn extend(&mut self, docs: Vec<DocEntry>, meta: Vec<MetaEntry>) {
        self.docs.extend(docs);
        self.meta.extend(meta);
    }

    /// Number of documentation entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True if there are no documentation entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Parse a collection from manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns a `Malformed` error for invalid JSON and `UnsupportedVersion`
    /// if the manifest was written by a different format version.
    pub fn from_manifest_json(json: &str) -> Result<Self, ContentError> {
        let manifest: Manifest = serde_json::from_str(json).map_err(|e| {
            ContentError::new(ContentErrorKind::Malformed)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        if manifest.version != MANIFEST_VERSION {
            return Err(ContentError::new(ContentErrorKind::UnsupportedVersion)
                .with_backend(BACKEND)
                .with_message(format!(
                    "expected version {MANIFEST_VERSION}, found {}",
                    manifest.version
                )));
        }

        Ok(Self::new(manifest.docs, manifest.meta))
    }

    /// Load a collection from a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file can't be read, otherwise the errors of
    /// [`from_manifest_json`](Self::from_manifest_json) with path context.
    pub fn from_manifest_path(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ContentError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        let source = Self::from_manifest_json(&json).map_err(|e| e.with_path(path))?;

        tracing::info!(
            path = %path.display(),
            docs = source.docs.len(),
            meta = source.meta.len(),
            "Loaded content manifest"
        );

        Ok(source)
    }

    /// Serialize the collection as pretty-printed manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns a `Malformed` error if an entry can't be serialized.
    pub fn to_manifest_json(&self) -> Result<String, ContentError> {
        let manifest = ManifestRef {
            version: MANIFEST_VERSION,
            docs: &self.docs,
            meta: &self.meta,
        };
        serde_json::to_string_pretty(&manifest).map_err(|e| {
            ContentError::new(ContentErrorKind::Malformed)
                .with_backend(BACKEND)
                .with_source(e)
        })
    }
}

impl Collection for MdxSource {
    fn docs(&self) -> Result<Vec<DocEntry>, ContentError> {
        Ok(self.docs.clone())
    }

    fn meta(&self) -> Result<Vec<MetaEntry>, ContentError> {
        Ok(self.meta.clone())
    }
}

/// Borrowed view of a manifest for serialization.
#[derive(Serialize)]
struct ManifestRef<'a> {
    version: u32,
    docs: &'a [DocEntry],
    meta: &'a [MetaEntry],
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_exposes_entries() {
        let source = MdxSource::new(
            vec![DocEntry::with_title("index.mdx", "Home")],
            vec![MetaEntry::new("meta.json", MetaData::default())],
        );

        assert_eq!(source.docs().unwrap().len(), 1);
        assert_eq!(source.meta().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_source() {
        let source = MdxSource::default();

        assert!(source.is_empty());
        assert!(source.docs().unwrap().is_empty());
        assert!(source.meta().unwrap().is_empty());
    }

    #[test]
    fn test_builder_methods() {
        let source = MdxSource::default()
            .with_doc("guide/intro.mdx", "Intro", "Body")
            .with_meta(
                "guide/meta.json",
                MetaData {
                    title: Some("Guide".to_owned()),
                    ..Default::default()
                },
            );

        let docs = source.docs().unwrap();
        assert_eq!(docs[0].title(), Some("Intro"));
        assert_eq!(docs[0].body, "Body");
        assert_eq!(
            source.meta().unwrap()[0].data.title.as_deref(),
            Some("Guide")
        );
    }

    #[test]
    fn test_extend_appends_entries() {
        let mut source = MdxSource::default().with_doc("index.mdx", "Home", "");

        source.extend(
            vec![DocEntry::with_title("api/list.mdx", "List")],
            vec![MetaEntry::new("api/meta.json", MetaData::default())],
        );

        assert_eq!(source.len(), 2);
        assert_eq!(source.meta().unwrap().len(), 1);
    }

    #[test]
    fn test_manifest_json_preserves_entries() {
        let source = MdxSource::default()
            .with_doc("index.mdx", "Home", "Welcome")
            .with_meta("meta.json", MetaData::default());

        let json = source.to_manifest_json().unwrap();
        let loaded = MdxSource::from_manifest_json(&json).unwrap();

        assert_eq!(loaded, source);
    }

    #[test]
    fn test_from_manifest_json_rejects_invalid_json() {
        let err = MdxSource::from_manifest_json("{ not json").unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::Malformed);
    }

    #[test]
    fn test_from_manifest_json_rejects_other_version() {
        let err = MdxSource::from_manifest_json(r#"{ "version": 99 }"#).unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::UnsupportedVersion);
        assert!(err.to_string().contains("found 99"));
    }

    #[test]
    fn test_from_manifest_json_defaults_missing_lists() {
        let source = MdxSource::from_manifest_json(r#"{ "version": 1 }"#).unwrap();

        assert!(source.is_empty());
    }

    #[test]
    fn test_from_manifest_path_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = MdxSource::from_manifest_path(&temp_dir.path().join("missing.json")).unwrap_err();

        assert_eq!(err.kind, ContentErrorKind::NotFound);
        assert_eq!(err.backend, Some("Manifest"));
    }

    #[test]
    fn test_from_manifest_path_reads_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("manifest.json");
        let source = MdxSource::default().with_doc("index.mdx", "Home", "");
        std::fs::write(&path, source.to_manifest_json().unwrap()).unwrap();

        let loaded = MdxSource::from_manifest_path(&path).unwrap();

        assert_eq!(loaded, source);
    }
}
