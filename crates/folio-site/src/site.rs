//! Documentation site: the loaded source and the `OpenAPI` descriptor.
//!
//! [`DocsSite`] is built once at startup and is read-only afterwards. It can
//! be shared with `Arc` or installed as the process-wide instance with
//! [`DocsSite::init_global`].

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use folio_config::Config;
use folio_content::{Collection, MdxSource};
use folio_content_fs::FsCollection;
use folio_openapi::{GenerateOptions, OpenApi, OpenApiOptions, attach_file, generate_entries};
use folio_source::{LoaderOptions, Source};

use crate::error::SiteError;

/// Process-wide site instance.
static GLOBAL: OnceLock<DocsSite> = OnceLock::new();

/// Loaded documentation source paired with its `OpenAPI` descriptor.
#[derive(Debug)]
pub struct DocsSite {
    source: Arc<Source>,
    openapi: Arc<OpenApi>,
}

impl DocsSite {
    /// Load a site from a collection with a default `OpenAPI` descriptor.
    ///
    /// Pages are annotated with [`attach_file`].
    ///
    /// # Errors
    ///
    /// Returns an error if the collection fails or the loader rejects it.
    pub fn new(collection: &dyn Collection, base_url: &str) -> Result<Self, SiteError> {
        Self::with_openapi(collection, base_url, OpenApi::default())
    }

    /// Load a site from a collection with a prepared `OpenAPI` descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection fails or the loader rejects it.
    pub fn with_openapi(
        collection: &dyn Collection,
        base_url: &str,
        openapi: OpenApi,
    ) -> Result<Self, SiteError> {
        let options = LoaderOptions::new(base_url).with_attach_file(attach_file);
        let source = Source::new(collection, options)?;

        Ok(Self {
            source: Arc::new(source),
            openapi: Arc::new(openapi),
        })
    }

    /// Build the site described by a configuration.
    ///
    /// Reads the manifest if one is configured, otherwise scans the content
    /// directory with [`DocsSite::scan_content`]. Configured `OpenAPI`
    /// documents are loaded up front in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be read, a document fails to load,
    /// or the loader rejects the combined entries.
    pub fn from_config(config: &Config) -> Result<Self, SiteError> {
        let openapi = openapi_for(config);
        let collection = match &config.docs_resolved.manifest {
            Some(manifest) => MdxSource::from_manifest_path(manifest)?,
            None => scan_with(config, &openapi)?,
        };
        for id in &config.openapi_resolved.documents {
            openapi.load_document(id)?;
        }

        let site = Self::with_openapi(&collection, &config.docs_resolved.base_url, openapi)?;

        tracing::info!(
            pages = site.source.pages().len(),
            documents = config.openapi_resolved.documents.len(),
            "Documentation site ready"
        );

        Ok(site)
    }

    /// Scan the content directory into an in-memory collection.
    ///
    /// With `openapi.output_dir` set, one page per operation of every
    /// configured document is generated into the collection (under a
    /// per-document subfolder when several documents are configured).
    ///
    /// # Errors
    ///
    /// Returns an error if a content file or document cannot be read.
    pub fn scan_content(config: &Config) -> Result<MdxSource, SiteError> {
        scan_with(config, &openapi_for(config))
    }

    /// Loaded documentation source.
    #[must_use]
    pub fn source(&self) -> &Arc<Source> {
        &self.source
    }

    /// `OpenAPI` descriptor.
    #[must_use]
    pub fn openapi(&self) -> &Arc<OpenApi> {
        &self.openapi
    }

    /// Install the process-wide site.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if a site was installed before.
    pub fn init_global(site: Self) -> Result<&'static Self, SiteError> {
        GLOBAL.set(site).map_err(|_| SiteError::AlreadyInitialized)?;
        GLOBAL.get().ok_or(SiteError::AlreadyInitialized)
    }

    /// The process-wide site, if installed.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }
}

/// `OpenAPI` descriptor configured from `[openapi]`.
fn openapi_for(config: &Config) -> OpenApi {
    let settings = &config.openapi_resolved;
    OpenApi::new(OpenApiOptions {
        base_dir: settings.base_dir.clone(),
        proxy_url: settings.proxy_url.clone(),
        disable_playground: settings.disable_playground,
    })
}

/// Scan the content dir and append generated API pages.
///
/// Authored entries win: a generated page whose slugs are already taken or a
/// generated `meta.json` for a folder that already has one is skipped.
fn scan_with(config: &Config, openapi: &OpenApi) -> Result<MdxSource, SiteError> {
    let fs = FsCollection::new(config.docs_resolved.source_dir.clone());
    let docs = fs.docs()?;
    let meta = fs.meta()?;

    let settings = &config.openapi_resolved;
    let Some(output_dir) = &settings.output_dir else {
        return Ok(MdxSource::new(docs, meta));
    };

    let mut taken_pages: HashSet<String> = docs.iter().map(|doc| page_key(&doc.path)).collect();
    let mut taken_meta: HashSet<String> = meta.iter().map(|entry| entry.path.clone()).collect();
    let mut collection = MdxSource::new(docs, meta);

    let per_document = settings.documents.len() > 1;
    for id in &settings.documents {
        let document = openapi.load_document(id)?;
        let options = GenerateOptions {
            output_dir: document_output_dir(output_dir, id, per_document),
            ..GenerateOptions::default()
        };
        let generated = generate_entries(&document, &options);

        let docs = generated
            .docs
            .into_iter()
            .filter(|doc| {
                let fresh = taken_pages.insert(page_key(&doc.path));
                if !fresh {
                    tracing::warn!(
                        path = %doc.path,
                        document = %id,
                        "Skipped generated page, path is authored"
                    );
                }
                fresh
            })
            .collect();
        let meta = generated
            .meta
            .into_iter()
            .filter(|entry| {
                let fresh = taken_meta.insert(entry.path.clone());
                if !fresh {
                    tracing::debug!(
                        path = %entry.path,
                        document = %id,
                        "Kept authored folder meta"
                    );
                }
                fresh
            })
            .collect();
        collection.extend(docs, meta);
    }
    Ok(collection)
}

/// Page path with the extension and a trailing `index` removed, so that
/// `a.mdx` and `a/index.md` share a key.
fn page_key(path: &str) -> String {
    let stem = path.rsplit_once('.').map_or(path, |(stem, _)| stem);
    if stem == "index" {
        return String::new();
    }
    stem.strip_suffix("/index").unwrap_or(stem).to_owned()
}

/// Output folder for the pages of one document.
fn document_output_dir(output_dir: &str, id: &str, per_document: bool) -> String {
    let output_dir = output_dir.trim_matches('/');
    if !per_document {
        return output_dir.to_owned();
    }
    let stem = Path::new(id)
        .file_stem()
        .map_or_else(|| id.to_owned(), |s| s.to_string_lossy().into_owned());
    if output_dir.is_empty() {
        stem
    } else {
        format!("{output_dir}/{stem}")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use folio_openapi::{OpenApiError, SchemaDocument};
    use folio_source::{Node, SourceError};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const PETSTORE: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      summary: List pets
      responses:
        "200":
          description: OK
    post:
      operationId: createPet
      responses:
        "201":
          description: Created
"#;

    const USERS: &str = r#"{
  "openapi": "3.1.0",
  "info": { "title": "Users" },
  "paths": { "/users": { "get": { "operationId": "listUsers", "responses": {} } } }
}"#;

    fn write(dir: &Path, path: &str, content: &str) {
        let path = dir.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project(config: &str) -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "folio.toml", config);
        write(dir.path(), "content/docs/index.mdx", "---\ntitle: Welcome\n---\n\nHello\n");
        write(
            dir.path(),
            "content/docs/guide/setup.mdx",
            "---\ntitle: Setup\n---\n\nInstall it.\n",
        );
        write(dir.path(), "openapi.yaml", PETSTORE);
        write(dir.path(), "users.json", USERS);
        let config = Config::load(Some(&dir.path().join("folio.toml")), None).unwrap();
        (dir, config)
    }

    #[test]
    fn test_new_with_empty_collection() {
        let site = DocsSite::new(&MdxSource::default(), "/docs").unwrap();

        assert!(site.source().pages().is_empty());
        assert!(site.source().page_tree().children.is_empty());
        assert!(site.openapi().document_ids().is_empty());
    }

    #[test]
    fn test_new_attaches_api_badges() {
        let document = SchemaDocument::parse("openapi.yaml", PETSTORE).unwrap();
        let generated = generate_entries(&document, &GenerateOptions::default());
        let collection = MdxSource::new(generated.docs, generated.meta);

        let site = DocsSite::new(&collection, "/docs").unwrap();

        let item = site
            .source()
            .page_tree()
            .find_item("/docs/api/create-pet")
            .unwrap();
        let attachment = item.attachment.as_ref().unwrap();
        assert_eq!(attachment.badge.as_deref(), Some("POST"));
        assert_eq!(attachment.file.as_deref(), Some("openapi.yaml"));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let err = DocsSite::new(&MdxSource::default(), "docs").unwrap_err();

        assert!(matches!(
            err,
            SiteError::Source(SourceError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_from_config_scans_source_dir() {
        let (_dir, config) = project("");

        let site = DocsSite::from_config(&config).unwrap();

        let source = site.source();
        assert_eq!(source.pages().len(), 2);
        assert_eq!(source.get_page(&[]).unwrap().title, "Welcome");
        assert_eq!(
            source.get_page(&["guide", "setup"]).unwrap().url,
            "/docs/guide/setup"
        );
    }

    #[test]
    fn test_from_config_generates_api_pages() {
        let (_dir, config) =
            project("[openapi]\ndocuments = [\"openapi.yaml\"]\noutput_dir = \"api\"\n");

        let site = DocsSite::from_config(&config).unwrap();

        let page = site.source().get_page(&["api", "list-pets"]).unwrap();
        assert_eq!(page.title, "List pets");
        let folder = site
            .source()
            .page_tree()
            .children
            .iter()
            .find_map(|node| match node {
                Node::Folder(folder) if folder.name == "Petstore" => Some(folder),
                _ => None,
            });
        assert!(folder.is_some());
        assert_eq!(site.openapi().document_ids(), vec!["openapi.yaml"]);
    }

    #[test]
    fn test_from_config_preloads_without_generating() {
        let (_dir, config) = project("[openapi]\ndocuments = [\"openapi.yaml\"]\n");

        let site = DocsSite::from_config(&config).unwrap();

        assert_eq!(site.source().pages().len(), 2);
        assert!(site.openapi().document("openapi.yaml").is_some());
    }

    #[test]
    fn test_from_config_multiple_documents_use_subfolders() {
        let (_dir, config) = project(
            "[openapi]\ndocuments = [\"openapi.yaml\", \"users.json\"]\noutput_dir = \"api\"\n",
        );

        let site = DocsSite::from_config(&config).unwrap();

        let source = site.source();
        assert!(source.get_page(&["api", "openapi", "list-pets"]).is_some());
        assert!(source.get_page(&["api", "users", "list-users"]).is_some());
    }

    #[test]
    fn test_from_config_missing_document() {
        let (_dir, config) = project("[openapi]\ndocuments = [\"missing.yaml\"]\n");

        let err = DocsSite::from_config(&config).unwrap_err();

        assert!(matches!(
            err,
            SiteError::OpenApi(OpenApiError::UnknownDocument(id)) if id == "missing.yaml"
        ));
    }

    #[test]
    fn test_from_config_reads_manifest() {
        let (dir, config) = project("[docs]\nmanifest = \"manifest.json\"\nbase_url = \"/\"\n");
        write(
            dir.path(),
            "manifest.json",
            r#"{ "version": 1, "docs": [{ "path": "intro.mdx", "frontmatter": { "title": "Intro" } }] }"#,
        );

        let site = DocsSite::from_config(&config).unwrap();

        assert_eq!(site.source().pages().len(), 1);
        assert_eq!(
            site.source().get_page_by_url("/intro").unwrap().title,
            "Intro"
        );
    }

    #[test]
    fn test_scan_content_ignores_manifest() {
        let (_dir, config) = project(
            "[docs]\nmanifest = \"missing.json\"\n\n[openapi]\ndocuments = [\"openapi.yaml\"]\noutput_dir = \"api\"\n",
        );

        let collection = DocsSite::scan_content(&config).unwrap();

        let paths: Vec<String> = collection.docs().unwrap().into_iter().map(|d| d.path).collect();
        assert_eq!(
            paths,
            vec![
                "guide/setup.mdx",
                "index.mdx",
                "api/list-pets.mdx",
                "api/create-pet.mdx",
            ]
        );
    }

    #[test]
    fn test_from_config_authored_meta_wins_over_generated() {
        let (dir, config) =
            project("[openapi]\ndocuments = [\"openapi.yaml\"]\noutput_dir = \"api\"\n");
        write(
            dir.path(),
            "content/docs/api/meta.json",
            r#"{ "title": "Reference", "pages": ["overview", "..."] }"#,
        );
        write(dir.path(), "content/docs/api/overview.mdx", "---\ntitle: Overview\n---\n");

        let site = DocsSite::from_config(&config).unwrap();

        let source = site.source();
        assert!(source.get_page(&["api", "overview"]).is_some());
        assert_eq!(source.get_page(&["api", "list-pets"]).unwrap().title, "List pets");
        let names: Vec<&str> = source
            .page_tree()
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Folder(folder) => Some(folder.name.as_str()),
                _ => None,
            })
            .collect();
        assert!(names.contains(&"Reference"));
        assert!(!names.contains(&"Petstore"));
    }

    #[test]
    fn test_from_config_authored_page_wins_over_generated() {
        let (dir, config) =
            project("[openapi]\ndocuments = [\"openapi.yaml\"]\noutput_dir = \"api\"\n");
        write(
            dir.path(),
            "content/docs/api/list-pets/index.md",
            "---\ntitle: Listing pets\n---\n",
        );

        let site = DocsSite::from_config(&config).unwrap();

        let page = site.source().get_page(&["api", "list-pets"]).unwrap();
        assert_eq!(page.title, "Listing pets");
        assert!(site.source().get_page(&["api", "create-pet"]).is_some());
    }

    #[test]
    fn test_page_key() {
        assert_eq!(page_key("index.mdx"), "");
        assert_eq!(page_key("api/list-pets.mdx"), "api/list-pets");
        assert_eq!(page_key("api/list-pets/index.md"), "api/list-pets");
    }

    #[test]
    fn test_document_output_dir() {
        assert_eq!(document_output_dir("/api/", "openapi.yaml", false), "api");
        assert_eq!(
            document_output_dir("api", "specs/admin.json", true),
            "api/admin"
        );
        assert_eq!(document_output_dir("", "users.yaml", true), "users");
    }

    #[test]
    fn test_global_initializes_once() {
        let site = DocsSite::new(&MdxSource::default().with_doc("index.mdx", "Home", ""), "/docs")
            .unwrap();

        let installed = DocsSite::init_global(site).unwrap();
        assert_eq!(installed.source().pages().len(), 1);
        assert!(std::ptr::eq(installed, DocsSite::global().unwrap()));

        let again = DocsSite::init_global(DocsSite::new(&MdxSource::default(), "/docs").unwrap());
        assert!(matches!(again, Err(SiteError::AlreadyInitialized)));
    }

    static_assertions::assert_impl_all!(DocsSite: Send, Sync);
}
