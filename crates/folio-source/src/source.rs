//! Documentation source loader.
//!
//! [`Source`] resolves collection entries into pages, builds the page tree
//! and answers lookups. It is built once and immutable afterwards.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` sorted by file path. This provides:
//! - O(1) slug lookups via `path_index` `HashMap`
//! - O(1) file lookups via `file_index` `HashMap`

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use folio_content::{Collection, DocEntry, MetaEntry, normalize_path};
use serde::Serialize;

use crate::attach::AttachFile;
use crate::builder::TreeBuilder;
use crate::error::SourceError;
use crate::page::{Page, page_title};
use crate::slug::{FileInfo, normalize_base_url, slug_path_from_url, slugs_for, url_for};
use crate::tree::{BreadcrumbItem, Folder, Item, Neighbours, PageTree};

/// Default base URL.
pub const DEFAULT_BASE_URL: &str = "/";

/// Root name used when neither the options nor the root `meta.json` set one.
pub const DEFAULT_ROOT_NAME: &str = "Docs";

/// Loader options.
#[derive(Clone)]
pub struct LoaderOptions {
    /// URL prefix of every page (must start with `/`).
    pub base_url: String,
    /// Name of the page tree root.
    pub root_name: Option<String>,
    /// Hook called for every page item in the tree.
    pub attach_file: Option<Arc<dyn AttachFile>>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl std::fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("base_url", &self.base_url)
            .field("root_name", &self.root_name)
            .field("attach_file", &self.attach_file.is_some())
            .finish()
    }
}

impl LoaderOptions {
    /// Create options with a base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            root_name: None,
            attach_file: None,
        }
    }

    /// Set the page tree root name.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Set the attach-file hook.
    #[must_use]
    pub fn with_attach_file(mut self, attach: impl AttachFile + 'static) -> Self {
        self.attach_file = Some(Arc::new(attach));
        self
    }
}

/// Route parameters of a page for static generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlugParams {
    /// Page slugs.
    pub slug: Vec<String>,
}

/// Loaded documentation source.
///
/// # Example
///
/// ```
/// use folio_content::MdxSource;
/// use folio_source::{LoaderOptions, Source};
///
/// let docs = MdxSource::default()
///     .with_doc("index.mdx", "Home", "")
///     .with_doc("guide/setup.mdx", "Setup", "");
/// let source = Source::new(&docs, LoaderOptions::new("/docs")).unwrap();
///
/// assert_eq!(source.get_page(&["guide", "setup"]).unwrap().url, "/docs/guide/setup");
/// assert_eq!(source.get_page(&[]).unwrap().title, "Home");
/// ```
#[derive(Debug)]
pub struct Source {
    base_url: String,
    pages: Vec<Page>,
    path_index: HashMap<String, usize>,
    file_index: HashMap<String, usize>,
    metas: BTreeMap<String, MetaEntry>,
    tree: PageTree,
}

impl Source {
    /// Load a source from a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection fails, an entry path is invalid,
    /// the base URL is invalid, two pages share slugs, or two meta entries
    /// describe the same folder.
    pub fn new(collection: &dyn Collection, options: LoaderOptions) -> Result<Self, SourceError> {
        let docs = collection.docs()?;
        let meta = collection.meta()?;
        Self::from_entries(docs, meta, &options)
    }

    /// Load a source from generated entries.
    ///
    /// # Errors
    ///
    /// See [`Source::new`].
    pub fn from_entries(
        docs: Vec<DocEntry>,
        meta: Vec<MetaEntry>,
        options: &LoaderOptions,
    ) -> Result<Self, SourceError> {
        let base_url = normalize_base_url(&options.base_url)?;

        let mut pages = Vec::with_capacity(docs.len());
        for mut entry in docs {
            entry.path = normalize_path(&entry.path)?;
            let file = FileInfo::parse(&entry.path);
            let slugs = slugs_for(&file);
            let url = url_for(&base_url, &slugs);
            let title = page_title(&entry, &file);
            pages.push(Page {
                file,
                slugs,
                url,
                title,
                entry,
            });
        }
        pages.sort_by(|a, b| a.file.path.cmp(&b.file.path));

        let mut path_index = HashMap::with_capacity(pages.len());
        let mut file_index = HashMap::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            let slug = page.slug_path();
            if let Some(&first) = path_index.get(&slug) {
                let first: &Page = &pages[first];
                return Err(SourceError::DuplicateSlug {
                    slug,
                    first: first.file.path.clone(),
                    second: page.file.path.clone(),
                });
            }
            path_index.insert(slug, i);
            file_index.insert(page.file.path.clone(), i);
        }

        let mut metas = BTreeMap::new();
        for mut entry in meta {
            entry.path = normalize_path(&entry.path)?;
            let file = FileInfo::parse(&entry.path);
            if file.name != "meta" || file.extension != "json" {
                return Err(SourceError::InvalidMetaPath(entry.path));
            }
            if metas.contains_key(&file.dirname) {
                return Err(SourceError::DuplicateMeta(file.dirname));
            }
            metas.insert(file.dirname, entry);
        }

        let root_name = options
            .root_name
            .clone()
            .or_else(|| metas.get("").and_then(|m| m.data.title.clone()))
            .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_owned());
        let tree = TreeBuilder::new(&pages, &metas, options.attach_file.as_deref()).build(root_name);

        tracing::info!(
            base_url = %base_url,
            pages = pages.len(),
            meta = metas.len(),
            "Loaded documentation source"
        );

        Ok(Self {
            base_url,
            pages,
            path_index,
            file_index,
            metas,
            tree,
        })
    }

    /// Normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a page by slugs (`&[]` for the root index page).
    #[must_use]
    pub fn get_page(&self, slugs: &[&str]) -> Option<&Page> {
        self.get_page_by_path(&slugs.join("/"))
    }

    /// Get a page by slug path (e.g., "guide/setup", "" for root).
    ///
    /// Leading and trailing slashes are ignored.
    #[must_use]
    pub fn get_page_by_path(&self, path: &str) -> Option<&Page> {
        self.path_index
            .get(path.trim_matches('/'))
            .map(|&i| &self.pages[i])
    }

    /// Get a page by URL (e.g., "/docs/guide/setup").
    ///
    /// Percent-encoded segments are decoded; query strings and fragments
    /// are ignored.
    #[must_use]
    pub fn get_page_by_url(&self, url: &str) -> Option<&Page> {
        let path = slug_path_from_url(&self.base_url, url)?;
        self.get_page_by_path(&path)
    }

    /// Get a page by its source file path (e.g., "guide/setup.mdx").
    #[must_use]
    pub fn get_page_by_file(&self, path: &str) -> Option<&Page> {
        self.file_index.get(path).map(|&i| &self.pages[i])
    }

    /// All pages, sorted by file path.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// All folder metadata entries, keyed by directory path.
    #[must_use]
    pub fn metas(&self) -> &BTreeMap<String, MetaEntry> {
        &self.metas
    }

    /// Navigation tree.
    #[must_use]
    pub fn page_tree(&self) -> &PageTree {
        &self.tree
    }

    /// Route parameters of every page.
    #[must_use]
    pub fn generate_params(&self) -> Vec<SlugParams> {
        self.pages
            .iter()
            .map(|page| SlugParams {
                slug: page.slugs.clone(),
            })
            .collect()
    }

    /// Page behind a page tree item (`None` for links).
    #[must_use]
    pub fn get_node_page(&self, item: &Item) -> Option<&Page> {
        item.file
            .as_deref()
            .and_then(|file| self.get_page_by_file(file))
    }

    /// Metadata behind a page tree folder.
    #[must_use]
    pub fn get_node_meta(&self, folder: &Folder) -> Option<&MetaEntry> {
        folder.dir.as_deref().and_then(|dir| self.metas.get(dir))
    }

    /// Breadcrumbs of the page with the given URL (enclosing folders, root-first).
    #[must_use]
    pub fn breadcrumbs(&self, url: &str) -> Vec<BreadcrumbItem> {
        self.tree.breadcrumbs(url)
    }

    /// Previous and next pages of the page with the given URL.
    #[must_use]
    pub fn find_neighbour(&self, url: &str) -> Neighbours<'_> {
        self.tree.find_neighbour(url)
    }
}
