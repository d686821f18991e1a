//! Page tree construction.
//!
//! Pages are grouped by directory into a folder map, then the tree is built
//! top-down. Each folder's children are ordered by the `pages` list of its
//! `meta.json`, or by name when there is none.
//!
//! # `pages` items
//!
//! | Item | Meaning |
//! |------|---------|
//! | `name` | Page file stem or sub-folder name |
//! | `---Label---` | Separator |
//! | `...` / `z...a` | Remaining entries, ascending / descending |
//! | `...folder` | Sub-folder's index and children, inlined |
//! | `[Text](url)` | Link (`external:[Text](url)` marks it external) |
//! | `!name` | Exclusion, not supported (entry stays in the rest) |
//!
//! Entries not placed by the list fill the `...` slot, or are appended at
//! the end when the list has no rest item.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use folio_content::{MetaData, MetaEntry};
use regex::Regex;

use crate::attach::AttachFile;
use crate::page::Page;
use crate::slug::{segment_display_name, titlecase_from_slug};
use crate::tree::{Folder, Item, Node, PageTree, Separator};

/// Link item in a meta `pages` list: `[Text](url)` or `external:[Text](url)`.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(external:)?\[([^\]]*)\]\(([^)]+)\)$").unwrap());

/// Pages and sub-folders of one directory.
#[derive(Default)]
struct FolderEntry<'a> {
    pages: Vec<usize>,
    subfolders: BTreeSet<String>,
    meta: Option<&'a MetaData>,
}

/// Child of a directory waiting to be placed.
enum Candidate {
    Page(usize),
    Folder(String),
}

/// Parsed `pages` item.
#[derive(Debug, PartialEq, Eq)]
enum MetaItem<'s> {
    Name(&'s str),
    Separator(&'s str),
    Rest { reverse: bool },
    Extract(&'s str),
    Link {
        name: &'s str,
        url: &'s str,
        external: bool,
    },
    Exclude(&'s str),
}

impl<'s> MetaItem<'s> {
    fn parse(item: &'s str) -> Self {
        let item = item.trim();

        if item == "..." {
            return Self::Rest { reverse: false };
        }
        if item == "z...a" {
            return Self::Rest { reverse: true };
        }
        if let Some(label) = item
            .strip_prefix("---")
            .and_then(|s| s.strip_suffix("---"))
        {
            return Self::Separator(label.trim());
        }
        if let Some(name) = item.strip_prefix("...") {
            return Self::Extract(name);
        }
        if let Some(name) = item.strip_prefix('!') {
            return Self::Exclude(name);
        }
        if let Some(caps) = LINK_PATTERN.captures(item) {
            let url = caps.get(3).map_or("", |m| m.as_str());
            return Self::Link {
                name: caps.get(2).map_or("", |m| m.as_str()),
                url,
                external: caps.get(1).is_some()
                    || url.starts_with("http://")
                    || url.starts_with("https://"),
            };
        }

        Self::Name(item)
    }
}

/// Placement slot in a folder's ordered children.
enum Slot {
    Node(Node),
    Rest,
}

/// Builds a [`PageTree`] from loaded pages and folder metadata.
pub(crate) struct TreeBuilder<'a> {
    pages: &'a [Page],
    folders: BTreeMap<String, FolderEntry<'a>>,
    attach: Option<&'a dyn AttachFile>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder.
    ///
    /// # Arguments
    ///
    /// * `pages` - Loaded pages
    /// * `metas` - Folder metadata keyed by directory path ("" for root)
    /// * `attach` - Optional attach-file hook
    pub(crate) fn new(
        pages: &'a [Page],
        metas: &'a BTreeMap<String, MetaEntry>,
        attach: Option<&'a dyn AttachFile>,
    ) -> Self {
        let mut folders: BTreeMap<String, FolderEntry<'a>> = BTreeMap::new();
        folders.entry(String::new()).or_default();

        for (idx, page) in pages.iter().enumerate() {
            ensure_folder(&mut folders, &page.file.dirname);
            folders
                .entry(page.file.dirname.clone())
                .or_default()
                .pages
                .push(idx);
        }

        for (dir, meta) in metas {
            ensure_folder(&mut folders, dir);
            folders.entry(dir.clone()).or_default().meta = Some(&meta.data);
        }

        Self {
            pages,
            folders,
            attach,
        }
    }

    /// Build the tree.
    pub(crate) fn build(self, name: String) -> PageTree {
        PageTree {
            name,
            children: self.build_children("", true),
        }
    }

    /// Build the ordered children of a directory.
    fn build_children(&self, dir: &str, include_index: bool) -> Vec<Node> {
        let Some(entry) = self.folders.get(dir) else {
            return Vec::new();
        };

        let mut candidates: Vec<(String, Candidate)> = Vec::new();
        for &idx in &entry.pages {
            let page = &self.pages[idx];
            if include_index || !page.is_index() {
                candidates.push((page.file.name.clone(), Candidate::Page(idx)));
            }
        }
        for name in &entry.subfolders {
            candidates.push((name.clone(), Candidate::Folder(join_dir(dir, name))));
        }

        let mut used = vec![false; candidates.len()];
        let mut slots = Vec::new();
        let mut rest_reverse = None;

        let items = entry.meta.and_then(|m| m.pages.as_deref()).unwrap_or_default();
        for raw in items {
            match MetaItem::parse(raw) {
                MetaItem::Name(name) => {
                    let mut found = false;
                    for (i, (candidate_name, candidate)) in candidates.iter().enumerate() {
                        if used[i] || candidate_name != name {
                            continue;
                        }
                        used[i] = true;
                        found = true;
                        if let Some(node) = self.build_candidate(candidate) {
                            slots.push(Slot::Node(node));
                        }
                    }
                    if !found {
                        tracing::warn!(folder = dir, item = %raw, "Unknown or repeated entry in meta.json pages");
                    }
                }
                MetaItem::Separator(label) => {
                    slots.push(Slot::Node(Node::Separator(Separator {
                        name: label.to_owned(),
                    })));
                }
                MetaItem::Rest { reverse } => {
                    if rest_reverse.is_some() {
                        tracing::warn!(folder = dir, item = %raw, "Repeated rest item in meta.json pages");
                    } else {
                        rest_reverse = Some(reverse);
                        slots.push(Slot::Rest);
                    }
                }
                MetaItem::Extract(name) => {
                    let position = candidates.iter().enumerate().position(|(i, (n, c))| {
                        !used[i] && n == name && matches!(c, Candidate::Folder(_))
                    });
                    match position {
                        Some(i) => {
                            used[i] = true;
                            if let Candidate::Folder(path) = &candidates[i].1 {
                                slots.extend(self.extract_folder(path).into_iter().map(Slot::Node));
                            }
                        }
                        None => {
                            tracing::warn!(folder = dir, item = %raw, "Unknown folder in meta.json pages");
                        }
                    }
                }
                MetaItem::Link {
                    name,
                    url,
                    external,
                } => {
                    slots.push(Slot::Node(Node::Page(Item {
                        name: name.to_owned(),
                        url: url.to_owned(),
                        external,
                        ..Default::default()
                    })));
                }
                MetaItem::Exclude(name) => {
                    tracing::warn!(folder = dir, item = name, "Exclusions in meta.json are not supported, keeping entry");
                }
            }
        }

        let mut rest: Vec<usize> = (0..candidates.len()).filter(|&i| !used[i]).collect();
        rest.sort_by(|&a, &b| {
            let (name_a, cand_a) = &candidates[a];
            let (name_b, cand_b) = &candidates[b];
            rest_rank(name_a, cand_a)
                .cmp(&rest_rank(name_b, cand_b))
                .then_with(|| {
                    if rest_reverse == Some(true) {
                        name_b.cmp(name_a)
                    } else {
                        name_a.cmp(name_b)
                    }
                })
                .then_with(|| candidate_kind(cand_a).cmp(&candidate_kind(cand_b)))
        });
        let mut rest_nodes: Vec<Node> = rest
            .into_iter()
            .filter_map(|i| self.build_candidate(&candidates[i].1))
            .collect();

        let mut nodes = Vec::with_capacity(slots.len() + rest_nodes.len());
        for slot in slots {
            match slot {
                Slot::Node(node) => nodes.push(node),
                Slot::Rest => nodes.append(&mut rest_nodes),
            }
        }
        nodes.append(&mut rest_nodes);
        nodes
    }

    fn build_candidate(&self, candidate: &Candidate) -> Option<Node> {
        match candidate {
            Candidate::Page(idx) => Some(Node::Page(self.item(*idx))),
            Candidate::Folder(path) => self.build_folder(path).map(Node::Folder),
        }
    }

    /// Build a folder node. Returns `None` if the subtree has no pages.
    fn build_folder(&self, path: &str) -> Option<Folder> {
        let entry = self.folders.get(path)?;
        let meta = entry.meta;

        let index_listed = meta
            .and_then(|m| m.pages.as_ref())
            .is_some_and(|items| items.iter().any(|i| i.trim() == "index"));
        let index = if index_listed {
            None
        } else {
            entry
                .pages
                .iter()
                .copied()
                .find(|&i| self.pages[i].is_index())
        };

        let children = self.build_children(path, index_listed);
        if index.is_none() && !contains_page(&children) {
            return None;
        }

        let segment = path.rsplit('/').next().unwrap_or(path);
        let name = meta
            .and_then(|m| m.title.clone())
            .or_else(|| index.map(|i| self.pages[i].title.clone()))
            .unwrap_or_else(|| titlecase_from_slug(segment_display_name(segment)));

        Some(Folder {
            name,
            description: meta.and_then(|m| m.description.clone()),
            icon: meta.and_then(|m| m.icon.clone()),
            root: meta.is_some_and(|m| m.root),
            default_open: meta.and_then(|m| m.default_open),
            index: index.map(|i| self.item(i)),
            children,
            dir: Some(path.to_owned()),
        })
    }

    /// Inline a folder: its index page followed by its children.
    fn extract_folder(&self, path: &str) -> Vec<Node> {
        let Some(folder) = self.build_folder(path) else {
            return Vec::new();
        };

        let mut nodes = Vec::with_capacity(folder.children.len() + 1);
        if let Some(index) = folder.index {
            nodes.push(Node::Page(index));
        }
        nodes.extend(folder.children);
        nodes
    }

    fn item(&self, idx: usize) -> Item {
        let page = &self.pages[idx];
        let attachment = self.attach.and_then(|hook| hook.attach(page));
        if let Some(attachment) = &attachment {
            tracing::debug!(path = %page.file.path, badge = ?attachment.badge, "Attached annotation");
        }

        Item {
            name: page.title.clone(),
            url: page.url.clone(),
            description: page.entry.frontmatter.description.clone(),
            icon: page.entry.frontmatter.icon.clone(),
            external: false,
            attachment,
            file: Some(page.file.path.clone()),
        }
    }
}

/// Register a directory and all its ancestors in the folder map.
fn ensure_folder(folders: &mut BTreeMap<String, FolderEntry<'_>>, dir: &str) {
    let mut parent = String::new();
    for segment in dir.split('/').filter(|s| !s.is_empty()) {
        let path = join_dir(&parent, segment);
        folders
            .entry(parent)
            .or_default()
            .subfolders
            .insert(segment.to_owned());
        folders.entry(path.clone()).or_default();
        parent = path;
    }
}

fn join_dir(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}/{name}")
    }
}

/// Index pages sort before everything else in the rest.
fn rest_rank(name: &str, candidate: &Candidate) -> u8 {
    u8::from(!(name == "index" && matches!(candidate, Candidate::Page(_))))
}

/// Pages sort before folders of the same name.
fn candidate_kind(candidate: &Candidate) -> u8 {
    match candidate {
        Candidate::Page(_) => 0,
        Candidate::Folder(_) => 1,
    }
}

/// Check if nodes contain at least one page from the collection.
fn contains_page(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Page(item) => item.file.is_some(),
        Node::Folder(_) => true,
        Node::Separator(_) => false,
    })
}
