//! Page tree types and traversal.
//!
//! The page tree is the navigation structure handed to a docs UI. It is
//! serialized with a `type` tag on every node:
//!
//! ```json
//! { "name": "Docs", "children": [
//!   { "type": "page", "name": "Home", "url": "/docs" },
//!   { "type": "separator", "name": "Guides" },
//!   { "type": "folder", "name": "Setup", "children": [...] }
//! ] }
//! ```

use serde::Serialize;

/// Root of the page tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageTree {
    /// Display name of the root.
    pub name: String,
    /// Top-level nodes in display order.
    pub children: Vec<Node>,
}

/// A node in the page tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Link to a page or an external URL.
    Page(Item),
    /// Group of nodes, optionally with its own index page.
    Folder(Folder),
    /// Labelled divider between nodes.
    Separator(Separator),
}

/// A page link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Link target.
    pub url: String,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// True for links that leave the documentation site.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    /// Annotation produced by the attach-file hook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Source file path for page items (`None` for meta links).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// A folder of nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Navigation root marker from `meta.json`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub root: bool,
    /// Expand by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_open: Option<bool>,
    /// Folder index page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Item>,
    /// Child nodes in display order.
    pub children: Vec<Node>,
    /// Directory path relative to the content root (e.g., "guide").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// A labelled divider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Separator {
    /// Label (may be empty).
    pub name: String,
}

/// Extra data attached to a page item by the attach-file hook.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Short badge text (e.g., "GET").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Related file (e.g., the `OpenAPI` document a page was generated from).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display name.
    pub name: String,
    /// Link target (folder index URL), `None` for folders without an index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Previous and next pages in reading order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Neighbours<'a> {
    /// Page before the current one.
    pub previous: Option<&'a Item>,
    /// Page after the current one.
    pub next: Option<&'a Item>,
}

impl Node {
    /// Display name of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Page(item) => &item.name,
            Self::Folder(folder) => &folder.name,
            Self::Separator(separator) => &separator.name,
        }
    }
}

impl PageTree {
    /// All page items in reading order.
    ///
    /// Folder index pages come before the folder's children. Separators are
    /// skipped; external links are included.
    #[must_use]
    pub fn items(&self) -> Vec<&Item> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a Item>) {
            for node in nodes {
                match node {
                    Node::Page(item) => out.push(item),
                    Node::Folder(folder) => {
                        if let Some(index) = &folder.index {
                            out.push(index);
                        }
                        collect(&folder.children, out);
                    }
                    Node::Separator(_) => {}
                }
            }
        }

        let mut items = Vec::new();
        collect(&self.children, &mut items);
        items
    }

    /// Find a page item by URL.
    #[must_use]
    pub fn find_item(&self, url: &str) -> Option<&Item> {
        self.items().into_iter().find(|item| item.url == url)
    }

    /// Folders enclosing the item with the given URL, root-first.
    ///
    /// A folder is not its own index page's ancestor. Returns `None` if
    /// no item has this URL.
    #[must_use]
    pub fn ancestors(&self, url: &str) -> Option<Vec<&Folder>> {
        fn search<'a>(nodes: &'a [Node], url: &str, chain: &mut Vec<&'a Folder>) -> bool {
            for node in nodes {
                match node {
                    Node::Page(item) if item.url == url => return true,
                    Node::Folder(folder) => {
                        if folder.index.as_ref().is_some_and(|i| i.url == url) {
                            return true;
                        }
                        chain.push(folder);
                        if search(&folder.children, url, chain) {
                            return true;
                        }
                        chain.pop();
                    }
                    _ => {}
                }
            }
            false
        }

        let mut chain = Vec::new();
        search(&self.children, url, &mut chain).then_some(chain)
    }

    /// Breadcrumbs for the page with the given URL.
    ///
    /// Lists enclosing folders root-first, excluding the page itself.
    /// Returns an empty list for unknown URLs and top-level pages.
    #[must_use]
    pub fn breadcrumbs(&self, url: &str) -> Vec<BreadcrumbItem> {
        self.ancestors(url)
            .unwrap_or_default()
            .into_iter()
            .map(|folder| BreadcrumbItem {
                name: folder.name.clone(),
                url: folder.index.as_ref().map(|i| i.url.clone()),
            })
            .collect()
    }

    /// Previous and next pages of the page with the given URL.
    ///
    /// External links are skipped.
    #[must_use]
    pub fn find_neighbour(&self, url: &str) -> Neighbours<'_> {
        let items: Vec<&Item> = self
            .items()
            .into_iter()
            .filter(|item| !item.external)
            .collect();

        let Some(pos) = items.iter().position(|item| item.url == url) else {
            return Neighbours::default();
        };

        Neighbours {
            previous: pos.checked_sub(1).map(|i| items[i]),
            next: items.get(pos + 1).copied(),
        }
    }
}
