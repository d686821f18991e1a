//! Content discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the building
//! phase (reading and parsing entries). The Scanner only identifies files,
//! returning lightweight references for `FsCollection` to process.

use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;

/// Name of folder metadata files.
pub(crate) const META_FILENAME: &str = "meta.json";

/// Reference to a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileRef {
    /// Absolute path on disk.
    pub abs_path: PathBuf,
    /// Path relative to the content root with `/` separators.
    pub rel_path: String,
}

/// Files discovered in the content directory.
#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    /// Page files matching the content patterns.
    pub pages: Vec<FileRef>,
    /// `meta.json` files.
    pub metas: Vec<FileRef>,
}

/// Discovers content files by walking the filesystem.
///
/// Hidden files and directories are skipped, `.gitignore` files inside the
/// content root are honoured, and files starting with `_` are treated as
/// partials and skipped.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    patterns: Vec<Pattern>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `patterns` - Glob patterns (relative to the root) selecting page files
    pub(crate) fn new(source_dir: PathBuf, patterns: Vec<Pattern>) -> Self {
        Self {
            source_dir,
            patterns,
        }
    }

    /// Root directory being scanned.
    pub(crate) fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Walk the content directory.
    ///
    /// Returns an empty result if the source directory doesn't exist.
    /// Files are returned sorted by relative path.
    pub(crate) fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        if !self.source_dir.is_dir() {
            tracing::warn!(dir = %self.source_dir.display(), "Content directory does not exist");
            return result;
        }

        let walker = WalkBuilder::new(&self.source_dir)
            .hidden(true)
            .parents(false)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry, skipping");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if file_name.starts_with('_') {
                continue;
            }

            let Ok(rel) = entry.path().strip_prefix(&self.source_dir) else {
                continue;
            };
            let rel_path = to_slash_path(rel);

            let file = FileRef {
                abs_path: entry.path().to_path_buf(),
                rel_path,
            };

            if file_name == META_FILENAME {
                result.metas.push(file);
            } else if self.patterns.iter().any(|p| p.matches(&file.rel_path)) {
                result.pages.push(file);
            }
        }

        result.pages.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        result.metas.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        result
    }
}

/// Join path components with `/`.
fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn default_patterns() -> Vec<Pattern> {
        vec![
            Pattern::new("**/*.mdx").unwrap(),
            Pattern::new("**/*.md").unwrap(),
        ]
    }

    fn rel_paths(files: &[FileRef]) -> Vec<&str> {
        files.iter().map(|f| f.rel_path.as_str()).collect()
    }

    #[test]
    fn test_scan_missing_dir_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let scanner = Scanner::new(temp_dir.path().join("missing"), default_patterns());

        let result = scanner.scan();

        assert!(result.pages.is_empty());
        assert!(result.metas.is_empty());
    }

    #[test]
    fn test_scan_finds_pages_and_meta() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::write(root.join("index.mdx"), "").unwrap();
        fs::write(root.join("guide/intro.md"), "").unwrap();
        fs::write(root.join("guide/meta.json"), "{}").unwrap();
        fs::write(root.join("guide/diagram.png"), "").unwrap();

        let result = Scanner::new(root.to_path_buf(), default_patterns()).scan();

        assert_eq!(rel_paths(&result.pages), vec!["guide/intro.md", "index.mdx"]);
        assert_eq!(rel_paths(&result.metas), vec!["guide/meta.json"]);
    }

    #[test]
    fn test_scan_skips_hidden_and_partials() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".drafts")).unwrap();
        fs::write(root.join(".drafts/secret.mdx"), "").unwrap();
        fs::write(root.join(".hidden.mdx"), "").unwrap();
        fs::write(root.join("_partial.mdx"), "").unwrap();
        fs::write(root.join("visible.mdx"), "").unwrap();

        let result = Scanner::new(root.to_path_buf(), default_patterns()).scan();

        assert_eq!(rel_paths(&result.pages), vec!["visible.mdx"]);
    }

    #[test]
    fn test_scan_honours_gitignore() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "generated.mdx\n").unwrap();
        fs::write(root.join("generated.mdx"), "").unwrap();
        fs::write(root.join("kept.mdx"), "").unwrap();

        let result = Scanner::new(root.to_path_buf(), default_patterns()).scan();

        assert_eq!(rel_paths(&result.pages), vec!["kept.mdx"]);
    }

    #[test]
    fn test_scan_custom_patterns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("page.mdx"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();

        let patterns = vec![Pattern::new("**/*.mdx").unwrap()];
        let result = Scanner::new(root.to_path_buf(), patterns).scan();

        assert_eq!(rel_paths(&result.pages), vec!["page.mdx"]);
    }

    #[test]
    fn test_to_slash_path() {
        assert_eq!(to_slash_path(Path::new("a/b/c.mdx")), "a/b/c.mdx");
        assert_eq!(to_slash_path(Path::new("c.mdx")), "c.mdx");
    }
}
