//! File path, slug and URL conventions.
//!
//! # Path Convention
//!
//! - `"index.mdx"` -> slugs `[]` -> URL `/docs`
//! - `"guide.mdx"` -> slugs `["guide"]` -> URL `/docs/guide`
//! - `"guide/index.mdx"` -> slugs `["guide"]` -> URL `/docs/guide`
//! - `"(group)/setup.mdx"` -> slugs `["setup"]` -> URL `/docs/setup`

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

use crate::error::SourceError;

/// Characters escaped in URL path segments.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Parsed location of a page file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Normalized path relative to the content root (e.g., "guide/intro.mdx").
    pub path: String,
    /// Directory part without trailing slash ("" for root files).
    pub dirname: String,
    /// File name without extension (e.g., "intro").
    pub name: String,
    /// Extension without dot (e.g., "mdx"), empty if none.
    pub extension: String,
}

impl FileInfo {
    /// Parse a normalized `/`-separated path.
    pub(crate) fn parse(path: &str) -> Self {
        let (dirname, file_name) = path.rsplit_once('/').unwrap_or(("", path));
        let (name, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, ext),
            _ => (file_name, ""),
        };

        Self {
            path: path.to_owned(),
            dirname: dirname.to_owned(),
            name: name.to_owned(),
            extension: extension.to_owned(),
        }
    }

    /// Path without extension (e.g., "guide/intro").
    #[must_use]
    pub fn flattened_path(&self) -> String {
        if self.dirname.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.dirname, self.name)
        }
    }
}

/// Check if a directory segment is a route group like `(internal)`.
pub(crate) fn is_group(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('(') && segment.ends_with(')')
}

/// Display name of a directory segment (route group parentheses stripped).
pub(crate) fn segment_display_name(segment: &str) -> &str {
    if is_group(segment) {
        &segment[1..segment.len() - 1]
    } else {
        segment
    }
}

/// Compute slugs for a page file.
///
/// Route groups contribute no slug, and an `index` file maps to its folder.
pub(crate) fn slugs_for(file: &FileInfo) -> Vec<String> {
    let mut slugs: Vec<String> = file
        .dirname
        .split('/')
        .filter(|s| !s.is_empty() && !is_group(s))
        .map(ToOwned::to_owned)
        .collect();

    if file.name != "index" {
        slugs.push(file.name.clone());
    }

    slugs
}

/// Validate and normalize a base URL.
///
/// The base URL must start with `/`; trailing slashes are removed except
/// for the bare root `/`.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, SourceError> {
    if !base_url.starts_with('/') {
        return Err(SourceError::InvalidBaseUrl(base_url.to_owned()));
    }

    let trimmed = base_url.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok("/".to_owned())
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Build the URL of a page from its slugs.
pub(crate) fn url_for(base_url: &str, slugs: &[String]) -> String {
    if slugs.is_empty() {
        return base_url.to_owned();
    }

    let encoded: Vec<String> = slugs
        .iter()
        .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
        .collect();
    let prefix = base_url.trim_end_matches('/');

    format!("{prefix}/{}", encoded.join("/"))
}

/// Convert a URL back into a slug path relative to the base URL.
///
/// Query strings and fragments are ignored. Returns `None` when the URL is
/// outside the base URL, contains invalid percent-encoding, or a segment
/// decodes to a `/`.
pub(crate) fn slug_path_from_url(base_url: &str, url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();

    let rest = if base_url == "/" {
        path
    } else if path == base_url {
        ""
    } else {
        path.strip_prefix(base_url)?.strip_prefix('/')?
    };

    let segments = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            percent_decode_str(s)
                .decode_utf8()
                .ok()
                .filter(|segment| !segment.contains('/'))
                .map(std::borrow::Cow::into_owned)
        })
        .collect::<Option<Vec<_>>>()?;

    Some(segments.join("/"))
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
pub(crate) fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn slugs(path: &str) -> Vec<String> {
        slugs_for(&FileInfo::parse(path))
    }

    #[test]
    fn test_file_info_parse_nested() {
        let file = FileInfo::parse("guide/advanced/tuning.mdx");

        assert_eq!(file.dirname, "guide/advanced");
        assert_eq!(file.name, "tuning");
        assert_eq!(file.extension, "mdx");
        assert_eq!(file.flattened_path(), "guide/advanced/tuning");
    }

    #[test]
    fn test_file_info_parse_root_without_extension() {
        let file = FileInfo::parse("README");

        assert_eq!(file.dirname, "");
        assert_eq!(file.name, "README");
        assert_eq!(file.extension, "");
        assert_eq!(file.flattened_path(), "README");
    }

    #[test]
    fn test_file_info_parse_keeps_inner_dots() {
        let file = FileInfo::parse("v1.2/release.notes.md");

        assert_eq!(file.dirname, "v1.2");
        assert_eq!(file.name, "release.notes");
        assert_eq!(file.extension, "md");
    }

    #[test]
    fn test_slugs_for_paths() {
        assert!(slugs("index.mdx").is_empty());
        assert_eq!(slugs("guide.mdx"), vec!["guide"]);
        assert_eq!(slugs("guide/index.mdx"), vec!["guide"]);
        assert_eq!(slugs("guide/setup.mdx"), vec!["guide", "setup"]);
        assert_eq!(slugs("(internal)/setup.mdx"), vec!["setup"]);
        assert_eq!(slugs("a/(b)/c/index.md"), vec!["a", "c"]);
    }

    #[test]
    fn test_is_group() {
        assert!(is_group("(internal)"));
        assert!(!is_group("internal"));
        assert!(!is_group("("));
    }

    #[test]
    fn test_segment_display_name() {
        assert_eq!(segment_display_name("(internal)"), "internal");
        assert_eq!(segment_display_name("guide"), "guide");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("/docs").unwrap(), "/docs");
        assert_eq!(normalize_base_url("/docs/").unwrap(), "/docs");
        assert_eq!(normalize_base_url("/").unwrap(), "/");
        assert!(normalize_base_url("docs").is_err());
        assert!(normalize_base_url("").is_err());
    }

    #[test]
    fn test_url_for() {
        let slugs_of = |s: &[&str]| s.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();

        assert_eq!(url_for("/docs", &[]), "/docs");
        assert_eq!(url_for("/docs", &slugs_of(&["guide", "setup"])), "/docs/guide/setup");
        assert_eq!(url_for("/", &slugs_of(&["guide"])), "/guide");
        assert_eq!(url_for("/", &[]), "/");
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let slugs = vec!["руководство".to_owned(), "a b".to_owned()];

        assert_eq!(
            url_for("/docs", &slugs),
            "/docs/%D1%80%D1%83%D0%BA%D0%BE%D0%B2%D0%BE%D0%B4%D1%81%D1%82%D0%B2%D0%BE/a%20b"
        );
    }

    #[test]
    fn test_slug_path_from_url() {
        assert_eq!(
            slug_path_from_url("/docs", "/docs/guide/setup"),
            Some("guide/setup".to_owned())
        );
        assert_eq!(slug_path_from_url("/docs", "/docs"), Some(String::new()));
        assert_eq!(slug_path_from_url("/docs", "/docs/"), Some(String::new()));
        assert_eq!(
            slug_path_from_url("/docs", "/docs/guide?tab=1#top"),
            Some("guide".to_owned())
        );
        assert_eq!(slug_path_from_url("/", "/guide"), Some("guide".to_owned()));
    }

    #[test]
    fn test_slug_path_from_url_rejects_encoded_slash() {
        assert_eq!(slug_path_from_url("/docs", "/docs/guide%2Fsetup"), None);
        assert_eq!(slug_path_from_url("/docs", "/docs/guide%2fsetup"), None);
        assert_eq!(
            slug_path_from_url("/docs", "/docs/caf%C3%A9"),
            Some("café".to_owned())
        );
    }

    #[test]
    fn test_slug_path_from_url_outside_base() {
        assert_eq!(slug_path_from_url("/docs", "/blog/post"), None);
        assert_eq!(slug_path_from_url("/docs", "/docsearch"), None);
    }

    #[test]
    fn test_slug_path_from_url_decodes_segments() {
        assert_eq!(
            slug_path_from_url("/docs", "/docs/a%20b"),
            Some("a b".to_owned())
        );
    }

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
        assert_eq!(titlecase_from_slug("my_page"), "My Page");
        assert_eq!(titlecase_from_slug("api"), "Api");
        assert_eq!(titlecase_from_slug(""), "");
    }
}
