//! Entry path normalization.

use crate::error::ContentError;

/// Normalize an entry path to the `/`-separated relative form.
///
/// Backslashes become `/`, a leading `./` and empty or `.` segments are
/// dropped.
///
/// # Errors
///
/// Returns an [`InvalidPath`](crate::ContentErrorKind::InvalidPath) error
/// for empty paths, absolute paths and paths containing `..`.
pub fn normalize_path(path: &str) -> Result<String, ContentError> {
    let unified = path.replace('\\', "/");

    if unified.starts_with('/') {
        return Err(ContentError::invalid_path(
            path,
            "absolute paths are not allowed",
        ));
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(ContentError::invalid_path(
                    path,
                    "parent segments are not allowed",
                ));
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(ContentError::invalid_path(path, "path is empty"));
    }

    Ok(segments.join("/"))
}
