//! `OpenAPI` error types.

use std::path::PathBuf;

/// Error returned by `OpenAPI` document operations.
#[derive(Debug, thiserror::Error)]
pub enum OpenApiError {
    /// Document file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON.
    #[error("Invalid JSON in document {id}: {source}")]
    Json {
        /// Document id.
        id: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Document is not valid YAML.
    #[error("Invalid YAML in document {id}: {source}")]
    Yaml {
        /// Document id.
        id: String,
        /// Parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Document is not an `OpenAPI` 3.x document.
    #[error("Unsupported document version in {id}: {version}")]
    UnsupportedVersion {
        /// Document id.
        id: String,
        /// Declared version (`openapi` or `swagger` field).
        version: String,
    },

    /// Document was never loaded or registered.
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    /// Operation does not exist in the document.
    #[error("Unknown operation {method} {path} in document {document}")]
    UnknownOperation {
        /// Document id.
        document: String,
        /// HTTP method.
        method: String,
        /// Route path.
        path: String,
    },

    /// `$ref` target does not exist or is not a local reference.
    #[error("Unresolved reference: {0}")]
    UnresolvedRef(String),

    /// `$ref` chain nests deeper than the resolver allows.
    #[error("Reference nesting too deep: {0}")]
    RefTooDeep(String),

    /// HTTP method name is not recognized.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
}
