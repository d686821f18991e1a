//! `OpenAPI` descriptor with a document cache.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::SchemaDocument;
use crate::error::OpenApiError;
use crate::method::HttpMethod;

/// `OpenAPI` descriptor options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenApiOptions {
    /// Directory document ids are resolved against.
    pub base_dir: PathBuf,
    /// Proxy URL used by the API playground for cross-origin requests.
    pub proxy_url: Option<String>,
    /// Hide the API playground on generated pages.
    pub disable_playground: bool,
}

impl Default for OpenApiOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            proxy_url: None,
            disable_playground: false,
        }
    }
}

/// Operation selected by an API page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSelector {
    /// Route path.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
}

/// Props of an API page: which document and operations it renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPageProps {
    /// Document id.
    pub document: String,
    /// Operations rendered on the page.
    pub operations: Vec<OperationSelector>,
    /// Render the operation heading.
    #[serde(default)]
    pub has_head: bool,
}

/// An operation with its references resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOperation {
    /// Route path.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// `operationId`, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path-level and operation-level parameters.
    pub parameters: Vec<Value>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    /// Responses keyed by status code.
    pub responses: Value,
}

/// Data an API page renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPage {
    /// Document id.
    pub document: String,
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Resolved operations.
    pub operations: Vec<ApiOperation>,
    /// Render the operation heading.
    pub has_head: bool,
    /// Show the API playground.
    pub playground: bool,
    /// Playground proxy URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

/// `OpenAPI` descriptor.
///
/// Loads documents on demand and caches them by id. The cache is the only
/// mutable state and is safe to share across threads.
///
/// # Example
///
/// ```
/// use folio_openapi::OpenApi;
///
/// let openapi = OpenApi::default();
/// openapi
///     .register_document("api.json", r#"{ "openapi": "3.0.0", "paths": {} }"#)
///     .unwrap();
///
/// assert_eq!(openapi.document_ids(), vec!["api.json"]);
/// ```
#[derive(Debug, Default)]
pub struct OpenApi {
    options: OpenApiOptions,
    documents: RwLock<HashMap<String, Arc<SchemaDocument>>>,
}

impl OpenApi {
    /// Create a descriptor.
    #[must_use]
    pub fn new(options: OpenApiOptions) -> Self {
        Self {
            options,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Descriptor options.
    #[must_use]
    pub fn options(&self) -> &OpenApiOptions {
        &self.options
    }

    /// Get a cached document.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn document(&self, id: &str) -> Option<Arc<SchemaDocument>> {
        self.documents.read().unwrap().get(id).map(Arc::clone)
    }

    /// Ids of all cached documents, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn document_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.documents.read().unwrap().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Load a document from `base_dir`, or return the cached copy.
    ///
    /// A missing file, an absolute id or an id with `..` segments is
    /// reported as `UnknownDocument`.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn load_document(&self, id: &str) -> Result<Arc<SchemaDocument>, OpenApiError> {
        if let Some(document) = self.document(id) {
            return Ok(document);
        }

        let relative = folio_content::normalize_path(id).map_err(|e| {
            tracing::warn!(id, error = %e, "Rejected OpenAPI document id");
            OpenApiError::UnknownDocument(id.to_owned())
        })?;
        let path = self.options.base_dir.join(relative);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                OpenApiError::UnknownDocument(id.to_owned())
            } else {
                OpenApiError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let document = self.insert(SchemaDocument::parse(id, &content)?);

        tracing::info!(
            path = %path.display(),
            operations = document.operations().len(),
            "Loaded OpenAPI document"
        );

        Ok(document)
    }

    /// Parse an in-memory document and cache it under `id`.
    ///
    /// Replaces a cached document with the same id.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn register_document(
        &self,
        id: &str,
        content: &str,
    ) -> Result<Arc<SchemaDocument>, OpenApiError> {
        let document = self.insert(SchemaDocument::parse(id, content)?);
        tracing::debug!(id, "Registered OpenAPI document");
        Ok(document)
    }

    fn insert(&self, document: SchemaDocument) -> Arc<SchemaDocument> {
        let document = Arc::new(document);
        self.documents
            .write()
            .unwrap()
            .insert(document.id().to_owned(), Arc::clone(&document));
        document
    }

    /// Resolve the data an API page renders.
    ///
    /// Loads the document if it is not cached yet. Path-level parameters are
    /// merged before operation parameters; all `$ref`s are resolved.
    pub fn api_page(&self, props: &ApiPageProps) -> Result<ApiPage, OpenApiError> {
        let document = self.load_document(&props.document)?;

        let operations = props
            .operations
            .iter()
            .map(|selector| resolve_operation(&document, selector))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ApiPage {
            document: props.document.clone(),
            title: document.title().map(ToOwned::to_owned),
            operations,
            has_head: props.has_head,
            playground: !self.options.disable_playground,
            proxy_url: self.options.proxy_url.clone(),
        })
    }
}

fn resolve_operation(
    document: &SchemaDocument,
    selector: &OperationSelector,
) -> Result<ApiOperation, OpenApiError> {
    let operation = document
        .operation(&selector.path, selector.method)
        .ok_or_else(|| OpenApiError::UnknownOperation {
            document: document.id().to_owned(),
            method: selector.method.badge(),
            path: selector.path.clone(),
        })?;

    let path_parameters = document
        .path_item(&selector.path)
        .and_then(|item| item.get("parameters"));
    let mut parameters = Vec::new();
    for list in [path_parameters, operation.get("parameters")].into_iter().flatten() {
        if let Value::Array(items) = document.resolve(list)? {
            parameters.extend(items);
        }
    }

    let request_body = operation
        .get("requestBody")
        .map(|body| document.resolve(body))
        .transpose()?;
    let responses = operation
        .get("responses")
        .map_or(Ok(Value::Null), |responses| document.resolve(responses))?;

    Ok(ApiOperation {
        path: selector.path.clone(),
        method: selector.method,
        operation_id: text(operation, "operationId"),
        summary: text(operation, "summary"),
        description: text(operation, "description"),
        parameters,
        request_body,
        responses,
    })
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}
