//! Parsed `OpenAPI` documents.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::OpenApiError;
use crate::method::HttpMethod;

/// Maximum `$ref` nesting followed while resolving.
const MAX_REF_DEPTH: usize = 32;

/// An operation listed in a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRef {
    /// Route path (e.g., "/users/{id}").
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// `operationId`, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Tags used for grouping.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl OperationRef {
    /// Display title: summary, else operation id, else `METHOD path`.
    #[must_use]
    pub fn title(&self) -> String {
        self.summary
            .clone()
            .or_else(|| self.operation_id.clone())
            .unwrap_or_else(|| format!("{} {}", self.method, self.path))
    }
}

/// A parsed `OpenAPI` 3.x document.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDocument {
    id: String,
    root: Value,
}

impl SchemaDocument {
    /// Parse a JSON or YAML document.
    ///
    /// Content starting with `{` is parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns a parse error, or `UnsupportedVersion` if the document is not
    /// `OpenAPI` 3.x (Swagger 2.0 documents are rejected).
    pub fn parse(id: impl Into<String>, content: &str) -> Result<Self, OpenApiError> {
        let id = id.into();
        let root: Value = if content.trim_start().starts_with('{') {
            serde_json::from_str(content).map_err(|source| OpenApiError::Json {
                id: id.clone(),
                source,
            })?
        } else {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|source| OpenApiError::Yaml {
                    id: id.clone(),
                    source,
                })?;
            // Integer keys such as response codes become strings.
            serde_json::to_value(yaml).map_err(|source| OpenApiError::Json {
                id: id.clone(),
                source,
            })?
        };

        match root.get("openapi").and_then(Value::as_str) {
            Some(version) if version.starts_with("3.") => Ok(Self { id, root }),
            Some(version) => Err(OpenApiError::UnsupportedVersion {
                id,
                version: version.to_owned(),
            }),
            None => {
                let version = root
                    .get("swagger")
                    .and_then(Value::as_str)
                    .map_or_else(|| "missing".to_owned(), |v| format!("swagger {v}"));
                Err(OpenApiError::UnsupportedVersion { id, version })
            }
        }
    }

    /// Document id (path relative to the base directory, or registered name).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared `OpenAPI` version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.root
            .get("openapi")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// `info.title`, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.root.pointer("/info/title").and_then(Value::as_str)
    }

    /// Raw document.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.root
    }

    /// All operations, ordered by route path then [`HttpMethod::ALL`].
    #[must_use]
    pub fn operations(&self) -> Vec<OperationRef> {
        let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut operations = Vec::new();
        for (path, item) in paths {
            for method in HttpMethod::ALL {
                let Some(operation) = item.get(method.as_str()) else {
                    continue;
                };
                operations.push(OperationRef {
                    path: path.clone(),
                    method,
                    operation_id: string_field(operation, "operationId"),
                    summary: string_field(operation, "summary"),
                    tags: operation
                        .get("tags")
                        .and_then(Value::as_array)
                        .map(|tags| {
                            tags.iter()
                                .filter_map(Value::as_str)
                                .map(ToOwned::to_owned)
                                .collect()
                        })
                        .unwrap_or_default(),
                });
            }
        }
        operations
    }

    /// Raw path item for a route.
    #[must_use]
    pub fn path_item(&self, path: &str) -> Option<&Value> {
        self.root.get("paths")?.get(path)
    }

    /// Raw operation object.
    #[must_use]
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Value> {
        self.path_item(path)?.get(method.as_str())
    }

    /// Resolve every local `$ref` in a value.
    ///
    /// A reference that is already being expanded is left in place as
    /// `{"$ref": ..., "x-circular": true}`.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedRef` for missing or non-local targets and
    /// `RefTooDeep` when references nest more than 32 levels.
    pub fn resolve(&self, value: &Value) -> Result<Value, OpenApiError> {
        let mut stack = Vec::new();
        self.resolve_inner(value, &mut stack)
    }

    fn resolve_inner(&self, value: &Value, stack: &mut Vec<String>) -> Result<Value, OpenApiError> {
        match value {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                    return self.resolve_ref(reference, stack);
                }
                let mut resolved = Map::with_capacity(map.len());
                for (key, item) in map {
                    resolved.insert(key.clone(), self.resolve_inner(item, stack)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_inner(item, stack))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn resolve_ref(&self, reference: &str, stack: &mut Vec<String>) -> Result<Value, OpenApiError> {
        if stack.iter().any(|r| r == reference) {
            return Ok(json!({ "$ref": reference, "x-circular": true }));
        }
        if stack.len() >= MAX_REF_DEPTH {
            return Err(OpenApiError::RefTooDeep(reference.to_owned()));
        }

        let target = reference
            .strip_prefix('#')
            .and_then(|pointer| self.root.pointer(pointer))
            .ok_or_else(|| OpenApiError::UnresolvedRef(reference.to_owned()))?;

        stack.push(reference.to_owned());
        let resolved = self.resolve_inner(target, stack);
        stack.pop();
        resolved
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}
