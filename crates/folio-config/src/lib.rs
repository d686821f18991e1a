//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.manifest`
//! - `docs.base_url`
//! - `openapi.proxy_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override manifest file.
    pub manifest: Option<PathBuf>,
    /// Override base URL of generated page URLs.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// Default base URL of documentation pages.
const DEFAULT_BASE_URL: &str = "/docs";

/// Default content directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "content/docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// `OpenAPI` configuration.
    openapi: OpenApiConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved `OpenAPI` configuration (set after loading).
    #[serde(skip)]
    pub openapi_resolved: OpenApiConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    manifest: Option<String>,
    base_url: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory scanned for `.mdx`/`.md` pages and `meta.json` files.
    pub source_dir: PathBuf,
    /// Prebuilt manifest loaded instead of scanning `source_dir`.
    pub manifest: Option<PathBuf>,
    /// Base URL prepended to page slugs.
    pub base_url: String,
}

/// Raw `OpenAPI` configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OpenApiConfigRaw {
    documents: Vec<String>,
    output_dir: Option<String>,
    proxy_url: Option<String>,
    disable_playground: bool,
}

/// Resolved `OpenAPI` configuration.
#[derive(Debug, Default)]
pub struct OpenApiConfig {
    /// Directory document ids are resolved against (the config directory).
    pub base_dir: PathBuf,
    /// Documents loaded at startup, relative to `base_dir`.
    pub documents: Vec<String>,
    /// Content folder receiving generated API pages.
    pub output_dir: Option<String>,
    /// Proxy used by the interactive playground.
    pub proxy_url: Option<String>,
    /// Disable the interactive playground.
    pub disable_playground: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`openapi.proxy_url`").
        field: String,
        /// Error message (e.g., "${`API_PROXY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to be a site-relative path or an http(s) URL.
fn require_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with('/') && !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with /, http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Directory containing the config file, or the current directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.openapi_resolved.base_dir
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(manifest) = &settings.manifest {
            self.docs_resolved.manifest = Some(manifest.clone());
        }
        if let Some(base_url) = &settings.base_url {
            self.docs_resolved.base_url.clone_from(base_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            openapi: OpenApiConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                manifest: None,
                base_url: DEFAULT_BASE_URL.to_owned(),
            },
            openapi_resolved: OpenApiConfig {
                base_dir: base.to_path_buf(),
                ..OpenApiConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_openapi()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let base_url = &self.docs_resolved.base_url;
        require_non_empty(base_url, "docs.base_url")?;
        if !base_url.starts_with('/') {
            return Err(ConfigError::Validation(
                "docs.base_url must start with /".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate `OpenAPI` configuration.
    fn validate_openapi(&self) -> Result<(), ConfigError> {
        let openapi = &self.openapi_resolved;

        for document in &openapi.documents {
            require_non_empty(document, "openapi.documents")?;
        }

        if let Some(output_dir) = &openapi.output_dir
            && output_dir.split('/').any(|segment| segment == "..")
        {
            return Err(ConfigError::Validation(
                "openapi.output_dir must stay inside the content directory".to_owned(),
            ));
        }

        if let Some(proxy_url) = &openapi.proxy_url {
            require_url(proxy_url, "openapi.proxy_url")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref manifest) = self.docs.manifest {
            self.docs.manifest = Some(expand::expand_env(manifest, "docs.manifest")?);
        }
        if let Some(ref url) = self.docs.base_url {
            self.docs.base_url = Some(expand::expand_env(url, "docs.base_url")?);
        }

        // An empty proxy (e.g. `${API_PROXY:-}`) means no proxy.
        if let Some(ref url) = self.openapi.proxy_url {
            let expanded = expand::expand_env(url, "openapi.proxy_url")?;
            self.openapi.proxy_url = (!expanded.is_empty()).then_some(expanded);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            manifest: self.docs.manifest.as_deref().map(|m| config_dir.join(m)),
            base_url: self
                .docs
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        };

        self.openapi_resolved = OpenApiConfig {
            base_dir: config_dir.to_path_buf(),
            documents: self.openapi.documents.clone(),
            output_dir: self.openapi.output_dir.clone(),
            proxy_url: self.openapi.proxy_url.clone(),
            disable_playground: self.openapi.disable_playground,
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/test/content/docs")
        );
        assert_eq!(config.docs_resolved.base_url, "/docs");
        assert!(config.docs_resolved.manifest.is_none());
        assert_eq!(config.base_dir(), Path::new("/test"));
        assert!(config.openapi_resolved.documents.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.docs.source_dir.is_none());
        assert!(config.openapi.documents.is_empty());
        assert!(!config.openapi.disable_playground);
    }

    #[test]
    fn test_parse_openapi_config() {
        let toml = r#"
[openapi]
documents = ["openapi.yaml", "specs/admin.json"]
output_dir = "api"
disable_playground = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.openapi.documents,
            vec!["openapi.yaml".to_owned(), "specs/admin.json".to_owned()]
        );
        assert_eq!(config.openapi.output_dir.as_deref(), Some("api"));
        assert!(config.openapi.disable_playground);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
manifest = ".source/manifest.json"
base_url = "/handbook"

[openapi]
documents = ["openapi.yaml"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.manifest,
            Some(PathBuf::from("/project/.source/manifest.json"))
        );
        assert_eq!(config.docs_resolved.base_url, "/handbook");
        assert_eq!(config.openapi_resolved.base_dir, PathBuf::from("/project"));
        assert_eq!(config.openapi_resolved.documents, vec!["openapi.yaml"]);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content/docs")
        );
        assert_eq!(config.docs_resolved.base_url, "/docs");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"pages\"\n\n[openapi]\noutput_dir = \"reference\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(
            config.openapi_resolved.output_dir.as_deref(),
            Some("reference")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            source_dir: None,
            manifest: Some(PathBuf::from("/tmp/manifest.json")),
            base_url: Some("/guide".to_owned()),
        };

        config.apply_cli_settings(&settings);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/content/docs"));
        assert_eq!(
            config.docs_resolved.manifest,
            Some(PathBuf::from("/tmp/manifest.json"))
        );
        assert_eq!(config.docs_resolved.base_url, "/guide");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.base_url, "/docs");
        assert!(config.docs_resolved.manifest.is_none());
    }

    #[test]
    fn test_expand_env_vars_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_CFG_BASE_URL", "/reference");
        }
        let mut config: Config = toml::from_str("[docs]\nbase_url = \"${FOLIO_CFG_BASE_URL}\"\n").unwrap();

        config.expand_env_vars().unwrap();

        assert_eq!(config.docs.base_url.as_deref(), Some("/reference"));
        unsafe {
            std::env::remove_var("FOLIO_CFG_BASE_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_empty_proxy_is_none() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_CFG_UNSET_PROXY");
        }
        let mut config: Config =
            toml::from_str("[openapi]\nproxy_url = \"${FOLIO_CFG_UNSET_PROXY:-}\"\n").unwrap();

        config.expand_env_vars().unwrap();

        assert!(config.openapi.proxy_url.is_none());
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_CFG_MISSING");
        }
        let mut config: Config =
            toml::from_str("[openapi]\nproxy_url = \"${FOLIO_CFG_MISSING}\"\n").unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(
            matches!(&err, ConfigError::EnvVar { field, .. } if field == "openapi.proxy_url"),
            "Expected EnvVar error, got {err:?}"
        );
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_relative() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.base_url = "docs".to_owned();

        assert_validation_error(&config, &["docs.base_url", "must start with /"]);
    }

    #[test]
    fn test_validate_base_url_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.base_url = String::new();

        assert_validation_error(&config, &["docs.base_url", "cannot be empty"]);
    }

    #[test]
    fn test_validate_proxy_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.openapi_resolved.proxy_url = Some("ftp://proxy".to_owned());

        assert_validation_error(&config, &["openapi.proxy_url"]);
    }

    #[test]
    fn test_validate_proxy_url_relative_and_https() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.openapi_resolved.proxy_url = Some("/api/proxy".to_owned());
        assert!(config.validate().is_ok());

        config.openapi_resolved.proxy_url = Some("https://proxy.example.com".to_owned());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_output_dir_escapes_content() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.openapi_resolved.output_dir = Some("../api".to_owned());

        assert_validation_error(&config, &["openapi.output_dir"]);
    }

    #[test]
    fn test_validate_empty_document() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.openapi_resolved.documents = vec![" ".to_owned()];

        assert_validation_error(&config, &["openapi.documents"]);
    }

    #[test]
    fn test_load_rejects_invalid_cli_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            base_url: Some("docs".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
