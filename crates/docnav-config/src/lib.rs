//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [docs]
//! path = "docs/docs"
//! dir = "eventing"
//!
//! [tree]
//! index_names = ["index.md", "README.md"]
//! deferred_linkage = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `docs.path` and `docs.dir` support `~`, `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override base directory.
    pub path: Option<PathBuf>,
    /// Override rendered subdirectory.
    pub dir: Option<PathBuf>,
    /// Override deferred linkage flag.
    pub deferred_linkage: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Default base directory.
const DEFAULT_PATH: &str = "docs/docs";

/// Default rendered subdirectory.
const DEFAULT_DIR: &str = "eventing";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation location (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Tree building configuration.
    pub tree: TreeConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    path: Option<String>,
    dir: Option<String>,
}

/// Resolved documentation location.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocsConfig {
    /// Base directory; page paths in the outline are relative to it.
    pub base_dir: PathBuf,
    /// Subdirectory of `base_dir` whose tree is rendered.
    pub dir: PathBuf,
}

impl DocsConfig {
    /// Directory that is walked (`base_dir/dir`).
    #[must_use]
    pub fn scan_dir(&self) -> PathBuf {
        self.base_dir.join(&self.dir)
    }
}

/// Tree building configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// File names that describe their directory.
    pub index_names: Vec<String>,
    /// Link directories whose parent directory was registered after them.
    pub deferred_linkage: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            index_names: vec!["index.md".to_owned(), "README.md".to_owned()],
            deferred_linkage: false,
        }
    }
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
        /// Config field path (e.g., "`docs.path`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// Paths from a config file are resolved against the file's directory.
    /// CLI settings are applied last and taken as given (relative to the
    /// current directory).
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

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.path {
            self.docs_resolved.base_dir.clone_from(path);
        }
        if let Some(dir) = &settings.dir {
            self.docs_resolved.dir.clone_from(dir);
        }
        if let Some(deferred_linkage) = settings.deferred_linkage {
            self.tree.deferred_linkage = deferred_linkage;
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
            tree: TreeConfig::default(),
            docs_resolved: DocsConfig {
                base_dir: base.join(DEFAULT_PATH),
                dir: PathBuf::from(DEFAULT_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_tree()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        if self.docs_resolved.dir.is_absolute() {
            return Err(ConfigError::Validation(format!(
                "docs.dir must be relative to docs.path, got {}",
                self.docs_resolved.dir.display()
            )));
        }
        Ok(())
    }

    /// Validate tree configuration.
    fn validate_tree(&self) -> Result<(), ConfigError> {
        if self.tree.index_names.is_empty() {
            return Err(ConfigError::Validation(
                "tree.index_names cannot be empty".to_owned(),
            ));
        }
        // Only .md files are walked, so other names could never match
        if let Some(name) = self
            .tree
            .index_names
            .iter()
            .find(|name| !name.ends_with(".md") || name.contains(['/', '\\']))
        {
            return Err(ConfigError::Validation(format!(
                "tree.index_names entry {name:?} must be a .md file name"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.docs.path {
            self.docs.path = Some(expand::expand_env(path, "docs.path")?);
        }
        if let Some(ref dir) = self.docs.dir {
            self.docs.dir = Some(expand::expand_env(dir, "docs.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            base_dir: config_dir.join(self.docs.path.as_deref().unwrap_or(DEFAULT_PATH)),
            dir: PathBuf::from(self.docs.dir.as_deref().unwrap_or(DEFAULT_DIR)),
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
            config.docs_resolved.base_dir,
            PathBuf::from("/test/docs/docs")
        );
        assert_eq!(config.docs_resolved.dir, PathBuf::from("eventing"));
        assert_eq!(
            config.docs_resolved.scan_dir(),
            PathBuf::from("/test/docs/docs/eventing")
        );
        assert_eq!(config.tree.index_names, vec!["index.md", "README.md"]);
        assert!(!config.tree.deferred_linkage);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tree, TreeConfig::default());
        assert!(config.docs.path.is_none());
        assert!(config.docs.dir.is_none());
    }

    #[test]
    fn test_parse_tree_config() {
        let toml = r#"
[tree]
index_names = ["_index.md"]
deferred_linkage = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tree.index_names, vec!["_index.md"]);
        assert!(config.tree.deferred_linkage);
    }

    #[test]
    fn test_parse_unknown_type_is_error() {
        let toml = r"
[tree]
deferred_linkage = 3
";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
path = "site/content"
dir = "serving"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved,
            DocsConfig {
                base_dir: PathBuf::from("/project/site/content"),
                dir: PathBuf::from("serving"),
            }
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.base_dir,
            PathBuf::from("/project/docs/docs")
        );
        assert_eq!(config.docs_resolved.dir, PathBuf::from("eventing"));
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_base() {
        let toml = r#"
[docs]
path = "/srv/docs"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.base_dir, PathBuf::from("/srv/docs"));
    }

    #[test]
    fn test_apply_cli_settings_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            path: Some(PathBuf::from("other/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.base_dir, PathBuf::from("other/docs"));
        assert_eq!(config.docs_resolved.dir, PathBuf::from("eventing")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_dir_and_linkage() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            dir: Some(PathBuf::from("serving")),
            deferred_linkage: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.dir, PathBuf::from("serving"));
        assert!(config.tree.deferred_linkage);
        assert_eq!(
            config.docs_resolved.base_dir,
            PathBuf::from("/test/docs/docs")
        );
    }

    #[test]
    fn test_apply_cli_settings_none_changes_nothing() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.scan_dir(),
            PathBuf::from("/test/docs/docs/eventing")
        );
        assert!(!config.tree.deferred_linkage);
    }

    #[test]
    fn test_validate_rejects_absolute_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.dir = PathBuf::from("/etc");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs.dir"));
    }

    #[test]
    fn test_validate_rejects_empty_index_names() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.tree.index_names.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tree.index_names"));
    }

    #[test]
    fn test_validate_rejects_non_markdown_index_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.tree.index_names = vec!["index.html".to_owned()];

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: tree.index_names entry \"index.html\" must be a .md file name"
        );
    }

    #[test]
    fn test_validate_rejects_index_name_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.tree.index_names = vec!["nested/index.md".to_owned()];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/docnav.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &config_path,
            "[docs]\npath = \"content\"\ndir = \"${DOCNAV_TEST_SURELY_UNSET:-guides}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.base_dir, temp.path().join("content"));
        assert_eq!(config.docs_resolved.dir, PathBuf::from("guides"));
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_cli_settings_take_precedence() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[docs]\ndir = \"eventing\"\n").unwrap();
        let settings = CliSettings {
            dir: Some(PathBuf::from("serving")),
            ..Default::default()
        };

        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        assert_eq!(config.docs_resolved.dir, PathBuf::from("serving"));
    }

    #[test]
    fn test_load_invalid_cli_settings_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "").unwrap();
        let settings = CliSettings {
            dir: Some(PathBuf::from("/absolute")),
            ..Default::default()
        };

        let result = Config::load(Some(&config_path), Some(&settings));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[docs\npath = 1").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
