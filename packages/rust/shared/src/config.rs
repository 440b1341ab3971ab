//! Application configuration for the question-group pipeline.
//!
//! User config lives at `~/.qgroups/qgroups.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QGroupsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "qgroups.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".qgroups";

// ---------------------------------------------------------------------------
// Config structs (matching qgroups.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content locations.
    #[serde(default)]
    pub content: ContentConfig,

    /// Cross-reference handling.
    #[serde(default)]
    pub references: ReferencesConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root holding one directory per question group.
    #[serde(default = "default_root")]
    pub root: String,

    /// Directory of author records.
    #[serde(default = "default_authors_dir")]
    pub authors_dir: String,

    /// Directory of guide records.
    #[serde(default = "default_guides_dir")]
    pub guides_dir: String,

    /// Answer values ending with this suffix are read from `content/`.
    #[serde(default = "default_long_answer_suffix")]
    pub long_answer_suffix: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            authors_dir: default_authors_dir(),
            guides_dir: default_guides_dir(),
            long_answer_suffix: default_long_answer_suffix(),
        }
    }
}

fn default_root() -> String {
    "src/data/question-groups".into()
}
fn default_authors_dir() -> String {
    "src/data/authors".into()
}
fn default_guides_dir() -> String {
    "src/data/guides".into()
}
fn default_long_answer_suffix() -> String {
    ".md".into()
}

/// `[references]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferencesConfig {
    /// Fail the assembly when a declared author or guide id matches nothing.
    #[serde(default)]
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// Assemble options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime assembly options — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Suffix that marks an answer as a long-form file reference.
    pub long_answer_suffix: String,
    /// Turn dangling author/guide ids into errors.
    pub strict_references: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AssembleOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            long_answer_suffix: config.content.long_answer_suffix.clone(),
            strict_references: config.references.strict,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.qgroups/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| QGroupsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.qgroups/qgroups.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| QGroupsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| QGroupsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| QGroupsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| QGroupsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| QGroupsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("src/data/question-groups"));
        assert!(toml_str.contains("long_answer_suffix"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.content.long_answer_suffix, ".md");
        assert!(!parsed.references.strict);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[content]
root = "/srv/content/question-groups"

[references]
strict = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.content.root, "/srv/content/question-groups");
        assert_eq!(config.content.guides_dir, "src/data/guides");
        assert!(config.references.strict);
    }

    #[test]
    fn assemble_options_from_app_config() {
        let mut app = AppConfig::default();
        app.references.strict = true;
        app.content.long_answer_suffix = ".mdx".into();

        let opts = AssembleOptions::from(&app);
        assert!(opts.strict_references);
        assert_eq!(opts.long_answer_suffix, ".mdx");

        let defaults = AssembleOptions::default();
        assert!(!defaults.strict_references);
        assert_eq!(defaults.long_answer_suffix, ".md");
    }

    #[test]
    fn load_config_from_reports_bad_toml() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("qgroups.toml");
        std::fs::write(&path, "content = [").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
