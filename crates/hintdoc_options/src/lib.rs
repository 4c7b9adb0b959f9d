//! hintdoc_options: hintdoc.json parsing and project options.
//!
//! Parses `hintdoc.json` project files and discovers the source files a
//! project covers.

mod discovery;

pub use discovery::{discover_source_files, SOURCE_EXTENSIONS};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// The project file name searched for by [`HintdocConfig::find`].
pub const CONFIG_FILE_NAME: &str = "hintdoc.json";

/// Line terminator written to outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLine {
    #[default]
    Lf,
    Crlf,
}

impl NewLine {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::Crlf => "\r\n",
        }
    }
}

/// Output options, matching the `compilerOptions` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub out_dir: Option<String>,
    /// Inputs below this directory keep their relative location under `outDir`.
    pub root_dir: Option<String>,
    pub out_extension: Option<String>,
    /// Spaces per nesting level.
    pub indent: Option<usize>,
    pub new_line: Option<NewLine>,
    pub remove_comments: Option<bool>,
    pub no_emit: Option<bool>,
}

impl CompilerOptions {
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent.unwrap_or(4))
    }

    pub fn new_line_str(&self) -> &'static str {
        self.new_line.unwrap_or_default().as_str()
    }
}

/// The hintdoc.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintdocConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("a hintdoc.json file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
}

impl HintdocConfig {
    /// Find the project file in `dir` or the nearest ancestor that has one.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        self.compiler_options.clone().unwrap_or_default()
    }

    /// Include patterns, defaulting to every source file below the project.
    pub fn include_patterns(&self) -> Vec<String> {
        self.include
            .clone()
            .unwrap_or_else(|| vec!["**/*".to_string()])
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        self.exclude.clone().unwrap_or_default()
    }

    /// The project file written by `hintdoc --init`.
    pub fn init_template() -> Self {
        Self {
            compiler_options: Some(CompilerOptions {
                out_dir: Some("dist".to_string()),
                root_dir: Some("src".to_string()),
                out_extension: Some("js".to_string()),
                indent: Some(4),
                new_line: Some(NewLine::Lf),
                remove_comments: Some(false),
                no_emit: Some(false),
            }),
            include: Some(vec!["src/**/*.js".to_string()]),
            exclude: Some(vec!["node_modules".to_string(), "dist".to_string()]),
            files: None,
        }
    }

    /// Write [`HintdocConfig::init_template`] into `dir`, refusing to replace
    /// an existing project file.
    pub fn write_init_template(dir: &Path) -> Result<PathBuf, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }
        let mut text = serde_json::to_string_pretty(&Self::init_template()).map_err(|source| {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        text.push('\n');
        std::fs::write(&path, text).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Parse a hintdoc.json file from a string.
pub fn parse_config(content: &str) -> Result<HintdocConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a hintdoc.json file from a path.
pub fn parse_config_file(path: &Path) -> Result<HintdocConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded project file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case() {
        let config = parse_config(
            r#"{
                "compilerOptions": {
                    "outDir": "out",
                    "outExtension": "js",
                    "indent": 2,
                    "newLine": "crlf",
                    "removeComments": true
                },
                "include": ["lib/**/*.js"],
                "exclude": ["lib/vendor"]
            }"#,
        )
        .unwrap();
        let options = config.compiler_options();
        assert_eq!(options.out_dir.as_deref(), Some("out"));
        assert_eq!(options.indent_str(), "  ");
        assert_eq!(options.new_line_str(), "\r\n");
        assert_eq!(options.remove_comments, Some(true));
        assert_eq!(options.no_emit, None);
        assert_eq!(config.include_patterns(), vec!["lib/**/*.js"]);
        assert_eq!(config.exclude_patterns(), vec!["lib/vendor"]);
    }

    #[test]
    fn test_defaults() {
        let config = parse_config("{}").unwrap();
        let options = config.compiler_options();
        assert_eq!(options.indent_str(), "    ");
        assert_eq!(options.new_line_str(), "\n");
        assert_eq!(config.include_patterns(), vec!["**/*"]);
        assert!(config.files.is_none());
    }

    #[test]
    fn test_rejects_unknown_new_line() {
        assert!(parse_config(r#"{"compilerOptions": {"newLine": "cr"}}"#).is_err());
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(
            HintdocConfig::find(&nested),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_parse_config_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        let err = parse_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_init_template_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = HintdocConfig::write_init_template(dir.path()).unwrap();
        assert_eq!(parse_config_file(&path).unwrap(), HintdocConfig::init_template());
        assert!(matches!(
            HintdocConfig::write_init_template(dir.path()),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
