//! Configuration loading
//!
//! `defaults/strucedit.default.toml` is embedded into the binary. A user file
//! and command-line overrides are layered on top through [`Loader`] before
//! deserializing into [`EditorConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/strucedit.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    pub editor: EditorSection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorSection {
    pub indent_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    pub suggested_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    pub filter: String,
    pub file: String,
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file that must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file, ignored if absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<EditorConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<EditorConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.editor.indent_width, 4);
        assert_eq!(config.storage.suggested_name, "save.txt");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_override() {
        let config = Loader::new()
            .set_override("editor.indent_width", 2i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.editor.indent_width, 2);
    }

    #[test]
    fn test_user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[logging]\nfilter = \"debug\"").expect("write config");

        let config = Loader::new().with_file(file.path()).build().expect("config to build");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.logging.file, "strucedit.log");
    }

    #[test]
    fn test_missing_optional_file() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/strucedit.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.editor.indent_width, 4);
    }
}
