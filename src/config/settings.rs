use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::errors::ConfigError;

/// What a build produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Emit target source only.
    #[default]
    Transpile,
    /// Emit target source and compile it.
    Compile,
}

/// Project build settings, read from the settings file as JSON.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub cxx_out_dir: String,
    pub cxx_out_name: String,
    pub out_name: String,
    pub language: String,
    pub mode: BuildMode,
    pub post_commands: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            cxx_out_dir: String::from("./dist"),
            cxx_out_name: String::from("x.cxx"),
            out_name: String::from("main"),
            language: String::new(),
            mode: BuildMode::Transpile,
            post_commands: vec![],
        }
    }
}

impl BuildSettings {
    /// Parses settings from JSON text.
    pub fn load(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses the settings file at `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        BuildSettings::load(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
