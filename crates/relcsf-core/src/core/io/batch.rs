use crate::core::models::average::{GroupWeight, Screening};
use crate::engine::config::ErrorPolicy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Optional `[session]` table of a batch file.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SessionSettings {
    pub max_groups: Option<usize>,
    pub max_symmetries: Option<usize>,
    pub on_error: Option<ErrorPolicy>,
}

/// One `[[group]]` entry: a named group and its configuration strings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    pub name: String,
    #[serde(default)]
    pub configs: Vec<String>,
}

/// Optional `[potential]` table describing the mean configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PotentialSpec {
    pub mixture: Vec<GroupWeight>,
    pub screening: Option<Screening>,
}

/// A complete batch description, loaded from TOML.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BatchSpec {
    pub session: Option<SessionSettings>,
    #[serde(rename = "group", default)]
    pub groups: Vec<GroupSpec>,
    pub potential: Option<PotentialSpec>,
}

#[derive(Debug, Error)]
pub enum BatchLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl BatchSpec {
    pub fn load(path: &Path) -> Result<Self, BatchLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| BatchLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| BatchLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn settings(&self) -> SessionSettings {
        self.session.clone().unwrap_or_default()
    }

    pub fn n_configs(&self) -> usize {
        self.groups.iter().map(|g| g.configs.len()).sum()
    }
}
