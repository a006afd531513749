use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_MAX_GROUPS: usize = 1024;
pub const DEFAULT_MAX_SYMMETRIES: usize = 512;
pub const DEFAULT_CONFIGS_BLOCK: usize = 256;
pub const DEFAULT_STATES_BLOCK: usize = 512;

/// Maximum length of a group name, in characters.
pub const GROUP_NAME_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{0}' must be greater than zero")]
    ZeroParameter(&'static str),
}

/// What a batch does when a configuration fails to parse or couple.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_groups: usize,
    pub max_symmetries: usize,
    pub configs_block: usize,
    pub states_block: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_groups: DEFAULT_MAX_GROUPS,
            max_symmetries: DEFAULT_MAX_SYMMETRIES,
            configs_block: DEFAULT_CONFIGS_BLOCK,
            states_block: DEFAULT_STATES_BLOCK,
        }
    }
}

#[derive(Default)]
pub struct SessionConfigBuilder {
    max_groups: Option<usize>,
    max_symmetries: Option<usize>,
    configs_block: Option<usize>,
    states_block: Option<usize>,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_groups(mut self, n: usize) -> Self {
        self.max_groups = Some(n);
        self
    }
    pub fn max_symmetries(mut self, n: usize) -> Self {
        self.max_symmetries = Some(n);
        self
    }
    pub fn configs_block(mut self, n: usize) -> Self {
        self.configs_block = Some(n);
        self
    }
    pub fn states_block(mut self, n: usize) -> Self {
        self.states_block = Some(n);
        self
    }

    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        let nonzero = |value: Option<usize>, default: usize, name: &'static str| {
            match value.unwrap_or(default) {
                0 => Err(ConfigError::ZeroParameter(name)),
                v => Ok(v),
            }
        };
        Ok(SessionConfig {
            max_groups: nonzero(self.max_groups, DEFAULT_MAX_GROUPS, "max_groups")?,
            max_symmetries: nonzero(
                self.max_symmetries,
                DEFAULT_MAX_SYMMETRIES,
                "max_symmetries",
            )?,
            configs_block: nonzero(self.configs_block, DEFAULT_CONFIGS_BLOCK, "configs_block")?,
            states_block: nonzero(self.states_block, DEFAULT_STATES_BLOCK, "states_block")?,
        })
    }
}
