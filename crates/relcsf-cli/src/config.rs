use crate::cli::{GenerateArgs, OnError};
use crate::error::{CliError, Result};
use relcsf::core::io::batch::{BatchSpec, SessionSettings};
use relcsf::engine::config::{ErrorPolicy, SessionConfig, SessionConfigBuilder};
use std::path::Path;
use tracing::debug;

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => ErrorPolicy::Abort,
            OnError::Skip => ErrorPolicy::Skip,
        }
    }
}

/// Settings of one `generate` run after the batch file and the command line
/// have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub session: SessionConfig,
    pub policy: ErrorPolicy,
}

pub fn load_batch(path: &Path) -> Result<BatchSpec> {
    debug!("Loading batch description from file: {:?}", path);
    BatchSpec::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Command-line values take precedence over the `[session]` table, which
/// takes precedence over the library defaults.
pub fn merge_with_cli(file: &SessionSettings, args: &GenerateArgs) -> Result<RunSettings> {
    let mut builder = SessionConfigBuilder::new();
    if let Some(n) = args.max_groups.or(file.max_groups) {
        builder = builder.max_groups(n);
    }
    if let Some(n) = args.max_symmetries.or(file.max_symmetries) {
        builder = builder.max_symmetries(n);
    }
    let session = builder.build()?;

    let policy = args
        .on_error
        .map(ErrorPolicy::from)
        .or(file.on_error)
        .unwrap_or_default();

    debug!("Resolved run settings: {:?}, policy {:?}", session, policy);
    Ok(RunSettings { session, policy })
}
