use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The relcsf developers",
    version,
    about = "relcsf CLI - Generates relativistic configuration state functions and sorts them into (parity, J) symmetry classes.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate every group of a batch file and classify the resulting CSFs.
    Generate(GenerateArgs),
    /// Expand, couple and print the CSFs of a single configuration string.
    Couple(CoupleArgs),
}

/// What to do with a configuration string that cannot be parsed or coupled.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failing configuration.
    Abort,
    /// Report the failing configuration and continue.
    Skip,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Path to the batch description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write every basis state to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Override `session.on-error` from the batch file.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_error: Option<OnError>,

    /// Override `session.max-groups` from the batch file.
    #[arg(long, value_name = "INT")]
    pub max_groups: Option<usize>,

    /// Override `session.max-symmetries` from the batch file.
    #[arg(long, value_name = "INT")]
    pub max_symmetries: Option<usize>,
}

/// Arguments for the `couple` subcommand.
#[derive(Args, Debug)]
pub struct CoupleArgs {
    /// Configuration string, e.g. "1s2 2s2 2p3" or "2p-1 2p+2".
    #[arg(required = true, value_name = "SPEC")]
    pub spec: String,

    /// Treat occupations as fractional and print the mean configuration instead.
    #[arg(long)]
    pub average: bool,
}
