//! # Core Models Module
//!
//! Data structures describing relativistic configurations and the basis states
//! generated from them.
//!
//! ## Key Components
//!
//! - [`shell`] - Subshells `(n, κ, nq)` and the per-shell coupling state of a CSF
//! - [`config`] - Configurations with their flat list of coupled states
//! - [`average`] - Fractional-occupation mean configurations for potential construction
//! - [`state`] - Basis states, either native CSFs or spectator-augmented states
//! - [`ids`] - Positional identifiers for groups, symmetry classes and states
//!
//! ## Conventions
//!
//! Every angular momentum (`j`, `J`, `M`) is stored as twice its physical value
//! so that half-integers stay integral. Shell lists are ordered outermost first.
//!
//! ```ignore
//! use relcsf::core::models::{config::Config, shell::Subshell};
//!
//! let config = Config::new(vec![Subshell::new(1, -1, 2)?, Subshell::new(2, -2, 1)?]);
//! assert_eq!(config.n_electrons(), 3);
//! ```

pub mod average;
pub mod config;
pub mod ids;
pub mod shell;
pub mod state;
