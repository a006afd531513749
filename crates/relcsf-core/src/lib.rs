//! # relcsf Core Library
//!
//! Generation of relativistic configuration state functions (CSFs) for
//! atomic-structure calculations.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that each concern can be
//! tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless values and algorithms: the quantum-number
//!   codec, subshells and configurations, the configuration-string parser and the
//!   jj-coupling engine.
//!
//! - **[`engine`]: The Logic Core.** The stateful `Session` that collects coupled
//!   configurations into named groups and files every CSF into its `(parity, J)`
//!   symmetry class, together with spectator-electron states built on top of them.
//!
//! - **[`workflows`]: The Public API.** Batch procedures tying `core` and `engine`
//!   together: enumerating a whole batch file and building the mean configuration
//!   used for a central potential.

pub mod core;
pub mod engine;
pub mod workflows;
