//! # Core Module
//!
//! This module provides the stateless building blocks of relcsf: the quantum-number
//! codec, the configuration data model, the configuration-string parser and the
//! jj-coupling engine.
//!
//! ## Overview
//!
//! Everything here operates on values. Nothing in `core` owns a group or symmetry
//! table; those live in the [`engine`](crate::engine) layer.
//!
//! ## Architecture
//!
//! - **Quantum Numbers** ([`quantum`]) - κ ↔ (l, j), packed subshell identifiers, spectroscopic letters
//! - **Data Model** ([`models`]) - Subshells, configurations, CSF descriptors, basis states
//! - **Parsing** ([`parser`]) - Text such as `"1s2 2s2 2p3"` into configurations
//! - **Coupling** ([`coupling`]) - Seniority-scheme enumeration and shell-by-shell jj-coupling
//! - **File I/O** ([`io`]) - TOML batch descriptions
//!
//! ## Conventions
//!
//! - Angular momenta are stored doubled, so `j = 3/2` is held as `3`.
//! - Shell lists run from the outermost (largest `(n, l, j)`) subshell inward.

pub mod coupling;
pub mod io;
pub mod models;
pub mod parser;
pub mod quantum;
