//! # Workflows Module
//!
//! This module provides the high-level procedures that drive a complete basis
//! generation run.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of relcsf. They take a
//! [`Session`](crate::engine::session::Session) and a batch description and carry
//! out every parse, coupling and classification step, reporting progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! ## Architecture
//!
//! - **Enumeration Workflow** ([`enumerate`]) - Fills the group and symmetry tables from
//!   the `[[group]]` entries of a batch, honouring the batch error policy.
//! - **Potential Workflow** ([`potential`]) - Builds the mean configuration of a weighted
//!   group mixture, optionally with an extra screening charge.

pub mod enumerate;
pub mod potential;
