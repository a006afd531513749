//! # Engine Module
//!
//! This module holds the stateful side of relcsf: the tables that collect
//! configurations into groups and sort their CSFs into symmetry classes.
//!
//! ## Overview
//!
//! A [`session::Session`] owns one [`groups::GroupTable`] and one
//! [`symmetry::SymmetryTable`]. Configurations enter a named group, are coupled
//! if they have not been already, and every resulting CSF is appended to the
//! class of its parity and total `J`. States obtained by coupling an extra
//! spectator electron to an existing state are filed the same way.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Table capacities, block sizes and the batch error policy
//! - **Groups** ([`groups`]) - Named configuration groups with a fixed electron count
//! - **Symmetries** ([`symmetry`]) - `(parity, J)` classes of native and spectator states
//! - **Session** ([`session`]) - The context object tying both tables together
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Invariants
//!
//! - Group, configuration and state positions never change once assigned.
//! - A rejected operation leaves both tables exactly as they were.

pub(crate) mod blocks;
pub mod config;
pub mod error;
pub mod groups;
pub mod progress;
pub mod session;
pub mod symmetry;
