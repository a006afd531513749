//! # Coupling Module
//!
//! Enumerates the configuration state functions (CSFs) of a configuration in
//! jj-coupling.
//!
//! ## Overview
//!
//! Each open subshell contributes every `(J, seniority)` state allowed for its
//! equivalent electrons ([`seniority`]). The shells are then coupled one at a
//! time from the innermost outward: the resultant of each shell is
//! vector-coupled with the cumulative resultant of the shells inside it
//! ([`couple`]).
//!
//! Three entry points are provided:
//!
//! - [`couple::couple`] - general coupling of any shell list
//! - [`couple::couple_outermost`] - couples one outer shell onto an already
//!   coupled inner block, reused when adding a spectator electron
//! - [`couple::single_shell`] - direct enumeration for one-shell configurations
//!
//! Closed subshells have a single `J = 0` state and are passed through without
//! triangle enumeration.

pub mod couple;
pub mod seniority;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CouplingError {
    #[error("Cannot couple a configuration without subshells")]
    EmptyShellList,

    #[error("Occupation {nq} exceeds the subshell capacity {capacity}")]
    OccupationOutOfRange { nq: u32, capacity: u32 },

    #[error("2j = {0} is not a valid single-electron angular momentum")]
    InvalidAngularMomentum(u32),

    #[error("Subshell {0} appears more than once in the configuration")]
    DuplicateSubshell(String),

    #[error("Expected a single-shell configuration, found {0} shells")]
    NotSingleShell(usize),

    #[error("The inner block must be coupled before an outer shell is added")]
    InnerNotCoupled,

    #[error("Coupling produced no states")]
    NoStates,
}
