use thiserror::Error;

use crate::core::coupling::CouplingError;
use crate::core::models::ids::{GroupId, StateRef};
use crate::core::parser::ParseError;
use crate::core::quantum::QuantumError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration group '{0}' already exists")]
    GroupExists(String),

    #[error("Configuration group '{0}' not found")]
    GroupNotFound(String),

    #[error("Invalid group name '{name}': {reason}")]
    InvalidGroupName { name: String, reason: &'static str },

    #[error("Group table is full (capacity {capacity})")]
    GroupTableFull { capacity: usize },

    #[error("No configuration group with id {0}")]
    InvalidGroup(GroupId),

    #[error("Group '{group}' holds {expected}-electron configurations, got {found} electrons")]
    ElectronCountMismatch {
        group: String,
        expected: u32,
        found: u32,
    },

    #[error("Symmetry index {index} (2J = {j2}) exceeds the table capacity {capacity}")]
    SymmetryOutOfRange {
        index: usize,
        j2: u32,
        capacity: usize,
    },

    #[error("Basis state {0} does not exist")]
    StateNotFound(StateRef),

    #[error(
        "2J = {j2} cannot be reached by coupling an orbital with 2j = {orbital_j2} to a parent with 2J = {parent_j2}"
    )]
    SpectatorCoupling {
        parent_j2: u32,
        orbital_j2: u32,
        j2: u32,
    },

    #[error("Invalid orbital: {0}")]
    Orbital(#[from] QuantumError),

    #[error("Configuration parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Coupling failed: {0}")]
    Coupling(#[from] CouplingError),

    #[error("Configuration group '{0}' is empty")]
    EmptyGroup(String),

    #[error("Invalid group mixture: {0}")]
    InvalidMixture(&'static str),
}

impl EngineError {
    /// Errors after which a batch cannot meaningfully continue, whatever the
    /// error policy.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::GroupExists(_)
                | Self::InvalidGroupName { .. }
                | Self::GroupTableFull { .. }
                | Self::SymmetryOutOfRange { .. }
        )
    }
}
