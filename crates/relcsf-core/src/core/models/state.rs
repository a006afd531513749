use super::ids::{GroupId, StateRef};
use crate::core::quantum::SubshellId;

/// One member of a symmetry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasisState {
    /// CSF `csf` of configuration `config` in group `group`.
    Native {
        group: GroupId,
        config: usize,
        csf: usize,
    },
    /// A state built by coupling one extra electron in `orbital` to an
    /// already classified `parent` state, giving doubled total `total_j`.
    Spectator {
        parent: StateRef,
        orbital: SubshellId,
        total_j: u32,
    },
}

impl BasisState {
    pub fn native(group: GroupId, config: usize, csf: usize) -> Self {
        BasisState::Native { group, config, csf }
    }

    pub fn spectator(parent: StateRef, orbital: SubshellId, total_j: u32) -> Self {
        BasisState::Spectator {
            parent,
            orbital,
            total_j,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, BasisState::Native { .. })
    }

    pub fn is_spectator(&self) -> bool {
        matches!(self, BasisState::Spectator { .. })
    }

    /// Returns `(group, config, csf)` for native states.
    pub fn as_native(&self) -> Option<(GroupId, usize, usize)> {
        match *self {
            BasisState::Native { group, config, csf } => Some((group, config, csf)),
            BasisState::Spectator { .. } => None,
        }
    }

    pub fn parent(&self) -> Option<StateRef> {
        match *self {
            BasisState::Spectator { parent, .. } => Some(parent),
            BasisState::Native { .. } => None,
        }
    }
}
