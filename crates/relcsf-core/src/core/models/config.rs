use super::shell::{ShellState, Subshell};
use crate::core::quantum::Parity;
use std::fmt;

/// An electron configuration together with its coupled states.
///
/// Shells are stored outermost first. The CSFs are kept in one flat buffer:
/// CSF `i` occupies `csfs[i * n_shells..(i + 1) * n_shells]`, with one
/// [`ShellState`] per shell in the same order, so the first entry of every
/// CSF carries the total angular momentum of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    shells: Vec<Subshell>,
    csfs: Vec<ShellState>,
    n_electrons: u32,
}

impl Config {
    /// Creates an uncoupled configuration, sorting the shells outermost first.
    pub fn new(mut shells: Vec<Subshell>) -> Self {
        shells.sort_by(|a, b| b.cmp(a));
        Self::from_parts(shells, Vec::new())
    }

    /// Assembles a configuration without reordering the shells.
    pub(crate) fn from_parts(shells: Vec<Subshell>, csfs: Vec<ShellState>) -> Self {
        let n_electrons = shells.iter().map(Subshell::nq).sum();
        Self {
            shells,
            csfs,
            n_electrons,
        }
    }

    pub fn shells(&self) -> &[Subshell] {
        &self.shells
    }

    pub fn n_shells(&self) -> usize {
        self.shells.len()
    }

    pub fn n_electrons(&self) -> u32 {
        self.n_electrons
    }

    pub fn outermost(&self) -> Option<&Subshell> {
        self.shells.first()
    }

    pub fn is_coupled(&self) -> bool {
        !self.csfs.is_empty()
    }

    pub fn n_csfs(&self) -> usize {
        match self.shells.len() {
            0 => 0,
            width => self.csfs.len() / width,
        }
    }

    pub fn csf(&self, index: usize) -> Option<&[ShellState]> {
        let width = self.shells.len();
        let start = index.checked_mul(width)?;
        self.csfs.get(start..start + width)
    }

    pub fn csfs(&self) -> impl Iterator<Item = &[ShellState]> {
        self.csfs.chunks_exact(self.shells.len().max(1))
    }

    /// Doubled total angular momentum of CSF `index`.
    pub fn total_j(&self, index: usize) -> Option<u32> {
        self.csf(index)
            .and_then(|csf| csf.first())
            .map(ShellState::total_j)
    }

    pub fn parity(&self) -> Parity {
        Parity::from_l_sum(self.shells.iter().map(|s| s.l() * s.nq()).sum())
    }

    pub(crate) fn set_csfs(&mut self, csfs: Vec<ShellState>) {
        self.csfs = csfs;
    }

    pub(crate) fn into_csfs(self) -> Vec<ShellState> {
        self.csfs
    }
}

/// Writes the shells innermost first, the usual reading order.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, shell) in self.shells.iter().rev().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", shell)?;
        }
        Ok(())
    }
}
