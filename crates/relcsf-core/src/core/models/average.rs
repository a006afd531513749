use crate::core::quantum::{split_kappa, write_subshell_label};
use serde::Deserialize;
use std::fmt;

/// A subshell with a fractional occupation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageShell {
    n: u32,
    kappa: i32,
    nq: f64,
}

impl AverageShell {
    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn kappa(&self) -> i32 {
        self.kappa
    }

    pub fn nq(&self) -> f64 {
        self.nq
    }

    pub fn j2(&self) -> u32 {
        split_kappa(self.kappa).0
    }

    pub fn l(&self) -> u32 {
        split_kappa(self.kappa).1
    }
}

impl fmt::Display for AverageShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subshell_label(f, self.n, self.kappa)?;
        write!(f, "({:.4})", self.nq)
    }
}

/// The mean configuration that determines a single central potential.
///
/// Occupations are weighted averages over the contributing configurations
/// and are never coupled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AverageConfig {
    n_cfgs: usize,
    shells: Vec<AverageShell>,
}

impl AverageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of configurations that contributed to the average.
    pub fn n_cfgs(&self) -> usize {
        self.n_cfgs
    }

    pub fn shells(&self) -> &[AverageShell] {
        &self.shells
    }

    pub fn n_electrons(&self) -> f64 {
        self.shells.iter().map(AverageShell::nq).sum()
    }

    pub fn occupation(&self, n: u32, kappa: i32) -> Option<f64> {
        self.shells
            .iter()
            .find(|s| s.n == n && s.kappa == kappa)
            .map(AverageShell::nq)
    }

    /// Adds `nq` electrons to subshell `(n, κ)`. The caller guarantees the
    /// pair is valid.
    pub(crate) fn accumulate(&mut self, n: u32, kappa: i32, nq: f64) {
        if nq <= 0.0 {
            return;
        }
        match self
            .shells
            .iter_mut()
            .find(|s| s.n == n && s.kappa == kappa)
        {
            Some(shell) => shell.nq += nq,
            None => self.shells.push(AverageShell { n, kappa, nq }),
        }
    }

    /// Adds `nq` electrons to shell `nl`, shared between its `j` branches in
    /// proportion to their degeneracies `2j + 1`.
    pub(crate) fn accumulate_nl(&mut self, n: u32, l: u32, nq: f64) {
        if l == 0 {
            self.accumulate(n, -1, nq);
            return;
        }
        let total = f64::from(4 * l + 2);
        self.accumulate(n, l as i32, nq * f64::from(2 * l) / total);
        self.accumulate(n, -(l as i32) - 1, nq * f64::from(2 * l + 2) / total);
    }

    pub(crate) fn add_contributors(&mut self, count: usize) {
        self.n_cfgs += count;
    }

    /// Orders the shells outermost first, like [`super::config::Config`].
    pub(crate) fn finish(&mut self) {
        self.shells.sort_by(|a, b| {
            (b.n, b.l(), b.j2())
                .cmp(&(a.n, a.l(), a.j2()))
        });
    }
}

/// One entry of a group mixture used to build an [`AverageConfig`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupWeight {
    pub group: String,
    pub weight: f64,
}

/// Extra screening charge placed in the `orbital` subshells of each listed
/// principal quantum number.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Screening {
    pub n: Vec<u32>,
    pub orbital: char,
    pub charge: f64,
}
