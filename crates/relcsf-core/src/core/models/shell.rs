use crate::core::quantum::{
    QuantumError, SubshellId, check_principal, jl_from_kappa, kappa_from_jl, split_kappa,
    write_subshell_label,
};
use std::cmp::Ordering;
use std::fmt;

/// A relativistic subshell `(n, κ)` holding `nq` electrons.
///
/// Construction validates `κ ≠ 0`, `l < n ≤ MAX_PRINCIPAL`, `l` within the
/// symbol table and `0 ≤ nq ≤ 2j + 1`, so every accessor below is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subshell {
    n: u32,
    kappa: i32,
    nq: u32,
}

impl Subshell {
    pub fn new(n: u32, kappa: i32, nq: u32) -> Result<Self, QuantumError> {
        let (j2, l) = jl_from_kappa(kappa)?;
        check_principal(n, l)?;
        if nq > j2 + 1 {
            return Err(QuantumError::OccupationOutOfRange {
                nq,
                capacity: j2 + 1,
            });
        }
        Ok(Self { n, kappa, nq })
    }

    /// Builds a subshell from `(n, l, 2j, nq)`.
    pub fn pack(n: u32, l: u32, j2: u32, nq: u32) -> Result<Self, QuantumError> {
        let kappa = kappa_from_jl(j2, l)?;
        Self::new(n, kappa, nq)
    }

    /// Inverse of [`Subshell::pack`]: returns `(n, l, 2j, nq)`.
    pub fn unpack(&self) -> (u32, u32, u32, u32) {
        (self.n, self.l(), self.j2(), self.nq)
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn kappa(&self) -> i32 {
        self.kappa
    }

    pub fn nq(&self) -> u32 {
        self.nq
    }

    pub fn j2(&self) -> u32 {
        split_kappa(self.kappa).0
    }

    pub fn l(&self) -> u32 {
        split_kappa(self.kappa).1
    }

    /// Number of available m-projections, `2j + 1`.
    pub fn capacity(&self) -> u32 {
        self.j2() + 1
    }

    pub fn is_closed(&self) -> bool {
        self.nq == 0 || self.nq == self.capacity()
    }

    pub fn id(&self) -> SubshellId {
        SubshellId::encode(self.n, self.kappa)
    }

    pub fn with_occupation(&self, nq: u32) -> Result<Self, QuantumError> {
        Self::new(self.n, self.kappa, nq)
    }
}

impl Ord for Subshell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.n
            .cmp(&other.n)
            .then_with(|| self.l().cmp(&other.l()))
            .then_with(|| self.j2().cmp(&other.j2()))
            .then_with(|| self.nq.cmp(&other.nq))
    }
}

impl PartialOrd for Subshell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Subshell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subshell_label(f, self.n, self.kappa)?;
        write!(f, "{}", self.nq)
    }
}

/// The coupling state of one subshell inside a CSF.
///
/// `shell_j` is the subshell's own resultant, `total_j` the resultant after
/// coupling to every shell further in. All momenta are doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShellState {
    shell_j: u32,
    total_j: u32,
    seniority: u32,
    nr: u32,
}

impl ShellState {
    pub fn new(shell_j: u32, total_j: u32, seniority: u32, nr: u32) -> Self {
        Self {
            shell_j,
            total_j,
            seniority,
            nr,
        }
    }

    pub fn shell_j(&self) -> u32 {
        self.shell_j
    }

    pub fn total_j(&self) -> u32 {
        self.total_j
    }

    pub fn seniority(&self) -> u32 {
        self.seniority
    }

    /// Extra label separating states that share `(seniority, shell_j)`.
    pub fn nr(&self) -> u32 {
        self.nr
    }

    pub(crate) fn with_total_j(self, total_j: u32) -> Self {
        Self { total_j, ..self }
    }
}
