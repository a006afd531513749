use phf::{Map, phf_map};
use std::fmt;
use thiserror::Error;

/// Number of classic spectroscopic symbols, `s` through `r` (l = 0..=13).
pub const MAX_SPEC_SYMBOLS: usize = 14;

/// Number of symbols once the classic table is continued with the unused
/// letters after `r` (`t` through `z`).
pub const MAX_EXTENDED_SYMBOLS: usize = 21;

/// Largest principal quantum number whose subshells still pack into a
/// [`SubshellId`].
pub const MAX_PRINCIPAL: u32 = 1 << 16;

static CLASSIC_SYMBOLS: Map<char, u32> = phf_map! {
    's' => 0, 'p' => 1, 'd' => 2, 'f' => 3, 'g' => 4, 'h' => 5, 'i' => 6,
    'k' => 7, 'l' => 8, 'm' => 9, 'n' => 10, 'o' => 11, 'q' => 12, 'r' => 13,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantumError {
    #[error("Unrecognized spectroscopic symbol '{0}'")]
    InvalidSymbol(char),

    #[error("Orbital angular momentum l = {0} exceeds the spectroscopic symbol table")]
    SymbolTableExceeded(u32),

    #[error("The relativistic quantum number kappa cannot be zero")]
    ZeroKappa,

    #[error("No relativistic subshell has 2j = {j2} and l = {l}")]
    InvalidJl { j2: u32, l: u32 },

    #[error("Principal quantum number n = {n} cannot host l = {l}")]
    InvalidPrincipal { n: u32, l: u32 },

    #[error("Principal quantum number n = {} exceeds the maximum of {}", .0, MAX_PRINCIPAL)]
    PrincipalOutOfRange(u32),

    #[error("Occupation {nq} exceeds the subshell capacity {capacity}")]
    OccupationOutOfRange { nq: u32, capacity: u32 },
}

/// Parity of a configuration or symmetry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Parity of a total orbital angular momentum sum `Σ l·nq`.
    pub fn from_l_sum(sum: u32) -> Self {
        if sum % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    pub fn from_bit(bit: usize) -> Self {
        if bit % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    pub fn bit(self) -> usize {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }

    /// Parity after adding one electron with orbital angular momentum `l`.
    pub fn with_electron(self, l: u32) -> Self {
        Parity::from_bit(self.bit() + l as usize)
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => write!(f, "+"),
            Parity::Odd => write!(f, "-"),
        }
    }
}

/// The full symbol sequence: `s p d`, then the alphabet from `f` skipping
/// `j` and the letters already taken.
fn symbol_sequence() -> impl Iterator<Item = char> {
    ['s', 'p', 'd']
        .into_iter()
        .chain(('f'..='z').filter(|c| !matches!(c, 'j' | 'p' | 's')))
}

pub fn l_from_symbol(symbol: char) -> Result<u32, QuantumError> {
    if let Some(&l) = CLASSIC_SYMBOLS.get(&symbol) {
        return Ok(l);
    }
    symbol_sequence()
        .skip(MAX_SPEC_SYMBOLS)
        .position(|c| c == symbol)
        .map(|i| (i + MAX_SPEC_SYMBOLS) as u32)
        .ok_or(QuantumError::InvalidSymbol(symbol))
}

pub fn symbol_from_l(l: u32) -> Result<char, QuantumError> {
    symbol_sequence()
        .nth(l as usize)
        .ok_or(QuantumError::SymbolTableExceeded(l))
}

/// Splits a non-zero kappa into `(2j, l)`.
pub(crate) fn split_kappa(kappa: i32) -> (u32, u32) {
    let k = kappa.unsigned_abs();
    if kappa < 0 { (2 * k - 1, k - 1) } else { (2 * k - 1, k) }
}

/// Returns `(2j, l)` for a relativistic quantum number.
///
/// `κ < 0` gives `j = l + 1/2` with `l = -κ - 1`; `κ > 0` gives `j = l - 1/2`
/// with `l = κ`. Only `l` values with a spectroscopic symbol are accepted.
pub fn jl_from_kappa(kappa: i32) -> Result<(u32, u32), QuantumError> {
    if kappa == 0 {
        return Err(QuantumError::ZeroKappa);
    }
    let k = kappa.unsigned_abs();
    let l = if kappa < 0 { k - 1 } else { k };
    if l as usize >= MAX_EXTENDED_SYMBOLS {
        return Err(QuantumError::SymbolTableExceeded(l));
    }
    Ok(split_kappa(kappa))
}

/// Checks `1 ≤ n ≤ MAX_PRINCIPAL` and `l < n`.
pub(crate) fn check_principal(n: u32, l: u32) -> Result<(), QuantumError> {
    if n > MAX_PRINCIPAL {
        return Err(QuantumError::PrincipalOutOfRange(n));
    }
    if n == 0 || l >= n {
        return Err(QuantumError::InvalidPrincipal { n, l });
    }
    Ok(())
}

pub fn j2_from_kappa(kappa: i32) -> Result<u32, QuantumError> {
    jl_from_kappa(kappa).map(|(j2, _)| j2)
}

pub fn l_from_kappa(kappa: i32) -> Result<u32, QuantumError> {
    jl_from_kappa(kappa).map(|(_, l)| l)
}

pub fn kappa_from_jl(j2: u32, l: u32) -> Result<i32, QuantumError> {
    if j2 == 2 * l + 1 {
        Ok(-(l as i32) - 1)
    } else if l > 0 && j2 == 2 * l - 1 {
        Ok(l as i32)
    } else {
        Err(QuantumError::InvalidJl { j2, l })
    }
}

/// Renders a doubled angular momentum as `"3/2"` or `"2"`.
pub fn format_j(j2: u32) -> String {
    if j2 % 2 == 0 {
        (j2 / 2).to_string()
    } else {
        format!("{}/2", j2)
    }
}

/// Dense packed identifier of a relativistic subshell `(n, κ)`.
///
/// Within shell `n` the subshells are numbered `2l - 1` for `κ > 0` and `2l`
/// for `κ < 0`, and shell `n` starts at `(n - 1)²`, so every valid pair maps
/// to exactly one non-negative integer and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubshellId(u32);

impl SubshellId {
    pub fn pack(n: u32, kappa: i32) -> Result<Self, QuantumError> {
        let (_, l) = jl_from_kappa(kappa)?;
        check_principal(n, l)?;
        Ok(Self::encode(n, kappa))
    }

    /// Packs a pair already known to be valid.
    pub(crate) fn encode(n: u32, kappa: i32) -> Self {
        let (_, l) = split_kappa(kappa);
        let offset = if kappa < 0 { 2 * l } else { 2 * l - 1 };
        Self((n - 1) * (n - 1) + offset)
    }

    pub fn unpack(self) -> (u32, i32) {
        let n = self.0.isqrt() + 1;
        let offset = self.0 - (n - 1) * (n - 1);
        let l = (offset + 1) / 2;
        let kappa = if offset % 2 == 0 {
            -(l as i32) - 1
        } else {
            l as i32
        };
        (n, kappa)
    }

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn n(self) -> u32 {
        self.unpack().0
    }

    pub fn kappa(self) -> i32 {
        self.unpack().1
    }

    pub fn j2(self) -> u32 {
        split_kappa(self.kappa()).0
    }

    pub fn l(self) -> u32 {
        split_kappa(self.kappa()).1
    }
}

impl fmt::Display for SubshellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, kappa) = self.unpack();
        write_subshell_label(f, n, kappa)
    }
}

/// Writes `2p-`, `2p+` or `1s` style labels; `+` marks `j = l + 1/2`.
///
/// Only ids built with [`SubshellId::from_raw`] can reach the `n[l]` form, as
/// every validated subshell has a symbol.
pub(crate) fn write_subshell_label(
    f: &mut fmt::Formatter<'_>,
    n: u32,
    kappa: i32,
) -> fmt::Result {
    let (_, l) = split_kappa(kappa);
    match symbol_from_l(l) {
        Ok(symbol) => write!(f, "{}{}", n, symbol)?,
        Err(_) => write!(f, "{}[{}]", n, l)?,
    }
    match (l, kappa < 0) {
        (0, _) => Ok(()),
        (_, true) => write!(f, "+"),
        (_, false) => write!(f, "-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_symbols_map_to_consecutive_l_values() {
        for (l, symbol) in "spdfghiklmnoqr".chars().enumerate() {
            assert_eq!(l_from_symbol(symbol), Ok(l as u32));
            assert_eq!(symbol_from_l(l as u32), Ok(symbol));
        }
    }

    #[test]
    fn extended_symbols_continue_after_r() {
        assert_eq!(symbol_from_l(14), Ok('t'));
        assert_eq!(symbol_from_l(20), Ok('z'));
        assert_eq!(l_from_symbol('t'), Ok(14));
        assert_eq!(l_from_symbol('z'), Ok(20));
    }

    #[test]
    fn symbol_lookup_rejects_unknown_letters() {
        assert_eq!(l_from_symbol('j'), Err(QuantumError::InvalidSymbol('j')));
        assert_eq!(l_from_symbol('S'), Err(QuantumError::InvalidSymbol('S')));
        assert_eq!(l_from_symbol('*'), Err(QuantumError::InvalidSymbol('*')));
    }

    #[test]
    fn symbol_lookup_fails_beyond_the_table() {
        assert_eq!(
            symbol_from_l(MAX_EXTENDED_SYMBOLS as u32),
            Err(QuantumError::SymbolTableExceeded(21))
        );
    }

    #[test]
    fn kappa_gives_expected_j_and_l() {
        assert_eq!(jl_from_kappa(-1), Ok((1, 0)));
        assert_eq!(jl_from_kappa(1), Ok((1, 1)));
        assert_eq!(jl_from_kappa(-2), Ok((3, 1)));
        assert_eq!(jl_from_kappa(2), Ok((3, 2)));
        assert_eq!(jl_from_kappa(-3), Ok((5, 2)));
        assert_eq!(jl_from_kappa(0), Err(QuantumError::ZeroKappa));
    }

    #[test]
    fn kappa_round_trips_through_j_and_l() {
        for kappa in (-20..=20).filter(|&k| k != 0) {
            let (j2, l) = jl_from_kappa(kappa).unwrap();
            assert_eq!(kappa_from_jl(j2, l), Ok(kappa));
        }
    }

    #[test]
    fn kappa_from_jl_rejects_inconsistent_pairs() {
        assert_eq!(
            kappa_from_jl(5, 1),
            Err(QuantumError::InvalidJl { j2: 5, l: 1 })
        );
        assert!(kappa_from_jl(0, 0).is_err());
        assert!(kappa_from_jl(2, 1).is_err());
    }

    #[test]
    fn subshell_id_is_dense_and_round_trips() {
        let mut expected = 0;
        for n in 1..=12u32 {
            for l in 0..n {
                let kappas: Vec<i32> = if l == 0 {
                    vec![-1]
                } else {
                    vec![l as i32, -(l as i32) - 1]
                };
                for kappa in kappas {
                    let id = SubshellId::pack(n, kappa).unwrap();
                    assert_eq!(id.raw(), expected);
                    assert_eq!(id.unpack(), (n, kappa));
                    expected += 1;
                }
            }
        }
    }

    #[test]
    fn subshell_id_rejects_l_not_below_n() {
        assert_eq!(
            SubshellId::pack(1, 1),
            Err(QuantumError::InvalidPrincipal { n: 1, l: 1 })
        );
        assert!(SubshellId::pack(0, -1).is_err());
        assert_eq!(SubshellId::pack(2, 0), Err(QuantumError::ZeroKappa));
    }

    #[test]
    fn kappa_beyond_the_symbol_table_is_rejected() {
        assert_eq!(jl_from_kappa(-21), Ok((41, 20)));
        assert_eq!(jl_from_kappa(20), Ok((39, 20)));
        assert_eq!(jl_from_kappa(21), Err(QuantumError::SymbolTableExceeded(21)));
        assert_eq!(jl_from_kappa(-22), Err(QuantumError::SymbolTableExceeded(21)));
        assert_eq!(
            jl_from_kappa(i32::MIN),
            Err(QuantumError::SymbolTableExceeded(i32::MAX as u32))
        );
        assert!(jl_from_kappa(i32::MAX).is_err());
    }

    #[test]
    fn subshell_id_bounds_the_principal_number() {
        let top = SubshellId::pack(MAX_PRINCIPAL, -21).unwrap();
        assert_eq!(top.unpack(), (MAX_PRINCIPAL, -21));
        assert_eq!(
            SubshellId::pack(MAX_PRINCIPAL + 1, -1),
            Err(QuantumError::PrincipalOutOfRange(MAX_PRINCIPAL + 1))
        );
        assert_eq!(
            SubshellId::pack(u32::MAX, -1),
            Err(QuantumError::PrincipalOutOfRange(u32::MAX))
        );
    }

    #[test]
    fn largest_raw_id_still_unpacks() {
        let id = SubshellId::from_raw(u32::MAX);
        assert_eq!(id.unpack(), (MAX_PRINCIPAL, -(MAX_PRINCIPAL as i32)));
    }

    #[test]
    fn subshell_id_display_uses_j_branch_sign() {
        assert_eq!(SubshellId::pack(2, 1).unwrap().to_string(), "2p-");
        assert_eq!(SubshellId::pack(2, -2).unwrap().to_string(), "2p+");
        assert_eq!(SubshellId::pack(3, -1).unwrap().to_string(), "3s");
    }

    #[test]
    fn format_j_renders_half_integers_as_fractions() {
        assert_eq!(format_j(0), "0");
        assert_eq!(format_j(3), "3/2");
        assert_eq!(format_j(4), "2");
    }

    #[test]
    fn parity_follows_l_sum_and_flips_with_odd_l() {
        assert_eq!(Parity::from_l_sum(4), Parity::Even);
        assert_eq!(Parity::from_l_sum(3), Parity::Odd);
        assert_eq!(Parity::Even.with_electron(1), Parity::Odd);
        assert_eq!(Parity::Odd.with_electron(2), Parity::Odd);
        assert_eq!(Parity::Odd.with_electron(3), Parity::Even);
    }
}
