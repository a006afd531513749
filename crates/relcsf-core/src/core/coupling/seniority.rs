use super::CouplingError;
use crate::core::models::shell::ShellState;
use std::collections::BTreeMap;

/// Counts the ways `q` electrons can occupy the `2j + 1` projections of a
/// subshell, keyed by doubled total projection `M`.
fn projection_counts(j2: u32, q: u32) -> BTreeMap<i32, u64> {
    let q = q as usize;
    let mut table: Vec<BTreeMap<i32, u64>> = vec![BTreeMap::new(); q + 1];
    table[0].insert(0, 1);

    for m in (0..=j2).map(|i| 2 * i as i32 - j2 as i32) {
        // Descending k so each projection is used at most once.
        for k in (0..q).rev() {
            let shifted: Vec<(i32, u64)> = table[k].iter().map(|(&s, &c)| (s + m, c)).collect();
            for (sum, count) in shifted {
                *table[k + 1].entry(sum).or_insert(0) += count;
            }
        }
    }

    table.pop().unwrap_or_default()
}

/// Number of states of each doubled `J` for `q` electrons, obtained as
/// `c(M = J) - c(M = J + 2)`.
pub fn j_multiplicities(j2: u32, q: u32) -> BTreeMap<u32, u64> {
    let counts = projection_counts(j2, q);
    counts
        .range(0..)
        .filter_map(|(&m, &count)| {
            let above = counts.get(&(m + 2)).copied().unwrap_or(0);
            (count > above).then(|| (m as u32, count - above))
        })
        .collect()
}

/// Enumerates the states of `nq` equivalent electrons in a subshell with
/// doubled angular momentum `j2`, in the seniority scheme.
///
/// A state of seniority `ν` first appears with `ν` electrons, so the number of
/// seniority-`ν` states at a given `J` is `N(J; ν) - N(J; ν - 2)`. Seniorities
/// run over `ν ≡ nq (mod 2)` up to `min(nq, 2j + 1 - nq)`. States sharing
/// `(ν, J)` are told apart by `nr = 0, 1, …`.
///
/// The result is ordered by seniority, then `J`, then `nr`; each state has
/// `total_j == shell_j`. Empty and full subshells give the single state
/// `J = 0, ν = 0`.
pub fn single_shell_states(j2: u32, nq: u32) -> Result<Vec<ShellState>, CouplingError> {
    if j2 % 2 == 0 {
        return Err(CouplingError::InvalidAngularMomentum(j2));
    }
    let capacity = j2 + 1;
    if nq > capacity {
        return Err(CouplingError::OccupationOutOfRange { nq, capacity });
    }
    if nq == 0 || nq == capacity {
        return Ok(vec![ShellState::new(0, 0, 0, 0)]);
    }

    let max_seniority = nq.min(capacity - nq);
    let mut states = Vec::new();
    let mut previous: BTreeMap<u32, u64> = BTreeMap::new();
    let mut seniority = nq % 2;

    while seniority <= max_seniority {
        let current = j_multiplicities(j2, seniority);
        for (&j, &count) in &current {
            let inherited = previous.get(&j).copied().unwrap_or(0);
            for nr in 0..count.saturating_sub(inherited) {
                states.push(ShellState::new(j, j, seniority, nr as u32));
            }
        }
        previous = current;
        seniority += 2;
    }

    if states.is_empty() {
        return Err(CouplingError::NoStates);
    }
    Ok(states)
}
