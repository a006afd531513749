use super::CouplingError;
use super::seniority::single_shell_states;
use crate::core::models::config::Config;
use crate::core::models::shell::{ShellState, Subshell};
use std::collections::HashSet;
use std::iter::StepBy;
use std::ops::RangeInclusive;

/// Doubled resultants allowed by the triangle rule for `ja ⊗ jb`.
pub fn triangle(ja: u32, jb: u32) -> StepBy<RangeInclusive<u32>> {
    (ja.abs_diff(jb)..=ja + jb).step_by(2)
}

/// Couples a one-shell configuration by direct enumeration of its states.
///
/// # Return
///
/// The number of CSFs attached to `cfg`.
pub fn single_shell(cfg: &mut Config) -> Result<usize, CouplingError> {
    let shell = match cfg.shells() {
        [shell] => *shell,
        [] => return Err(CouplingError::EmptyShellList),
        shells => return Err(CouplingError::NotSingleShell(shells.len())),
    };
    let states = single_shell_states(shell.j2(), shell.nq())?;
    let count = states.len();
    cfg.set_csfs(states);
    Ok(count)
}

/// Enumerates every CSF of `cfg` and attaches them to it.
///
/// The innermost shell is enumerated on its own; every further shell is then
/// added with [`couple_outermost`], so the cumulative `total_j` grows outward
/// exactly as the shells are stored.
///
/// # Return
///
/// The number of CSFs attached to `cfg`.
///
/// # Errors
///
/// Fails for an empty shell list, a repeated subshell, or a shell whose
/// enumeration yields nothing. `cfg` is left unchanged on error.
pub fn couple(cfg: &mut Config) -> Result<usize, CouplingError> {
    let shells = cfg.shells().to_vec();
    check_distinct(&shells)?;

    let Some((innermost, rest)) = shells.split_last() else {
        return Err(CouplingError::EmptyShellList);
    };
    if rest.is_empty() {
        return single_shell(cfg);
    }

    let mut block = single_block(*innermost)?;
    for shell in rest.iter().rev() {
        block = couple_outermost(&single_block(*shell)?, &block)?;
    }

    let count = block.n_csfs();
    if count == 0 {
        return Err(CouplingError::NoStates);
    }
    cfg.set_csfs(block.into_csfs());
    Ok(count)
}

/// Couples the single shell of `outer` onto the already coupled `inner` block.
///
/// The inner CSFs are reused as they are. The resulting configuration lists
/// the outer shell first, followed by the inner shells. CSFs are produced for
/// each outer state in turn, then for each inner CSF, then for each allowed
/// total `J` in ascending order.
pub fn couple_outermost(outer: &Config, inner: &Config) -> Result<Config, CouplingError> {
    let shell = match outer.shells() {
        [shell] => *shell,
        [] => return Err(CouplingError::EmptyShellList),
        shells => return Err(CouplingError::NotSingleShell(shells.len())),
    };
    if !inner.is_coupled() {
        return Err(CouplingError::InnerNotCoupled);
    }
    if inner
        .shells()
        .iter()
        .any(|s| s.n() == shell.n() && s.kappa() == shell.kappa())
    {
        return Err(CouplingError::DuplicateSubshell(shell.id().to_string()));
    }

    let outer_states: Vec<ShellState> = if outer.is_coupled() {
        outer.csfs().filter_map(|csf| csf.first().copied()).collect()
    } else {
        single_shell_states(shell.j2(), shell.nq())?
    };

    let width = inner.n_shells() + 1;
    let mut csfs = Vec::with_capacity(outer_states.len() * inner.n_csfs() * width);

    for outer_state in &outer_states {
        let jo = outer_state.shell_j();
        for inner_csf in inner.csfs() {
            let Some(parent) = inner_csf.first() else {
                continue;
            };
            if jo == 0 {
                csfs.push(outer_state.with_total_j(parent.total_j()));
                csfs.extend_from_slice(inner_csf);
                continue;
            }
            for total_j in triangle(parent.total_j(), jo) {
                csfs.push(outer_state.with_total_j(total_j));
                csfs.extend_from_slice(inner_csf);
            }
        }
    }

    if csfs.is_empty() {
        return Err(CouplingError::NoStates);
    }

    let mut shells = Vec::with_capacity(width);
    shells.push(shell);
    shells.extend_from_slice(inner.shells());
    Ok(Config::from_parts(shells, csfs))
}

fn single_block(shell: Subshell) -> Result<Config, CouplingError> {
    let states = single_shell_states(shell.j2(), shell.nq())?;
    Ok(Config::from_parts(vec![shell], states))
}

fn check_distinct(shells: &[Subshell]) -> Result<(), CouplingError> {
    let mut seen = HashSet::with_capacity(shells.len());
    for shell in shells {
        if !seen.insert(shell.id()) {
            return Err(CouplingError::DuplicateSubshell(shell.id().to_string()));
        }
    }
    Ok(())
}
