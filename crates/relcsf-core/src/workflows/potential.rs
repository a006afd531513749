use crate::core::models::average::{AverageConfig, GroupWeight, Screening};
use crate::core::quantum::{check_principal, l_from_symbol};
use crate::engine::error::EngineError;
use crate::engine::session::Session;
use tracing::{info, instrument};

/// Builds the mean configuration of a weighted mixture of groups.
///
/// The weights are normalized to one and each group's weight is shared evenly
/// among its configurations. An optional screening charge is spread evenly
/// over the listed principal quantum numbers and split between the `j`
/// branches of the screening orbital by degeneracy.
#[instrument(skip_all, name = "average_config_workflow")]
pub fn average_config(
    session: &Session,
    mixture: &[GroupWeight],
    screening: Option<&Screening>,
) -> Result<AverageConfig, EngineError> {
    if mixture.is_empty() {
        return Err(EngineError::InvalidMixture("no groups listed"));
    }
    if mixture.iter().any(|m| !m.weight.is_finite() || m.weight < 0.0) {
        return Err(EngineError::InvalidMixture(
            "weights must be finite and non-negative",
        ));
    }
    let total: f64 = mixture.iter().map(|m| m.weight).sum();
    if total <= 0.0 {
        return Err(EngineError::InvalidMixture("weights sum to zero"));
    }

    let mut acfg = AverageConfig::new();
    for entry in mixture {
        let id = session
            .group_index(&entry.group)
            .ok_or_else(|| EngineError::GroupNotFound(entry.group.clone()))?;
        let group = session.group(id).ok_or(EngineError::InvalidGroup(id))?;
        if group.is_empty() {
            return Err(EngineError::EmptyGroup(entry.group.clone()));
        }

        let share = entry.weight / total / group.len() as f64;
        for config in group.configs() {
            for shell in config.shells() {
                acfg.accumulate(shell.n(), shell.kappa(), share * f64::from(shell.nq()));
            }
        }
        acfg.add_contributors(group.len());
    }

    if let Some(screening) = screening {
        apply_screening(&mut acfg, screening)?;
    }
    acfg.finish();

    info!(
        "Average configuration from {} configuration(s): {:.4} electron(s) in {} subshell(s).",
        acfg.n_cfgs(),
        acfg.n_electrons(),
        acfg.shells().len()
    );
    Ok(acfg)
}

fn apply_screening(acfg: &mut AverageConfig, screening: &Screening) -> Result<(), EngineError> {
    if screening.n.is_empty() {
        return Err(EngineError::InvalidMixture(
            "screening lists no principal quantum numbers",
        ));
    }
    if !screening.charge.is_finite() || screening.charge < 0.0 {
        return Err(EngineError::InvalidMixture(
            "screening charge must be finite and non-negative",
        ));
    }
    let l = l_from_symbol(screening.orbital)?;
    for &n in &screening.n {
        check_principal(n, l)?;
    }

    let per_shell = screening.charge / screening.n.len() as f64;
    for &n in &screening.n {
        acfg.accumulate_nl(n, l, per_shell);
    }
    Ok(())
}
