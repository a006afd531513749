use super::config::SessionConfig;
use super::error::EngineError;
use super::groups::{ConfigGroup, GroupTable};
use super::symmetry::{SymmetryTable, decode_pj};
use crate::core::coupling::couple::{couple, triangle};
use crate::core::models::config::Config;
use crate::core::models::ids::{GroupId, StateRef};
use crate::core::models::state::BasisState;
use crate::core::quantum::{Parity, SubshellId};
use std::ops::Range;
use tracing::debug;

/// Owns the group and symmetry tables of one basis-generation run.
///
/// Every mutating operation validates its input completely before touching
/// either table, so a rejected call leaves the session as it was.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    groups: GroupTable,
    symmetries: SymmetryTable,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            groups: GroupTable::new(config.max_groups, config.configs_block),
            symmetries: SymmetryTable::new(config.max_symmetries, config.states_block),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    pub fn symmetries(&self) -> &SymmetryTable {
        &self.symmetries
    }

    pub fn add_group(&mut self, name: &str) -> Result<GroupId, EngineError> {
        let id = self.groups.add_group(name)?;
        debug!(group = name, id = id.index(), "Created configuration group.");
        Ok(id)
    }

    pub fn group_index(&self, name: &str) -> Option<GroupId> {
        self.groups.index_of(name)
    }

    pub fn group(&self, id: GroupId) -> Option<&ConfigGroup> {
        self.groups.group(id)
    }

    /// Couples `config` if needed, appends it to `group` and registers one
    /// native state per CSF.
    ///
    /// # Return
    ///
    /// The position of the configuration inside the group.
    pub fn add_config(&mut self, group: GroupId, config: Config) -> Result<usize, EngineError> {
        let range = self.add_configs(group, vec![config])?;
        Ok(range.start)
    }

    /// Adds several configurations to `group` as one unit: either all of them
    /// are stored and classified, or none is.
    pub fn add_configs(
        &mut self,
        group: GroupId,
        configs: Vec<Config>,
    ) -> Result<Range<usize>, EngineError> {
        let mut prepared = Vec::with_capacity(configs.len());
        let mut n_electrons = self.groups.group(group).and_then(ConfigGroup::n_electrons);
        for mut config in configs {
            if !config.is_coupled() {
                couple(&mut config)?;
            }
            self.groups.check_config(group, &config)?;
            self.symmetries.check_config(&config)?;
            // Later members must also agree with the first one of this batch.
            match n_electrons {
                Some(expected) if expected != config.n_electrons() => {
                    return Err(EngineError::ElectronCountMismatch {
                        group: self
                            .groups
                            .group(group)
                            .map(|g| g.name().to_string())
                            .unwrap_or_default(),
                        expected,
                        found: config.n_electrons(),
                    });
                }
                _ => n_electrons = Some(config.n_electrons()),
            }
            prepared.push(config);
        }

        let start = self.groups.group(group).map_or(0, ConfigGroup::len);
        for config in prepared {
            let n_shells = config.n_shells();
            let index = self.groups.add_config(group, config)?;
            let stored = self
                .groups
                .group(group)
                .and_then(|g| g.config(index))
                .ok_or(EngineError::InvalidGroup(group))?;
            let refs = self.symmetries.add_config(group, index, stored)?;
            debug!(
                group = group.index(),
                config = index,
                shells = n_shells,
                csfs = refs.len(),
                "Registered coupled configuration."
            );
        }
        let end = self.groups.group(group).map_or(start, ConfigGroup::len);
        Ok(start..end)
    }

    /// The configuration a native state was generated from; `None` for
    /// spectator states and dangling references.
    pub fn config_of(&self, state: &BasisState) -> Option<&Config> {
        let (group, config, _) = state.as_native()?;
        self.groups.group(group)?.config(config)
    }

    pub fn state(&self, state: StateRef) -> Option<&BasisState> {
        self.symmetries.state(state)
    }

    /// Follows spectator parents back to the native CSF a state descends
    /// from, returning `(group, config, csf)`.
    pub fn native_origin(&self, state: StateRef) -> Option<(GroupId, usize, usize)> {
        let mut current = *self.state(state)?;
        loop {
            match current {
                BasisState::Native { group, config, csf } => return Some((group, config, csf)),
                BasisState::Spectator { parent, .. } => current = *self.state(parent)?,
            }
        }
    }

    /// Couples one electron in `orbital` to the existing state `parent`,
    /// giving doubled total angular momentum `j2`.
    pub fn add_spectator_state(
        &mut self,
        parent: StateRef,
        orbital: SubshellId,
        j2: u32,
    ) -> Result<StateRef, EngineError> {
        let (parity, parent_j2) = self.parent_symmetry(parent)?;
        let orbital_j2 = orbital.j2();
        if !triangle(parent_j2, orbital_j2).any(|j| j == j2) {
            return Err(EngineError::SpectatorCoupling {
                parent_j2,
                orbital_j2,
                j2,
            });
        }
        self.symmetries.add_state(
            BasisState::spectator(parent, orbital, j2),
            parity.with_electron(orbital.l()),
            j2,
        )
    }

    /// Registers a spectator state for every `J` allowed by coupling
    /// `orbital` to `parent`, in ascending `J`.
    pub fn add_spectator_states(
        &mut self,
        parent: StateRef,
        orbital: SubshellId,
    ) -> Result<Vec<StateRef>, EngineError> {
        let (parity, parent_j2) = self.parent_symmetry(parent)?;
        let parity = parity.with_electron(orbital.l());
        let allowed: Vec<u32> = triangle(parent_j2, orbital.j2()).collect();
        for &j2 in &allowed {
            self.symmetries.index_for(parity, j2)?;
        }
        allowed
            .into_iter()
            .map(|j2| {
                self.symmetries
                    .add_state(BasisState::spectator(parent, orbital, j2), parity, j2)
            })
            .collect()
    }

    fn parent_symmetry(&self, parent: StateRef) -> Result<(Parity, u32), EngineError> {
        if self.state(parent).is_none() {
            return Err(EngineError::StateNotFound(parent));
        }
        Ok(decode_pj(parent.symmetry.index()))
    }

    /// Drops every group and symmetry class, keeping the configuration.
    pub fn reset(&mut self) {
        self.groups.clear();
        self.symmetries.clear();
        debug!("Session reset.");
    }
}
