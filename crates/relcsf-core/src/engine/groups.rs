use super::blocks::push_in_blocks;
use super::config::GROUP_NAME_LEN;
use super::error::EngineError;
use crate::core::models::config::Config;
use crate::core::models::ids::GroupId;

/// A named, ordered set of configurations sharing one electron count.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigGroup {
    name: String,
    n_electrons: Option<u32>,
    configs: Vec<Config>,
}

impl ConfigGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            n_electrons: None,
            configs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Electron count fixed by the first configuration, `None` while empty.
    pub fn n_electrons(&self) -> Option<u32> {
        self.n_electrons
    }

    pub fn configs(&self) -> &[Config] {
        &self.configs
    }

    pub fn config(&self, index: usize) -> Option<&Config> {
        self.configs.get(index)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn n_csfs(&self) -> usize {
        self.configs.iter().map(Config::n_csfs).sum()
    }
}

/// Bounded table of configuration groups in creation order.
#[derive(Debug, Clone)]
pub struct GroupTable {
    groups: Vec<ConfigGroup>,
    capacity: usize,
    configs_block: usize,
}

impl GroupTable {
    pub fn new(capacity: usize, configs_block: usize) -> Self {
        Self {
            groups: Vec::new(),
            capacity,
            configs_block,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn index_of(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .map(GroupId::new)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn add_group(&mut self, name: &str) -> Result<GroupId, EngineError> {
        validate_name(name)?;
        if self.exists(name) {
            return Err(EngineError::GroupExists(name.to_string()));
        }
        if self.groups.len() >= self.capacity {
            return Err(EngineError::GroupTableFull {
                capacity: self.capacity,
            });
        }
        self.groups.push(ConfigGroup::new(name));
        Ok(GroupId::new(self.groups.len() - 1))
    }

    /// Checks that `config` may join group `id` without modifying anything.
    pub fn check_config(&self, id: GroupId, config: &Config) -> Result<(), EngineError> {
        let group = self.group(id).ok_or(EngineError::InvalidGroup(id))?;
        match group.n_electrons {
            Some(expected) if expected != config.n_electrons() => {
                Err(EngineError::ElectronCountMismatch {
                    group: group.name.clone(),
                    expected,
                    found: config.n_electrons(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Appends `config` to group `id` and returns its position in the group.
    pub fn add_config(&mut self, id: GroupId, config: Config) -> Result<usize, EngineError> {
        self.check_config(id, &config)?;
        let block = self.configs_block;
        let group = self
            .groups
            .get_mut(id.index())
            .ok_or(EngineError::InvalidGroup(id))?;
        group.n_electrons.get_or_insert(config.n_electrons());
        push_in_blocks(&mut group.configs, config, block);
        Ok(group.configs.len() - 1)
    }

    pub fn group(&self, id: GroupId) -> Option<&ConfigGroup> {
        self.groups.get(id.index())
    }

    /// The most recently created group.
    pub fn latest(&self) -> Option<GroupId> {
        self.groups.len().checked_sub(1).map(GroupId::new)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &ConfigGroup)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (GroupId::new(i), g))
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

fn validate_name(name: &str) -> Result<(), EngineError> {
    let reason = if name.trim().is_empty() {
        "name must not be blank"
    } else if name.chars().count() > GROUP_NAME_LEN {
        "name is longer than 32 characters"
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidGroupName {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_config;

    fn table() -> GroupTable {
        GroupTable::new(3, 2)
    }

    #[test]
    fn groups_are_numbered_in_creation_order() {
        let mut groups = table();
        assert_eq!(groups.latest(), None);
        let a = groups.add_group("ground").unwrap();
        let b = groups.add_group("excited").unwrap();
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(groups.index_of("excited"), Some(b));
        assert_eq!(groups.latest(), Some(b));
        assert!(groups.exists("ground"));
        assert!(!groups.exists("missing"));
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut groups = table();
        groups.add_group("g").unwrap();
        assert!(matches!(
            groups.add_group("g"),
            Err(EngineError::GroupExists(name)) if name == "g"
        ));
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn table_capacity_is_enforced() {
        let mut groups = table();
        for name in ["a", "b", "c"] {
            groups.add_group(name).unwrap();
        }
        assert!(matches!(
            groups.add_group("d"),
            Err(EngineError::GroupTableFull { capacity: 3 })
        ));
    }

    #[test]
    fn blank_and_overlong_names_are_rejected() {
        let mut groups = table();
        assert!(matches!(
            groups.add_group("  "),
            Err(EngineError::InvalidGroupName { .. })
        ));
        let long = "x".repeat(GROUP_NAME_LEN + 1);
        assert!(matches!(
            groups.add_group(&long),
            Err(EngineError::InvalidGroupName { .. })
        ));
        assert!(groups.add_group(&"x".repeat(GROUP_NAME_LEN)).is_ok());
    }

    #[test]
    fn first_config_fixes_the_electron_count() {
        let mut groups = table();
        let id = groups.add_group("g").unwrap();
        assert_eq!(groups.group(id).unwrap().n_electrons(), None);
        let first = groups.add_config(id, parse_config("1s2 2s1").unwrap()).unwrap();
        let second = groups.add_config(id, parse_config("1s2 2p-1").unwrap()).unwrap();
        assert_eq!((first, second), (0, 1));
        assert_eq!(groups.group(id).unwrap().n_electrons(), Some(3));
    }

    #[test]
    fn electron_count_mismatch_leaves_the_group_untouched() {
        let mut groups = table();
        let id = groups.add_group("g").unwrap();
        groups.add_config(id, parse_config("1s2").unwrap()).unwrap();
        let before = groups.group(id).unwrap().clone();

        let result = groups.add_config(id, parse_config("1s2 2s1").unwrap());
        assert!(matches!(
            result,
            Err(EngineError::ElectronCountMismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
        assert_eq!(groups.group(id).unwrap(), &before);
    }

    #[test]
    fn unknown_group_ids_are_rejected() {
        let mut groups = table();
        let result = groups.add_config(GroupId::new(7), parse_config("1s1").unwrap());
        assert!(matches!(result, Err(EngineError::InvalidGroup(_))));
    }

    #[test]
    fn clear_removes_every_group() {
        let mut groups = table();
        groups.add_group("a").unwrap();
        groups.clear();
        assert!(groups.is_empty());
        assert!(groups.add_group("a").is_ok());
    }
}
