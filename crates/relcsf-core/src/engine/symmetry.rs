use super::blocks::push_in_blocks;
use super::error::EngineError;
use crate::core::models::config::Config;
use crate::core::models::ids::{GroupId, StateRef, SymmetryIndex};
use crate::core::models::state::BasisState;
use crate::core::quantum::{Parity, format_j};
use std::fmt;

/// Dense index of the `(parity, 2J)` class: `2·(2J) + parity`.
pub fn encode_pj(parity: Parity, j2: u32) -> usize {
    2 * j2 as usize + parity.bit()
}

pub fn decode_pj(index: usize) -> (Parity, u32) {
    (Parity::from_bit(index % 2), (index / 2) as u32)
}

/// All basis states sharing one parity and total `J`, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Symmetry {
    parity: Parity,
    j2: u32,
    states: Vec<BasisState>,
}

impl Symmetry {
    fn new(index: usize) -> Self {
        let (parity, j2) = decode_pj(index);
        Self {
            parity,
            j2,
            states: Vec::new(),
        }
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Doubled total angular momentum of the class.
    pub fn j2(&self) -> u32 {
        self.j2
    }

    pub fn index(&self) -> SymmetryIndex {
        SymmetryIndex::new(encode_pj(self.parity, self.j2))
    }

    pub fn states(&self) -> &[BasisState] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&BasisState> {
        self.states.get(index)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J = {}{}", format_j(self.j2), self.parity)
    }
}

/// Bounded table of symmetry classes, created on first use.
#[derive(Debug, Clone)]
pub struct SymmetryTable {
    classes: Vec<Symmetry>,
    capacity: usize,
    states_block: usize,
}

impl SymmetryTable {
    pub fn new(capacity: usize, states_block: usize) -> Self {
        Self {
            classes: Vec::new(),
            capacity,
            states_block,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the `(parity, 2J)` class, checked against the capacity.
    pub fn index_for(&self, parity: Parity, j2: u32) -> Result<SymmetryIndex, EngineError> {
        let index = encode_pj(parity, j2);
        if index >= self.capacity {
            return Err(EngineError::SymmetryOutOfRange {
                index,
                j2,
                capacity: self.capacity,
            });
        }
        Ok(SymmetryIndex::new(index))
    }

    /// Appends `state` to the `(parity, 2J)` class.
    pub fn add_state(
        &mut self,
        state: BasisState,
        parity: Parity,
        j2: u32,
    ) -> Result<StateRef, EngineError> {
        let index = self.index_for(parity, j2)?;
        Ok(self.push(index, state))
    }

    /// Checks that every CSF of `config` falls inside the table.
    pub fn check_config(&self, config: &Config) -> Result<(), EngineError> {
        let parity = config.parity();
        for i in 0..config.n_csfs() {
            if let Some(j2) = config.total_j(i) {
                self.index_for(parity, j2)?;
            }
        }
        Ok(())
    }

    /// Registers one native state per CSF of `config`, stored at position
    /// `config_index` of `group`. Nothing is inserted if any CSF falls
    /// outside the table.
    pub fn add_config(
        &mut self,
        group: GroupId,
        config_index: usize,
        config: &Config,
    ) -> Result<Vec<StateRef>, EngineError> {
        self.check_config(config)?;
        let parity = config.parity();
        let mut refs = Vec::with_capacity(config.n_csfs());
        for (csf, states) in config.csfs().enumerate() {
            let Some(outer) = states.first() else {
                continue;
            };
            let index = self.index_for(parity, outer.total_j())?;
            refs.push(self.push(
                index,
                BasisState::native(group, config_index, csf),
            ));
        }
        Ok(refs)
    }

    fn push(&mut self, index: SymmetryIndex, state: BasisState) -> StateRef {
        let i = index.index();
        if self.classes.len() <= i {
            let start = self.classes.len();
            self.classes.extend((start..=i).map(Symmetry::new));
        }
        let class = &mut self.classes[i];
        push_in_blocks(&mut class.states, state, self.states_block);
        StateRef::new(index, class.states.len() - 1)
    }

    pub fn symmetry(&self, index: SymmetryIndex) -> Option<&Symmetry> {
        self.classes.get(index.index())
    }

    pub fn state(&self, state: StateRef) -> Option<&BasisState> {
        self.symmetry(state.symmetry)?.state(state.index)
    }

    pub fn n_states(&self, index: SymmetryIndex) -> usize {
        self.symmetry(index).map_or(0, Symmetry::len)
    }

    pub fn total_states(&self) -> usize {
        self.classes.iter().map(Symmetry::len).sum()
    }

    /// Populated classes in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Symmetry> {
        self.classes.iter().filter(|c| !c.is_empty())
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }
}
