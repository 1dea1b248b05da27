/*
 * Derived Fault-Handling Structures
 *
 * Read-only outputs of the analysis:
 * - DerivedEdges: closed, requirement-reducing recovery relation
 * - HandlerMap:   state → (lost requirement → recovery state)
 */

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::protocol::StateId;
use crate::shared::models::Ident;

/// Derived recovery edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DerivedEdge {
    pub source: StateId,
    pub target: StateId,
}

/// Derived edge relation: source → successors (both in identifier order)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedEdges {
    successors: BTreeMap<StateId, BTreeSet<StateId>>,
}

impl DerivedEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state with no successors yet
    pub fn add_state(&mut self, state: impl Into<StateId>) {
        self.successors.entry(state.into()).or_default();
    }

    pub fn insert(&mut self, source: impl Into<StateId>, target: impl Into<StateId>) {
        self.successors
            .entry(source.into())
            .or_default()
            .insert(target.into());
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.successors
            .get(source)
            .map_or(false, |succ| succ.contains(target))
    }

    /// Successors of `source` (empty for unknown states)
    pub fn successors<'a>(&'a self, source: &str) -> impl Iterator<Item = &'a StateId> + 'a {
        self.successors.get(source).into_iter().flatten()
    }

    /// States in identifier order
    pub fn sources(&self) -> impl Iterator<Item = &StateId> {
        self.successors.keys()
    }

    /// All edges in (source, target) identifier order
    pub fn edges(&self) -> impl Iterator<Item = DerivedEdge> + '_ {
        self.successors.iter().flat_map(|(s, succ)| {
            succ.iter().map(move |t| DerivedEdge {
                source: s.clone(),
                target: t.clone(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.successors.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Requirement → handler map
///
/// `get(s, r)` answers "if requirement r is lost while in state s, which
/// state do we recover to?". Absent entries mean no known recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerMap {
    handlers: BTreeMap<StateId, BTreeMap<Ident, StateId>>,
}

impl HandlerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &str, requirement: &str) -> Option<&StateId> {
        self.handlers.get(state).and_then(|row| row.get(requirement))
    }

    /// Handler row of one state
    pub fn row(&self, state: &str) -> Option<&BTreeMap<Ident, StateId>> {
        self.handlers.get(state)
    }

    pub(crate) fn row_mut(&mut self, state: &str) -> &mut BTreeMap<Ident, StateId> {
        self.handlers.entry(state.to_string()).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateId, &BTreeMap<Ident, StateId>)> {
        self.handlers.iter()
    }

    /// Number of (state, requirement) entries
    pub fn len(&self) -> usize {
        self.handlers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
