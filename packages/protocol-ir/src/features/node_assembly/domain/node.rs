/*
 * Node Summaries
 *
 * Per-component view consumed by topology tooling: operation tables per
 * state, the recovery row of each state, and whether the component can be
 * started in its initial state.
 */

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::features::fault_handling::domain::StateId;
use crate::shared::models::{IdSet, Ident};

/// Operation available in one state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// State reached after the operation
    pub target: StateId,

    /// Guard requirement sets; any one of them enables the operation
    pub requirement_alternatives: Vec<IdSet>,
}

impl Operation {
    pub fn new(target: impl Into<StateId>, requirements: IdSet) -> Self {
        Self {
            target: target.into(),
            requirement_alternatives: vec![requirements],
        }
    }

    /// True if some alternative is satisfied by `available`
    pub fn is_enabled_by(&self, available: &IdSet) -> bool {
        self.requirement_alternatives
            .iter()
            .any(|reqs| available.contains(reqs))
    }
}

/// Summary of one protocol state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    /// Every state except the initial one
    pub is_alive: bool,

    pub capabilities: IdSet,

    pub requirements: IdSet,

    /// "interface:operation" → operation
    pub operations: BTreeMap<String, Operation>,

    /// Lost requirement → recovery state
    pub handlers: BTreeMap<Ident, StateId>,
}

/// Summary of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub type_name: String,

    pub initial_state: StateId,

    pub capabilities: IdSet,

    pub requirements: IdSet,

    /// All operation names of the protocol
    pub operations: BTreeSet<String>,

    pub states: BTreeMap<StateId, StateSummary>,

    /// Initial state when the component has no issues at all
    pub ready_state: Option<StateId>,
}

impl NodeSummary {
    pub fn state(&self, id: &str) -> Option<&StateSummary> {
        self.states.get(id)
    }

    pub fn is_ready(&self) -> bool {
        self.ready_state.is_some()
    }
}
