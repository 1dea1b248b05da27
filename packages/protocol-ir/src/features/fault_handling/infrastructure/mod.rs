/*
 * Fault-Handling Infrastructure
 *
 * Analysis stages (guard → closure → dominance → derived edges →
 * validator / handler map) and protocol ingestion.
 */

mod closure;
mod derived_edges;
mod dominance;
mod file_source;
mod guard;
mod handler_map;
mod protocol_parser;
mod validator;

use std::collections::{BTreeMap, BTreeSet};

use crate::features::fault_handling::domain::{ProtocolModel, StateId};
use crate::shared::models::IdSet;

/// Edge relation keyed and ordered by state id
pub type Relation = BTreeMap<StateId, BTreeSet<StateId>>;

pub use closure::{compute_closure, ClosureOutcome};
pub use derived_edges::build_derived_edges;
pub use dominance::{select_dominators, Dominators};
pub use file_source::ProtocolFile;
pub use guard::{judge, screen_fault_handlers, GuardOutcome, GuardVerdict};
pub use handler_map::build_handler_map;
pub use protocol_parser::{
    FaultHandlerConfig, ProtocolBuilder, ProtocolConfig, ProtocolFormat, ProtocolParser,
    StateConfig, TransitionConfig,
};
pub use validator::{
    check_co_transitivity, check_coverage, check_determinism, check_transitivity,
    TransitivityDefect,
};

/// Capability / requirement lookup by state id
///
/// Unknown ids resolve to the empty set.
pub(crate) struct StateSets<'a> {
    model: &'a ProtocolModel,
    empty: IdSet,
}

impl<'a> StateSets<'a> {
    pub(crate) fn new(model: &'a ProtocolModel) -> Self {
        Self {
            model,
            empty: IdSet::new(),
        }
    }

    pub(crate) fn reqs(&self, id: &str) -> &IdSet {
        self.model
            .state(id)
            .map_or(&self.empty, |s| &s.requirements)
    }

    pub(crate) fn caps(&self, id: &str) -> &IdSet {
        self.model
            .state(id)
            .map_or(&self.empty, |s| &s.capabilities)
    }
}
