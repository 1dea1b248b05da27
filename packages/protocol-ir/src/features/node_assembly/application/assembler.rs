/*
 * Node Assembler
 *
 * Turns a protocol and its fault-handling report into a NodeSummary:
 *
 * 1. Per state: resolve names, build the operation table from outgoing
 *    transitions, attach the HandlerMap row
 * 2. Same operation name and target → merge guard requirements as
 *    alternatives; different target → Determinism issue, first target kept
 * 3. ready_state = initial state iff the report is clean and no node
 *    issue was found
 *
 * # Time Complexity
 * O(states + transitions + handler map entries)
 */

use std::collections::{BTreeMap, BTreeSet};

use crate::features::fault_handling::application::FaultHandlingReport;
use crate::features::fault_handling::domain::{Issue, ProtocolModel};
use crate::features::node_assembly::domain::{NameResolver, NodeSummary, Operation, StateSummary};

/// Node assembler
#[derive(Debug, Clone)]
pub struct NodeAssembler {
    resolver: NameResolver,
}

impl Default for NodeAssembler {
    fn default() -> Self {
        Self {
            resolver: NameResolver::identity(),
        }
    }
}

impl NodeAssembler {
    /// Assembler keeping protocol names unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename capabilities and requirements for one node instance
    pub fn with_resolver(mut self, resolver: NameResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Build the node summary
    ///
    /// Returns the summary and the node-level issues (operation
    /// nondeterminism). Analysis issues stay on the report.
    pub fn assemble(
        &self,
        model: &ProtocolModel,
        report: &FaultHandlingReport,
    ) -> (NodeSummary, Vec<Issue>) {
        let mut issues = Vec::new();
        let mut operations = BTreeSet::new();
        let mut states = BTreeMap::new();

        for state in model.states() {
            let mut ops: BTreeMap<String, Operation> = BTreeMap::new();

            for transition in model.outgoing_transitions(&state.id) {
                let name = transition.operation_name();
                operations.insert(name.clone());
                let guard = self.resolver.resolve_requirements(&transition.requirements);

                match ops.get_mut(&name) {
                    Some(prev) if prev.target != transition.target => {
                        issues.push(Issue::determinism(format!(
                            "Nondeterministic operation {} -[{}]-> {} / {}",
                            state.id, name, transition.target, prev.target
                        )));
                    }
                    Some(prev) => prev.requirement_alternatives.push(guard),
                    None => {
                        ops.insert(name, Operation::new(transition.target.clone(), guard));
                    }
                }
            }

            let handlers = report
                .handler_map
                .row(&state.id)
                .map(|row| self.resolver.resolve_requirement_keys(row))
                .unwrap_or_default();

            states.insert(
                state.id.clone(),
                StateSummary {
                    is_alive: state.id != *model.initial_state(),
                    capabilities: self.resolver.resolve_capabilities(&state.capabilities),
                    requirements: self.resolver.resolve_requirements(&state.requirements),
                    operations: ops,
                    handlers,
                },
            );
        }

        let ready = report.is_clean() && issues.is_empty();
        if !ready {
            tracing::debug!(
                "{} not ready: {} analysis issues, {} node issues",
                model.name(),
                report.issues.len(),
                issues.len()
            );
        }

        let summary = NodeSummary {
            type_name: model.name().to_string(),
            initial_state: model.initial_state().clone(),
            capabilities: self.resolver.resolve_capabilities(model.capabilities()),
            requirements: self.resolver.resolve_requirements(model.requirements()),
            operations,
            states,
            ready_state: ready.then(|| model.initial_state().clone()),
        };

        (summary, issues)
    }
}
