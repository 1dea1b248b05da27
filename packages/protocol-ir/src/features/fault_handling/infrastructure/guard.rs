/*
 * Well-Formedness Guard
 *
 * Screens raw fault handlers before closure. A handler is accepted iff
 *   caps(target) ⊆ caps(source)  and  reqs(target) ⊊ reqs(source)
 *
 * Rejected handlers become WellFormedness issues and are excluded from the
 * closure. Only the first failing condition is reported per handler.
 */

use super::Relation;
use crate::features::fault_handling::domain::{FaultHandler, Issue, ProtocolModel, State};

/// Guard verdict for one raw handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Accepted,
    IncreasesCapabilities,
    IncreasesRequirements,
    PreservesRequirements,
}

impl GuardVerdict {
    fn describe(self) -> Option<&'static str> {
        match self {
            GuardVerdict::Accepted => None,
            GuardVerdict::IncreasesCapabilities => Some("increases capabilities"),
            GuardVerdict::IncreasesRequirements => Some("increases requirements"),
            GuardVerdict::PreservesRequirements => Some("preserves requirements"),
        }
    }
}

/// Check one recovery step `source ~~> target`
pub fn judge(source: &State, target: &State) -> GuardVerdict {
    if !source.capabilities.contains(&target.capabilities) {
        GuardVerdict::IncreasesCapabilities
    } else if !source.requirements.contains(&target.requirements) {
        GuardVerdict::IncreasesRequirements
    } else if source.requirements.equals(&target.requirements) {
        GuardVerdict::PreservesRequirements
    } else {
        GuardVerdict::Accepted
    }
}

/// Screening result
#[derive(Debug, Clone, Default)]
pub struct GuardOutcome {
    /// Accepted raw edges; every state of the model is a key
    pub accepted: Relation,

    /// One issue per rejected handler, in declaration order
    pub issues: Vec<Issue>,
}

/// Screen all raw fault handlers of a model
pub fn screen_fault_handlers(model: &ProtocolModel) -> GuardOutcome {
    let mut outcome = GuardOutcome::default();
    for state in model.states() {
        outcome.accepted.entry(state.id.clone()).or_default();
    }

    for handler in model.fault_handlers() {
        let (Some(source), Some(target)) = (model.state(&handler.source), model.state(&handler.target))
        else {
            // ProtocolModel::new rejects dangling references
            continue;
        };

        match judge(source, target).describe() {
            None => {
                outcome
                    .accepted
                    .entry(handler.source.clone())
                    .or_default()
                    .insert(handler.target.clone());
            }
            Some(reason) => {
                tracing::debug!("Rejected fault handler {}: {}", handler, reason);
                outcome.issues.push(rejection(handler, reason));
            }
        }
    }

    outcome
}

fn rejection(handler: &FaultHandler, reason: &str) -> Issue {
    Issue::well_formedness(format!(
        "Fault handler {} -> {} {}",
        handler.source, handler.target, reason
    ))
}
