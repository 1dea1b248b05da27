/*
 * Fault-Handling Domain Models
 *
 * Core domain types for management protocol analysis.
 */

mod derived;
mod issues;
mod protocol;

pub use derived::{DerivedEdge, DerivedEdges, HandlerMap};
pub use issues::{count_by_category, Issue, IssueCategory};
pub use protocol::{FaultHandler, ProtocolModel, State, StateId, Transition};
