/*
 * Node Assembly
 *
 * Builds per-component summaries from a protocol and its fault-handling
 * report: operation tables, recovery rows, name resolution and the
 * operation determinism check.
 *
 * Architecture:
 * - Domain: NodeSummary, StateSummary, Operation, NameResolver
 * - Application: NodeAssembler
 */

pub mod application;
pub mod domain;

pub use application::NodeAssembler;
pub use domain::{NameResolver, NodeSummary, Operation, StateSummary};
