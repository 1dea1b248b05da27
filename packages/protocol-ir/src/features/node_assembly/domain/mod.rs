/*
 * Node Assembly Domain Models
 */

mod names;
mod node;

pub use names::NameResolver;
pub use node::{NodeSummary, Operation, StateSummary};
