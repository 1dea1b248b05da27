//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

// Fault-handling verification of management protocols
pub mod fault_handling;

// Per-component summaries consuming the handler map
pub mod node_assembly;
