/*
 * Fault-Handling Analysis
 *
 * Verifies the fault-handling transitions of a management protocol:
 * - Well-formedness (no capability gain, strict requirement loss, no cycles)
 * - Determinism (recovery successors distinguishable by requirements)
 * - Race freedom (recovery relation closed under concurrent faults)
 *
 * and resolves, per state and lost requirement, the least drastic recovery.
 *
 * Architecture:
 * - Domain: ProtocolModel, Issue, DerivedEdges, HandlerMap
 * - Application: FaultHandlingAnalyzer (stage orchestration, batch)
 * - Infrastructure: guard, closure, dominance, derived edges, validator,
 *   handler map, YAML/JSON ingestion
 * - Ports: ProtocolSource trait
 *
 * References:
 * - Brogi, Canciani, Soldani (2015) "Modelling and analysing cloud
 *   application management"
 * - Brogi, Canciani, Soldani (2016) "Fault-aware application management
 *   protocols"
 */

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-export main types
pub use domain::{
    DerivedEdge, DerivedEdges, FaultHandler, HandlerMap, Issue, IssueCategory, ProtocolModel,
    State, StateId, Transition,
};

pub use application::{AnalysisStats, FaultHandlingAnalyzer, FaultHandlingReport};

pub use infrastructure::{ProtocolBuilder, ProtocolFile, ProtocolParser};

pub use ports::ProtocolSource;
