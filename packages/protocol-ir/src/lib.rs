/*
 * Protocol IR - Management Protocol Fault-Handling Verifier
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (IdSet)
 * - features/    : Vertical slices (fault_handling → node_assembly)
 * - config/      : Versioned analysis configuration
 * - errors       : Crate-wide error types
 *
 * Analysis:
 * - Well-formedness, determinism and race freedom of fault handlers
 * - Requirement → recovery state resolution per protocol state
 * - Rayon fan-out across components
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (vertical slices)
pub mod features;

/// Analysis configuration
pub mod config;

/// Error types
pub mod errors;

pub use config::{AnalysisConfig, Preset, SelfCheckMode};
pub use errors::{IngestionError, ProtocolError, Result};
pub use features::fault_handling::{
    FaultHandlingAnalyzer, FaultHandlingReport, HandlerMap, Issue, IssueCategory, ProtocolBuilder,
    ProtocolFile, ProtocolModel, ProtocolParser, ProtocolSource,
};
pub use features::node_assembly::{NameResolver, NodeAssembler, NodeSummary};
pub use shared::models::{IdSet, Ident};
