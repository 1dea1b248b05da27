/*
 * Fault-Handling Application Layer
 *
 * Analyzer orchestrating the infrastructure stages, plus batch fan-out.
 */

mod analyzer;
mod batch;

pub use analyzer::{AnalysisStats, FaultHandlingAnalyzer, FaultHandlingReport};
