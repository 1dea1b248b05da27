/*
 * Fault-Handling Analyzer
 *
 * Runs the analysis stages of one component in order:
 *
 *   guard → closure → dominance → derived edges → validator
 *                                               → handler map
 *
 * # Issue Order
 * 1. Guard rejections (handler declaration order)
 * 2. Cycle issues
 * 3. Validator findings: transitivity (issue mode only), determinism,
 *    co-transitivity, coverage
 *
 * # Time Complexity
 * O(V × (V + E)) closure + O(V × d³) validator, d = max derived out-degree
 *
 * # Example
 * ```rust,ignore
 * let analyzer = FaultHandlingAnalyzer::new().with_config(AnalysisConfig::default());
 * let report = analyzer.analyze(&model);
 *
 * for issue in &report.issues {
 *     println!("{}", issue);
 * }
 * ```
 */

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, SelfCheckMode};
use crate::features::fault_handling::domain::{DerivedEdges, HandlerMap, Issue, ProtocolModel};
use crate::features::fault_handling::infrastructure::{
    build_derived_edges, build_handler_map, check_co_transitivity, check_coverage,
    check_determinism, check_transitivity, compute_closure, screen_fault_handlers,
    select_dominators, TransitivityDefect,
};

/// Analysis statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Number of protocol states
    pub states: usize,

    /// Fault handlers as declared
    pub raw_handlers: usize,

    /// Fault handlers passing the well-formedness guard
    pub accepted_handlers: usize,

    /// Derived recovery edges
    pub derived_edges: usize,

    /// Reported issues
    pub issues: usize,

    /// Analysis time (milliseconds)
    pub analysis_time_ms: u64,
}

/// Analysis result for one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultHandlingReport {
    /// Component type name
    pub component: String,

    /// Property violations, in stage order
    pub issues: Vec<Issue>,

    pub derived_edges: DerivedEdges,

    pub handler_map: HandlerMap,

    /// Self-check failures not surfaced as issues
    pub internal_defects: Vec<String>,

    pub stats: AnalysisStats,
}

impl FaultHandlingReport {
    /// No issues and no internal defects
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.internal_defects.is_empty()
    }
}

/// Fault-handling analyzer
#[derive(Debug, Clone, Default)]
pub struct FaultHandlingAnalyzer {
    config: AnalysisConfig,
}

impl FaultHandlingAnalyzer {
    /// Create new analyzer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one protocol
    ///
    /// Never fails: property violations are reported on the returned report.
    pub fn analyze(&self, model: &ProtocolModel) -> FaultHandlingReport {
        let start_time = std::time::Instant::now();
        tracing::debug!("Analyzing fault handlers: {}", model.name());

        let guard = screen_fault_handlers(model);
        let accepted_handlers = guard.accepted.values().map(|succ| succ.len()).sum();
        let mut issues = guard.issues;

        let closure = compute_closure(&guard.accepted);
        issues.extend(closure.issues);

        let top = select_dominators(model, &closure.reachable);
        let derived_edges = build_derived_edges(model, &closure.reachable, &top);

        let mut internal_defects = Vec::new();
        let defects = check_transitivity(&derived_edges);
        self.record_self_check(model.name(), &defects, &mut issues, &mut internal_defects);

        issues.extend(check_determinism(model, &derived_edges));
        issues.extend(check_co_transitivity(model, &derived_edges));
        issues.extend(check_coverage(model, &derived_edges));

        let handler_map = build_handler_map(model, &derived_edges);

        let stats = AnalysisStats {
            states: model.states().len(),
            raw_handlers: model.fault_handlers().len(),
            accepted_handlers,
            derived_edges: derived_edges.len(),
            issues: issues.len(),
            analysis_time_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Fault-handling analysis complete: {} → {} issues, {} derived edges",
            model.name(),
            stats.issues,
            stats.derived_edges
        );

        FaultHandlingReport {
            component: model.name().to_string(),
            issues,
            derived_edges,
            handler_map,
            internal_defects,
            stats,
        }
    }

    fn record_self_check(
        &self,
        component: &str,
        defects: &[TransitivityDefect],
        issues: &mut Vec<Issue>,
        internal_defects: &mut Vec<String>,
    ) {
        if defects.is_empty() {
            return;
        }

        match self.config.self_check {
            SelfCheckMode::Issue => {
                issues.extend(defects.iter().map(TransitivityDefect::to_issue));
            }
            SelfCheckMode::Internal | SelfCheckMode::Assert => {
                for defect in defects {
                    tracing::error!(
                        "Derived relation of {} is not closed: {}",
                        component,
                        defect.message()
                    );
                    internal_defects.push(defect.message());
                }
                if self.config.self_check == SelfCheckMode::Assert {
                    debug_assert!(
                        defects.is_empty(),
                        "{} transitivity defect(s) in {}",
                        defects.len(),
                        component
                    );
                }
            }
        }
    }
}
