/*
 * Batch Analysis
 *
 * One independent analyzer run per component. With `parallel` enabled and
 * at least `parallel_threshold` components, runs fan out over rayon.
 * Output order equals input order either way.
 */

use rayon::prelude::*;

use super::analyzer::{FaultHandlingAnalyzer, FaultHandlingReport};
use crate::errors::Result;
use crate::features::fault_handling::domain::ProtocolModel;
use crate::features::fault_handling::ports::ProtocolSource;

impl FaultHandlingAnalyzer {
    /// Analyze many components
    pub fn analyze_all(&self, models: &[ProtocolModel]) -> Vec<FaultHandlingReport> {
        let config = self.config();
        if config.parallel && models.len() >= config.parallel_threshold {
            tracing::debug!("Analyzing {} components in parallel", models.len());
            models.par_iter().map(|model| self.analyze(model)).collect()
        } else {
            models.iter().map(|model| self.analyze(model)).collect()
        }
    }

    /// Load a protocol from a source and analyze it
    pub fn analyze_source(&self, source: &dyn ProtocolSource) -> Result<FaultHandlingReport> {
        let model = source.load().map_err(|e| {
            tracing::warn!("Failed to load {}: {}", source.origin(), e);
            e
        })?;
        Ok(self.analyze(&model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::features::fault_handling::infrastructure::ProtocolBuilder;

    fn component(i: usize) -> ProtocolModel {
        let mut builder = ProtocolBuilder::new(format!("C{}", i)).state("top", &[], &["r"]);
        // Every odd component carries a non-reducing handler
        if i % 2 == 1 {
            builder = builder
                .state("same", &[], &["r"])
                .fault_handler("top", "same");
        } else {
            builder = builder.state("bottom", &[], &[]).fault_handler("top", "bottom");
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let models: Vec<_> = (0..20).map(component).collect();

        let parallel = FaultHandlingAnalyzer::new()
            .with_config(AnalysisConfig {
                parallel_threshold: 1,
                ..AnalysisConfig::default()
            })
            .analyze_all(&models);
        let sequential = FaultHandlingAnalyzer::new()
            .with_config(AnalysisConfig::default().with_parallel(false))
            .analyze_all(&models);

        assert_eq!(parallel.len(), 20);
        for (i, (p, s)) in parallel.iter().zip(&sequential).enumerate() {
            assert_eq!(p.component, format!("C{}", i));
            assert_eq!(p.component, s.component);
            assert_eq!(p.issues, s.issues);
            assert_eq!(p.derived_edges, s.derived_edges);
            assert_eq!(p.handler_map, s.handler_map);
            assert_eq!(p.is_clean(), i % 2 == 0);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(FaultHandlingAnalyzer::new().analyze_all(&[]).is_empty());
    }

    #[test]
    fn test_analyze_in_memory_source() {
        let model = component(0);
        let report = FaultHandlingAnalyzer::new().analyze_source(&model).unwrap();
        assert_eq!(report.component, "C0");
        assert!(report.is_clean());
    }
}
