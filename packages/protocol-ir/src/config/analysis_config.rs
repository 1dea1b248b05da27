//! Analysis configuration
//!
//! # YAML Schema v1
//!
//! ```yaml
//! version: 1
//! preset: default            # default | strict
//! self_check: internal       # internal | issue | assert
//! parallel: true
//! parallel_threshold: 8
//! strict_vocabulary: false
//! ```
//!
//! Every field except `version` is optional; omitted fields come from the
//! preset.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;

/// Supported schema versions
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Top-level keys accepted in a v1 file
const VALID_FIELDS: &[&str] = &[
    "version",
    "preset",
    "self_check",
    "parallel",
    "parallel_threshold",
    "strict_vocabulary",
];

/// How a failed transitivity self-check is surfaced
///
/// The derived relation is closed by construction, so a failure is an
/// engine defect rather than a protocol problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfCheckMode {
    /// Log at error level and record on the report as an internal defect
    Internal,

    /// Emit a RaceFreedom issue (matches existing tooling output)
    Issue,

    /// Panic in debug builds, behave like `Internal` in release builds
    Assert,
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub preset: Preset,

    pub self_check: SelfCheckMode,

    /// Fan out batch analysis over rayon
    pub parallel: bool,

    /// Minimum number of components before fanning out
    pub parallel_threshold: usize,

    /// Reject undeclared capability / requirement names at ingestion
    pub strict_vocabulary: bool,
}

/// YAML file schema (v1)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisConfigFileV1 {
    version: Option<u32>,
    preset: Option<String>,
    self_check: Option<SelfCheckMode>,
    parallel: Option<bool>,
    parallel_threshold: Option<usize>,
    strict_vocabulary: Option<bool>,
}

impl AnalysisConfig {
    /// Complete configuration for a preset
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self {
                preset,
                self_check: SelfCheckMode::Internal,
                parallel: true,
                parallel_threshold: 8,
                strict_vocabulary: false,
            },
            Preset::Strict => Self {
                preset,
                self_check: SelfCheckMode::Issue,
                parallel: true,
                parallel_threshold: 8,
                strict_vocabulary: true,
            },
        }
    }

    pub fn with_self_check(mut self, mode: SelfCheckMode) -> Self {
        self.self_check = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        if let serde_yaml::Value::Mapping(map) = &raw {
            for key in map.keys() {
                let name = key.as_str().unwrap_or_default();
                if !VALID_FIELDS.contains(&name) {
                    return Err(ConfigError::unknown_field_with_suggestion(
                        name,
                        VALID_FIELDS,
                    ));
                }
            }
        }

        let file: AnalysisConfigFileV1 = serde_yaml::from_value(raw)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match file.preset {
            Some(name) => Preset::from_str(&name).map_err(|_| ConfigError::UnknownPreset(name))?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(mode) = file.self_check {
            config.self_check = mode;
        }
        if let Some(parallel) = file.parallel {
            config.parallel = parallel;
        }
        if let Some(threshold) = file.parallel_threshold {
            config.parallel_threshold = threshold;
        }
        if let Some(strict) = file.strict_vocabulary {
            config.strict_vocabulary = strict;
        }

        config.validate()?;
        Ok(config)
    }

    /// Serialize as a v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = AnalysisConfigFileV1 {
            version: Some(1),
            preset: Some(self.preset.as_str().to_string()),
            self_check: Some(self.self_check),
            parallel: Some(self.parallel),
            parallel_threshold: Some(self.parallel_threshold),
            strict_vocabulary: Some(self.strict_vocabulary),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::preset(Preset::Default)
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(1..=100_000).contains(&self.parallel_threshold) {
            return Err(ConfigError::range_with_hint(
                "parallel_threshold",
                self.parallel_threshold,
                1,
                100_000,
                "At least one component is needed to fan out",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalysisConfig"
    }
}
