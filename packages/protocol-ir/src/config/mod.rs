//! Analysis Configuration
//!
//! Two levels:
//! - Level 1: Preset - one-liner (`AnalysisConfig::preset(Preset::Strict)`)
//! - Level 2: YAML   - versioned file overriding individual fields
//!
//! # Examples
//!
//! ```rust,ignore
//! use protocol_ir::config::{AnalysisConfig, Preset, SelfCheckMode};
//!
//! let config = AnalysisConfig::preset(Preset::Default).with_self_check(SelfCheckMode::Issue);
//! let config = AnalysisConfig::from_yaml("analysis.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod preset;
pub mod validation;

// Re-exports
pub use analysis_config::{AnalysisConfig, SelfCheckMode};
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
pub use validation::Validatable;
