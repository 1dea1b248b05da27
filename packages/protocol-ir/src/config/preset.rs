//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Day-to-day checking
    ///
    /// - Self-check failures recorded as internal defects
    /// - Undeclared capability / requirement names tolerated
    Default,

    /// Compatibility with existing tooling, strict ingestion
    ///
    /// - Self-check failures surface as race-freedom issues
    /// - States may only use declared names
    Strict,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "strict" => Ok(Self::Strict),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: default, strict",
                s
            )),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Default
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("strict").unwrap(), Preset::Strict);
        assert_eq!(Preset::from_str("DEFAULT").unwrap(), Preset::Default);
        assert!(Preset::from_str("paranoid").is_err());
    }

    #[test]
    fn test_preset_roundtrip() {
        for preset in [Preset::Default, Preset::Strict] {
            assert_eq!(Preset::from_str(preset.as_str()).unwrap(), preset);
        }
    }
}
