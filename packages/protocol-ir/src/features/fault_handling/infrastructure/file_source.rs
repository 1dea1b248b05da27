/*
 * File-backed protocol source
 *
 * Reads a YAML or JSON protocol document from disk; the format follows the
 * file extension.
 */

use std::path::{Path, PathBuf};

use super::protocol_parser::{ProtocolFormat, ProtocolParser};
use crate::errors::{IngestionError, Result};
use crate::features::fault_handling::domain::ProtocolModel;
use crate::features::fault_handling::ports::ProtocolSource;

/// Protocol document on disk
#[derive(Debug, Clone)]
pub struct ProtocolFile {
    path: PathBuf,
    strict_vocabulary: bool,
}

impl ProtocolFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict_vocabulary: false,
        }
    }

    /// Reject states using undeclared capability / requirement names
    pub fn strict_vocabulary(mut self, strict: bool) -> Self {
        self.strict_vocabulary = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> std::result::Result<ProtocolFormat, IngestionError> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ProtocolFormat::from_extension(ext)
    }
}

impl ProtocolSource for ProtocolFile {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<ProtocolModel> {
        let format = self.format()?;
        let text = std::fs::read_to_string(&self.path)?;
        tracing::debug!("Loading protocol from {}", self.path.display());
        Ok(ProtocolParser::parse(&text, format, self.strict_vocabulary)?)
    }
}
