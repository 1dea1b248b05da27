/*
 * Fault-Handling Ports
 *
 * Interfaces for external integration.
 */

use crate::errors::Result;
use crate::features::fault_handling::domain::ProtocolModel;

/// Protocol ingestion port
///
/// Implement this trait to feed protocol models from a custom source
/// (files, a topology parser, an in-memory catalog, ...).
pub trait ProtocolSource {
    /// Human-readable origin of the protocol (file path, template id)
    fn origin(&self) -> String;

    /// Load and validate the protocol model
    fn load(&self) -> Result<ProtocolModel>;
}

impl ProtocolSource for ProtocolModel {
    fn origin(&self) -> String {
        format!("<memory:{}>", self.name())
    }

    fn load(&self) -> Result<ProtocolModel> {
        Ok(self.clone())
    }
}
