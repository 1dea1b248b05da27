/*
 * Management Protocol Parser
 *
 * Parse management protocol descriptions from YAML/JSON.
 *
 * # Supported Formats
 * - YAML: Human-readable, recommended
 * - JSON: Machine-generated, API-friendly
 *
 * # Schema
 * ```yaml
 * component: WebServer
 * initial_state: not_installed
 * capabilities: [endpoint]       # optional declared vocabulary
 * requirements: [host, db]       # optional declared vocabulary
 * states:
 *   - id: not_installed
 *   - id: running
 *     capabilities: [endpoint]
 *     requirements: [host, db]
 * transitions:
 *   - from: not_installed
 *     to: running
 *     interface: lifecycle
 *     operation: start
 *     requirements: [host]
 * fault_handlers:
 *   - from: running
 *     to: not_installed
 * ```
 *
 * # Validation
 * - All states referenced by transitions / handlers must be declared
 * - Exactly one initial state (`initial_state` or `initial: true`)
 * - With strict vocabulary: states only use declared names
 *
 * # Time Complexity
 * O(states + transitions + handlers)
 */

use serde::{Deserialize, Serialize};

use crate::errors::IngestionError;
use crate::features::fault_handling::domain::{FaultHandler, ProtocolModel, State, Transition};
use crate::shared::models::IdSet;

/// Protocol document (YAML/JSON schema)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Component type name
    pub component: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<String>,

    /// Declared capability vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,

    /// Declared requirement vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,

    pub states: Vec<StateConfig>,

    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,

    #[serde(default)]
    pub fault_handlers: Vec<FaultHandlerConfig>,
}

/// State entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    pub id: String,

    #[serde(default)]
    pub capabilities: Vec<String>,

    #[serde(default)]
    pub requirements: Vec<String>,

    #[serde(default)]
    pub initial: bool,
}

/// Operation transition entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    pub from: String,
    pub to: String,
    pub interface: String,
    pub operation: String,

    /// Requirements needed while the operation runs
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Fault handler entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaultHandlerConfig {
    pub from: String,
    pub to: String,
}

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolFormat {
    Yaml,
    Json,
}

impl ProtocolFormat {
    /// Guess the format from a file extension
    pub fn from_extension(ext: &str) -> Result<Self, IngestionError> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(IngestionError::UnsupportedFormat(format!(
                "'.{}' (expected .yaml, .yml or .json)",
                other
            ))),
        }
    }
}

/// Protocol parser
pub struct ProtocolParser;

impl ProtocolParser {
    /// Parse protocol from YAML
    ///
    /// # Example
    /// ```rust
    /// use protocol_ir::features::fault_handling::infrastructure::ProtocolParser;
    ///
    /// let yaml = r#"
    /// component: Service
    /// initial_state: stopped
    /// states:
    ///   - id: stopped
    ///   - id: running
    ///     requirements: [db]
    /// fault_handlers:
    ///   - from: running
    ///     to: stopped
    /// "#;
    ///
    /// let model = ProtocolParser::from_yaml(yaml).unwrap();
    /// assert_eq!(model.fault_handlers().len(), 1);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<ProtocolModel, IngestionError> {
        Self::parse(yaml, ProtocolFormat::Yaml, false)
    }

    /// Parse protocol from JSON
    pub fn from_json(json: &str) -> Result<ProtocolModel, IngestionError> {
        Self::parse(json, ProtocolFormat::Json, false)
    }

    /// Parse a document in the given format
    ///
    /// With `strict_vocabulary`, states may only use capability / requirement
    /// names listed in the document's declared vocabularies.
    pub fn parse(
        text: &str,
        format: ProtocolFormat,
        strict_vocabulary: bool,
    ) -> Result<ProtocolModel, IngestionError> {
        let config: ProtocolConfig = match format {
            ProtocolFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| IngestionError::Syntax(format!("YAML parse error: {}", e)))?,
            ProtocolFormat::Json => serde_json::from_str(text)
                .map_err(|e| IngestionError::Syntax(format!("JSON parse error: {}", e)))?,
        };

        Self::build_protocol(config, strict_vocabulary)
    }

    /// Build protocol model from a parsed document
    pub fn build_protocol(
        config: ProtocolConfig,
        strict_vocabulary: bool,
    ) -> Result<ProtocolModel, IngestionError> {
        let states = config
            .states
            .into_iter()
            .map(|s| State {
                id: s.id,
                capabilities: IdSet::of(s.capabilities),
                requirements: IdSet::of(s.requirements),
                is_initial: s.initial,
            })
            .collect();

        let transitions = config
            .transitions
            .into_iter()
            .map(|t| {
                Transition::new(t.from, t.to, t.interface, t.operation)
                    .with_requirements(IdSet::of(t.requirements))
            })
            .collect();

        let handlers = config
            .fault_handlers
            .into_iter()
            .map(|h| FaultHandler::new(h.from, h.to))
            .collect();

        let model = ProtocolModel::new(
            config.component,
            states,
            transitions,
            handlers,
            config.initial_state,
        )?;

        let declared_caps = config.capabilities.map(IdSet::of);
        let declared_reqs = config.requirements.map(IdSet::of);

        if strict_vocabulary {
            model.check_vocabulary(
                declared_caps.as_ref().unwrap_or(model.capabilities()),
                declared_reqs.as_ref().unwrap_or(model.requirements()),
            )?;
        }

        tracing::debug!(
            "Ingested protocol {} ({} states, {} transitions, {} fault handlers)",
            model.name(),
            model.states().len(),
            model.transitions().len(),
            model.fault_handlers().len()
        );

        Ok(model.with_vocabulary(
            declared_caps.unwrap_or_default(),
            declared_reqs.unwrap_or_default(),
        ))
    }
}

/// Protocol builder (fluent API)
///
/// # Example
/// ```rust
/// use protocol_ir::features::fault_handling::infrastructure::ProtocolBuilder;
///
/// let model = ProtocolBuilder::new("Service")
///     .state("stopped", &[], &[])
///     .state("running", &["endpoint"], &["db"])
///     .initial_state("stopped")
///     .transition("stopped", "running", "lifecycle", "start", &["db"])
///     .fault_handler("running", "stopped")
///     .build()
///     .unwrap();
///
/// assert_eq!(model.initial_state(), "stopped");
/// ```
pub struct ProtocolBuilder {
    name: String,
    states: Vec<State>,
    transitions: Vec<Transition>,
    handlers: Vec<FaultHandler>,
    initial_state: Option<String>,
}

impl ProtocolBuilder {
    /// Create new protocol builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            transitions: Vec::new(),
            handlers: Vec::new(),
            initial_state: None,
        }
    }

    /// Add state
    pub fn state(mut self, id: impl Into<String>, caps: &[&str], reqs: &[&str]) -> Self {
        self.states.push(
            State::new(id)
                .with_capabilities(IdSet::of(caps.iter().copied()))
                .with_requirements(IdSet::of(reqs.iter().copied())),
        );
        self
    }

    /// Set initial state
    pub fn initial_state(mut self, id: impl Into<String>) -> Self {
        self.initial_state = Some(id.into());
        self
    }

    /// Add operation transition
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        interface: impl Into<String>,
        operation: impl Into<String>,
        reqs: &[&str],
    ) -> Self {
        self.transitions.push(
            Transition::new(from, to, interface, operation)
                .with_requirements(IdSet::of(reqs.iter().copied())),
        );
        self
    }

    /// Add raw fault handler
    pub fn fault_handler(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.handlers.push(FaultHandler::new(from, to));
        self
    }

    /// Build protocol model
    ///
    /// Without an explicit initial state the first declared state is used.
    pub fn build(self) -> Result<ProtocolModel, IngestionError> {
        let initial = self
            .initial_state
            .or_else(|| self.states.first().map(|s| s.id.clone()));
        ProtocolModel::new(
            self.name,
            self.states,
            self.transitions,
            self.handlers,
            initial,
        )
    }
}
