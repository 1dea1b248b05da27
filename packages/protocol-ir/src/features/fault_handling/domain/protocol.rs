/*
 * Management Protocol Model
 *
 * Immutable snapshot of one component type's management protocol:
 * states, operation transitions and raw fault handlers.
 *
 * # Example: Web server
 * ```text
 * States:
 *   not_installed  caps={}         reqs={}
 *   running        caps={endpoint} reqs={host, db}
 *   degraded       caps={}         reqs={host}
 * Transitions:
 *   not_installed --lifecycle:start [host]--> running
 * Fault handlers:
 *   running ~~> degraded ~~> not_installed
 * ```
 *
 * # Construction
 * `ProtocolModel::new` is the only fallible step of the whole analysis.
 * Undefined state references, duplicate ids and a missing or ambiguous
 * initial state are `IngestionError`s.
 *
 * # Time Complexity
 * - new: O(states + transitions + handlers)
 * - state / outgoing_transitions: O(1) (hash lookup)
 */

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::IngestionError;
use crate::shared::models::{IdSet, Ident};

/// State id within one protocol
pub type StateId = Ident;

/// Protocol state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,

    /// Capabilities offered while in this state
    #[serde(default)]
    pub capabilities: IdSet,

    /// Requirements needed while in this state
    #[serde(default)]
    pub requirements: IdSet,

    #[serde(default)]
    pub is_initial: bool,
}

impl State {
    /// Create new state with no capabilities and no requirements
    pub fn new(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            capabilities: IdSet::new(),
            requirements: IdSet::new(),
            is_initial: false,
        }
    }

    pub fn with_capabilities(mut self, caps: IdSet) -> Self {
        self.capabilities = caps;
        self
    }

    pub fn with_requirements(mut self, reqs: IdSet) -> Self {
        self.requirements = reqs;
        self
    }

    pub fn initial(mut self) -> Self {
        self.is_initial = true;
        self
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Operation transition (non-fault)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub source: StateId,
    pub target: StateId,
    pub interface: String,
    pub operation: String,

    /// Requirements that must hold while the operation runs
    #[serde(default)]
    pub requirements: IdSet,
}

impl Transition {
    pub fn new(
        source: impl Into<StateId>,
        target: impl Into<StateId>,
        interface: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            interface: interface.into(),
            operation: operation.into(),
            requirements: IdSet::new(),
        }
    }

    pub fn with_requirements(mut self, reqs: IdSet) -> Self {
        self.requirements = reqs;
        self
    }

    /// Qualified operation name: `interface:operation`
    pub fn operation_name(&self) -> String {
        format!("{}:{}", self.interface, self.operation)
    }
}

/// Raw, author-supplied recovery edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultHandler {
    pub source: StateId,
    pub target: StateId,
}

impl FaultHandler {
    pub fn new(source: impl Into<StateId>, target: impl Into<StateId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl std::fmt::Display for FaultHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Management protocol of one component type
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolModel {
    name: String,

    /// States in declaration order
    states: Vec<State>,

    transitions: Vec<Transition>,

    fault_handlers: Vec<FaultHandler>,

    initial_state: StateId,

    /// Declared capability vocabulary (union of state capabilities if not declared)
    capabilities: IdSet,

    /// Declared requirement vocabulary (union of state requirements if not declared)
    requirements: IdSet,

    #[serde(skip)]
    index: FxHashMap<StateId, usize>,

    #[serde(skip)]
    outgoing: FxHashMap<StateId, Vec<usize>>,
}

impl ProtocolModel {
    /// Build and validate a protocol model
    ///
    /// The initial state is taken from `initial_state` when given, otherwise
    /// from the single state flagged `is_initial`.
    pub fn new(
        name: impl Into<String>,
        states: Vec<State>,
        transitions: Vec<Transition>,
        fault_handlers: Vec<FaultHandler>,
        initial_state: Option<StateId>,
    ) -> Result<Self, IngestionError> {
        let name = name.into();
        if states.is_empty() {
            return Err(IngestionError::EmptyProtocol(name));
        }

        let mut index = FxHashMap::default();
        for (i, state) in states.iter().enumerate() {
            if index.insert(state.id.clone(), i).is_some() {
                return Err(IngestionError::DuplicateState(state.id.clone()));
            }
        }

        let initial_state = Self::resolve_initial(&states, &index, initial_state)?;
        let states = states
            .into_iter()
            .map(|mut s| {
                s.is_initial = s.id == initial_state;
                s
            })
            .collect::<Vec<_>>();

        let mut outgoing: FxHashMap<StateId, Vec<usize>> = FxHashMap::default();
        for (i, t) in transitions.iter().enumerate() {
            let context = format!(
                "Transition {} -[{}]-> {}",
                t.source,
                t.operation_name(),
                t.target
            );
            Self::check_defined(&index, &t.source, &context)?;
            Self::check_defined(&index, &t.target, &context)?;
            outgoing.entry(t.source.clone()).or_default().push(i);
        }

        for h in &fault_handlers {
            let context = format!("Fault handler {}", h);
            Self::check_defined(&index, &h.source, &context)?;
            Self::check_defined(&index, &h.target, &context)?;
        }

        let capabilities = states
            .iter()
            .fold(IdSet::new(), |acc, s| acc.union(&s.capabilities));
        let requirements = states
            .iter()
            .fold(IdSet::new(), |acc, s| acc.union(&s.requirements));

        Ok(Self {
            name,
            states,
            transitions,
            fault_handlers,
            initial_state,
            capabilities,
            requirements,
            index,
            outgoing,
        })
    }

    fn resolve_initial(
        states: &[State],
        index: &FxHashMap<StateId, usize>,
        explicit: Option<StateId>,
    ) -> Result<StateId, IngestionError> {
        if let Some(id) = explicit {
            if !index.contains_key(&id) {
                return Err(IngestionError::MissingInitialState(format!(
                    "initial state '{}' is not declared",
                    id
                )));
            }
            return Ok(id);
        }

        let mut flagged = states.iter().filter(|s| s.is_initial);
        match (flagged.next(), flagged.next()) {
            (Some(first), None) => Ok(first.id.clone()),
            (Some(first), Some(second)) => Err(IngestionError::AmbiguousInitialState {
                first: first.id.clone(),
                second: second.id.clone(),
            }),
            (None, _) => Err(IngestionError::MissingInitialState(
                "no state is marked initial".to_string(),
            )),
        }
    }

    fn check_defined(
        index: &FxHashMap<StateId, usize>,
        id: &StateId,
        context: &str,
    ) -> Result<(), IngestionError> {
        if index.contains_key(id) {
            Ok(())
        } else {
            Err(IngestionError::UndefinedState {
                state: id.clone(),
                context: context.to_string(),
            })
        }
    }

    /// Replace the derived vocabularies with declared ones
    ///
    /// Declared vocabularies are widened to include every name the states
    /// actually use; use [`ProtocolModel::check_vocabulary`] to detect those.
    pub fn with_vocabulary(mut self, capabilities: IdSet, requirements: IdSet) -> Self {
        self.capabilities = capabilities.union(&self.capabilities);
        self.requirements = requirements.union(&self.requirements);
        self
    }

    /// Names used by states but missing from the given vocabularies
    ///
    /// Returns the first offending (state, kind, name) triple as an error.
    pub fn check_vocabulary(
        &self,
        capabilities: &IdSet,
        requirements: &IdSet,
    ) -> Result<(), IngestionError> {
        for state in &self.states {
            let sets = [
                ("capability", &state.capabilities, capabilities),
                ("requirement", &state.requirements, requirements),
            ];
            for (kind, used, declared) in sets {
                if let Some(name) = used.difference(declared).iter().next() {
                    return Err(IngestionError::UndeclaredName {
                        state: state.id.clone(),
                        kind: kind.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All states in declaration order
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: &str) -> Option<&State> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transitions leaving `state`, in declaration order
    pub fn outgoing_transitions(&self, state: &str) -> Vec<&Transition> {
        self.outgoing
            .get(state)
            .map(|ids| ids.iter().map(|&i| &self.transitions[i]).collect())
            .unwrap_or_default()
    }

    pub fn fault_handlers(&self) -> &[FaultHandler] {
        &self.fault_handlers
    }

    pub fn initial_state(&self) -> &StateId {
        &self.initial_state
    }

    pub fn capabilities(&self) -> &IdSet {
        &self.capabilities
    }

    pub fn requirements(&self) -> &IdSet {
        &self.requirements
    }
}
