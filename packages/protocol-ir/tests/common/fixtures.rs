//! Protocol fixtures
//!
//! Small protocols covering the canonical analysis outcomes, plus YAML/JSON
//! documents for ingestion tests.

use protocol_ir::{ProtocolBuilder, ProtocolModel};

/// a{r1,r2} → b{r2} → c{}
pub fn fixture_chain() -> ProtocolModel {
    ProtocolBuilder::new("Chain")
        .state("a", &[], &["r1", "r2"])
        .state("b", &[], &["r2"])
        .state("c", &[], &[])
        .fault_handler("a", "b")
        .fault_handler("b", "c")
        .build()
        .unwrap()
}

/// a{r1} with two indistinguishable recoveries b1{}, b2{}
pub fn fixture_nondeterministic() -> ProtocolModel {
    ProtocolBuilder::new("Twins")
        .state("a", &[], &["r1"])
        .state("b1", &[], &[])
        .state("b2", &[], &[])
        .fault_handler("a", "b1")
        .fault_handler("a", "b2")
        .build()
        .unwrap()
}

/// Handler between states with equal requirements
pub fn fixture_preserving() -> ProtocolModel {
    ProtocolBuilder::new("Flat")
        .state("a", &[], &["r1"])
        .state("b", &[], &["r1"])
        .fault_handler("a", "b")
        .build()
        .unwrap()
}

/// a{r1,r2} with recoveries s1{r1}, s2{r2} and no joint fallback
pub fn fixture_missing_union() -> ProtocolModel {
    ProtocolBuilder::new("Split")
        .state("a", &[], &["r1", "r2"])
        .state("s1", &[], &["r1"])
        .state("s2", &[], &["r2"])
        .fault_handler("a", "s1")
        .fault_handler("a", "s2")
        .build()
        .unwrap()
}

/// Web server with a lifecycle and a two-step degradation
pub fn fixture_web_server() -> ProtocolModel {
    ProtocolBuilder::new("WebServer")
        .state("not_installed", &[], &[])
        .state("installed", &[], &[])
        .state("running", &["endpoint"], &["host", "db"])
        .state("degraded", &[], &["host"])
        .transition("not_installed", "installed", "lifecycle", "install", &["host"])
        .transition("installed", "running", "lifecycle", "start", &["host", "db"])
        .transition("running", "installed", "lifecycle", "stop", &[])
        .transition("installed", "not_installed", "lifecycle", "uninstall", &[])
        .fault_handler("running", "degraded")
        .fault_handler("degraded", "installed")
        .build()
        .unwrap()
}

/// YAML document of the web server protocol
pub const WEB_SERVER_YAML: &str = r#"
component: WebServer
initial_state: not_installed
capabilities: [endpoint]
requirements: [host, db]
states:
  - id: not_installed
  - id: installed
  - id: running
    capabilities: [endpoint]
    requirements: [host, db]
  - id: degraded
    requirements: [host]
transitions:
  - from: not_installed
    to: installed
    interface: lifecycle
    operation: install
    requirements: [host]
  - from: installed
    to: running
    interface: lifecycle
    operation: start
    requirements: [host, db]
  - from: running
    to: installed
    interface: lifecycle
    operation: stop
  - from: installed
    to: not_installed
    interface: lifecycle
    operation: uninstall
fault_handlers:
  - from: running
    to: degraded
  - from: degraded
    to: installed
"#;

/// JSON document with the initial state flagged on the state entry
pub const DATABASE_JSON: &str = r#"{
  "component": "Database",
  "states": [
    { "id": "stopped", "initial": true },
    { "id": "serving", "capabilities": ["sql"], "requirements": ["volume"] }
  ],
  "transitions": [
    { "from": "stopped", "to": "serving", "interface": "lifecycle", "operation": "start", "requirements": ["volume"] }
  ],
  "fault_handlers": [
    { "from": "serving", "to": "stopped" }
  ]
}"#;
