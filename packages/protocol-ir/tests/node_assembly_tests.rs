//! Node assembly tests
//!
//! Node summaries built from analyzed protocols: operation tables, recovery
//! rows, readiness and name resolution.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use protocol_ir::features::node_assembly::Operation;
use protocol_ir::{
    FaultHandlingAnalyzer, IdSet, IssueCategory, NameResolver, NodeAssembler, ProtocolBuilder,
    ProtocolModel,
};

fn summarize(model: &ProtocolModel) -> (protocol_ir::NodeSummary, Vec<protocol_ir::Issue>) {
    let report = FaultHandlingAnalyzer::new().analyze(model);
    NodeAssembler::new().assemble(model, &report)
}

#[test]
fn test_web_server_summary() {
    let (node, issues) = summarize(&fixture_web_server());

    assert!(issues.is_empty());
    assert_eq!(node.type_name, "WebServer");
    assert_eq!(node.initial_state, "not_installed");
    assert_eq!(node.ready_state.as_deref(), Some("not_installed"));
    assert_eq!(node.requirements, IdSet::of(["db", "host"]));
    assert_eq!(
        node.operations.iter().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "lifecycle:install",
            "lifecycle:start",
            "lifecycle:stop",
            "lifecycle:uninstall"
        ]
    );

    let installed = node.state("installed").unwrap();
    assert!(installed.is_alive);
    assert_eq!(installed.operations.len(), 2);
    assert_eq!(
        installed.operations["lifecycle:start"],
        Operation::new("running", IdSet::of(["host", "db"]))
    );

    let running = node.state("running").unwrap();
    assert_eq!(running.handlers.len(), 2);
    assert_eq!(running.handlers["db"], "degraded");
    assert_eq!(running.handlers["host"], "installed");
}

#[test]
fn test_every_state_summarized() {
    let model = fixture_web_server();
    let (node, _) = summarize(&model);

    assert_eq!(node.states.len(), model.states().len());
    let alive: Vec<_> = node
        .states
        .iter()
        .filter(|(_, s)| !s.is_alive)
        .map(|(id, _)| id.as_str())
        .collect();
    assert_eq!(alive, vec!["not_installed"]);
}

#[test]
fn test_operation_conflict_blocks_readiness() {
    let model = ProtocolBuilder::new("Router")
        .state("idle", &[], &[])
        .state("a", &[], &[])
        .state("b", &[], &[])
        .transition("idle", "a", "ops", "route", &[])
        .transition("idle", "a", "ops", "route", &["fallback"])
        .transition("idle", "b", "ops", "route", &[])
        .build()
        .unwrap();

    let (node, issues) = summarize(&model);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].category, IssueCategory::Determinism);
    assert_eq!(
        issues[0].message,
        "Nondeterministic operation idle -[ops:route]-> b / a"
    );

    let route = &node.state("idle").unwrap().operations["ops:route"];
    assert_eq!(route.target, "a");
    assert_eq!(route.requirement_alternatives.len(), 2);
    assert_eq!(node.ready_state, None);
}

#[test]
fn test_fault_issues_block_readiness() {
    let (node, issues) = summarize(&fixture_missing_union());

    assert!(issues.is_empty());
    assert!(!node.is_ready());
}

#[test]
fn test_resolver_maps_node_scoped_names() {
    let model = fixture_web_server();
    let report = FaultHandlingAnalyzer::new().analyze(&model);
    let resolver: NameResolver = serde_yaml::from_str(
        r#"
capabilities:
  endpoint: frontend_http
requirements:
  host: vm1
  db: pg_main
"#,
    )
    .unwrap();

    let (node, _) = NodeAssembler::new()
        .with_resolver(resolver)
        .assemble(&model, &report);

    assert_eq!(node.capabilities, IdSet::of(["frontend_http"]));
    assert_eq!(node.requirements, IdSet::of(["pg_main", "vm1"]));

    let running = node.state("running").unwrap();
    assert_eq!(running.handlers["pg_main"], "degraded");
    assert_eq!(running.handlers["vm1"], "installed");
    assert_eq!(
        node.state("not_installed").unwrap().operations["lifecycle:install"]
            .requirement_alternatives,
        vec![IdSet::of(["vm1"])]
    );
}

#[test]
fn test_summary_serializes() {
    let (node, _) = summarize(&fixture_chain());
    let json = serde_json::to_value(&node).unwrap();

    assert_eq!(json["type_name"], "Chain");
    assert_eq!(json["states"]["a"]["handlers"]["r1"], "b");
    assert_eq!(json["ready_state"], "a");
}

#[test]
fn test_operations_enabled_by_node_requirements() {
    let (node, _) = summarize(&fixture_web_server());
    for state in node.states.values() {
        for op in state.operations.values() {
            assert!(op.is_enabled_by(&node.requirements));
        }
    }

    let model = ProtocolBuilder::new("Licensed")
        .state("off", &[], &[])
        .state("on", &[], &["host"])
        .transition("off", "on", "lifecycle", "start", &["license"])
        .build()
        .unwrap();
    let (node, _) = summarize(&model);

    let start = &node.state("off").unwrap().operations["lifecycle:start"];
    assert!(!start.is_enabled_by(&node.requirements));
}
