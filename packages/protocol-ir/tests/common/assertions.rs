//! Custom assertions for test verification
//!
//! This module provides domain-specific assertions for protocol analysis.

use protocol_ir::{FaultHandlingReport, IssueCategory};

/// Assert that the report has no issues and no internal defects
pub fn assert_clean(report: &FaultHandlingReport) {
    assert!(
        report.is_clean(),
        "Expected clean report for {}, got issues: {:?}, defects: {:?}",
        report.component,
        report.issues,
        report.internal_defects
    );
}

/// Assert the exact issue messages, in order
pub fn assert_issue_messages(report: &FaultHandlingReport, expected: &[&str]) {
    let actual: Vec<&str> = report.issues.iter().map(|i| i.message.as_str()).collect();
    pretty_assertions::assert_eq!(actual, expected);
}

/// Assert the number of issues in a category
pub fn assert_category_count(report: &FaultHandlingReport, category: IssueCategory, expected: usize) {
    let count = report
        .issues
        .iter()
        .filter(|i| i.category == category)
        .count();
    assert_eq!(
        count, expected,
        "Expected {expected} {category} issues, got {count}: {:?}",
        report.issues
    );
}

/// Assert the exact derived edge set as (source, target) pairs
pub fn assert_derived_edges(report: &FaultHandlingReport, expected: &[(&str, &str)]) {
    let actual: Vec<(String, String)> = report
        .derived_edges
        .edges()
        .map(|e| (e.source, e.target))
        .collect();
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    pretty_assertions::assert_eq!(actual, expected);
}

/// Assert a handler map entry
pub fn assert_handler(report: &FaultHandlingReport, state: &str, requirement: &str, expected: &str) {
    assert_eq!(
        report.handler_map.get(state, requirement).map(String::as_str),
        Some(expected),
        "Unexpected handler for ({state}, {requirement}) in {:?}",
        report.handler_map
    );
}
