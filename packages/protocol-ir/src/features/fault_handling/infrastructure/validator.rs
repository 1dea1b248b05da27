/*
 * Consistency Validator
 *
 * Four independent checks over the derived recovery relation. Each check
 * returns its own findings; the analyzer merges them.
 *
 * 1. Transitivity self-check: s→s1→s2 ⇒ s→s2 (engine invariant)
 * 2. Determinism:    distinct successors of s have distinct requirement sets
 * 3. Co-transitivity: reqs(s1) ⊇ reqs(s2) ⇒ s1→s2 is derived
 * 4. Coverage:       every successor pair of s has a union and an
 *                    intersection witness among the successors of s
 *
 * Checks 2 and 4 are symmetric and report once per unordered pair;
 * check 3 is directional and reports per ordered pair.
 *
 * # Time Complexity
 * O(V × d³) where d = max out-degree of the derived relation
 */

use super::StateSets;
use crate::features::fault_handling::domain::{DerivedEdges, Issue, ProtocolModel, StateId};

/// Broken transitivity witness s → s1 → s2 with s → s2 missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitivityDefect {
    pub source: StateId,
    pub via: StateId,
    pub target: StateId,
}

impl TransitivityDefect {
    pub fn message(&self) -> String {
        format!(
            "Fault handlers {} -> {} -> {} are not transitive",
            self.source, self.via, self.target
        )
    }

    /// Reference-compatible issue form
    pub fn to_issue(&self) -> Issue {
        Issue::race_freedom(self.message())
    }
}

/// Check 1: derived relation must be transitively closed
pub fn check_transitivity(edges: &DerivedEdges) -> Vec<TransitivityDefect> {
    let mut defects = Vec::new();
    for s in edges.sources() {
        for s1 in edges.successors(s) {
            for s2 in edges.successors(s1) {
                if !edges.contains(s, s2) {
                    defects.push(TransitivityDefect {
                        source: s.clone(),
                        via: s1.clone(),
                        target: s2.clone(),
                    });
                }
            }
        }
    }
    defects
}

/// Check 2: successors of one state must be distinguishable by requirements
pub fn check_determinism(model: &ProtocolModel, edges: &DerivedEdges) -> Vec<Issue> {
    let sets = StateSets::new(model);
    let mut issues = Vec::new();

    for s in edges.sources() {
        for (s1, s2) in unordered_pairs(edges, s) {
            if sets.reqs(s1).equals(sets.reqs(s2)) {
                issues.push(Issue::determinism(format!(
                    "Fault handlers {} -> {}/{} are not deterministic",
                    s, s1, s2
                )));
            }
        }
    }
    issues
}

/// Check 3: a more specific recovery that is reachable must be wired in
///
/// Successors with equal requirements are left to the determinism check.
pub fn check_co_transitivity(model: &ProtocolModel, edges: &DerivedEdges) -> Vec<Issue> {
    let sets = StateSets::new(model);
    let mut issues = Vec::new();

    for s in edges.sources() {
        for s1 in edges.successors(s) {
            for s2 in edges.successors(s) {
                if s1 == s2 {
                    continue;
                }
                if !edges.contains(s1, s2) && sets.reqs(s1).strictly_contains(sets.reqs(s2)) {
                    issues.push(Issue::race_freedom(format!(
                        "Fault handlers {} -> {} -?> {} are not co-transitive",
                        s, s1, s2
                    )));
                }
            }
        }
    }
    issues
}

/// Check 4: concurrent faults must have a joint and a common fallback recovery
pub fn check_coverage(model: &ProtocolModel, edges: &DerivedEdges) -> Vec<Issue> {
    let sets = StateSets::new(model);
    let mut issues = Vec::new();

    for s in edges.sources() {
        for (s1, s2) in unordered_pairs(edges, s) {
            let union = sets.reqs(s1).union(sets.reqs(s2));
            let intersection = sets.reqs(s1).intersection(sets.reqs(s2));

            let found_union = edges.successors(s).any(|s3| sets.reqs(s3).contains(&union));
            let found_intersection = edges
                .successors(s)
                .any(|s3| intersection.contains(sets.reqs(s3)));

            if !found_union {
                issues.push(Issue::race_freedom(format!(
                    "Nondeterministic fault handlers {} -> {}|{} (missing union)",
                    s, s1, s2
                )));
            }
            if !found_intersection {
                issues.push(Issue::race_freedom(format!(
                    "Nondeterministic fault handlers {} -> {}|{} (missing intersection)",
                    s, s1, s2
                )));
            }
        }
    }
    issues
}

/// Successor pairs (s1, s2) of `s` with s1 < s2
fn unordered_pairs<'a>(
    edges: &'a DerivedEdges,
    s: &'a str,
) -> impl Iterator<Item = (&'a StateId, &'a StateId)> + 'a {
    edges.successors(s).flat_map(move |s1| {
        edges
            .successors(s)
            .filter(move |s2| s1 < *s2)
            .map(move |s2| (s1, s2))
    })
}
