/*
 * Fault-Handler Reachability Closure
 *
 * Computes, for every state, the set of states transitively reachable via
 * accepted fault handlers.
 *
 * # Algorithm
 * Iterative DFS with three-color marking (unvisited / in-progress / done).
 * A state's reachable set is its raw successor set, extended in post-order
 * with each successor's reachable set. The color map and the frame stack
 * are local to one call.
 *
 * Revisiting an in-progress state closes a cycle: one WellFormedness issue
 * names that state, the walk continues, and the cycle members keep whatever
 * partial closure was accumulated.
 *
 * # Time Complexity
 * O(V + E) visits, plus O(V) per set union
 */

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

use super::Relation;
use crate::features::fault_handling::domain::{Issue, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    InProgress,
    Done,
}

/// DFS frame: state plus cursor into its raw successors
struct Frame {
    state: StateId,
    successors: Vec<StateId>,
    next: usize,
}

impl Frame {
    fn new(state: &StateId, raw: &Relation) -> Self {
        Self {
            state: state.clone(),
            successors: raw
                .get(state)
                .map(|succ| succ.iter().cloned().collect())
                .unwrap_or_default(),
            next: 0,
        }
    }
}

/// Closure result
#[derive(Debug, Clone, Default)]
pub struct ClosureOutcome {
    /// state → transitively reachable states
    pub reachable: Relation,

    /// Cycle issues, one per back edge
    pub issues: Vec<Issue>,
}

/// Compute the transitive closure of a raw edge relation
///
/// Roots are visited in identifier order. Targets that are not keys of `raw`
/// are treated as states without successors.
pub fn compute_closure(raw: &Relation) -> ClosureOutcome {
    let mut reachable = raw.clone();
    let mut colors: FxHashMap<StateId, Color> = FxHashMap::default();
    let mut issues = Vec::new();

    for root in raw.keys() {
        if colors.contains_key(root) {
            continue;
        }

        colors.insert(root.clone(), Color::InProgress);
        let mut stack = vec![Frame::new(root, raw)];

        while let Some(frame) = stack.last_mut() {
            if frame.next < frame.successors.len() {
                let succ = frame.successors[frame.next].clone();
                frame.next += 1;
                let current = frame.state.clone();

                match colors.get(&succ).copied() {
                    None => {
                        colors.insert(succ.clone(), Color::InProgress);
                        stack.push(Frame::new(&succ, raw));
                    }
                    Some(Color::InProgress) => {
                        tracing::debug!("Fault handler cycle closes at {}", succ);
                        issues.push(Issue::well_formedness(format!(
                            "Cycle in fault handlers detected at {}",
                            succ
                        )));
                        absorb(&mut reachable, &current, &succ);
                    }
                    Some(Color::Done) => absorb(&mut reachable, &current, &succ),
                }
            } else {
                let Some(done) = stack.pop() else { break };
                colors.insert(done.state.clone(), Color::Done);
                if let Some(parent) = stack.last() {
                    absorb(&mut reachable, &parent.state, &done.state);
                }
            }
        }
    }

    ClosureOutcome { reachable, issues }
}

/// reachable[into] ∪= reachable[from]
fn absorb(reachable: &mut Relation, into: &StateId, from: &StateId) {
    if into == from {
        return;
    }
    let extra: BTreeSet<StateId> = reachable.get(from).cloned().unwrap_or_default();
    reachable.entry(into.clone()).or_default().extend(extra);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(states: &[&str], edges: &[(&str, &str)]) -> Relation {
        let mut rel = Relation::new();
        for s in states {
            rel.entry(s.to_string()).or_default();
        }
        for (s, t) in edges {
            rel.entry(s.to_string()).or_default().insert(t.to_string());
        }
        rel
    }

    fn set(items: &[&str]) -> BTreeSet<StateId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_chain_closure() {
        let raw = relation(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let outcome = compute_closure(&raw);

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.reachable["a"], set(&["b", "c"]));
        assert_eq!(outcome.reachable["b"], set(&["c"]));
        assert!(outcome.reachable["c"].is_empty());
    }

    #[test]
    fn test_diamond_closure() {
        let raw = relation(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let outcome = compute_closure(&raw);

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.reachable["a"], set(&["b", "c", "d"]));
    }

    #[test]
    fn test_visit_order_does_not_matter() {
        // "z" is visited after its successor "b" has already been closed
        let raw = relation(&["a", "b", "z"], &[("z", "b"), ("b", "a")]);
        let outcome = compute_closure(&raw);

        assert_eq!(outcome.reachable["z"], set(&["a", "b"]));
    }

    #[test]
    fn test_two_cycle_reports_once() {
        let raw = relation(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let outcome = compute_closure(&raw);

        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(
            outcome.issues[0].message,
            "Cycle in fault handlers detected at a"
        );
        assert_eq!(outcome.reachable["a"], set(&["a", "b"]));
    }

    #[test]
    fn test_three_cycle_reports_once() {
        let raw = relation(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let outcome = compute_closure(&raw);

        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.issues[0].message.ends_with("at a"));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let raw = relation(&["a"], &[("a", "a")]);
        let outcome = compute_closure(&raw);

        assert_eq!(outcome.issues.len(), 1);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let names: Vec<String> = (0..3_000).map(|i| format!("s{:05}", i)).collect();
        let mut raw = Relation::new();
        for pair in names.windows(2) {
            raw.entry(pair[0].clone()).or_default().insert(pair[1].clone());
        }
        raw.entry(names[names.len() - 1].clone()).or_default();

        let outcome = compute_closure(&raw);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.reachable[&names[2_990]].len(), 9);
    }
}
