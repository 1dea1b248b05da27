/*
 * Derived Edge Construction
 *
 *   DerivedEdge(s, t)  iff  t ∈ reachable[top[s]]
 *                       and reqs(s) ⊋ reqs(t)
 *                       and caps(s) ⊇ caps(t)
 *
 * The dominance-selected closure is re-filtered through the same guard used
 * for raw handlers, so every derived edge reduces requirements and never
 * adds capabilities. Self edges are excluded by the strict superset.
 */

use super::dominance::Dominators;
use super::{Relation, StateSets};
use crate::features::fault_handling::domain::{DerivedEdges, ProtocolModel};

/// Build the derived recovery relation
pub fn build_derived_edges(
    model: &ProtocolModel,
    reachable: &Relation,
    top: &Dominators,
) -> DerivedEdges {
    let sets = StateSets::new(model);
    let mut edges = DerivedEdges::new();

    for s in reachable.keys() {
        edges.add_state(s.clone());
        let Some(root) = top.get(s) else { continue };
        let Some(closure) = reachable.get(root) else {
            continue;
        };

        for t in closure {
            if sets.reqs(s).strictly_contains(sets.reqs(t)) && sets.caps(s).contains(sets.caps(t))
            {
                edges.insert(s.clone(), t.clone());
            }
        }
    }

    edges
}
