/*
 * Requirement → Handler Map
 *
 * For every derived edge s → t and every requirement r ∈ reqs(s) \ reqs(t),
 * t can recover from losing r while in s. Among several candidates the one
 * keeping the most requirements wins:
 *
 *   record t for (s, r) unless a handler h is already recorded and
 *   reqs(h) ⊊ reqs(t) does not hold
 *
 * Equal or incomparable candidates keep the first recorded, in identifier
 * order of t.
 */

use super::StateSets;
use crate::features::fault_handling::domain::{DerivedEdges, HandlerMap, ProtocolModel};

/// Resolve the recovery state for every (state, lost requirement) pair
pub fn build_handler_map(model: &ProtocolModel, edges: &DerivedEdges) -> HandlerMap {
    let sets = StateSets::new(model);
    let mut map = HandlerMap::new();

    for s in edges.sources() {
        let row = map.row_mut(s);
        for t in edges.successors(s) {
            for r in sets.reqs(s).difference(sets.reqs(t)) {
                let replace = match row.get(&r) {
                    None => true,
                    Some(current) => sets.reqs(t).strictly_contains(sets.reqs(current)),
                };
                if replace {
                    row.insert(r, t.clone());
                }
            }
        }
    }

    map
}
