/*
 * Dominance Selection
 *
 * For every state s, picks top[s]: the closure ancestor with the largest
 * (least reduced) requirement set from which s is still reachable.
 *
 *   top[s] = s                                   initially
 *   for t, for s ∈ reachable[t]:
 *       if reqs(t) ⊇ reqs(top[s]) then top[s] = t
 *
 * Requirement sets are only partially ordered, so the result depends on
 * enumeration order. Both t and s are enumerated in identifier order, which
 * makes tie-breaking between incomparable ancestors stable across runs.
 */

use std::collections::BTreeMap;

use super::{Relation, StateSets};
use crate::features::fault_handling::domain::{ProtocolModel, StateId};

/// state → dominating closure ancestor
pub type Dominators = BTreeMap<StateId, StateId>;

/// Select the dominating ancestor of every state
pub fn select_dominators(model: &ProtocolModel, reachable: &Relation) -> Dominators {
    let sets = StateSets::new(model);
    let mut top: Dominators = reachable.keys().map(|s| (s.clone(), s.clone())).collect();

    for (t, closure) in reachable {
        for s in closure {
            let current = top.get(s).cloned().unwrap_or_else(|| s.clone());
            if sets.reqs(t).contains(sets.reqs(&current)) {
                top.insert(s.clone(), t.clone());
            }
        }
    }

    top
}
