//! Generated protocols for property tests
//!
//! Capability and requirement sets are encoded as bit masks over small
//! universes so that random inputs hit comparable and incomparable sets
//! equally often.

use protocol_ir::{IdSet, ProtocolBuilder, ProtocolModel};

pub const REQUIREMENTS: [&str; 4] = ["r0", "r1", "r2", "r3"];
pub const CAPABILITIES: [&str; 2] = ["c0", "c1"];

/// Names of the set bits of `mask`
pub fn names(mask: u8, universe: &[&'static str]) -> Vec<&'static str> {
    universe
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, name)| *name)
        .collect()
}

pub fn id_set(mask: u8, universe: &[&'static str]) -> IdSet {
    IdSet::of(names(mask, universe))
}

/// State `i` of a generated protocol
pub fn state_name(i: usize) -> String {
    format!("s{:02}", i)
}

/// Protocol with states s00.. carrying the given masks, and raw handlers
/// between state indexes (taken modulo the state count)
pub fn lattice_protocol(
    states: &[(u8, u8)],
    handlers: &[(usize, usize)],
) -> ProtocolModel {
    let mut builder = ProtocolBuilder::new("Lattice");
    for (i, (caps, reqs)) in states.iter().enumerate() {
        builder = builder.state(
            state_name(i),
            &names(*caps, &CAPABILITIES),
            &names(*reqs, &REQUIREMENTS),
        );
    }
    let n = states.len();
    for (from, to) in handlers {
        builder = builder.fault_handler(state_name(from % n), state_name(to % n));
    }
    builder.build().unwrap()
}

/// Protocol whose first state holds every capability and requirement and
/// has a raw handler to every other state
///
/// Every other state gets a proper requirement subset, so the first state
/// dominates the whole closure.
pub fn rooted_protocol(states: &[(u8, u8)], handlers: &[(usize, usize)]) -> ProtocolModel {
    let full_reqs = (1u8 << REQUIREMENTS.len()) - 1;
    let full_caps = (1u8 << CAPABILITIES.len()) - 1;

    let mut all = vec![(full_caps, full_reqs)];
    all.extend(states.iter().map(|(caps, reqs)| {
        let reqs = reqs & full_reqs;
        // Proper subset of the full set
        let reqs = if reqs == full_reqs { reqs & !1 } else { reqs };
        (caps & full_caps, reqs)
    }));

    let mut edges: Vec<(usize, usize)> = (1..all.len()).map(|i| (0, i)).collect();
    edges.extend(handlers.iter().map(|(a, b)| (a % all.len(), b % all.len())));
    lattice_protocol(&all, &edges)
}
