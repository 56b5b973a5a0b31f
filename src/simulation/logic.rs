use tracing::trace;

use crate::simulation::{element::MAX_ARITY, ElementKey, Network};

/// Passes per tick when the circuit is being simulated live.
pub const LIVE_PASSES: usize = 3;
/// Passes per input assignment when building a truth table.
pub const TABLE_PASSES: usize = 5;

/// Runs `passes` relaxation passes over the whole network.
///
/// Acyclic networks reach their fixed point once `passes` is at least the length of the longest path. Feedback loops
/// either settle or keep oscillating; whatever value is present after the last pass is what callers see.
pub fn relax(network: &mut Network, passes: usize) {
    let mut next = Vec::with_capacity(network.len());
    for pass_number in 0..passes {
        let changed = pass_into(network, &mut next);
        trace!(pass_number, changed, "relaxation pass");
    }
}

/// One synchronous pass, returning whether any output changed.
pub fn pass(network: &mut Network) -> bool {
    pass_into(network, &mut Vec::with_capacity(network.len()))
}

fn pass_into(network: &mut Network, next: &mut Vec<(ElementKey, bool)>) -> bool {
    // all elements calculate their values based on the outputs from the previous pass and then all updates get applied all at once
    next.clear();
    next.extend(network.order.keys().filter_map(|key| {
        let element = &network.elements[key];
        let mut inputs = [false; MAX_ARITY];
        for (value, source) in inputs.iter_mut().zip(element.inputs.iter()) {
            *value = source.map_or(false, |source| network.elements[source].output);
        }
        element.kind().compute(&inputs[..element.inputs.len()]).map(|output| (key, output))
    }));

    let mut changed = false;
    for &(key, output) in next.iter() {
        let element = &mut network.elements[key];
        changed |= element.output != output;
        element.output = output;
    }
    changed
}
