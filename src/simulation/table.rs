use std::fmt;

use tracing::debug;

use crate::{
    simulation::{logic, ElementKey, Network},
    utils,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Value assigned to each switch.
    pub inputs: Vec<bool>,
    /// Settled value of each LED.
    pub outputs: Vec<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    /// Switch names, in the order the switches were added.
    pub inputs: Vec<String>,
    /// LED names, in the order the LEDs were added.
    pub outputs: Vec<String>,
    pub rows: Vec<Row>,
}

impl TruthTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drives every switch through every combination and records what the LEDs settle to after `passes` relaxation passes.
///
/// Row `i` assigns the binary digits of `i` to the switches, first switch most significant. A network without
/// switches gives a table without rows. Every output in the network is put back the way it was afterwards.
pub fn generate(network: &mut Network, passes: usize) -> TruthTable {
    let switches = network.switches();
    let leds = network.leds();
    let names = |keys: &[ElementKey]| keys.iter().map(|key| network.elements[*key].name.clone()).collect::<Vec<_>>();
    let mut table = TruthTable { inputs: names(&switches), outputs: names(&leds), rows: Vec::new() };

    if switches.is_empty() {
        return table;
    }

    let saved: Vec<_> = network.elements.iter().map(|(key, element)| (key, element.output)).collect();

    for assignment in utils::enumerate_inputs(switches.len()) {
        for (switch, value) in switches.iter().zip(&assignment) {
            network.elements[*switch].output = *value;
        }
        logic::relax(network, passes);
        let outputs = leds.iter().map(|led| network.elements[*led].output).collect();
        table.rows.push(Row { inputs: assignment, outputs });
    }

    for (key, output) in saved {
        network.elements[key].output = output;
    }

    debug!(switches = switches.len(), leds = leds.len(), rows = table.rows.len(), "generated truth table");
    table
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<_> = self.inputs.iter().chain(&self.outputs).map(|name| name.len().max(1)).collect();
        let (input_widths, output_widths) = widths.split_at(self.inputs.len());

        let write_cells = |f: &mut fmt::Formatter<'_>, cells: &mut dyn Iterator<Item = (String, usize)>| -> fmt::Result {
            let cells: Vec<_> = cells.map(|(cell, width)| format!("{cell:^width$}")).collect();
            f.write_str(&cells.join(" "))
        };

        write_cells(f, &mut self.inputs.iter().cloned().zip(input_widths.iter().copied()))?;
        f.write_str(" | ")?;
        write_cells(f, &mut self.outputs.iter().cloned().zip(output_widths.iter().copied()))?;
        writeln!(f)?;

        let bit = |value: &bool| if *value { "1".to_string() } else { "0".to_string() };
        for row in &self.rows {
            write_cells(f, &mut row.inputs.iter().map(bit).zip(input_widths.iter().copied()))?;
            f.write_str(" | ")?;
            write_cells(f, &mut row.outputs.iter().map(bit).zip(output_widths.iter().copied()))?;
            writeln!(f)?;
        }
        Ok(())
    }
}
