use crate::simulation::logic;

/// How many relaxation passes each mode runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Passes per live tick. Chains deeper than this take more than one tick to show a change.
    pub passes_per_tick: usize,
    /// Passes per row when building a truth table.
    pub table_passes: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { passes_per_tick: logic::LIVE_PASSES, table_passes: logic::TABLE_PASSES }
    }
}
