pub mod element;
pub mod logic;
pub mod network;
pub(crate) mod order;
pub mod table;

use crate::config::SimulationConfig;

pub use element::{Element, Kind, Position};
pub use network::Network;
pub use table::{Row, TruthTable};

slotmap::new_key_type! {
    pub struct ElementKey;
}

pub(crate) type ElementMap = slotmap::SlotMap<ElementKey, element::Element>;

/// A network together with the settings used to run it.
///
/// Ticking is driven from outside: whoever owns the `Simulation` decides how often `tick` is called. Like
/// [`Network`], it has no internal locking.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    pub network: Network,
    pub config: SimulationConfig,
}

impl Simulation {
    pub fn new(network: Network) -> Self {
        Self { network, config: SimulationConfig::default() }
    }

    pub fn with_config(network: Network, config: SimulationConfig) -> Self {
        Self { network, config }
    }

    /// Advances the live simulation by one tick.
    pub fn tick(&mut self) {
        logic::relax(&mut self.network, self.config.passes_per_tick);
    }

    pub fn truth_table(&mut self) -> TruthTable {
        table::generate(&mut self.network, self.config.table_passes)
    }
}
