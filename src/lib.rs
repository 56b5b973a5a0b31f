//! Networks of boolean gates, switches, LEDs and junction nodes, simulated by bounded synchronous relaxation so that
//! feedback loops are allowed.
//!
//! None of the types here synchronize internally; share a [`Simulation`] between threads only behind a lock.

#![allow(clippy::upper_case_acronyms)]

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod simulation;
pub(crate) mod utils;

pub use config::SimulationConfig;
pub use error::{LoadError, NetworkError, ParseKindError};
pub use simulation::{Element, ElementKey, Kind, Network, Position, Row, Simulation, TruthTable};
