use std::{fmt, str::FromStr};

use crate::{error::ParseKindError, simulation::ElementKey};

/// Largest number of input slots any kind has.
pub const MAX_ARITY: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    AND,
    OR,
    NOT,
    XOR,
    NAND,
    NOR,
    XNOR,
    SWITCH,
    LED,
    NODE,
}

impl Kind {
    pub const ALL: [Kind; 10] = [Kind::AND, Kind::OR, Kind::NOT, Kind::XOR, Kind::NAND, Kind::NOR, Kind::XNOR, Kind::SWITCH, Kind::LED, Kind::NODE];

    pub fn arity(self) -> usize {
        match self {
            Kind::AND | Kind::OR | Kind::XOR | Kind::NAND | Kind::NOR | Kind::XNOR => 2,
            Kind::NOT | Kind::LED | Kind::NODE => 1,
            Kind::SWITCH => 0,
        }
    }

    /// Tag used in save files. Switches are written as `SW`.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::AND => "AND",
            Kind::OR => "OR",
            Kind::NOT => "NOT",
            Kind::XOR => "XOR",
            Kind::NAND => "NAND",
            Kind::NOR => "NOR",
            Kind::XNOR => "XNOR",
            Kind::SWITCH => "SW",
            Kind::LED => "LED",
            Kind::NODE => "NODE",
        }
    }

    /// Whether the output is set from outside instead of computed.
    pub fn is_manual(self) -> bool {
        matches!(self, Kind::SWITCH)
    }

    /// Computes the output from the values on the input slots, with unconnected slots reading as `false`.
    ///
    /// Returns `None` for switches, whose output is never derived.
    pub fn compute(self, inputs: &[bool]) -> Option<bool> {
        let high = inputs.iter().filter(|value| **value).count();
        let first = inputs.first().copied().unwrap_or(false);

        Some(match self {
            Kind::AND => !inputs.is_empty() && high == inputs.len(),
            Kind::OR => high > 0,
            Kind::NOT => !first,
            Kind::XOR => high % 2 == 1,
            Kind::NAND => !(!inputs.is_empty() && high == inputs.len()),
            Kind::NOR => high == 0,
            Kind::XNOR => high % 2 == 0,
            Kind::LED | Kind::NODE => first,
            Kind::SWITCH => return None,
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SW" | "SWITCH" => Ok(Kind::SWITCH),
            _ => Kind::ALL.into_iter().find(|kind| kind.tag() == s).ok_or_else(|| ParseKindError(s.to_string())),
        }
    }
}

/// Where the element sits on the canvas. Opaque to the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 150.0, y: 150.0 }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) name: String,
    kind: Kind,
    pub(crate) output: bool,
    // boxed slice so the number of slots cannot change after creation
    pub(crate) inputs: Box<[Option<ElementKey>]>,
    pub position: Position,
}

impl Element {
    pub(crate) fn new(kind: Kind, name: String, position: Position) -> Self {
        Self { name, kind, output: false, inputs: vec![None; kind.arity()].into_boxed_slice(), position }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub fn inputs(&self) -> &[Option<ElementKey>] {
        &self.inputs
    }

    /// The source feeding `slot`, or `None` if the slot is unconnected or does not exist.
    pub fn input(&self, slot: usize) -> Option<ElementKey> {
        self.inputs.get(slot).copied().flatten()
    }
}
