use thiserror::Error;

use crate::simulation::ElementKey;

/// Rejected structural changes. The network is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("no element {0:?} in the network")]
    UnknownElement(ElementKey),

    #[error("slot {slot} out of range: '{name}' has {arity} inputs")]
    SlotOutOfRange { name: String, slot: usize, arity: usize },

    #[error("element name '{0}' is already in use")]
    DuplicateName(String),

    #[error("element '{0}' is not a switch")]
    NotASwitch(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown element kind '{0}'")]
pub struct ParseKindError(pub String);

/// Failures while reading a save file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read circuit file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] json::Error),

    #[error("malformed circuit: {0}")]
    Malformed(String),

    #[error(transparent)]
    UnknownKind(#[from] ParseKindError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}
