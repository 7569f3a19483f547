use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

/// Invalid or unsupported model setup. Fatal: the run should be aborted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Unknown {key} '{value}'")]
    UnknownModel { key: &'static str, value: String },

    #[error("Required key '{0}' is missing")]
    MissingKey(&'static str),

    #[error("Species {species} is missing parameter '{key}' required by the selected model")]
    MissingParameter { species: usize, key: &'static str },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("A mixture needs at least 2 species; found {0}")]
    TooFewSpecies(usize),

    #[error("Wilke conductivity mixing needs per-species viscosities; cannot combine it with a flamelet viscosity model")]
    ConductivityNeedsSpeciesViscosity,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Expected {expected} transported scalars; found {found}")]
    ScalarCount { expected: usize, found: usize },

    /// Only reported in strict mode
    #[error("Numerical defect: {0}")]
    NumericalDefect(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Unable to parse configuration as JSON: {0}")]
    Json(#[from] json::Error),
}

impl TransportError {
    pub fn numerical_defect(msg: impl Into<String>) -> Self {
        Self::NumericalDefect(msg.into())
    }
}
