//! Mixture thermodynamic state and transport properties (viscosity and thermal conductivity) for
//! multi-species gas flows.

mod config;
mod error;
mod fluid_scalar;
mod mixing;
mod species_laws;
mod sweep;

pub use config::{
    ConductivityModel, HeatCapacityModel, MixtureConfig, SpeciesConfig, TurbConductivityModel,
    ViscosityMixing, ViscosityModel, DEFAULT_FIXED_CP, DEFAULT_GAS_CONSTANT, DEFAULT_OPERATING_PRESSURE,
};
pub use error::{ConfigurationError, TransportError, TransportResult};
pub use fluid_scalar::{
    FluidScalar, SpeciesModels, SpeciesVec, TransportState, GAMMA, MAX_INLINE_SPECIES,
    UNIVERSAL_GAS_CONSTANT,
};
pub use mixing::{davidson_viscosity, mass_to_mole_fractions, wilke_mixture, wilke_phi};
pub use species_laws::{ConductivityLaw, SpeciesConductivity, ViscosityLaw, N_POLY_COEFFS};
pub use sweep::evaluate_states;
