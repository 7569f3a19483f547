use super::species_laws::N_POLY_COEFFS;
use super::{ConfigurationError, TransportError, TransportResult};
use json::JsonValue;
use std::fs::read_to_string;

/// Heat capacity used when no species-weighted value is requested [J/(kg K)]
pub const DEFAULT_FIXED_CP: f64 = 1009.39;

/// Specific gas constant of air [J/(kg K)]
pub const DEFAULT_GAS_CONSTANT: f64 = 287.058;

/// Operating pressure [Pa]
pub const DEFAULT_OPERATING_PRESSURE: f64 = 101325.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViscosityModel {
    Constant,
    Sutherland,
    Polynomial,
    /// Viscosity is looked up externally and assigned with `set_flamelet_viscosity`
    Flamelet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConductivityModel {
    Constant,
    ConstantPrandtl,
    Polynomial,
    /// Conductivity is looked up externally and assigned with `set_flamelet_conductivity`
    Flamelet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurbConductivityModel {
    None,
    ConstantPrandtlTurb,
}

/// Rule used to combine species viscosities into the mixture viscosity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViscosityMixing {
    Wilke,
    Davidson,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeatCapacityModel {
    /// A single pinned value, independent of composition
    Fixed(f64),
    /// `cp = Σ Y_i cp_i`
    MassWeighted,
}

impl Default for HeatCapacityModel {
    fn default() -> Self {
        Self::Fixed(DEFAULT_FIXED_CP)
    }
}

/// Physical constants and law parameters of a single species.
///
/// Only the parameters required by the selected models need to be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeciesConfig {
    /// [g/mol]
    pub molar_mass: f64,
    /// [J/(kg K)]
    pub cp: f64,
    pub mu_constant: Option<f64>,
    pub mu_ref: Option<f64>,
    pub mu_t_ref: Option<f64>,
    pub mu_s: Option<f64>,
    pub mu_poly_coeffs: Option<[f64; N_POLY_COEFFS]>,
    pub kt_constant: Option<f64>,
    pub prandtl_lam: Option<f64>,
    pub prandtl_turb: Option<f64>,
    pub kt_poly_coeffs: Option<[f64; N_POLY_COEFFS]>,
}

impl SpeciesConfig {
    pub fn new(molar_mass: f64, cp: f64) -> Self {
        Self {
            molar_mass,
            cp,
            ..Default::default()
        }
    }

    pub fn with_constant_viscosity(mut self, mu: f64) -> Self {
        self.mu_constant = Some(mu);
        self
    }

    pub fn with_sutherland(mut self, mu_ref: f64, t_ref: f64, s: f64) -> Self {
        self.mu_ref = Some(mu_ref);
        self.mu_t_ref = Some(t_ref);
        self.mu_s = Some(s);
        self
    }

    pub fn with_viscosity_polynomial(mut self, coeffs: [f64; N_POLY_COEFFS]) -> Self {
        self.mu_poly_coeffs = Some(coeffs);
        self
    }

    pub fn with_constant_conductivity(mut self, kt: f64) -> Self {
        self.kt_constant = Some(kt);
        self
    }

    pub fn with_prandtl(mut self, prandtl_lam: f64, prandtl_turb: f64) -> Self {
        self.prandtl_lam = Some(prandtl_lam);
        self.prandtl_turb = Some(prandtl_turb);
        self
    }

    pub fn with_conductivity_polynomial(mut self, coeffs: [f64; N_POLY_COEFFS]) -> Self {
        self.kt_poly_coeffs = Some(coeffs);
        self
    }
}

/// Everything needed to build a [crate::FluidScalar]
#[derive(Clone, Debug, PartialEq)]
pub struct MixtureConfig {
    pub operating_pressure: f64,
    pub gas_constant: f64,
    pub viscosity_model: ViscosityModel,
    pub conductivity_model: ConductivityModel,
    pub turbulent_conductivity_model: TurbConductivityModel,
    pub viscosity_mixing: ViscosityMixing,
    pub heat_capacity: HeatCapacityModel,
    /// Report latent numerical defects instead of silently propagating them
    pub strict: bool,
    pub species: Vec<SpeciesConfig>,
}

impl MixtureConfig {
    pub fn new(viscosity_mixing: ViscosityMixing, species: Vec<SpeciesConfig>) -> Self {
        Self {
            operating_pressure: DEFAULT_OPERATING_PRESSURE,
            gas_constant: DEFAULT_GAS_CONSTANT,
            viscosity_model: ViscosityModel::Sutherland,
            conductivity_model: ConductivityModel::ConstantPrandtl,
            turbulent_conductivity_model: TurbConductivityModel::None,
            viscosity_mixing,
            heat_capacity: HeatCapacityModel::default(),
            strict: false,
            species,
        }
    }

    pub fn with_models(mut self, viscosity: ViscosityModel, conductivity: ConductivityModel) -> Self {
        self.viscosity_model = viscosity;
        self.conductivity_model = conductivity;
        self
    }

    pub fn with_turbulent_conductivity(mut self, model: TurbConductivityModel) -> Self {
        self.turbulent_conductivity_model = model;
        self
    }

    pub fn with_operating_pressure(mut self, pressure: f64) -> Self {
        self.operating_pressure = pressure;
        self
    }

    pub fn with_heat_capacity(mut self, model: HeatCapacityModel) -> Self {
        self.heat_capacity = model;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a configuration file.
    ///
    /// ```text
    /// {
    ///     "operating_pressure": 101325.0,
    ///     "gas_constant": 287.058,
    ///     "viscosity_mixing": "davidson",
    ///     "viscosity_model": "sutherland",
    ///     "conductivity_model": "constant_prandtl",
    ///     "turbulent_conductivity_model": "none",
    ///     "heat_capacity": { "fixed": 1009.39 },
    ///     "strict": false,
    ///     "species": [
    ///         { "molar_mass": 28.0134, "cp": 1040.0, "mu_ref": 1.716e-5, "mu_t_ref": 273.15, "mu_s": 110.4, "prandtl_lam": 0.72 },
    ///         { "molar_mass": 31.998, "cp": 918.0, "mu_ref": 1.919e-5, "mu_t_ref": 273.15, "mu_s": 139.0, "prandtl_lam": 0.72 }
    ///     ]
    /// }
    /// ```
    ///
    /// `viscosity_mixing` and `species` are required; everything else falls back to the defaults of [MixtureConfig::new].
    pub fn from_file(path: impl AsRef<str>) -> TransportResult<Self> {
        let contents = read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> TransportResult<Self> {
        let parsed = json::parse(contents)?;
        Self::from_json(&parsed).map_err(|err| {
            log::error!("{}", err);
            TransportError::from(err)
        })
    }

    fn from_json(value: &JsonValue) -> Result<Self, ConfigurationError> {
        let viscosity_mixing = match value["viscosity_mixing"].as_str() {
            Some("wilke") => ViscosityMixing::Wilke,
            Some("davidson") => ViscosityMixing::Davidson,
            Some(other) => return Err(unknown("viscosity_mixing", other)),
            None => return Err(ConfigurationError::MissingKey("viscosity_mixing")),
        };

        if !value["species"].is_array() {
            return Err(ConfigurationError::MissingKey("species"));
        }
        let species = value["species"]
            .members()
            .map(parse_species)
            .collect::<Result<Vec<_>, _>>()?;

        let mut config = Self::new(viscosity_mixing, species);

        if let Some(pressure) = optional_f64(value, "operating_pressure")? {
            config.operating_pressure = pressure;
        }
        if let Some(gas_constant) = optional_f64(value, "gas_constant")? {
            config.gas_constant = gas_constant;
        }

        if let Some(model) = value["viscosity_model"].as_str() {
            config.viscosity_model = match model {
                "constant" => ViscosityModel::Constant,
                "sutherland" => ViscosityModel::Sutherland,
                "polynomial" => ViscosityModel::Polynomial,
                "flamelet" => ViscosityModel::Flamelet,
                other => return Err(unknown("viscosity_model", other)),
            };
        }

        if let Some(model) = value["conductivity_model"].as_str() {
            config.conductivity_model = match model {
                "constant" => ConductivityModel::Constant,
                "constant_prandtl" => ConductivityModel::ConstantPrandtl,
                "polynomial" => ConductivityModel::Polynomial,
                "flamelet" => ConductivityModel::Flamelet,
                other => return Err(unknown("conductivity_model", other)),
            };
        }

        if let Some(model) = value["turbulent_conductivity_model"].as_str() {
            config.turbulent_conductivity_model = match model {
                "none" => TurbConductivityModel::None,
                "constant_prandtl_turb" => TurbConductivityModel::ConstantPrandtlTurb,
                other => return Err(unknown("turbulent_conductivity_model", other)),
            };
        }

        let heat_capacity = &value["heat_capacity"];
        if let Some(model) = heat_capacity.as_str() {
            match model {
                "mass_weighted" => config.heat_capacity = HeatCapacityModel::MassWeighted,
                other => return Err(unknown("heat_capacity", other)),
            }
        } else if heat_capacity.is_object() {
            match heat_capacity["fixed"].as_f64() {
                Some(cp) => config.heat_capacity = HeatCapacityModel::Fixed(cp),
                None => return Err(ConfigurationError::MissingKey("heat_capacity.fixed")),
            }
        } else if !heat_capacity.is_null() {
            return Err(invalid("heat_capacity", "expected \"mass_weighted\" or {\"fixed\": <cp>}"));
        }

        if !value["strict"].is_null() {
            config.strict = value["strict"]
                .as_bool()
                .ok_or_else(|| invalid("strict", "expected a boolean"))?;
        }

        Ok(config)
    }
}

fn parse_species(value: &JsonValue) -> Result<SpeciesConfig, ConfigurationError> {
    Ok(SpeciesConfig {
        molar_mass: optional_f64(value, "molar_mass")?
            .ok_or(ConfigurationError::MissingKey("molar_mass"))?,
        cp: optional_f64(value, "cp")?.ok_or(ConfigurationError::MissingKey("cp"))?,
        mu_constant: optional_f64(value, "mu_constant")?,
        mu_ref: optional_f64(value, "mu_ref")?,
        mu_t_ref: optional_f64(value, "mu_t_ref")?,
        mu_s: optional_f64(value, "mu_s")?,
        mu_poly_coeffs: optional_coeffs(value, "mu_poly_coeffs")?,
        kt_constant: optional_f64(value, "kt_constant")?,
        prandtl_lam: optional_f64(value, "prandtl_lam")?,
        prandtl_turb: optional_f64(value, "prandtl_turb")?,
        kt_poly_coeffs: optional_coeffs(value, "kt_poly_coeffs")?,
    })
}

fn optional_f64(value: &JsonValue, key: &'static str) -> Result<Option<f64>, ConfigurationError> {
    let entry = &value[key];
    if entry.is_null() {
        Ok(None)
    } else {
        entry
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(key, "expected a number"))
    }
}

/// Up to [N_POLY_COEFFS] coefficients, lowest order first; missing high-order terms are zero
fn optional_coeffs(
    value: &JsonValue,
    key: &'static str,
) -> Result<Option<[f64; N_POLY_COEFFS]>, ConfigurationError> {
    let entry = &value[key];
    if entry.is_null() {
        return Ok(None);
    }
    if !entry.is_array() || entry.len() > N_POLY_COEFFS {
        return Err(invalid(key, &format!("expected an array of at most {} numbers", N_POLY_COEFFS)));
    }

    let mut coeffs = [0.0; N_POLY_COEFFS];
    for (c, member) in coeffs.iter_mut().zip(entry.members()) {
        *c = member.as_f64().ok_or_else(|| invalid(key, "expected a number"))?;
    }
    Ok(Some(coeffs))
}

fn unknown(key: &'static str, value: &str) -> ConfigurationError {
    ConfigurationError::UnknownModel {
        key,
        value: value.to_string(),
    }
}

fn invalid(key: &'static str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        key,
        reason: reason.to_string(),
    }
}
