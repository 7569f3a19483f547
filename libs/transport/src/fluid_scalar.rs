use super::config::{
    ConductivityModel, HeatCapacityModel, MixtureConfig, SpeciesConfig, TurbConductivityModel,
    ViscosityMixing, ViscosityModel,
};
use super::mixing::{davidson_viscosity, mass_to_mole_fractions, wilke_mixture};
use super::species_laws::{ConductivityLaw, SpeciesConductivity, ViscosityLaw};
use super::{ConfigurationError, TransportError, TransportResult};
use smallvec::SmallVec;

/// [J/(mol K)]
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.3144598;

/// Ratio `cp / cv` used to derive `cv` from `cp`
pub const GAMMA: f64 = 1.4;

/// Species counts up to this size are stored inline
pub const MAX_INLINE_SPECIES: usize = 4;

pub type SpeciesVec<T> = SmallVec<[T; MAX_INLINE_SPECIES]>;

/// Per-species laws for one transport coefficient, or an external (flamelet) table lookup
#[derive(Clone, Debug, PartialEq)]
pub enum SpeciesModels<L> {
    PerSpecies(SpeciesVec<L>),
    Flamelet,
}

/// Snapshot of the thermodynamic and transport state after a state update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportState {
    pub temperature: f64,
    pub density: f64,
    pub pressure: f64,
    pub cp: f64,
    pub cv: f64,
    pub mean_molecular_weight: f64,
    pub laminar_viscosity: f64,
    pub thermal_conductivity: f64,
}

/// Multi-species mixture fluid model.
///
/// `n_species = n_scalars + 1`: the first `n_scalars` mass fractions are transported and the last
/// species makes up the remainder. Models are selected once at construction and cannot be
/// switched afterwards. Each instance carries mutable per-call state; use one instance per thread.
#[derive(Clone, Debug)]
pub struct FluidScalar {
    n_species: usize,
    /// [g/mol]
    molar_masses: SpeciesVec<f64>,
    specific_heats: SpeciesVec<f64>,
    mass_fractions: SpeciesVec<f64>,
    mole_fractions: SpeciesVec<f64>,
    laminar_viscosity: SpeciesVec<f64>,
    laminar_thermal_conductivity: SpeciesVec<f64>,

    viscosity_laws: SpeciesModels<ViscosityLaw>,
    conductivity_laws: SpeciesModels<SpeciesConductivity>,
    viscosity_mixing: ViscosityMixing,
    heat_capacity: HeatCapacityModel,
    strict: bool,

    pressure: f64,
    /// Specific gas constant from the configuration, carried through for callers. Density uses
    /// [UNIVERSAL_GAS_CONSTANT] and the mean molecular weight.
    gas_constant: f64,
    temperature: f64,
    density: f64,
    cp: f64,
    cv: f64,
    mean_molecular_weight: f64,
    mu: f64,
    mu_turb: f64,
    kt: f64,
}

impl FluidScalar {
    pub fn new(config: &MixtureConfig) -> TransportResult<Self> {
        Self::configure(config).map_err(|err| {
            log::error!("{}", err);
            TransportError::from(err)
        })
    }

    fn configure(config: &MixtureConfig) -> Result<Self, ConfigurationError> {
        let n_species = config.species.len();
        if n_species < 2 {
            return Err(ConfigurationError::TooFewSpecies(n_species));
        }

        if config.strict {
            if let Some((i, sp)) = config
                .species
                .iter()
                .enumerate()
                .find(|(_, sp)| !(sp.molar_mass > 0.0))
            {
                return Err(ConfigurationError::InvalidValue {
                    key: "molar_mass",
                    reason: format!("species {} has non-positive molar mass {}", i, sp.molar_mass),
                });
            }

            if config.species.iter().all(|sp| sp.molar_mass < 1.0) {
                log::warn!("All molar masses are below 1; molar masses are expected in g/mol, not kg/mol");
            }

            if let HeatCapacityModel::Fixed(cp) = config.heat_capacity {
                log::warn!(
                    "Heat capacity is pinned to {} J/(kg K); species specific heats are ignored",
                    cp
                );
            }
        }

        let viscosity_laws = Self::laminar_viscosity_model(config)?;
        let conductivity_laws = Self::thermal_conductivity_model(config)?;

        if viscosity_laws == SpeciesModels::Flamelet && conductivity_laws != SpeciesModels::Flamelet {
            return Err(ConfigurationError::ConductivityNeedsSpeciesViscosity);
        }

        log::info!(
            "Configured {}-species mixture: viscosity {:?} mixed by {:?}, conductivity {:?} (turbulent: {:?}), heat capacity {:?}",
            n_species,
            config.viscosity_model,
            config.viscosity_mixing,
            config.conductivity_model,
            config.turbulent_conductivity_model,
            config.heat_capacity,
        );

        Ok(Self {
            n_species,
            molar_masses: config.species.iter().map(|sp| sp.molar_mass).collect(),
            specific_heats: config.species.iter().map(|sp| sp.cp).collect(),
            mass_fractions: SmallVec::from_elem(0.0, n_species),
            mole_fractions: SmallVec::from_elem(0.0, n_species),
            laminar_viscosity: SmallVec::from_elem(0.0, n_species),
            laminar_thermal_conductivity: SmallVec::from_elem(0.0, n_species),
            viscosity_laws,
            conductivity_laws,
            viscosity_mixing: config.viscosity_mixing,
            heat_capacity: config.heat_capacity,
            strict: config.strict,
            pressure: config.operating_pressure,
            gas_constant: config.gas_constant,
            temperature: 0.0,
            density: 0.0,
            cp: 0.0,
            cv: 0.0,
            mean_molecular_weight: 0.0,
            mu: 0.0,
            mu_turb: 0.0,
            kt: 0.0,
        })
    }

    fn laminar_viscosity_model(config: &MixtureConfig) -> Result<SpeciesModels<ViscosityLaw>, ConfigurationError> {
        let law = |i: usize, sp: &SpeciesConfig| -> Result<ViscosityLaw, ConfigurationError> {
            match config.viscosity_model {
                ViscosityModel::Constant => Ok(ViscosityLaw::Constant {
                    mu: required(i, "mu_constant", sp.mu_constant)?,
                }),
                ViscosityModel::Sutherland => Ok(ViscosityLaw::Sutherland {
                    mu_ref: required(i, "mu_ref", sp.mu_ref)?,
                    t_ref: required(i, "mu_t_ref", sp.mu_t_ref)?,
                    s: required(i, "mu_s", sp.mu_s)?,
                }),
                ViscosityModel::Polynomial => Ok(ViscosityLaw::Polynomial {
                    coeffs: required(i, "mu_poly_coeffs", sp.mu_poly_coeffs)?,
                }),
                ViscosityModel::Flamelet => unreachable!(),
            }
        };

        match config.viscosity_model {
            ViscosityModel::Flamelet => Ok(SpeciesModels::Flamelet),
            _ => Ok(SpeciesModels::PerSpecies(
                config
                    .species
                    .iter()
                    .enumerate()
                    .map(|(i, sp)| law(i, sp))
                    .collect::<Result<_, _>>()?,
            )),
        }
    }

    fn thermal_conductivity_model(
        config: &MixtureConfig,
    ) -> Result<SpeciesModels<SpeciesConductivity>, ConfigurationError> {
        let law = |i: usize, sp: &SpeciesConfig| -> Result<SpeciesConductivity, ConfigurationError> {
            let law = match config.conductivity_model {
                ConductivityModel::Constant => ConductivityLaw::Constant {
                    kt: required(i, "kt_constant", sp.kt_constant)?,
                },
                ConductivityModel::ConstantPrandtl => ConductivityLaw::ConstantPrandtl {
                    pr_lam: required(i, "prandtl_lam", sp.prandtl_lam)?,
                },
                ConductivityModel::Polynomial => ConductivityLaw::Polynomial {
                    coeffs: required(i, "kt_poly_coeffs", sp.kt_poly_coeffs)?,
                },
                ConductivityModel::Flamelet => unreachable!(),
            };
            let pr_turb = match config.turbulent_conductivity_model {
                TurbConductivityModel::ConstantPrandtlTurb => {
                    Some(required(i, "prandtl_turb", sp.prandtl_turb)?)
                }
                TurbConductivityModel::None => None,
            };

            Ok(SpeciesConductivity { law, pr_turb })
        };

        match config.conductivity_model {
            ConductivityModel::Flamelet => Ok(SpeciesModels::Flamelet),
            _ => Ok(SpeciesModels::PerSpecies(
                config
                    .species
                    .iter()
                    .enumerate()
                    .map(|(i, sp)| law(i, sp))
                    .collect::<Result<_, _>>()?,
            )),
        }
    }

    /// Update mass and mole fractions from the transported scalars. Returns the mole fractions.
    pub fn mass_to_mole_fractions(&mut self, scalars: &[f64]) -> TransportResult<&[f64]> {
        self.set_mass_fractions(scalars)?;
        mass_to_mole_fractions(&self.mass_fractions, &self.molar_masses, &mut self.mole_fractions);
        Ok(&self.mole_fractions)
    }

    fn set_mass_fractions(&mut self, scalars: &[f64]) -> TransportResult<()> {
        let n_scalars = self.n_species - 1;
        if scalars.len() != n_scalars {
            return Err(TransportError::ScalarCount {
                expected: n_scalars,
                found: scalars.len(),
            });
        }

        self.mass_fractions[..n_scalars].copy_from_slice(scalars);
        self.mass_fractions[n_scalars] = 1.0 - scalars.iter().sum::<f64>();
        Ok(())
    }

    fn update_species_viscosities(&mut self) -> bool {
        match &self.viscosity_laws {
            SpeciesModels::PerSpecies(laws) => {
                for (mu, law) in self.laminar_viscosity.iter_mut().zip(laws.iter()) {
                    *mu = law.viscosity(self.temperature, self.density);
                }
                true
            }
            SpeciesModels::Flamelet => false,
        }
    }

    /// Mixture viscosity by Wilke's rule at the current state. `None` for a flamelet viscosity model.
    pub fn wilke_viscosity(&mut self) -> Option<f64> {
        if !self.update_species_viscosities() {
            return None;
        }
        Some(wilke_mixture(
            &self.laminar_viscosity,
            &self.laminar_viscosity,
            &self.mole_fractions,
            &self.molar_masses,
        ))
    }

    /// Mixture viscosity by Davidson's rule at the current state. `None` for a flamelet viscosity model.
    pub fn davidson_viscosity(&mut self) -> Option<f64> {
        if !self.update_species_viscosities() {
            return None;
        }
        Some(davidson_viscosity(
            &self.laminar_viscosity,
            &self.mole_fractions,
            &self.molar_masses,
        ))
    }

    /// Mixture conductivity by Wilke's rule at the current state, using the species viscosities of
    /// the latest viscosity evaluation. `None` for a flamelet conductivity model.
    pub fn wilke_conductivity(&mut self) -> Option<f64> {
        match &self.conductivity_laws {
            SpeciesModels::PerSpecies(laws) => {
                for (kt, law) in self.laminar_thermal_conductivity.iter_mut().zip(laws.iter()) {
                    *kt = law.conductivity(self.temperature, self.density, self.mu, self.mu_turb, self.cp);
                }
            }
            SpeciesModels::Flamelet => return None,
        }

        Some(wilke_mixture(
            &self.laminar_thermal_conductivity,
            &self.laminar_viscosity,
            &self.mole_fractions,
            &self.molar_masses,
        ))
    }

    /// Set the thermodynamic state from temperature and the transported mass fractions, then
    /// recompute the mixture viscosity and conductivity.
    ///
    /// In strict mode a rejected update leaves the previous state untouched.
    pub fn set_td_state_t(&mut self, temperature: f64, scalars: &[f64]) -> TransportResult<()> {
        if !self.strict {
            return self.update_state(temperature, scalars);
        }

        self.check_inputs(temperature, scalars)?;
        let previous = self.clone();
        let result = self
            .update_state(temperature, scalars)
            .and_then(|_| self.check_outputs());
        if result.is_err() {
            *self = previous;
        }
        result
    }

    fn update_state(&mut self, temperature: f64, scalars: &[f64]) -> TransportResult<()> {
        self.set_mass_fractions(scalars)?;

        // molar masses are in g/mol
        let inv_mmw: f64 = self
            .mass_fractions
            .iter()
            .zip(self.molar_masses.iter())
            .map(|(y, m)| y / (m / 1000.0))
            .sum();
        self.mean_molecular_weight = 1.0 / inv_mmw;

        self.cp = match self.heat_capacity {
            HeatCapacityModel::Fixed(cp) => cp,
            HeatCapacityModel::MassWeighted => self
                .mass_fractions
                .iter()
                .zip(self.specific_heats.iter())
                .map(|(y, cp)| y * cp)
                .sum(),
        };
        self.cv = self.cp / GAMMA;
        self.temperature = temperature;
        self.density =
            self.pressure / ((self.temperature * UNIVERSAL_GAS_CONSTANT) / self.mean_molecular_weight);

        mass_to_mole_fractions(&self.mass_fractions, &self.molar_masses, &mut self.mole_fractions);

        let mu = match self.viscosity_mixing {
            ViscosityMixing::Wilke => self.wilke_viscosity(),
            ViscosityMixing::Davidson => self.davidson_viscosity(),
        };
        if let Some(mu) = mu {
            self.mu = mu;
        }

        if let Some(kt) = self.wilke_conductivity() {
            self.kt = kt;
        }

        log::trace!(
            "T = {}, rho = {}, mu = {}, kt = {}",
            self.temperature,
            self.density,
            self.mu,
            self.kt
        );

        Ok(())
    }

    fn check_inputs(&self, temperature: f64, scalars: &[f64]) -> TransportResult<()> {
        if !(temperature > 0.0) || !temperature.is_finite() {
            return Err(TransportError::numerical_defect(format!(
                "non-positive or non-finite temperature {}",
                temperature
            )));
        }
        if let Some(y) = scalars.iter().find(|y| !(0.0..=1.0).contains(*y)) {
            return Err(TransportError::numerical_defect(format!(
                "mass fraction {} outside [0, 1]",
                y
            )));
        }
        let sum: f64 = scalars.iter().sum();
        if sum > 1.0 {
            return Err(TransportError::numerical_defect(format!(
                "transported mass fractions sum to {} > 1",
                sum
            )));
        }
        Ok(())
    }

    fn check_outputs(&self) -> TransportResult<()> {
        if let SpeciesModels::PerSpecies(_) = self.viscosity_laws {
            if let Some((i, mu)) = self
                .laminar_viscosity
                .iter()
                .enumerate()
                .find(|(_, mu)| !(**mu > 0.0))
            {
                return Err(TransportError::numerical_defect(format!(
                    "species {} has non-positive viscosity {}",
                    i, mu
                )));
            }
        }

        let outputs = [
            ("density", self.density),
            ("mean molecular weight", self.mean_molecular_weight),
            ("laminar viscosity", self.mu),
            ("thermal conductivity", self.kt),
        ];
        if let Some((name, value)) = outputs.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TransportError::numerical_defect(format!("{} is {}", name, value)));
        }
        Ok(())
    }

    /// Assign the viscosity obtained from an external (flamelet) table
    pub fn set_flamelet_viscosity(&mut self, mu: f64) {
        self.mu = mu;
    }

    /// Assign the conductivity obtained from an external (flamelet) table
    pub fn set_flamelet_conductivity(&mut self, kt: f64) {
        self.kt = kt;
    }

    pub fn set_eddy_viscosity(&mut self, mu_turb: f64) {
        self.mu_turb = mu_turb;
    }

    pub fn set_operating_pressure(&mut self, pressure: f64) {
        self.pressure = pressure;
    }

    pub fn state(&self) -> TransportState {
        TransportState {
            temperature: self.temperature,
            density: self.density,
            pressure: self.pressure,
            cp: self.cp,
            cv: self.cv,
            mean_molecular_weight: self.mean_molecular_weight,
            laminar_viscosity: self.mu,
            thermal_conductivity: self.kt,
        }
    }

    pub fn n_species(&self) -> usize {
        self.n_species
    }
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
    pub fn density(&self) -> f64 {
        self.density
    }
    pub fn pressure(&self) -> f64 {
        self.pressure
    }
    /// Configured specific gas constant; not used by the state update
    pub fn gas_constant(&self) -> f64 {
        self.gas_constant
    }
    pub fn cp(&self) -> f64 {
        self.cp
    }
    pub fn cv(&self) -> f64 {
        self.cv
    }
    pub fn gamma(&self) -> f64 {
        self.cp / self.cv
    }
    pub fn mean_molecular_weight(&self) -> f64 {
        self.mean_molecular_weight
    }
    pub fn laminar_viscosity(&self) -> f64 {
        self.mu
    }
    pub fn eddy_viscosity(&self) -> f64 {
        self.mu_turb
    }
    pub fn thermal_conductivity(&self) -> f64 {
        self.kt
    }
    pub fn mass_fractions(&self) -> &[f64] {
        &self.mass_fractions
    }
    pub fn mole_fractions(&self) -> &[f64] {
        &self.mole_fractions
    }
    pub fn species_viscosities(&self) -> &[f64] {
        &self.laminar_viscosity
    }
    pub fn species_conductivities(&self) -> &[f64] {
        &self.laminar_thermal_conductivity
    }
    pub fn viscosity_mixing(&self) -> ViscosityMixing {
        self.viscosity_mixing
    }
}

fn required<T>(species: usize, key: &'static str, value: Option<T>) -> Result<T, ConfigurationError> {
    value.ok_or(ConfigurationError::MissingParameter { species, key })
}
