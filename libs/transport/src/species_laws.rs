/// Number of coefficients of the polynomial (in temperature) viscosity and conductivity laws
pub const N_POLY_COEFFS: usize = 5;

/// Laminar viscosity law of a single species
#[derive(Clone, Debug, PartialEq)]
pub enum ViscosityLaw {
    Constant { mu: f64 },
    /// `mu = mu_ref (T / t_ref)^(3/2) (t_ref + s) / (T + s)`
    Sutherland { mu_ref: f64, t_ref: f64, s: f64 },
    /// `mu = Σ b_i T^i`
    Polynomial { coeffs: [f64; N_POLY_COEFFS] },
}

impl ViscosityLaw {
    pub fn viscosity(&self, temperature: f64, _density: f64) -> f64 {
        match self {
            Self::Constant { mu } => *mu,
            Self::Sutherland { mu_ref, t_ref, s } => {
                mu_ref * (temperature / t_ref).powf(1.5) * (t_ref + s) / (temperature + s)
            }
            Self::Polynomial { coeffs } => horner(coeffs, temperature),
        }
    }
}

/// Laminar thermal conductivity law of a single species
#[derive(Clone, Debug, PartialEq)]
pub enum ConductivityLaw {
    Constant { kt: f64 },
    /// `kt = mu cp / pr_lam`
    ConstantPrandtl { pr_lam: f64 },
    /// `kt = Σ c_i T^i`
    Polynomial { coeffs: [f64; N_POLY_COEFFS] },
}

/// Thermal conductivity of a single species, optionally including the turbulent contribution
/// `cp mu_turb / pr_turb`
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesConductivity {
    pub law: ConductivityLaw,
    pub pr_turb: Option<f64>,
}

impl SpeciesConductivity {
    pub fn conductivity(&self, temperature: f64, _density: f64, mu_lam: f64, mu_turb: f64, cp: f64) -> f64 {
        let laminar = match &self.law {
            ConductivityLaw::Constant { kt } => *kt,
            ConductivityLaw::ConstantPrandtl { pr_lam } => mu_lam * cp / pr_lam,
            ConductivityLaw::Polynomial { coeffs } => horner(coeffs, temperature),
        };

        match self.pr_turb {
            Some(pr_turb) => laminar + cp * mu_turb / pr_turb,
            None => laminar,
        }
    }
}

fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
