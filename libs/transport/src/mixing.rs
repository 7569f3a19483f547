//! Mixing rules combining per-species transport properties into mixture properties.
//!
//! All functions take per-species slices of equal length: mole fractions `x`, molar masses `m`
//! and species viscosities `mu`.

/// Exponent of the molar-mass ratio term in Davidson's fluidity model
const DAVIDSON_A: f64 = 0.375;

/// Mole fractions from mass fractions: `x_i = (Y_i / M_i) / Σ (Y_k / M_k)`
pub fn mass_to_mole_fractions(mass_fractions: &[f64], molar_masses: &[f64], mole_fractions: &mut [f64]) {
    let inv_sum: f64 = mass_fractions
        .iter()
        .zip(molar_masses.iter())
        .map(|(y, m)| y / m)
        .sum();

    for ((x, y), m) in mole_fractions
        .iter_mut()
        .zip(mass_fractions.iter())
        .zip(molar_masses.iter())
    {
        *x = (y / m) / inv_sum;
    }
}

/// Wilke's interaction coefficient between species `i` and `j`
#[inline]
pub fn wilke_phi(mu_i: f64, mu_j: f64, m_i: f64, m_j: f64) -> f64 {
    (1.0 + (mu_i / mu_j).sqrt() * (m_j / m_i).powf(0.25)).powi(2) / (8.0 * (1.0 + m_i / m_j)).sqrt()
}

/// Wilke's mixing rule: `Σ_i x_i p_i / Σ_j x_j φ_ij`.
///
/// `property` is the species property being mixed (viscosity or conductivity); the interaction
/// coefficients always use the species viscosities `mu`.
pub fn wilke_mixture(property: &[f64], mu: &[f64], x: &[f64], m: &[f64]) -> f64 {
    let n = property.len();
    let mut mixture = 0.0;

    for i in 0..n {
        let denominator: f64 = (0..n).map(|j| x[j] * wilke_phi(mu[i], mu[j], m[i], m[j])).sum();
        mixture += x[i] * property[i] / denominator;
    }

    mixture
}

/// Davidson's fluidity-based viscosity mixing rule
pub fn davidson_viscosity(mu: &[f64], x: &[f64], m: &[f64]) -> f64 {
    let n = mu.len();

    let denominator: f64 = x.iter().zip(m.iter()).map(|(x, m)| x * m.sqrt()).sum();
    let y: Vec<f64> = x
        .iter()
        .zip(m.iter())
        .map(|(x, m)| x * m.sqrt() / denominator)
        .collect();

    let mut fluidity = 0.0;
    for i in 0..n {
        for j in 0..n {
            let e = 2.0 * m[i].sqrt() * m[j].sqrt() / (m[i] + m[j]);
            fluidity += (y[i] * y[j]) / (mu[i].sqrt() * mu[j].sqrt()) * e.powf(DAVIDSON_A);
        }
    }

    1.0 / fluidity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mole_fractions_sum_to_one() {
        let m = [28.0134, 31.998];
        let mut x = [0.0; 2];
        for k in 0..=100 {
            let y0 = k as f64 / 100.0;
            mass_to_mole_fractions(&[y0, 1.0 - y0], &m, &mut x);
            assert!((x.iter().sum::<f64>() - 1.0).abs() < 1e-10);
            assert!(x.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn mole_fractions_of_light_species_dominate() {
        let mut x = [0.0; 2];
        mass_to_mole_fractions(&[0.5, 0.5], &[2.0, 32.0], &mut x);
        assert!((x[0] - 16.0 / 17.0).abs() < 1e-15);
        assert!((x[1] - 1.0 / 17.0).abs() < 1e-15);
    }

    #[test]
    fn identical_species_reduce_to_species_value() {
        let mu = [1.8e-5, 1.8e-5];
        let m = [28.0, 28.0];
        let x = [0.5, 0.5];

        assert_eq!(wilke_phi(mu[0], mu[1], m[0], m[1]), 1.0);
        assert_eq!(wilke_mixture(&mu, &mu, &x, &m), 1.8e-5);
        assert!((davidson_viscosity(&mu, &x, &m) - 1.8e-5).abs() < 1e-14 * 1.8e-5);

        let x = [0.3, 0.7];
        assert!((wilke_mixture(&mu, &mu, &x, &m) - 1.8e-5).abs() < 1e-14 * 1.8e-5);
        assert!((davidson_viscosity(&mu, &x, &m) - 1.8e-5).abs() < 1e-14 * 1.8e-5);
    }

    #[test]
    fn pure_species_limit() {
        let mu = [1.7e-5, 2.0e-5];
        let m = [28.0, 32.0];

        assert!((wilke_mixture(&mu, &mu, &[1.0, 0.0], &m) - 1.7e-5).abs() < 1e-20);
        assert!((davidson_viscosity(&mu, &[0.0, 1.0], &m) - 2.0e-5).abs() < 1e-18);
    }

    #[test]
    fn mixture_lies_between_species() {
        let mu = [1.7e-5, 2.0e-5];
        let m = [28.0, 32.0];
        let x = [0.4, 0.6];

        for mixed in [wilke_mixture(&mu, &mu, &x, &m), davidson_viscosity(&mu, &x, &m)] {
            assert!(mixed > 1.7e-5 && mixed < 2.0e-5, "{}", mixed);
        }
    }

    #[test]
    fn distinct_species_cross_terms() {
        let mu = [1.7e-5, 2.0e-5];
        let m = [28.0, 32.0];
        let x = [0.4, 0.6];

        let wilke = wilke_mixture(&mu, &mu, &x, &m);
        let davidson = davidson_viscosity(&mu, &x, &m);

        assert!((wilke - 1.879436372066813e-5).abs() < 1e-12 * wilke, "{}", wilke);
        assert!((davidson - 1.876777095800254e-5).abs() < 1e-12 * davidson, "{}", davidson);

        // phi_01 = (1 + sqrt(1.7/2.0) (32/28)^(1/4))^2 / sqrt(8 (1 + 28/32))
        let phi_01 = (1.0 + (0.85_f64).sqrt() * (32.0_f64 / 28.0).powf(0.25)).powi(2) / 15.0_f64.sqrt();
        assert!((wilke_phi(mu[0], mu[1], m[0], m[1]) - phi_01).abs() < 1e-14);
        assert!((wilke_phi(mu[0], mu[1], m[0], m[1]) - 1.0).abs() > 1e-3);
    }

    #[test]
    fn wilke_conductivity_uses_viscosity_coefficients() {
        let mu = [1.7e-5, 2.0e-5];
        let kt = [0.025, 0.027];
        let m = [28.0, 32.0];
        let x = [0.5, 0.5];

        let d0 = x[0] * wilke_phi(mu[0], mu[0], m[0], m[0]) + x[1] * wilke_phi(mu[0], mu[1], m[0], m[1]);
        let d1 = x[0] * wilke_phi(mu[1], mu[0], m[1], m[0]) + x[1] * wilke_phi(mu[1], mu[1], m[1], m[1]);
        let expected = x[0] * kt[0] / d0 + x[1] * kt[1] / d1;

        assert!((wilke_mixture(&kt, &mu, &x, &m) - expected).abs() < 1e-16);
    }
}
