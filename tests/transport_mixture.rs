extern crate fem_kernels;

use fem_kernels::transport::{
    davidson_viscosity, ConductivityModel, HeatCapacityModel, TransportError, ViscosityModel, DEFAULT_FIXED_CP,
    UNIVERSAL_GAS_CONSTANT,
};
use fem_kernels::{evaluate_states, FluidScalar, MixtureConfig, SpeciesConfig, ViscosityMixing};

fn nitrogen_oxygen(mixing: ViscosityMixing) -> MixtureConfig {
    MixtureConfig::new(
        mixing,
        vec![
            SpeciesConfig::new(28.0, 1040.0)
                .with_sutherland(1.716e-5, 273.15, 110.4)
                .with_prandtl(0.72, 0.9),
            SpeciesConfig::new(32.0, 918.0)
                .with_sutherland(1.716e-5, 273.15, 110.4)
                .with_prandtl(0.72, 0.9),
        ],
    )
}

#[test]
fn equal_mass_fractions_at_300_k() {
    let mut fluid = FluidScalar::new(&nitrogen_oxygen(ViscosityMixing::Davidson)).unwrap();
    fluid.set_td_state_t(300.0, &[0.5]).unwrap();

    let mu_300 = 1.716e-5 * (300.0_f64 / 273.15).powf(1.5) * (273.15 + 110.4) / (300.0 + 110.4);
    for mu in fluid.species_viscosities() {
        assert!((mu - mu_300).abs() < 1e-12 * mu_300);
    }
    let mixed = davidson_viscosity(&[mu_300, mu_300], fluid.mole_fractions(), &[28.0, 32.0]);
    assert!((fluid.laminar_viscosity() - mixed).abs() < 1e-12 * mixed);

    let mmw = 1.0 / (0.5 / 0.028 + 0.5 / 0.032);
    let rho = 101325.0 / (300.0 * UNIVERSAL_GAS_CONSTANT / mmw);
    assert!((fluid.density() - rho).abs() < 1e-12 * rho);
    assert_eq!(fluid.cp(), DEFAULT_FIXED_CP);

    let first = fluid.state();
    fluid.set_td_state_t(300.0, &[0.5]).unwrap();
    assert_eq!(fluid.state(), first);
    assert_eq!(fluid.density().to_bits(), first.density.to_bits());
    assert_eq!(fluid.laminar_viscosity().to_bits(), first.laminar_viscosity.to_bits());
    assert_eq!(fluid.thermal_conductivity().to_bits(), first.thermal_conductivity.to_bits());
}

#[test]
fn mole_fractions_sum_to_one() {
    let mut fluid = FluidScalar::new(&nitrogen_oxygen(ViscosityMixing::Wilke)).unwrap();
    for k in 0..=20 {
        let y = k as f64 / 20.0;
        let x = fluid.mass_to_mole_fractions(&[y]).unwrap();
        assert!((x.iter().sum::<f64>() - 1.0).abs() < 1e-10);
    }
}

#[test]
fn mass_weighted_cp_follows_composition() {
    let config = nitrogen_oxygen(ViscosityMixing::Wilke).with_heat_capacity(HeatCapacityModel::MassWeighted);
    let mut fluid = FluidScalar::new(&config).unwrap();

    fluid.set_td_state_t(300.0, &[1.0]).unwrap();
    assert!((fluid.cp() - 1040.0).abs() < 1e-12);
    fluid.set_td_state_t(300.0, &[0.0]).unwrap();
    assert!((fluid.cp() - 918.0).abs() < 1e-12);
}

#[test]
fn flamelet_values_pass_through() {
    let config = nitrogen_oxygen(ViscosityMixing::Wilke).with_models(ViscosityModel::Flamelet, ConductivityModel::Flamelet);
    let mut fluid = FluidScalar::new(&config).unwrap();
    fluid.set_flamelet_viscosity(3e-5);
    fluid.set_flamelet_conductivity(0.04);
    fluid.set_td_state_t(1200.0, &[0.2]).unwrap();

    assert_eq!(fluid.laminar_viscosity(), 3e-5);
    assert_eq!(fluid.thermal_conductivity(), 0.04);
    assert!(fluid.density() > 0.0);
}

#[test]
fn wrong_scalar_count() {
    let mut fluid = FluidScalar::new(&nitrogen_oxygen(ViscosityMixing::Wilke)).unwrap();
    assert!(matches!(
        fluid.set_td_state_t(300.0, &[]),
        Err(TransportError::ScalarCount { expected: 1, found: 0 })
    ));
}

#[test]
fn strict_mode_flags_bad_state() {
    let config = nitrogen_oxygen(ViscosityMixing::Wilke).strict(true);
    let mut fluid = FluidScalar::new(&config).unwrap();
    assert!(matches!(
        fluid.set_td_state_t(0.0, &[0.5]),
        Err(TransportError::NumericalDefect(_))
    ));
    assert!(matches!(
        fluid.set_td_state_t(300.0, &[-0.1]),
        Err(TransportError::NumericalDefect(_))
    ));
}

#[test]
fn config_from_json_drives_the_model() {
    let config = MixtureConfig::from_json_str(
        r#"{
            "viscosity_mixing": "davidson",
            "heat_capacity": "mass_weighted",
            "species": [
                { "molar_mass": 28.0, "cp": 1040.0, "mu_ref": 1.716e-5, "mu_t_ref": 273.15, "mu_s": 110.4, "prandtl_lam": 0.72 },
                { "molar_mass": 32.0, "cp": 918.0, "mu_ref": 1.716e-5, "mu_t_ref": 273.15, "mu_s": 110.4, "prandtl_lam": 0.72 }
            ]
        }"#,
    )
    .unwrap();

    let mut fluid = FluidScalar::new(&config).unwrap();
    fluid.set_td_state_t(300.0, &[0.5]).unwrap();
    assert!((fluid.cp() - 979.0).abs() < 1e-12);
}

#[test]
fn sweep_preserves_order() {
    let model = FluidScalar::new(&nitrogen_oxygen(ViscosityMixing::Davidson)).unwrap();
    let points: Vec<(f64, Vec<f64>)> = (0..64).map(|i| (300.0 + i as f64, vec![0.5])).collect();

    let states = evaluate_states(&model, &points);
    assert_eq!(states.len(), points.len());
    for (state, (temperature, _)) in states.iter().zip(points.iter()) {
        assert_eq!(state.as_ref().unwrap().temperature, *temperature);
    }
}
