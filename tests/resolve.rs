use approx::assert_relative_eq;

use seir_spread::{map_density, resolve, CrowdDensity, InputMode, SimulationInputs, ValidationError};

fn direct(population_size: f64, initial_infected: f64, days: u32) -> SimulationInputs {
    SimulationInputs {
        population_size,
        initial_infected,
        days,
        mode: InputMode::Direct {
            beta: 0.5,
            sigma: 0.2,
            gamma: 0.1,
        },
    }
}

fn density(label: &str, latent_period: f64, recovery_period: f64) -> SimulationInputs {
    SimulationInputs {
        population_size: 500.0,
        initial_infected: 5.0,
        days: 30,
        mode: InputMode::CrowdDensity {
            crowd_density: label.to_string(),
            latent_period,
            recovery_period,
        },
    }
}

#[test]
fn density_table() {
    assert_eq!(map_density("Very Low (1-2)"), 0.1);
    assert_eq!(map_density("Low (3-4)"), 0.3);
    assert_eq!(map_density("Moderate (5-6)"), 0.5);
    assert_eq!(map_density("High (7-8)"), 0.7);
    assert_eq!(map_density("Very High (9-10)"), 0.9);
}

#[test]
fn unknown_density_defaults_to_moderate() {
    assert_eq!(map_density(""), 0.5);
    assert_eq!(map_density("high (7-8)"), 0.5);
    assert_eq!(map_density("Extreme"), 0.5);
}

#[test]
fn density_labels_round_trip() {
    for d in CrowdDensity::ALL {
        assert_eq!(CrowdDensity::from_label(d.label()), Some(d));
    }
    let rates: Vec<f64> = CrowdDensity::ALL.iter().map(|d| d.contact_rate()).collect();
    assert!(rates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn direct_mode_passes_rates_through() {
    let p = resolve(&direct(1000.0, 10.0, 50)).unwrap();
    assert_eq!(p.initial_state(), [990.0, 0.0, 10.0, 0.0]);
    assert_eq!((p.beta, p.sigma, p.gamma), (0.5, 0.2, 0.1));
    assert_eq!(p.days, 50);
    assert_relative_eq!(p.basic_reproduction_number().unwrap(), 5.0);
}

#[test]
fn density_mode_derives_rates() {
    let p = resolve(&density("High (7-8)", 5.0, 10.0)).unwrap();
    assert_relative_eq!(p.beta, 0.7 / 30.0);
    assert_relative_eq!(p.sigma, 0.2);
    assert_relative_eq!(p.gamma, 0.1);
    assert_eq!(p.initial_state(), [495.0, 0.0, 5.0, 0.0]);
    assert_eq!(p.population, 500.0);
}

#[test]
fn density_mode_unknown_label_uses_default_rate() {
    let p = resolve(&density("Packed", 5.0, 10.0)).unwrap();
    assert_relative_eq!(p.beta, 0.5 / 30.0);
}

#[test]
fn infected_must_be_below_population() {
    let err = resolve(&direct(100.0, 150.0, 10)).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InfectedNotBelowPopulation {
            infected: 150.0,
            population: 100.0
        }
    );
    assert!(err.to_string().contains("must be less than total population"));

    // equality is rejected too
    assert!(matches!(
        resolve(&direct(100.0, 100.0, 10)),
        Err(ValidationError::InfectedNotBelowPopulation { .. })
    ));
    assert!(resolve(&direct(100.0, 99.0, 10)).is_ok());
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert_eq!(resolve(&direct(0.0, 0.0, 10)), Err(ValidationError::Population(0.0)));
    assert!(matches!(resolve(&direct(f64::NAN, 0.0, 10)), Err(ValidationError::Population(_))));
    assert_eq!(resolve(&direct(10.0, -1.0, 10)), Err(ValidationError::InitialInfected(-1.0)));
    assert_eq!(resolve(&direct(10.0, 1.0, 0)), Err(ValidationError::Days));

    assert!(matches!(
        resolve(&density("High (7-8)", 0.0, 10.0)),
        Err(ValidationError::Period { name: "latent period", .. })
    ));
    assert!(matches!(
        resolve(&density("High (7-8)", 5.0, 0.0)),
        Err(ValidationError::Period { name: "recovery period", .. })
    ));

    let negative = SimulationInputs {
        mode: InputMode::Direct {
            beta: 0.5,
            sigma: -0.2,
            gamma: 0.1,
        },
        ..direct(10.0, 1.0, 5)
    };
    assert_eq!(
        resolve(&negative),
        Err(ValidationError::NegativeRate {
            name: "sigma",
            value: -0.2
        })
    );
}

#[test]
fn zero_recovery_rate_has_no_reproduction_number() {
    let inputs = SimulationInputs {
        mode: InputMode::Direct {
            beta: 0.5,
            sigma: 0.2,
            gamma: 0.0,
        },
        ..direct(10.0, 1.0, 5)
    };
    assert_eq!(resolve(&inputs).unwrap().basic_reproduction_number(), None);
}

#[test]
fn inputs_deserialize_from_tagged_json() {
    let inputs: SimulationInputs = serde_json::from_str(
        r#"{"population_size": 500, "initial_infected": 5, "days": 30,
            "mode": "crowd_density", "crowd_density": "High (7-8)",
            "latent_period": 5, "recovery_period": 10}"#,
    )
    .unwrap();
    assert_eq!(inputs, density("High (7-8)", 5.0, 10.0));

    let inputs: SimulationInputs = serde_json::from_str(
        r#"{"population_size": 1000, "initial_infected": 10, "days": 50,
            "mode": "direct", "beta": 0.5, "sigma": 0.2, "gamma": 0.1}"#,
    )
    .unwrap();
    assert_eq!(inputs, direct(1000.0, 10.0, 50));
}

#[test]
fn scenario_file_loads() {
    use seir_spread::io::scenario::load_inputs_json;

    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("scenario.json");
    std::fs::write(
        &path,
        r#"{"population_size": 500, "initial_infected": 5, "days": 30,
            "mode": "crowd_density", "crowd_density": "High (7-8)",
            "latent_period": 5, "recovery_period": 10}"#,
    )
    .unwrap();
    assert_eq!(load_inputs_json(&path).unwrap(), density("High (7-8)", 5.0, 10.0));

    let missing = load_inputs_json(tmp.path().join("nope.json")).unwrap_err();
    assert!(format!("{missing:#}").contains("Failed to open scenario file"));
}
