//! Turns raw user inputs into the validated parameter set the model runs on.
//!
//! Two input modes are supported. [`InputMode::Direct`] takes beta, sigma and
//! gamma as given. [`InputMode::CrowdDensity`] derives beta from a qualitative
//! crowd-density level and sigma/gamma from latent and recovery periods.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Contact rate used for labels that are not one of the five known levels.
pub const DEFAULT_CONTACT_RATE: f64 = 0.5;

/// Qualitative crowd density, from sparse to overcrowded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdDensity {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl CrowdDensity {
    pub const ALL: [CrowdDensity; 5] = [
        CrowdDensity::VeryLow,
        CrowdDensity::Low,
        CrowdDensity::Moderate,
        CrowdDensity::High,
        CrowdDensity::VeryHigh,
    ];

    /// Label shown in the density selector; also the key accepted by [`map_density`].
    pub fn label(self) -> &'static str {
        match self {
            CrowdDensity::VeryLow => "Very Low (1-2)",
            CrowdDensity::Low => "Low (3-4)",
            CrowdDensity::Moderate => "Moderate (5-6)",
            CrowdDensity::High => "High (7-8)",
            CrowdDensity::VeryHigh => "Very High (9-10)",
        }
    }

    pub fn contact_rate(self) -> f64 {
        match self {
            CrowdDensity::VeryLow => 0.1,
            CrowdDensity::Low => 0.3,
            CrowdDensity::Moderate => 0.5,
            CrowdDensity::High => 0.7,
            CrowdDensity::VeryHigh => 0.9,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CrowdDensity::VeryLow => {
                "Sparse crowd, with significant gaps between individuals. Plenty of personal space."
            }
            CrowdDensity::Low => {
                "A small gathering with more people present, but still with ample personal space."
            }
            CrowdDensity::Moderate => {
                "An average-sized crowd where individuals are closer together, but there is still some personal space."
            }
            CrowdDensity::High => {
                "A dense crowd where personal space is limited, and individuals are in close proximity."
            }
            CrowdDensity::VeryHigh => {
                "Extremely dense crowd, minimal personal space, and potential for discomfort or safety concerns due to overcrowding."
            }
        }
    }

    /// Exact match on the selector label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// Contact rate for a crowd-density label. Unknown labels fall back to
/// [`DEFAULT_CONTACT_RATE`].
pub fn map_density(label: &str) -> f64 {
    CrowdDensity::from_label(label).map_or(DEFAULT_CONTACT_RATE, CrowdDensity::contact_rate)
}

/// How the transmission parameters are supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InputMode {
    Direct {
        beta: f64,
        sigma: f64,
        gamma: f64,
    },
    CrowdDensity {
        /// Selector label, e.g. `"High (7-8)"`.
        crowd_density: String,
        latent_period: f64,
        recovery_period: f64,
    },
}

/// Raw inputs for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub population_size: f64,
    pub initial_infected: f64,
    pub days: u32,
    #[serde(flatten)]
    pub mode: InputMode,
}

/// Validated parameters and initial state for the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParams {
    pub population: f64,
    pub s0: f64,
    pub e0: f64,
    pub i0: f64,
    pub r0: f64,
    pub beta: f64,
    pub sigma: f64,
    pub gamma: f64,
    pub days: u32,
}

impl ResolvedParams {
    /// `[S, E, I, R]` at day 0.
    pub fn initial_state(&self) -> [f64; 4] {
        [self.s0, self.e0, self.i0, self.r0]
    }

    /// `beta / gamma`, undefined when nobody ever recovers.
    pub fn basic_reproduction_number(&self) -> Option<f64> {
        (self.gamma > 0.0).then(|| self.beta / self.gamma)
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NegativeRate { name, value })
    }
}

fn check_period(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::Period { name, value })
    }
}

/// Validate `inputs` and derive the model parameters.
///
/// # Errors
/// Returns a [`ValidationError`] if the population is below 1, the initial
/// infected count is negative or not strictly below the population, `days` is
/// zero, a direct rate is negative, or a period is not positive.
pub fn resolve(inputs: &SimulationInputs) -> Result<ResolvedParams, ValidationError> {
    let n = inputs.population_size;
    let i0 = inputs.initial_infected;

    if !(n.is_finite() && n >= 1.0) {
        return Err(ValidationError::Population(n));
    }
    if !(i0.is_finite() && i0 >= 0.0) {
        return Err(ValidationError::InitialInfected(i0));
    }
    if i0 >= n {
        return Err(ValidationError::InfectedNotBelowPopulation {
            infected: i0,
            population: n,
        });
    }
    if inputs.days == 0 {
        return Err(ValidationError::Days);
    }

    let (beta, sigma, gamma) = match &inputs.mode {
        InputMode::Direct { beta, sigma, gamma } => (
            check_rate("beta", *beta)?,
            check_rate("sigma", *sigma)?,
            check_rate("gamma", *gamma)?,
        ),
        InputMode::CrowdDensity {
            crowd_density,
            latent_period,
            recovery_period,
        } => {
            let latent = check_period("latent period", *latent_period)?;
            let recovery = check_period("recovery period", *recovery_period)?;
            let contact_rate = map_density(crowd_density);
            if CrowdDensity::from_label(crowd_density).is_none() {
                debug!("unknown crowd density {crowd_density:?}, using contact rate {contact_rate}");
            }
            (contact_rate / f64::from(inputs.days), 1.0 / latent, 1.0 / recovery)
        }
    };

    let (e0, r0) = (0.0, 0.0);
    let params = ResolvedParams {
        population: n,
        s0: n - e0 - i0 - r0,
        e0,
        i0,
        r0,
        beta,
        sigma,
        gamma,
        days: inputs.days,
    };
    debug!("resolved parameters: {params:?}");
    Ok(params)
}
