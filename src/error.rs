use thiserror::Error;

/// Rejected user input. Raised by the resolver before any integration happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("population size must be a finite number >= 1 (got {0})")]
    Population(f64),

    #[error("initial infected must be a finite number >= 0 (got {0})")]
    InitialInfected(f64),

    #[error("initial infected ({infected}) must be less than total population ({population})")]
    InfectedNotBelowPopulation { infected: f64, population: f64 },

    #[error("simulation must run for at least 1 day")]
    Days,

    #[error("{name} must be a finite rate >= 0 (got {value})")]
    NegativeRate { name: &'static str, value: f64 },

    #[error("{name} must be a finite number of days > 0 (got {value})")]
    Period { name: &'static str, value: f64 },

    #[error("{name} of {value} exceeds the limit of {max}")]
    ExceedsLimit { name: &'static str, value: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("state became non-finite at t={t}")]
    NonFinite { t: f64 },

    #[error("step size underflow in the interval starting at t={t}")]
    StepSizeUnderflow { t: f64 },

    #[error("problem became stiff in the interval starting at t={t}")]
    Stiff { t: f64 },

    #[error("exceeded {max_steps} steps (stopped in the interval starting at t={t})")]
    StepLimit { t: f64, max_steps: usize },
}

/// Either stage of the resolve -> integrate pipeline can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationError),
}
