use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

use crate::error::ValidationError;
use crate::math::ode::Solver;
use crate::params::SimulationInputs;

/// Upper bounds on the work a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub max_days: u32,
    pub max_substeps: usize,
    pub max_steps: usize,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_days: 36_500,
            max_substeps: 1_000,
            max_steps: 5_000_000,
        }
    }
}

impl RunLimits {
    pub fn check(&self, inputs: &SimulationInputs, solver: &Solver) -> Result<(), ValidationError> {
        fn within(name: &'static str, value: u64, max: u64) -> Result<(), ValidationError> {
            if value > max {
                Err(ValidationError::ExceedsLimit { name, value, max })
            } else {
                Ok(())
            }
        }

        within("days", u64::from(inputs.days), u64::from(self.max_days))?;
        match solver {
            Solver::DormandPrince(s) => within("max_steps", s.max_steps as u64, self.max_steps as u64),
            Solver::Rk4 { substeps } => within("substeps", *substeps as u64, self.max_substeps as u64),
        }
    }
}

/// Settings for the HTTP front end, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When set, every successful run writes a run log here.
    pub run_log_dir: Option<PathBuf>,
    pub limits: RunLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            run_log_dir: None,
            limits: RunLimits::default(),
        }
    }
}

impl ServerConfig {
    /// `HOST`, `PORT`, `SEIR_RUN_LOG_DIR` and `SEIR_MAX_DAYS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
            run_log_dir: lookup("SEIR_RUN_LOG_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            limits: RunLimits {
                max_days: lookup("SEIR_MAX_DAYS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.limits.max_days),
                ..defaults.limits
            },
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid HOST/PORT ({}:{})", self.host, self.port))
    }
}
