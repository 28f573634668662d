pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod model;
pub mod params;

pub use error::{IntegrationError, SimulationError, ValidationError};
pub use math::ode::{AdaptiveSettings, Solver};
pub use model::chart::{ChartSpec, Compartment};
pub use model::seir::{integrate, integrate_with, run, SeirModel, Summary, TimeSeries};
pub use params::{map_density, resolve, CrowdDensity, InputMode, ResolvedParams, SimulationInputs};
