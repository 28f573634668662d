use log::info;
use ode_solvers::System;
use serde::{Deserialize, Serialize};

use crate::error::{IntegrationError, SimulationError};
use crate::math::ode::{integrate_adaptive, integrate_fixed, linspace, Solver, State};
use crate::params::{resolve, ResolvedParams, SimulationInputs};

/// Index of each compartment in the state vector.
pub const S: usize = 0;
pub const E: usize = 1;
pub const I: usize = 2;
pub const R: usize = 3;

/// Well-mixed, closed-population SEIR with constant rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeirModel {
    pub population: f64,
    pub beta: f64,  // transmission
    pub sigma: f64, // 1/latent period
    pub gamma: f64, // 1/recovery period
}

impl SeirModel {
    pub fn from_params(p: &ResolvedParams) -> Self {
        Self {
            population: p.population,
            beta: p.beta,
            sigma: p.sigma,
            gamma: p.gamma,
        }
    }

    pub fn deriv(&self, _t: f64, y: &[f64], dy: &mut [f64]) {
        let infection = self.beta * y[S] * y[I] / self.population;
        let onset = self.sigma * y[E];
        let recovery = self.gamma * y[I];

        dy[S] = -infection;
        dy[E] = infection - onset;
        dy[I] = onset - recovery;
        dy[R] = recovery;
    }

    /// One `[S, E, I, R]` sample per point of `grid`, starting from `y0` at `grid[0]`.
    pub fn simulate(&self, y0: [f64; 4], grid: &[f64], solver: &Solver) -> Result<Vec<[f64; 4]>, IntegrationError> {
        match solver {
            Solver::DormandPrince(settings) => {
                let traj = integrate_adaptive(*self, State::from(y0), grid, settings)?;
                Ok(traj.iter().map(|y| [y[S], y[E], y[I], y[R]]).collect())
            }
            Solver::Rk4 { substeps } => {
                let rhs = |t: f64, y: &[f64], dy: &mut [f64]| self.deriv(t, y, dy);
                let traj = integrate_fixed(&y0, grid, *substeps, rhs)?;
                Ok(traj.into_iter().map(|y| [y[S], y[E], y[I], y[R]]).collect())
            }
        }
    }
}

impl System<f64, State> for SeirModel {
    fn system(&self, t: f64, y: &State, dy: &mut State) {
        self.deriv(t, y.as_slice(), dy.as_mut_slice());
    }
}

/// Compartment trajectories on the simulation grid. All vectors share one length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub t: Vec<f64>,
    pub susceptible: Vec<f64>,
    pub exposed: Vec<f64>,
    pub infected: Vec<f64>,
    pub recovered: Vec<f64>,
}

impl TimeSeries {
    fn from_samples(t: Vec<f64>, samples: &[[f64; 4]]) -> Self {
        Self {
            t,
            susceptible: samples.iter().map(|y| y[S]).collect(),
            exposed: samples.iter().map(|y| y[E]).collect(),
            infected: samples.iter().map(|y| y[I]).collect(),
            recovered: samples.iter().map(|y| y[R]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// `[S, E, I, R]` at grid index `k`.
    pub fn sample(&self, k: usize) -> Option<[f64; 4]> {
        Some([
            *self.susceptible.get(k)?,
            *self.exposed.get(k)?,
            *self.infected.get(k)?,
            *self.recovered.get(k)?,
        ])
    }

    /// Headline numbers of the run. `None` for an empty series.
    pub fn summary(&self, params: &ResolvedParams) -> Option<Summary> {
        let last = self.len().checked_sub(1)?;
        let (peak_idx, peak) = self
            .infected
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (k, v)| if v > best.1 { (k, v) } else { best });

        Some(Summary {
            peak_infected: peak,
            peak_day: self.t[peak_idx],
            final_susceptible: self.susceptible[last],
            final_recovered: self.recovered[last],
            attack_rate: 1.0 - self.susceptible[last] / params.population,
            basic_reproduction_number: params.basic_reproduction_number(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub peak_infected: f64,
    pub peak_day: f64,
    pub final_susceptible: f64,
    pub final_recovered: f64,
    /// Share of the population that left S by the end of the horizon.
    pub attack_rate: f64,
    pub basic_reproduction_number: Option<f64>,
}

/// Integrate resolved parameters with the default adaptive solver.
pub fn integrate(params: &ResolvedParams) -> Result<TimeSeries, IntegrationError> {
    integrate_with(params, &Solver::default())
}

pub fn integrate_with(params: &ResolvedParams, solver: &Solver) -> Result<TimeSeries, IntegrationError> {
    let days = params.days as usize;
    let grid = linspace(0.0, f64::from(params.days), days);
    let model = SeirModel::from_params(params);

    info!(
        "integrating SEIR: N={} beta={:.6} sigma={:.6} gamma={:.6} days={}",
        params.population, params.beta, params.sigma, params.gamma, params.days
    );
    let samples = model.simulate(params.initial_state(), &grid, solver)?;
    Ok(TimeSeries::from_samples(grid, &samples))
}

/// Resolve then integrate. Invalid inputs never reach the integrator.
pub fn run(inputs: &SimulationInputs, solver: &Solver) -> Result<(ResolvedParams, TimeSeries), SimulationError> {
    let params = resolve(inputs)?;
    let series = integrate_with(&params, solver)?;
    Ok((params, series))
}
