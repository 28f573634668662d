use ode_solvers::dop_shared::{IntegrationError as SolverError, OutputType};
use ode_solvers::dopri5::Dopri5;
use ode_solvers::{System, Vector4};
use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;

/// State vector handed to the adaptive solver.
pub type State = Vector4<f64>;

// Hairer's DOPRI5 controller defaults.
const SAFETY: f64 = 0.9;
const BETA: f64 = 0.04;
const FAC_MIN: f64 = 0.2;
const FAC_MAX: f64 = 10.0;
const N_STIFF: u32 = 1000;

/// `n` evenly spaced points over `[start, end]`, both endpoints included.
/// A single point yields `[start]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|k| start + step * k as f64).collect();
            // pin the endpoint so accumulated rounding never overshoots the horizon
            out[n - 1] = end;
            out
        }
    }
}

/// Error-control settings for [`integrate_adaptive`]. The defaults match the
/// tolerances of LSODA-style `odeint` solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveSettings {
    pub rtol: f64,
    pub atol: f64,
    pub max_steps: usize,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            rtol: 1.49012e-8,
            atol: 1.49012e-8,
            max_steps: 500_000,
        }
    }
}

/// Which integrator drives a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Solver {
    /// Dormand-Prince 5(4) with step-size control.
    DormandPrince(AdaptiveSettings),
    /// Classical RK4 with a fixed number of substeps per output interval.
    Rk4 { substeps: usize },
}

impl Default for Solver {
    fn default() -> Self {
        Solver::DormandPrince(AdaptiveSettings::default())
    }
}

/// Workspace for allocation-free RK4 steps
pub struct Rk4Workspace {
    pub k1: Vec<f64>,
    pub k2: Vec<f64>,
    pub k3: Vec<f64>,
    pub k4: Vec<f64>,
    pub ytmp: Vec<f64>,
}

impl Rk4Workspace {
    pub fn new(n: usize) -> Self {
        Self {
            k1: vec![0.0; n],
            k2: vec![0.0; n],
            k3: vec![0.0; n],
            k4: vec![0.0; n],
            ytmp: vec![0.0; n],
        }
    }

    pub fn resize(&mut self, n: usize) {
        if self.k1.len() != n {
            self.k1.resize(n, 0.0);
            self.k2.resize(n, 0.0);
            self.k3.resize(n, 0.0);
            self.k4.resize(n, 0.0);
            self.ytmp.resize(n, 0.0);
        }
    }
}

/// Fixed-step RK4 using preallocated workspace to avoid allocations per step.
pub fn rk4_step_ws<F>(y: &mut [f64], t: f64, dt: f64, ws: &mut Rk4Workspace, mut f: F)
where
    F: FnMut(f64, &[f64], &mut [f64]),
{
    let n = y.len();
    ws.resize(n);

    let (k1, k2, k3, k4, ytmp) = (&mut ws.k1, &mut ws.k2, &mut ws.k3, &mut ws.k4, &mut ws.ytmp);

    f(t, y, k1);

    for i in 0..n {
        ytmp[i] = y[i] + 0.5 * dt * k1[i];
    }
    f(t + 0.5 * dt, ytmp, k2);

    for i in 0..n {
        ytmp[i] = y[i] + 0.5 * dt * k2[i];
    }
    f(t + 0.5 * dt, ytmp, k3);

    for i in 0..n {
        ytmp[i] = y[i] + dt * k3[i];
    }
    f(t + dt, ytmp, k4);

    for i in 0..n {
        y[i] += (dt / 6.0) * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }
}

/// Integrate with fixed-step RK4, taking `substeps` equal steps between
/// consecutive grid points. Returns one state per grid point; the first is `y0`.
pub fn integrate_fixed<F>(
    y0: &[f64],
    grid: &[f64],
    substeps: usize,
    mut f: F,
) -> Result<Vec<Vec<f64>>, IntegrationError>
where
    F: FnMut(f64, &[f64], &mut [f64]),
{
    let Some(&t0) = grid.first() else {
        return Ok(Vec::new());
    };
    let substeps = substeps.max(1);
    let mut ws = Rk4Workspace::new(y0.len());
    let mut y = y0.to_vec();
    let mut t = t0;

    let mut out = Vec::with_capacity(grid.len());
    out.push(y.clone());
    for &t_out in &grid[1..] {
        let dt = (t_out - t) / substeps as f64;
        for k in 0..substeps {
            rk4_step_ws(&mut y, t + dt * k as f64, dt, &mut ws, &mut f);
        }
        t = t_out;
        if !all_finite(&y) {
            return Err(IntegrationError::NonFinite { t });
        }
        out.push(y.clone());
    }
    Ok(out)
}

fn all_finite(y: &[f64]) -> bool {
    y.iter().all(|v| v.is_finite())
}

/// Integrate `system` with Dormand-Prince 5(4), restarting the stepper on
/// every grid interval so each sample lands on its grid point. Returns one
/// state per grid point; the first is `y0` unchanged. `max_steps` bounds the
/// accepted plus rejected steps of the whole run.
pub fn integrate_adaptive<S>(
    system: S,
    y0: State,
    grid: &[f64],
    settings: &AdaptiveSettings,
) -> Result<Vec<State>, IntegrationError>
where
    S: System<f64, State> + Clone,
{
    let Some(&t0) = grid.first() else {
        return Ok(Vec::new());
    };

    let mut dy = State::zeros();
    system.system(t0, &y0, &mut dy);
    if !all_finite(y0.as_slice()) || !all_finite(dy.as_slice()) {
        return Err(IntegrationError::NonFinite { t: t0 });
    }

    let mut out = Vec::with_capacity(grid.len());
    out.push(y0);

    let mut y = y0;
    let mut t = t0;
    let mut remaining = settings.max_steps;
    for &t_out in &grid[1..] {
        if remaining == 0 {
            return Err(IntegrationError::StepLimit {
                t,
                max_steps: settings.max_steps,
            });
        }
        let span = t_out - t;
        let mut stepper = Dopri5::from_param(
            system.clone(),
            t,
            t_out,
            span,
            y,
            settings.rtol,
            settings.atol,
            SAFETY,
            BETA,
            FAC_MIN,
            FAC_MAX,
            span,
            0.0, // pick the first step automatically
            u32::try_from(remaining).unwrap_or(u32::MAX),
            N_STIFF,
            OutputType::Sparse,
        );
        let stats = stepper.integrate().map_err(|e| match e {
            SolverError::MaxNumStepReached { .. } => IntegrationError::StepLimit {
                t,
                max_steps: settings.max_steps,
            },
            SolverError::StepSizeUnderflow { .. } => IntegrationError::StepSizeUnderflow { t },
            SolverError::StiffnessDetected { .. } => IntegrationError::Stiff { t },
        })?;
        let used = stats.accepted_steps as usize + stats.rejected_steps as usize;
        remaining = remaining.saturating_sub(used);

        y = *stepper
            .y_out()
            .last()
            .ok_or(IntegrationError::NonFinite { t })?;
        t = t_out;
        if !all_finite(y.as_slice()) {
            return Err(IntegrationError::NonFinite { t });
        }
        out.push(y);
    }
    Ok(out)
}
