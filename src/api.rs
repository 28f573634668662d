//! Request handling for the HTTP front end, kept free of the server so it can
//! be exercised directly.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::StatusCode;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::RunLimits;
use crate::error::SimulationError;
use crate::io::run_log::write_run_log;
use crate::math::ode::Solver;
use crate::model::chart::ChartSpec;
use crate::model::seir::{run, Summary, TimeSeries};
use crate::params::{CrowdDensity, ResolvedParams, SimulationInputs};

#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    #[serde(flatten)]
    pub inputs: SimulationInputs,
    #[serde(default)]
    pub solver: Option<Solver>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub return_code: i32,
    pub run_id: String,
    pub params: ResolvedParams,
    pub summary: Option<Summary>,
    pub series: TimeSeries,
    pub chart: ChartSpec,
    pub run_log: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DensityLevel {
    pub label: &'static str,
    pub contact_rate: f64,
    pub description: &'static str,
}

pub fn density_levels() -> Vec<DensityLevel> {
    CrowdDensity::ALL
        .into_iter()
        .map(|d| DensityLevel {
            label: d.label(),
            contact_rate: d.contact_rate(),
            description: d.description(),
        })
        .collect()
}

static RUN_SEQ: AtomicU64 = AtomicU64::new(0);

/// Run one simulation. Invalid or oversize inputs map to 400 with
/// `return_code` 1, integrator failures to 500 with `return_code` 2.
pub fn run_request(
    req: RunRequest,
    limits: &RunLimits,
    run_log_dir: Option<&Path>,
) -> Result<RunResponse, (StatusCode, serde_json::Value)> {
    let solver = req.solver.unwrap_or_default();
    limits.check(&req.inputs, &solver).map_err(|v| {
        info!("rejected oversize simulation request: {v}");
        (StatusCode::BAD_REQUEST, json!({"return_code": 1, "error": v.to_string()}))
    })?;
    let (params, series) = run(&req.inputs, &solver).map_err(|e| match e {
        SimulationError::Validation(v) => {
            info!("rejected simulation request: {v}");
            (StatusCode::BAD_REQUEST, json!({"return_code": 1, "error": v.to_string()}))
        }
        SimulationError::Integration(i) => {
            warn!("simulation failed: {i}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"return_code": 2, "error": i.to_string()}),
            )
        }
    })?;

    let seq = RUN_SEQ.fetch_add(1, Ordering::Relaxed);
    let run_id = format!("{}-{}-{}", params.days, now_millis(), seq);
    let run_log = match run_log_dir {
        Some(dir) => {
            let path = write_run_log(dir, &run_id, &params, &series).map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"return_code": 2, "error": format!("failed to write run log: {e:#}")}),
                )
            })?;
            Some(path.display().to_string())
        }
        None => None,
    };

    Ok(RunResponse {
        return_code: 0,
        run_id,
        summary: series.summary(&params),
        params,
        series,
        chart: ChartSpec::seir(),
        run_log,
    })
}

fn now_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
