use std::time::Instant;

use seir_spread::{integrate_with, resolve, AdaptiveSettings, InputMode, SimulationInputs, Solver};

fn main() -> anyhow::Result<()> {
    // Long horizon with a fast epidemic to amplify differences
    let inputs = SimulationInputs {
        population_size: 1.0e7,
        initial_infected: 10.0,
        days: 3650,
        mode: InputMode::Direct {
            beta: 0.6,
            sigma: 1.0 / 3.0,
            gamma: 1.0 / 5.0,
        },
    };
    let params = resolve(&inputs)?;

    let adaptive = Solver::DormandPrince(AdaptiveSettings::default());
    let fixed = Solver::Rk4 { substeps: 16 };

    let t_start = Instant::now();
    let traj1 = integrate_with(&params, &adaptive)?;
    let dur1 = t_start.elapsed();

    let t_start2 = Instant::now();
    let traj2 = integrate_with(&params, &fixed)?;
    let dur2 = t_start2.elapsed();

    let max_diff = traj1
        .infected
        .iter()
        .zip(&traj2.infected)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);

    println!("adaptive_ms,rk4_ms,max_abs_diff_infected");
    let a_ms = dur1.as_secs_f64() * 1000.0;
    let r_ms = dur2.as_secs_f64() * 1000.0;
    println!("{:.3},{:.3},{:.6}", a_ms, r_ms, max_diff);

    Ok(())
}
