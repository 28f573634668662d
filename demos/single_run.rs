use seir_spread::io::scenario::load_inputs_json;
use seir_spread::io::series_csv::{write_series_csv, write_series_csv_file};
use seir_spread::{logging, run, InputMode, SimulationInputs, Solver};

fn main() -> anyhow::Result<()> {
    logging::setup();

    // Usage: single_run [scenario.json] [out.csv]
    // Without a scenario the built-in density-mode example runs; without an
    // output path the CSV goes to stdout.
    let inputs = match std::env::args().nth(1) {
        Some(path) => load_inputs_json(path)?,
        None => SimulationInputs {
            population_size: 500.0,
            initial_infected: 5.0,
            days: 30,
            mode: InputMode::CrowdDensity {
                crowd_density: "High (7-8)".to_string(),
                latent_period: 5.0,
                recovery_period: 10.0,
            },
        },
    };

    let (params, series) = run(&inputs, &Solver::default())?;
    if let Some(summary) = series.summary(&params) {
        log::info!(
            "peak infected {:.1} on day {:.1}, attack rate {:.3}",
            summary.peak_infected,
            summary.peak_day,
            summary.attack_rate
        );
    }

    match std::env::args().nth(2) {
        Some(out) => write_series_csv_file(out, &series)?,
        None => write_series_csv(std::io::stdout().lock(), &series)?,
    }
    Ok(())
}
