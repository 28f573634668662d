use anyhow::Context;

use crate::params::SimulationInputs;

/// Load one set of simulation inputs from a JSON file, e.g.
///
/// ```json
/// {"population_size": 500, "initial_infected": 5, "days": 30,
///  "mode": "crowd_density", "crowd_density": "High (7-8)",
///  "latent_period": 5, "recovery_period": 10}
/// ```
pub fn load_inputs_json(path: impl AsRef<std::path::Path>) -> anyhow::Result<SimulationInputs> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open scenario file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse scenario file: {}", path.display()))
}
