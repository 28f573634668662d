use anyhow::Context;

use crate::model::seir::TimeSeries;
use crate::params::ResolvedParams;

/// Write a plain-text record of one run to `<out_dir>/seir_<run_id>.txt`:
/// resolved parameters, a blank line, then one CSV row per grid point.
pub fn write_run_log(
    out_dir: impl AsRef<std::path::Path>,
    run_id: &str,
    params: &ResolvedParams,
    series: &TimeSeries,
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    std::fs::create_dir_all(out_dir.as_ref()).context("create run log dir failed")?;
    let path = out_dir.as_ref().join(format!("seir_{}.txt", run_id));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("create run log file failed (path={:?})", path))?;
    let mut f = std::io::BufWriter::new(file);

    writeln!(f, "run_id={}", run_id)?;
    writeln!(f, "population={:.6}", params.population)?;
    writeln!(f, "initial_infected={:.6}", params.i0)?;
    writeln!(f, "beta={:.6}", params.beta)?;
    writeln!(f, "sigma={:.6}", params.sigma)?;
    writeln!(f, "gamma={:.6}", params.gamma)?;
    writeln!(f, "days={}", params.days)?;
    writeln!(f)?;
    writeln!(f, "t,susceptible,exposed,infected,recovered")?;

    for k in 0..series.len() {
        let [s, e, i, r] = series.sample(k).context("series columns differ in length")?;
        writeln!(f, "{:.6},{:.6},{:.6},{:.6},{:.6}", series.t[k], s, e, i, r)?;
    }
    f.flush()?;

    Ok(path)
}
