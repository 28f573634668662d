use anyhow::Context;
use serde::Serialize;

use crate::model::seir::TimeSeries;

#[derive(Debug, Serialize)]
struct SeriesRow {
    day: f64,
    susceptible: f64,
    exposed: f64,
    infected: f64,
    recovered: f64,
}

/// Write the series as CSV with columns `day,susceptible,exposed,infected,recovered`.
pub fn write_series_csv<W: std::io::Write>(writer: W, series: &TimeSeries) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (k, &day) in series.t.iter().enumerate() {
        let [susceptible, exposed, infected, recovered] =
            series.sample(k).context("series columns differ in length")?;
        wtr.serialize(SeriesRow {
            day,
            susceptible,
            exposed,
            infected,
            recovered,
        })?;
    }
    wtr.flush().context("flush series CSV failed")?;
    Ok(())
}

pub fn write_series_csv_file(path: impl AsRef<std::path::Path>, series: &TimeSeries) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create series CSV: {}", path.display()))?;
    write_series_csv(file, series)
}
