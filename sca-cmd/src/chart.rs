//! Re-render a chart from a previously exported observation CSV.

use anyhow::Context;
use log::info;
use std::path::Path;

use sca_chart::{plot, table};

pub fn run_chart(observations_csv: &Path, output_png: &Path, title: &str) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(observations_csv)
        .with_context(|| format!("failed to read {}", observations_csv.display()))?;
    let points = table::parse_snow_cover_csv(&data);
    anyhow::ensure!(
        !points.is_empty(),
        "no parseable observation rows in {}",
        observations_csv.display()
    );
    plot::render_snow_chart(output_png, title, &points)?;
    info!("Chart written to {}", output_png.display());
    Ok(())
}
