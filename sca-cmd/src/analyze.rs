//! Full analyze flow: load a polygon, submit it, print and export results.

use anyhow::Context;
use log::info;
use std::path::Path;
use std::sync::{Arc, Mutex};

use sca_api::client::AnalysisClient;
use sca_chart::{plot, series, table};
use sca_core::driver::run_analysis;
use sca_core::state::AppState;
use sca_geo::month_range::YearMonth;
use sca_geo::polygon::parse_vertex_csv;

/// Run one analysis end to end.
///
/// Reads the polygon vertices from `polygon_csv`, drives the submit flow
/// against `endpoint`, prints the observation table, and writes the optional
/// CSV and PNG outputs. Ctrl-C while the request is in flight cancels it
/// through the session controller.
pub async fn run_analyze(
    polygon_csv: &Path,
    start: &str,
    end: &str,
    endpoint: &str,
    observations_csv: Option<&Path>,
    chart_png: Option<&Path>,
) -> anyhow::Result<()> {
    let vertex_data = std::fs::read_to_string(polygon_csv)
        .with_context(|| format!("failed to read {}", polygon_csv.display()))?;
    let points = parse_vertex_csv(&vertex_data)?;
    let start: YearMonth = start.parse()?;
    let end: YearMonth = end.parse()?;

    let state = Arc::new(Mutex::new(AppState::new()));
    state.lock().unwrap().polygon_drawn(points)?;

    let client = AnalysisClient::new(endpoint)?;

    // Ctrl-C aborts the in-flight request through the controller; the driver
    // then resolves the session as cancelled.
    let cancel_state = state.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Cancelling analysis request");
            cancel_state.lock().unwrap().cancel_request();
        }
    });

    info!("Submitting analysis for {} to {} against {}", start, end, endpoint);
    let id = run_analysis(state.as_ref(), &client, start, end).await?;

    let state = state.lock().unwrap();
    let result = state
        .store()
        .get(id)
        .context("result missing after successful submit")?;

    println!(
        "{:<12} {:>14} {:>14} {:>9} {:>7}",
        "date", "snow m2", "total m2", "cover %", "ndvi"
    );
    for row in table::observation_rows(result) {
        println!(
            "{:<12} {:>14} {:>14} {:>9} {:>7}",
            row.date, row.snow_area_m2, row.total_area_m2, row.coverage_percent, row.mean_ndvi
        );
    }
    let sample = result.permanent_snow();
    println!(
        "permanent snow: {:.1} m2 above {:.0} m ({} observations)",
        sample.area_m2,
        sample.min_height_m,
        result.observations().len()
    );

    if let Some(path) = observations_csv {
        std::fs::write(path, table::observations_csv(result))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Observations written to {}", path.display());
    }
    if let Some(path) = chart_png {
        let title = format!("Snow cover {} to {}", start, end);
        plot::render_snow_chart(path, &title, &series::snow_cover_series(result))?;
        info!("Chart written to {}", path.display());
    }
    Ok(())
}
