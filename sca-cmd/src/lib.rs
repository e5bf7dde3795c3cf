//! Command implementations for the snow cover analysis CLI.
//!
//! Provides subcommands for running an analysis against the remote service,
//! inspecting month windows, and re-rendering charts from exported data.

use clap::Subcommand;
use std::path::PathBuf;

use sca_geo::month_range::{MonthRange, YearMonth};

pub mod analyze;
pub mod chart;

#[derive(Subcommand)]
pub enum Command {
    /// Submit a polygon for snow and vegetation analysis over a month range
    Analyze {
        /// Path to the polygon vertex CSV (lat,lng rows with a header)
        #[arg(short, long)]
        polygon_csv: PathBuf,

        /// First month of the window (YYYY-MM)
        #[arg(long)]
        start: String,

        /// Last month of the window (YYYY-MM)
        #[arg(long)]
        end: String,

        /// Analysis service endpoint
        #[arg(long, default_value = sca_api::client::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Output path for the observation CSV
        #[arg(short = 'o', long)]
        observations_csv: Option<PathBuf>,

        /// Output path for the snow cover chart PNG
        #[arg(short = 'c', long)]
        chart_png: Option<PathBuf>,
    },

    /// Print the concrete date window for a month range
    Window {
        /// First month of the window (YYYY-MM)
        #[arg(long)]
        start: String,

        /// Last month of the window (YYYY-MM)
        #[arg(long)]
        end: String,
    },

    /// Render a snow cover chart from a previously exported observation CSV
    Chart {
        /// Path to the observation CSV
        #[arg(short = 'i', long)]
        observations_csv: PathBuf,

        /// Output path for the chart PNG
        #[arg(short = 'o', long)]
        output_png: PathBuf,

        /// Chart title
        #[arg(long, default_value = "Snow cover")]
        title: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            polygon_csv,
            start,
            end,
            endpoint,
            observations_csv,
            chart_png,
        } => {
            analyze::run_analyze(
                &polygon_csv,
                &start,
                &end,
                &endpoint,
                observations_csv.as_deref(),
                chart_png.as_deref(),
            )
            .await
        }
        Command::Window { start, end } => {
            let start: YearMonth = start.parse()?;
            let end: YearMonth = end.parse()?;
            let range = MonthRange::new(start, end)?;
            let (window_start, window_end) = range.request_window();
            println!("{} to {}", window_start, window_end);
            Ok(())
        }
        Command::Chart {
            observations_csv,
            output_png,
            title,
        } => chart::run_chart(&observations_csv, &output_png, &title),
    }
}
