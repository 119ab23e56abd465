//! Terminal front end for WheatWatch: per-window index series and one-shot
//! health predictions, printed as JSON.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use wheatwatch_core::{ExtractionResult, Region};
use wheatwatch_gee::{DEFAULT_BASE_URL, Extractor, GeeClient, GeeError, SeriesBuilder};
use wheatwatch_model::Predictor;

#[derive(Parser)]
#[command(name = "wheatwatch", version, about = "Wheat-health analysis from satellite imagery")]
struct Cli {
    /// Base URL of the remote imagery service.
    #[arg(long, env = "GEE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    gee_url: String,

    /// Cloud project the imagery service scopes requests under.
    #[arg(long, env = "GEE_PROJECT", default_value = "wheatwatch")]
    project: String,

    /// Bearer token for the imagery service.
    #[arg(long, env = "GEE_ACCESS_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the per-window vegetation-index series for a point.
    Indices {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Campaign start date (YYYY-MM-DD).
        #[arg(long)]
        start_date: NaiveDate,
    },
    /// Predict wheat health for a point over a date range.
    Predict {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
        /// Path to the ONNX classifier artifact.
        #[arg(long, env = "WHEAT_MODEL_PATH", default_value = "models/wheat_health_rf.onnx")]
        model: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("wheatwatch v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    let mut client = GeeClient::new(cli.gee_url, cli.project)?;
    if let Some(token) = cli.token {
        client = client.with_token(token);
    }

    match cli.command {
        Command::Indices {
            lat,
            lon,
            start_date,
        } => {
            let region = Region::point(lat, lon)?;
            let series = SeriesBuilder::new(client).build(&region, start_date).await;
            let records = series.to_records()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Predict {
            lat,
            lon,
            start_date,
            end_date,
            model,
        } => {
            anyhow::ensure!(end_date > start_date, "end date must be after start date");
            let region = Region::point(lat, lon)?;
            let extraction = match Extractor::new(client)
                .extract(&region, start_date, end_date)
                .await
            {
                Ok(extraction) => extraction,
                Err(GeeError::EmptyCollection) => ExtractionResult::empty(),
                Err(err) => return Err(err).context("extracting bands"),
            };

            let predictor = Predictor::load(&model);
            match predictor.predict(&extraction) {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(err) => println!("{}", serde_json::json!({"error": err.to_string()})),
            }
        }
    }

    Ok(())
}
