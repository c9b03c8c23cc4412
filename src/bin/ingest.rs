//! Fetches today's and tomorrow's forecasts for every spot and uploads `<date>.csv` for each.

use log::error;
use std::error::Error;
use std::process::ExitCode;
use surfcast::{ArtifactStore, ForecastConfig, Pipeline, S3Config, StormglassClient};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let forecast = ForecastConfig::from_env()?;
    let s3 = S3Config::from_env()?;

    let pipeline = Pipeline::builder()
        .source(StormglassClient::new(&forecast.api_url, forecast.timeout())?)
        .store(ArtifactStore::s3(&s3)?)
        .build();

    let summary = pipeline
        .run_today_and_tomorrow(&forecast.credentials())
        .await;

    for failure in summary.failures() {
        if let Err(e) = &failure.result {
            let mut cause = e.source();
            while let Some(inner) = cause {
                error!("{}: caused by: {}", failure.date, inner);
                cause = inner.source();
            }
        }
    }

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
