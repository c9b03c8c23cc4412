//! Terminal view of a daily forecast artifact.
//!
//! ```text
//! dashboard --date 2024-05-20 --place "Praia de Geribá - Búzios" --wind-direction
//! ```
//!
//! Built with `--features plotting`, the two charts also open in the browser.

use clap::Parser;
use chrono::NaiveDate;
use surfcast::{
    ArtifactStore, Chart, Dashboard, DashboardConfig, DashboardState, S3Config, Summary,
    ViewOptions, UNAVAILABLE_MESSAGE,
};

#[derive(Debug, Parser)]
#[command(about = "Show the surf forecast stored for one day")]
struct Cli {
    /// Day to show (YYYY-MM-DD). Defaults to today in the display time zone.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Place to show. Defaults to the first place in the artifact.
    #[arg(long)]
    place: Option<String>,

    /// Label wind speed bars with the wind direction.
    #[arg(long)]
    wind_direction: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    let display = DashboardConfig::from_env()?;
    let s3 = S3Config::from_env()?;

    let dashboard = Dashboard::new(ArtifactStore::s3(&s3)?, display.display_offset()?);
    let now = dashboard.now();
    let date = args.date.unwrap_or(now.date());

    let view = match dashboard.load(date).await {
        DashboardState::Available(view) => view,
        DashboardState::Unavailable { .. } => {
            println!("{}", UNAVAILABLE_MESSAGE);
            return Ok(());
        }
    };

    println!("Places: {}", view.places().join(" | "));
    let Some(place) = args.place.as_deref().or(view.default_place()) else {
        println!("{}", UNAVAILABLE_MESSAGE);
        return Ok(());
    };

    let options = ViewOptions {
        wind_direction_labels: args.wind_direction,
        now,
    };
    let place_view = view.select(place, &options)?;

    println!("\n{}", place_view.place);
    if let Some(summary) = &place_view.summary {
        print_summary(summary);
    }
    print_chart(&place_view.wind_speed);
    print_chart(&place_view.swell_height);

    #[cfg(feature = "plotting")]
    surfcast::render(&place_view)?;

    Ok(())
}

fn print_summary(summary: &Summary) {
    let show = |value: Option<f64>, unit: &str| {
        value
            .map(|v| format!("{} {}", v, unit))
            .unwrap_or_else(|| "-".to_string())
    };
    println!("Wind speed now:            {}", show(summary.current_wind_speed, "km/h"));
    println!("Swell height now:          {}", show(summary.current_swell_height, "m"));
    println!(
        "Swell height next 3 hours: {}",
        show(summary.next_hours_swell_height, "m")
    );
}

fn print_chart(chart: &Chart) {
    println!("\n{}", chart.title);
    for point in &chart.points {
        let label = chart
            .annotations
            .iter()
            .find(|a| a.time == point.time)
            .map(|a| a.text.as_str())
            .unwrap_or("");
        println!("  {}  {:>7.2}  {}", point.time.format("%H:%M"), point.value, label);
    }
}
