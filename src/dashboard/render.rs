//! Browser rendering of a [`PlaceView`] with `plotlars`.

use crate::dashboard::{Chart, PlaceView};
use plotlars::{BarPlot, Plot, Text, TimeSeriesPlot};
use polars::prelude::*;

const TIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Opens both charts of the view in the browser.
pub fn render(view: &PlaceView) -> PolarsResult<()> {
    let wind = chart_frame(&view.wind_speed)?;
    BarPlot::builder()
        .data(&wind)
        .labels("label")
        .values("value")
        .plot_title(Text::from(format!("{} - {}", view.place, view.wind_speed.title).as_str()))
        .build()
        .plot();

    let swell = chart_frame(&view.swell_height)?;
    TimeSeriesPlot::builder()
        .data(&swell)
        .x("time")
        .y("value")
        .plot_title(Text::from(format!("{} - {}", view.place, view.swell_height.title).as_str()))
        .build()
        .plot();

    Ok(())
}

/// `time`, `value` and a bar `label`. Annotated charts carry the annotation in the label,
/// e.g. `2024-05-20 09:00 SW`.
fn chart_frame(chart: &Chart) -> PolarsResult<DataFrame> {
    let times: Vec<String> = chart
        .points
        .iter()
        .map(|p| p.time.format(TIME_LABEL_FORMAT).to_string())
        .collect();
    let labels: Vec<String> = chart
        .points
        .iter()
        .zip(&times)
        .map(|(point, time)| {
            chart
                .annotations
                .iter()
                .find(|a| a.time == point.time)
                .map(|a| format!("{} {}", time, a.text))
                .unwrap_or_else(|| time.clone())
        })
        .collect();
    let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();

    df!(
        "time" => times,
        "label" => labels,
        "value" => values
    )
}
