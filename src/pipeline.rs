//! Daily ingestion: fetch every spot for one day, flatten, and store the result as `<date>.csv`.
//!
//! Execution is strictly sequential, one date at a time and one location at a time.
//! A quota exhaustion aborts the date immediately; nothing collected so far for that date is
//! uploaded. [`Pipeline::run_day_with_fallback`] then re-runs the whole date once with the
//! secondary key.

use crate::error::SurfcastError;
use crate::forecast::client::ForecastSource;
use crate::forecast::error::ForecastError;
use crate::forecast::transform::transform_observations;
use crate::storage::artifact_store::ArtifactStore;
use crate::types::credential::{ActiveCredential, ApiKey, Credentials};
use crate::types::day_window::DayWindow;
use crate::types::forecast_frame::ForecastFrame;
use crate::types::location::{default_locations, Location};
use crate::types::normalized_row::NormalizedRow;
use bon::bon;
use chrono::{Local, NaiveDate};
use log::{error, info, warn};

/// Success indicator of one date's run.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub object_key: String,
    pub rows: usize,
    /// Distinct places written to the artifact.
    pub places: usize,
}

/// Result of one date within a multi-date run.
#[derive(Debug)]
pub struct DateOutcome {
    pub date: NaiveDate,
    /// Key that was active when the date finished (successfully or not).
    pub credential: ActiveCredential,
    pub result: Result<DayReport, SurfcastError>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<DateOutcome>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &DateOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Calendar date of the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct Pipeline<S> {
    source: S,
    store: ArtifactStore,
    locations: Vec<Location>,
}

#[bon]
impl<S: ForecastSource> Pipeline<S> {
    /// Creates a pipeline.
    ///
    /// * `.source(S)`: **Required.** Where forecasts come from.
    /// * `.store(ArtifactStore)`: **Required.** Where daily artifacts go.
    /// * `.locations(Vec<Location>)`: Optional. Defaults to [`default_locations`].
    #[builder]
    pub fn new(source: S, store: ArtifactStore, locations: Option<Vec<Location>>) -> Self {
        Self {
            source,
            store,
            locations: locations.unwrap_or_else(default_locations),
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Fetches and transforms every location for `window`, in configuration order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing location. Rows of earlier locations are dropped.
    pub async fn collect_day(
        &self,
        window: &DayWindow,
        key: &ApiKey,
    ) -> Result<Vec<NormalizedRow>, ForecastError> {
        let mut rows = Vec::new();
        for location in &self.locations {
            let response = self.source.fetch(location, window, key).await?;
            let place_rows = transform_observations(&response.hours, &location.name)?;
            info!(
                "{}: {} rows for '{}'",
                window.date,
                place_rows.len(),
                location.name
            );
            rows.extend(place_rows);
        }
        Ok(rows)
    }

    /// Runs one date with one key: collect all locations and upload `<date>.csv`.
    ///
    /// * `.key(&ApiKey)`: **Required.** The key every request is signed with.
    /// * `.date(NaiveDate)`: Optional. Defaults to today on the local clock.
    ///
    /// ```no_run
    /// # use surfcast::{ApiKey, ArtifactStore, Pipeline, StormglassClient, SurfcastError};
    /// # async fn run() -> Result<(), SurfcastError> {
    /// let pipeline = Pipeline::builder()
    ///     .source(StormglassClient::with_defaults()?)
    ///     .store(ArtifactStore::in_memory("surfline"))
    ///     .build();
    /// let report = pipeline.run_day().key(&ApiKey::new("my-key")).call().await?;
    /// println!("uploaded {}", report.object_key);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn run_day(
        &self,
        key: &ApiKey,
        date: Option<NaiveDate>,
    ) -> Result<DayReport, SurfcastError> {
        let date = date.unwrap_or_else(today);
        let window = DayWindow::local(date).ok_or(SurfcastError::DateParsing(date))?;

        let rows = self.collect_day(&window, key).await?;
        let mut frame = ForecastFrame::from_rows(&rows)?;
        let object_key = self.store.put_artifact(date, &mut frame).await?;
        let places = frame.places()?.len();

        Ok(DayReport {
            date,
            object_key,
            rows: rows.len(),
            places,
        })
    }

    /// Runs one date, swapping to the secondary key once if the active key runs out of quota.
    ///
    /// `active` is updated in place so the caller can carry the swap over to later dates.
    /// A quota error while the secondary key is already active is returned as is.
    pub async fn run_day_with_fallback(
        &self,
        date: NaiveDate,
        credentials: &Credentials,
        active: &mut ActiveCredential,
    ) -> Result<DayReport, SurfcastError> {
        let first_attempt = self
            .run_day()
            .key(credentials.get(*active))
            .date(date)
            .call()
            .await;

        match first_attempt {
            Err(e) if e.is_api_limit() && *active == ActiveCredential::Primary => {
                warn!("{}: {}. Retrying the whole day with the secondary key", date, e);
                *active = ActiveCredential::Secondary;
                self.run_day()
                    .key(credentials.get(*active))
                    .date(date)
                    .call()
                    .await
            }
            other => other,
        }
    }

    /// Runs each date in turn. A failed date is logged and recorded; later dates still run.
    pub async fn run_dates(&self, dates: &[NaiveDate], credentials: &Credentials) -> RunSummary {
        let mut active = ActiveCredential::Primary;
        let mut summary = RunSummary::default();

        for &date in dates {
            let result = self
                .run_day_with_fallback(date, credentials, &mut active)
                .await;
            match &result {
                Ok(report) => info!(
                    "{}: stored {} rows as '{}' using the {} key",
                    date, report.rows, report.object_key, active
                ),
                Err(e) => error!("{}: ingestion failed: {}", date, e),
            }
            summary.outcomes.push(DateOutcome {
                date,
                credential: active,
                result,
            });
        }
        summary
    }

    /// The daily job: today and tomorrow on the local clock.
    pub async fn run_today_and_tomorrow(&self, credentials: &Credentials) -> RunSummary {
        let today = today();
        let dates: Vec<NaiveDate> = [Some(today), today.succ_opt()]
            .into_iter()
            .flatten()
            .collect();
        self.run_dates(&dates, credentials).await
    }
}
