//! Dated CSV artifacts in object storage, one object per calendar day.

use crate::config::S3Config;
use crate::storage::error::StorageError;
use crate::types::day_window::artifact_key;
use crate::types::forecast_frame::ForecastFrame;
use bytes::Bytes;
use chrono::NaiveDate;
use log::info;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, ObjectStoreExt};
use std::fmt;
use std::sync::Arc;

/// Reads and writes `<YYYY-MM-DD>.csv` objects in one bucket.
#[derive(Clone)]
pub struct ArtifactStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl ArtifactStore {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// S3 (or any S3 compatible endpoint) backed store for `config.bucket`.
    pub fn s3(config: &S3Config) -> Result<Self, StorageError> {
        let bucket = config.bucket.as_str();
        let mut builder = AmazonS3Builder::new()
            .with_region(&config.region)
            .with_bucket_name(bucket)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_allow_http(config.allow_http);
        if let Some(endpoint) = &config.endpoint {
            // Path-style URLs (http://localhost:9000/bucket/key) for MinIO and friends
            builder = builder
                .with_endpoint(endpoint)
                .with_virtual_hosted_style_request(false);
        }
        let s3 = builder.build().map_err(|e| StorageError::ClientBuild {
            bucket: bucket.to_string(),
            source: e,
        })?;
        Ok(Self::new(Arc::new(s3), bucket))
    }

    /// Process-local store, used by tests and dry runs.
    pub fn in_memory(bucket: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Writes the frame as CSV under `<date>.csv`, replacing any existing object.
    /// Returns the object key.
    pub async fn put_artifact(
        &self,
        date: NaiveDate,
        frame: &mut ForecastFrame,
    ) -> Result<String, StorageError> {
        let key = artifact_key(date);
        let csv = frame.to_csv_bytes().map_err(|e| StorageError::Csv {
            key: key.clone(),
            source: e,
        })?;
        let size = csv.len();

        self.store
            .put(&Path::from(key.as_str()), Bytes::from(csv).into())
            .await
            .map_err(|e| StorageError::ObjectStore {
                key: key.clone(),
                source: e,
            })?;

        info!(
            "Uploaded {} ({} rows, {} bytes) to bucket '{}'",
            key,
            frame.height(),
            size,
            self.bucket
        );
        Ok(key)
    }

    /// Raw CSV content of the artifact for `date`.
    pub async fn get_artifact_bytes(&self, date: NaiveDate) -> Result<Bytes, StorageError> {
        let key = artifact_key(date);
        let result = match self.store.get(&Path::from(key.as_str())).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(StorageError::ArtifactUnavailable {
                    bucket: self.bucket.clone(),
                    key,
                })
            }
            Err(e) => return Err(StorageError::ObjectStore { key, source: e }),
        };
        result
            .bytes()
            .await
            .map_err(|e| StorageError::ObjectStore { key, source: e })
    }

    /// Loads and parses the artifact for `date`.
    pub async fn get_artifact(&self, date: NaiveDate) -> Result<ForecastFrame, StorageError> {
        let bytes = self.get_artifact_bytes(date).await?;
        ForecastFrame::from_csv_bytes(bytes.to_vec()).map_err(|e| StorageError::Csv {
            key: artifact_key(date),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::compass::CompassPoint;
    use crate::types::normalized_row::NormalizedRow;
    use chrono::{TimeZone, Utc};

    fn frame(swell_height: f64) -> ForecastFrame {
        ForecastFrame::from_rows(&[NormalizedRow {
            time: Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap(),
            place: "Praia de Geribá - Búzios".to_string(),
            air_temperature: 28.5,
            swell_height,
            swell_period: 9.0,
            wave_height: 1.0,
            wave_period: 7.0,
            wind_direction: CompassPoint::NE,
            wind_speed: 14.4,
        }])
        .unwrap()
    }

    #[test]
    fn test_s3_store_uses_configured_bucket() {
        let config = S3Config {
            bucket: "surf-archive".to_string(),
            region: "sa-east-1".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
            access_key_id: "access".to_string(),
            secret_access_key: "secret".to_string(),
            allow_http: true,
        };
        let store = ArtifactStore::s3(&config).unwrap();
        assert_eq!(store.bucket(), "surf-archive");
    }

    #[tokio::test]
    async fn test_missing_artifact_is_unavailable() {
        let store = ArtifactStore::in_memory("surfline");
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        match store.get_artifact(date).await {
            Err(StorageError::ArtifactUnavailable { bucket, key }) => {
                assert_eq!(bucket, "surfline");
                assert_eq!(key, "2024-02-10.csv");
            }
            other => panic!("expected unavailable artifact, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_artifact() -> Result<(), Box<dyn std::error::Error>> {
        let store = ArtifactStore::in_memory("surfline");
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        let key = store.put_artifact(date, &mut frame(0.8)).await?;
        assert_eq!(key, "2024-02-10.csv");
        store.put_artifact(date, &mut frame(1.9)).await?;

        let rows = store.get_artifact(date).await?.to_rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].swell_height, 1.9);
        Ok(())
    }
}
