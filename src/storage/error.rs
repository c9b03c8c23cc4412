use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// No object is stored under the requested key.
    #[error("Artifact '{key}' not found in bucket '{bucket}'")]
    ArtifactUnavailable { bucket: String, key: String },

    #[error("Failed to build object store client for bucket '{bucket}'")]
    ClientBuild {
        bucket: String,
        #[source]
        source: object_store::Error,
    },

    #[error("Object store operation on '{key}' failed")]
    ObjectStore {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("Failed to encode or decode CSV for '{key}'")]
    Csv {
        key: String,
        #[source]
        source: PolarsError,
    },
}

impl StorageError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::ArtifactUnavailable { .. })
    }
}
