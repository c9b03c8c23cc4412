pub mod artifact_store;
pub mod error;
