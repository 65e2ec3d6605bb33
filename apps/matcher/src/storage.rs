//! Result persistence — writes each match result to object storage as a
//! timestamped JSON document.
//!
//! One attempt per call; retry policy belongs to the caller. Evaluation and
//! persistence are decoupled: a failed write never discards the result.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::errors::StorageError;
use crate::evaluation::MatchResult;

/// Persists one match result, returning the object key it was stored under.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn save(&self, result: &MatchResult) -> Result<String, StorageError>;
}

/// S3-backed store. Keys are derived from the result's own timestamp so a
/// record is addressable without consulting any other state.
pub struct S3ResultStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ResultStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

fn object_key(result: &MatchResult) -> String {
    format!(
        "job_match_results_{}.json",
        result.timestamp.format("%Y%m%d_%H%M%S")
    )
}

#[async_trait]
impl ResultStore for S3ResultStore {
    async fn save(&self, result: &MatchResult) -> Result<String, StorageError> {
        let key = object_key(result);
        let body = serde_json::to_string_pretty(result)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body.into_bytes()))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| StorageError::Write {
                key: key.clone(),
                message: e.to_string(),
            })?;

        info!("Saved match result to s3://{}/{}", self.bucket, key);
        Ok(key)
    }
}

/// In-memory store for pipeline tests.
#[cfg(test)]
pub struct MemoryResultStore {
    saved: std::sync::Mutex<Vec<MatchResult>>,
}

#[cfg(test)]
impl MemoryResultStore {
    pub fn new() -> Self {
        Self {
            saved: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<MatchResult> {
        self.saved.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn save(&self, result: &MatchResult) -> Result<String, StorageError> {
        let mut saved = self.saved.lock().unwrap();
        saved.push(result.clone());
        Ok(object_key(result))
    }
}
