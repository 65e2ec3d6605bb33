use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure to turn a job description into validated requirements.
///
/// Raised only when the extraction collaborator is unreachable or its output
/// cannot be decoded as a JSON object at all. Malformed individual fields
/// inside a decodable response are repaired by normalization instead.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("requirement extraction call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("extractor response is not valid JSON: {0}")]
    Undecodable(#[from] serde_json::Error),

    #[error("extractor response is not a JSON object: {snippet}")]
    NotAnObject { snippet: String },
}

/// Failure to persist a computed match result.
///
/// Always decoupled from evaluation: a storage failure never invalidates the
/// MatchResult that was about to be written.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize match result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write result object '{key}': {message}")]
    Write { key: String, message: String },
}
