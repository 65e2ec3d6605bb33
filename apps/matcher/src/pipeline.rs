//! Request pipeline: extract requirements, evaluate the resume, persist the
//! result. Extraction failure aborts the request; a storage failure is
//! reported alongside the already-computed result instead of discarding it.

use tracing::{error, info};

use crate::errors::{ExtractionError, StorageError};
use crate::evaluation::{FitEvaluator, MatchResult};
use crate::extraction::JobRequirementSource;
use crate::storage::ResultStore;

/// Outcome of one match request. `storage` carries the object key on
/// success; evaluation output is valid either way.
pub struct MatchOutcome {
    pub result: MatchResult,
    pub storage: Result<String, StorageError>,
}

pub async fn run_match(
    extractor: &dyn JobRequirementSource,
    store: &dyn ResultStore,
    job_description: &str,
    resume: &str,
) -> Result<MatchOutcome, ExtractionError> {
    info!("Extracting job requirements");
    let requirements = extractor.extract(job_description).await?;
    info!(
        "Extracted {} skills, {} years required, seniority '{}'",
        requirements.skills.len(),
        requirements.years_of_experience,
        requirements.seniority
    );

    info!("Evaluating candidate fit");
    let result = FitEvaluator.evaluate(&requirements, resume);
    info!(
        "Fit score {} → {}",
        result.fit_score, result.recommendation
    );

    let storage = store.save(&result).await;
    if let Err(e) = &storage {
        error!("Failed to persist match result: {e}");
    }

    Ok(MatchOutcome { result, storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Requirements;
    use crate::llm_client::LlmError;
    use crate::storage::MemoryResultStore;
    use async_trait::async_trait;

    struct StaticRequirementSource(Requirements);

    #[async_trait]
    impl JobRequirementSource for StaticRequirementSource {
        async fn extract(&self, _job_description: &str) -> Result<Requirements, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    struct FailingRequirementSource;

    #[async_trait]
    impl JobRequirementSource for FailingRequirementSource {
        async fn extract(&self, _job_description: &str) -> Result<Requirements, ExtractionError> {
            Err(ExtractionError::Llm(LlmError::EmptyContent))
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ResultStore for FailingStore {
        async fn save(&self, _result: &MatchResult) -> Result<String, StorageError> {
            Err(StorageError::Write {
                key: "job_match_results_x.json".to_string(),
                message: "bucket unavailable".to_string(),
            })
        }
    }

    fn sample_requirements() -> Requirements {
        Requirements {
            skills: vec!["python".to_string(), "aws".to_string()],
            years_of_experience: 5,
            seniority: "Senior".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_extracts_evaluates_and_stores() {
        let extractor = StaticRequirementSource(sample_requirements());
        let store = MemoryResultStore::new();

        let outcome = run_match(
            &extractor,
            &store,
            "any job description",
            "7 years of experience with Python and AWS",
        )
        .await
        .unwrap();

        assert_eq!(outcome.result.fit_score, 100);
        assert!(outcome.storage.is_ok());
        assert_eq!(store.saved(), vec![outcome.result]);
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts_the_request() {
        let store = MemoryResultStore::new();
        let outcome = run_match(&FailingRequirementSource, &store, "jd", "resume").await;

        assert!(outcome.is_err());
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_the_result() {
        let extractor = StaticRequirementSource(sample_requirements());

        let outcome = run_match(&extractor, &FailingStore, "jd", "7 years of Python and AWS")
            .await
            .unwrap();

        assert_eq!(outcome.result.fit_score, 100);
        assert!(outcome.storage.is_err());
    }
}
