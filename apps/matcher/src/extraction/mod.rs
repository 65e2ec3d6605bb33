//! Requirement extraction — turns raw job-description text into a validated
//! `Requirements` value via the LLM collaborator.
//!
//! The collaborator's output is untrusted: field presence and types are never
//! assumed. Total decode failure surfaces as `ExtractionError`; malformed
//! individual fields are repaired by `Requirements::from_extractor_json`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::ExtractionError;
use crate::extraction::prompts::{EXTRACT_PROMPT_TEMPLATE, EXTRACT_SYSTEM};
use crate::llm_client::LlmClient;

pub mod prompts;

/// Fallback seniority label when the extractor gives none.
pub const SENIORITY_UNKNOWN: &str = "Unknown";

/// Normalized hiring criteria extracted from a job description.
///
/// Immutable once constructed; every field is already validated, so
/// downstream consumers never re-check them. `skills` keeps first-appearance
/// order so matched-skill output is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    pub skills: Vec<String>,
    pub years_of_experience: u32,
    pub seniority: String,
}

impl Requirements {
    /// Builds a `Requirements` from the extractor's decoded JSON object,
    /// repairing missing or mistyped fields instead of failing:
    ///
    /// - `skills`: string elements are trimmed, lower-cased, and deduplicated
    ///   in first-appearance order; non-strings are dropped; a missing or
    ///   non-array field becomes the empty set.
    /// - `years_of_experience`: numbers truncate to a non-negative integer,
    ///   numeric strings are parsed; anything else defaults to 0.
    /// - `seniority`: kept verbatim when a non-blank string, else "Unknown".
    pub fn from_extractor_json(raw: &Value) -> Self {
        let skills = normalize_skills(raw.get("skills"));
        let years_of_experience = coerce_years(raw.get("years_of_experience"));
        let seniority = raw
            .get("seniority")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(SENIORITY_UNKNOWN)
            .to_string();

        Requirements {
            skills,
            years_of_experience,
            seniority,
        }
    }
}

fn normalize_skills(raw: Option<&Value>) -> Vec<String> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut skills: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let Some(s) = item.as_str() else { continue };
        let token = s.trim().to_lowercase();
        if !token.is_empty() && !skills.contains(&token) {
            skills.push(token);
        }
    }
    skills
}

fn coerce_years(raw: Option<&Value>) -> u32 {
    match raw {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|y| y.min(u64::from(u32::MAX)) as u32)
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| *f >= 0.0)
                        .map(|f| f as u32)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences the model sometimes
/// wraps its output in, despite the system prompt.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(inner) = text.strip_prefix(prefix) {
            let inner = inner.trim_start();
            return inner.strip_suffix("```").map(str::trim_end).unwrap_or(inner);
        }
    }
    text
}

/// Decodes raw extractor output into validated `Requirements`.
///
/// Fails only when the text is not a JSON object at all; field-level damage
/// is handled by normalization.
pub fn decode_requirements(response_text: &str) -> Result<Requirements, ExtractionError> {
    let stripped = strip_code_fences(response_text);
    let value: Value = serde_json::from_str(stripped)?;

    if !value.is_object() {
        return Err(ExtractionError::NotAnObject {
            snippet: stripped.chars().take(120).collect(),
        });
    }

    Ok(Requirements::from_extractor_json(&value))
}

/// Source of validated job requirements. Behind a trait so pipeline tests
/// can substitute an in-memory fake for the LLM-backed implementation.
#[async_trait]
pub trait JobRequirementSource: Send + Sync {
    async fn extract(&self, job_description: &str) -> Result<Requirements, ExtractionError>;
}

/// LLM-backed requirement extractor. One attempt per call at this level;
/// transport retries live inside `LlmClient`.
pub struct LlmRequirementExtractor {
    llm: LlmClient,
}

impl LlmRequirementExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl JobRequirementSource for LlmRequirementExtractor {
    async fn extract(&self, job_description: &str) -> Result<Requirements, ExtractionError> {
        let prompt = EXTRACT_PROMPT_TEMPLATE.replace("{jd_text}", job_description);
        let response = self.llm.complete(&prompt, EXTRACT_SYSTEM).await?;

        let requirements = decode_requirements(&response)?;
        debug!(
            "Extracted requirements: {} skills, {} years, seniority '{}'",
            requirements.skills.len(),
            requirements.years_of_experience,
            requirements.seniority
        );
        Ok(requirements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_fields_default_without_error() {
        let raw = json!({"skills": null, "seniority": 42});
        let req = Requirements::from_extractor_json(&raw);
        assert!(req.skills.is_empty());
        assert_eq!(req.years_of_experience, 0);
        assert_eq!(req.seniority, "Unknown");
    }

    #[test]
    fn test_skills_are_trimmed_lowercased_and_deduplicated() {
        let raw = json!({"skills": ["  Python ", "AWS", "python", "aws "]});
        let req = Requirements::from_extractor_json(&raw);
        assert_eq!(req.skills, vec!["python", "aws"]);
    }

    #[test]
    fn test_non_string_skill_elements_are_dropped() {
        let raw = json!({"skills": ["python", 7, null, {"k": "v"}, "django"]});
        let req = Requirements::from_extractor_json(&raw);
        assert_eq!(req.skills, vec!["python", "django"]);
    }

    #[test]
    fn test_blank_skill_tokens_are_dropped() {
        let raw = json!({"skills": ["", "   ", "rust"]});
        let req = Requirements::from_extractor_json(&raw);
        assert_eq!(req.skills, vec!["rust"]);
    }

    #[test]
    fn test_years_from_integer() {
        let raw = json!({"years_of_experience": 5});
        assert_eq!(Requirements::from_extractor_json(&raw).years_of_experience, 5);
    }

    #[test]
    fn test_years_from_float_truncates() {
        let raw = json!({"years_of_experience": 3.8});
        assert_eq!(Requirements::from_extractor_json(&raw).years_of_experience, 3);
    }

    #[test]
    fn test_years_from_numeric_string() {
        let raw = json!({"years_of_experience": " 7 "});
        assert_eq!(Requirements::from_extractor_json(&raw).years_of_experience, 7);
    }

    #[test]
    fn test_negative_years_default_to_zero() {
        let raw = json!({"years_of_experience": -4});
        assert_eq!(Requirements::from_extractor_json(&raw).years_of_experience, 0);
    }

    #[test]
    fn test_non_numeric_years_default_to_zero() {
        let raw = json!({"years_of_experience": "several"});
        assert_eq!(Requirements::from_extractor_json(&raw).years_of_experience, 0);
    }

    #[test]
    fn test_seniority_kept_verbatim() {
        let raw = json!({"seniority": "Senior"});
        assert_eq!(Requirements::from_extractor_json(&raw).seniority, "Senior");
    }

    #[test]
    fn test_blank_seniority_becomes_unknown() {
        let raw = json!({"seniority": "   "});
        assert_eq!(Requirements::from_extractor_json(&raw).seniority, "Unknown");
    }

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"skills\": []}\n```";
        assert_eq!(strip_code_fences(input), "{\"skills\": []}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"skills\": []}\n```";
        assert_eq!(strip_code_fences(input), "{\"skills\": []}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "{\"skills\": []}";
        assert_eq!(strip_code_fences(input), "{\"skills\": []}");
    }

    #[test]
    fn test_decode_happy_path() {
        let text = r#"{"skills": ["Python", "AWS"], "years_of_experience": 5, "seniority": "Senior"}"#;
        let req = decode_requirements(text).unwrap();
        assert_eq!(req.skills, vec!["python", "aws"]);
        assert_eq!(req.years_of_experience, 5);
        assert_eq!(req.seniority, "Senior");
    }

    #[test]
    fn test_decode_fenced_output() {
        let text = "```json\n{\"skills\": [\"rust\"], \"years_of_experience\": 2, \"seniority\": \"Mid\"}\n```";
        let req = decode_requirements(text).unwrap();
        assert_eq!(req.skills, vec!["rust"]);
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_requirements("I could not find any requirements.").unwrap_err();
        assert!(matches!(err, ExtractionError::Undecodable(_)));
    }

    #[test]
    fn test_decode_rejects_json_scalar() {
        let err = decode_requirements("42").unwrap_err();
        assert!(matches!(err, ExtractionError::NotAnObject { .. }));
    }
}
