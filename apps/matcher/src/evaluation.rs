//! Fit evaluation — scores one resume against one validated `Requirements`.
//!
//! Pure and deterministic: no I/O, no randomness, never fails on well-typed
//! input. The only time dependency is the result timestamp, which is injected
//! through `evaluate_at` so tests can reproduce results byte for byte.

use std::fmt;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extraction::{Requirements, SENIORITY_UNKNOWN};

/// Skill coverage contributes up to 70 points; experience the remaining 30.
const SKILL_WEIGHT: f64 = 70.0;
const EXPERIENCE_WEIGHT: f64 = 30.0;

const STRONG_FIT_MIN: u32 = 75;
const MEDIUM_FIT_MIN: u32 = 50;

/// Categorical verdict derived from the fit score via fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Fit")]
    StrongFit,
    #[serde(rename = "Medium Fit")]
    MediumFit,
    #[serde(rename = "Weak Fit")]
    WeakFit,
}

impl Recommendation {
    /// Thresholds are inclusive lower bounds: 75+ strong, 50–74 medium.
    pub fn from_score(score: u32) -> Self {
        if score >= STRONG_FIT_MIN {
            Recommendation::StrongFit
        } else if score >= MEDIUM_FIT_MIN {
            Recommendation::MediumFit
        } else {
            Recommendation::WeakFit
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::StrongFit => "Strong Fit",
            Recommendation::MediumFit => "Medium Fit",
            Recommendation::WeakFit => "Weak Fit",
        };
        f.write_str(label)
    }
}

/// Complete output of evaluating one resume against one `Requirements`.
/// Immutable once produced; only read afterwards (persisted, displayed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub timestamp: DateTime<Utc>,
    pub job_requirements: Requirements,
    pub fit_score: u32,
    pub matched_skills: Vec<String>,
    pub recommendation: Recommendation,
    pub reasoning: Vec<String>,
}

lazy_static! {
    // "7 years", "2 Years", "1 year" — the max integer found wins.
    static ref YEARS_RE: Regex = Regex::new(r"(?i)(\d+)\s*years?").unwrap();
}

/// Estimates candidate experience from "<integer> year(s)" mentions in the
/// resume, taking the maximum match. A cheap heuristic: it only nudges the
/// score, so a second extraction call is not worth its cost.
fn scan_candidate_years(resume: &str) -> u32 {
    YEARS_RE
        .captures_iter(resume)
        .filter_map(|cap| cap[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Deterministic resume scorer.
///
/// Skill matching is case-insensitive substring containment: resumes phrase
/// skills inline with punctuation and pluralization ("Python,", "AWS-based"),
/// and the extractor vocabulary is coarse. Known limitation: very short
/// tokens can false-positive inside longer words.
pub struct FitEvaluator;

impl FitEvaluator {
    /// Evaluates with the current wall-clock timestamp.
    pub fn evaluate(&self, requirements: &Requirements, resume: &str) -> MatchResult {
        self.evaluate_at(requirements, resume, Utc::now())
    }

    /// Evaluates with an injected timestamp; pure function of its arguments.
    pub fn evaluate_at(
        &self,
        requirements: &Requirements,
        resume: &str,
        timestamp: DateTime<Utc>,
    ) -> MatchResult {
        let resume_lower = resume.to_lowercase();

        // Matched skills keep the requirement set's order.
        let matched_skills: Vec<String> = requirements
            .skills
            .iter()
            .filter(|skill| resume_lower.contains(skill.as_str()))
            .cloned()
            .collect();

        // Empty skill set means no skill-based penalty, not a zero score.
        let coverage = if requirements.skills.is_empty() {
            1.0
        } else {
            matched_skills.len() as f64 / requirements.skills.len() as f64
        };

        let candidate_years = scan_candidate_years(resume);
        let required_years = requirements.years_of_experience;

        let experience_points = if required_years == 0 || candidate_years >= required_years {
            EXPERIENCE_WEIGHT
        } else {
            EXPERIENCE_WEIGHT * f64::from(candidate_years) / f64::from(required_years)
        };

        let fit_score = (coverage * SKILL_WEIGHT + experience_points)
            .round()
            .clamp(0.0, 100.0) as u32;

        let recommendation = Recommendation::from_score(fit_score);
        let reasoning =
            build_reasoning(requirements, &matched_skills, candidate_years, &resume_lower);

        MatchResult {
            timestamp,
            job_requirements: requirements.clone(),
            fit_score,
            matched_skills,
            recommendation,
            reasoning,
        }
    }
}

/// One sentence per scoring factor, in fixed order: experience, skill
/// coverage, then seniority alignment when the role states one.
fn build_reasoning(
    requirements: &Requirements,
    matched_skills: &[String],
    candidate_years: u32,
    resume_lower: &str,
) -> Vec<String> {
    let mut reasoning = Vec::with_capacity(3);

    let required_years = requirements.years_of_experience;
    reasoning.push(if required_years == 0 {
        format!("The role sets no minimum years of experience; the resume indicates {candidate_years}.")
    } else if candidate_years > required_years {
        format!("The resume indicates {candidate_years} years of experience, exceeding the required {required_years}.")
    } else if candidate_years == required_years {
        format!("The resume indicates {candidate_years} years of experience, meeting the required {required_years}.")
    } else {
        format!("The resume indicates {candidate_years} years of experience, falling short of the required {required_years}.")
    });

    let total = requirements.skills.len();
    reasoning.push(if total == 0 {
        "The job description lists no explicit skill requirements.".to_string()
    } else if matched_skills.len() == total {
        format!(
            "The resume covers all {total} required skills: {}.",
            matched_skills.join(", ")
        )
    } else {
        let missing: Vec<&str> = requirements
            .skills
            .iter()
            .filter(|s| !matched_skills.contains(s))
            .map(String::as_str)
            .collect();
        if matched_skills.is_empty() {
            format!(
                "The resume covers none of the {total} required skills; missing: {}.",
                missing.join(", ")
            )
        } else {
            format!(
                "The resume covers {} of {total} required skills ({}); missing: {}.",
                matched_skills.len(),
                matched_skills.join(", "),
                missing.join(", ")
            )
        }
    });

    if requirements.seniority != SENIORITY_UNKNOWN {
        let seniority_lower = requirements.seniority.to_lowercase();
        reasoning.push(if resume_lower.contains(&seniority_lower) {
            format!(
                "The resume mentions the {} level targeted by the role.",
                requirements.seniority
            )
        } else {
            format!(
                "The resume does not explicitly mention the {} level targeted by the role.",
                requirements.seniority
            )
        });
    }

    reasoning
}
