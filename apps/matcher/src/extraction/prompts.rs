// LLM prompt constants for requirement extraction.

/// System prompt for job-description analysis — enforces JSON-only output.
pub const EXTRACT_SYSTEM: &str =
    "You are an expert technical recruiter analyzing job descriptions. \
    Extract the hiring criteria as structured data. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{jd_text}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract:
1. Key skills required (list them)
2. Years of experience required (as a number)
3. Role seniority level (Junior, Mid, Senior, or Lead)

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["python", "aws"],
  "years_of_experience": 5,
  "seniority": "Senior"
}

JOB DESCRIPTION:
{jd_text}"#;
