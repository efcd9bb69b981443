// Prompt constants for resume screening.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, MATCH_JD_LANGUAGE_INSTRUCTION};

/// Screening prompt template.
/// Replace: {job_description}, {language_instruction}, {json_only_instruction}
pub const SCREENING_PROMPT_TEMPLATE: &str = r#"Act as an Expert Technical Recruiter.

YOUR GOAL:
Analyze the attached Resume PDF against the provided Job Description.

JOB DESCRIPTION:
{job_description}

INSTRUCTIONS:
1. Extract relevant information from the resume correctly (ignoring layout issues).
2. Evaluate the candidate based on 4 criteria:
   - Experience/Education (Matches years of experience and degree?)
   - Skills (Matches programming languages and tech stack?)
   - Knowledge (Domain knowledge and concepts the role relies on?)
   - Tools (Specific tools, platforms and services used?)
3. Provide a Score (0-100) for each criteria.
4. Set total_score to the average of the 4 criteria scores, rounded to an integer.
5. Provide specific Reasoning for each score.
   {language_instruction}

OUTPUT FORMAT (JSON Only):
{
    "candidate_name": "String",
    "total_score": Integer,
    "analysis": {
        "experience_education": { "score": Integer, "reasoning": "String" },
        "skills": { "score": Integer, "reasoning": "String" },
        "knowledge": { "score": Integer, "reasoning": "String" },
        "tools": { "score": Integer, "reasoning": "String" }
    },
    "summary": "String"
}

{json_only_instruction}"#;

/// Builds the screening prompt for one job description. Pure and deterministic.
pub fn build_screening_prompt(job_description: &str) -> String {
    SCREENING_PROMPT_TEMPLATE
        .replace("{language_instruction}", MATCH_JD_LANGUAGE_INSTRUCTION)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        // last, so braces inside the job description are never re-substituted
        .replace("{job_description}", job_description.trim())
}
