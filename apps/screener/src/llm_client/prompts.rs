// Shared prompt fragments. Prompts specific to screening live in
// screening/prompts.rs and pull these in.

/// Appended to every prompt that expects a machine-parseable reply.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps reasoning in the candidate-facing language of the job posting.
pub const MATCH_JD_LANGUAGE_INSTRUCTION: &str = "\
    Detect the language used in the JOB DESCRIPTION and write every reasoning \
    and the summary in that same language.";
