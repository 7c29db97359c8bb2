// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and reuses these.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that evaluates people.
pub const FAIRNESS_INSTRUCTION: &str = "\
    Evaluate candidates only on job-relevant skills, experience and accomplishments. \
    Ignore names, gender, age, ethnicity, nationality, photos and any other \
    protected characteristic. Do NOT invent qualifications that are not in the text.";
